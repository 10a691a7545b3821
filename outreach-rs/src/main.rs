//! CLI for outreach template hydration
//!
//! # Usage
//!
//! ```bash
//! # Create tables and seed the default snippets
//! outreach-rs init --with-defaults
//!
//! # Manage snippets
//! outreach-rs snippet add intro "Hope all is well, {{firstName}}."
//! outreach-rs snippet list
//!
//! # Hydrate a template for a recipient
//! outreach-rs hydrate "Hi {{firstName}}" --to "Jane Doe <jane@example.com>"
//!
//! # Check a template for leftover placeholders
//! outreach-rs validate --file draft.txt
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use outreach_rs::config::{Config, LoggingConfig};
use outreach_rs::contacts::ContactManager;
use outreach_rs::hydration::{ResolutionContext, TemplateHydrator};
use outreach_rs::snippets::{CreateSnippetRequest, SnippetManager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "outreach-rs")]
#[command(about = "Hydrate outreach templates from contacts and snippets", long_about = None)]
struct Cli {
    /// Config file (TOML); OUTREACH__* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create database tables
    Init {
        /// Also seed the default snippets
        #[arg(long)]
        with_defaults: bool,
    },
    /// Manage snippets
    Snippet {
        #[command(subcommand)]
        command: SnippetCommands,
    },
    /// List the variables templates can use
    Variables,
    /// Hydrate a template and print the result
    Hydrate {
        /// Template text
        template: Option<String>,
        /// Read the template from a file
        #[arg(short, long, conflicts_with = "template")]
        file: Option<PathBuf>,
        #[arg(long)]
        contact_id: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Recipient header, e.g. "Jane Doe <jane@example.com>"
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        owner_id: Option<String>,
        #[arg(long)]
        tenant_id: Option<String>,
        /// Override a variable, e.g. --var firstName=Bob
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },
    /// Report placeholders left in a template
    Validate {
        /// Template text
        template: Option<String>,
        /// Read the template from a file
        #[arg(short, long, conflicts_with = "template")]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SnippetCommands {
    /// Add a snippet
    Add {
        slug: String,
        text: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// List snippets
    List,
    /// Delete a snippet by ID
    Delete { id: String },
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty variable name in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

fn read_template(template: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    match (template, file) {
        (Some(template), _) => Ok(template),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display())),
        (None, None) => bail!("Provide a template or --file"),
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries hydrated text
    if config.format == "json" {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Init { with_defaults } => {
            let pool = outreach_rs::db::connect(&config.storage.database_url).await?;
            ContactManager::new(pool.clone()).init_db().await?;
            let snippets = SnippetManager::new(pool);
            snippets.init_db().await?;
            info!("Initialized {}", config.storage.database_url);

            if with_defaults {
                let created = snippets.create_default_snippets().await?;
                println!("✓ Seeded {} default snippet(s)", created);
            }
            println!("✓ Database ready");
        }
        Commands::Snippet { command } => {
            let pool = outreach_rs::db::connect(&config.storage.database_url).await?;
            let snippets = SnippetManager::new(pool);

            match command {
                SnippetCommands::Add { slug, text, name } => {
                    let snippet = snippets
                        .create_snippet(CreateSnippetRequest { slug, name, text })
                        .await?;
                    println!("✓ Snippet {} added ({})", snippet.slug, snippet.id);
                }
                SnippetCommands::List => {
                    let all = snippets.list_snippets().await?;
                    if all.is_empty() {
                        println!("No snippets found.");
                    } else {
                        println!("{:<38} {:<32} {}", "ID", "Slug", "Text");
                        println!("{:-<100}", "");
                        for snippet in &all {
                            println!("{:<38} {:<32} {}", snippet.id, snippet.slug, snippet.text);
                        }
                        println!("\nTotal: {} snippet(s)", all.len());
                    }
                }
                SnippetCommands::Delete { id } => {
                    snippets.delete_snippet(&id).await?;
                    println!("✓ Snippet {} deleted", id);
                }
            }
        }
        Commands::Variables => {
            let catalog = outreach_rs::hydration::VariableCatalog::standard();
            for definition in catalog.definitions() {
                println!("{{{{{}}}}}  {}", definition.key, definition.description);
            }
        }
        Commands::Hydrate {
            template,
            file,
            contact_id,
            email,
            to,
            owner_id,
            tenant_id,
            vars,
        } => {
            let template = read_template(template, file)?;

            let pool = outreach_rs::db::connect(&config.storage.database_url).await?;
            let contacts = Arc::new(ContactManager::new(pool.clone()));
            let snippets = Arc::new(SnippetManager::new(pool));
            let hydrator = TemplateHydrator::new(contacts.clone(), contacts, snippets)
                .with_computed_fallback(config.hydration.computed_fallback.clone());

            let ctx = ResolutionContext {
                contact_id,
                contact_email: email,
                to_header: to,
                owner_id,
                tenant_id,
                metadata: vars
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect(),
            };

            println!("{}", hydrator.hydrate(&template, &ctx).await);
        }
        Commands::Validate { template, file } => {
            let template = read_template(template, file)?;
            let result = TemplateHydrator::validate(&template);

            if result.valid {
                println!("✓ No unresolved placeholders");
            } else {
                for name in &result.missing_variables {
                    println!("✗ {{{{{}}}}}", name);
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("firstName=Bob").unwrap(),
            ("firstName".to_string(), "Bob".to_string())
        );
        assert_eq!(
            parse_var("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }

    #[test]
    fn test_cli_parses_hydrate() {
        let cli = Cli::try_parse_from([
            "outreach-rs",
            "hydrate",
            "Hi {{firstName}}",
            "--to",
            "Jane <jane@x.com>",
            "--var",
            "title=CEO",
        ])
        .unwrap();

        match cli.command {
            Commands::Hydrate { template, to, vars, .. } => {
                assert_eq!(template.as_deref(), Some("Hi {{firstName}}"));
                assert_eq!(to.as_deref(), Some("Jane <jane@x.com>"));
                assert_eq!(vars, vec![("title".to_string(), "CEO".to_string())]);
            }
            _ => panic!("expected hydrate"),
        }
    }
}
