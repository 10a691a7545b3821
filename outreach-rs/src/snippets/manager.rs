//! Snippet manager for CRUD operations

use crate::db::parse_timestamp;
use crate::error::{OutreachError, Result};
use crate::hydration::sources::SnippetSource;
use crate::snippets::types::{CreateSnippetRequest, Snippet, UpdateSnippetRequest};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

/// Manages snippets with database persistence
pub struct SnippetManager {
    db: SqlitePool,
}

impl SnippetManager {
    /// Create a new snippet manager
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Initialize the snippets table
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snippets (
                id TEXT PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Create a new snippet
    ///
    /// The slug is trimmed and must be non-empty and unused.
    pub async fn create_snippet(&self, request: CreateSnippetRequest) -> Result<Snippet> {
        let slug = request.slug.trim().to_string();
        if slug.is_empty() {
            return Err(OutreachError::Parse("Snippet slug cannot be empty".to_string()));
        }
        if slug.contains('}') {
            return Err(OutreachError::Parse(format!(
                "Snippet slug cannot contain '}}': {}",
                slug
            )));
        }

        if self.find_by_slug(&slug).await?.is_some() {
            return Err(OutreachError::Conflict(format!("Snippet already exists: {}", slug)));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let name = request.name.unwrap_or_else(|| slug.clone());

        sqlx::query(
            r#"
            INSERT INTO snippets (id, slug, name, text, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&slug)
        .bind(&name)
        .bind(&request.text)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.db)
        .await?;

        debug!("Created snippet {} ({})", slug, id);

        Ok(Snippet {
            id,
            slug,
            name,
            text: request.text,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a snippet by ID
    pub async fn get_snippet(&self, id: &str) -> Result<Option<Snippet>> {
        let row = sqlx::query(
            "SELECT id, slug, name, text, created_at, updated_at FROM snippets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(row_to_snippet).transpose()
    }

    /// Get a snippet by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Snippet>> {
        let row = sqlx::query(
            "SELECT id, slug, name, text, created_at, updated_at FROM snippets WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await?;

        row.map(row_to_snippet).transpose()
    }

    /// List all snippets ordered by slug
    pub async fn list_snippets(&self) -> Result<Vec<Snippet>> {
        let rows = sqlx::query(
            "SELECT id, slug, name, text, created_at, updated_at FROM snippets ORDER BY slug",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(row_to_snippet).collect()
    }

    /// Update a snippet's name or text
    pub async fn update_snippet(&self, id: &str, request: UpdateSnippetRequest) -> Result<Snippet> {
        let existing = self
            .get_snippet(id)
            .await?
            .ok_or_else(|| OutreachError::NotFound(format!("Snippet not found: {}", id)))?;

        let mut updates = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(name) = request.name {
            updates.push("name = ?");
            params.push(name);
        }
        if let Some(text) = request.text {
            updates.push("text = ?");
            params.push(text);
        }

        if updates.is_empty() {
            return Ok(existing);
        }

        updates.push("updated_at = ?");
        params.push(Utc::now().to_rfc3339());

        let query_str = format!("UPDATE snippets SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);
        for param in params {
            query = query.bind(param);
        }
        query.bind(id).execute(&self.db).await?;

        self.get_snippet(id)
            .await?
            .ok_or_else(|| OutreachError::NotFound("Snippet disappeared after update".to_string()))
    }

    /// Delete a snippet
    pub async fn delete_snippet(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(OutreachError::NotFound(format!("Snippet not found: {}", id)));
        }

        Ok(())
    }

    /// Seed the relationship-softener snippets
    ///
    /// Slugs that already exist are left alone. Returns how many were created.
    pub async fn create_default_snippets(&self) -> Result<usize> {
        let defaults = [
            (
                "as_you_may_remember",
                "As you may remember",
                "As you may remember, we spoke a while back.",
            ),
            (
                "as_you_may_remember_softener",
                "As you may remember (softener)",
                "You may remember me from our earlier conversation.",
            ),
            (
                "as_you_remember",
                "As you remember",
                "As you'll remember, we've been in touch before.",
            ),
            (
                "you_may_remember",
                "You may remember",
                "You may remember we connected previously.",
            ),
        ];

        let mut created = 0;
        for (slug, name, text) in defaults {
            if self.find_by_slug(slug).await?.is_some() {
                continue;
            }
            self.create_snippet(CreateSnippetRequest {
                slug: slug.to_string(),
                name: Some(name.to_string()),
                text: text.to_string(),
            })
            .await?;
            created += 1;
        }

        info!("Seeded {} default snippet(s)", created);
        Ok(created)
    }
}

#[async_trait]
impl SnippetSource for SnippetManager {
    async fn find_snippet_by_slug(&self, slug: &str) -> Result<Option<Snippet>> {
        self.find_by_slug(slug).await
    }
}

/// Convert database row to Snippet
fn row_to_snippet(row: sqlx::sqlite::SqliteRow) -> Result<Snippet> {
    use sqlx::Row;

    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Snippet {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        text: row.try_get("text")?,
        created_at: parse_timestamp(&created_at, "created_at")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
    })
}
