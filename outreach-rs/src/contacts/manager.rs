//! Contact manager for database persistence
//!
//! Stores contacts, the companies they are linked to, and tenants (the
//! organizations sending outreach).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::types::*;
use crate::db::parse_timestamp;
use crate::error::{OutreachError, Result};
use crate::hydration::sources::{ContactSource, TenantSource};

/// Contact manager
pub struct ContactManager {
    db: SqlitePool,
}

#[derive(FromRow)]
struct ContactRow {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    full_name: Option<String>,
    goes_by: Option<String>,
    email: Option<String>,
    title: Option<String>,
    company_name: Option<String>,
    company_id: Option<String>,
    linked_company_name: Option<String>,
    created_at: String,
    updated_at: String,
}

#[derive(FromRow)]
struct TenantRow {
    id: String,
    company_name: String,
}

const CONTACT_SELECT: &str = r#"
    SELECT c.id, c.first_name, c.last_name, c.full_name, c.goes_by, c.email,
           c.title, c.company_name, c.company_id,
           co.company_name AS linked_company_name,
           c.created_at, c.updated_at
    FROM contacts c
    LEFT JOIN companies co ON co.id = c.company_id
"#;

impl ContactManager {
    /// Create a new contact manager
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Initialize database tables
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                id TEXT PRIMARY KEY,
                company_name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                first_name TEXT,
                last_name TEXT,
                full_name TEXT,
                goes_by TEXT,
                email TEXT,
                title TEXT,
                company_name TEXT,
                company_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (company_id) REFERENCES companies(id)
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tenants (
                id TEXT PRIMARY KEY,
                company_name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(lower(email))")
            .execute(&self.db)
            .await?;

        Ok(())
    }

    // ==================== COMPANY / TENANT METHODS ====================

    /// Create a company contacts can be linked to
    pub async fn create_company(&self, company_name: &str) -> Result<Company> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO companies (id, company_name) VALUES (?, ?)")
            .bind(&id)
            .bind(company_name)
            .execute(&self.db)
            .await?;

        Ok(Company {
            id,
            company_name: company_name.to_string(),
        })
    }

    /// Create a tenant
    pub async fn create_tenant(&self, company_name: &str) -> Result<Tenant> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO tenants (id, company_name) VALUES (?, ?)")
            .bind(&id)
            .bind(company_name)
            .execute(&self.db)
            .await?;

        Ok(Tenant {
            id,
            company_name: company_name.to_string(),
        })
    }

    /// Get tenant by ID
    pub async fn get_tenant(&self, id: &str) -> Result<Option<Tenant>> {
        let row: Option<TenantRow> =
            sqlx::query_as("SELECT id, company_name FROM tenants WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(row.map(|r| Tenant {
            id: r.id,
            company_name: r.company_name,
        }))
    }

    // ==================== CONTACT METHODS ====================

    /// Create a contact
    pub async fn create_contact(&self, request: CreateContactRequest) -> Result<Contact> {
        if let Some(ref company_id) = request.company_id {
            let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM companies WHERE id = ?")
                .bind(company_id)
                .fetch_optional(&self.db)
                .await?;
            if exists.is_none() {
                return Err(OutreachError::NotFound(format!("Company not found: {}", company_id)));
            }
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let email = request.email.map(|e| e.trim().to_string());

        sqlx::query(
            r#"
            INSERT INTO contacts (
                id, first_name, last_name, full_name, goes_by, email,
                title, company_name, company_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.full_name)
        .bind(&request.goes_by)
        .bind(&email)
        .bind(&request.title)
        .bind(&request.company_name)
        .bind(&request.company_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await?;

        self.get_contact(&id)
            .await?
            .ok_or_else(|| OutreachError::NotFound("Contact disappeared after insert".to_string()))
    }

    /// Get contact by ID, with its linked company
    pub async fn get_contact(&self, id: &str) -> Result<Option<Contact>> {
        let query = format!("{} WHERE c.id = ?", CONTACT_SELECT);
        let row: Option<ContactRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        row.map(row_to_contact).transpose()
    }

    /// Find a contact by email, ignoring case
    ///
    /// When several contacts share an address the most recently updated wins.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let query = format!(
            "{} WHERE lower(c.email) = lower(?) ORDER BY c.updated_at DESC LIMIT 1",
            CONTACT_SELECT
        );
        let row: Option<ContactRow> = sqlx::query_as(&query)
            .bind(email.trim())
            .fetch_optional(&self.db)
            .await?;

        row.map(row_to_contact).transpose()
    }

    /// Set a contact's last-touched timestamp
    pub async fn touch_contact(&self, id: &str, at: chrono::DateTime<Utc>) -> Result<()> {
        let result = sqlx::query("UPDATE contacts SET updated_at = ? WHERE id = ?")
            .bind(at.to_rfc3339())
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(OutreachError::NotFound(format!("Contact not found: {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactSource for ContactManager {
    async fn find_contact_by_id(&self, id: &str) -> Result<Option<Contact>> {
        self.get_contact(id).await
    }

    async fn find_contact_by_email(&self, email: &str) -> Result<Option<Contact>> {
        self.find_by_email(email).await
    }
}

#[async_trait]
impl TenantSource for ContactManager {
    async fn find_tenant_by_id(&self, id: &str) -> Result<Option<Tenant>> {
        self.get_tenant(id).await
    }
}

fn row_to_contact(row: ContactRow) -> Result<Contact> {
    let company = match (row.company_id, row.linked_company_name) {
        (Some(id), Some(company_name)) => Some(Company { id, company_name }),
        _ => None,
    };

    Ok(Contact {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        full_name: row.full_name,
        goes_by: row.goes_by,
        email: row.email,
        title: row.title,
        company_name: row.company_name,
        company,
        created_at: parse_timestamp(&row.created_at, "created_at")?,
        updated_at: parse_timestamp(&row.updated_at, "updated_at")?,
    })
}
