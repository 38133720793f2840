//! Customer repository implementation
//!
//! This module provides database access for customer records. The address is
//! stored as a JSONB document on the customer row; audit columns are written
//! by the upsert itself so a concurrent save cannot reset creation fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

const CUSTOMER_COLUMNS: &str = r#"
    customer_id,
    first_name,
    last_name,
    email,
    phone_number,
    address,
    created_by,
    created_at,
    modified_by,
    modified_at,
    version
"#;

/// Repository for managing customer rows
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns every customer, oldest first
    pub async fn find_all(&self) -> Result<Vec<CustomerRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at, customer_id"
        );
        let rows = sqlx::query_as::<_, CustomerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Retrieves a customer by identifier
    ///
    /// # Returns
    ///
    /// `None` if no row has the identifier
    pub async fn find_by_id(&self, customer_id: &str) -> Result<Option<CustomerRow>, DatabaseError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Inserts a customer or overwrites its profile columns
    ///
    /// On insert the creation and modification audit columns are both set
    /// and `version` starts at 0. On update only the modification columns
    /// change and `version` is incremented.
    ///
    /// # Arguments
    ///
    /// * `customer` - The profile to write, keyed by `customer_id`
    /// * `actor` - The auditor resolved for this save, if any
    /// * `now` - The timestamp to stamp
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if another customer has the same email
    pub async fn upsert(
        &self,
        customer: &NewCustomer,
        actor: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CustomerRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO customers (
                customer_id, first_name, last_name, email, phone_number, address,
                created_by, created_at, modified_by, modified_at, version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $7, $8, 0)
            ON CONFLICT (customer_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone_number = EXCLUDED.phone_number,
                address = EXCLUDED.address,
                modified_by = EXCLUDED.modified_by,
                modified_at = EXCLUDED.modified_at,
                version = customers.version + 1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(&customer.customer_id)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.phone_number)
            .bind(Json(&customer.address))
            .bind(actor)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Deletes a customer by identifier
    ///
    /// # Returns
    ///
    /// The number of rows removed (0 or 1)
    pub async fn delete_by_id(&self, customer_id: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Counts stored customers
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Address document stored in the `address` JSONB column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDocument {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Database row representation of a customer
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: Json<AddressDocument>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: DateTime<Utc>,
    pub version: i64,
}

/// Column values for an upsert
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: AddressDocument,
}
