//! Table bootstrap
//!
//! The `todos` table is created if absent before the server accepts
//! requests. There is no migration path for later schema changes.

use sqlx::PgPool;

use super::repos::DbError;

/// DDL for the todos table and its title index.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE INDEX IF NOT EXISTS ix_todos_title ON todos (title);
"#;

/// Create the todos table (and index) if they don't exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring todos schema...");

    // Multi-statement string: must go through the simple query protocol
    sqlx::raw_sql(SCHEMA).execute(pool).await?;

    tracing::info!("Todos schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent_ddl() {
        assert!(SCHEMA.contains("CREATE TABLE IF NOT EXISTS todos"));
        assert!(SCHEMA.contains("id BIGSERIAL PRIMARY KEY"));
        assert!(SCHEMA.contains("CREATE INDEX IF NOT EXISTS ix_todos_title"));
        assert!(SCHEMA.contains("completed BOOLEAN NOT NULL DEFAULT FALSE"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_twice() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        ensure_schema(&pool).await.expect("first run failed");
        ensure_schema(&pool).await.expect("second run failed");
    }
}
