//! Todo repository
//!
//! Maps rows of the `todos` table to [`Todo`] records:
//! - list: offset/limit window in primary-key order
//! - create: INSERT ... RETURNING (store assigns the id)
//! - replace: full overwrite of title/description/completed
//! - get/replace/delete report a missing row as `None`/`false`, not an error

use sqlx::{FromRow, PgConnection};

use crate::models::{Pagination, TodoFields};
use super::DbError;

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Todo repository over one borrowed session
pub struct TodoRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> TodoRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    /// List todos in id order, windowed by offset/limit.
    pub async fn list(&mut self, page: Pagination) -> Result<Vec<Todo>, DbError> {
        tracing::debug!(offset = page.offset, limit = page.limit, "listing todos");

        let todos: Vec<Todo> = sqlx::query_as(
            r#"
            SELECT id, title, description, completed
            FROM todos
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(todos)
    }

    /// Get a single todo by id.
    pub async fn get(&mut self, id: i64) -> Result<Option<Todo>, DbError> {
        let todo: Option<Todo> = sqlx::query_as(
            r#"
            SELECT id, title, description, completed
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(todo)
    }

    /// Insert a new todo, returning it with its assigned id.
    pub async fn create(&mut self, fields: &TodoFields) -> Result<Todo, DbError> {
        let todo: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.completed)
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(id = todo.id, "inserted todo");
        Ok(todo)
    }

    /// Overwrite every mutable field of an existing todo.
    ///
    /// Returns None (and touches nothing) if the id doesn't exist.
    pub async fn replace(&mut self, id: i64, fields: &TodoFields) -> Result<Option<Todo>, DbError> {
        let todo: Option<Todo> = sqlx::query_as(
            r#"
            UPDATE todos
            SET title = $2,
                description = $3,
                completed = $4
            WHERE id = $1
            RETURNING id, title, description, completed
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.completed)
        .fetch_optional(&mut *self.conn)
        .await?;

        tracing::debug!(id, found = todo.is_some(), "replaced todo");
        Ok(todo)
    }

    /// Delete a todo by id. Returns false if no row matched.
    pub async fn delete(&mut self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(id, deleted, "deleted todo");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p todo-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::ensure_schema(&pool).await.expect("schema failed");
        pool
    }

    fn fields(title: &str, description: Option<&str>, completed: bool) -> TodoFields {
        TodoFields {
            title: title.to_owned(),
            description: description.map(str::to_owned),
            completed,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get() {
        let pool = test_pool().await;
        let mut tx = pool.begin().await.unwrap();
        let mut repo = TodoRepo::new(&mut tx);

        let created = repo.create(&fields("repo create", Some("desc"), false)).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
        // tx dropped without commit: nothing persists
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn replace_overwrites_every_field() {
        let pool = test_pool().await;
        let mut tx = pool.begin().await.unwrap();
        let mut repo = TodoRepo::new(&mut tx);

        let created = repo.create(&fields("A", Some("old"), false)).await.unwrap();
        let replaced = repo
            .replace(created.id, &fields("B", None, true))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            replaced,
            Todo {
                id: created.id,
                title: "B".into(),
                description: None,
                completed: true,
            }
        );
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_ids_are_not_errors() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = TodoRepo::new(&mut conn);

        assert_eq!(repo.get(-1).await.unwrap(), None);
        assert_eq!(repo.replace(-1, &fields("x", None, false)).await.unwrap(), None);
        assert!(!repo.delete(-1).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_respects_limit() {
        let pool = test_pool().await;
        let mut tx = pool.begin().await.unwrap();
        let mut repo = TodoRepo::new(&mut tx);

        for i in 0..3 {
            repo.create(&fields(&format!("list {}", i), None, false)).await.unwrap();
        }

        assert!(repo.list(Pagination::new(0, 0)).await.unwrap().is_empty());
        assert_eq!(repo.list(Pagination::new(0, 2)).await.unwrap().len(), 2);
        assert!(repo.list(Pagination::new(u64::MAX, 10)).await.unwrap().is_empty());
    }
}
