use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ofitsoft_shared::api::ContentSummary;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;

pub type DbPool = PgPool;

pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredContent {
    pub body: Value,
    pub updated_at: DateTime<Utc>,
}

/// Where content documents live: one JSON body per domain, last write wins.
#[derive(Clone)]
pub enum ContentRepo {
    Postgres(DbPool),
    Memory(Arc<RwLock<BTreeMap<String, StoredContent>>>),
}

impl ContentRepo {
    pub fn memory() -> Self {
        ContentRepo::Memory(Arc::default())
    }

    pub async fn get(&self, domain: &str) -> Result<Option<StoredContent>, sqlx::Error> {
        match self {
            ContentRepo::Postgres(pool) => {
                let row: Option<(Json<Value>, DateTime<Utc>)> = sqlx::query_as(
                    "SELECT body, updated_at FROM content_documents WHERE domain = $1",
                )
                .bind(domain)
                .fetch_optional(pool)
                .await?;

                Ok(row.map(|(Json(body), updated_at)| StoredContent { body, updated_at }))
            }
            ContentRepo::Memory(docs) => Ok(docs.read().await.get(domain).cloned()),
        }
    }

    pub async fn list(&self) -> Result<Vec<ContentSummary>, sqlx::Error> {
        match self {
            ContentRepo::Postgres(pool) => {
                let rows: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
                    "SELECT domain, updated_at FROM content_documents ORDER BY domain",
                )
                .fetch_all(pool)
                .await?;

                Ok(rows
                    .into_iter()
                    .map(|(domain, updated_at)| ContentSummary { domain, updated_at })
                    .collect())
            }
            ContentRepo::Memory(docs) => Ok(docs
                .read()
                .await
                .iter()
                .map(|(domain, stored)| ContentSummary {
                    domain: domain.clone(),
                    updated_at: stored.updated_at,
                })
                .collect()),
        }
    }

    /// Insert or overwrite the document for `domain`. No version check.
    pub async fn put(&self, domain: &str, body: Value) -> Result<StoredContent, sqlx::Error> {
        let updated_at = Utc::now();

        match self {
            ContentRepo::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO content_documents (domain, body, updated_at)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (domain)
                    DO UPDATE SET body = EXCLUDED.body, updated_at = EXCLUDED.updated_at
                    "#,
                )
                .bind(domain)
                .bind(Json(&body))
                .bind(updated_at)
                .execute(pool)
                .await?;
            }
            ContentRepo::Memory(docs) => {
                docs.write().await.insert(
                    domain.to_string(),
                    StoredContent {
                        body: body.clone(),
                        updated_at,
                    },
                );
            }
        }

        Ok(StoredContent { body, updated_at })
    }

    /// Returns false if nothing was stored for `domain`.
    pub async fn delete(&self, domain: &str) -> Result<bool, sqlx::Error> {
        match self {
            ContentRepo::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM content_documents WHERE domain = $1")
                    .bind(domain)
                    .execute(pool)
                    .await?;

                Ok(result.rows_affected() > 0)
            }
            ContentRepo::Memory(docs) => Ok(docs.write().await.remove(domain).is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_repo_last_write_wins() {
        let repo = ContentRepo::memory();
        assert!(repo.get("footer").await.unwrap().is_none());

        repo.put("footer", json!({ "v": 1 })).await.unwrap();
        repo.put("footer", json!({ "v": 2 })).await.unwrap();

        let stored = repo.get("footer").await.unwrap().unwrap();
        assert_eq!(stored.body, json!({ "v": 2 }));

        let list = repo.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].domain, "footer");
    }

    #[tokio::test]
    async fn test_memory_repo_delete() {
        let repo = ContentRepo::memory();
        repo.put("about", json!({})).await.unwrap();
        assert!(repo.delete("about").await.unwrap());
        assert!(!repo.delete("about").await.unwrap());
    }
}
