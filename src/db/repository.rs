//! Database repository for offer CRUD operations.
//!
//! Every operation is a single parameterized statement.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{NewOffer, Offer, OfferChanges, OfferSummary};

/// Database repository for all offer operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List title and slug of every offer, newest first.
    pub async fn list_offers(&self) -> Result<Vec<OfferSummary>, AppError> {
        let rows =
            sqlx::query("SELECT title, slug FROM offers ORDER BY created_at DESC, rowid DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.iter()
            .map(|row| -> Result<OfferSummary, AppError> {
                Ok(OfferSummary {
                    title: row.try_get("title")?,
                    slug: row.try_get("slug")?,
                })
            })
            .collect()
    }

    /// Get an offer by slug.
    pub async fn get_offer(&self, slug: &str) -> Result<Option<Offer>, AppError> {
        let row = sqlx::query("SELECT title, slug, data, created_at FROM offers WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(offer_from_row).transpose()
    }

    /// Insert a new offer. The store assigns `created_at`.
    pub async fn create_offer(&self, offer: &NewOffer) -> Result<Offer, AppError> {
        let data_json = serde_json::to_string(&offer.data)?;

        let row = sqlx::query(
            "INSERT INTO offers (title, slug, data) VALUES (?, ?, ?) RETURNING title, slug, data, created_at",
        )
        .bind(&offer.title)
        .bind(&offer.slug)
        .bind(&data_json)
        .fetch_one(&self.pool)
        .await?;

        offer_from_row(&row)
    }

    /// Replace title and data of the offer matching `slug`.
    ///
    /// Returns `None` when no offer has that slug.
    pub async fn update_offer(
        &self,
        slug: &str,
        changes: &OfferChanges,
    ) -> Result<Option<Offer>, AppError> {
        let data_json = serde_json::to_string(&changes.data)?;

        let row = sqlx::query(
            "UPDATE offers SET title = ?, data = ? WHERE slug = ? RETURNING title, slug, data, created_at",
        )
        .bind(&changes.title)
        .bind(&data_json)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(offer_from_row).transpose()
    }

    /// Delete the offer matching `slug`, returning how many rows were removed.
    pub async fn delete_offer(&self, slug: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM offers WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn offer_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Offer, AppError> {
    let data: String = row.try_get("data")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Offer {
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        data: serde_json::from_str(&data)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde_json::json;
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!(
            "sqlite:{}?mode=rwc",
            temp_dir.path().join("offers.sqlite").display()
        );
        let pool = init_database(&db_url).await.expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn new_offer(title: &str, slug: &str, data: serde_json::Value) -> NewOffer {
        NewOffer {
            title: title.to_string(),
            slug: slug.to_string(),
            data,
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (repo, _dir) = test_repo().await;
        assert!(repo.list_offers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (repo, _dir) = test_repo().await;
        let data = json!({
            "discount": 10,
            "tiers": [1, 2.5, null, true],
            "nested": { "label": "ünïcode", "empty": {} }
        });

        let created = repo
            .create_offer(&new_offer("Spring Sale", "spring-sale", data.clone()))
            .await
            .unwrap();
        assert_eq!(created.title, "Spring Sale");
        assert_eq!(created.data, data);

        let fetched = repo.get_offer("spring-sale").await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (repo, _dir) = test_repo().await;
        for slug in ["first", "second", "third"] {
            repo.create_offer(&new_offer(slug, slug, json!({})))
                .await
                .unwrap();
        }

        let slugs: Vec<String> = repo
            .list_offers()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.slug)
            .collect();
        assert_eq!(slugs, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_keeps_slug_and_created_at() {
        let (repo, _dir) = test_repo().await;
        let created = repo
            .create_offer(&new_offer("Old", "deal", json!({ "v": 1 })))
            .await
            .unwrap();

        let changes = OfferChanges {
            title: "New".to_string(),
            data: json!({ "v": 2 }),
        };
        let updated = repo.update_offer("deal", &changes).await.unwrap().unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.data, json!({ "v": 2 }));
        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_offer_returns_none() {
        let (repo, _dir) = test_repo().await;
        let changes = OfferChanges {
            title: "New".to_string(),
            data: json!({}),
        };
        assert!(repo.update_offer("ghost", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let (repo, _dir) = test_repo().await;
        repo.create_offer(&new_offer("a", "a", json!({})))
            .await
            .unwrap();

        assert_eq!(repo.delete_offer("a").await.unwrap(), 1);
        assert_eq!(repo.delete_offer("a").await.unwrap(), 0);
        assert!(repo.get_offer("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_database_error() {
        let (repo, _dir) = test_repo().await;
        repo.create_offer(&new_offer("a", "dup", json!({})))
            .await
            .unwrap();

        let err = repo
            .create_offer(&new_offer("b", "dup", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
