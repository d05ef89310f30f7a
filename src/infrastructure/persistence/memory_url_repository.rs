//! In-process record store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlRecord, UrlPatch, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};

#[derive(Default)]
struct Tables {
    next_id: i64,
    by_code: HashMap<String, UrlRecord>,
    /// id -> short code, in creation order.
    by_id: BTreeMap<i64, String>,
}

/// Record store backed by process memory.
///
/// Every mutation runs under a single write lock, which gives the same
/// guarantees the PostgreSQL store gets from its unique constraint and
/// `UPDATE ... RETURNING`: insert-if-absent and atomic increment-and-fetch.
/// Data does not survive a restart.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    tables: RwLock<Tables>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&new_record.short_code) {
            return Err(StoreError::DuplicateCode {
                code: new_record.short_code,
            });
        }

        tables.next_id += 1;
        let record = UrlRecord {
            id: tables.next_id,
            original_url: new_record.original_url,
            short_code: new_record.short_code,
            custom_alias: new_record.custom_alias,
            clicks: 0,
            created_at: Utc::now(),
            expires_at: new_record.expires_at,
            is_active: true,
        };

        tables.by_id.insert(record.id, record.short_code.clone());
        tables
            .by_code
            .insert(record.short_code.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StoreError> {
        Ok(self.tables.read().await.by_code.get(code).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_id
            .get(&id)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn update(&self, code: &str, patch: UrlPatch) -> Result<Option<UrlRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.by_code.get_mut(code) else {
            return Ok(None);
        };

        record.original_url = patch.original_url;
        if let Some(expires_at) = patch.expires_at {
            record.expires_at = Some(expires_at);
        }

        Ok(Some(record.clone()))
    }

    async fn mark_inactive(&self, code: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.by_code.get_mut(code) {
            Some(record) => {
                record.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_clicks(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UrlRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.by_code.get_mut(code) {
            Some(record) if !record.is_expired_at(now) => {
                record.clicks += 1;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.by_code.remove(code) {
            Some(record) => {
                tables.by_id.remove(&record.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlRecord>, StoreError> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(tables
            .by_id
            .values()
            .skip(offset)
            .take(limit)
            .filter_map(|code| tables.by_code.get(code).cloned())
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.by_code.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn new_record(code: &str) -> NewUrlRecord {
        NewUrlRecord {
            original_url: format!("https://example.com/{code}"),
            short_code: code.to_string(),
            custom_alias: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_defaults() {
        let repo = InMemoryUrlRepository::new();
        let first = repo.insert(new_record("aaa")).await.unwrap();
        let second = repo.insert(new_record("bbb")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.clicks, 0);
        assert!(first.is_active);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let repo = InMemoryUrlRepository::new();
        repo.insert(new_record("dup")).await.unwrap();

        let err = repo.insert(new_record("dup")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateCode { code } if code == "dup"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_code_and_id() {
        let repo = InMemoryUrlRepository::new();
        let created = repo.insert(new_record("find")).await.unwrap();

        assert_eq!(repo.find_by_code("find").await.unwrap(), Some(created.clone()));
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created));
        assert!(repo.find_by_code("missing").await.unwrap().is_none());
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_expiry_when_not_given() {
        let repo = InMemoryUrlRepository::new();
        let expires_at = Utc::now() + Duration::days(1);
        repo.insert(NewUrlRecord {
            expires_at: Some(expires_at),
            ..new_record("upd")
        })
        .await
        .unwrap();

        let updated = repo
            .update(
                "upd",
                UrlPatch {
                    original_url: "https://example.org".to_string(),
                    expires_at: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.original_url, "https://example.org");
        assert_eq!(updated.expires_at, Some(expires_at));
    }

    #[tokio::test]
    async fn test_update_missing_code_returns_none() {
        let repo = InMemoryUrlRepository::new();
        let result = repo
            .update(
                "nope",
                UrlPatch {
                    original_url: "https://example.org".to_string(),
                    expires_at: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_increment_skips_expired_record() {
        let repo = InMemoryUrlRepository::new();
        repo.insert(NewUrlRecord {
            expires_at: Some(Utc::now() - Duration::minutes(5)),
            ..new_record("old")
        })
        .await
        .unwrap();

        assert!(repo.increment_clicks("old", Utc::now()).await.unwrap().is_none());
        assert_eq!(repo.find_by_code("old").await.unwrap().unwrap().clicks, 0);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        repo.insert(new_record("hot")).await.unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_clicks("hot", Utc::now()).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_some());
        }

        assert_eq!(repo.find_by_code("hot").await.unwrap().unwrap().clicks, 100);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryUrlRepository::new();
        let created = repo.insert(new_record("del")).await.unwrap();

        assert!(repo.delete_by_code("del").await.unwrap());
        assert!(!repo.delete_by_code("del").await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_creation_order_with_pagination() {
        let repo = InMemoryUrlRepository::new();
        for code in ["c1", "c2", "c3", "c4", "c5"] {
            repo.insert(new_record(code)).await.unwrap();
        }
        repo.delete_by_code("c2").await.unwrap();

        let codes: Vec<String> = repo
            .list(1, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.short_code)
            .collect();
        assert_eq!(codes, vec!["c3", "c4"]);

        assert!(repo.list(10, 10).await.unwrap().is_empty());
        assert_eq!(repo.list(0, 100).await.unwrap().len(), 4);
    }
}
