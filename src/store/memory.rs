use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::Record;
use super::Repository;
use crate::errors::BiasError;
use crate::errors::Result;

/// `DashMap`-backed repository; clones share the same maps
#[derive(Clone)]
pub struct InMemoryRepository<T: Record> {
    records: Arc<DashMap<Uuid, T>>,
    /// `Record::unique_key` -> owning id
    keys: Arc<DashMap<String, Uuid>>,
}

impl<T: Record> InMemoryRepository<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            keys: Arc::new(DashMap::new()),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, record: T) -> Result<T> {
        let id = record.id();
        if let Some(key) = record.unique_key() {
            // the key is reserved under the entry lock, so concurrent creates cannot both pass
            match self.keys.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(BiasError::AlreadyExists {
                        entity: T::ENTITY,
                        key: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
            }
        }
        self.records.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<T>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<T>> {
        let mut records: Vec<T> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.created_at());
        Ok(records)
    }

    async fn update(&self, record: T) -> Result<T> {
        let id = record.id();
        let mut entry = self
            .records
            .get_mut(&id)
            .ok_or_else(|| BiasError::not_found(T::ENTITY, id))?;

        let old_key = entry.unique_key();
        let new_key = record.unique_key();
        if new_key != old_key {
            if let Some(key) = new_key {
                match self.keys.entry(key) {
                    Entry::Occupied(taken) if *taken.get() != id => {
                        return Err(BiasError::AlreadyExists {
                            entity: T::ENTITY,
                            key: taken.key().clone(),
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(free) => {
                        free.insert(id);
                    }
                }
            }
            if let Some(key) = old_key {
                self.keys.remove_if(&key, |_, owner| *owner == id);
            }
        }

        *entry = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<T> {
        let (_, record) = self
            .records
            .remove(&id)
            .ok_or_else(|| BiasError::not_found(T::ENTITY, id))?;
        if let Some(key) = record.unique_key() {
            self.keys.remove_if(&key, |_, owner| *owner == id);
        }
        Ok(record)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::models::Competitor;

    fn competitor(username: &str, minutes_ago: i64) -> Competitor {
        Competitor {
            id: Uuid::new_v4(),
            username: username.to_string(),
            notes: None,
            added_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let repo = InMemoryRepository::<Competitor>::new();
        let created = repo.create(competitor("alpha", 0)).await.unwrap();

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "alpha");

        let mut changed = fetched.clone();
        changed.notes = Some("rival".to_string());
        repo.update(changed).await.unwrap();
        assert_eq!(
            repo.get(created.id).await.unwrap().unwrap().notes.as_deref(),
            Some("rival")
        );

        let removed = repo.delete(created.id).await.unwrap();
        assert_eq!(removed.id, created.id);
        assert!(repo.get(created.id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let repo = InMemoryRepository::<Competitor>::new();
        let ghost = competitor("ghost", 0);

        let err = repo.update(ghost.clone()).await.unwrap_err();
        assert!(matches!(err, BiasError::NotFound { entity: "Competitor", .. }));
        assert!(repo.delete(ghost.id).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_unique_key_holds_under_concurrent_creates() {
        let repo = InMemoryRepository::<Competitor>::new();
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                let username = if i % 2 == 0 { "Rival" } else { "rival" };
                tokio::spawn(async move { repo.create(competitor(username, 0)).await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(matches!(
                    err,
                    BiasError::AlreadyExists { entity: "Competitor", .. }
                )),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_key_released() {
        let repo = InMemoryRepository::<Competitor>::new();
        let first = repo.create(competitor("alpha", 0)).await.unwrap();

        // renaming frees the old key and takes the new one
        let mut renamed = first.clone();
        renamed.username = "beta".to_string();
        repo.update(renamed).await.unwrap();
        assert!(repo.create(competitor("beta", 0)).await.is_err());
        let second = repo.create(competitor("alpha", 0)).await.unwrap();

        repo.delete(second.id).await.unwrap();
        assert!(repo.create(competitor("ALPHA", 0)).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_oldest_first_and_shared_clones() {
        let repo = InMemoryRepository::<Competitor>::new();
        let handle = repo.clone();
        repo.create(competitor("newer", 1)).await.unwrap();
        handle.create(competitor("older", 10)).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.username)
            .collect();
        assert_eq!(names, vec!["older", "newer"]);
    }
}
