//! Record storage
//!
//! Handlers depend on the `Repository` trait only; the process-local
//! `InMemoryRepository` is the one backend. Nothing survives a restart.

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::Analysis;
use crate::models::CalendarPost;
use crate::models::Competitor;
use crate::models::ExportJob;

pub mod memory;

pub use memory::InMemoryRepository;

/// Entity stored under its own `Uuid`
pub trait Record: Clone + Send + Sync + 'static {
    /// Name used in not-found errors
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Key that must be unique across the repository, if any
    fn unique_key(&self) -> Option<String> {
        None
    }
}

#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Insert a record; `AlreadyExists` when its `unique_key` is taken
    async fn create(&self, record: T) -> Result<T>;

    async fn get(&self, id: Uuid) -> Result<Option<T>>;

    /// All records, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing record; `NotFound` when absent
    async fn update(&self, record: T) -> Result<T>;

    /// Remove and return a record; `NotFound` when absent
    async fn delete(&self, id: Uuid) -> Result<T>;

    async fn count(&self) -> Result<usize>;
}

impl Record for Analysis {
    const ENTITY: &'static str = "Analysis";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for Competitor {
    const ENTITY: &'static str = "Competitor";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// One entry per account, case-insensitive
    fn unique_key(&self) -> Option<String> {
        Some(self.username.to_ascii_lowercase())
    }
}

impl Record for CalendarPost {
    const ENTITY: &'static str = "Calendar post";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for ExportJob {
    const ENTITY: &'static str = "Export job";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
