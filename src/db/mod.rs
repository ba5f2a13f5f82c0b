//! Key-value storage backing the catalog buckets.
//!
//! Each bucket holds one JSON document and is always read and written whole.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::AppError;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub const DEFAULT_NAMESPACE: &str = "courseSystem";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Users,
    Courses,
    Enrollments,
    CurrentUser,
}

impl Bucket {
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Users => "users",
            Bucket::Courses => "courses",
            Bucket::Enrollments => "enrollments",
            Bucket::CurrentUser => "currentUser",
        }
    }

    /// Physical key of this bucket under `namespace`.
    pub fn key(self, namespace: &str) -> String {
        format!("{}_{}", namespace, self.name())
    }
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}
