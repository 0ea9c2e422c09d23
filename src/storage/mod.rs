//! Transient storage for uploaded images
//!
//! An upload lives in the store only while its request is being handled;
//! the gateway deletes it before responding.

pub mod guard;
pub mod mock;
pub mod temp_dir;

pub use guard::UploadGuard;
pub use mock::MockUploadStore;
pub use temp_dir::TempDirStore;

use crate::Result;
use async_trait::async_trait;
use std::fmt;

/// Opaque key of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadHandle(String);

impl UploadHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn put(&self, data: &[u8]) -> Result<UploadHandle>;
    async fn read(&self, handle: &UploadHandle) -> Result<Vec<u8>>;
    /// Removing an upload that is already gone is not an error.
    async fn delete(&self, handle: &UploadHandle) -> Result<()>;
}
