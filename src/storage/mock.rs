use super::{UploadHandle, UploadStore};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub struct MockUploadStore {
    files: Arc<Mutex<HashMap<UploadHandle, Vec<u8>>>>,
    put_count: Arc<Mutex<usize>>,
    delete_count: Arc<Mutex<usize>>,
    fail_put: bool,
    fail_read: bool,
    fail_delete: bool,
}

impl MockUploadStore {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            put_count: Arc::new(Mutex::new(0)),
            delete_count: Arc::new(Mutex::new(0)),
            fail_put: false,
            fail_read: false,
            fail_delete: false,
        }
    }

    pub fn with_put_failure(mut self) -> Self {
        self.fail_put = true;
        self
    }

    pub fn with_read_failure(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Deletes report an error but still drop the file.
    pub fn with_delete_failure(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn get_put_count(&self) -> usize {
        *self.put_count.lock().unwrap()
    }

    pub fn get_delete_count(&self) -> usize {
        *self.delete_count.lock().unwrap()
    }

    /// Number of uploads currently held.
    pub fn stored_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Default for MockUploadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadStore for MockUploadStore {
    async fn put(&self, data: &[u8]) -> Result<UploadHandle> {
        *self.put_count.lock().unwrap() += 1;

        if self.fail_put {
            return Err(Error::Storage("Mock put failure".to_string()));
        }

        let handle = UploadHandle::new(format!("mock/{}", Uuid::new_v4()));
        self.files
            .lock()
            .unwrap()
            .insert(handle.clone(), data.to_vec());
        Ok(handle)
    }

    async fn read(&self, handle: &UploadHandle) -> Result<Vec<u8>> {
        if self.fail_read {
            return Err(Error::Storage("Mock read failure".to_string()));
        }

        self.files
            .lock()
            .unwrap()
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::Storage(format!("Upload not found: {}", handle)))
    }

    async fn delete(&self, handle: &UploadHandle) -> Result<()> {
        *self.delete_count.lock().unwrap() += 1;
        self.files.lock().unwrap().remove(handle);

        if self.fail_delete {
            return Err(Error::Storage("Mock delete failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_round_trip() {
        let store = MockUploadStore::new();

        let handle = store.put(b"data").await.unwrap();
        assert_eq!(store.stored_count(), 1);
        assert_eq!(store.read(&handle).await.unwrap(), b"data");

        store.delete(&handle).await.unwrap();
        assert_eq!(store.stored_count(), 0);
        assert_eq!(store.get_put_count(), 1);
        assert_eq!(store.get_delete_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_failures() {
        let store = MockUploadStore::new().with_put_failure();
        assert!(store.put(b"data").await.is_err());
        assert_eq!(store.stored_count(), 0);

        let store = MockUploadStore::new().with_read_failure();
        let handle = store.put(b"data").await.unwrap();
        let err = store.read(&handle).await.unwrap_err();
        assert!(err.to_string().contains("Mock read failure"));
    }
}
