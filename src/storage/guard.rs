use super::{UploadHandle, UploadStore};
use crate::Result;
use std::sync::Arc;

/// A stored upload that is removed when the guard goes away.
///
/// [`UploadGuard::delete`] removes it and reports the outcome. If the guard is
/// dropped first (the request future was cancelled), removal is spawned
/// onto the current runtime instead.
pub struct UploadGuard {
    store: Arc<dyn UploadStore>,
    handle: UploadHandle,
    armed: bool,
}

impl UploadGuard {
    pub async fn put(store: Arc<dyn UploadStore>, data: &[u8]) -> Result<Self> {
        let handle = store.put(data).await?;
        Ok(Self {
            store,
            handle,
            armed: true,
        })
    }

    pub fn handle(&self) -> &UploadHandle {
        &self.handle
    }

    pub async fn delete(mut self) -> Result<()> {
        let result = self.store.delete(&self.handle).await;
        self.armed = false;
        result
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let store = self.store.clone();
        let handle = self.handle.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                tracing::debug!("Request dropped, removing upload {} in background", handle);
                runtime.spawn(async move {
                    if let Err(e) = store.delete(&handle).await {
                        tracing::warn!("Failed to remove upload {}: {}", handle, e);
                    }
                });
            }
            Err(_) => tracing::warn!("No runtime to remove upload {}", handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockUploadStore;
    use std::time::Duration;

    async fn wait_until_empty(store: &MockUploadStore) {
        for _ in 0..100 {
            if store.stored_count() == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn test_delete_removes_upload_once() {
        let store = MockUploadStore::new();
        let guard = UploadGuard::put(Arc::new(store.clone()), b"img").await.unwrap();
        assert_eq!(store.stored_count(), 1);

        guard.delete().await.unwrap();
        tokio::task::yield_now().await;

        assert_eq!(store.stored_count(), 0);
        assert_eq!(store.get_delete_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_guard_removes_upload() {
        let store = MockUploadStore::new();
        let guard = UploadGuard::put(Arc::new(store.clone()), b"img").await.unwrap();

        drop(guard);
        wait_until_empty(&store).await;

        assert_eq!(store.stored_count(), 0);
        assert_eq!(store.get_delete_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let store = MockUploadStore::new().with_delete_failure();
        let guard = UploadGuard::put(Arc::new(store.clone()), b"img").await.unwrap();

        let err = guard.delete().await.unwrap_err();
        assert!(err.to_string().contains("Mock delete failure"));
        assert_eq!(store.get_delete_count(), 1);
    }
}
