use crate::domain::model::Request;
use crate::domain::ports::{RequestSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Reads a JSON array of requests from a file in `Storage`.
pub struct JsonRequestSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonRequestSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> RequestSource for JsonRequestSource<S> {
    async fn load_requests(&self) -> Result<Vec<Request>> {
        let data = self.storage.read_file(&self.path).await?;
        let requests: Vec<Request> = serde_json::from_slice(&data)?;
        tracing::info!("Loaded {} requests from {}", requests.len(), self.path);
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TotalsError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .try_lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                TotalsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_load_requests_in_file_order() {
        let storage = MockStorage::with_file(
            "requests.json",
            r#"[
                {"id": 2, "request_items": [{"item_id": 1, "quantity": "20"}]},
                {"id": 1, "request_items": {}}
            ]"#,
        );
        let source = JsonRequestSource::new(storage, "requests.json");

        let requests = tokio_test::block_on(source.load_requests()).unwrap();

        assert_eq!(requests.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(requests[0].request_items[0].quantity, 20);
        assert!(requests[1].request_items.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_propagates() {
        let source = JsonRequestSource::new(MockStorage::default(), "requests.json");
        let result = source.load_requests().await;
        assert!(matches!(result, Err(TotalsError::IoError(_))));
    }

    #[tokio::test]
    async fn test_invalid_quantity_is_serialization_error() {
        let storage = MockStorage::with_file(
            "requests.json",
            r#"[{"id": 1, "request_items": [{"item_id": 1, "quantity": -5}]}]"#,
        );
        let source = JsonRequestSource::new(storage, "requests.json");

        let result = source.load_requests().await;
        match result {
            Err(TotalsError::SerializationError(e)) => {
                assert!(e.to_string().contains("must not be negative"), "{}", e)
            }
            other => panic!("expected serialization error, got {:?}", other),
        }
    }
}
