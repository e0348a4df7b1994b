use crate::core::columnar::encode_table;
use crate::core::reshape::reshape;
use crate::core::{ConfigProvider, Pipeline, Storage, Table};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Fetches the SIDRA payload, reshapes it and stores it as Parquet.
pub struct IpcaPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> IpcaPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for IpcaPipeline<S, C> {
    async fn extract(&self) -> Result<serde_json::Value> {
        let url = self.config.api_endpoint();
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_client_error() || status.is_server_error() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes", body.len());

        let json_data: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(json_data)
    }

    async fn transform(&self, raw: serde_json::Value) -> Result<Table> {
        reshape(&raw)
    }

    async fn load(&self, table: Table) -> Result<String> {
        let data = encode_table(&table, self.config.compression())?;
        let path = self.config.output_path();
        self.storage.write_file(path, &data).await?;
        Ok(path.to_string())
    }

    fn output_path(&self) -> &str {
        self.config.output_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OutputCompression;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
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

    struct TestConfig {
        endpoint: String,
    }

    impl ConfigProvider for TestConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn output_path(&self) -> &str {
            "ipca.parquet"
        }

        fn request_timeout(&self) -> Option<Duration> {
            Some(Duration::from_secs(5))
        }

        fn compression(&self) -> OutputCompression {
            OutputCompression::None
        }
    }

    fn build_pipeline(
        server: &MockServer,
        path: &str,
    ) -> (IpcaPipeline<MockStorage, TestConfig>, MockStorage) {
        let storage = MockStorage::default();
        let config = TestConfig {
            endpoint: server.url(path),
        };
        (IpcaPipeline::new(storage.clone(), config).unwrap(), storage)
    }

    #[tokio::test]
    async fn test_extract_returns_decoded_json() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/tabela");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"Valores": {"v1": {"NC": "1"}}}));
        });

        let (pipeline, _) = build_pipeline(&server, "/tabela");
        let raw = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(raw["Valores"]["v1"]["NC"], "1");
    }

    #[tokio::test]
    async fn test_extract_maps_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let (pipeline, _) = build_pipeline(&server, "/missing");
        match pipeline.extract().await.unwrap_err() {
            EtlError::HttpStatusError { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/missing"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/html");
            then.status(200).body("<html>maintenance</html>");
        });

        let (pipeline, _) = build_pipeline(&server, "/html");
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_load_writes_to_configured_path() {
        let server = MockServer::start();
        let (pipeline, storage) = build_pipeline(&server, "/unused");

        let table = reshape(&serde_json::json!({"Valores": {"v1": {"NC": "1"}}})).unwrap();
        let path = pipeline.load(table).await.unwrap();

        assert_eq!(path, "ipca.parquet");
        let data = storage.read_file("ipca.parquet").await.unwrap();
        assert_eq!(&data[..4], b"PAR1");
    }
}
