use crate::domain::model::{OutputCompression, Table};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    /// `None` leaves the HTTP client's default in place.
    fn request_timeout(&self) -> Option<Duration>;
    fn compression(&self) -> OutputCompression;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<serde_json::Value>;
    async fn transform(&self, raw: serde_json::Value) -> Result<Table>;
    async fn load(&self, table: Table) -> Result<String>;

    /// Destination announced before `load` runs.
    fn output_path(&self) -> &str;
}
