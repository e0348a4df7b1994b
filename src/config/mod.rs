pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::OutputCompression;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use std::time::Duration;

/// SIDRA table 1737 (IPCA), latest version.
pub const DEFAULT_API_ENDPOINT: &str = "https://sidra.ibge.gov.br/Ajax/JSon/Tabela/1/1737?versao=-1";
pub const DEFAULT_OUTPUT_PATH: &str = "ipca.parquet";

pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, clap::Parser)]
#[command(name = "ipca-etl")]
#[command(about = "Download the IBGE IPCA table and save it as Parquet")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Request timeout; unset keeps the HTTP client's default
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputCompression::Snappy)]
    pub compression: OutputCompression,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            timeout_seconds: None,
            compression: OutputCompression::default(),
            verbose: false,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn compression(&self) -> OutputCompression {
        self.compression
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_no_arguments_uses_sidra_endpoint_and_default_path() {
        let config = CliConfig::parse_from(["ipca-etl"]);

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.output_path(), "ipca.parquet");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.compression(), OutputCompression::Snappy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_from_arguments() {
        let config = CliConfig::parse_from([
            "ipca-etl",
            "--api-endpoint",
            "http://localhost:9000/t",
            "--output-path",
            "out/ipca.parquet",
            "--timeout-seconds",
            "15",
            "--compression",
            "zstd",
        ]);

        assert_eq!(config.api_endpoint(), "http://localhost:9000/t");
        assert_eq!(config.output_path(), "out/ipca.parquet");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.compression(), OutputCompression::Zstd);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = CliConfig {
            timeout_seconds: Some(0),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
