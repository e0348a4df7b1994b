pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{etl::EtlEngine, pipeline::IpcaPipeline, reshape::reshape};
pub use crate::domain::model::{OutputCompression, Record, Table};
pub use crate::utils::error::{EtlError, Result};
