pub mod etl;
pub mod columnar;
pub mod pipeline;
pub mod reshape;

pub use crate::domain::model::{Record, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
