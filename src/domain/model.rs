use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column holding the `Valores` key that produced each row.
pub const KEY_COLUMN: &str = "Chave";

/// One observation: field name to scalar-or-null, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }

    /// The originating `Valores` key, once the record has been reshaped into a row.
    pub fn key(&self) -> Option<&str> {
        self.data.get(KEY_COLUMN).and_then(Value::as_str)
    }
}

/// Rows in `Valores` order plus the first-seen union of their columns.
///
/// `Chave` is always the last column, so an empty table still has one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn empty() -> Self {
        Self {
            columns: vec![KEY_COLUMN.to_string()],
            rows: Vec::new(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup; a row without the column reads as `Null`.
    pub fn cell(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Value::Null)
    }
}

/// Page compression codec for the Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputCompression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    None,
}

impl std::fmt::Display for OutputCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputCompression::Snappy => "snappy",
            OutputCompression::Zstd => "zstd",
            OutputCompression::Gzip => "gzip",
            OutputCompression::None => "none",
        };
        f.write_str(name)
    }
}
