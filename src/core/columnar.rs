//! Parquet encoding of a reshaped [`Table`].
//!
//! Column types are inferred from the JSON values of each column:
//!
//! | values seen (nulls ignored) | Arrow type |
//! |-----------------------------|------------|
//! | strings                     | `Utf8`     |
//! | integers that fit in i64    | `Int64`    |
//! | any other number, or a mix of integers and other numbers | `Float64` |
//! | booleans                    | `Boolean`  |
//! | nothing but nulls           | `Utf8`     |
//!
//! Any other mix is a schema error. Strings are never parsed into numbers, so
//! `"1"` is written as the string `"1"`. Every column is nullable.

use crate::domain::model::{OutputCompression, Table};
use crate::utils::error::{EtlError, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Unknown,
    Utf8,
    Int64,
    Float64,
    Boolean,
}

impl ColumnKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => ColumnKind::Unknown,
            Value::String(_) => ColumnKind::Utf8,
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Number(n) if n.is_i64() => ColumnKind::Int64,
            Value::Number(_) => ColumnKind::Float64,
            // Nested values are rejected while reshaping.
            Value::Array(_) | Value::Object(_) => ColumnKind::Utf8,
        }
    }

    fn unify(self, other: ColumnKind) -> Option<ColumnKind> {
        use ColumnKind::*;
        match (self, other) {
            (Unknown, k) | (k, Unknown) => Some(k),
            (a, b) if a == b => Some(a),
            (Int64, Float64) | (Float64, Int64) => Some(Float64),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ColumnKind::Unknown => "null",
            ColumnKind::Utf8 => "string",
            ColumnKind::Int64 => "integer",
            ColumnKind::Float64 => "float",
            ColumnKind::Boolean => "boolean",
        }
    }

    fn data_type(self) -> DataType {
        match self {
            ColumnKind::Unknown | ColumnKind::Utf8 => DataType::Utf8,
            ColumnKind::Int64 => DataType::Int64,
            ColumnKind::Float64 => DataType::Float64,
            ColumnKind::Boolean => DataType::Boolean,
        }
    }
}

/// Infers the Arrow schema of `table`, one nullable field per column in table order.
pub fn infer_schema(table: &Table) -> Result<SchemaRef> {
    let mut fields = Vec::with_capacity(table.num_columns());

    for column in &table.columns {
        let mut kind = ColumnKind::Unknown;
        for (index, row) in table.rows.iter().enumerate() {
            let seen = row.get(column).map(ColumnKind::of).unwrap_or(ColumnKind::Unknown);
            kind = kind.unify(seen).ok_or_else(|| EtlError::SchemaError {
                column: column.clone(),
                message: format!(
                    "row {} holds a {} value but earlier rows hold {} values",
                    index,
                    seen.name(),
                    kind.name()
                ),
            })?;
        }
        fields.push(Field::new(column, kind.data_type(), true));
    }

    Ok(Arc::new(Schema::new(fields)))
}

/// Builds a single record batch holding every row of `table`.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let schema = infer_schema(table)?;

    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| {
            let cells = table.rows.iter().map(move |row| row.get(field.name()));
            match field.data_type() {
                DataType::Int64 => Arc::new(
                    cells
                        .map(|v| v.and_then(Value::as_i64))
                        .collect::<Int64Array>(),
                ) as ArrayRef,
                DataType::Float64 => Arc::new(
                    cells
                        .map(|v| v.and_then(Value::as_f64))
                        .collect::<Float64Array>(),
                ) as ArrayRef,
                DataType::Boolean => Arc::new(
                    cells
                        .map(|v| v.and_then(Value::as_bool))
                        .collect::<BooleanArray>(),
                ) as ArrayRef,
                _ => Arc::new(
                    cells
                        .map(|v| v.and_then(Value::as_str))
                        .collect::<StringArray>(),
                ) as ArrayRef,
            }
        })
        .collect();

    let batch = RecordBatch::try_new(schema, columns)?;
    Ok(batch)
}

pub fn writer_properties(compression: OutputCompression) -> WriterProperties {
    let codec = match compression {
        OutputCompression::Snappy => Compression::SNAPPY,
        OutputCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
        OutputCompression::Gzip => Compression::GZIP(GzipLevel::default()),
        OutputCompression::None => Compression::UNCOMPRESSED,
    };
    WriterProperties::builder().set_compression(codec).build()
}

/// Encodes `table` as a complete Parquet file in memory.
///
/// An empty table produces a file with the schema and no row groups.
pub fn encode_table(table: &Table, compression: OutputCompression) -> Result<Vec<u8>> {
    let batch = to_record_batch(table)?;
    let props = writer_properties(compression);

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), Some(props))?;
    if batch.num_rows() > 0 {
        writer.write(&batch)?;
    }
    writer.close()?;

    tracing::debug!(
        "Encoded {} rows x {} columns into {} bytes ({})",
        batch.num_rows(),
        batch.num_columns(),
        buffer.len(),
        compression
    );
    Ok(buffer)
}
