use crate::domain::model::{Record, Table, KEY_COLUMN};
use crate::utils::error::{EtlError, Result};
use serde_json::{Map, Value};

/// Top-level field holding the keyed records.
pub const VALUES_FIELD: &str = "Valores";

/// Turns the SIDRA payload into one row per `Valores` entry.
///
/// A payload without `Valores` yields an empty table. Anything else that is not
/// an object of objects of scalars is rejected with a shape error.
pub fn reshape(raw: &Value) -> Result<Table> {
    let root = raw.as_object().ok_or_else(|| {
        EtlError::shape(format!("expected a JSON object at the top level, got {}", kind(raw)))
    })?;

    let values = match root.get(VALUES_FIELD) {
        None => {
            tracing::warn!("Payload has no '{}' field, producing an empty table", VALUES_FIELD);
            return Ok(Table::empty());
        }
        Some(Value::Object(values)) => values,
        Some(other) => {
            return Err(EtlError::shape(format!(
                "'{}' must be an object, got {}",
                VALUES_FIELD,
                kind(other)
            )))
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(values.len());

    for (key, entry) in values {
        let fields = entry.as_object().ok_or_else(|| {
            EtlError::shape(format!(
                "entry '{}' under '{}' must be an object, got {}",
                key,
                VALUES_FIELD,
                kind(entry)
            ))
        })?;

        let mut data = Map::with_capacity(fields.len() + 1);
        for (field, value) in fields {
            if value.is_object() || value.is_array() {
                return Err(EtlError::shape(format!(
                    "field '{}' of entry '{}' must be a scalar or null, got {}",
                    field,
                    key,
                    kind(value)
                )));
            }
            if field != KEY_COLUMN && !columns.iter().any(|c| c == field) {
                columns.push(field.clone());
            }
            data.insert(field.clone(), value.clone());
        }
        // The key wins over a record field of the same name.
        data.insert(KEY_COLUMN.to_string(), Value::String(key.clone()));
        rows.push(Record { data });
    }

    columns.push(KEY_COLUMN.to_string());
    tracing::debug!("Reshaped {} rows across {} columns", rows.len(), columns.len());

    Ok(Table { columns, rows })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
