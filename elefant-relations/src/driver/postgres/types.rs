use crate::models::{SemanticType, ValueType};

/// Types where the zero value is never something that was actually stored.
const NON_ZERO_TYPES: &[&str] = &["uuid"];

/// Maps a type name from `information_schema.columns.data_type` to the type used in
/// generated code.
///
/// Unknown types, including user defined types and arrays, are exposed as strings.
pub fn translate_column_type(native_type: &str, nullable: bool) -> SemanticType {
    let value_type = match native_type {
        "bigint" | "bigserial" => ValueType::Int64,
        "integer" | "serial" => ValueType::Int32,
        "smallint" | "smallserial" => ValueType::Int16,
        "decimal" | "numeric" | "double precision" | "money" => ValueType::Float64,
        "real" => ValueType::Float32,
        "bit" | "interval" | "bit varying" | "character" | "character varying" | "cidr"
        | "inet" | "json" | "jsonb" | "macaddr" | "text" | "uuid" | "xml" => ValueType::String,
        "bytea" => ValueType::Bytes,
        "boolean" => ValueType::Bool,
        "date"
        | "time"
        | "time without time zone"
        | "time with time zone"
        | "timestamp"
        | "timestamp without time zone"
        | "timestamp with time zone" => ValueType::Time,
        _ => {
            tracing::debug!(native_type, "Unrecognized column type, falling back to string");
            ValueType::String
        }
    };

    SemanticType::new(value_type, nullable)
}

pub fn is_non_zero_type(native_type: &str) -> bool {
    NON_ZERO_TYPES.contains(&native_type)
}
