use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// The kind of value a column holds, independent of whether it can be null.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Serialize)]
pub enum ValueType {
    Int64,
    Int32,
    Int16,
    Float64,
    Float32,
    String,
    Bytes,
    Bool,
    Time,
}

impl ValueType {
    /// The type name used for a column that can never be null.
    pub fn bare_name(&self) -> &'static str {
        match self {
            ValueType::Int64 => "int64",
            ValueType::Int32 => "int",
            ValueType::Int16 => "int16",
            ValueType::Float64 => "float64",
            ValueType::Float32 => "float32",
            ValueType::String => "string",
            ValueType::Bytes => "[]byte",
            ValueType::Bool => "bool",
            ValueType::Time => "time.Time",
        }
    }

    /// The name of the value held by the nullable wrapper type.
    pub fn wrapped_name(&self) -> &'static str {
        match self {
            ValueType::Int64 => "Int64",
            ValueType::Int32 => "Int",
            ValueType::Int16 => "Int16",
            ValueType::Float64 => "Float64",
            ValueType::Float32 => "Float32",
            ValueType::String => "String",
            ValueType::Bytes => "Bytes",
            ValueType::Bool => "Bool",
            ValueType::Time => "Time",
        }
    }
}

/// The type a column is exposed as in generated code.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum SemanticType {
    Bare(ValueType),
    Nullable(ValueType),
}

impl Default for SemanticType {
    fn default() -> Self {
        SemanticType::Bare(ValueType::String)
    }
}

impl SemanticType {
    pub fn new(value_type: ValueType, nullable: bool) -> Self {
        if nullable {
            SemanticType::Nullable(value_type)
        } else {
            SemanticType::Bare(value_type)
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            SemanticType::Bare(v) | SemanticType::Nullable(v) => *v,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, SemanticType::Nullable(_))
    }

    /// The field on the nullable wrapper that holds the actual value.
    /// `None` for bare types, as those are the value themselves.
    pub fn value_accessor(&self) -> Option<&'static str> {
        match self {
            SemanticType::Bare(_) => None,
            SemanticType::Nullable(v) => Some(v.wrapped_name()),
        }
    }

    /// An expression that reaches the underlying value of `field`.
    pub fn value_expression(&self, field: &str) -> String {
        match self.value_accessor() {
            Some(accessor) => format!("{field}.{accessor}"),
            None => field.to_string(),
        }
    }
}

impl Display for SemanticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticType::Bare(v) => f.write_str(v.bare_name()),
            SemanticType::Nullable(v) => write!(f, "null.{}", v.wrapped_name()),
        }
    }
}

// Templates consume the rendered type name.
impl Serialize for SemanticType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bare_and_nullable_names() {
        assert_eq!(SemanticType::Bare(ValueType::Int64).to_string(), "int64");
        assert_eq!(SemanticType::Bare(ValueType::Time).to_string(), "time.Time");
        assert_eq!(SemanticType::Nullable(ValueType::Int32).to_string(), "null.Int");
        assert_eq!(SemanticType::Nullable(ValueType::Bytes).to_string(), "null.Bytes");
    }

    #[test]
    fn value_expression_unwraps_nullable_types_only() {
        let nullable = SemanticType::new(ValueType::Int64, true);
        let bare = SemanticType::new(ValueType::Int64, false);

        assert_eq!(nullable.value_expression("ManagerID"), "ManagerID.Int64");
        assert_eq!(bare.value_expression("ManagerID"), "ManagerID");
        assert_eq!(nullable.value_type(), bare.value_type());
        assert_ne!(nullable, bare);
    }

    #[test]
    fn serializes_as_rendered_name() {
        let json = serde_json::to_string(&SemanticType::Nullable(ValueType::String)).unwrap();
        assert_eq!(json, "\"null.String\"");
    }
}
