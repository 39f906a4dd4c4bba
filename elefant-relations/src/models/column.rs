use crate::driver::ColumnDefinition;
use crate::models::SemanticType;
use serde::Serialize;

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct Column {
    pub name: String,
    /// The type name as reported by the database, such as `character varying`.
    pub native_type: String,
    /// Empty when the column has no default.
    pub default_expression: String,
    pub nullable: bool,
    pub unique: bool,
    /// The zero value of the type is never a valid stored value, e.g. for `uuid`.
    pub must_be_non_zero: bool,
    pub semantic_type: SemanticType,
}

impl Column {
    pub fn from_definition(definition: ColumnDefinition, semantic_type: SemanticType) -> Self {
        Column {
            name: definition.name,
            native_type: definition.native_type,
            default_expression: definition.default_expression,
            nullable: definition.nullable,
            unique: definition.unique,
            must_be_non_zero: definition.must_be_non_zero,
            semantic_type,
        }
    }
}
