use crate::models::{ForeignKey, PrimaryKey, SemanticType};
use crate::Result;
use std::future::Future;

pub(crate) mod postgres;

pub use postgres::PostgresDriver;

/// A column as reported by the database, before its type has been translated.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct ColumnDefinition {
    pub name: String,
    pub native_type: String,
    /// Empty when the column has no default.
    pub default_expression: String,
    pub nullable: bool,
    /// Part of a unique constraint, or the only column of a unique index.
    pub unique: bool,
    pub must_be_non_zero: bool,
}

/// Reads the structure of a database. There is one implementation per supported database engine.
///
/// Everything that knows about a specific engine, including how its types map to
/// [`SemanticType`]s, lives behind this trait.
pub trait SchemaDriver: Sync {
    type Settings;

    /// Opens a connection to the database.
    fn connect(settings: &Self::Settings) -> impl Future<Output = Result<Self>> + Send
    where
        Self: Sized;

    /// The names of all user tables in the schema, except those in `exclude`.
    fn table_names(&self, exclude: &[String]) -> impl Future<Output = Result<Vec<String>>> + Send;

    fn columns(&self, table_name: &str) -> impl Future<Output = Result<Vec<ColumnDefinition>>> + Send;

    /// `None` if the table has no primary key.
    fn primary_key(&self, table_name: &str) -> impl Future<Output = Result<Option<PrimaryKey>>> + Send;

    /// One entry per column of each foreign key constraint on the table.
    fn foreign_keys(&self, table_name: &str) -> impl Future<Output = Result<Vec<ForeignKey>>> + Send;

    /// Maps a native column type to the type used in generated code. Never fails,
    /// unknown types fall back to text.
    fn translate_column_type(&self, native_type: &str, nullable: bool) -> SemanticType;

    /// If the engine hands back generated keys through a `returning` clause after inserts,
    /// rather than through a separate "last inserted id" query.
    fn uses_generated_identity_return(&self) -> bool;
}
