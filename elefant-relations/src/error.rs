use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaModelError {
    #[error("Could not connect to postgres: `{0}`")]
    Connection(#[source] tokio_postgres::Error),

    #[error("Error from postgres: `{0}`")]
    PostgresError(#[from] tokio_postgres::Error),

    #[error("Error from postgres: `{source}` when executing query: `{query}`")]
    PostgresErrorWithQuery {
        query: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Failed to introspect table '{table}': {source}")]
    Introspection {
        table: String,
        #[source]
        source: Box<SchemaModelError>,
    },

    #[error("Postgres version {0} is not supported, the minimum is 12")]
    UnsupportedPostgresVersion(i32),

    #[error("Could not read the server version from postgres")]
    InvalidPostgresVersionResponse,

    #[error("Table '{0}' does not exist in the schema")]
    UnknownTable(String),

    #[error("Column '{column}' does not exist in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Two relationships on table '{table}' resolve to the same name '{name}'")]
    NameCollision { table: String, name: String },
}

impl SchemaModelError {
    pub(crate) fn in_table(self, table: &str) -> Self {
        SchemaModelError::Introspection {
            table: table.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, SchemaModelError>;
