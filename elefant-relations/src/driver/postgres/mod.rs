use crate::driver::{ColumnDefinition, SchemaDriver};
use crate::models::{ForeignKey, PrimaryKey, SemanticType};
use crate::{ConnectionSettings, PostgresClientWrapper, Result};
use tracing::instrument;

mod columns;
mod foreign_keys;
mod primary_key;
mod table_names;
mod types;

pub use types::{is_non_zero_type, translate_column_type};

/// Reads the schema from the postgres catalog.
pub struct PostgresDriver {
    connection: PostgresClientWrapper,
    schema: String,
}

impl PostgresDriver {
    /// Uses the `public` schema.
    pub fn new(connection: PostgresClientWrapper) -> Self {
        Self::with_schema(connection, "public")
    }

    pub fn with_schema(connection: PostgresClientWrapper, schema: &str) -> Self {
        PostgresDriver {
            connection,
            schema: schema.to_string(),
        }
    }
}

impl SchemaDriver for PostgresDriver {
    type Settings = ConnectionSettings;

    #[instrument(skip_all)]
    async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let connection = PostgresClientWrapper::new(&settings.get_connection_string()).await?;
        Ok(Self::with_schema(connection, settings.get_schema()))
    }

    #[instrument(skip(self))]
    async fn table_names(&self, exclude: &[String]) -> Result<Vec<String>> {
        self.get_table_names(exclude).await
    }

    #[instrument(skip(self))]
    async fn columns(&self, table_name: &str) -> Result<Vec<ColumnDefinition>> {
        let columns = self
            .get_columns(table_name)
            .await?
            .into_iter()
            .map(|c| c.to_column_definition())
            .collect();

        Ok(columns)
    }

    #[instrument(skip(self))]
    async fn primary_key(&self, table_name: &str) -> Result<Option<PrimaryKey>> {
        let key_columns = self.get_primary_key_columns(table_name).await?;

        let Some(first) = key_columns.first() else {
            return Ok(None);
        };

        Ok(Some(PrimaryKey {
            constraint_name: first.constraint_name.clone(),
            columns: key_columns.iter().map(|c| c.column_name.clone()).collect(),
        }))
    }

    #[instrument(skip(self))]
    async fn foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKey>> {
        self.get_foreign_key_columns(table_name)
            .await?
            .into_iter()
            .map(|fk| fk.to_foreign_key(&self.schema, table_name))
            .collect()
    }

    fn translate_column_type(&self, native_type: &str, nullable: bool) -> SemanticType {
        translate_column_type(native_type, nullable)
    }

    fn uses_generated_identity_return(&self) -> bool {
        true
    }
}

/// Defines a query against the catalog that is scoped to a single table.
/// The query gets the schema name as `$1` and the table name as `$2`.
macro_rules! define_table_query {
    ($fn_name:ident, $result:ident, $query:literal) => {
        impl $crate::driver::postgres::PostgresDriver {
            pub(in crate::driver::postgres) async fn $fn_name(
                &self,
                table_name: &str,
            ) -> $crate::Result<Vec<$result>> {
                self.connection
                    .get_results($query, &[&self.schema, &table_name])
                    .await
            }
        }
    };
}

pub(crate) use define_table_query;
