use crate::driver::postgres::define_table_query;
use crate::models::ForeignKey;
use crate::postgres_client_wrapper::FromRow;
use crate::{default, SchemaModelError};
use tokio_postgres::Row;

pub struct ForeignKeyColumnResult {
    pub constraint_name: String,
    pub source_table_column_name: String,
    pub target_schema_name: String,
    pub target_table_name: String,
    pub target_table_column_name: String,
}

impl FromRow for ForeignKeyColumnResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(Self {
            constraint_name: row.try_get(0)?,
            source_table_column_name: row.try_get(1)?,
            target_schema_name: row.try_get(2)?,
            target_table_name: row.try_get(3)?,
            target_table_column_name: row.try_get(4)?,
        })
    }
}

impl ForeignKeyColumnResult {
    /// The nullable and unique flags are set later, once all tables have been read.
    ///
    /// Only tables in `schema` end up in the graph, so a key pointing into another schema
    /// can't be resolved.
    pub fn to_foreign_key(self, schema: &str, source_table: &str) -> crate::Result<ForeignKey> {
        if self.target_schema_name != schema {
            return Err(SchemaModelError::UnknownTable(format!(
                "{}.{}",
                self.target_schema_name, self.target_table_name
            )));
        }

        Ok(ForeignKey {
            constraint_name: self.constraint_name,
            source_table: source_table.to_string(),
            source_column: self.source_table_column_name,
            destination_table: self.target_table_name,
            destination_column: self.target_table_column_name,
            ..default()
        })
    }
}

//language=postgresql
define_table_query!(
    get_foreign_key_columns,
    ForeignKeyColumnResult,
    r#"
select con.conname::text               as constraint_name,
       source_table_attr.attname::text as source_table_column_name,
       target_ns.nspname::text         as target_schema_name,
       target.relname::text            as target_table_name,
       target_table_attr.attname::text as target_table_column_name
from pg_catalog.pg_constraint con
         join pg_catalog.pg_class tab on con.conrelid = tab.oid
         join pg_catalog.pg_namespace tab_ns on tab_ns.oid = tab.relnamespace
         join pg_catalog.pg_class target on con.confrelid = target.oid
         join pg_catalog.pg_namespace target_ns on target_ns.oid = target.relnamespace
         join unnest(con.conkey, con.confkey) with ordinality as cols (conkey, confkey, position) on true
         join pg_catalog.pg_attribute source_table_attr
              on source_table_attr.attrelid = con.conrelid and source_table_attr.attnum = cols.conkey
         join pg_catalog.pg_attribute target_table_attr
              on target_table_attr.attrelid = con.confrelid and target_table_attr.attnum = cols.confkey
where con.contype = 'f'
  and tab_ns.nspname = $1::text
  and tab.relname = $2::text
order by con.conname, cols.position;
"#
);
