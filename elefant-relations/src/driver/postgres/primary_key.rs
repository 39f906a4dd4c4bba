use crate::driver::postgres::define_table_query;
use crate::postgres_client_wrapper::FromRow;
use tokio_postgres::Row;

pub struct PrimaryKeyColumnResult {
    pub constraint_name: String,
    pub column_name: String,
}

impl FromRow for PrimaryKeyColumnResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(Self {
            constraint_name: row.try_get(0)?,
            column_name: row.try_get(1)?,
        })
    }
}

//language=postgresql
define_table_query!(
    get_primary_key_columns,
    PrimaryKeyColumnResult,
    r#"
select con.conname::text  as constraint_name,
       attr.attname::text as column_name
from pg_catalog.pg_constraint con
         join pg_catalog.pg_class tab on con.conrelid = tab.oid
         join pg_catalog.pg_namespace tab_ns on tab_ns.oid = tab.relnamespace
         join unnest(con.conkey) with ordinality as cols (attnum, position) on true
         join pg_catalog.pg_attribute attr on attr.attrelid = con.conrelid and attr.attnum = cols.attnum
where con.contype = 'p'
  and tab_ns.nspname = $1::text
  and tab.relname = $2::text
order by cols.position;
"#
);
