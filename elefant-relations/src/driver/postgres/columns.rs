use crate::driver::postgres::{define_table_query, types};
use crate::driver::ColumnDefinition;
use crate::postgres_client_wrapper::FromRow;
use tokio_postgres::Row;

#[derive(Debug, Eq, PartialEq)]
pub struct TableColumnResult {
    pub column_name: String,
    pub data_type: String,
    pub column_default: Option<String>,
    pub is_nullable: bool,
    pub is_unique: bool,
}

impl FromRow for TableColumnResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(TableColumnResult {
            column_name: row.try_get(0)?,
            data_type: row.try_get(1)?,
            column_default: row.try_get(2)?,
            is_nullable: row.try_get(3)?,
            is_unique: row.try_get(4)?,
        })
    }
}

impl TableColumnResult {
    pub fn to_column_definition(self) -> ColumnDefinition {
        let must_be_non_zero = types::is_non_zero_type(&self.data_type);

        ColumnDefinition {
            name: self.column_name,
            native_type: self.data_type,
            default_expression: self.column_default.unwrap_or_default(),
            nullable: self.is_nullable,
            unique: self.is_unique,
            must_be_non_zero,
        }
    }
}

//language=postgresql
define_table_query!(
    get_columns,
    TableColumnResult,
    r#"
select c.column_name::text,
       c.data_type::text,
       c.column_default::text,
       c.is_nullable = 'YES'                                      as is_nullable,
       exists(select 1
              from pg_catalog.pg_constraint con
              where con.conrelid = cl.oid
                and con.contype = 'u'
                and attr.attnum = any (con.conkey))
           or exists(select 1
                     from pg_catalog.pg_index idx
                     where idx.indrelid = cl.oid
                       and idx.indisunique
                       and idx.indpred is null
                       and idx.indnkeyatts = 1
                       and idx.indkey[0] = attr.attnum)           as is_unique
from information_schema.columns c
         join pg_catalog.pg_namespace ns on ns.nspname = c.table_schema::text
         join pg_catalog.pg_class cl on cl.relnamespace = ns.oid and cl.relname = c.table_name::text
         join pg_catalog.pg_attribute attr on attr.attrelid = cl.oid and attr.attname = c.column_name::text
where c.table_schema::text = $1::text
  and c.table_name::text = $2::text
order by c.ordinal_position;
"#
);
