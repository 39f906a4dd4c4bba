use crate::driver::postgres::PostgresDriver;

impl PostgresDriver {
    pub(in crate::driver::postgres) async fn get_table_names(
        &self,
        exclude: &[String],
    ) -> crate::Result<Vec<String>> {
        //language=postgresql
        let query = r#"
select table_name::text
from information_schema.tables
where table_schema::text = $1::text
  and table_type = 'BASE TABLE'
  and not (table_name::text = any ($2::text[]))
order by table_name;
"#;

        self.connection
            .get_single_results(query, &[&self.schema, &exclude])
            .await
    }
}
