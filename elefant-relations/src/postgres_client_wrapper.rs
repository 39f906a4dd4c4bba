use crate::{Result, SchemaModelError};
use tokio::task::JoinHandle;
use tokio_postgres::types::{FromSqlOwned, ToSql};
use tokio_postgres::{Client, NoTls, Row, SimpleQueryMessage};

/// An open connection to postgres.
///
/// The client can have multiple queries in flight at the same time, so a single
/// wrapper can be shared by everything introspecting tables in parallel.
pub struct PostgresClientWrapper {
    client: Client,
    join_handle: JoinHandle<Result<()>>,
    version: i32,
}

impl PostgresClientWrapper {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(SchemaModelError::Connection)?;

        // The connection object performs the actual communication with the database,
        // so spawn it off to run on its own.
        let join_handle = tokio::spawn(async move {
            match connection.await {
                Err(e) => Err(SchemaModelError::Connection(e)),
                Ok(_) => Ok(()),
            }
        });

        let messages = client.simple_query("SHOW server_version_num;").await?;
        let version = parse_server_version(&messages)?;

        Ok(PostgresClientWrapper {
            client,
            join_handle,
            version,
        })
    }

    pub async fn execute_non_query(&self, sql: &str) -> Result {
        self.client
            .batch_execute(sql)
            .await
            .map_err(|e| SchemaModelError::PostgresErrorWithQuery {
                source: e,
                query: sql.to_string(),
            })?;

        Ok(())
    }

    pub async fn get_results<T: FromRow>(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<T>> {
        let query_results = self.client.query(sql, params).await.map_err(|e| {
            SchemaModelError::PostgresErrorWithQuery {
                source: e,
                query: sql.to_string(),
            }
        })?;

        let mut output = Vec::with_capacity(query_results.len());

        for row in query_results.into_iter() {
            output.push(T::from_row(row)?);
        }

        Ok(output)
    }

    pub async fn get_single_results<T: FromSqlOwned>(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<T>> {
        let r = self
            .get_results::<(T,)>(sql, params)
            .await?
            .into_iter()
            .map(|t| t.0)
            .collect();

        Ok(r)
    }

    /// The major version of the server, multiplied by 10, so postgres 15 is `150`.
    pub fn version(&self) -> i32 {
        self.version
    }
}

/// Reads `server_version_num` from a simple query response. Newer servers and clients send a
/// row description ahead of the row, so the first message is not necessarily the value.
fn parse_server_version(messages: &[SimpleQueryMessage]) -> Result<i32> {
    let version: i32 = messages
        .iter()
        .find_map(|m| match m {
            SimpleQueryMessage::Row(row) => row.get(0),
            _ => None,
        })
        .and_then(|v| v.parse().ok())
        .ok_or(SchemaModelError::InvalidPostgresVersionResponse)?;

    if version < 120000 {
        return Err(SchemaModelError::UnsupportedPostgresVersion(version));
    }

    Ok(version / 1000)
}

impl Drop for PostgresClientWrapper {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}

pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self>;
}

impl<T1: FromSqlOwned> FromRow for (T1,) {
    fn from_row(row: Row) -> Result<Self> {
        Ok((row.try_get(0)?,))
    }
}

impl<T1: FromSqlOwned, T2: FromSqlOwned> FromRow for (T1, T2) {
    fn from_row(row: Row) -> Result<Self> {
        Ok((row.try_get(0)?, row.try_get(1)?))
    }
}
