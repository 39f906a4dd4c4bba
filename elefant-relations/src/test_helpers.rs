use crate::driver::postgres::translate_column_type;
use crate::driver::{ColumnDefinition, SchemaDriver};
use crate::models::{Column, ForeignKey, PrimaryKey, SemanticType};
use crate::{default, Result, SchemaModelError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "pg_tests")]
pub use postgres::*;

/// Sends tracing output to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A column as it looks after introspection, typed with the postgres translation.
pub fn column(name: &str, native_type: &str, nullable: bool) -> Column {
    Column {
        name: name.to_string(),
        native_type: native_type.to_string(),
        nullable,
        must_be_non_zero: crate::driver::postgres::is_non_zero_type(native_type),
        semantic_type: translate_column_type(native_type, nullable),
        ..default()
    }
}

pub fn foreign_key(
    constraint_name: &str,
    source_table: &str,
    source_column: &str,
    destination_table: &str,
    destination_column: &str,
) -> ForeignKey {
    ForeignKey {
        constraint_name: constraint_name.to_string(),
        source_table: source_table.to_string(),
        source_column: source_column.to_string(),
        destination_table: destination_table.to_string(),
        destination_column: destination_column.to_string(),
        ..default()
    }
}

pub fn primary_key(constraint_name: &str, columns: &[&str]) -> Option<PrimaryKey> {
    Some(PrimaryKey {
        constraint_name: constraint_name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
    })
}

/// The raw facts a [`InMemoryDriver`] reports for one table.
#[derive(Debug, Clone, Default)]
pub struct FakeTable {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub primary_key: Option<PrimaryKey>,
    pub foreign_keys: Vec<ForeignKey>,
    /// How long reading the columns of this table takes.
    pub delay: Duration,
}

impl FakeTable {
    pub fn new(name: &str) -> Self {
        FakeTable {
            name: name.to_string(),
            ..default()
        }
    }

    pub fn column(mut self, name: &str, native_type: &str, nullable: bool) -> Self {
        self.columns.push(ColumnDefinition {
            name: name.to_string(),
            native_type: native_type.to_string(),
            nullable,
            must_be_non_zero: crate::driver::postgres::is_non_zero_type(native_type),
            ..default()
        });
        self
    }

    pub fn id(mut self) -> Self {
        self.columns.push(ColumnDefinition {
            name: "id".to_string(),
            native_type: "integer".to_string(),
            default_expression: format!("nextval('{}_id_seq'::regclass)", self.name),
            unique: true,
            ..default()
        });
        self.primary_key = primary_key(&format!("{}_pkey", self.name), &["id"]);
        self
    }

    pub fn unique(mut self, column_name: &str) -> Self {
        if let Some(c) = self.columns.iter_mut().find(|c| c.name == column_name) {
            c.unique = true;
        }
        self
    }

    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = primary_key(&format!("{}_pkey", self.name), columns);
        self
    }

    pub fn references(mut self, column_name: &str, destination_table: &str, destination_column: &str) -> Self {
        let constraint_name = format!("{}_{}_fkey", self.name, column_name);
        let fk = foreign_key(&constraint_name, &self.name, column_name, destination_table, destination_column);
        self.foreign_keys.push(fk);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A driver that serves a fixed schema from memory, using the postgres type translation.
#[derive(Default)]
pub struct InMemoryDriver {
    tables: Vec<FakeTable>,
    failing_table: Option<String>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryDriver {
    pub fn new(tables: Vec<FakeTable>) -> Self {
        InMemoryDriver {
            tables,
            ..default()
        }
    }

    /// Reading the columns of `table_name` fails.
    pub fn failing_on(mut self, table_name: &str) -> Self {
        self.failing_table = Some(table_name.to_string());
        self
    }

    /// The highest number of tables that had their columns read at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn get_table(&self, table_name: &str) -> Result<&FakeTable> {
        self.tables
            .iter()
            .find(|t| t.name == table_name)
            .ok_or_else(|| SchemaModelError::UnknownTable(table_name.to_string()))
    }
}

impl SchemaDriver for InMemoryDriver {
    type Settings = Vec<FakeTable>;

    async fn connect(settings: &Vec<FakeTable>) -> Result<Self> {
        Ok(Self::new(settings.clone()))
    }

    async fn table_names(&self, exclude: &[String]) -> Result<Vec<String>> {
        Ok(self
            .tables
            .iter()
            .filter(|t| !exclude.contains(&t.name))
            .map(|t| t.name.clone())
            .collect())
    }

    async fn columns(&self, table_name: &str) -> Result<Vec<ColumnDefinition>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let table = self.get_table(table_name);
        if let Ok(table) = &table {
            if !table.delay.is_zero() {
                tokio::time::sleep(table.delay).await;
            }
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_table.as_deref() == Some(table_name) {
            return Err(SchemaModelError::UnknownTable(table_name.to_string()));
        }

        Ok(table?.columns.clone())
    }

    async fn primary_key(&self, table_name: &str) -> Result<Option<PrimaryKey>> {
        Ok(self.get_table(table_name)?.primary_key.clone())
    }

    async fn foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKey>> {
        Ok(self.get_table(table_name)?.foreign_keys.clone())
    }

    fn translate_column_type(&self, native_type: &str, nullable: bool) -> SemanticType {
        translate_column_type(native_type, nullable)
    }

    fn uses_generated_identity_return(&self) -> bool {
        true
    }
}

#[cfg(feature = "pg_tests")]
mod postgres {
    use crate::PostgresClientWrapper;
    use uuid::Uuid;

    /// A helper for running tests that require a database.
    ///
    /// This will automatically create a new database for each test,
    /// and drop it when the test is done, if the test succeeded.
    pub struct TestHelper {
        pub test_db_name: String,
        main_connection: Option<PostgresClientWrapper>,
        pub port: u16,
        cleaned_up_nicely: bool,
    }

    impl Drop for TestHelper {
        fn drop(&mut self) {
            if self.cleaned_up_nicely {
                return;
            }

            if std::thread::panicking() {
                eprintln!(
                    "Thread is panicking when dropping test helper. Leaving database '{}' around to be inspected",
                    self.test_db_name
                );
            } else {
                drop(self.main_connection.take());
                let db_name = self.test_db_name.clone();
                let port = self.port;
                std::thread::spawn(move || {
                    let runtime = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .unwrap();
                    runtime.block_on(cleanup(&db_name, port));
                })
                .join()
                .expect("Failed to run test helper cleanup from drop");
            }
        }
    }

    /// Creates a new test helper, using a random database name and a specific port.
    pub async fn get_test_helper_on_port(port: u16) -> TestHelper {
        let test_db_name = format!("test_db_{}", Uuid::new_v4().simple());

        {
            let conn = get_test_connection_on_port("postgres", port).await;
            conn.execute_non_query(&format!("create database {}", test_db_name))
                .await
                .expect("Failed to create test database");
        }

        let conn = get_test_connection_on_port(&test_db_name, port).await;

        TestHelper {
            test_db_name,
            main_connection: Some(conn),
            port,
            cleaned_up_nicely: false,
        }
    }

    impl TestHelper {
        pub async fn execute_not_query(&self, sql: &str) {
            self.get_conn()
                .execute_non_query(sql)
                .await
                .unwrap_or_else(|e| panic!("Failed to execute non query: {:?}\n{}", e, sql));
        }

        pub fn get_conn(&self) -> &PostgresClientWrapper {
            self.main_connection
                .as_ref()
                .expect("Connection is only taken when the helper is dropped")
        }

        /// Opens another connection to the test database, for handing over to a driver.
        pub async fn open_connection(&self) -> PostgresClientWrapper {
            get_test_connection_on_port(&self.test_db_name, self.port).await
        }

        pub async fn stop(mut self) {
            drop(self.main_connection.take());
            cleanup(&self.test_db_name, self.port).await;
            self.cleaned_up_nicely = true;
        }
    }

    async fn get_test_connection_on_port(database_name: &str, port: u16) -> PostgresClientWrapper {
        let connection_string = format!(
            "host=localhost port={port} user=postgres password=passw0rd dbname={database_name}"
        );

        PostgresClientWrapper::new(&connection_string)
            .await
            .expect("Connection to test database failed. Is postgres running?")
    }

    async fn cleanup(db_name: &str, port: u16) {
        let conn = get_test_connection_on_port("postgres", port).await;
        if conn.version() >= 130 {
            conn.execute_non_query(&format!("drop database {} with (force);", db_name))
                .await
                .expect("Failed to drop test database");
        } else {
            conn.execute_non_query(&format!(
                "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}' AND pid != pg_backend_pid()",
                db_name
            ))
            .await
            .expect("Failed to drop test database");
            conn.execute_non_query(&format!("drop database {};", db_name))
                .await
                .expect("Failed to drop test database");
        }
    }
}
