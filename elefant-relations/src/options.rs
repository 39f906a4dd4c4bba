use serde::Deserialize;
use std::num::NonZeroUsize;

/// Controls which tables are introspected and how.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntrospectionOptions {
    /// Tables that should be skipped entirely, such as migration bookkeeping tables.
    /// Names are matched exactly.
    pub exclude_tables: Vec<String>,
    /// How many tables to introspect in parallel at most
    pub max_parallel: Option<NonZeroUsize>,
}

impl IntrospectionOptions {
    pub(crate) fn get_max_parallel_or_1(&self) -> NonZeroUsize {
        self.max_parallel.unwrap_or(NonZeroUsize::MIN)
    }
}

/// The parts needed to build a libpq style connection string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: String,
    /// The schema to read tables from. `public` when empty.
    pub schema: String,
}

impl ConnectionSettings {
    /// Empty values, and a port of 0, are left out so postgres falls back to its own defaults.
    pub fn get_connection_string(&self) -> String {
        let mut parts = vec![];

        if !self.user.is_empty() {
            parts.push(format!("user={}", self.user));
        }
        if !self.password.is_empty() {
            parts.push(format!("password={}", self.password));
        }
        if !self.database.is_empty() {
            parts.push(format!("dbname={}", self.database));
        }
        if !self.host.is_empty() {
            parts.push(format!("host={}", self.host));
        }
        if self.port != 0 {
            parts.push(format!("port={}", self.port));
        }
        if !self.ssl_mode.is_empty() {
            parts.push(format!("sslmode={}", self.ssl_mode));
        }

        parts.join(" ")
    }

    pub fn get_schema(&self) -> &str {
        if self.schema.is_empty() {
            "public"
        } else {
            &self.schema
        }
    }
}
