use crate::models::Table;
use crate::{Result, SchemaModelError};
use serde::Serialize;

/// Every introspected table of one run. Tables keep the order the database listed them in.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct SchemaGraph {
    tables: Vec<Table>,
}

impl SchemaGraph {
    pub fn new(tables: Vec<Table>) -> Self {
        SchemaGraph { tables }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.table(name)
            .ok_or_else(|| SchemaModelError::UnknownTable(name.to_string()))
    }

    pub(crate) fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }
}
