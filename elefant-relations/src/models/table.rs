use crate::models::{Column, ForeignKey, PrimaryKey};
use crate::{default, Result, SchemaModelError};
use serde::Serialize;

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Option<PrimaryKey>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Table {
            name: name.to_string(),
            ..default()
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| SchemaModelError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    /// Foreign keys that point at `table_name` from this table.
    pub fn foreign_keys_to<'a>(&'a self, table_name: &'a str) -> impl Iterator<Item = &'a ForeignKey> + 'a {
        self.foreign_keys
            .iter()
            .filter(move |fk| fk.destination_table == table_name)
    }

    /// A join table only exists to connect two other tables in a many-to-many relationship.
    ///
    /// It has exactly two single column foreign keys, pointing at two different tables that
    /// aren't the join table itself, and every column in the table is one of those
    /// two non-nullable foreign key columns.
    pub fn is_join_table(&self) -> bool {
        let [first, second] = self.foreign_keys.as_slice() else {
            return false;
        };

        if first.constraint_name == second.constraint_name
            || first.source_column == second.source_column
            || first.destination_table == second.destination_table
            || first.is_self_reference()
            || second.is_self_reference()
        {
            return false;
        }

        self.columns.len() == 2
            && self.columns.iter().all(|c| {
                !c.nullable && (c.name == first.source_column || c.name == second.source_column)
            })
    }

    /// The join table's foreign key that isn't `constraint_name`.
    pub(crate) fn other_join_foreign_key(&self, constraint_name: &str) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.constraint_name != constraint_name)
    }
}
