use crate::models::{ForeignKey, JoinTableRoute, SchemaGraph, Table, ToManyRelationship};
use crate::Result;
use serde::Serialize;
use tracing::{debug, instrument};

/// The relationships of a single table, seen from that table.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct TableRelationships {
    pub table: String,
    /// The table's own foreign keys. Each of them points at exactly one row.
    pub to_one: Vec<ForeignKey>,
    /// Foreign keys in other tables pointing at this table.
    pub to_many: Vec<ToManyRelationship>,
}

impl TableRelationships {
    /// Reverse relationships where the referencing column is unique.
    pub fn one_to_one(&self) -> impl Iterator<Item = &ToManyRelationship> {
        self.to_many.iter().filter(|r| r.is_one_to_one())
    }

    /// Reverse relationships that yield any number of rows.
    pub fn one_to_many(&self) -> impl Iterator<Item = &ToManyRelationship> {
        self.to_many.iter().filter(|r| !r.is_one_to_one())
    }
}

/// Derives the relationships of every table in the graph.
///
/// Each foreign key shows up exactly twice: as a to-one relationship on the table that owns
/// it, and as a [`ToManyRelationship`] on the table it points at. When the owning table is a
/// join table, the second one skips the join table and points at the table on its other side.
#[instrument(skip_all)]
pub fn infer_relationships(graph: &SchemaGraph) -> Result<Vec<TableRelationships>> {
    let mut result = Vec::with_capacity(graph.tables().len());

    for table in graph.tables() {
        let mut to_many = vec![];

        for source_table in graph.tables() {
            for fk in source_table.foreign_keys_to(&table.name) {
                to_many.push(build_relationship(table, source_table, fk)?);
            }
        }

        debug!(
            table = table.name,
            to_one = table.foreign_keys.len(),
            to_many = to_many.len(),
            "Inferred relationships"
        );

        result.push(TableRelationships {
            table: table.name.clone(),
            to_one: table.foreign_keys.clone(),
            to_many,
        });
    }

    Ok(result)
}

fn build_relationship(
    local_table: &Table,
    source_table: &Table,
    fk: &ForeignKey,
) -> Result<ToManyRelationship> {
    let local_column = local_table.get_column(&fk.destination_column)?;

    let relationship = ToManyRelationship {
        constraint_name: fk.constraint_name.clone(),
        table: local_table.name.clone(),
        column: fk.destination_column.clone(),
        nullable: local_column.nullable,
        unique: local_column.unique,
        foreign_table: fk.source_table.clone(),
        foreign_column: fk.source_column.clone(),
        foreign_column_nullable: fk.source_column_nullable,
        foreign_column_unique: fk.source_column_unique,
        join: None,
    };

    if !source_table.is_join_table() {
        return Ok(relationship);
    }

    // A join table has exactly two foreign keys, so the other one always exists.
    let Some(other) = source_table.other_join_foreign_key(&fk.constraint_name) else {
        return Ok(relationship);
    };

    Ok(ToManyRelationship {
        foreign_table: other.destination_table.clone(),
        foreign_column: other.destination_column.clone(),
        foreign_column_nullable: other.destination_column_nullable,
        foreign_column_unique: other.destination_column_unique,
        join: Some(JoinTableRoute {
            table: source_table.name.clone(),
            local_column: fk.source_column.clone(),
            foreign_column: other.source_column.clone(),
        }),
        ..relationship
    })
}
