use crate::models::{Column, ForeignKey, SchemaGraph, Table, ToManyRelationship};
use crate::naming::{
    camel_case, function_name, human_readable, plural, receiver, singular, title_case,
    trim_id_suffix,
};
use crate::relationships::TableRelationships;
use crate::{Result, SchemaModelError};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToOneLocalTable {
    pub name_title: String,
    pub column_name_title: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToOneForeignTable {
    pub name: String,
    pub name_title: String,
    pub name_plural_title: String,
    pub column_name: String,
    pub column_name_title: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToOneFunction {
    pub package_name: String,
    /// The accessor on the local table.
    pub name: String,
    /// The accessor on the foreign table leading back here.
    pub foreign_name: String,
    pub varname: String,
    pub receiver: String,
    pub one_to_one: bool,
    pub nullable: bool,
    pub local_assignment: String,
    pub foreign_assignment: String,
}

/// Everything a template needs to render an accessor that yields at most one row.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToOneDescriptor {
    pub foreign_key: ForeignKey,
    pub local_table: ToOneLocalTable,
    pub foreign_table: ToOneForeignTable,
    pub function: ToOneFunction,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToManyLocalTable {
    pub name_title: String,
    pub name_singular: String,
    pub column_name_title: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToManyForeignTable {
    pub name_title: String,
    pub name_singular: String,
    pub name_plural_title: String,
    pub name_human_readable: String,
    pub column_name_title: String,
    pub slice: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToManyFunction {
    pub name: String,
    pub foreign_name: String,
    pub receiver: String,
    pub local_assignment: String,
    pub foreign_assignment: String,
}

/// Everything a template needs to render an accessor that yields a sequence of rows.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToManyDescriptor {
    pub relationship: ToManyRelationship,
    pub local_table: ToManyLocalTable,
    pub foreign_table: ToManyForeignTable,
    pub function: ToManyFunction,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct TableDescriptors {
    pub table: String,
    pub to_one: Vec<ToOneDescriptor>,
    pub to_many: Vec<ToManyDescriptor>,
}

impl TableDescriptors {
    fn function_names(&self) -> impl Iterator<Item = &str> {
        self.to_one
            .iter()
            .map(|d| d.function.name.as_str())
            .chain(self.to_many.iter().map(|d| d.function.name.as_str()))
    }
}

/// Resolves the names of every relationship, one entry per table in `relationships`.
///
/// Foreign keys and unique reverse relationships become [`ToOneDescriptor`]s, all other
/// reverse relationships become [`ToManyDescriptor`]s. Fails with
/// [`SchemaModelError::NameCollision`] if two accessors on the same table end up with the
/// same name.
#[instrument(skip_all)]
pub fn assemble_descriptors(
    graph: &SchemaGraph,
    relationships: &[TableRelationships],
    package_name: &str,
) -> Result<Vec<TableDescriptors>> {
    relationships
        .iter()
        .map(|table_relationships| {
            let table = graph.get_table(&table_relationships.table)?;

            let mut to_one = table_relationships
                .to_one
                .iter()
                .map(|fk| to_one_from_foreign_key(package_name, graph, table, fk))
                .collect::<Result<Vec<_>>>()?;

            for relationship in table_relationships.one_to_one() {
                to_one.push(to_one_from_relationship(package_name, graph, table, relationship)?);
            }

            let to_many = table_relationships
                .one_to_many()
                .map(|relationship| to_many_from_relationship(graph, table, relationship))
                .collect::<Result<Vec<_>>>()?;

            let descriptors = TableDescriptors {
                table: table.name.clone(),
                to_one,
                to_many,
            };

            if let Some(name) = descriptors.function_names().duplicates().next() {
                return Err(SchemaModelError::NameCollision {
                    table: table.name.clone(),
                    name: name.to_string(),
                });
            }

            debug!(
                table = table.name,
                to_one = descriptors.to_one.len(),
                to_many = descriptors.to_many.len(),
                "Assembled descriptors"
            );

            Ok(descriptors)
        })
        .collect()
}

fn assignment(column: &Column) -> String {
    column.semantic_type.value_expression(&title_case(&column.name))
}

fn to_one_from_foreign_key(
    package_name: &str,
    graph: &SchemaGraph,
    table: &Table,
    fk: &ForeignKey,
) -> Result<ToOneDescriptor> {
    let local_column = table.get_column(&fk.source_column)?;
    let foreign_column = graph
        .get_table(&fk.destination_table)?
        .get_column(&fk.destination_column)?;

    // With a unique column, at most one row of this table points back.
    let source_table_name = if fk.source_column_unique {
        singular(&fk.source_table)
    } else {
        plural(&fk.source_table)
    };

    Ok(ToOneDescriptor {
        foreign_key: fk.clone(),
        local_table: ToOneLocalTable {
            name_title: title_case(&singular(&table.name)),
            column_name_title: title_case(&singular(&fk.source_column)),
        },
        foreign_table: ToOneForeignTable {
            name: fk.destination_table.clone(),
            name_title: title_case(&singular(&fk.destination_table)),
            name_plural_title: title_case(&plural(&fk.destination_table)),
            column_name: fk.destination_column.clone(),
            column_name_title: title_case(&singular(&fk.destination_column)),
        },
        function: ToOneFunction {
            package_name: package_name.to_string(),
            name: title_case(&singular(trim_id_suffix(&fk.source_column))),
            foreign_name: function_name(
                &singular(&fk.destination_table),
                &title_case(&source_table_name),
                &fk.source_column,
                false,
            ),
            varname: camel_case(&singular(&fk.destination_table)),
            receiver: receiver(&table.name),
            one_to_one: false,
            nullable: fk.source_column_nullable,
            local_assignment: assignment(local_column),
            foreign_assignment: assignment(foreign_column),
        },
    })
}

/// A unique reverse relationship is rendered like a foreign key owned by the referenced table.
fn to_one_from_relationship(
    package_name: &str,
    graph: &SchemaGraph,
    table: &Table,
    relationship: &ToManyRelationship,
) -> Result<ToOneDescriptor> {
    let fk = ForeignKey {
        constraint_name: relationship.constraint_name.clone(),
        source_table: relationship.table.clone(),
        source_column: relationship.column.clone(),
        destination_table: relationship.foreign_table.clone(),
        destination_column: relationship.foreign_column.clone(),
        source_column_nullable: relationship.nullable,
        source_column_unique: relationship.unique,
        destination_column_nullable: relationship.foreign_column_nullable,
        destination_column_unique: relationship.foreign_column_unique,
    };

    let mut descriptor = to_one_from_foreign_key(package_name, graph, table, &fk)?;

    let table_singular = singular(&relationship.table);
    descriptor.function.name = title_case(&singular(&relationship.foreign_table));
    descriptor.function.foreign_name = function_name(
        &table_singular,
        &title_case(&table_singular),
        &relationship.foreign_column,
        false,
    );
    descriptor.function.one_to_one = true;

    Ok(descriptor)
}

fn to_many_from_relationship(
    graph: &SchemaGraph,
    table: &Table,
    relationship: &ToManyRelationship,
) -> Result<ToManyDescriptor> {
    let local_column = table.get_column(&relationship.column)?;
    let foreign_column = graph
        .get_table(&relationship.foreign_table)?
        .get_column(&relationship.foreign_column)?;

    let local_singular = singular(&table.name);
    let foreign_singular = singular(&relationship.foreign_table);
    let foreign_plural_title = title_case(&plural(&relationship.foreign_table));

    let foreign_name = match relationship.join_local_column() {
        Some(join_local_column) => title_case(&plural(trim_id_suffix(join_local_column))),
        None => title_case(&singular(trim_id_suffix(&relationship.foreign_column))),
    };

    Ok(ToManyDescriptor {
        relationship: relationship.clone(),
        local_table: ToManyLocalTable {
            name_title: title_case(&local_singular),
            column_name_title: title_case(&relationship.column),
            name_singular: local_singular.clone(),
        },
        foreign_table: ToManyForeignTable {
            name_title: title_case(&foreign_singular),
            name_plural_title: foreign_plural_title.clone(),
            name_human_readable: human_readable(&relationship.foreign_table),
            column_name_title: title_case(&relationship.foreign_column),
            slice: format!("{}Slice", title_case(&foreign_singular)),
            name_singular: foreign_singular,
        },
        function: ToManyFunction {
            name: function_name(
                &local_singular,
                &foreign_plural_title,
                &relationship.foreign_column,
                relationship.is_join_table(),
            ),
            foreign_name,
            receiver: receiver(&table.name),
            local_assignment: assignment(local_column),
            foreign_assignment: assignment(foreign_column),
        },
    })
}
