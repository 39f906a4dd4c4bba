use crate::driver::SchemaDriver;
use crate::models::{Column, SchemaGraph, Table};
use crate::parallel_runner::ParallelRunner;
use crate::{IntrospectionOptions, Result};
use futures::future::try_join_all;
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Reads every table the driver can see into a [`SchemaGraph`].
///
/// Tables are read in parallel, up to `options.max_parallel` at a time, but always end up in
/// the order the driver listed them in. Any failure aborts the whole run, as generating
/// code from a partial schema is not safe.
#[instrument(skip_all)]
pub async fn introspect<D: SchemaDriver>(
    driver: &D,
    options: &IntrospectionOptions,
) -> Result<SchemaGraph> {
    let table_names = driver.table_names(&options.exclude_tables).await?;

    info!(tables = table_names.len(), "Introspecting schema");

    let runner = ParallelRunner::new(options.get_max_parallel_or_1());

    let tables = try_join_all(table_names.iter().map(|table_name| {
        let runner = &runner;
        async move {
            runner
                .run(read_table(driver, table_name))
                .await
                .map_err(|e| e.in_table(table_name))
        }
    }))
    .await?;

    let mut graph = SchemaGraph::new(tables);

    validate_keys(&graph)?;
    link_foreign_keys(&mut graph);

    Ok(graph)
}

#[instrument(skip(driver))]
async fn read_table<D: SchemaDriver>(driver: &D, table_name: &str) -> Result<Table> {
    let columns = driver
        .columns(table_name)
        .await?
        .into_iter()
        .map(|definition| {
            let semantic_type =
                driver.translate_column_type(&definition.native_type, definition.nullable);
            Column::from_definition(definition, semantic_type)
        })
        .collect_vec();

    let primary_key = driver.primary_key(table_name).await?;
    let foreign_keys = driver.foreign_keys(table_name).await?;

    debug!(
        columns = columns.len(),
        has_primary_key = primary_key.is_some(),
        foreign_keys = foreign_keys.len(),
        "Read table"
    );

    Ok(Table {
        name: table_name.to_string(),
        columns,
        primary_key,
        foreign_keys,
    })
}

/// Every key has to point at columns that actually exist in the graph.
fn validate_keys(graph: &SchemaGraph) -> Result {
    for table in graph.tables() {
        if let Some(primary_key) = &table.primary_key {
            for column in &primary_key.columns {
                table.get_column(column)?;
            }
        }

        for fk in &table.foreign_keys {
            table.get_column(&fk.source_column)?;
            graph
                .get_table(&fk.destination_table)?
                .get_column(&fk.destination_column)?;
        }
    }

    Ok(())
}

/// Copies nullability and uniqueness of both ends onto each foreign key.
/// Expects [`validate_keys`] to have passed.
fn link_foreign_keys(graph: &mut SchemaGraph) {
    let flags = graph
        .tables()
        .iter()
        .map(|table| {
            table
                .foreign_keys
                .iter()
                .map(|fk| {
                    let source = table.column(&fk.source_column);
                    let destination = graph
                        .table(&fk.destination_table)
                        .and_then(|t| t.column(&fk.destination_column));

                    (
                        source.is_some_and(|c| c.nullable),
                        source.is_some_and(|c| c.unique),
                        destination.is_some_and(|c| c.nullable),
                        destination.is_some_and(|c| c.unique),
                    )
                })
                .collect_vec()
        })
        .collect_vec();

    for (table, table_flags) in graph.tables_mut().iter_mut().zip(flags) {
        for (fk, (source_nullable, source_unique, destination_nullable, destination_unique)) in
            table.foreign_keys.iter_mut().zip(table_flags)
        {
            fk.source_column_nullable = source_nullable;
            fk.source_column_unique = source_unique;
            fk.destination_column_nullable = destination_nullable;
            fk.destination_column_unique = destination_unique;
        }
    }
}
