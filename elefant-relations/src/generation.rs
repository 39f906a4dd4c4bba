use crate::descriptors::{assemble_descriptors, TableDescriptors};
use crate::driver::SchemaDriver;
use crate::models::SchemaGraph;
use crate::relationships::infer_relationships;
use crate::schema_builder::introspect;
use crate::{IntrospectionOptions, Result};
use serde::Serialize;
use tracing::{info, instrument};

/// All the data a template layer needs for one run.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct GenerationModel {
    pub schema: SchemaGraph,
    pub tables: Vec<TableDescriptors>,
    /// Inserts can read generated columns back in the same statement.
    pub uses_generated_identity_return: bool,
}

impl GenerationModel {
    pub fn table(&self, name: &str) -> Option<&TableDescriptors> {
        self.tables.iter().find(|t| t.table == name)
    }
}

/// Introspects the schema behind `driver` and resolves every relationship in it.
#[instrument(skip_all)]
pub async fn generate<D: SchemaDriver>(
    driver: &D,
    options: &IntrospectionOptions,
    package_name: &str,
) -> Result<GenerationModel> {
    let schema = introspect(driver, options).await?;
    let relationships = infer_relationships(&schema)?;
    let tables = assemble_descriptors(&schema, &relationships, package_name)?;

    info!(
        tables = tables.len(),
        relationships = relationships
            .iter()
            .map(|r| r.to_one.len() + r.to_many.len())
            .sum::<usize>(),
        "Generated schema model"
    );

    Ok(GenerationModel {
        schema,
        tables,
        uses_generated_identity_return: driver.uses_generated_identity_return(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{init_tracing, FakeTable, InMemoryDriver};
    use crate::{SemanticType, ValueType};
    use std::num::NonZeroUsize;
    use std::time::Duration;

    fn shop() -> Vec<FakeTable> {
        vec![
            FakeTable::new("customers")
                .id()
                .column("name", "text", false)
                .column("email", "character varying", true)
                .delay(Duration::from_millis(15)),
            FakeTable::new("products")
                .id()
                .column("price", "numeric", false)
                .column("picture", "bytea", true),
            FakeTable::new("orders")
                .id()
                .column("customer_id", "integer", false)
                .column("created_at", "timestamp with time zone", false)
                .references("customer_id", "customers", "id")
                .delay(Duration::from_millis(5)),
            FakeTable::new("order_products")
                .column("order_id", "integer", false)
                .column("product_id", "integer", false)
                .references("order_id", "orders", "id")
                .references("product_id", "products", "id"),
            FakeTable::new("audit_log").column("message", "text", true),
        ]
    }

    #[tokio::test]
    async fn generates_the_whole_model() {
        init_tracing();
        let driver = InMemoryDriver::new(shop());

        let model = generate(&driver, &IntrospectionOptions::default(), "models")
            .await
            .unwrap();

        assert!(model.uses_generated_identity_return);
        assert_eq!(model.schema.tables().len(), 5);
        assert_eq!(model.tables.len(), 5);

        let audit_log = model.schema.get_table("audit_log").unwrap();
        assert_eq!(
            audit_log.get_column("message").unwrap().semantic_type,
            SemanticType::Nullable(ValueType::String)
        );
        let audit_descriptors = model.table("audit_log").unwrap();
        assert!(audit_descriptors.to_one.is_empty());
        assert!(audit_descriptors.to_many.is_empty());

        let order_names = model
            .table("orders")
            .unwrap()
            .to_many
            .iter()
            .map(|d| d.function.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order_names, vec!["Products"]);
    }

    #[tokio::test]
    async fn serialized_output_is_identical_between_runs() {
        init_tracing();
        let options = IntrospectionOptions {
            max_parallel: NonZeroUsize::new(4),
            ..Default::default()
        };

        let first = generate(&InMemoryDriver::new(shop()), &options, "models")
            .await
            .unwrap();
        let second = generate(&InMemoryDriver::new(shop()), &options, "models")
            .await
            .unwrap();

        let first = serde_json::to_string_pretty(&first).unwrap();
        let second = serde_json::to_string_pretty(&second).unwrap();

        similar_asserts::assert_eq!(first, second);
    }

    #[tokio::test]
    async fn serializes_semantic_types_as_names() {
        let model = generate(
            &InMemoryDriver::new(shop()),
            &IntrospectionOptions::default(),
            "models",
        )
        .await
        .unwrap();

        let json = serde_json::to_value(&model).unwrap();
        let products = &json["schema"]["tables"][1];

        assert_eq!(products["name"], "products");
        assert_eq!(products["columns"][1]["semantic_type"], "float64");
        assert_eq!(products["columns"][2]["semantic_type"], "null.Bytes");
    }
}
