//! Name transformations shared by all generated identifiers.
//!
//! Everything here is a pure function of its input, so the same schema always produces
//! the same names.

use inflector::Inflector;

const ID_SUFFIX: &str = "_id";

/// Words inflector gets wrong, as (singular, plural). Words that are the same in both forms
/// are listed twice.
const IRREGULAR_WORDS: &[(&str, &str)] = &[
    ("person", "people"),
    ("data", "data"),
    ("media", "media"),
    ("metadata", "metadata"),
    ("information", "information"),
    ("equipment", "equipment"),
];

/// Only the last word of a snake_case name is inflected.
fn inflect_last_word(name: &str, inflect: impl Fn(&str) -> String) -> String {
    match name.rsplit_once('_') {
        Some((prefix, word)) => format!("{prefix}_{}", inflect(word)),
        None => inflect(name),
    }
}

pub(crate) fn singular(name: &str) -> String {
    inflect_last_word(name, |word| {
        match IRREGULAR_WORDS
            .iter()
            .find(|(s, p)| *s == word || *p == word)
        {
            Some((singular, _)) => singular.to_string(),
            None => word.to_singular(),
        }
    })
}

pub(crate) fn plural(name: &str) -> String {
    inflect_last_word(name, |word| {
        match IRREGULAR_WORDS
            .iter()
            .find(|(s, p)| *s == word || *p == word)
        {
            Some((_, plural)) => plural.to_string(),
            None => word.to_plural(),
        }
    })
}

/// `billing_customer` -> `BillingCustomer`
pub(crate) fn title_case(name: &str) -> String {
    name.to_pascal_case()
}

/// `billing_customer` -> `billingCustomer`
pub(crate) fn camel_case(name: &str) -> String {
    name.to_camel_case()
}

pub(crate) fn trim_id_suffix(column_name: &str) -> &str {
    column_name.strip_suffix(ID_SUFFIX).unwrap_or(column_name)
}

pub(crate) fn human_readable(name: &str) -> String {
    name.replace('_', " ")
}

/// The short variable name generated methods use for their receiver: the first
/// character of the table name, lower cased.
pub(crate) fn receiver(table_name: &str) -> String {
    table_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

/// Names the accessor for a relationship.
///
/// When the foreign key column is just the table name with `_id` after it, or the
/// relationship goes through a join table, the accessor is simply named after the
/// foreign table. Otherwise the column name is put in front, so two foreign keys into the
/// same table still get different accessors.
///
/// ```
/// use elefant_relations::function_name;
///
/// assert_eq!(function_name("invoice", "Customers", "customer_id", false), "Customers");
/// assert_eq!(function_name("invoice", "Customers", "billing_customer_id", false), "BillingCustomers");
/// ```
pub fn function_name(
    source_table_singular: &str,
    foreign_table_plural_title: &str,
    foreign_key_column: &str,
    through_join_table: bool,
) -> String {
    let column_name = trim_id_suffix(foreign_key_column);

    if through_join_table || column_name == source_table_singular {
        return foreign_table_plural_title.to_string();
    }

    format!("{}{}", title_case(column_name), foreign_table_plural_title)
}
