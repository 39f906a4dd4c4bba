use serde::Serialize;

/// A single column pair of a foreign key constraint.
///
/// Composite constraints show up as one `ForeignKey` per column, all sharing the same
/// `constraint_name`.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ForeignKey {
    pub constraint_name: String,
    pub source_table: String,
    pub source_column: String,
    pub destination_table: String,
    pub destination_column: String,

    // Filled in from the columns once the whole schema graph is known.
    pub source_column_nullable: bool,
    pub source_column_unique: bool,
    pub destination_column_nullable: bool,
    pub destination_column_unique: bool,
}

impl ForeignKey {
    pub fn is_self_reference(&self) -> bool {
        self.source_table == self.destination_table
    }

    /// A unique source column means at most one row can point at each destination row.
    pub fn is_one_to_one(&self) -> bool {
        self.source_column_unique
    }
}
