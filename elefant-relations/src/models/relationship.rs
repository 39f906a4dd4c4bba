use serde::Serialize;

/// Routing information for a many-to-many relationship that goes through a join table.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct JoinTableRoute {
    pub table: String,
    /// The join table's column pointing at the local table.
    pub local_column: String,
    /// The join table's column pointing at the foreign table.
    pub foreign_column: String,
}

/// The side of a foreign key seen from the table being referenced.
///
/// `table`/`column` is the referenced (local) side, `foreign_table`/`foreign_column` the
/// referencing side. For join tables, the foreign side is the table on the other end of
/// the join table instead.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct ToManyRelationship {
    /// The foreign key constraint this relationship was derived from.
    pub constraint_name: String,

    pub table: String,
    pub column: String,
    pub nullable: bool,
    pub unique: bool,

    pub foreign_table: String,
    pub foreign_column: String,
    pub foreign_column_nullable: bool,
    pub foreign_column_unique: bool,

    pub join: Option<JoinTableRoute>,
}

impl ToManyRelationship {
    pub fn is_join_table(&self) -> bool {
        self.join.is_some()
    }

    pub fn join_local_column(&self) -> Option<&str> {
        self.join.as_ref().map(|j| j.local_column.as_str())
    }

    /// The referencing column is unique, so each row has at most one related row.
    pub fn is_one_to_one(&self) -> bool {
        !self.is_join_table() && self.foreign_column_unique
    }
}
