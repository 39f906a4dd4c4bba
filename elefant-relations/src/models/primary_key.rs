use serde::Serialize;

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize)]
pub struct PrimaryKey {
    pub constraint_name: String,
    /// Column names in key order
    pub columns: Vec<String>,
}

