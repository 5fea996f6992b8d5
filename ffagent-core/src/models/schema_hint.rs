use serde::{Deserialize, Serialize};

/// A table/column description surfaced as generation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaHint {
    pub table_name: String,
    /// `None` for table-level hints.
    pub column_name: Option<String>,
    pub description: String,
}

impl SchemaHint {
    pub fn table(table_name: &str, description: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            column_name: None,
            description: description.to_string(),
        }
    }

    pub fn column(table_name: &str, column_name: &str, description: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            column_name: Some(column_name.to_string()),
            description: description.to_string(),
        }
    }
}
