//! Suffix Model

use serde::{Deserialize, Serialize};

/// Name suffix (Jr., Sr., III, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Suffix {
    pub id: i64,
    pub sfx_name: String,
}

impl Suffix {
    /// The "None" entry carries no text on the card or in exports
    pub fn display(&self) -> Option<&str> {
        match self.sfx_name.as_str() {
            "" | "None" => None,
            name => Some(name),
        }
    }
}
