use serde::{Deserialize, Serialize};

/// A performer, writer, or director as embedded in a title document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(rename = "name")]
    pub full_name: String,
}
