use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Whether a listing still has inventory to sell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    InStock,
    SoldOut,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::InStock => write!(f, "InStock"),
            Availability::SoldOut => write!(f, "SoldOut"),
        }
    }
}

impl Availability {
    /// The schema.org enumeration member URL (`https://schema.org/InStock`).
    pub fn schema_url(&self) -> String {
        format!("https://schema.org/{self}")
    }
}

/// Values derived from one listing record for page headers and structured data.
///
/// Recomputed on every render; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetadata {
    pub display_title: String,
    /// Lowercase, deduplicated. Iteration order carries no meaning.
    pub keyword_set: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_amount: Option<f64>,
    pub availability: Availability,
}
