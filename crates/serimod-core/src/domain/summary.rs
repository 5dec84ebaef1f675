//! RegistrySummary - registry の中身を serde で出力するためのビュー

use serde::{Deserialize, Serialize};

/// Serializable view of what a built registry contains.
///
/// Names are serial names, sorted so that two summaries of equal registries
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contextual: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<ScopeSummary>,
}

/// One polymorphic scope: the base type and its registered discriminators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSummary {
    pub base: String,
    pub discriminators: Vec<String>,
}

impl RegistrySummary {
    pub fn is_empty(&self) -> bool {
        self.contextual.is_empty() && self.scopes.is_empty()
    }
}
