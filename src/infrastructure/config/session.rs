//! Test session configuration.

use serde::Deserialize;
use uuid::Uuid;

/// Scope under which a session's breadcrumbs and interactions are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Shared by every step of one scenario. A fresh UUID when unset, so
    /// unrelated runs never collide.
    #[serde(default = "generate_scope")]
    pub scope: String,
}

fn generate_scope() -> String {
    Uuid::new_v4().to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scope: generate_scope(),
        }
    }
}
