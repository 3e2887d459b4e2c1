//! Display order of the move list.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Order in which history entries are listed.
///
/// Purely presentational: it never changes the game itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOrder {
    /// Oldest first.
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Newest first.
    #[serde(alias = "desc")]
    Descending,
}

impl MoveOrder {
    /// Returns the display label for this order.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }

    /// Toggles between `Ascending` and `Descending`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// History indices `0..len` in this order.
    pub fn arrange(self, len: usize) -> Vec<usize> {
        match self {
            Self::Ascending => (0..len).collect(),
            Self::Descending => (0..len).rev().collect(),
        }
    }
}

impl std::str::FromStr for MoveOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown move order '{}' (expected asc or desc)", other)),
        }
    }
}
