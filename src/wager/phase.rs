use serde::Serialize;

/// Lifecycle of a betting session.
/// Forming → Active → Resolved | Cancelled. Nothing leaves a terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Forming,
    Active,
    Resolved,
    Cancelled,
}

impl Phase {
    pub fn is_forming(&self) -> bool {
        matches!(self, Self::Forming)
    }
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forming => write!(f, "Not Started"),
            Self::Active => write!(f, "Started"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}
