use serde::{Deserialize, Serialize};

use crate::view::ViewModel;

/// Observable state of one load cycle.
///
/// A cycle starts in `Loading` and ends in exactly one of `Error`, `Empty` or
/// `Ready`. Terminal states are never left; a reload builds a new state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Loading,
    /// Load or parse failure, carrying a user-facing message.
    Error { message: String },
    /// Loaded successfully but no procedures were found.
    Empty,
    Ready(ViewModel),
}

impl LoadState {
    /// Terminal state for a successfully shaped view model.
    pub fn from_view_model(view: ViewModel) -> Self {
        if view.is_empty() {
            Self::Empty
        } else {
            Self::Ready(view)
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error { .. } => "error",
            Self::Empty => "empty",
            Self::Ready(_) => "ready",
        }
    }

    pub fn view_model(&self) -> Option<&ViewModel> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }
}
