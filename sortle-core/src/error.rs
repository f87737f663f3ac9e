use thiserror::Error;

/// Errors raised by the puzzle core.
///
/// Only `CatalogLoad` and `NoEligibleGroups` prevent a game from being built;
/// the rest are contained by [`crate::Game`] and never end a session.
#[derive(Debug, Error)]
pub enum SortleError {
    /// The catalog payload could not be fetched or decoded.
    #[error("failed to load problem catalog: {message}")]
    CatalogLoad { message: String },

    /// No group in the catalog passes the eligibility threshold.
    #[error("no {prefix} contest numbered {min_group_number} or above in the catalog")]
    NoEligibleGroups {
        prefix: String,
        min_group_number: u32,
    },

    /// A submission was made while some slots were still empty.
    #[error("{empty} of {total} slots are empty")]
    Incomplete { empty: usize, total: usize },

    /// A drop target that is neither the pool nor an existing slot.
    #[error("invalid drop target '{target}'")]
    InvalidMoveTarget { target: String },

    /// An item id that does not belong to the current puzzle.
    #[error("item '{id}' is not part of this puzzle")]
    UnknownItem { id: String },

    /// The external share surface rejected the request.
    #[error("share failed: {message}")]
    ShareFailure { message: String },
}

impl SortleError {
    pub fn catalog_load(message: impl Into<String>) -> Self {
        SortleError::CatalogLoad {
            message: message.into(),
        }
    }

    pub fn share_failure(message: impl Into<String>) -> Self {
        SortleError::ShareFailure {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SortleError {
    fn from(err: serde_json::Error) -> Self {
        SortleError::catalog_load(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SortleError>;
