//! Error types for building expandable widgets.

/// Error type for widget builds.
///
/// Both variants are usage mistakes; they abort the build that hit them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpandableError {
    /// A widget that needs a controller was built outside any
    /// `ExpandableNotifier` and was not handed one explicitly.
    #[error("{widget} needs an enclosing ExpandableNotifier but none was found")]
    MissingProvider { widget: &'static str },

    /// Cross-fade points must lie in `[0, 1]`.
    #[error("cross-fade point must be within [0, 1], got {0}")]
    InvalidCrossFadePoint(f32),
}

/// Result alias used throughout the crate.
pub type Result<T, E = ExpandableError> = std::result::Result<T, E>;
