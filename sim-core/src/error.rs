use crate::types::MarkerId;

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A marker id did not refer to a live marker.
    #[error("marker {id} not found in field")]
    NotFound {
        /// The stale or out-of-range id.
        id: MarkerId,
    },

    /// A random choice was attempted over zero candidates.
    #[error("random choice over an empty candidate set")]
    EmptyCandidateSet,

    /// The configuration cannot drive a simulation.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
