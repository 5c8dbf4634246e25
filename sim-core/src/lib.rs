//! Core cursor-and-marker grid simulation library.
//!
//! Main components:
//! - [`types`]: positions and marker ids.
//! - [`geometry`]: lattice candidate offsets and cardinal adjacency.
//! - [`field`]: the insertion-ordered marker collection.
//! - [`density`]: nearest, densest and sparsest marker queries.
//! - [`clock`]: day counter and growth/prune phase selection.
//! - [`phases`]: the growth and prune tick rules.
//! - [`engine`]: the engine that owns the state and runs ticks.
//! - [`config`]: board and rule configuration.
//! - [`error`]: error type shared by the crate.

pub mod clock;
pub mod config;
pub mod density;
pub mod engine;
pub mod error;
pub mod field;
pub mod geometry;
pub mod phases;
pub mod types;

pub use clock::Phase;
pub use config::{Config, RelocationPolicy};
pub use engine::{SimulationEngine, Snapshot};
pub use error::SimError;
pub use phases::TickReport;
pub use types::{MarkerId, Position};
