use glam::IVec2;

/// A point on the board, in board units.
///
/// Lattice-adjacent points are one configured step apart; random
/// relocations may produce points off that lattice.
pub type Position = IVec2;

/// Identifier for a marker in a [`crate::field::MarkerField`].
///
/// This is an index into the field's insertion-ordered storage, and is
/// only meaningful until the next removal from that field.
pub type MarkerId = usize;
