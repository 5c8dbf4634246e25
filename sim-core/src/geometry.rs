//! Lattice neighbourhood and adjacency.
//!
//! Two neighbourhoods are in play and they are deliberately different:
//! candidate moves use all 8 lattice steps, while adjacency for density
//! counting only accepts the 4 cardinal ones.

use crate::types::Position;
use glam::IVec2;

/// Unit directions in candidate enumeration order: the four axis-aligned
/// steps, then the four diagonals.
const DIRECTIONS: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
    IVec2::new(1, 1),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
    IVec2::new(-1, -1),
];

/// Neighbour geometry on a square lattice with a fixed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborGeometry {
    step: i32,
}

impl NeighborGeometry {
    pub fn new(step: i32) -> Self {
        Self { step }
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// The 8 candidate offsets, scaled by the step, in fixed order.
    pub fn candidate_offsets(&self) -> [IVec2; 8] {
        DIRECTIONS.map(|d| d * self.step)
    }

    /// `p` shifted by each candidate offset, in the same order as
    /// [`NeighborGeometry::candidate_offsets`].
    pub fn neighbors_of(&self, p: Position) -> [Position; 8] {
        self.candidate_offsets().map(|off| p + off)
    }

    /// Cardinal adjacency: one axis differs by exactly one step and the
    /// other is equal. Diagonal pairs are not adjacent.
    pub fn is_adjacent(&self, a: Position, b: Position) -> bool {
        let d = (a - b).abs();
        (d.x == self.step && d.y == 0) || (d.x == 0 && d.y == self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn candidate_offsets_are_axis_then_diagonal() {
        let g = NeighborGeometry::new(10);
        let offsets = g.candidate_offsets();
        assert_eq!(offsets[0], IVec2::new(10, 0));
        assert_eq!(offsets[1], IVec2::new(-10, 0));
        assert_eq!(offsets[2], IVec2::new(0, 10));
        assert_eq!(offsets[3], IVec2::new(0, -10));
        assert_eq!(offsets[4], IVec2::new(10, 10));
        assert_eq!(offsets[7], IVec2::new(-10, -10));
    }

    #[test]
    fn neighbors_follow_offset_order() {
        let g = NeighborGeometry::new(10);
        let p = IVec2::new(100, 200);
        let n = g.neighbors_of(p);
        for (cand, off) in n.iter().zip(g.candidate_offsets()) {
            assert_eq!(*cand, p + off);
        }
    }

    #[test]
    fn diagonal_is_not_adjacent() {
        let g = NeighborGeometry::new(10);
        let p = IVec2::new(50, 50);
        assert!(g.is_adjacent(p, IVec2::new(60, 50)));
        assert!(g.is_adjacent(p, IVec2::new(50, 40)));
        assert!(!g.is_adjacent(p, IVec2::new(60, 60)));
        assert!(!g.is_adjacent(p, p));
        assert!(!g.is_adjacent(p, IVec2::new(70, 50)));
    }

    proptest! {
        #[test]
        fn adjacency_is_symmetric(
            ax in -1000i32..1000, ay in -1000i32..1000,
            dx in -30i32..30, dy in -30i32..30,
            step in 1i32..20,
        ) {
            let g = NeighborGeometry::new(step);
            let a = IVec2::new(ax, ay);
            let b = IVec2::new(ax + dx, ay + dy);
            prop_assert_eq!(g.is_adjacent(a, b), g.is_adjacent(b, a));
        }

        #[test]
        fn neighbors_are_eight_distinct_points_at_step_or_diagonal(
            x in -1000i32..1000, y in -1000i32..1000, step in 1i32..50,
        ) {
            let g = NeighborGeometry::new(step);
            let p = IVec2::new(x, y);
            let n = g.neighbors_of(p);

            for (i, a) in n.iter().enumerate() {
                for b in &n[i + 1..] {
                    prop_assert_ne!(a, b);
                }
                let d2 = (*a - p).length_squared();
                prop_assert!(d2 == step * step || d2 == 2 * step * step);
            }
        }
    }
}
