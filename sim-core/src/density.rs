//! Density heuristics over a [`MarkerField`].
//!
//! Every scan walks the field in insertion order and keeps the first
//! marker that strictly beats the running best, so ties resolve to the
//! earliest inserted marker.

use crate::{
    field::MarkerField,
    geometry::NeighborGeometry,
    types::{MarkerId, Position},
};

/// Neighbour-count queries used by the prune phase.
#[derive(Clone, Copy, Debug)]
pub struct DensityAnalyzer {
    geometry: NeighborGeometry,
}

impl DensityAnalyzer {
    pub fn new(geometry: NeighborGeometry) -> Self {
        Self { geometry }
    }

    /// Number of markers cardinally adjacent to marker `target`.
    ///
    /// The target itself is excluded by id, so a second marker sitting on
    /// the same coordinates is still considered. Returns 0 for a stale id.
    pub fn neighbor_count_of(&self, target: MarkerId, field: &MarkerField) -> usize {
        let Some(pos) = field.get(target) else {
            return 0;
        };
        field
            .all()
            .iter()
            .enumerate()
            .filter(|&(id, m)| id != target && self.geometry.is_adjacent(*m, pos))
            .count()
    }

    /// Among markers adjacent to `anchor`, the one with the most neighbours.
    ///
    /// ### Returns
    /// `None` if no marker is adjacent to `anchor`.
    pub fn dense_neighbor_of(&self, anchor: Position, field: &MarkerField) -> Option<MarkerId> {
        let mut best = None;
        let mut best_count = 0;
        for (id, m) in field.all().iter().enumerate() {
            if !self.geometry.is_adjacent(*m, anchor) {
                continue;
            }
            let count = self.neighbor_count_of(id, field);
            if best.is_none() || count > best_count {
                best_count = count;
                best = Some(id);
            }
        }
        best
    }

    /// Euclidean-nearest marker to `anchor`, skipping markers that sit
    /// exactly on `anchor`.
    ///
    /// ### Returns
    /// `None` if no other marker exists.
    pub fn closest_to(&self, anchor: Position, field: &MarkerField) -> Option<MarkerId> {
        let mut best = None;
        let mut best_d2 = i64::MAX;
        for (id, m) in field.all().iter().enumerate() {
            if *m == anchor {
                continue;
            }
            let d = (*m - anchor).as_i64vec2();
            let d2 = d.length_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some(id);
            }
        }
        best
    }

    /// Marker with the globally smallest neighbour count.
    ///
    /// ### Returns
    /// `None` if the field is empty.
    pub fn sparsest_of(&self, field: &MarkerField) -> Option<MarkerId> {
        let mut best = None;
        let mut best_count = usize::MAX;
        for id in 0..field.count() {
            let count = self.neighbor_count_of(id, field);
            if count < best_count {
                best_count = count;
                best = Some(id);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn analyzer() -> DensityAnalyzer {
        DensityAnalyzer::new(NeighborGeometry::new(10))
    }

    #[test]
    fn neighbor_count_ignores_diagonals_and_self() {
        let field = MarkerField::from_positions(vec![
            IVec2::new(50, 50),
            IVec2::new(60, 50),
            IVec2::new(50, 40),
            IVec2::new(60, 60), // diagonal
        ]);
        assert_eq!(analyzer().neighbor_count_of(0, &field), 2);
        assert_eq!(analyzer().neighbor_count_of(3, &field), 1);
    }

    #[test]
    fn neighbor_count_excludes_by_id_not_coordinates() {
        // Two markers on one coordinate are not adjacent to each other,
        // but both see the third.
        let field = MarkerField::from_positions(vec![
            IVec2::new(50, 50),
            IVec2::new(50, 50),
            IVec2::new(60, 50),
        ]);
        assert_eq!(analyzer().neighbor_count_of(0, &field), 1);
        assert_eq!(analyzer().neighbor_count_of(2, &field), 2);
    }

    #[test]
    fn dense_neighbor_picks_highest_count() {
        let cursor = IVec2::new(100, 100);
        let field = MarkerField::from_positions(vec![
            IVec2::new(110, 100), // adjacent, 0 neighbours
            IVec2::new(90, 100),  // adjacent, 1 neighbour
            IVec2::new(80, 100),
        ]);
        assert_eq!(analyzer().dense_neighbor_of(cursor, &field), Some(1));
    }

    #[test]
    fn dense_neighbor_tie_keeps_first_inserted() {
        let cursor = IVec2::new(100, 100);
        let field = MarkerField::from_positions(vec![
            IVec2::new(100, 90),
            IVec2::new(100, 110),
        ]);
        assert_eq!(analyzer().dense_neighbor_of(cursor, &field), Some(0));
    }

    #[test]
    fn dense_neighbor_is_none_without_adjacent_marker() {
        let cursor = IVec2::new(100, 100);
        let field = MarkerField::from_positions(vec![IVec2::new(110, 110)]);
        assert_eq!(analyzer().dense_neighbor_of(cursor, &field), None);
        assert_eq!(analyzer().dense_neighbor_of(cursor, &MarkerField::new()), None);
    }

    #[test]
    fn closest_skips_marker_on_anchor_and_keeps_first_tie() {
        let anchor = IVec2::new(0, 0);
        let field = MarkerField::from_positions(vec![
            IVec2::new(0, 0),
            IVec2::new(30, 0),
            IVec2::new(0, 30),
            IVec2::new(50, 50),
        ]);
        assert_eq!(analyzer().closest_to(anchor, &field), Some(1));
    }

    #[test]
    fn closest_on_empty_field_is_none() {
        assert_eq!(analyzer().closest_to(IVec2::ZERO, &MarkerField::new()), None);
    }

    #[test]
    fn sparsest_prefers_isolated_marker() {
        let field = MarkerField::from_positions(vec![
            IVec2::new(10, 10),
            IVec2::new(20, 10),
            IVec2::new(500, 500),
            IVec2::new(700, 700),
        ]);
        assert_eq!(analyzer().sparsest_of(&field), Some(2));
        assert_eq!(analyzer().sparsest_of(&MarkerField::new()), None);
    }
}
