use crate::{
    error::SimError,
    types::{MarkerId, Position},
};

/// Insertion-ordered collection of placed markers.
///
/// The field does not reject duplicates on its own; callers filter
/// candidates before calling [`MarkerField::add`].
#[derive(Debug, Default, Clone)]
pub struct MarkerField {
    markers: Vec<Position>,
}

impl MarkerField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { markers: positions }
    }

    /// Exact coordinate membership.
    pub fn contains(&self, p: Position) -> bool {
        self.markers.contains(&p)
    }

    pub fn add(&mut self, p: Position) -> MarkerId {
        let id = self.markers.len();
        self.markers.push(p);
        id
    }

    /// Removes the marker with the given id, keeping the order of the rest.
    ///
    /// Ids of markers inserted after `id` shift down by one.
    ///
    /// ### Errors
    /// Returns [`SimError::NotFound`] if `id` is not a live marker.
    pub fn remove(&mut self, id: MarkerId) -> Result<Position, SimError> {
        if id >= self.markers.len() {
            return Err(SimError::NotFound { id });
        }
        Ok(self.markers.remove(id))
    }

    pub fn get(&self, id: MarkerId) -> Option<Position> {
        self.markers.get(id).copied()
    }

    pub fn count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// All markers in insertion order.
    pub fn all(&self) -> &[Position] {
        &self.markers
    }

    /// Looser occupancy test: true if some marker is closer than `size`
    /// on both axes at once.
    pub fn has_marker_near(&self, p: Position, size: i32) -> bool {
        self.markers.iter().any(|m| {
            let d = (*m - p).abs();
            d.x < size && d.y < size
        })
    }

    /// True if any marker shares the scalar `v` on either axis.
    pub fn touches_scalar(&self, v: i32) -> bool {
        self.markers.iter().any(|m| m.x == v || m.y == v)
    }
}
