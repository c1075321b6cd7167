//! Growable scalar buffer for parsed vertex coordinates

use crate::{Error, Result};
use nalgebra::Vector3;

/// Capacity, in scalars, of a fresh buffer
const INITIAL_CAPACITY: usize = 10;

/// Flat `x, y, z, x, y, z, ...` storage that doubles its capacity whenever
/// an append would overflow it.
#[derive(Debug)]
pub(crate) struct VertexBuffer {
    coords: Vec<f64>,
}

impl VertexBuffer {
    pub(crate) fn new() -> Result<Self> {
        let mut coords = Vec::new();
        coords
            .try_reserve_exact(INITIAL_CAPACITY)
            .map_err(|_| Error::Allocation(INITIAL_CAPACITY))?;
        Ok(Self { coords })
    }

    /// Append one point, growing the storage first if needed
    pub(crate) fn push(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        let needed = self.coords.len() + 3;
        let mut capacity = self.coords.capacity().max(INITIAL_CAPACITY);
        while needed > capacity {
            capacity *= 2;
        }
        if capacity > self.coords.capacity() {
            self.coords
                .try_reserve_exact(capacity - self.coords.len())
                .map_err(|_| Error::Allocation(capacity))?;
        }
        self.coords.extend_from_slice(&[x, y, z]);
        Ok(())
    }

    /// Number of points appended so far
    pub(crate) fn point_count(&self) -> usize {
        self.coords.len() / 3
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.coords.capacity()
    }

    /// Consume the buffer, returning the points
    pub(crate) fn into_points(self) -> Vec<Vector3<f64>> {
        self.coords
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect()
    }
}
