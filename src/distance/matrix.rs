//! Dense distance matrix.

use crate::models::{Position, Stop};

/// Euclidean distance between two positions.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::distance::distance;
/// use vrptw_genetic::models::Position;
///
/// let d = distance(&Position::new(35.0, 35.0), &Position::new(41.0, 49.0));
/// assert!((d - 232f64.sqrt()).abs() < 1e-10);
/// ```
pub fn distance(a: &Position, b: &Position) -> f64 {
    a.distance_to(b)
}

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns follow the instance's store order, so the depot occupies
/// the last row.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Position, Stop, TimeWindow};
/// use vrptw_genetic::distance::DistanceMatrix;
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let stops = vec![
///     Stop::new(Position::new(3.0, 4.0), 10.0, tw, 5.0),
///     Stop::depot(Position::new(0.0, 0.0), tw),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops);
/// assert!((dm.get(1, 0) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from stop positions.
    pub fn from_stops(stops: &[Stop]) -> Self {
        let n = stops.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = stops[i].distance_to(&stops[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from store `from` to store `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from store `from` to store `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of stores in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn sample_stops() -> Vec<Stop> {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        vec![
            Stop::new(Position::new(3.0, 4.0), 10.0, tw, 5.0),
            Stop::new(Position::new(0.0, 8.0), 20.0, tw, 5.0),
            Stop::depot(Position::new(0.0, 0.0), tw),
        ]
    }

    #[test]
    fn test_from_stops() {
        let dm = DistanceMatrix::from_stops(&sample_stops());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(2, 0) - 5.0).abs() < 1e-10);
        assert!((dm.get(2, 1) - 8.0).abs() < 1e-10);
        assert!(dm.get(2, 2).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_stops(&sample_stops());
        for i in 0..3 {
            for j in 0..3 {
                assert!((dm.get(i, j) - dm.get(j, i)).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }
}
