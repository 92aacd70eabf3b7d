//! Stop (customer or depot), position and time window types.

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A delivery time window.
///
/// Arriving before `ready` means waiting; finishing service after `due`
/// accrues tardiness.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::TimeWindow;
///
/// let tw = TimeWindow::new(161.0, 171.0).unwrap();
/// assert_eq!(tw.start_of_service(15.0), 161.0);
/// assert_eq!(tw.tardiness(175.0), 4.0);
/// assert_eq!(tw.tardiness(170.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Earliest time service may start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest time service should be finished by.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Time at which service starts when arriving at `arrival` (waits if early).
    pub fn start_of_service(&self, arrival: f64) -> f64 {
        arrival.max(self.ready)
    }

    /// Lateness of `time` past the due date, zero when on time.
    pub fn tardiness(&self, time: f64) -> f64 {
        (time - self.due).max(0.0)
    }
}

/// A store in a routing instance: either a customer or the depot.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Position, Stop, TimeWindow};
///
/// let tw = TimeWindow::new(161.0, 171.0).unwrap();
/// let s = Stop::new(Position::new(41.0, 49.0), 10.0, tw, 10.0);
/// assert_eq!(s.demand(), 10.0);
/// assert_eq!(s.service_time(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    position: Position,
    demand: f64,
    window: TimeWindow,
    service_time: f64,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(position: Position, demand: f64, window: TimeWindow, service_time: f64) -> Self {
        Self {
            position,
            demand,
            window,
            service_time,
        }
    }

    /// Creates a depot: no demand and no service time.
    pub fn depot(position: Position, window: TimeWindow) -> Self {
        Self::new(position, 0.0, window, 0.0)
    }

    /// Location of this stop.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Units to deliver at this stop.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Delivery time window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Time spent servicing this stop.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Euclidean distance to another stop.
    pub fn distance_to(&self, other: &Stop) -> f64 {
        self.position.distance_to(&other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_start_of_service() {
        let tw = window(10.0, 20.0);
        assert_eq!(tw.start_of_service(5.0), 10.0);
        assert_eq!(tw.start_of_service(12.0), 12.0);
    }

    #[test]
    fn test_time_window_tardiness() {
        let tw = window(10.0, 20.0);
        assert_eq!(tw.tardiness(5.0), 0.0);
        assert_eq!(tw.tardiness(20.0), 0.0);
        assert!((tw.tardiness(23.5) - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_depot_has_no_demand() {
        let d = Stop::depot(Position::new(35.0, 35.0), window(0.0, 230.0));
        assert_eq!(d.demand(), 0.0);
        assert_eq!(d.service_time(), 0.0);
        assert_eq!(d.window().due(), 230.0);
    }

    #[test]
    fn test_stop_distance() {
        let a = Stop::depot(Position::new(0.0, 0.0), window(0.0, 1.0));
        let b = Stop::new(Position::new(3.0, 4.0), 1.0, window(0.0, 1.0), 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
