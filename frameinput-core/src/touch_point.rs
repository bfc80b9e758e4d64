use std::f64::consts::FRAC_PI_2;
use std::fmt;

use glam::DVec2;

use crate::element::TouchRecord;

/// Lifecycle stage of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Began => "began",
            Self::Moved => "moved",
            Self::Stationary => "stationary",
            Self::Ended => "ended",
            Self::Canceled => "canceled",
        }
    }

    /// Ended or Canceled: the point is retired on the next update.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

impl fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a touch came from a finger on the surface, a remote surface, or a stylus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TouchType {
    #[default]
    Direct,
    Indirect,
    Stylus,
}

impl TouchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Indirect => "Indirect",
            Self::Stylus => "Stylus",
        }
    }
}

/// One active contact. Records are recycled through a
/// [`TouchPool`](crate::pool::TouchPool), so a record's fields are only
/// meaningful after [`TouchPoint::set`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Radians; 0 is parallel to the surface, π/2 perpendicular.
    pub altitude_angle: f64,
    /// Radians; 0 points along the device x axis.
    pub azimuth_angle: f64,
    /// Position change since the previous event for this contact.
    pub delta_position: DVec2,
    pub finger_id: i32,
    pub maximum_possible_pressure: f64,
    pub phase: TouchPhase,
    /// Client pixel coordinates.
    pub position: DVec2,
    /// 1.0 is an average touch; always 1.0 where pressure is unsupported.
    pub pressure: f64,
    pub radius: DVec2,
    pub touch_type: TouchType,
}

impl Default for TouchPoint {
    fn default() -> Self {
        Self {
            altitude_angle: FRAC_PI_2,
            azimuth_angle: 0.0,
            delta_position: DVec2::ZERO,
            finger_id: 0,
            maximum_possible_pressure: 1.0,
            phase: TouchPhase::Began,
            position: DVec2::ZERO,
            pressure: 1.0,
            radius: DVec2::ZERO,
            touch_type: TouchType::Direct,
        }
    }
}

impl TouchPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a touch record in the given phase.
    pub fn set(&mut self, touch: &TouchRecord, phase: TouchPhase) {
        self.altitude_angle = touch.rotation_angle;
        self.azimuth_angle = touch.rotation_angle;

        let position = DVec2::new(touch.client_x, touch.client_y);
        self.delta_position = match phase {
            TouchPhase::Began | TouchPhase::Stationary => DVec2::ZERO,
            _ => position - self.position,
        };

        self.finger_id = touch.identifier;
        self.phase = phase;
        self.position = position;
        self.pressure = touch.force;
        self.radius = DVec2::new(touch.radius_x, touch.radius_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: i32, x: f64, y: f64) -> TouchRecord {
        TouchRecord {
            identifier,
            client_x: x,
            client_y: y,
            force: 0.5,
            radius_x: 4.0,
            radius_y: 6.0,
            rotation_angle: 0.25,
        }
    }

    #[test]
    fn test_fresh_point_defaults() {
        let point = TouchPoint::new();
        assert_eq!(point.altitude_angle, FRAC_PI_2);
        assert_eq!(point.azimuth_angle, 0.0);
        assert_eq!(point.pressure, 1.0);
        assert_eq!(point.maximum_possible_pressure, 1.0);
        assert_eq!(point.touch_type, TouchType::Direct);
    }

    #[test]
    fn test_began_initializes_fields() {
        let mut point = TouchPoint::new();
        point.set(&record(5, 100.0, 50.0), TouchPhase::Began);
        assert_eq!(point.finger_id, 5);
        assert_eq!(point.phase, TouchPhase::Began);
        assert_eq!(point.position, DVec2::new(100.0, 50.0));
        assert_eq!(point.delta_position, DVec2::ZERO);
        assert_eq!(point.pressure, 0.5);
        assert_eq!(point.radius, DVec2::new(4.0, 6.0));
        assert_eq!(point.altitude_angle, 0.25);
        assert_eq!(point.azimuth_angle, 0.25);
    }

    #[test]
    fn test_moved_delta_uses_previous_position() {
        let mut point = TouchPoint::new();
        point.set(&record(1, 100.0, 50.0), TouchPhase::Began);
        point.set(&record(1, 110.0, 45.0), TouchPhase::Moved);
        assert_eq!(point.delta_position, DVec2::new(10.0, -5.0));
        assert_eq!(point.position, DVec2::new(110.0, 45.0));

        point.set(&record(1, 112.0, 45.0), TouchPhase::Ended);
        assert_eq!(point.delta_position, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_stationary_zeroes_delta() {
        let mut point = TouchPoint::new();
        point.set(&record(1, 0.0, 0.0), TouchPhase::Began);
        point.set(&record(1, 30.0, 30.0), TouchPhase::Stationary);
        assert_eq!(point.delta_position, DVec2::ZERO);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(TouchPhase::Canceled.to_string(), "canceled");
        assert_eq!(TouchPhase::Stationary.as_str(), "stationary");
        assert!(TouchPhase::Ended.is_finished());
        assert!(!TouchPhase::Moved.is_finished());
    }
}
