//! Double-click synthesis.

use crate::config::InputConfig;
use crate::geometry::Point;

use super::event::MouseButton;

#[derive(Debug, Clone, Copy)]
struct ClickRecord {
    button: MouseButton,
    position: Point,
    timestamp: u64,
}

/// Recognizes the second press of a double click from press timestamps.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    last_click: Option<ClickRecord>,
    double_click_time_ms: u64,
    double_click_distance: f32,
}

impl ClickTracker {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            last_click: None,
            double_click_time_ms: config.double_click_time_ms,
            double_click_distance: config.double_click_distance,
        }
    }

    /// Records a press; returns whether it completes a double click.
    pub fn register_press(&mut self, button: MouseButton, position: Point, timestamp: u64) -> bool {
        let is_double_click = self.last_click.is_some_and(|last| {
            last.button == button
                && timestamp >= last.timestamp
                && timestamp - last.timestamp < self.double_click_time_ms
                && position.distance_to(last.position) < self.double_click_distance
        });

        if is_double_click {
            // A third press starts over rather than forming another pair
            self.last_click = None;
        } else {
            self.last_click = Some(ClickRecord {
                button,
                position,
                timestamp,
            });
        }
        is_double_click
    }

    /// Forgets the last press.
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_within_limits() {
        let mut tracker = ClickTracker::default();
        assert!(!tracker.register_press(MouseButton::Left, Point::new(10.0, 10.0), 1000));
        assert!(tracker.register_press(MouseButton::Left, Point::new(12.0, 10.0), 1200));
    }

    #[test]
    fn test_triple_press_is_not_two_doubles() {
        let mut tracker = ClickTracker::default();
        tracker.register_press(MouseButton::Left, Point::ZERO, 0);
        assert!(tracker.register_press(MouseButton::Left, Point::ZERO, 100));
        assert!(!tracker.register_press(MouseButton::Left, Point::ZERO, 200));
    }

    #[test]
    fn test_too_slow_or_too_far() {
        let mut tracker = ClickTracker::default();
        tracker.register_press(MouseButton::Left, Point::ZERO, 0);
        assert!(!tracker.register_press(MouseButton::Left, Point::ZERO, 600));
        assert!(!tracker.register_press(MouseButton::Left, Point::new(50.0, 0.0), 700));
    }

    #[test]
    fn test_different_button() {
        let mut tracker = ClickTracker::default();
        tracker.register_press(MouseButton::Left, Point::ZERO, 0);
        assert!(!tracker.register_press(MouseButton::Right, Point::ZERO, 50));
    }

    #[test]
    fn test_uses_config() {
        let config = InputConfig {
            double_click_time_ms: 100,
            ..InputConfig::default()
        };
        let mut tracker = ClickTracker::new(&config);
        tracker.register_press(MouseButton::Left, Point::ZERO, 0);
        assert!(!tracker.register_press(MouseButton::Left, Point::ZERO, 150));
    }
}
