use serde::{Deserialize, Serialize};

use crate::Direction;

/// Swipe threshold floor and ceiling, in CSS pixels.
pub const SWIPE_THRESHOLD_MIN: f64 = 22.0;
pub const SWIPE_THRESHOLD_MAX: f64 = 60.0;
/// Fraction of the rendered tile size a pointer must travel to swipe.
pub const SWIPE_TILE_FRACTION: f64 = 0.22;

/// Distance a pointer must travel before a swipe fires, derived from the
/// rendered tile size so sensitivity tracks zoom and responsive layout.
pub fn swipe_threshold(tile_size: f64) -> f64 {
    (tile_size * SWIPE_TILE_FRACTION).clamp(SWIPE_THRESHOLD_MIN, SWIPE_THRESHOLD_MAX)
}

/// DOM pointer identity (`PointerEvent.pointerId`).
pub type PointerId = i32;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SwipeSession {
    id: PointerId,
    origin_x: f64,
    origin_y: f64,
    fired: bool,
}

/// Turns a stream of pointer samples into at most one `Direction` per
/// gesture. One pointer is tracked at a time; a second pointer going down
/// while a session is active is ignored until the first ends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwipeInterpreter {
    session: Option<SwipeSession>,
    suppress_taps: bool,
}

impl SwipeInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// While set, tile taps must be ignored: the tap that ends a fired
    /// swipe is not a separate activation. The binding clears it with
    /// `release_tap_suppression` on the next event-loop turn.
    pub fn taps_suppressed(&self) -> bool {
        self.suppress_taps
    }

    pub fn release_tap_suppression(&mut self) {
        self.suppress_taps = false;
    }

    pub fn pointer_down(&mut self, id: PointerId, x: f64, y: f64) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(SwipeSession {
            id,
            origin_x: x,
            origin_y: y,
            fired: false,
        });
        self.suppress_taps = false;
    }

    /// Feeds one pointer sample; `threshold` comes from `swipe_threshold`
    /// against the tile size rendered right now. Returns a direction at
    /// most once per session: the dominant displacement axis once either
    /// axis exceeds the threshold.
    pub fn pointer_move(
        &mut self,
        id: PointerId,
        x: f64,
        y: f64,
        threshold: f64,
    ) -> Option<Direction> {
        let session = self.session.as_mut().filter(|session| session.id == id)?;
        if session.fired {
            return None;
        }

        let dx = x - session.origin_x;
        let dy = y - session.origin_y;
        if dx.abs() < threshold && dy.abs() < threshold {
            // below threshold on both axes: no decision yet
            return None;
        }

        session.fired = true;
        self.suppress_taps = true;
        Some(if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }

    /// Ends the session for `id`. Returns `true` when a swipe fired during
    /// this gesture, meaning a tap-suppression release must be scheduled
    /// for the next event-loop turn.
    pub fn pointer_up(&mut self, id: PointerId) -> bool {
        if self.session.map_or(true, |session| session.id != id) {
            return false;
        }
        self.session = None;
        self.suppress_taps
    }

    /// Cancellation clears the session without emitting a direction, even
    /// when the threshold was already crossed.
    pub fn pointer_cancel(&mut self, id: PointerId) {
        if self.session.map_or(true, |session| session.id != id) {
            return;
        }
        self.session = None;
        self.suppress_taps = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_scales_with_tile_size_within_bounds() {
        assert_eq!(swipe_threshold(100.0), 22.0);
        assert_eq!(swipe_threshold(200.0), 44.0);
        assert_eq!(swipe_threshold(50.0), 22.0);
        assert_eq!(swipe_threshold(1000.0), 60.0);
    }

    #[test]
    fn fires_exactly_once_per_gesture() {
        let mut swipes = SwipeInterpreter::new();
        swipes.pointer_down(1, 0.0, 0.0);

        assert_eq!(swipes.pointer_move(1, 5.0, 0.0, 22.0), None);
        assert_eq!(swipes.pointer_move(1, 15.0, 0.0, 22.0), None);
        assert_eq!(
            swipes.pointer_move(1, 30.0, 0.0, 22.0),
            Some(Direction::Right)
        );
        // keeps drifting past the threshold: no further decisions
        for x in [40.0, 80.0, 120.0, -50.0] {
            assert_eq!(swipes.pointer_move(1, x, 0.0, 22.0), None);
        }
        assert!(swipes.pointer_up(1));
        assert!(swipes.taps_suppressed());
        swipes.release_tap_suppression();
        assert!(!swipes.taps_suppressed());
    }

    #[test]
    fn dominant_axis_and_sign_pick_the_direction() {
        let cases = [
            ((40.0, 10.0), Direction::Right),
            ((-40.0, 10.0), Direction::Left),
            ((10.0, 40.0), Direction::Down),
            ((10.0, -40.0), Direction::Up),
            // tie goes to the horizontal axis
            ((30.0, 30.0), Direction::Right),
        ];
        for ((x, y), expected) in cases {
            let mut swipes = SwipeInterpreter::new();
            swipes.pointer_down(1, 0.0, 0.0);
            assert_eq!(swipes.pointer_move(1, x, y, 22.0), Some(expected));
        }
    }

    #[test]
    fn second_pointer_is_ignored_while_one_is_active() {
        let mut swipes = SwipeInterpreter::new();
        swipes.pointer_down(1, 0.0, 0.0);
        swipes.pointer_down(2, 100.0, 100.0);

        assert_eq!(swipes.pointer_move(2, 200.0, 100.0, 22.0), None);
        assert!(!swipes.pointer_up(2));
        assert!(swipes.is_active());
        assert_eq!(
            swipes.pointer_move(1, -30.0, 0.0, 22.0),
            Some(Direction::Left)
        );
    }

    #[test]
    fn cancel_clears_everything_even_after_firing() {
        let mut swipes = SwipeInterpreter::new();
        swipes.pointer_down(1, 0.0, 0.0);
        assert!(swipes.pointer_move(1, 0.0, 50.0, 22.0).is_some());
        swipes.pointer_cancel(1);
        assert!(!swipes.is_active());
        assert!(!swipes.taps_suppressed());
    }

    #[test]
    fn up_without_a_fired_swipe_needs_no_release() {
        let mut swipes = SwipeInterpreter::new();
        swipes.pointer_down(1, 0.0, 0.0);
        assert_eq!(swipes.pointer_move(1, 3.0, 3.0, 22.0), None);
        assert!(!swipes.pointer_up(1));
        assert!(!swipes.is_active());
    }
}
