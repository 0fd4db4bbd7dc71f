use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in layout-viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// `true` when `self` lies fully inside `outer` shrunk by `margin` on
    /// all sides.
    pub fn contained_in(&self, outer: &Rect, margin: f64) -> bool {
        self.left >= outer.left + margin
            && self.right() <= outer.right() - margin
            && self.top >= outer.top + margin
            && self.bottom() <= outer.bottom() - margin
    }
}

/// Accumulated translation applied to the evading target, relative to its
/// natural (untranslated) layout position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub fn distance_to(&self, other: Offset) -> f64 {
        (other.dx - self.dx).hypot(other.dy - self.dy)
    }
}

/// Jump parameters. The margin is the inset kept between the target and
/// every viewport edge; `attempts` bounds the random candidates tried
/// before falling back to the best one seen.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JumpConfig {
    pub margin: f64,
    pub min_jump: f64,
    pub max_jump: f64,
    pub attempts: u32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            min_jump: 200.0,
            max_jump: 400.0,
            attempts: 24,
        }
    }
}

/// A clamped candidate is accepted once it covers this share of the
/// requested minimum jump.
pub const JUMP_ACCEPT_FRACTION: f64 = 0.9;

/// Collapses an inverted range (viewport smaller than the target plus
/// margins) to its midpoint: best-effort containment wins over the
/// minimum-jump requirement.
fn normalized_range(min: f64, max: f64) -> (f64, f64) {
    if max >= min {
        (min, max)
    } else {
        let mid = (min + max) / 2.0;
        (mid, mid)
    }
}

/// Repositions an on-screen target away from its current spot while
/// keeping it inside the visible viewport. Owns the persistent translation
/// offset; it is never zeroed, only adjusted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvasivePlacer {
    offset: Offset,
}

impl EvasivePlacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Picks a new translation that keeps `rect` inside `viewport` minus
    /// the margin, at a randomized direction and, when the viewport allows
    /// it, at least `min_jump` away from the current position. `rect` is
    /// the target's current bounds, with the stored offset already
    /// applied.
    pub fn jump<R: Rng + ?Sized>(
        &mut self,
        rect: Rect,
        viewport: Rect,
        cfg: JumpConfig,
        rng: &mut R,
    ) -> Offset {
        let Offset { dx, dy } = self.offset;
        // Natural position inferred from the current bounds.
        let base_left = rect.left - dx;
        let base_top = rect.top - dy;

        let (min_dx, max_dx) = normalized_range(
            viewport.left + cfg.margin - base_left,
            viewport.right() - cfg.margin - rect.width - base_left,
        );
        let (min_dy, max_dy) = normalized_range(
            viewport.top + cfg.margin - base_top,
            viewport.bottom() - cfg.margin - rect.height - base_top,
        );

        let mut next = self.offset;
        let mut best = (self.offset, 0.0f64);
        for _ in 0..cfg.attempts {
            let angle = rng.random_range(0.0..core::f64::consts::TAU);
            let magnitude = rng.random_range(cfg.min_jump..=cfg.max_jump);
            let candidate = Offset {
                dx: (dx + (angle.cos() * magnitude).round()).clamp(min_dx, max_dx),
                dy: (dy + (angle.sin() * magnitude).round()).clamp(min_dy, max_dy),
            };
            let distance = self.offset.distance_to(candidate);
            if distance > best.1 {
                best = (candidate, distance);
            }
            // clamping can shorten the jump; accept once it is close enough
            if distance >= cfg.min_jump * JUMP_ACCEPT_FRACTION {
                next = candidate;
                break;
            }
        }
        if next == self.offset && best.1 > 0.0 {
            next = best.0;
        }

        self.offset = next;
        self.offset
    }

    /// Idempotent containment repair for when the viewport or the target
    /// changed under us (resize, on-screen keyboard, zoom): adds exactly
    /// the corrections needed to pull `rect` back inside `viewport` minus
    /// `margin`. Never randomized; a no-op when already contained.
    pub fn nudge_into_view(&mut self, rect: Rect, viewport: Rect, margin: f64) -> Offset {
        let mut dx_adjust = 0.0;
        let mut dy_adjust = 0.0;

        if rect.left < viewport.left + margin {
            dx_adjust += viewport.left + margin - rect.left;
        }
        if rect.right() > viewport.right() - margin {
            dx_adjust -= rect.right() - (viewport.right() - margin);
        }
        if rect.top < viewport.top + margin {
            dy_adjust += viewport.top + margin - rect.top;
        }
        if rect.bottom() > viewport.bottom() - margin {
            dy_adjust -= rect.bottom() - (viewport.bottom() - margin);
        }

        self.offset.dx += dx_adjust;
        self.offset.dy += dy_adjust;
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn cfg() -> JumpConfig {
        JumpConfig::default()
    }

    #[test]
    fn jumps_stay_fully_contained() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut placer = EvasivePlacer::new();
        let base = Rect::new(160.0, 130.0, 80.0, 40.0);

        for _ in 0..100 {
            let Offset { dx, dy } = placer.offset();
            let current = base.translated(dx, dy);
            let Offset { dx, dy } = placer.jump(current, VIEWPORT, cfg(), &mut rng);
            let landed = base.translated(dx, dy);
            assert!(
                landed.left >= 10.0
                    && landed.right() <= 390.0
                    && landed.top >= 10.0
                    && landed.bottom() <= 260.0,
                "escaped the viewport: {landed:?}"
            );
        }
    }

    #[test]
    fn jump_moves_the_target_a_meaningful_distance() {
        // the 400x300 viewport cannot always satisfy min_jump=200, but the
        // best-candidate fallback must still move the target
        let mut rng = SmallRng::seed_from_u64(5);
        let mut placer = EvasivePlacer::new();
        let base = Rect::new(160.0, 130.0, 80.0, 40.0);

        let mut moved = 0;
        for _ in 0..50 {
            let before = placer.offset();
            let Offset { dx, dy } = before;
            let after = placer.jump(base.translated(dx, dy), VIEWPORT, cfg(), &mut rng);
            if before.distance_to(after) >= 50.0 {
                moved += 1;
            }
        }
        // a jump pinned in a corner can come up short, but not routinely
        assert!(moved >= 45, "only {moved}/50 jumps moved the target");
    }

    #[test]
    fn undersized_viewport_collapses_to_midpoint_without_panicking() {
        // viewport smaller than the target plus margins: inverted ranges
        let mut rng = SmallRng::seed_from_u64(9);
        let mut placer = EvasivePlacer::new();
        let rect = Rect::new(0.0, 0.0, 80.0, 40.0);
        let tiny = Rect::new(0.0, 0.0, 60.0, 30.0);

        let offset = placer.jump(rect, tiny, cfg(), &mut rng);
        assert!(offset.dx.is_finite() && offset.dy.is_finite());
        // both ranges collapsed: the offset centers the overflow
        assert_eq!(offset.dx, -10.0);
        assert_eq!(offset.dy, -5.0);
    }

    #[test]
    fn nudge_pulls_violations_back_and_is_idempotent() {
        let mut placer = EvasivePlacer::new();
        // sticking out past the right and bottom edges
        let rect = Rect::new(350.0, 280.0, 80.0, 40.0);

        let offset = placer.nudge_into_view(rect, VIEWPORT, 10.0);
        assert_eq!(offset.dx, -40.0);
        assert_eq!(offset.dy, -30.0);

        let fixed = rect.translated(offset.dx, offset.dy);
        assert!(fixed.contained_in(&VIEWPORT, 10.0));

        // already contained: no further change
        let again = placer.nudge_into_view(fixed, VIEWPORT, 10.0);
        assert_eq!(again, offset);
    }

    #[test]
    fn nudge_is_a_noop_for_contained_rects() {
        let mut placer = EvasivePlacer::new();
        let rect = Rect::new(100.0, 100.0, 80.0, 40.0);
        let offset = placer.nudge_into_view(rect, VIEWPORT, 10.0);
        assert_eq!(offset, Offset::default());
    }
}
