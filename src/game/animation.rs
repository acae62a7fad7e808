//! Continuous-time interpolation between discrete snake poses
//!
//! Each committed move leaves the snake with a `prev_body` snapshot and a
//! current `body`; this module drives `visual_body` between the two using a
//! difficulty-specific piecewise easing curve. The curve is a three-branch
//! formula whose joins are only approximately continuous; the slight snap at
//! the breakpoints is part of the game feel, not something to smooth away.

use super::state::Snake;

/// Parameters of the piecewise easing curve, per difficulty.
///
/// Quadratic ease-in below `ramp_start`, linear ramp up to `ramp_end`, then a
/// quadratic ease-out to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingParams {
    /// End of the quadratic ease-in branch (t1), in (0, ramp_end)
    pub ramp_start: f32,
    /// End of the linear branch (t2), in (ramp_start, 1)
    pub ramp_end: f32,
    /// Acceleration of the ease-in branch; larger = snappier start
    pub accel: f32,
    /// Height gained over the linear branch
    pub ramp_gain: f32,
}

impl EasingParams {
    /// Map linear progress to perceived motion progress.
    ///
    /// `t` is clamped to [0, 1] before evaluation. Each branch is
    /// non-decreasing; the joins are only approximately continuous.
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        if t < self.ramp_start {
            self.accel * t * t
        } else if t < self.ramp_end {
            let mapped = (t - self.ramp_start) / (self.ramp_end - self.ramp_start);
            let ramp_base = self.accel * self.ramp_start * self.ramp_start;
            ramp_base + mapped * self.ramp_gain
        } else {
            let mapped = (t - self.ramp_end) / (1.0 - self.ramp_end);
            let ramp_top = self.accel * self.ramp_start * self.ramp_start + self.ramp_gain;
            ramp_top + (1.0 - (1.0 - mapped) * (1.0 - mapped)) * (1.0 - ramp_top)
        }
    }
}

impl Snake {
    /// Advance the in-flight animation by `dt` seconds at `speed` progress
    /// units per second.
    ///
    /// Returns true iff the animation just completed or none was in flight.
    /// On completion the visual pose snaps exactly onto the grid, removing
    /// any accumulated floating-point drift.
    pub fn update_animation(&mut self, dt: f32, speed: f32) -> bool {
        if !self.animating {
            return true;
        }

        self.progress += dt * speed;

        if self.progress >= 1.0 {
            self.progress = 0.0;
            self.animating = false;
            self.visual_body = self.body.iter().map(|p| p.to_visual()).collect();
            self.prev_body.clear();
            self.prev_body.extend_from_slice(&self.body);
            return true;
        }

        let eased = self.easing.ease(self.progress);
        self.reconcile_animation_lengths();

        for (i, segment) in self.body.iter().enumerate() {
            let prev = self.prev_body[i];
            self.visual_body[i] = (
                prev.x as f32 + (segment.x - prev.x) as f32 * eased,
                prev.y as f32 + (segment.y - prev.y) as f32 * eased,
            );
        }

        false
    }

    /// Re-match `visual_body` and `prev_body` lengths to `body`.
    ///
    /// Growth and resets can race with an in-flight animation; padding with
    /// the last known element (or truncating) keeps interpolation total, so a
    /// length drift can never become an out-of-range index.
    fn reconcile_animation_lengths(&mut self) {
        while self.visual_body.len() < self.body.len() {
            if self.prev_body.len() < self.body.len() {
                let filler = self
                    .prev_body
                    .last()
                    .copied()
                    .unwrap_or_else(|| *self.body.last().expect("non-empty body"));
                self.prev_body.push(filler);
            }
            let filler = *self.prev_body.last().expect("padded above");
            self.visual_body.push(filler.to_visual());
        }

        while self.visual_body.len() > self.body.len() {
            self.visual_body.pop();
            if self.prev_body.len() > self.body.len() {
                self.prev_body.pop();
            }
        }

        if self.prev_body.len() < self.body.len() {
            let filler = *self.prev_body.last().unwrap_or(&self.body[0]);
            while self.prev_body.len() < self.body.len() {
                self.prev_body.push(filler);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::config::Difficulty;
    use crate::game::state::Position;

    fn medium_easing() -> EasingParams {
        Difficulty::Medium.profile().easing
    }

    fn moving_snake() -> Snake {
        let mut snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        snake.advance();
        snake
    }

    #[test]
    fn test_ease_endpoints() {
        for difficulty in Difficulty::ALL {
            let easing = difficulty.profile().easing;
            assert_eq!(easing.ease(0.0), 0.0);
            assert!((easing.ease(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ease_clamps_input() {
        let easing = medium_easing();
        assert_eq!(easing.ease(-0.5), easing.ease(0.0));
        assert_eq!(easing.ease(1.5), easing.ease(1.0));
    }

    #[test]
    fn test_ease_non_decreasing_within_each_branch() {
        for difficulty in Difficulty::ALL {
            let easing = difficulty.profile().easing;
            let branches = [
                (0.0, easing.ramp_start),
                (easing.ramp_start, easing.ramp_end),
                (easing.ramp_end, 1.0),
            ];

            for (lo, hi) in branches {
                let mut last = f32::MIN;
                for step in 0..=100 {
                    let t = lo + (hi - lo) * (step as f32 / 100.0) * 0.999;
                    let value = easing.ease(t);
                    assert!(
                        value >= last - 1e-6,
                        "easing decreased within branch [{lo}, {hi}) at t={t}"
                    );
                    last = value;
                }
            }
        }
    }

    #[test]
    fn test_idle_animation_is_a_noop() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let visual_before = snake.visual_body.clone();
        assert!(snake.update_animation(0.016, 350.0));
        assert_eq!(snake.visual_body, visual_before);
    }

    #[test]
    fn test_progress_is_monotonic_until_completion() {
        let mut snake = moving_snake();
        let mut last_progress = 0.0;
        let mut completions = 0;

        for _ in 0..100 {
            let done = snake.update_animation(0.016, 4.0);
            if done {
                completions += 1;
                break;
            }
            assert!(snake.progress > last_progress);
            last_progress = snake.progress;
        }

        assert_eq!(completions, 1);
        assert!(!snake.animating);
    }

    #[test]
    fn test_completion_snaps_visual_to_body() {
        let mut snake = moving_snake();
        while !snake.update_animation(0.016, 4.0) {}

        let expected: Vec<(f32, f32)> = snake.body.iter().map(|p| p.to_visual()).collect();
        assert_eq!(snake.visual_body, expected);
        assert_eq!(snake.prev_body, snake.body);
    }

    #[test]
    fn test_midflight_positions_are_between_poses() {
        let mut snake = moving_snake();
        assert!(!snake.update_animation(0.05, 4.0));

        let (head_x, head_y) = snake.visual_body[0];
        // Head moved from (10, 10) toward (11, 10).
        assert!(head_x > 10.0 && head_x < 11.0);
        assert_eq!(head_y, 10.0);
    }

    #[test]
    fn test_length_mismatch_is_reconciled_without_panic() {
        let mut snake = moving_snake();
        // Simulate a growth racing with the animation.
        snake.body.push(Position::new(0, 0));
        assert!(!snake.update_animation(0.01, 4.0));
        assert_eq!(snake.visual_body.len(), snake.body.len());
        assert_eq!(snake.prev_body.len(), snake.body.len());

        // And a shrink.
        snake.body.pop();
        snake.body.pop();
        assert!(!snake.update_animation(0.01, 4.0));
        assert_eq!(snake.visual_body.len(), snake.body.len());
    }

    #[test]
    fn test_growth_segment_animates_in_place() {
        let mut snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        snake.grow();
        snake.advance();
        assert!(!snake.update_animation(0.05, 4.0));

        // The new tail's previous position is its own first-seen cell, so its
        // visual position stays pinned there mid-animation.
        let tail_index = snake.len() - 1;
        let pinned = snake.prev_body[tail_index].to_visual();
        assert_eq!(snake.visual_body[tail_index], pinned);
    }
}
