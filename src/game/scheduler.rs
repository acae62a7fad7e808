//! Fixed-timestep scheduling
//!
//! Two independent accumulators driven by wall-clock delta time: a capped
//! fixed-step accumulator for input/logic polling, and a per-session move
//! timer that fires discrete snake moves at the difficulty's cadence. Render
//! cadence is neither: the renderer just reads the latest visual pose at its
//! own rate.

/// Fixed logic step, 120 Hz
pub const LOGIC_STEP: f64 = 1.0 / 120.0;

/// Per-frame cap on accumulated time, guarding against runaway catch-up
/// after a stall
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fraction of the move interval the animation should complete within
pub const ANIMATION_COMPLETE_THRESHOLD: f64 = 0.95;

/// Extra speed margin so the animation lands before the next move, not after
pub const ANIMATION_OVERSHOOT_FACTOR: f64 = 1.5;

/// Accumulator that converts variable frame times into fixed logic steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_frame_time: f64,
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            max_frame_time: MAX_FRAME_TIME,
            accumulator: 0.0,
        }
    }

    /// Add one frame's wall-clock time, capped to the spiral-of-death guard
    pub fn accumulate(&mut self, frame_time: f64) {
        self.accumulator += frame_time.min(self.max_frame_time);
    }

    /// Consume one fixed step if enough time has accumulated.
    ///
    /// Drain with `while timestep.try_step() { update(timestep.step_size()) }`;
    /// the remainder carries into the next frame.
    pub fn try_step(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    pub fn step_size(&self) -> f64 {
        self.step
    }

    pub fn pending(&self) -> f64 {
        self.accumulator
    }
}

/// Real-time accumulator for the discrete move cadence
#[derive(Debug, Clone)]
pub struct MoveTimer {
    interval: f64,
    accumulator: f64,
}

impl MoveTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Accumulate one logic step's worth of time
    pub fn advance(&mut self, dt: f64) {
        self.accumulator += dt;
    }

    /// True when enough time has passed for the next discrete move
    pub fn ready(&self) -> bool {
        self.accumulator >= self.interval
    }

    /// Consume the fired interval, keeping the remainder to avoid drift
    pub fn consume(&mut self) {
        self.accumulator %= self.interval;
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Seconds until the next move fires, floored at one millisecond
    pub fn time_until_next(&self) -> f64 {
        (self.interval - self.accumulator).max(0.001)
    }

    /// Animation speed for the current instant.
    ///
    /// Not constant: scaled so the in-flight animation is biased to finish
    /// just before the next discrete move, and ramped up as the move
    /// approaches. Recomputed every logic update.
    pub fn animation_speed(&self, base_speed: f32) -> f32 {
        let completion_target = self.interval * ANIMATION_COMPLETE_THRESHOLD;
        let animation_factor = ANIMATION_OVERSHOOT_FACTOR / completion_target;
        let time_factor =
            1.0 + ((self.interval - self.time_until_next()) / self.interval).max(0.0);

        (base_speed as f64 * animation_factor * time_factor) as f32
    }
}
