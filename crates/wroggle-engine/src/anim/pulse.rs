/// A scalar bouncing between 0 and 1 by a fixed step per frame.
///
/// The bounds are checked before stepping, so the value overshoots by at most
/// one step on either side (`[-step, 1 + step]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorPulse {
    value: f32,
    increment: f32,
    step: f32,
}

impl ColorPulse {
    pub const DEFAULT_START: f32 = 0.8;
    pub const DEFAULT_STEP: f32 = 0.05;

    pub fn new(start: f32, step: f32) -> Self {
        debug_assert!(step > 0.0);
        Self {
            value: start,
            increment: step,
            step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Returns the value for this frame, then advances.
    pub fn step(&mut self) -> f32 {
        let current = self.value;

        if self.value > 1.0 {
            self.increment = -self.step;
        } else if self.value < 0.0 {
            self.increment = self.step;
        }
        self.value += self.increment;

        current
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START, Self::DEFAULT_STEP)
    }
}
