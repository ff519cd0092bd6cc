//! Linear interpolation of control parameters across a rendering block.
//!
//! Parameters arrive once per block. Jumping to the new value on the first sample of the block
//! produces an audible click, so the value is ramped linearly from the previously committed
//! value to the new one over the length of the block.

/// Interpolator keeping a mutable reference to the committed value.
///
/// Each call to [`next`](Self::next) returns the value for the next sample. The value of the
/// last consumed step is written back to the committed state when the interpolator is dropped,
/// so it becomes the starting point for the next block.
#[derive(Debug)]
pub struct ParameterInterpolator<'a> {
    state: &'a mut f32,
    start: f32,
    target: f32,
    increment: f32,
    size: usize,
    index: usize,
    value: f32,
}

impl<'a> ParameterInterpolator<'a> {
    pub fn new(state: &'a mut f32, new_value: f32, size: usize) -> Self {
        let v = *state;
        Self {
            state,
            start: v,
            target: new_value,
            increment: step(v, new_value, size),
            size,
            index: 0,
            value: v,
        }
    }

    /// Returns the value for the next sample. After `size` calls the target is returned
    /// exactly and the value stops moving.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        if self.index < self.size {
            self.index += 1;
            self.value = if self.index == self.size {
                self.target
            } else {
                self.start + self.increment * self.index as f32
            };
        }
        self.value
    }

    /// Number of steps not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.size - self.index
    }
}

impl Drop for ParameterInterpolator<'_> {
    fn drop(&mut self) {
        *self.state = self.value;
    }
}

#[inline]
fn step(value: f32, new_value: f32, size: usize) -> f32 {
    if size == 0 {
        0.0
    } else {
        (new_value - value) / (size as f32)
    }
}
