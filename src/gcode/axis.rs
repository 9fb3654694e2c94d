use super::types::{Axis, AxisSet, AxisState};

/// Outcome of feeding one X or Y value into the pairing cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanarStep {
    /// First half of a pair, waiting on the other axis
    Awaiting,
    /// Pair completed; displacements along X and Y
    Paired { dx: f64, dy: f64 },
    /// Same axis seen twice without its partner in between
    Repeated,
}

/// Last position, displacement and pairing flag for X, Y and Z
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTracker {
    axes: AxisSet,
}

impl AxisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, axis: Axis) -> &AxisState {
        self.axes.get(axis)
    }

    /// Record a new position for `axis`; returns the absolute displacement.
    pub fn commit(&mut self, axis: Axis, value: f64) -> f64 {
        let state = self.axes.get_mut(axis);
        state.diff = (value - state.last).abs();
        state.last = value;
        state.diff
    }

    /// Commit an X or Y value and advance the pairing cycle.
    pub fn planar(&mut self, axis: Axis, value: f64) -> PlanarStep {
        let Some(opposite) = axis.opposite() else {
            return PlanarStep::Awaiting;
        };
        self.commit(axis, value);

        if self.axes.get(axis).pending {
            return PlanarStep::Repeated;
        }
        if !self.axes.get(opposite).pending {
            self.axes.get_mut(axis).pending = true;
            return PlanarStep::Awaiting;
        }

        self.axes.get_mut(axis).pending = false;
        self.axes.get_mut(opposite).pending = false;
        PlanarStep::Paired {
            dx: self.axes.get(Axis::X).diff,
            dy: self.axes.get(Axis::Y).diff,
        }
    }

    /// Commit a Z value; returns the vertical displacement.
    pub fn vertical(&mut self, value: f64) -> f64 {
        self.commit(Axis::Z, value)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
