//! Interpolation strategies.
//!
//! Playback is linear by default. A host may install a custom strategy on a
//! TimelineSet; it then receives full control of every tick.

pub mod functions;

use std::fmt;

use crate::binding::Animatable;
use crate::timeline::Timeline;

/// Caller-supplied replacement for the default linear playback.
pub trait Interpolator {
    /// Called once per tick with the bound timeline (if playback was ever
    /// started), the parameter bundle stored alongside the strategy, and the
    /// bound object.
    fn interpolate(
        &mut self,
        timeline: Option<&Timeline>,
        params: &serde_json::Value,
        object: &mut dyn Animatable,
    );
}

impl<F> Interpolator for F
where
    F: FnMut(Option<&Timeline>, &serde_json::Value, &mut dyn Animatable),
{
    fn interpolate(
        &mut self,
        timeline: Option<&Timeline>,
        params: &serde_json::Value,
        object: &mut dyn Animatable,
    ) {
        self(timeline, params, object)
    }
}

/// A custom interpolator paired with its parameter bundle.
pub struct Interpolation {
    pub params: serde_json::Value,
    func: Box<dyn Interpolator>,
}

impl Interpolation {
    pub fn new(params: serde_json::Value, func: impl Interpolator + 'static) -> Self {
        Self {
            params,
            func: Box::new(func),
        }
    }

    #[inline]
    pub fn apply(&mut self, timeline: Option<&Timeline>, object: &mut dyn Animatable) {
        self.func.interpolate(timeline, &self.params, object);
    }
}

impl fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolation")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
