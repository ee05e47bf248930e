//! Output contracts from the registry tick.
//!
//! Poses are written straight onto bound objects; Outputs only carries the
//! discrete playback signals raised while stepping, tagged with the object
//! they belong to.

use serde::{Deserialize, Serialize};

use crate::ids::ObjectId;

/// Discrete signal raised by a Player during one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// The tick counter reached `tick`, so the keyframe at `index` became current.
    KeyframeReached { index: usize, tick: u32 },
    /// A looping player ran past the last keyframe and restarted.
    Looped,
    /// A non-looping player ran past the last keyframe and went idle.
    Ended,
}

/// One playback event for a given object this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreEvent {
    pub object: ObjectId,
    pub event: PlaybackEvent,
}

/// Outputs returned by Registry::tick_all().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<CoreEvent>,
    /// Registered objects the resolver could not supply this tick.
    #[serde(default)]
    pub unresolved: Vec<ObjectId>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.unresolved.clear();
    }

    #[inline]
    pub fn push_event(&mut self, object: ObjectId, event: PlaybackEvent) {
        self.events.push(CoreEvent { object, event });
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.unresolved.is_empty()
    }

    /// Events raised for one object, in emission order.
    pub fn events_for(&self, object: ObjectId) -> impl Iterator<Item = &PlaybackEvent> {
        self.events
            .iter()
            .filter(move |e| e.object == object)
            .map(|e| &e.event)
    }
}
