//! Timeline: an ordered run of Keyframes keyed by strictly increasing ticks.
//!
//! Keyframes are stored in a sorted `Vec`; "first" and "last" are the ends of
//! that vector and the successor of a keyframe is simply the next index.
//! Every mutation bumps a revision counter so a Player bound to the timeline
//! can notice edits made during playback.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::binding::Animatable;
use crate::config::Config;
use crate::data::Keyframe;
use crate::error::{KeyframeError, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredTimeline")]
pub struct Timeline {
    keyframes: Vec<Keyframe>,
    #[serde(default)]
    config: Config,
    #[serde(skip)]
    revision: u64,
}

/// Serialized form of a Timeline, checked before it becomes one.
#[derive(Deserialize)]
struct StoredTimeline {
    keyframes: Vec<Keyframe>,
    #[serde(default)]
    config: Config,
}

impl TryFrom<StoredTimeline> for Timeline {
    type Error = KeyframeError;

    fn try_from(stored: StoredTimeline) -> Result<Self> {
        let timeline = Self {
            keyframes: stored.keyframes,
            config: stored.config,
            revision: 0,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            keyframes: Vec::new(),
            config,
            revision: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Record `object`'s current pose.
    ///
    /// `seconds` of `None` places the keyframe one default spacing after the
    /// last keyframe (tick 0 on an empty timeline). Returns the tick the
    /// keyframe was stored at.
    pub fn insert(&mut self, object: &dyn Animatable, seconds: Option<f32>) -> Result<u32> {
        let tick = match seconds {
            Some(s) => self.config.seconds_to_ticks(s)?,
            None => self.next_default_tick()?,
        };
        self.insert_at_tick(object, tick)
    }

    /// Record `object`'s current pose at an explicit tick offset.
    pub fn insert_at_tick(&mut self, object: &dyn Animatable, tick: u32) -> Result<u32> {
        self.insert_keyframe(Keyframe::capture(object, tick))
    }

    /// Insert an already captured keyframe, keeping the run sorted.
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) -> Result<u32> {
        let tick = keyframe.tick();
        let at = match self.keyframes.binary_search_by_key(&tick, Keyframe::tick) {
            Ok(_) => return Err(KeyframeError::Collision { tick }),
            Err(at) => at,
        };
        self.keyframes.insert(at, keyframe);
        self.touch();
        trace!("inserted keyframe at tick {tick} (index {at})");
        Ok(tick)
    }

    fn next_default_tick(&self) -> Result<u32> {
        match self.last() {
            None => Ok(0),
            Some(last) => last
                .tick()
                .checked_add(self.config.default_spacing_ticks)
                .ok_or_else(|| KeyframeError::InvalidArgument {
                    reason: "default spacing overflows the tick range".into(),
                }),
        }
    }

    /// Remove a keyframe. `None` removes the most recent (last) keyframe;
    /// explicit seconds are converted to ticks exactly like [`Timeline::insert`].
    pub fn delete_at(&mut self, seconds: Option<f32>) -> Result<Keyframe> {
        let tick = match (seconds, self.last()) {
            (_, None) => return Err(KeyframeError::EmptyTimeline),
            (None, Some(last)) => last.tick(),
            (Some(s), Some(_)) => self.config.seconds_to_ticks(s)?,
        };
        self.delete_at_tick(tick)
    }

    /// Remove the keyframe stored exactly at `tick`.
    pub fn delete_at_tick(&mut self, tick: u32) -> Result<Keyframe> {
        if self.is_empty() {
            return Err(KeyframeError::EmptyTimeline);
        }
        let at = self
            .keyframes
            .binary_search_by_key(&tick, Keyframe::tick)
            .map_err(|_| KeyframeError::KeyframeNotFound { tick })?;
        let removed = self.keyframes.remove(at);
        self.touch();
        trace!("deleted keyframe at tick {tick}");
        Ok(removed)
    }

    /// Drop every keyframe. Fails when there is nothing to clear.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(KeyframeError::EmptyTimeline);
        }
        self.keyframes.clear();
        self.touch();
        Ok(())
    }

    /// Index of the last keyframe whose tick is strictly below `tick`.
    ///
    /// Falls back to the first keyframe when `tick` precedes everything and
    /// lands on the terminal keyframe when `tick` is past the end. `None` only
    /// when the timeline is empty. Query helper for hosts; edits locate their
    /// slot with an exact binary search instead.
    pub fn locate_predecessor(&self, tick: u32) -> Option<usize> {
        if self.keyframes.is_empty() {
            return None;
        }
        let below = self.keyframes.partition_point(|k| k.tick() < tick);
        Some(below.saturating_sub(1))
    }

    /// Bracketing pair `(current, next)` for playback at `tick`: `current` is
    /// the last keyframe at or before `tick` (the first keyframe if `tick`
    /// precedes everything), `next` its successor.
    pub fn interval_at(&self, tick: u32) -> Option<(usize, Option<usize>)> {
        if self.keyframes.is_empty() {
            return None;
        }
        let current = self
            .keyframes
            .partition_point(|k| k.tick() <= tick)
            .saturating_sub(1);
        Some((current, self.next_index(current)))
    }

    /// Successor of the keyframe at `index`, if any.
    #[inline]
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index.checked_add(1)?;
        (next < self.keyframes.len()).then_some(next)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    pub fn keyframe_at_tick(&self, tick: u32) -> Option<&Keyframe> {
        self.keyframes
            .binary_search_by_key(&tick, Keyframe::tick)
            .ok()
            .map(|i| &self.keyframes[i])
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keyframes.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter()
    }

    /// Tick offsets in playback order.
    pub fn ticks(&self) -> Vec<u32> {
        self.keyframes.iter().map(Keyframe::tick).collect()
    }

    /// Span from the first to the last keyframe, in ticks.
    pub fn duration_ticks(&self) -> u32 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.tick().saturating_sub(first.tick()),
            _ => 0,
        }
    }

    /// Check the ordering invariant (strictly ascending, unique ticks) and the
    /// config. Deserialization runs this before handing out a Timeline.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        for pair in self.keyframes.windows(2) {
            if pair[1].tick() <= pair[0].tick() {
                return Err(KeyframeError::InvalidArgument {
                    reason: format!(
                        "keyframe ticks must be strictly ascending ({} then {})",
                        pair[0].tick(),
                        pair[1].tick()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Bumped on every mutation.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

// Revisions are playback bookkeeping, not content.
impl PartialEq for Timeline {
    fn eq(&self, other: &Self) -> bool {
        self.keyframes == other.keyframes && self.config == other.config
    }
}
