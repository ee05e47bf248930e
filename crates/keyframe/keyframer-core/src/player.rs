//! Player: the per-object playback state machine.
//!
//! A Player is bound to one Timeline of its owning TimelineSet (by index) and
//! keeps a cursor `(current, next)` bracketing its tick counter. Every update
//! advances the counter by one tick, blends the bracketing poses onto the
//! bound object and then moves the cursor forward once the next keyframe has
//! been reached.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::binding::Animatable;
use crate::interp::functions::apply_linear;
use crate::interp::Interpolation;
use crate::outputs::PlaybackEvent;
use crate::timeline::Timeline;

/// Playback state of a Player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing bound, or playback paused/ended
    #[default]
    Idle,
    /// Advancing ticks and interpolating
    Playing,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Player {
    state: PlaybackState,
    looping: bool,
    tick: u32,
    /// Index of the bound timeline inside the owning set.
    timeline: Option<usize>,
    current: usize,
    next: Option<usize>,
    /// Timeline revision the cursor was computed against.
    revision: u64,
    /// Registered with sprite-sheet sub-animation state.
    sub_animated: bool,
}

impl Player {
    pub fn new(sub_animated: bool) -> Self {
        Self {
            sub_animated,
            ..Self::default()
        }
    }

    /// Bind `timeline` (stored at `index` in the owning set) and play it from
    /// its first keyframe. An empty timeline is bound but leaves the player idle.
    pub fn start(&mut self, index: usize, timeline: &Timeline, looping: bool) {
        self.timeline = Some(index);
        self.looping = looping;
        if timeline.is_empty() {
            self.state = PlaybackState::Idle;
            debug!("timeline {index} is empty; player stays idle");
            return;
        }
        self.rewind(timeline);
        self.state = PlaybackState::Playing;
        debug!(
            "playing timeline {index} ({} keyframes, looping: {looping})",
            timeline.len()
        );
    }

    /// Stop advancing. Also clears the loop flag; calling it while idle is harmless.
    pub fn pause(&mut self) {
        if self.state.is_playing() {
            debug!("paused at tick {}", self.tick);
        }
        self.state = PlaybackState::Idle;
        self.looping = false;
    }

    /// Advance playback by one tick.
    ///
    /// `timelines` is the owning set's list; the bound timeline is looked up by
    /// index. When `custom` is supplied it receives full control and the
    /// default linear playback is skipped.
    pub fn update(
        &mut self,
        timelines: &[Timeline],
        object: &mut dyn Animatable,
        custom: Option<&mut Interpolation>,
    ) -> Option<PlaybackEvent> {
        let timeline = self.timeline.and_then(|i| timelines.get(i));

        if let Some(custom) = custom {
            custom.apply(timeline, object);
            return None;
        }

        if !self.state.is_playing() {
            return None;
        }
        let Some(timeline) = timeline else {
            // Bound slot vanished; nothing left to play.
            self.state = PlaybackState::Idle;
            return None;
        };
        if timeline.is_empty() {
            return None;
        }
        if timeline.revision() != self.revision {
            self.resync(timeline);
        }

        let bracket = timeline
            .get(self.current)
            .zip(self.next.and_then(|n| timeline.get(n).map(|k| (n, k))));
        let Some((current, (next_index, next))) = bracket else {
            return self.finish(timeline, object);
        };

        self.tick = self.tick.saturating_add(1);
        // Ticks are strictly increasing within a timeline, so the span is > 0.
        let span = next.tick().saturating_sub(current.tick()).max(1);
        let dt = (self.tick as f32 - current.tick() as f32) / span as f32;

        apply_linear(current.pose(), next.pose(), dt, object);
        if self.sub_animated || current.kind().is_sprite() {
            object.refresh_sub_animation();
        }

        if self.tick >= next.tick() {
            self.current = next_index;
            self.next = timeline.next_index(next_index);
            trace!("reached keyframe {next_index} at tick {}", next.tick());
            return Some(PlaybackEvent::KeyframeReached {
                index: next_index,
                tick: next.tick(),
            });
        }
        None
    }

    /// Past the last keyframe: restart when looping, otherwise go idle.
    fn finish(
        &mut self,
        timeline: &Timeline,
        object: &mut dyn Animatable,
    ) -> Option<PlaybackEvent> {
        if !self.looping {
            debug!("playback ended at tick {}", self.tick);
            self.pause();
            return Some(PlaybackEvent::Ended);
        }

        self.rewind(timeline);
        if let Some(first) = timeline.first() {
            first.pose().apply(object);
            if self.sub_animated || first.kind().is_sprite() {
                object.refresh_sub_animation();
            }
        }
        debug!("looping back to tick {}", self.tick);
        Some(PlaybackEvent::Looped)
    }

    fn rewind(&mut self, timeline: &Timeline) {
        self.tick = timeline.first().map_or(0, |k| k.tick());
        self.current = 0;
        self.next = timeline.next_index(0);
        self.revision = timeline.revision();
    }

    /// Recompute the cursor after the bound timeline was edited mid-playback.
    fn resync(&mut self, timeline: &Timeline) {
        if let Some(first) = timeline.first() {
            self.tick = self.tick.max(first.tick());
        }
        if let Some((current, next)) = timeline.interval_at(self.tick) {
            self.current = current;
            self.next = next;
        }
        self.revision = timeline.revision();
        trace!(
            "timeline edited; cursor moved to {} at tick {}",
            self.current,
            self.tick
        );
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Index (in the owning set) of the timeline bound by the last `start`.
    #[inline]
    pub fn timeline_index(&self) -> Option<usize> {
        self.timeline
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn next_index(&self) -> Option<usize> {
        self.next
    }
}
