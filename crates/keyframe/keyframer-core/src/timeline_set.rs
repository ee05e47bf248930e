//! TimelineSet: the Player and Timelines owned by one bound object.

use log::debug;

use crate::binding::Animatable;
use crate::config::Config;
use crate::ids::ObjectId;
use crate::interp::{Interpolation, Interpolator};
use crate::outputs::PlaybackEvent;
use crate::player::Player;
use crate::timeline::Timeline;

#[derive(Debug)]
pub struct TimelineSet {
    object: ObjectId,
    config: Config,
    player: Player,
    /// Creation order; index-addressable.
    timelines: Vec<Timeline>,
    /// Valid whenever `timelines` is non-empty.
    active: usize,
    interpolation: Option<Interpolation>,
}

impl TimelineSet {
    pub fn new(object: ObjectId, sub_animated: bool, config: Config) -> Self {
        Self {
            object,
            config,
            player: Player::new(sub_animated),
            timelines: Vec::new(),
            active: 0,
            interpolation: None,
        }
    }

    #[inline]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Append a timeline and return its index. The same content may be added
    /// more than once; each copy is an independent animation.
    pub fn add_timeline(&mut self, timeline: Timeline) -> usize {
        self.timelines.push(timeline);
        self.timelines.len() - 1
    }

    /// Append an empty timeline using this set's configuration.
    pub fn new_timeline(&mut self) -> &mut Timeline {
        let index = self.add_timeline(Timeline::with_config(self.config));
        &mut self.timelines[index]
    }

    /// Select the timeline `play` will use. Out-of-range indices (negative or
    /// past the end) fall back to the last timeline. Returns the index now
    /// active, or `None` when the set has no timelines.
    pub fn set_active(&mut self, index: isize) -> Option<usize> {
        let len = self.timelines.len();
        if len == 0 {
            return None;
        }
        self.active = usize::try_from(index)
            .ok()
            .filter(|i| *i < len)
            .unwrap_or(len - 1);
        Some(self.active)
    }

    /// Install a custom interpolation used on every tick instead of linear playback.
    pub fn set_interpolation(
        &mut self,
        params: serde_json::Value,
        interpolator: impl Interpolator + 'static,
    ) {
        self.interpolation = Some(Interpolation::new(params, interpolator));
    }

    /// Restore linear playback, returning the removed interpolation.
    pub fn clear_interpolation(&mut self) -> Option<Interpolation> {
        self.interpolation.take()
    }

    #[inline]
    pub fn interpolation(&self) -> Option<&Interpolation> {
        self.interpolation.as_ref()
    }

    /// Start the active timeline. Does nothing when the set has no timelines.
    pub fn play(&mut self, looping: bool) {
        match self.timelines.get(self.active) {
            Some(timeline) => self.player.start(self.active, timeline, looping),
            None => debug!("{} has no timelines to play", self.object),
        }
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    /// Advance this object's playback by one tick.
    pub fn tick(&mut self, object: &mut dyn Animatable) -> Option<PlaybackEvent> {
        self.player
            .update(&self.timelines, object, self.interpolation.as_mut())
    }

    #[inline]
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// Mutable view of the timelines; the list itself cannot grow or shrink here.
    #[inline]
    pub fn timelines_mut(&mut self) -> &mut [Timeline] {
        &mut self.timelines
    }

    #[inline]
    pub fn timeline(&self, index: usize) -> Option<&Timeline> {
        self.timelines.get(index)
    }

    #[inline]
    pub fn timeline_mut(&mut self, index: usize) -> Option<&mut Timeline> {
        self.timelines.get_mut(index)
    }

    #[inline]
    pub fn active_timeline(&self) -> Option<&Timeline> {
        self.timelines.get(self.active)
    }

    #[inline]
    pub fn active_timeline_mut(&mut self) -> Option<&mut Timeline> {
        self.timelines.get_mut(self.active)
    }

    /// `None` when there are no timelines.
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        (self.active < self.timelines.len()).then_some(self.active)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    #[inline]
    pub fn has_timelines(&self) -> bool {
        !self.timelines.is_empty()
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
