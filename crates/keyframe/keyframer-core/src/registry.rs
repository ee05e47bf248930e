//! Registry: the per-tick entry point mapping bound objects to their
//! TimelineSet.
//!
//! Methods:
//! - register / register_as / unregister
//! - new_timeline (implicit registration), lookups by ObjectId
//! - play / pause per object, play_all / pause_all / tick_all for every object

use hashbrown::HashMap;
use log::{debug, warn};

use crate::binding::{Animatable, ObjectResolver};
use crate::config::Config;
use crate::error::{KeyframeError, Result};
use crate::ids::{IdAllocator, ObjectId};
use crate::interp::Interpolator;
use crate::outputs::{Outputs, PlaybackEvent};
use crate::timeline::Timeline;
use crate::timeline_set::TimelineSet;

#[derive(Debug, Default)]
pub struct Registry {
    cfg: Config,
    ids: IdAllocator,
    sets: HashMap<ObjectId, TimelineSet>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Registry {
    /// Create a new registry whose timelines use `cfg`.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Register `object` under a freshly issued id. Issued ids never replace a
    /// live entry, even after the allocator wraps.
    pub fn register(&mut self, object: &dyn Animatable) -> ObjectId {
        let mut id = self.ids.alloc_object();
        while self.sets.contains_key(&id) {
            id = self.ids.alloc_object();
        }
        self.register_as(id, object);
        id
    }

    /// Register `object` under `id`, replacing (and thereby resetting) any
    /// existing entry. Returns `true` when an entry was replaced.
    pub fn register_as(&mut self, id: ObjectId, object: &dyn Animatable) -> bool {
        self.ids.observe(id);
        let sub_animated = object.has_sub_animation();
        let set = TimelineSet::new(id, sub_animated, self.cfg);
        let replaced = self.sets.insert(id, set).is_some();
        debug!(
            "{} {id} (sub-animation: {sub_animated})",
            if replaced { "re-registered" } else { "registered" }
        );
        replaced
    }

    /// Remove an object and everything recorded for it.
    pub fn unregister(&mut self, id: ObjectId) -> Option<TimelineSet> {
        self.sets.remove(&id)
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.sets.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Registered ids in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.sets.keys().copied()
    }

    #[inline]
    pub fn set(&self, id: ObjectId) -> Option<&TimelineSet> {
        self.sets.get(&id)
    }

    #[inline]
    pub fn set_mut(&mut self, id: ObjectId) -> Option<&mut TimelineSet> {
        self.sets.get_mut(&id)
    }

    fn require(&mut self, id: ObjectId) -> Result<&mut TimelineSet> {
        self.sets
            .get_mut(&id)
            .ok_or(KeyframeError::NotRegistered { object: id })
    }

    /// Append an empty timeline for `id`, registering `object` under `id`
    /// first if needed. The returned timeline is ready for `insert`.
    pub fn new_timeline(&mut self, id: ObjectId, object: &dyn Animatable) -> &mut Timeline {
        if !self.sets.contains_key(&id) {
            self.ids.observe(id);
            debug!("implicitly registering {id}");
        }
        let cfg = self.cfg;
        self.sets
            .entry(id)
            .or_insert_with(|| TimelineSet::new(id, object.has_sub_animation(), cfg))
            .new_timeline()
    }

    /// All timelines recorded for `id`.
    pub fn timelines(&self, id: ObjectId) -> Option<&[Timeline]> {
        self.sets.get(&id).map(TimelineSet::timelines)
    }

    pub fn timeline_mut(&mut self, id: ObjectId, index: usize) -> Option<&mut Timeline> {
        self.sets.get_mut(&id)?.timeline_mut(index)
    }

    /// The timeline `play` would use for `id`; `None` if unregistered or
    /// the object has no timelines.
    pub fn active_timeline(&self, id: ObjectId) -> Option<&Timeline> {
        self.sets.get(&id)?.active_timeline()
    }

    pub fn active_timeline_mut(&mut self, id: ObjectId) -> Option<&mut Timeline> {
        self.sets.get_mut(&id)?.active_timeline_mut()
    }

    pub fn active_index(&self, id: ObjectId) -> Option<usize> {
        self.sets.get(&id)?.active_index()
    }

    pub fn timeline_count(&self, id: ObjectId) -> Option<usize> {
        self.sets.get(&id).map(TimelineSet::len)
    }

    /// Select the active timeline for `id` (out-of-range clamps to the last).
    pub fn set_active_timeline(&mut self, id: ObjectId, index: isize) -> Result<usize> {
        self.require(id)?
            .set_active(index)
            .ok_or(KeyframeError::EmptyTimeline)
    }

    pub fn set_interpolation(
        &mut self,
        id: ObjectId,
        params: serde_json::Value,
        interpolator: impl Interpolator + 'static,
    ) -> Result<()> {
        self.require(id)?.set_interpolation(params, interpolator);
        Ok(())
    }

    pub fn clear_interpolation(&mut self, id: ObjectId) -> Result<()> {
        self.require(id)?.clear_interpolation();
        Ok(())
    }

    pub fn play(&mut self, id: ObjectId, looping: bool) -> Result<()> {
        self.require(id)?.play(looping);
        Ok(())
    }

    pub fn pause(&mut self, id: ObjectId) -> Result<()> {
        self.require(id)?.pause();
        Ok(())
    }

    pub fn is_playing(&self, id: ObjectId) -> Option<bool> {
        self.sets.get(&id).map(|s| s.player().is_playing())
    }

    /// Start the active timeline of every registered object.
    pub fn play_all(&mut self, looping: bool) {
        for set in self.sets.values_mut() {
            set.play(looping);
        }
    }

    pub fn pause_all(&mut self) {
        for set in self.sets.values_mut() {
            set.pause();
        }
    }

    /// Advance a single object by one tick.
    pub fn tick(
        &mut self,
        id: ObjectId,
        object: &mut dyn Animatable,
    ) -> Result<Option<PlaybackEvent>> {
        Ok(self.require(id)?.tick(object))
    }

    /// Advance every registered object by one tick, resolving each through
    /// `resolver`. Call once per frame. Objects the resolver cannot supply are
    /// skipped and listed in `Outputs::unresolved`.
    pub fn tick_all(&mut self, resolver: &mut dyn ObjectResolver) -> &Outputs {
        self.outputs.clear();

        for (id, set) in self.sets.iter_mut() {
            let Some(object) = resolver.resolve(*id) else {
                if set.player().is_playing() {
                    warn!("{id} is playing but could not be resolved; skipping tick");
                }
                self.outputs.unresolved.push(*id);
                continue;
            };
            if let Some(event) = set.tick(object) {
                self.outputs.push_event(*id, event);
            }
        }

        &self.outputs
    }
}
