//! Bound-object contract and resolver trait.
//!
//! The core never owns scene objects. Hosts implement [`Animatable`] for their
//! renderables and hand them to the registry each tick through an
//! [`ObjectResolver`] keyed by [`ObjectId`].

use std::hash::BuildHasher;

use crate::ids::ObjectId;

/// Pose accessors the player reads when recording and writes when playing back.
pub trait Animatable {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn rotation_degrees(&self) -> f32;
    /// RGBA, conventionally in [0,1]. Interpolated output is not clamped.
    fn color(&self) -> [f32; 4];

    fn set_x(&mut self, x: f32);
    fn set_y(&mut self, y: f32);
    fn set_width(&mut self, width: f32);
    fn set_height(&mut self, height: f32);
    fn set_rotation_degrees(&mut self, degrees: f32);
    fn set_color(&mut self, color: [f32; 4]);

    /// Whether the object carries sprite-sheet sub-animation state.
    fn has_sub_animation(&self) -> bool {
        false
    }

    /// Advance the sprite-sheet sub-animation by one tick.
    fn refresh_sub_animation(&mut self) {}
}

/// Maps registry ids to live objects for the duration of one tick.
pub trait ObjectResolver {
    fn resolve(&mut self, id: ObjectId) -> Option<&mut dyn Animatable>;
}

impl<A, S> ObjectResolver for hashbrown::HashMap<ObjectId, A, S>
where
    A: Animatable,
    S: BuildHasher,
{
    fn resolve(&mut self, id: ObjectId) -> Option<&mut dyn Animatable> {
        self.get_mut(&id).map(|obj| obj as &mut dyn Animatable)
    }
}

impl<A, S> ObjectResolver for std::collections::HashMap<ObjectId, A, S>
where
    A: Animatable,
    S: BuildHasher,
{
    fn resolve(&mut self, id: ObjectId) -> Option<&mut dyn Animatable> {
        self.get_mut(&id).map(|obj| obj as &mut dyn Animatable)
    }
}

impl<A: Animatable> ObjectResolver for [(ObjectId, A)] {
    fn resolve(&mut self, id: ObjectId) -> Option<&mut dyn Animatable> {
        self.iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, obj)| obj as &mut dyn Animatable)
    }
}

impl<A: Animatable> ObjectResolver for Vec<(ObjectId, A)> {
    fn resolve(&mut self, id: ObjectId) -> Option<&mut dyn Animatable> {
        self.as_mut_slice().resolve(id)
    }
}
