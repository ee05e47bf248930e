//! Recorded pose data: Pose snapshots and the Keyframes that carry them.

use serde::{Deserialize, Serialize};

use crate::binding::Animatable;

/// A captured pose of a bound object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// RGBA
    pub color: [f32; 4],
}

impl Pose {
    /// Snapshot the current pose of `object`.
    pub fn capture(object: &dyn Animatable) -> Self {
        Self {
            x: object.x(),
            y: object.y(),
            width: object.width(),
            height: object.height(),
            rotation: object.rotation_degrees(),
            color: object.color(),
        }
    }

    /// Write every channel of this pose onto `object`.
    pub fn apply(&self, object: &mut dyn Animatable) {
        object.set_x(self.x);
        object.set_y(self.y);
        object.set_width(self.width);
        object.set_height(self.height);
        object.set_rotation_degrees(self.rotation);
        object.set_color(self.color);
    }
}

/// Whether the recorded object had sprite-sheet sub-animation state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyframeKind {
    #[default]
    Plain,
    /// Playback also refreshes the object's sub-animation every tick.
    Sprite,
}

impl KeyframeKind {
    #[inline]
    pub fn of(object: &dyn Animatable) -> Self {
        if object.has_sub_animation() {
            Self::Sprite
        } else {
            Self::Plain
        }
    }

    #[inline]
    pub fn is_sprite(self) -> bool {
        matches!(self, Self::Sprite)
    }
}

/// An immutable pose recorded at a tick offset within a Timeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    tick: u32,
    pose: Pose,
    kind: KeyframeKind,
}

impl Keyframe {
    pub fn new(tick: u32, pose: Pose, kind: KeyframeKind) -> Self {
        Self { tick, pose, kind }
    }

    /// Record `object` at `tick`, tagging sprite-animated objects.
    pub fn capture(object: &dyn Animatable, tick: u32) -> Self {
        Self::new(tick, Pose::capture(object), KeyframeKind::of(object))
    }

    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn kind(&self) -> KeyframeKind {
        self.kind
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pose.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pose.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.pose.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.pose.height
    }

    #[inline]
    pub fn rotation_degrees(&self) -> f32 {
        self.pose.rotation
    }

    #[inline]
    pub fn color(&self) -> [f32; 4] {
        self.pose.color
    }
}
