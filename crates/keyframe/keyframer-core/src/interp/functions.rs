//! Interpolation helpers:
//! - lerp_f32 / lerp_vec2 / lerp_vec4 (component-wise)
//! - apply_linear (per-channel pose blend with skip-unchanged writes)

use crate::binding::Animatable;
use crate::data::Pose;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

/// Blend `from` toward `to` by `t` and write the result onto `object`.
///
/// Channels are grouped as position, size, rotation and color. A group whose
/// endpoints are identical is left untouched so that hosts (or a sprite
/// sub-animation) can drive it independently between keyframes. Returns the
/// number of groups written.
pub fn apply_linear(from: &Pose, to: &Pose, t: f32, object: &mut dyn Animatable) -> usize {
    let mut written = 0;

    if from.x != to.x || from.y != to.y {
        let [x, y] = lerp_vec2([from.x, from.y], [to.x, to.y], t);
        object.set_x(x);
        object.set_y(y);
        written += 1;
    }

    if from.width != to.width || from.height != to.height {
        let [w, h] = lerp_vec2([from.width, from.height], [to.width, to.height], t);
        object.set_width(w);
        object.set_height(h);
        written += 1;
    }

    if from.rotation != to.rotation {
        object.set_rotation_degrees(lerp_f32(from.rotation, to.rotation, t));
        written += 1;
    }

    if from.color != to.color {
        object.set_color(lerp_vec4(from.color, to.color, t));
        written += 1;
    }

    written
}
