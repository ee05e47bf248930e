//! Keyframer Core
//!
//! Records poses (position, size, rotation, color) of 2D scene objects at
//! tick offsets and plays them back with per-tick interpolation. The host owns
//! its objects and drives [`Registry::tick_all`] once per frame.

pub mod binding;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod player;
pub mod registry;
pub mod timeline;
pub mod timeline_set;

// Re-exports for consumers (hosts)
pub use binding::{Animatable, ObjectResolver};
pub use config::Config;
pub use data::{Keyframe, KeyframeKind, Pose};
pub use error::{KeyframeError, Result};
pub use ids::{IdAllocator, ObjectId};
pub use interp::{Interpolation, Interpolator};
pub use outputs::{CoreEvent, Outputs, PlaybackEvent};
pub use player::{PlaybackState, Player};
pub use registry::Registry;
pub use timeline::Timeline;
pub use timeline_set::TimelineSet;
