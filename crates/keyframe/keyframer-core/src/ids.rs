//! Identifiers and a simple allocator for bound objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle for an object bound to the registry.
/// Identity is the handle itself, never the object's address or value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Monotonic allocator for ObjectId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_object: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_object(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object = self.next_object.wrapping_add(1);
        id
    }

    /// Record an id chosen by the caller so later allocations never hand it out again.
    #[inline]
    pub fn observe(&mut self, id: ObjectId) {
        if id.0 >= self.next_object {
            self.next_object = id.0.wrapping_add(1);
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
