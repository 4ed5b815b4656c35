// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Small value types used by the state and synchronization entry points.

use super::gl;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Memory barrier categories, combinable with bitwise union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MemoryBarrierFlags {
    bits: u32,
}

impl MemoryBarrierFlags {
    /// No barrier.
    pub const NONE: Self = Self { bits: 0 };
    /// Vertex attribute fetches.
    pub const VERTEX_ATTRIBUTE_ARRAY: Self = Self { bits: 1 << 0 };
    /// Index fetches.
    pub const ELEMENT_ARRAY: Self = Self { bits: 1 << 1 };
    /// Uniform buffer reads.
    pub const UNIFORM: Self = Self { bits: 1 << 2 };
    /// Texture fetches.
    pub const TEXTURE_FETCH: Self = Self { bits: 1 << 3 };
    /// Image load/store.
    pub const SHADER_IMAGE_ACCESS: Self = Self { bits: 1 << 4 };
    /// Indirect command reads.
    pub const COMMAND: Self = Self { bits: 1 << 5 };
    /// Pixel buffer transfers.
    pub const PIXEL_BUFFER: Self = Self { bits: 1 << 6 };
    /// Texture uploads and downloads.
    pub const TEXTURE_UPDATE: Self = Self { bits: 1 << 7 };
    /// Buffer uploads and downloads.
    pub const BUFFER_UPDATE: Self = Self { bits: 1 << 8 };
    /// Framebuffer reads and writes.
    pub const FRAME_BUFFER: Self = Self { bits: 1 << 9 };
    /// Transform feedback writes.
    pub const TRANSFORM_FEEDBACK: Self = Self { bits: 1 << 10 };
    /// Atomic counters.
    pub const ATOMIC_COUNTER: Self = Self { bits: 1 << 11 };
    /// Shader storage buffers.
    pub const SHADER_STORAGE: Self = Self { bits: 1 << 12 };
    /// Query buffers.
    pub const QUERY_BUFFER: Self = Self { bits: 1 << 13 };
    /// Every category.
    pub const ALL: Self = Self { bits: u32::MAX };

    const GL_BITS: [(Self, u32); 14] = [
        (Self::VERTEX_ATTRIBUTE_ARRAY, gl::VERTEX_ATTRIB_ARRAY_BARRIER_BIT),
        (Self::ELEMENT_ARRAY, gl::ELEMENT_ARRAY_BARRIER_BIT),
        (Self::UNIFORM, gl::UNIFORM_BARRIER_BIT),
        (Self::TEXTURE_FETCH, gl::TEXTURE_FETCH_BARRIER_BIT),
        (Self::SHADER_IMAGE_ACCESS, gl::SHADER_IMAGE_ACCESS_BARRIER_BIT),
        (Self::COMMAND, gl::COMMAND_BARRIER_BIT),
        (Self::PIXEL_BUFFER, gl::PIXEL_BUFFER_BARRIER_BIT),
        (Self::TEXTURE_UPDATE, gl::TEXTURE_UPDATE_BARRIER_BIT),
        (Self::BUFFER_UPDATE, gl::BUFFER_UPDATE_BARRIER_BIT),
        (Self::FRAME_BUFFER, gl::FRAMEBUFFER_BARRIER_BIT),
        (Self::TRANSFORM_FEEDBACK, gl::TRANSFORM_FEEDBACK_BARRIER_BIT),
        (Self::ATOMIC_COUNTER, gl::ATOMIC_COUNTER_BARRIER_BIT),
        (Self::SHADER_STORAGE, gl::SHADER_STORAGE_BARRIER_BIT),
        (Self::QUERY_BUFFER, gl::QUERY_BUFFER_BARRIER_BIT),
    ];

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether every bit of `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no category is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Translates to the GL barrier bitfield.
    pub fn to_gl(self) -> u32 {
        if self == Self::ALL {
            return gl::ALL_BARRIER_BITS;
        }
        Self::GL_BITS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .fold(0, |acc, (_, bit)| acc | bit)
    }
}

impl std::ops::BitOr for MemoryBarrierFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A live fence object. The native handle is never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncHandle(pub NonZeroU64);

impl SyncHandle {
    /// Wraps a native handle, `None` when the driver returned null.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(SyncHandle)
    }

    /// The native handle.
    pub fn raw(self) -> u64 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrier_flags_translate_bit_by_bit() {
        let flags = MemoryBarrierFlags::UNIFORM | MemoryBarrierFlags::SHADER_STORAGE;
        assert_eq!(
            flags.to_gl(),
            gl::UNIFORM_BARRIER_BIT | gl::SHADER_STORAGE_BARRIER_BIT
        );
        assert_eq!(MemoryBarrierFlags::ALL.to_gl(), gl::ALL_BARRIER_BITS);
        assert_eq!(MemoryBarrierFlags::NONE.to_gl(), 0);
    }

    #[test]
    fn null_sync_has_no_handle() {
        assert!(SyncHandle::from_raw(0).is_none());
        assert_eq!(SyncHandle::from_raw(7).map(SyncHandle::raw), Some(7));
    }
}
