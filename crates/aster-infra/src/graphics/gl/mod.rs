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

//! The OpenGL / OpenGL ES helper family.
//!
//! One [`GlGraphicsHelper`] type covers every GL variant. Behaviour that
//! differs between variants is decided per call from the helper's
//! [`HelperVariant`](aster_core::HelperVariant), in the submodules grouped by
//! concern. The native entry points come from a [`GlFunctions`] table supplied
//! by the embedder, or from `GlowFunctions` with the `glow` feature.

mod draw;
mod framebuffer;
pub mod functions;
#[cfg(feature = "glow")]
pub mod glow_functions;
mod helper;
pub mod probe;
#[cfg(any(test, feature = "testing"))]
pub mod recording;
mod reflection;
mod state;
mod sync;
mod types;
mod uniforms;

pub use self::functions::{required_entry_points, ActiveVariable, EntryPoint, GlFunctions};
#[cfg(feature = "glow")]
pub use self::glow_functions::GlowFunctions;
pub use self::helper::GlGraphicsHelper;
pub use self::probe::{create_helper_for_context, GlCapabilityProbe};
