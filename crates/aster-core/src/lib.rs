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

//! # Aster Core
//!
//! Foundational crate containing the contracts of the GPU backend layer:
//! the graphics helper and capability probe traits, reflection descriptors,
//! layout and packing rules, and the frame-graph model render views are
//! assembled from.

#![warn(missing_docs)]

pub mod framegraph;
pub mod renderer;

pub use renderer::{CapabilityProbe, GraphicsHelper, HelperError, HelperVariant};
