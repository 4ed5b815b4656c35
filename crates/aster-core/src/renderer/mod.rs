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

//! The backend-agnostic contract between a renderer core and the GPU.
//!
//! This module holds the [`GraphicsHelper`] trait every backend variant
//! implements, the [`CapabilityProbe`] trait that selects one for a live
//! context, the reflection descriptors and the layout rules. Concrete GL
//! variants live in `aster-infra`; render-view assembly in `aster-lanes`.

pub mod api;
pub mod error;
pub mod traits;

pub use self::api::*;
pub use self::error::{ConfigError, HelperError};
pub use self::traits::{CapabilityProbe, GraphicsHelper};
