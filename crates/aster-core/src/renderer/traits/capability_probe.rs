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

//! Selection of the helper variant for a live context.

use crate::renderer::api::{ContextVersion, HelperVariant};
use crate::renderer::error::HelperError;
use crate::renderer::traits::GraphicsHelper;

/// Inspects a live context and binds exactly one helper variant to it.
///
/// A concrete implementation lives in `aster-infra` next to the native
/// function table it inspects.
pub trait CapabilityProbe {
    /// The live context handle the probe inspects.
    type Context;
    /// The helper type produced for a context.
    type Helper: GraphicsHelper;

    /// Reports the API family and version of `context`.
    fn context_version(&self, context: &Self::Context) -> ContextVersion;

    /// Picks the variant that will drive `context`.
    ///
    /// # Arguments
    ///
    /// * `context`: The live context to inspect.
    ///
    /// # Returns
    ///
    /// The chosen variant, or a [`HelperError`] when no variant fits. There
    /// is no fallback across API families.
    fn select_variant(&self, context: &Self::Context) -> Result<HelperVariant, HelperError>;

    /// Selects a variant and initializes a helper bound to `context`.
    ///
    /// # Returns
    ///
    /// The initialized helper, or a [`HelperError`] if selection fails or the
    /// variant's required entry points are absent.
    fn create_helper(&self, context: Self::Context) -> Result<Self::Helper, HelperError>;
}
