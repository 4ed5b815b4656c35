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

//! Capability probing for GL and GL ES contexts.
//!
//! The probe reads the version a context reports and binds the newest helper
//! variant of the same API family that can drive it. There is no fallback
//! across families: an ES context never gets a desktop helper or the reverse.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use aster_core::renderer::api::{ApiFamily, ContextVersion, ProbeSettings};
use aster_core::renderer::traits::CapabilityProbe;
use aster_core::{HelperError, HelperVariant};

use super::functions::GlFunctions;
use super::helper::GlGraphicsHelper;

/// Picks and initializes the GL helper variant for a live context.
#[derive(Debug, Clone, Default)]
pub struct GlCapabilityProbe {
    settings: ProbeSettings,
}

impl GlCapabilityProbe {
    /// Creates a probe with the given settings.
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    /// The settings handed to every helper this probe creates.
    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// The newest variant able to drive a context of `version`.
    ///
    /// # Returns
    ///
    /// The variant, or [`HelperError::UnsupportedContext`] for desktop
    /// contexts older than 2.0 and for non-GL families.
    pub fn best_variant(version: ContextVersion) -> Result<HelperVariant, HelperError> {
        let variant = match version.family {
            ApiFamily::Es if version.major >= 3 => match version.minor {
                0 => HelperVariant::Es3,
                1 => HelperVariant::Es3_1,
                _ => HelperVariant::Es3_2,
            },
            ApiFamily::Es => HelperVariant::Es2,
            ApiFamily::Desktop if version.at_least(4, 3) => HelperVariant::Gl4,
            ApiFamily::Desktop if version.at_least(3, 3) => HelperVariant::Gl3_3,
            ApiFamily::Desktop if version.at_least(3, 2) => HelperVariant::Gl3_2,
            ApiFamily::Desktop if version.at_least(2, 0) => HelperVariant::Gl2,
            _ => return Err(HelperError::UnsupportedContext(version)),
        };
        Ok(variant)
    }
}

impl CapabilityProbe for GlCapabilityProbe {
    type Context = Rc<dyn GlFunctions>;
    type Helper = GlGraphicsHelper;

    fn context_version(&self, context: &Self::Context) -> ContextVersion {
        context.context_version()
    }

    fn select_variant(&self, context: &Self::Context) -> Result<HelperVariant, HelperError> {
        let version = self.context_version(context);
        let best = Self::best_variant(version)?;
        log::debug!("GlCapabilityProbe: {version} context, best variant {best}");

        match self.settings.forced_variant {
            None => Ok(best),
            Some(requested)
                if requested.family() == version.family
                    && requested.version() <= best.version() =>
            {
                log::info!("GlCapabilityProbe: forcing the {requested} helper (best is {best})");
                Ok(requested)
            }
            Some(requested) => Err(HelperError::VariantMismatch {
                requested,
                context: version,
            }),
        }
    }

    fn create_helper(&self, context: Self::Context) -> Result<GlGraphicsHelper, HelperError> {
        let variant = self.select_variant(&context)?;
        let helper = GlGraphicsHelper::initialize_helper(variant, context, self.settings.clone())?;
        log::info!("GlCapabilityProbe: using the {variant} graphics helper");
        Ok(helper)
    }
}

/// Loads settings, applies environment overrides and probes `context` in one step.
///
/// # Arguments
///
/// * `context`: The live context's function table.
/// * `settings_path`: An optional JSON settings file. Defaults apply without one.
///
/// # Returns
///
/// The initialized helper, or an error carrying the failing step as context.
pub fn create_helper_for_context(
    context: Rc<dyn GlFunctions>,
    settings_path: Option<&Path>,
) -> Result<GlGraphicsHelper> {
    let settings = match settings_path {
        Some(path) => ProbeSettings::load(path)
            .with_context(|| format!("loading probe settings from {}", path.display()))?,
        None => ProbeSettings::default(),
    };
    let settings = settings
        .with_env_overrides()
        .context("applying probe settings overrides from the environment")?;

    let version = context.context_version();
    GlCapabilityProbe::new(settings)
        .create_helper(context)
        .with_context(|| format!("initializing a graphics helper for a {version} context"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn es_versions_pick_the_matching_es_variant() {
        let cases = [
            (ContextVersion::es(2, 0), HelperVariant::Es2),
            (ContextVersion::es(3, 0), HelperVariant::Es3),
            (ContextVersion::es(3, 1), HelperVariant::Es3_1),
            (ContextVersion::es(3, 2), HelperVariant::Es3_2),
        ];
        for (version, expected) in cases {
            assert_eq!(GlCapabilityProbe::best_variant(version).unwrap(), expected);
        }
    }

    #[test]
    fn desktop_versions_round_down_to_a_variant() {
        let cases = [
            (ContextVersion::desktop(2, 1), HelperVariant::Gl2),
            (ContextVersion::desktop(3, 0), HelperVariant::Gl2),
            (ContextVersion::desktop(3, 2), HelperVariant::Gl3_2),
            (ContextVersion::desktop(3, 3), HelperVariant::Gl3_3),
            (ContextVersion::desktop(4, 1), HelperVariant::Gl3_3),
            (ContextVersion::desktop(4, 6), HelperVariant::Gl4),
        ];
        for (version, expected) in cases {
            assert_eq!(GlCapabilityProbe::best_variant(version).unwrap(), expected);
        }
    }

    #[test]
    fn ancient_desktop_contexts_are_rejected() {
        let err = GlCapabilityProbe::best_variant(ContextVersion::desktop(1, 5)).unwrap_err();
        assert!(matches!(err, HelperError::UnsupportedContext(_)));
    }
}
