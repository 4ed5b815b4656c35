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

//! Settings that steer helper selection and reflection.

use crate::renderer::api::HelperVariant;
use crate::renderer::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable forcing a helper variant (`"gl3.3"`, `"es2"`, ...).
pub const ENV_FORCED_VARIANT: &str = "ASTER_GL_VARIANT";
/// Environment variable toggling warn-once logging (`"0"`/`"1"`, `"true"`/`"false"`).
pub const ENV_WARN_ONCE: &str = "ASTER_GL_WARN_ONCE";

/// Settings consumed by the capability probe and the helpers it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Selects a lower variant of the context's own API family instead of the best match.
    pub forced_variant: Option<HelperVariant>,
    /// Logs each "not supported" warning once per helper instead of on every call.
    pub warn_once: bool,
    /// Appends `[0]` to reflected array uniforms whose name lacks it.
    pub array_name_workaround: bool,
    /// Size of the name buffer used when querying reflection names.
    pub max_name_length: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            forced_variant: None,
            warn_once: true,
            array_name_workaround: true,
            max_name_length: 256,
        }
    }
}

impl ProbeSettings {
    /// Parses settings from a JSON document. Absent keys keep their defaults.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Loads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&document)
    }

    /// Applies [`ENV_FORCED_VARIANT`] and [`ENV_WARN_ONCE`] from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// # Arguments
    ///
    /// * `lookup`: Returns the raw value for an environment key, if set.
    ///
    /// # Returns
    ///
    /// The updated settings, or [`ConfigError::InvalidValue`] for a value
    /// that does not parse.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_FORCED_VARIANT) {
            let variant =
                HelperVariant::from_name(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_FORCED_VARIANT.to_string(),
                    value: raw.clone(),
                })?;
            self.forced_variant = Some(variant);
        }
        if let Some(raw) = lookup(ENV_WARN_ONCE) {
            self.warn_once = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_WARN_ONCE.to_string(),
                        value: raw,
                    })
                }
            };
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = ProbeSettings::from_json(r#"{ "forced_variant": "Gl3_2" }"#).unwrap();
        assert_eq!(settings.forced_variant, Some(HelperVariant::Gl3_2));
        assert!(settings.warn_once);
        assert_eq!(settings.max_name_length, 256);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ProbeSettings::from_json("{ forced_variant").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_apply_and_validate() {
        let settings = ProbeSettings::default()
            .with_overrides(|key| match key {
                ENV_FORCED_VARIANT => Some("es3.1".to_string()),
                ENV_WARN_ONCE => Some("off".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.forced_variant, Some(HelperVariant::Es3_1));
        assert!(!settings.warn_once);

        let err = ProbeSettings::default()
            .with_overrides(|key| (key == ENV_FORCED_VARIANT).then(|| "metal".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ProbeSettings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
