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

//! Error types for helper initialization and configuration.
//!
//! Only initialization can fail with an error value. Every per-call problem
//! on a live helper is logged and degraded instead.

use crate::renderer::api::{ContextVersion, HelperVariant};
use std::fmt;

/// An error raised while selecting or initializing a graphics helper.
#[derive(Debug)]
pub enum HelperError {
    /// The context lacks entry points the selected variant cannot work without.
    MissingEntryPoints {
        /// The variant being initialized.
        variant: HelperVariant,
        /// Names of the absent entry points.
        missing: Vec<String>,
    },
    /// No helper variant can drive a context of this version.
    UnsupportedContext(ContextVersion),
    /// A forced variant belongs to another API family or needs a newer context.
    VariantMismatch {
        /// The variant that was asked for.
        requested: HelperVariant,
        /// What the context actually provides.
        context: ContextVersion,
    },
    /// The probe has no implementation for this variant.
    UnavailableVariant(HelperVariant),
}

impl fmt::Display for HelperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelperError::MissingEntryPoints { variant, missing } => {
                write!(
                    f,
                    "{variant} helper is missing required entry points: {}",
                    missing.join(", ")
                )
            }
            HelperError::UnsupportedContext(version) => {
                write!(f, "No graphics helper supports a {version} context")
            }
            HelperError::VariantMismatch { requested, context } => {
                write!(f, "Cannot drive a {context} context with the {requested} helper")
            }
            HelperError::UnavailableVariant(variant) => {
                write!(f, "No implementation is available for the {variant} helper")
            }
        }
    }
}

impl std::error::Error for HelperError {}

/// An error raised while loading helper settings.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for the settings schema.
    Parse(serde_json::Error),
    /// A setting has a value outside its domain.
    InvalidValue {
        /// The setting or environment variable name.
        key: String,
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read settings from '{path}': {source}")
            }
            ConfigError::Parse(err) => write!(f, "Invalid settings document: {err}"),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{value}' for setting '{key}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
