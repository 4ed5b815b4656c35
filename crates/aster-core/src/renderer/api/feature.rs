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

//! Helper variants and the static capability table they answer from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family of native APIs a helper variant talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiFamily {
    /// Desktop OpenGL.
    Desktop,
    /// OpenGL ES.
    Es,
    /// A modern render-hardware-interface backend.
    Rhi,
}

/// The API and version a live context reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextVersion {
    /// Desktop or ES.
    pub family: ApiFamily,
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl ContextVersion {
    /// A desktop GL version.
    pub const fn desktop(major: u32, minor: u32) -> Self {
        Self {
            family: ApiFamily::Desktop,
            major,
            minor,
        }
    }

    /// A GL ES version.
    pub const fn es(major: u32, minor: u32) -> Self {
        Self {
            family: ApiFamily::Es,
            major,
            minor,
        }
    }

    /// Returns `true` if this version is at least `major.minor`.
    pub const fn at_least(&self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

impl fmt::Display for ContextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            ApiFamily::Desktop => write!(f, "OpenGL {}.{}", self.major, self.minor),
            ApiFamily::Es => write!(f, "OpenGL ES {}.{}", self.major, self.minor),
            ApiFamily::Rhi => write!(f, "RHI {}.{}", self.major, self.minor),
        }
    }
}

/// One concrete backend variant. A context owns exactly one for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HelperVariant {
    /// OpenGL 2.0.
    Gl2,
    /// OpenGL 3.2 core.
    Gl3_2,
    /// OpenGL 3.3 core.
    Gl3_3,
    /// OpenGL 4.3 core.
    Gl4,
    /// OpenGL ES 2.0.
    Es2,
    /// OpenGL ES 3.0.
    Es3,
    /// OpenGL ES 3.1.
    Es3_1,
    /// OpenGL ES 3.2.
    Es3_2,
    /// Render hardware interface backend.
    Rhi,
}

impl HelperVariant {
    /// Every variant, in table order.
    pub const ALL: [HelperVariant; 9] = [
        HelperVariant::Gl2,
        HelperVariant::Gl3_2,
        HelperVariant::Gl3_3,
        HelperVariant::Gl4,
        HelperVariant::Es2,
        HelperVariant::Es3,
        HelperVariant::Es3_1,
        HelperVariant::Es3_2,
        HelperVariant::Rhi,
    ];

    /// The API family this variant belongs to.
    pub const fn family(self) -> ApiFamily {
        match self {
            HelperVariant::Gl2
            | HelperVariant::Gl3_2
            | HelperVariant::Gl3_3
            | HelperVariant::Gl4 => ApiFamily::Desktop,
            HelperVariant::Es2
            | HelperVariant::Es3
            | HelperVariant::Es3_1
            | HelperVariant::Es3_2 => ApiFamily::Es,
            HelperVariant::Rhi => ApiFamily::Rhi,
        }
    }

    /// The `(major, minor)` API version the variant targets.
    pub const fn version(self) -> (u32, u32) {
        match self {
            HelperVariant::Gl2 => (2, 0),
            HelperVariant::Gl3_2 => (3, 2),
            HelperVariant::Gl3_3 => (3, 3),
            HelperVariant::Gl4 => (4, 3),
            HelperVariant::Es2 => (2, 0),
            HelperVariant::Es3 => (3, 0),
            HelperVariant::Es3_1 => (3, 1),
            HelperVariant::Es3_2 => (3, 2),
            HelperVariant::Rhi => (1, 0),
        }
    }

    /// Returns `true` for the ES 3.0, 3.1 and 3.2 variants.
    pub const fn is_es3_family(self) -> bool {
        matches!(
            self,
            HelperVariant::Es3 | HelperVariant::Es3_1 | HelperVariant::Es3_2
        )
    }

    /// Looks the feature up in the static capability table.
    pub fn supports(self, feature: Feature) -> bool {
        FEATURE_TABLE[self as usize][feature as usize]
    }

    /// Parses the short names used in configuration (`"gl3.3"`, `"es2"`, ...).
    pub fn from_name(name: &str) -> Option<HelperVariant> {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', ' '], ".");
        let variant = match normalized.as_str() {
            "gl2" | "gl2.0" => HelperVariant::Gl2,
            "gl3" | "gl3.2" => HelperVariant::Gl3_2,
            "gl3.3" => HelperVariant::Gl3_3,
            "gl4" | "gl4.3" => HelperVariant::Gl4,
            "es2" | "es2.0" => HelperVariant::Es2,
            "es3" | "es3.0" => HelperVariant::Es3,
            "es3.1" => HelperVariant::Es3_1,
            "es3.2" => HelperVariant::Es3_2,
            "rhi" => HelperVariant::Rhi,
            _ => return None,
        };
        Some(variant)
    }
}

impl fmt::Display for HelperVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HelperVariant::Gl2 => "OpenGL 2.0",
            HelperVariant::Gl3_2 => "OpenGL 3.2",
            HelperVariant::Gl3_3 => "OpenGL 3.3",
            HelperVariant::Gl4 => "OpenGL 4.3",
            HelperVariant::Es2 => "OpenGL ES 2.0",
            HelperVariant::Es3 => "OpenGL ES 3.0",
            HelperVariant::Es3_1 => "OpenGL ES 3.1",
            HelperVariant::Es3_2 => "OpenGL ES 3.2",
            HelperVariant::Rhi => "RHI",
        };
        f.write_str(name)
    }
}

/// A coarse capability a helper variant either has or lacks.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Multiple render targets.
    MRT,
    /// Tessellation stages and patch primitives.
    Tessellation,
    /// Uniform buffer objects.
    UniformBufferObject,
    /// Fragment outputs bindable by name.
    BindableFragmentOutputs,
    /// Primitive restart index.
    PrimitiveRestart,
    /// Querying render buffer sizes.
    RenderBufferDimensionRetrieval,
    /// Querying texture level sizes.
    TextureDimensionRetrieval,
    /// Shader storage buffer objects.
    ShaderStorageObject,
    /// Compute shaders.
    Compute,
    /// Per draw buffer blend state.
    DrawBuffersBlend,
    /// Framebuffer blits.
    BlitFramebuffer,
    /// Indirect draws.
    IndirectDrawing,
    /// Buffer mapping.
    MapBuffer,
    /// Fence sync objects.
    Fences,
    /// Image load/store.
    ShaderImage,
}

impl Feature {
    /// Every feature, in table order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::MRT,
        Feature::Tessellation,
        Feature::UniformBufferObject,
        Feature::BindableFragmentOutputs,
        Feature::PrimitiveRestart,
        Feature::RenderBufferDimensionRetrieval,
        Feature::TextureDimensionRetrieval,
        Feature::ShaderStorageObject,
        Feature::Compute,
        Feature::DrawBuffersBlend,
        Feature::BlitFramebuffer,
        Feature::IndirectDrawing,
        Feature::MapBuffer,
        Feature::Fences,
        Feature::ShaderImage,
    ];
}

const FEATURE_COUNT: usize = 15;

const fn row(features: &[Feature]) -> [bool; FEATURE_COUNT] {
    let mut out = [false; FEATURE_COUNT];
    let mut i = 0;
    while i < features.len() {
        out[features[i] as usize] = true;
        i += 1;
    }
    out
}

use Feature::*;

const GL3_ROW: [bool; FEATURE_COUNT] = row(&[
    MRT,
    UniformBufferObject,
    PrimitiveRestart,
    RenderBufferDimensionRetrieval,
    TextureDimensionRetrieval,
    BindableFragmentOutputs,
    BlitFramebuffer,
    Fences,
]);

const ES3_ROW: [bool; FEATURE_COUNT] = row(&[
    RenderBufferDimensionRetrieval,
    MRT,
    BlitFramebuffer,
    UniformBufferObject,
    MapBuffer,
    Fences,
]);

const ES3_1_ROW: [bool; FEATURE_COUNT] = row(&[
    RenderBufferDimensionRetrieval,
    MRT,
    BlitFramebuffer,
    UniformBufferObject,
    MapBuffer,
    Fences,
    ShaderStorageObject,
    IndirectDrawing,
    Compute,
    ShaderImage,
]);

/// `variant × feature`, indexed by discriminant.
static FEATURE_TABLE: [[bool; FEATURE_COUNT]; 9] = [
    // Gl2
    row(&[MRT, TextureDimensionRetrieval, MapBuffer]),
    // Gl3_2
    GL3_ROW,
    // Gl3_3
    GL3_ROW,
    // Gl4
    row(&[
        MRT,
        Tessellation,
        UniformBufferObject,
        BindableFragmentOutputs,
        PrimitiveRestart,
        RenderBufferDimensionRetrieval,
        TextureDimensionRetrieval,
        ShaderStorageObject,
        Compute,
        DrawBuffersBlend,
        BlitFramebuffer,
        IndirectDrawing,
        MapBuffer,
        Fences,
        ShaderImage,
    ]),
    // Es2
    row(&[RenderBufferDimensionRetrieval]),
    // Es3
    ES3_ROW,
    // Es3_1
    ES3_1_ROW,
    // Es3_2
    row(&[
        RenderBufferDimensionRetrieval,
        MRT,
        BlitFramebuffer,
        UniformBufferObject,
        MapBuffer,
        Fences,
        ShaderStorageObject,
        IndirectDrawing,
        Compute,
        ShaderImage,
        Tessellation,
        DrawBuffersBlend,
    ]),
    // Rhi
    row(&[
        MRT,
        UniformBufferObject,
        ShaderStorageObject,
        Compute,
        BlitFramebuffer,
        IndirectDrawing,
        TextureDimensionRetrieval,
        RenderBufferDimensionRetrieval,
    ]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl2_only_has_its_three_features() {
        let supported: Vec<Feature> = Feature::ALL
            .iter()
            .copied()
            .filter(|f| HelperVariant::Gl2.supports(*f))
            .collect();
        assert_eq!(
            supported,
            vec![Feature::MRT, Feature::TextureDimensionRetrieval, Feature::MapBuffer]
        );
    }

    #[test]
    fn gl4_supports_everything() {
        assert!(Feature::ALL.iter().all(|f| HelperVariant::Gl4.supports(*f)));
    }

    #[test]
    fn es_family_rows_only_grow() {
        let chain = [
            HelperVariant::Es2,
            HelperVariant::Es3,
            HelperVariant::Es3_1,
            HelperVariant::Es3_2,
        ];
        for pair in chain.windows(2) {
            for feature in Feature::ALL {
                if pair[0].supports(feature) {
                    assert!(pair[1].supports(feature), "{} lost {feature:?}", pair[1]);
                }
            }
        }
    }

    #[test]
    fn es2_has_no_fences_or_ubo() {
        assert!(!HelperVariant::Es2.supports(Feature::Fences));
        assert!(!HelperVariant::Es2.supports(Feature::UniformBufferObject));
        assert!(!HelperVariant::Es2.supports(Feature::BlitFramebuffer));
        assert!(HelperVariant::Es3.supports(Feature::Fences));
    }

    #[test]
    fn families_and_names() {
        assert_eq!(HelperVariant::Gl3_3.family(), ApiFamily::Desktop);
        assert_eq!(HelperVariant::Es3_1.family(), ApiFamily::Es);
        assert_eq!(HelperVariant::from_name("ES3_1"), Some(HelperVariant::Es3_1));
        assert_eq!(HelperVariant::from_name("gl4"), Some(HelperVariant::Gl4));
        assert_eq!(HelperVariant::from_name("vulkan"), None);
        assert_eq!(HelperVariant::Es3_2.to_string(), "OpenGL ES 3.2");
    }

    #[test]
    fn context_version_ordering() {
        let version = ContextVersion::desktop(4, 1);
        assert!(version.at_least(3, 3));
        assert!(version.at_least(4, 1));
        assert!(!version.at_least(4, 3));
        assert_eq!(ContextVersion::es(3, 1).to_string(), "OpenGL ES 3.1");
    }

    #[test]
    fn table_covers_every_variant() {
        assert_eq!(HelperVariant::ALL.len(), FEATURE_TABLE.len());
        assert_eq!(HelperVariant::Rhi as usize, 8);
    }
}
