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

//! Scene resources referenced by frame-graph nodes: materials, techniques,
//! passes, render states and render targets.

use super::id::NodeId;
use crate::renderer::api::{Attachment, TextureBinding, UniformValue};
use serde::{Deserialize, Serialize};
use std::mem::Discriminant;

/// A named key/value pair used to match techniques and passes against filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterKey {
    /// The key's identifier.
    pub id: NodeId,
    /// The key name.
    pub name: String,
    /// The key value.
    pub value: serde_json::Value,
}

impl FilterKey {
    /// Two keys are equal when both name and value are equal.
    pub fn equals(&self, other: &FilterKey) -> bool {
        self.name == other.name && self.value == other.value
    }
}

/// The graphics API a technique is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GraphicsApi {
    /// Desktop OpenGL.
    #[default]
    OpenGL,
    /// OpenGL ES.
    OpenGLES,
    /// Vulkan.
    Vulkan,
    /// Direct3D.
    DirectX,
    /// A render hardware interface backend.
    Rhi,
}

/// The context profile a technique requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GraphicsApiProfile {
    /// Any profile.
    #[default]
    NoProfile,
    /// Core profile.
    Core,
    /// Compatibility profile.
    Compatibility,
}

/// An API, version, profile, extension and vendor description.
///
/// Used both for what a context provides and for what a technique requires.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphicsApiFilter {
    /// The API.
    pub api: GraphicsApi,
    /// The profile.
    pub profile: GraphicsApiProfile,
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Extensions, by name.
    pub extensions: Vec<String>,
    /// Vendor string, empty for any.
    pub vendor: String,
}

impl GraphicsApiFilter {
    /// A filter for `api` at `major.minor` with no other requirement.
    pub fn new(api: GraphicsApi, major: u32, minor: u32) -> Self {
        Self {
            api,
            major,
            minor,
            ..Default::default()
        }
    }

    /// Returns `true` if a context described by `self` can run a technique
    /// requiring `required`.
    ///
    /// The API must match; a required profile other than `NoProfile` must
    /// match; the required version must not exceed the context's; every
    /// required extension must be present; a required vendor must match.
    pub fn satisfies(&self, required: &GraphicsApiFilter) -> bool {
        if required.api != self.api {
            return false;
        }
        if required.profile != GraphicsApiProfile::NoProfile && required.profile != self.profile {
            return false;
        }
        if (required.major, required.minor) > (self.major, self.minor) {
            return false;
        }
        if !required
            .extensions
            .iter()
            .all(|ext| self.extensions.contains(ext))
        {
            return false;
        }
        required.vendor.is_empty() || required.vendor == self.vendor
    }
}

/// A named uniform value attached to a material, effect, technique or pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter's identifier.
    pub id: NodeId,
    /// The uniform name it feeds.
    pub name: String,
    /// The value.
    pub value: UniformValue,
}

/// A shader program plus fixed-function state, optionally filtered by keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPass {
    /// The pass's identifier.
    pub id: NodeId,
    /// Informational name.
    pub name: String,
    /// Disabled passes are never selected.
    pub enabled: bool,
    /// Filter keys the pass carries.
    pub filter_keys: Vec<NodeId>,
    /// Pass parameters.
    pub parameters: Vec<NodeId>,
    /// Render states applied while the pass draws.
    pub render_states: Vec<NodeId>,
    /// The linked program, once available.
    pub program: Option<u32>,
}

/// A group of passes targeting one API version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    /// The technique's identifier.
    pub id: NodeId,
    /// Informational name.
    pub name: String,
    /// Disabled techniques are never selected.
    pub enabled: bool,
    /// What the technique requires from the context.
    pub api_filter: GraphicsApiFilter,
    /// Filter keys the technique carries.
    pub filter_keys: Vec<NodeId>,
    /// Passes, in declaration order.
    pub render_passes: Vec<NodeId>,
    /// Technique parameters.
    pub parameters: Vec<NodeId>,
}

/// A set of alternative techniques for one look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// The effect's identifier.
    pub id: NodeId,
    /// Techniques, in declaration order.
    pub techniques: Vec<NodeId>,
    /// Effect parameters.
    pub parameters: Vec<NodeId>,
}

/// An effect plus per-instance parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// The material's identifier.
    pub id: NodeId,
    /// The effect the material instantiates.
    pub effect: Option<NodeId>,
    /// Material parameters.
    pub parameters: Vec<NodeId>,
}

/// A fixed-function state applied by a state set or a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderStateKind {
    /// Alpha to coverage.
    AlphaCoverage,
    /// Fixed-function alpha test.
    AlphaTest {
        /// Comparison function.
        func: u32,
        /// Reference value.
        reference: f32,
    },
    /// Blend equation.
    BlendEquation {
        /// Equation mode.
        mode: u32,
    },
    /// Blend factors, optionally for one draw buffer.
    BlendEquationArguments {
        /// Draw buffer index, `None` for all.
        buffer: Option<u32>,
        /// Source color factor.
        src_rgb: u32,
        /// Destination color factor.
        dst_rgb: u32,
        /// Source alpha factor.
        src_alpha: u32,
        /// Destination alpha factor.
        dst_alpha: u32,
    },
    /// A user clip plane.
    ClipPlane {
        /// Plane index.
        index: u32,
        /// Plane normal.
        normal: [f32; 3],
        /// Distance from the origin.
        distance: f32,
    },
    /// Depth range.
    DepthRange {
        /// Near value.
        near: f64,
        /// Far value.
        far: f64,
    },
    /// Depth test.
    DepthTest {
        /// Comparison function.
        func: u32,
    },
    /// Depth writes disabled.
    NoDepthMask,
    /// Front face winding.
    FrontFace {
        /// Winding mode.
        mode: u32,
    },
    /// Multisample rasterization.
    MultiSampleAntiAliasing,
    /// Point size.
    PointSize {
        /// Sized by the program.
        programmable: bool,
        /// Fixed size.
        value: f32,
    },
    /// Primitive restart.
    PrimitiveRestart {
        /// Restart index.
        restart_index: u32,
    },
    /// Polygon rasterization mode.
    RasterMode {
        /// Faces affected.
        face: u32,
        /// Fill mode.
        mode: u32,
    },
    /// Seamless cube map filtering.
    SeamlessCubemap,
}

impl RenderStateKind {
    /// The state type; a state set holds at most one state per type.
    pub fn state_type(&self) -> Discriminant<RenderStateKind> {
        std::mem::discriminant(self)
    }
}

/// A render state resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// The state's identifier.
    pub id: NodeId,
    /// The state.
    pub kind: RenderStateKind,
}

/// Camera data carried by an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraLens {
    /// Column-major projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Exposure adjustment.
    pub exposure: f32,
}

/// The subset of an entity that render-view assembly looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity's identifier.
    pub id: NodeId,
    /// Informational name.
    pub name: String,
    /// The camera lens, for camera entities.
    pub lens: Option<CameraLens>,
    /// Column-major world transform.
    pub world_transform: [[f32; 4]; 4],
}

/// One output of a render target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTargetOutput {
    /// The output's identifier.
    pub id: NodeId,
    /// Where the texture is attached.
    pub attachment: Attachment,
    /// The texture backing the output.
    pub texture: Option<TextureBinding>,
}

/// An offscreen render target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTarget {
    /// The target's identifier.
    pub id: NodeId,
    /// The outputs.
    pub outputs: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> GraphicsApiFilter {
        GraphicsApiFilter {
            api: GraphicsApi::OpenGL,
            profile: GraphicsApiProfile::Core,
            major: 4,
            minor: 1,
            extensions: vec!["GL_ARB_bindless_texture".to_string()],
            vendor: "ACME".to_string(),
        }
    }

    #[test]
    fn version_must_not_exceed_context() {
        let ctx = context();
        assert!(ctx.satisfies(&GraphicsApiFilter::new(GraphicsApi::OpenGL, 3, 2)));
        assert!(ctx.satisfies(&GraphicsApiFilter::new(GraphicsApi::OpenGL, 4, 1)));
        assert!(!ctx.satisfies(&GraphicsApiFilter::new(GraphicsApi::OpenGL, 4, 3)));
        assert!(!ctx.satisfies(&GraphicsApiFilter::new(GraphicsApi::OpenGLES, 2, 0)));
    }

    #[test]
    fn profile_extensions_and_vendor() {
        let ctx = context();
        let mut required = GraphicsApiFilter::new(GraphicsApi::OpenGL, 3, 3);
        required.profile = GraphicsApiProfile::Compatibility;
        assert!(!ctx.satisfies(&required));

        required.profile = GraphicsApiProfile::Core;
        required.extensions = vec!["GL_ARB_bindless_texture".to_string()];
        assert!(ctx.satisfies(&required));
        required.extensions.push("GL_NV_mesh_shader".to_string());
        assert!(!ctx.satisfies(&required));

        required.extensions.clear();
        required.vendor = "Other".to_string();
        assert!(!ctx.satisfies(&required));
    }

    #[test]
    fn state_type_ignores_values() {
        let a = RenderStateKind::DepthTest { func: 0x0201 };
        let b = RenderStateKind::DepthTest { func: 0x0207 };
        assert_eq!(a.state_type(), b.state_type());
        assert_ne!(a.state_type(), RenderStateKind::NoDepthMask.state_type());
    }

    #[test]
    fn filter_keys_compare_name_and_value() {
        let key = |name: &str, value: serde_json::Value| FilterKey {
            id: NodeId::new(),
            name: name.to_string(),
            value,
        };
        let forward = key("renderingStyle", serde_json::json!("forward"));
        assert!(forward.equals(&key("renderingStyle", serde_json::json!("forward"))));
        assert!(!forward.equals(&key("renderingStyle", serde_json::json!("deferred"))));
    }
}
