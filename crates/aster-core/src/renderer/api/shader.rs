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

//! Reflection descriptors produced from a linked shader program.
//!
//! Every descriptor keeps the raw GL type enumerant reported by the driver.
//! The engine-level [`UniformType`] is derived from it by the active helper.

use serde::{Deserialize, Serialize};

/// An opaque native program handle.
pub type ProgramId = u32;

/// The engine-level classification of a uniform's type.
///
/// Variant names follow the GLSL type they classify.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UniformType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Double,
    DVec2,
    DVec3,
    DVec4,
    Int,
    IVec2,
    IVec3,
    IVec4,
    UInt,
    UIVec2,
    UIVec3,
    UIVec4,
    Bool,
    BVec2,
    BVec3,
    BVec4,
    Mat2,
    Mat3,
    Mat4,
    Mat2x3,
    Mat3x2,
    Mat2x4,
    Mat4x2,
    Mat3x4,
    Mat4x3,
    Sampler,
    Image,
    #[default]
    Unknown,
}

impl UniformType {
    /// Returns `true` for samplers and images.
    pub const fn is_texture_unit(self) -> bool {
        matches!(self, UniformType::Sampler | UniformType::Image)
    }
}

/// One active uniform of a linked program.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShaderUniform {
    /// The name as reported by reflection, normalized with a `[0]` suffix for arrays.
    pub name: String,
    /// The raw GL type (`GL_FLOAT_VEC3`, `GL_SAMPLER_2D`, ...).
    pub gl_type: u32,
    /// The declared array length, `1` for non-arrays.
    pub size: i32,
    /// The default-block location, `-1` for block members.
    pub location: i32,
    /// The index of the containing uniform block, `-1` for the default block.
    pub block_index: i32,
    /// The byte offset within the containing block.
    pub offset: i32,
    /// The byte distance between array elements, `0` when tightly packed.
    pub array_stride: i32,
    /// The byte distance between matrix columns, `0` when tightly packed.
    pub matrix_stride: i32,
    /// The size in bytes computed from the layout rules.
    pub raw_byte_size: u32,
}

impl ShaderUniform {
    /// Returns `true` when the uniform lives in a uniform block.
    pub fn is_block_member(&self) -> bool {
        self.block_index >= 0
    }
}

/// One active uniform block of a linked program.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShaderUniformBlock {
    /// The block name.
    pub name: String,
    /// The block index within the program.
    pub index: i32,
    /// The binding point the block is attached to.
    pub binding: i32,
    /// Number of active uniforms declared in the block.
    pub active_uniforms_count: i32,
    /// Total block size in bytes.
    pub size: i32,
}

/// One active shader storage block of a linked program.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShaderStorageBlock {
    /// The block name.
    pub name: String,
    /// The resource index within the program.
    pub index: i32,
    /// The buffer binding point.
    pub binding: i32,
    /// Number of active variables declared in the block.
    pub active_variables_count: i32,
    /// Total block size in bytes, `0` for unsized trailing arrays.
    pub size: i32,
}

/// One active vertex attribute of a linked program.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShaderAttribute {
    /// The attribute name.
    pub name: String,
    /// The raw GL type.
    pub gl_type: u32,
    /// The declared array length.
    pub size: i32,
    /// The vertex attribute location.
    pub location: i32,
}

/// Everything reflection reports for one link of a program.
///
/// Rebuilt as a whole on every link; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgramReflection {
    /// Active uniforms, in driver order.
    pub uniforms: Vec<ShaderUniform>,
    /// Active uniform blocks.
    pub uniform_blocks: Vec<ShaderUniformBlock>,
    /// Active shader storage blocks.
    pub storage_blocks: Vec<ShaderStorageBlock>,
    /// Active vertex attributes, in driver order.
    pub attributes: Vec<ShaderAttribute>,
}

impl ProgramReflection {
    /// Finds a uniform by its reflected name.
    pub fn uniform(&self, name: &str) -> Option<&ShaderUniform> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    /// Returns the members of the uniform block with the given index, in reflection order.
    pub fn block_members(&self, block_index: i32) -> impl Iterator<Item = &ShaderUniform> {
        self.uniforms
            .iter()
            .filter(move |u| u.block_index == block_index)
    }
}
