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

//! GL type enumerant to [`UniformType`] mapping, per variant.
//!
//! Each variant only knows the types its shading language can declare.
//! Newer variants add their types and defer to the variant they extend.

use aster_core::renderer::api::{gl, UniformType};
use aster_core::HelperVariant;

/// Scalars, vectors, square matrices and booleans: the ES 2 / GL 2 core.
fn core_type(gl_type: u32) -> Option<UniformType> {
    let ty = match gl_type {
        gl::FLOAT => UniformType::Float,
        gl::FLOAT_VEC2 => UniformType::Vec2,
        gl::FLOAT_VEC3 => UniformType::Vec3,
        gl::FLOAT_VEC4 => UniformType::Vec4,
        gl::FLOAT_MAT2 => UniformType::Mat2,
        gl::FLOAT_MAT3 => UniformType::Mat3,
        gl::FLOAT_MAT4 => UniformType::Mat4,
        gl::INT => UniformType::Int,
        gl::INT_VEC2 => UniformType::IVec2,
        gl::INT_VEC3 => UniformType::IVec3,
        gl::INT_VEC4 => UniformType::IVec4,
        gl::BOOL => UniformType::Bool,
        gl::BOOL_VEC2 => UniformType::BVec2,
        gl::BOOL_VEC3 => UniformType::BVec3,
        gl::BOOL_VEC4 => UniformType::BVec4,
        _ => return None,
    };
    Some(ty)
}

fn es2_type(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        gl::SAMPLER_2D | gl::SAMPLER_CUBE => Some(UniformType::Sampler),
        _ => core_type(gl_type),
    }
}

fn non_square_or_unsigned(gl_type: u32) -> Option<UniformType> {
    let ty = match gl_type {
        gl::FLOAT_MAT2X3 => UniformType::Mat2x3,
        gl::FLOAT_MAT3X2 => UniformType::Mat3x2,
        gl::FLOAT_MAT2X4 => UniformType::Mat2x4,
        gl::FLOAT_MAT4X2 => UniformType::Mat4x2,
        gl::FLOAT_MAT3X4 => UniformType::Mat3x4,
        gl::FLOAT_MAT4X3 => UniformType::Mat4x3,
        gl::UNSIGNED_INT => UniformType::UInt,
        gl::UNSIGNED_INT_VEC2 => UniformType::UIVec2,
        gl::UNSIGNED_INT_VEC3 => UniformType::UIVec3,
        gl::UNSIGNED_INT_VEC4 => UniformType::UIVec4,
        _ => return None,
    };
    Some(ty)
}

fn es3_type(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        gl::SAMPLER_3D
        | gl::SAMPLER_2D_SHADOW
        | gl::SAMPLER_CUBE_SHADOW
        | gl::SAMPLER_2D_ARRAY
        | gl::SAMPLER_2D_ARRAY_SHADOW
        | gl::INT_SAMPLER_2D
        | gl::INT_SAMPLER_3D
        | gl::INT_SAMPLER_CUBE
        | gl::INT_SAMPLER_2D_ARRAY
        | gl::UNSIGNED_INT_SAMPLER_2D
        | gl::UNSIGNED_INT_SAMPLER_3D
        | gl::UNSIGNED_INT_SAMPLER_CUBE
        | gl::UNSIGNED_INT_SAMPLER_2D_ARRAY => Some(UniformType::Sampler),
        _ => non_square_or_unsigned(gl_type).or_else(|| es2_type(gl_type)),
    }
}

fn es3_1_type(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        gl::SAMPLER_2D_MULTISAMPLE
        | gl::INT_SAMPLER_2D_MULTISAMPLE
        | gl::UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE => Some(UniformType::Sampler),
        gl::IMAGE_2D
        | gl::IMAGE_3D
        | gl::IMAGE_CUBE
        | gl::IMAGE_2D_ARRAY
        | gl::INT_IMAGE_2D
        | gl::INT_IMAGE_3D
        | gl::INT_IMAGE_CUBE
        | gl::INT_IMAGE_2D_ARRAY
        | gl::UNSIGNED_INT_IMAGE_2D
        | gl::UNSIGNED_INT_IMAGE_3D
        | gl::UNSIGNED_INT_IMAGE_CUBE
        | gl::UNSIGNED_INT_IMAGE_2D_ARRAY => Some(UniformType::Image),
        _ => es3_type(gl_type),
    }
}

fn es3_2_type(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        gl::SAMPLER_BUFFER
        | gl::INT_SAMPLER_BUFFER
        | gl::UNSIGNED_INT_SAMPLER_BUFFER
        | gl::SAMPLER_CUBE_MAP_ARRAY
        | gl::SAMPLER_CUBE_MAP_ARRAY_SHADOW
        | gl::INT_SAMPLER_CUBE_MAP_ARRAY
        | gl::UNSIGNED_INT_SAMPLER_CUBE_MAP_ARRAY
        | gl::SAMPLER_2D_MULTISAMPLE_ARRAY
        | gl::INT_SAMPLER_2D_MULTISAMPLE_ARRAY
        | gl::UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE_ARRAY => Some(UniformType::Sampler),
        gl::IMAGE_BUFFER
        | gl::INT_IMAGE_BUFFER
        | gl::UNSIGNED_INT_IMAGE_BUFFER
        | gl::IMAGE_CUBE_MAP_ARRAY
        | gl::INT_IMAGE_CUBE_MAP_ARRAY
        | gl::UNSIGNED_INT_IMAGE_CUBE_MAP_ARRAY => Some(UniformType::Image),
        _ => es3_1_type(gl_type),
    }
}

fn gl2_type(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        gl::SAMPLER_1D
        | gl::SAMPLER_1D_SHADOW
        | gl::SAMPLER_2D
        | gl::SAMPLER_2D_SHADOW
        | gl::SAMPLER_CUBE
        | gl::SAMPLER_3D => Some(UniformType::Sampler),
        _ => core_type(gl_type),
    }
}

fn is_desktop_sampler(gl_type: u32) -> bool {
    matches!(
        gl_type,
        gl::SAMPLER_1D..=gl::SAMPLER_2D_RECT_SHADOW
            | gl::SAMPLER_1D_ARRAY..=gl::SAMPLER_CUBE_SHADOW
            | gl::INT_SAMPLER_1D..=gl::UNSIGNED_INT_SAMPLER_BUFFER
            | gl::SAMPLER_CUBE_MAP_ARRAY..=gl::UNSIGNED_INT_SAMPLER_CUBE_MAP_ARRAY
            | gl::SAMPLER_2D_MULTISAMPLE..=gl::UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE_ARRAY
    )
}

fn gl3_type(gl_type: u32) -> Option<UniformType> {
    if is_desktop_sampler(gl_type) {
        return Some(UniformType::Sampler);
    }
    non_square_or_unsigned(gl_type).or_else(|| gl2_type(gl_type))
}

fn gl4_type(gl_type: u32) -> Option<UniformType> {
    let ty = match gl_type {
        gl::IMAGE_1D..=gl::UNSIGNED_INT_IMAGE_2D_MULTISAMPLE_ARRAY => UniformType::Image,
        gl::DOUBLE => UniformType::Double,
        gl::DOUBLE_VEC2 => UniformType::DVec2,
        gl::DOUBLE_VEC3 => UniformType::DVec3,
        gl::DOUBLE_VEC4 => UniformType::DVec4,
        _ => return gl3_type(gl_type),
    };
    Some(ty)
}

/// Resolves `gl_type` on `variant`, logging types the variant cannot declare.
pub(super) fn uniform_type_from_gl_type(variant: HelperVariant, gl_type: u32) -> UniformType {
    let resolved = match variant {
        HelperVariant::Gl2 => gl2_type(gl_type),
        HelperVariant::Gl3_2 | HelperVariant::Gl3_3 => gl3_type(gl_type),
        HelperVariant::Gl4 => gl4_type(gl_type),
        HelperVariant::Es2 => es2_type(gl_type),
        HelperVariant::Es3 => es3_type(gl_type),
        HelperVariant::Es3_1 => es3_1_type(gl_type),
        HelperVariant::Es3_2 | HelperVariant::Rhi => es3_2_type(gl_type),
    };
    resolved.unwrap_or_else(|| {
        log::warn!("{variant} does not know the uniform type {gl_type:#x}");
        UniformType::Unknown
    })
}
