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

//! Layout rules shared by every helper variant.
//!
//! The byte-size table and the GL type classification live here once so that
//! ES and desktop reflection agree on every type they have in common.

use super::gl;
use super::shader::ShaderUniform;

/// The scalar component type of a vector or scalar GL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 32-bit float.
    Float,
    /// 32-bit signed integer.
    Int,
    /// 32-bit unsigned integer.
    UInt,
    /// Boolean, one byte on the CPU side.
    Bool,
}

impl ScalarKind {
    /// Bytes per component when tightly packed.
    pub const fn byte_width(self) -> u32 {
        match self {
            ScalarKind::Bool => 1,
            _ => 4,
        }
    }
}

/// How a GL type is laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlTypeClass {
    /// A scalar or vector of `components` values.
    Vector {
        /// The component type.
        kind: ScalarKind,
        /// 1 to 4.
        components: u32,
    },
    /// A column-major float matrix.
    Matrix {
        /// Number of columns.
        columns: u32,
        /// Number of rows.
        rows: u32,
    },
    /// Any sampler type.
    Sampler,
    /// Any image type.
    Image,
    /// A type the layer does not know.
    Unknown,
}

/// Classifies a raw GL type enumerant.
pub fn classify(gl_type: u32) -> GlTypeClass {
    use GlTypeClass::*;
    use ScalarKind::*;

    let vector = |kind, components| Vector { kind, components };
    let matrix = |columns, rows| Matrix { columns, rows };

    match gl_type {
        gl::FLOAT => vector(Float, 1),
        gl::FLOAT_VEC2 => vector(Float, 2),
        gl::FLOAT_VEC3 => vector(Float, 3),
        gl::FLOAT_VEC4 => vector(Float, 4),
        gl::INT => vector(Int, 1),
        gl::INT_VEC2 => vector(Int, 2),
        gl::INT_VEC3 => vector(Int, 3),
        gl::INT_VEC4 => vector(Int, 4),
        gl::UNSIGNED_INT => vector(UInt, 1),
        gl::UNSIGNED_INT_VEC2 => vector(UInt, 2),
        gl::UNSIGNED_INT_VEC3 => vector(UInt, 3),
        gl::UNSIGNED_INT_VEC4 => vector(UInt, 4),
        gl::BOOL => vector(Bool, 1),
        gl::BOOL_VEC2 => vector(Bool, 2),
        gl::BOOL_VEC3 => vector(Bool, 3),
        gl::BOOL_VEC4 => vector(Bool, 4),
        // GL_FLOAT_MATcxr has c columns and r rows.
        gl::FLOAT_MAT2 => matrix(2, 2),
        gl::FLOAT_MAT3 => matrix(3, 3),
        gl::FLOAT_MAT4 => matrix(4, 4),
        gl::FLOAT_MAT2X3 => matrix(2, 3),
        gl::FLOAT_MAT2X4 => matrix(2, 4),
        gl::FLOAT_MAT3X2 => matrix(3, 2),
        gl::FLOAT_MAT3X4 => matrix(3, 4),
        gl::FLOAT_MAT4X2 => matrix(4, 2),
        gl::FLOAT_MAT4X3 => matrix(4, 3),
        t if is_sampler(t) => Sampler,
        t if is_image(t) => Image,
        _ => Unknown,
    }
}

/// Returns `true` for every sampler type enumerant.
pub fn is_sampler(gl_type: u32) -> bool {
    matches!(
        gl_type,
        gl::SAMPLER_1D
            | gl::SAMPLER_2D
            | gl::SAMPLER_3D
            | gl::SAMPLER_CUBE
            | gl::SAMPLER_1D_SHADOW
            | gl::SAMPLER_2D_SHADOW
            | gl::SAMPLER_2D_RECT
            | gl::SAMPLER_2D_RECT_SHADOW
            | gl::SAMPLER_1D_ARRAY
            | gl::SAMPLER_2D_ARRAY
            | gl::SAMPLER_BUFFER
            | gl::SAMPLER_1D_ARRAY_SHADOW
            | gl::SAMPLER_2D_ARRAY_SHADOW
            | gl::SAMPLER_CUBE_SHADOW
            | gl::INT_SAMPLER_1D
            | gl::INT_SAMPLER_2D
            | gl::INT_SAMPLER_3D
            | gl::INT_SAMPLER_CUBE
            | gl::INT_SAMPLER_2D_RECT
            | gl::INT_SAMPLER_1D_ARRAY
            | gl::INT_SAMPLER_2D_ARRAY
            | gl::INT_SAMPLER_BUFFER
            | gl::UNSIGNED_INT_SAMPLER_1D
            | gl::UNSIGNED_INT_SAMPLER_2D
            | gl::UNSIGNED_INT_SAMPLER_3D
            | gl::UNSIGNED_INT_SAMPLER_CUBE
            | gl::UNSIGNED_INT_SAMPLER_2D_RECT
            | gl::UNSIGNED_INT_SAMPLER_1D_ARRAY
            | gl::UNSIGNED_INT_SAMPLER_2D_ARRAY
            | gl::UNSIGNED_INT_SAMPLER_BUFFER
            | gl::SAMPLER_CUBE_MAP_ARRAY
            | gl::SAMPLER_CUBE_MAP_ARRAY_SHADOW
            | gl::INT_SAMPLER_CUBE_MAP_ARRAY
            | gl::UNSIGNED_INT_SAMPLER_CUBE_MAP_ARRAY
            | gl::SAMPLER_2D_MULTISAMPLE
            | gl::INT_SAMPLER_2D_MULTISAMPLE
            | gl::UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE
            | gl::SAMPLER_2D_MULTISAMPLE_ARRAY
            | gl::INT_SAMPLER_2D_MULTISAMPLE_ARRAY
            | gl::UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE_ARRAY
    )
}

/// Returns `true` for every image type enumerant.
pub fn is_image(gl_type: u32) -> bool {
    (gl::IMAGE_1D..=gl::UNSIGNED_INT_IMAGE_2D_MULTISAMPLE_ARRAY).contains(&gl_type)
}

/// Computes the raw byte size of a reflected uniform.
///
/// Vectors are `components × component width` bytes. Matrices are
/// `matrix_stride × columns` when a matrix stride is known, otherwise the
/// tightly packed `columns × rows × 4`. Samplers and images take 4 bytes.
/// A positive `array_stride` multiplies the result once; negative strides
/// reported by some drivers count as zero.
///
/// # Arguments
///
/// * `uniform`: The reflected uniform descriptor.
///
/// # Returns
///
/// The size in bytes, `0` for unknown types.
pub fn uniform_byte_size(uniform: &ShaderUniform) -> u32 {
    let array_stride = uniform.array_stride.max(0) as u32;
    let matrix_stride = uniform.matrix_stride.max(0) as u32;

    let raw_byte_size = match classify(uniform.gl_type) {
        GlTypeClass::Vector { kind, components } => kind.byte_width() * components,
        GlTypeClass::Matrix { columns, rows } => {
            if matrix_stride > 0 {
                matrix_stride * columns
            } else {
                columns * rows * 4
            }
        }
        GlTypeClass::Sampler | GlTypeClass::Image => 4,
        GlTypeClass::Unknown => 0,
    };

    if array_stride > 0 {
        raw_byte_size * array_stride
    } else {
        raw_byte_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(gl_type: u32, array_stride: i32, matrix_stride: i32) -> ShaderUniform {
        ShaderUniform {
            gl_type,
            array_stride,
            matrix_stride,
            size: 1,
            ..Default::default()
        }
    }

    #[test]
    fn scalar_and_vector_sizes() {
        let cases = [
            (gl::FLOAT, 4),
            (gl::FLOAT_VEC2, 8),
            (gl::FLOAT_VEC3, 12),
            (gl::FLOAT_VEC4, 16),
            (gl::INT, 4),
            (gl::INT_VEC2, 8),
            (gl::INT_VEC3, 12),
            (gl::INT_VEC4, 16),
            (gl::UNSIGNED_INT, 4),
            (gl::UNSIGNED_INT_VEC2, 8),
            (gl::UNSIGNED_INT_VEC3, 12),
            (gl::UNSIGNED_INT_VEC4, 16),
            (gl::BOOL, 1),
            (gl::BOOL_VEC2, 2),
            (gl::BOOL_VEC3, 3),
            (gl::BOOL_VEC4, 4),
        ];
        for (gl_type, expected) in cases {
            assert_eq!(
                uniform_byte_size(&uniform(gl_type, 0, 0)),
                expected,
                "type {gl_type:#x}"
            );
        }
    }

    #[test]
    fn matrix_default_sizes() {
        let cases = [
            (gl::FLOAT_MAT2, 16),
            (gl::FLOAT_MAT3, 36),
            (gl::FLOAT_MAT4, 64),
            (gl::FLOAT_MAT2X3, 24),
            (gl::FLOAT_MAT3X2, 24),
            (gl::FLOAT_MAT2X4, 32),
            (gl::FLOAT_MAT4X2, 32),
            (gl::FLOAT_MAT3X4, 48),
            (gl::FLOAT_MAT4X3, 48),
        ];
        for (gl_type, expected) in cases {
            assert_eq!(uniform_byte_size(&uniform(gl_type, 0, 0)), expected);
        }
    }

    #[test]
    fn matrix_stride_multiplies_columns() {
        assert_eq!(uniform_byte_size(&uniform(gl::FLOAT_MAT3, 0, 16)), 48);
        assert_eq!(uniform_byte_size(&uniform(gl::FLOAT_MAT2X4, 0, 16)), 32);
        assert_eq!(uniform_byte_size(&uniform(gl::FLOAT_MAT4X2, 0, 16)), 64);
    }

    #[test]
    fn array_stride_applies_once() {
        assert_eq!(uniform_byte_size(&uniform(gl::FLOAT_VEC3, 16, 0)), 12 * 16);
        assert_eq!(uniform_byte_size(&uniform(gl::FLOAT_MAT4, 64, 16)), 64 * 64);
    }

    #[test]
    fn negative_strides_are_ignored() {
        assert_eq!(uniform_byte_size(&uniform(gl::FLOAT_MAT3, -1, -1)), 36);
    }

    #[test]
    fn samplers_images_and_unknown() {
        assert_eq!(uniform_byte_size(&uniform(gl::SAMPLER_2D_ARRAY_SHADOW, 0, 0)), 4);
        assert_eq!(uniform_byte_size(&uniform(gl::UNSIGNED_INT_IMAGE_2D, 0, 0)), 4);
        assert_eq!(uniform_byte_size(&uniform(gl::DOUBLE, 0, 0)), 0);
        assert_eq!(classify(gl::IMAGE_CUBE), GlTypeClass::Image);
        assert_eq!(classify(gl::SAMPLER_CUBE_SHADOW), GlTypeClass::Sampler);
    }
}
