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

//! Serializes engine uniform values into uniform block memory.
//!
//! Packing is a pure function of the value, the reflected descriptor and the
//! caller's buffer. Writes use native endianness, matching what the driver
//! reads from a mapped or uploaded block.

use crate::renderer::api::{
    layout::{classify, GlTypeClass, ScalarKind},
    shader::ShaderUniform,
    uniform_value::UniformValue,
};

/// A single scalar write at a byte offset within the block.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scalar {
    Float(f32),
    Int(i32),
    UInt(u32),
    Bool(bool),
}

impl Scalar {
    fn width(self) -> usize {
        match self {
            Scalar::Bool(_) => 1,
            _ => 4,
        }
    }

    fn write(self, dst: &mut [u8]) {
        match self {
            Scalar::Float(v) => dst.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::Int(v) => dst.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::UInt(v) => dst.copy_from_slice(bytemuck::bytes_of(&v)),
            Scalar::Bool(v) => dst[0] = u8::from(v),
        }
    }
}

fn scalar_of(value: &UniformValue, kind: ScalarKind, index: usize) -> Scalar {
    match kind {
        ScalarKind::Float => Scalar::Float(value.float_at(index)),
        ScalarKind::Int => Scalar::Int(value.int_at(index)),
        ScalarKind::UInt => Scalar::UInt(value.uint_at(index)),
        ScalarKind::Bool => Scalar::Bool(value.bool_at(index)),
    }
}

/// Computes every `(byte offset, scalar)` pair a uniform occupies.
fn plan_writes(value: &UniformValue, uniform: &ShaderUniform) -> Option<Vec<(usize, Scalar)>> {
    let base = uniform.offset.max(0) as usize;
    let elements = uniform.size.max(1) as usize;
    let array_stride = uniform.array_stride.max(0) as usize;
    let matrix_stride = uniform.matrix_stride.max(0) as usize;

    let (kind, components) = match classify(uniform.gl_type) {
        GlTypeClass::Vector { kind, components } => (kind, components as usize),
        // Texture units are plain ints in a block.
        GlTypeClass::Sampler | GlTypeClass::Image => (ScalarKind::Int, 1),
        GlTypeClass::Matrix { columns, rows } => {
            let (columns, rows) = (columns as usize, rows as usize);
            let column_stride = if matrix_stride > 0 { matrix_stride } else { rows * 4 };
            let element_stride = if array_stride > 0 {
                array_stride
            } else {
                column_stride * columns
            };
            let mut writes = Vec::with_capacity(elements * columns * rows);
            for element in 0..elements {
                for column in 0..columns {
                    for row in 0..rows {
                        let index = (element * columns + column) * rows + row;
                        let at = base + element * element_stride + column * column_stride + row * 4;
                        writes.push((at, Scalar::Float(value.float_at(index))));
                    }
                }
            }
            return Some(writes);
        }
        GlTypeClass::Unknown => return None,
    };

    let width = kind.byte_width() as usize;
    let element_stride = if array_stride > 0 {
        array_stride
    } else {
        width * components
    };
    let mut writes = Vec::with_capacity(elements * components);
    for element in 0..elements {
        for component in 0..components {
            let index = element * components + component;
            let at = base + element * element_stride + component * width;
            writes.push((at, scalar_of(value, kind, index)));
        }
    }
    Some(writes)
}

/// Writes `value` into `buffer` at the location described by `uniform`.
///
/// Arrays honour `array_stride`, matrices honour `matrix_stride` and are read
/// column-major from the value. Missing components are written as zero.
/// Samplers and images are written as a 4-byte texture unit index.
///
/// Nothing is written when the type is unknown or when any write would land
/// outside `buffer`; both cases log a warning.
///
/// # Arguments
///
/// * `value`: The engine-side value.
/// * `uniform`: The reflected block member.
/// * `buffer`: The block memory, owned and synchronized by the caller.
///
/// # Returns
///
/// `true` if the value was written.
pub fn build_uniform_buffer(
    value: &UniformValue,
    uniform: &ShaderUniform,
    buffer: &mut [u8],
) -> bool {
    let Some(writes) = plan_writes(value, uniform) else {
        log::warn!(
            "UniformPacker: unsupported uniform type {:#x} for '{}'",
            uniform.gl_type,
            uniform.name
        );
        return false;
    };

    let end = writes
        .iter()
        .map(|(at, scalar)| at + scalar.width())
        .max()
        .unwrap_or(0);
    if end > buffer.len() {
        log::warn!(
            "UniformPacker: '{}' needs {} bytes but the block holds {}",
            uniform.name,
            end,
            buffer.len()
        );
        return false;
    }

    for (at, scalar) in writes {
        scalar.write(&mut buffer[at..at + scalar.width()]);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::api::gl;

    fn member(
        gl_type: u32,
        offset: i32,
        size: i32,
        array_stride: i32,
        matrix_stride: i32,
    ) -> ShaderUniform {
        ShaderUniform {
            name: "member".into(),
            gl_type,
            size,
            location: -1,
            block_index: 0,
            offset,
            array_stride,
            matrix_stride,
            raw_byte_size: 0,
        }
    }

    fn read_f32(buffer: &[u8], at: usize) -> f32 {
        bytemuck::pod_read_unaligned(&buffer[at..at + 4])
    }

    fn read_i32(buffer: &[u8], at: usize) -> i32 {
        bytemuck::pod_read_unaligned(&buffer[at..at + 4])
    }

    #[test]
    fn vec3_at_offset_round_trips() {
        let mut buffer = vec![0u8; 32];
        let value = UniformValue::from([1.0f32, 2.5, -3.0]);
        assert!(build_uniform_buffer(&value, &member(gl::FLOAT_VEC3, 16, 1, 0, 0), &mut buffer));
        assert_eq!(read_f32(&buffer, 16), 1.0);
        assert_eq!(read_f32(&buffer, 20), 2.5);
        assert_eq!(read_f32(&buffer, 24), -3.0);
        assert!(buffer[..16].iter().all(|b| *b == 0));
    }

    #[test]
    fn float_array_uses_array_stride() {
        let mut buffer = vec![0u8; 48];
        let value = UniformValue::from([1.0f32, 2.0, 3.0]);
        assert!(build_uniform_buffer(&value, &member(gl::FLOAT, 0, 3, 16, 0), &mut buffer));
        assert_eq!(read_f32(&buffer, 0), 1.0);
        assert_eq!(read_f32(&buffer, 16), 2.0);
        assert_eq!(read_f32(&buffer, 32), 3.0);
    }

    #[test]
    fn mat3_uses_matrix_stride_per_column() {
        let mut buffer = vec![0u8; 48];
        let value = UniformValue::from([[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert!(build_uniform_buffer(&value, &member(gl::FLOAT_MAT3, 0, 1, 0, 16), &mut buffer));
        for column in 0..3 {
            for row in 0..3 {
                let expected = (column * 3 + row + 1) as f32;
                assert_eq!(read_f32(&buffer, column * 16 + row * 4), expected);
            }
            // std140 padding word stays untouched
            assert_eq!(read_f32(&buffer, column * 16 + 12), 0.0);
        }
    }

    #[test]
    fn non_square_matrix_without_strides_is_tight() {
        let mut buffer = vec![0u8; 24];
        // 2 columns, 3 rows
        let value = UniformValue::from([[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(build_uniform_buffer(&value, &member(gl::FLOAT_MAT2X3, 0, 1, 0, 0), &mut buffer));
        let packed: Vec<f32> = (0..6).map(|i| read_f32(&buffer, i * 4)).collect();
        assert_eq!(packed, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn bools_are_one_byte_each() {
        let mut buffer = vec![0xAAu8; 4];
        let value = UniformValue::from([true, false, true]);
        assert!(build_uniform_buffer(&value, &member(gl::BOOL_VEC3, 0, 1, 0, 0), &mut buffer));
        assert_eq!(buffer, vec![1, 0, 1, 0xAA]);
    }

    #[test]
    fn sampler_writes_texture_unit() {
        let mut buffer = vec![0u8; 8];
        assert!(build_uniform_buffer(
            &UniformValue::from(5i32),
            &member(gl::SAMPLER_2D, 4, 1, 0, 0),
            &mut buffer
        ));
        assert_eq!(read_i32(&buffer, 4), 5);
    }

    #[test]
    fn uint_vector_round_trips() {
        let mut buffer = vec![0u8; 16];
        let value = UniformValue::from([7u32, u32::MAX]);
        assert!(build_uniform_buffer(
            &value,
            &member(gl::UNSIGNED_INT_VEC2, 8, 1, 0, 0),
            &mut buffer
        ));
        let first: u32 = bytemuck::pod_read_unaligned(&buffer[8..12]);
        let second: u32 = bytemuck::pod_read_unaligned(&buffer[12..16]);
        assert_eq!((first, second), (7, u32::MAX));
    }

    #[test]
    fn unknown_type_leaves_buffer_untouched() {
        let mut buffer = vec![0x55u8; 16];
        assert!(!build_uniform_buffer(
            &UniformValue::from(1.0f32),
            &member(gl::DOUBLE, 0, 1, 0, 0),
            &mut buffer
        ));
        assert!(buffer.iter().all(|b| *b == 0x55));
    }

    #[test]
    fn overflowing_write_is_refused() {
        let mut buffer = vec![0u8; 8];
        let value = UniformValue::from([1.0f32; 4]);
        assert!(!build_uniform_buffer(&value, &member(gl::FLOAT_VEC4, 0, 1, 0, 0), &mut buffer));
        assert!(buffer.iter().all(|b| *b == 0));
    }
}
