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

//! Integration tests for packing whole std140 uniform blocks.

use aster_core::renderer::api::{
    build_uniform_buffer, gl, uniform_byte_size, ShaderUniform, UniformValue,
};

fn block_member(
    name: &str,
    gl_type: u32,
    offset: i32,
    size: i32,
    array_stride: i32,
    matrix_stride: i32,
) -> ShaderUniform {
    let mut uniform = ShaderUniform {
        name: name.to_string(),
        gl_type,
        size,
        location: -1,
        block_index: 0,
        offset,
        array_stride,
        matrix_stride,
        ..Default::default()
    };
    uniform.raw_byte_size = uniform_byte_size(&uniform);
    uniform
}

fn read_f32(buffer: &[u8], at: usize) -> f32 {
    f32::from_ne_bytes([buffer[at], buffer[at + 1], buffer[at + 2], buffer[at + 3]])
}

fn read_i32(buffer: &[u8], at: usize) -> i32 {
    i32::from_ne_bytes([buffer[at], buffer[at + 1], buffer[at + 2], buffer[at + 3]])
}

#[test]
fn test_camera_block_packs_every_member() {
    // layout(std140) uniform Camera { mat4 view; vec3 eye; float exposure; vec4 tints[2]; };
    let view = block_member("Camera.view", gl::FLOAT_MAT4, 0, 1, 0, 16);
    let eye = block_member("Camera.eye", gl::FLOAT_VEC3, 64, 1, 0, 0);
    let exposure = block_member("Camera.exposure", gl::FLOAT, 76, 1, 0, 0);
    let tints = block_member("Camera.tints", gl::FLOAT_VEC4, 80, 2, 16, 0);

    let mut buffer = vec![0u8; 112];
    let columns = [
        [1.0f32, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [5.0, 6.0, 7.0, 1.0],
    ];
    assert!(build_uniform_buffer(&UniformValue::from(columns), &view, &mut buffer));
    let eye_value = UniformValue::from([1.0f32, 2.0, 3.0]);
    assert!(build_uniform_buffer(&eye_value, &eye, &mut buffer));
    assert!(build_uniform_buffer(&UniformValue::from(0.5f32), &exposure, &mut buffer));
    let tint_values = vec![0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
    assert!(build_uniform_buffer(&UniformValue::from(tint_values), &tints, &mut buffer));

    // Translation lives in the last column.
    assert_eq!(read_f32(&buffer, 48), 5.0);
    assert_eq!(read_f32(&buffer, 52), 6.0);
    assert_eq!(read_f32(&buffer, 56), 7.0);
    assert_eq!(read_f32(&buffer, 60), 1.0);
    assert_eq!(read_f32(&buffer, 0), 1.0);

    assert_eq!(read_f32(&buffer, 64), 1.0);
    assert_eq!(read_f32(&buffer, 72), 3.0);
    assert_eq!(read_f32(&buffer, 76), 0.5);

    assert_eq!(read_f32(&buffer, 80), 0.1);
    assert_eq!(read_f32(&buffer, 92), 0.4);
    assert_eq!(read_f32(&buffer, 96), 0.5);
    assert_eq!(read_f32(&buffer, 108), 0.8);
}

#[test]
fn test_mat3_columns_are_padded_to_matrix_stride() {
    let normal = block_member("Object.normalMatrix", gl::FLOAT_MAT3, 16, 1, 0, 16);
    let mut buffer = vec![0xAAu8; 64];

    let value = UniformValue::from([[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    assert!(build_uniform_buffer(&value, &normal, &mut buffer));

    assert_eq!(read_f32(&buffer, 16), 1.0);
    assert_eq!(read_f32(&buffer, 24), 3.0);
    assert_eq!(read_f32(&buffer, 32), 4.0);
    assert_eq!(read_f32(&buffer, 48), 7.0);
    assert_eq!(read_f32(&buffer, 56), 9.0);
    // Padding after each column is left alone.
    assert!(buffer[28..32].iter().all(|b| *b == 0xAA));
    assert!(buffer[..16].iter().all(|b| *b == 0xAA));
}

#[test]
fn test_sampler_array_in_block_writes_units() {
    let shadows = block_member("Lights.shadowMaps", gl::SAMPLER_2D, 0, 3, 16, 0);
    let mut buffer = vec![0u8; 48];

    let units = UniformValue::from(vec![2, 3, 4]);
    assert!(build_uniform_buffer(&units, &shadows, &mut buffer));
    assert_eq!(read_i32(&buffer, 0), 2);
    assert_eq!(read_i32(&buffer, 16), 3);
    assert_eq!(read_i32(&buffer, 32), 4);
}

#[test]
fn test_short_value_pads_with_zero() {
    let tints = block_member("Camera.tints", gl::FLOAT_VEC4, 0, 2, 16, 0);
    let mut buffer = vec![0xFFu8; 32];

    let value = UniformValue::from([9.0f32, 8.0]);
    assert!(build_uniform_buffer(&value, &tints, &mut buffer));
    assert_eq!(read_f32(&buffer, 0), 9.0);
    assert_eq!(read_f32(&buffer, 4), 8.0);
    assert_eq!(read_f32(&buffer, 8), 0.0);
    assert_eq!(read_f32(&buffer, 28), 0.0);
}

#[test]
fn test_member_past_block_end_is_refused() {
    let tints = block_member("Camera.tints", gl::FLOAT_VEC4, 80, 2, 16, 0);
    let mut buffer = vec![0x11u8; 96];

    let value = UniformValue::from(vec![1.0f32; 8]);
    assert!(!build_uniform_buffer(&value, &tints, &mut buffer));
    assert!(buffer.iter().all(|b| *b == 0x11));
}

#[test]
fn test_reflected_byte_sizes() {
    assert_eq!(block_member("m", gl::FLOAT_MAT4, 0, 1, 0, 16).raw_byte_size, 64);
    assert_eq!(block_member("n", gl::FLOAT_MAT3, 0, 1, 0, 16).raw_byte_size, 48);
    assert_eq!(block_member("v", gl::FLOAT_VEC3, 0, 1, 0, 0).raw_byte_size, 12);
    assert_eq!(block_member("s", gl::SAMPLER_2D, 0, 1, 0, 0).raw_byte_size, 4);
    // Array sizes scale by the reported stride.
    assert_eq!(block_member("a", gl::FLOAT, 0, 4, 16, 0).raw_byte_size, 64);
}
