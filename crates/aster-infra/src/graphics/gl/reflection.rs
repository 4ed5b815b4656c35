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

//! Translation of native program introspection into reflection descriptors.

use aster_core::renderer::api::{
    gl, layout, Feature, ShaderAttribute, ShaderStorageBlock, ShaderUniform, ShaderUniformBlock,
};

use super::helper::GlGraphicsHelper;

const ARRAY_SUFFIX: &str = "[0]";

fn active_count(helper: &GlGraphicsHelper, program: u32, pname: u32) -> u32 {
    helper.gl.get_program_iv(program, pname).max(0) as u32
}

/// Some drivers report arrays without their `[0]` suffix. ES 3 reports them
/// correctly and is left alone.
fn normalize_array_name(helper: &GlGraphicsHelper, mut name: String, size: i32) -> String {
    let applies = helper.settings.array_name_workaround && !helper.variant.is_es3_family();
    if applies && size > 1 && !name.ends_with(ARRAY_SUFFIX) {
        name.push_str(ARRAY_SUFFIX);
    }
    name
}

pub(super) fn program_uniforms_and_locations(
    helper: &GlGraphicsHelper,
    program: u32,
) -> Vec<ShaderUniform> {
    let count = active_count(helper, program, gl::ACTIVE_UNIFORMS);
    let max_name_length = helper.settings.max_name_length;

    let mut uniforms: Vec<ShaderUniform> = (0..count)
        .map(|index| {
            let active = helper.gl.get_active_uniform(program, index, max_name_length);
            let name = normalize_array_name(helper, active.name, active.size);
            let location = helper.gl.get_uniform_location(program, &name);
            ShaderUniform {
                name,
                gl_type: active.gl_type,
                size: active.size,
                location,
                block_index: -1,
                offset: -1,
                array_stride: -1,
                matrix_stride: -1,
                raw_byte_size: 0,
            }
        })
        .collect();

    if helper.variant.supports(Feature::UniformBufferObject) && !uniforms.is_empty() {
        let indices: Vec<u32> = (0..count).collect();
        let query = |pname| helper.gl.get_active_uniforms_iv(program, &indices, pname);
        let block_indices = query(gl::UNIFORM_BLOCK_INDEX);
        let offsets = query(gl::UNIFORM_OFFSET);
        let array_strides = query(gl::UNIFORM_ARRAY_STRIDE);
        let matrix_strides = query(gl::UNIFORM_MATRIX_STRIDE);

        for (i, uniform) in uniforms.iter_mut().enumerate() {
            uniform.block_index = block_indices.get(i).copied().unwrap_or(-1);
            uniform.offset = offsets.get(i).copied().unwrap_or(-1);
            uniform.array_stride = array_strides.get(i).copied().unwrap_or(-1);
            uniform.matrix_stride = matrix_strides.get(i).copied().unwrap_or(-1);
        }
    }

    for uniform in &mut uniforms {
        uniform.raw_byte_size = layout::uniform_byte_size(uniform);
    }

    log::debug!(
        "{}: program {program} has {} active uniforms",
        helper.variant,
        uniforms.len()
    );
    uniforms
}

pub(super) fn program_uniform_blocks(
    helper: &GlGraphicsHelper,
    program: u32,
) -> Vec<ShaderUniformBlock> {
    if !helper.variant.supports(Feature::UniformBufferObject) {
        helper.warn_unsupported(
            "ubo",
            format_args!("UBO are not supported by {}", helper.variant),
        );
        return Vec::new();
    }

    let count = active_count(helper, program, gl::ACTIVE_UNIFORM_BLOCKS);
    let max_name_length = helper.settings.max_name_length;
    (0..count)
        .map(|index| {
            let block_iv = |pname| helper.gl.get_active_uniform_block_iv(program, index, pname);
            ShaderUniformBlock {
                name: helper
                    .gl
                    .get_active_uniform_block_name(program, index, max_name_length),
                index: index as i32,
                active_uniforms_count: block_iv(gl::UNIFORM_BLOCK_ACTIVE_UNIFORMS),
                binding: block_iv(gl::UNIFORM_BLOCK_BINDING),
                size: block_iv(gl::UNIFORM_BLOCK_DATA_SIZE),
            }
        })
        .collect()
}

pub(super) fn program_shader_storage_blocks(
    helper: &GlGraphicsHelper,
    program: u32,
) -> Vec<ShaderStorageBlock> {
    if !helper.variant.supports(Feature::ShaderStorageObject) {
        helper.warn_unsupported(
            "ssbo",
            format_args!("SSBO are not supported by {}", helper.variant),
        );
        return Vec::new();
    }

    let count = helper
        .gl
        .get_program_interface_iv(program, gl::SHADER_STORAGE_BLOCK, gl::ACTIVE_RESOURCES)
        .max(0) as u32;
    let max_name_length = helper.settings.max_name_length;
    let properties = [
        gl::BUFFER_BINDING,
        gl::BUFFER_DATA_SIZE,
        gl::NUM_ACTIVE_VARIABLES,
    ];

    (0..count)
        .map(|index| {
            let values = helper.gl.get_program_resource_iv(
                program,
                gl::SHADER_STORAGE_BLOCK,
                index,
                &properties,
            );
            let value = |i: usize| values.get(i).copied().unwrap_or(0);
            ShaderStorageBlock {
                name: helper.gl.get_program_resource_name(
                    program,
                    gl::SHADER_STORAGE_BLOCK,
                    index,
                    max_name_length,
                ),
                index: index as i32,
                binding: value(0),
                size: value(1),
                active_variables_count: value(2),
            }
        })
        .collect()
}

pub(super) fn program_attributes_and_locations(
    helper: &GlGraphicsHelper,
    program: u32,
) -> Vec<ShaderAttribute> {
    let count = active_count(helper, program, gl::ACTIVE_ATTRIBUTES);
    let max_name_length = helper.settings.max_name_length;
    (0..count)
        .map(|index| {
            let active = helper.gl.get_active_attrib(program, index, max_name_length);
            let location = helper.gl.get_attrib_location(program, &active.name);
            ShaderAttribute {
                name: active.name,
                gl_type: active.gl_type,
                size: active.size,
                location,
            }
        })
        .collect()
}
