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

//! Draw calls and vertex input.
//!
//! The newest variants map each request onto a single native call. Older
//! ones drop the offsets they lack, with a warning per dropped offset, and
//! GL 2 / ES 2 emulate instancing with repeated plain draws.

use aster_core::renderer::api::{gl, Feature};
use aster_core::HelperVariant;

use super::helper::{GlGraphicsHelper, ELEMENT_INDEX_UINT_EXTENSION};

/// Returns `true` if the context accepts indices of `index_type`.
///
/// ES 2 without `GL_OES_element_index_uint` cannot draw 32-bit indices; the
/// draw is skipped and reported once.
pub(super) fn index_type_supported(helper: &GlGraphicsHelper, index_type: u32) -> bool {
    if index_type != gl::UNSIGNED_INT || helper.element_index_uint {
        return true;
    }
    helper.warn_once(
        "element_index_uint",
        format_args!(
            "GL_UNSIGNED_INT index type not supported on this system ({ELEMENT_INDEX_UINT_EXTENSION} missing), skipping draw call"
        ),
    );
    false
}

fn has_base_vertex(variant: HelperVariant) -> bool {
    matches!(
        variant,
        HelperVariant::Gl3_2 | HelperVariant::Gl3_3 | HelperVariant::Gl4 | HelperVariant::Es3_2
    )
}

fn warn_base_vertex(helper: &GlGraphicsHelper, base_vertex: i32) {
    if base_vertex != 0 {
        helper.warn_unsupported(
            "base_vertex",
            format_args!(
                "{} does not support base vertex offsets, drawing without baseVertex = {base_vertex}",
                helper.variant
            ),
        );
    }
}

fn warn_base_instance(helper: &GlGraphicsHelper, base_instance: i32) {
    if base_instance != 0 {
        helper.warn_unsupported(
            "base_instance",
            format_args!(
                "{} does not support base instance offsets, drawing without baseInstance = {base_instance}",
                helper.variant
            ),
        );
    }
}

pub(super) fn draw_elements(
    helper: &GlGraphicsHelper,
    primitive: u32,
    count: i32,
    index_type: u32,
    offset: usize,
    base_vertex: i32,
) {
    if !index_type_supported(helper, index_type) {
        return;
    }
    if has_base_vertex(helper.variant) {
        helper
            .gl
            .draw_elements_base_vertex(primitive, count, index_type, offset, base_vertex);
    } else {
        warn_base_vertex(helper, base_vertex);
        helper.gl.draw_elements(primitive, count, index_type, offset);
    }
}

pub(super) fn draw_arrays_instanced(
    helper: &GlGraphicsHelper,
    primitive: u32,
    first: i32,
    count: i32,
    instances: i32,
) {
    if helper.is_legacy() {
        for _ in 0..instances.max(0) {
            helper.gl.draw_arrays(primitive, first, count);
        }
    } else {
        helper
            .gl
            .draw_arrays_instanced(primitive, first, count, instances);
    }
}

pub(super) fn draw_arrays_instanced_base_instance(
    helper: &GlGraphicsHelper,
    primitive: u32,
    first: i32,
    count: i32,
    instances: i32,
    base_instance: i32,
) {
    if helper.variant == HelperVariant::Gl4 {
        helper.gl.draw_arrays_instanced_base_instance(
            primitive,
            first,
            count,
            instances,
            base_instance.max(0) as u32,
        );
        return;
    }
    warn_base_instance(helper, base_instance);
    draw_arrays_instanced(helper, primitive, first, count, instances);
}

#[allow(clippy::too_many_arguments)]
pub(super) fn draw_elements_instanced_base_vertex_base_instance(
    helper: &GlGraphicsHelper,
    primitive: u32,
    count: i32,
    index_type: u32,
    offset: usize,
    instances: i32,
    base_vertex: i32,
    base_instance: i32,
) {
    if helper.variant == HelperVariant::Gl4 {
        helper.gl.draw_elements_instanced_base_vertex_base_instance(
            primitive,
            count,
            index_type,
            offset,
            instances,
            base_vertex,
            base_instance.max(0) as u32,
        );
        return;
    }

    warn_base_instance(helper, base_instance);
    if has_base_vertex(helper.variant) {
        helper.gl.draw_elements_instanced_base_vertex(
            primitive,
            count,
            index_type,
            offset,
            instances,
            base_vertex,
        );
        return;
    }

    warn_base_vertex(helper, base_vertex);
    if !index_type_supported(helper, index_type) {
        return;
    }
    if helper.is_legacy() {
        for _ in 0..instances.max(0) {
            helper.gl.draw_elements(primitive, count, index_type, offset);
        }
    } else {
        helper
            .gl
            .draw_elements_instanced(primitive, count, index_type, offset, instances);
    }
}

fn has_indirect(variant: HelperVariant) -> bool {
    variant.supports(Feature::IndirectDrawing)
}

pub(super) fn draw_arrays_indirect(helper: &GlGraphicsHelper, primitive: u32, indirect: usize) {
    if has_indirect(helper.variant) {
        helper.gl.draw_arrays_indirect(primitive, indirect);
    } else {
        helper.warn_unsupported(
            "indirect",
            format_args!("Indirect drawing is not supported by {}", helper.variant),
        );
    }
}

pub(super) fn draw_elements_indirect(
    helper: &GlGraphicsHelper,
    primitive: u32,
    index_type: u32,
    indirect: usize,
) {
    if has_indirect(helper.variant) {
        helper
            .gl
            .draw_elements_indirect(primitive, index_type, indirect);
    } else {
        helper.warn_unsupported(
            "indirect",
            format_args!("Indirect drawing is not supported by {}", helper.variant),
        );
    }
}

pub(super) fn set_vertices_per_patch(helper: &GlGraphicsHelper, vertices: i32) {
    if helper.variant.supports(Feature::Tessellation) {
        helper.gl.patch_parameter_i(gl::PATCH_VERTICES, vertices);
    } else {
        helper.warn_unsupported(
            "tessellation",
            format_args!("Tessellation is not supported by {}", helper.variant),
        );
    }
}

fn is_float_attribute(shader_data_type: u32) -> bool {
    matches!(
        shader_data_type,
        gl::FLOAT
            | gl::FLOAT_VEC2
            | gl::FLOAT_VEC3
            | gl::FLOAT_VEC4
            | gl::FLOAT_MAT2
            | gl::FLOAT_MAT3
            | gl::FLOAT_MAT4
    )
}

fn is_non_square_matrix(shader_data_type: u32) -> bool {
    matches!(
        shader_data_type,
        gl::FLOAT_MAT2X3
            | gl::FLOAT_MAT2X4
            | gl::FLOAT_MAT3X2
            | gl::FLOAT_MAT3X4
            | gl::FLOAT_MAT4X2
            | gl::FLOAT_MAT4X3
    )
}

fn is_integer_attribute(shader_data_type: u32) -> bool {
    matches!(
        shader_data_type,
        gl::INT
            | gl::INT_VEC2
            | gl::INT_VEC3
            | gl::INT_VEC4
            | gl::UNSIGNED_INT
            | gl::UNSIGNED_INT_VEC2
            | gl::UNSIGNED_INT_VEC3
            | gl::UNSIGNED_INT_VEC4
    )
}

#[allow(clippy::too_many_arguments)]
pub(super) fn vertex_attribute_pointer(
    helper: &GlGraphicsHelper,
    shader_data_type: u32,
    index: u32,
    size: i32,
    component_type: u32,
    normalized: bool,
    stride: i32,
    offset: usize,
) {
    let legacy = helper.is_legacy();
    let non_square =
        helper.variant != HelperVariant::Es2 && is_non_square_matrix(shader_data_type);
    if is_float_attribute(shader_data_type) || non_square {
        helper
            .gl
            .vertex_attrib_pointer(index, size, component_type, normalized, stride, offset);
    } else if !legacy && is_integer_attribute(shader_data_type) {
        helper
            .gl
            .vertex_attrib_i_pointer(index, size, component_type, stride, offset);
    } else {
        log::warn!("vertexAttribPointer: Unhandled type {shader_data_type:#x}");
        panic!(
            "vertexAttribPointer: unhandled shader data type {shader_data_type:#x} on {}",
            helper.variant
        );
    }
}

pub(super) fn vertex_attrib_divisor(helper: &GlGraphicsHelper, index: u32, divisor: u32) {
    match helper.variant {
        HelperVariant::Gl3_3
        | HelperVariant::Gl4
        | HelperVariant::Es3
        | HelperVariant::Es3_1
        | HelperVariant::Es3_2 => helper.gl.vertex_attrib_divisor(index, divisor),
        _ => helper.warn_unsupported(
            "vertex_attrib_divisor",
            format_args!(
                "Vertex attribute divisor is not supported by {}",
                helper.variant
            ),
        ),
    }
}
