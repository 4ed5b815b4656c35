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

//! Fixed-function state, compute dispatch and image units.

use approx::relative_eq;
use aster_core::renderer::api::{gl, Feature, MemoryBarrierFlags};
use aster_core::HelperVariant;

use super::helper::GlGraphicsHelper;

fn has_indexed_state(variant: HelperVariant) -> bool {
    matches!(
        variant,
        HelperVariant::Gl3_2 | HelperVariant::Gl3_3 | HelperVariant::Gl4 | HelperVariant::Es3_2
    )
}

fn is_gl3_or_newer(variant: HelperVariant) -> bool {
    matches!(
        variant,
        HelperVariant::Gl3_2 | HelperVariant::Gl3_3 | HelperVariant::Gl4
    )
}

pub(super) fn blend_func_i(helper: &GlGraphicsHelper, buffer: u32, src: u32, dst: u32) {
    if helper.variant.supports(Feature::DrawBuffersBlend) {
        helper.gl.blend_func_i(buffer, src, dst);
    } else {
        helper.warn_unsupported(
            "blend_func_i",
            format_args!("glBlendFunci() not supported by {}", helper.variant),
        );
    }
}

pub(super) fn blend_func_separate_i(
    helper: &GlGraphicsHelper,
    buffer: u32,
    src_rgb: u32,
    dst_rgb: u32,
    src_alpha: u32,
    dst_alpha: u32,
) {
    if helper.variant.supports(Feature::DrawBuffersBlend) {
        helper
            .gl
            .blend_func_separate_i(buffer, src_rgb, dst_rgb, src_alpha, dst_alpha);
    } else {
        helper.warn_unsupported(
            "blend_func_separate_i",
            format_args!("glBlendFuncSeparatei() not supported by {}", helper.variant),
        );
    }
}

pub(super) fn alpha_test(helper: &GlGraphicsHelper, func: u32, reference: f32) {
    if helper.variant == HelperVariant::Gl2 {
        helper.gl.enable(gl::ALPHA_TEST);
        helper.gl.alpha_func(func, reference);
    } else {
        helper.warn_unsupported(
            "alpha_test",
            format_args!(
                "AlphaTest not available with {}, discard in the fragment shader instead",
                helper.variant
            ),
        );
    }
}

pub(super) fn raster_mode(helper: &GlGraphicsHelper, face: u32, mode: u32) {
    if helper.is_es() {
        helper.warn_unsupported(
            "raster_mode",
            format_args!("glPolygonMode is not supported with {}", helper.variant),
        );
    } else {
        helper.gl.polygon_mode(face, mode);
    }
}

pub(super) fn set_msaa_enabled(helper: &GlGraphicsHelper, enabled: bool) {
    if !helper.is_es() {
        if enabled {
            helper.gl.enable(gl::MULTISAMPLE);
        } else {
            helper.gl.disable(gl::MULTISAMPLE);
        }
    } else if !enabled {
        helper.warn_once(
            "msaa",
            format_args!("MSAA cannot be disabled with {}", helper.variant),
        );
    }
}

fn refuse_clip_planes(helper: &GlGraphicsHelper) -> bool {
    if helper.is_es() {
        log::error!("User clip planes are not supported by {}", helper.variant);
        return true;
    }
    false
}

pub(super) fn enable_clip_plane(helper: &GlGraphicsHelper, index: u32) {
    if !refuse_clip_planes(helper) {
        helper.gl.enable(gl::CLIP_DISTANCE0 + index);
    }
}

pub(super) fn disable_clip_plane(helper: &GlGraphicsHelper, index: u32) {
    if !refuse_clip_planes(helper) {
        helper.gl.disable(gl::CLIP_DISTANCE0 + index);
    }
}

/// GL 2 takes the plane equation directly. Core profiles compute clip
/// distances in the shader, so the call has nothing to set there.
pub(super) fn set_clip_plane(
    helper: &GlGraphicsHelper,
    index: u32,
    normal: [f32; 3],
    distance: f32,
) {
    if refuse_clip_planes(helper) || helper.variant != HelperVariant::Gl2 {
        return;
    }
    let equation = [
        f64::from(normal[0]),
        f64::from(normal[1]),
        f64::from(normal[2]),
        f64::from(distance),
    ];
    helper.gl.clip_plane(gl::CLIP_DISTANCE0 + index, equation);
}

pub(super) fn max_clip_plane_count(helper: &GlGraphicsHelper) -> i32 {
    if helper.is_es() {
        0
    } else {
        helper.gl.get_integer_v(gl::MAX_CLIP_DISTANCES)
    }
}

pub(super) fn point_size(helper: &GlGraphicsHelper, programmable: bool, value: f32) {
    match helper.variant {
        HelperVariant::Gl2 => {
            helper.gl.enable(gl::POINT_SPRITE);
            if programmable {
                helper.gl.enable(gl::PROGRAM_POINT_SIZE);
            } else {
                helper.gl.point_size(value);
            }
        }
        variant if is_gl3_or_newer(variant) => {
            if programmable {
                helper.gl.enable(gl::PROGRAM_POINT_SIZE);
            } else {
                helper.gl.disable(gl::PROGRAM_POINT_SIZE);
                helper.gl.point_size(value);
            }
        }
        _ => {
            // Resetting to the default size is not worth a warning.
            if programmable || !relative_eq!(value, 1.0) {
                helper.warn_unsupported(
                    "point_size",
                    format_args!(
                        "{} only supports setting the point size through gl_PointSize",
                        helper.variant
                    ),
                );
            }
        }
    }
}

pub(super) fn enable_primitive_restart(helper: &GlGraphicsHelper, restart_index: u32) {
    if helper.variant.supports(Feature::PrimitiveRestart) {
        helper.gl.primitive_restart_index(restart_index);
        helper.gl.enable(gl::PRIMITIVE_RESTART);
    } else if helper.is_es() {
        helper.warn_unsupported(
            "primitive_restart",
            format_args!("Primitive restart is not supported by {}", helper.variant),
        );
    }
}

pub(super) fn disable_primitive_restart(helper: &GlGraphicsHelper) {
    if helper.variant.supports(Feature::PrimitiveRestart) {
        helper.gl.disable(gl::PRIMITIVE_RESTART);
    } else if helper.is_es() {
        helper.warn_unsupported(
            "primitive_restart",
            format_args!("Primitive restart is not supported by {}", helper.variant),
        );
    }
}

pub(super) fn memory_barrier(helper: &GlGraphicsHelper, barriers: MemoryBarrierFlags) {
    if helper.variant.supports(Feature::ShaderImage) {
        helper.gl.memory_barrier(barriers.to_gl());
    } else {
        helper.warn_unsupported(
            "memory_barrier",
            format_args!("memory barrier is not supported by {}", helper.variant),
        );
    }
}

pub(super) fn enable_i(helper: &GlGraphicsHelper, cap: u32, index: u32, enable: bool) {
    if !has_indexed_state(helper.variant) {
        helper.warn_unsupported(
            "enable_i",
            format_args!("glEnablei() not supported by {}", helper.variant),
        );
    } else if enable {
        helper.gl.enable_i(cap, index);
    } else {
        helper.gl.disable_i(cap, index);
    }
}

pub(super) fn set_seamless_cubemap(helper: &GlGraphicsHelper, enabled: bool) {
    if !is_gl3_or_newer(helper.variant) {
        helper.warn_unsupported(
            "seamless_cubemap",
            format_args!(
                "GL_TEXTURE_CUBE_MAP_SEAMLESS not supported by {}",
                helper.variant
            ),
        );
    } else if enabled {
        helper.gl.enable(gl::TEXTURE_CUBE_MAP_SEAMLESS);
    } else {
        helper.gl.disable(gl::TEXTURE_CUBE_MAP_SEAMLESS);
    }
}

pub(super) fn clear_buffer_f(helper: &GlGraphicsHelper, draw_buffer: i32, color: [f32; 4]) {
    if helper.is_legacy() {
        helper.warn_unsupported(
            "clear_buffer",
            format_args!("glClearBuffer*() not supported by {}", helper.variant),
        );
    } else {
        helper.gl.clear_buffer_fv(gl::COLOR, draw_buffer, color);
    }
}

pub(super) fn dispatch_compute(helper: &GlGraphicsHelper, x: u32, y: u32, z: u32) {
    if helper.variant.supports(Feature::Compute) {
        helper.gl.dispatch_compute(x, y, z);
    } else {
        helper.warn_unsupported(
            "compute",
            format_args!("Compute Shaders are not supported by {}", helper.variant),
        );
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn bind_image_texture(
    helper: &GlGraphicsHelper,
    image_unit: u32,
    texture: u32,
    mip_level: i32,
    layered: bool,
    layer: i32,
    access: u32,
    format: u32,
) {
    if helper.variant.supports(Feature::ShaderImage) {
        helper
            .gl
            .bind_image_texture(image_unit, texture, mip_level, layered, layer, access, format);
    } else {
        helper.warn_unsupported(
            "shader_image",
            format_args!("Shader Images are not supported by {}", helper.variant),
        );
    }
}
