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

//! The interface every backend variant presents to the renderer core.

use std::ptr::NonNull;

use crate::renderer::api::{
    layout::{self, GlTypeClass, ScalarKind},
    Attachment, FboBindMode, Feature, HelperVariant, MemoryBarrierFlags, ProgramId,
    ProgramReflection, ShaderAttribute, ShaderStorageBlock, ShaderUniform, ShaderUniformBlock,
    SyncHandle, TextureBinding, UniformType, UniformValue,
};

/// The stable, versioned interface to one live GPU context.
///
/// A context owns exactly one helper for its lifetime. All calls come from
/// the thread the context is current on; nothing here locks.
///
/// Calls a variant cannot honour never fail with an error. They log a warning
/// naming the unsupported request and either run the nearest safe call or do
/// nothing. Query methods return a sentinel (`None`, `false`, an empty list)
/// in that case, which means "mechanism unavailable".
pub trait GraphicsHelper {
    /// The variant this helper implements.
    fn variant(&self) -> HelperVariant;

    /// Looks a feature up in the static capability table of [`Self::variant`].
    fn supports_feature(&self, feature: Feature) -> bool {
        self.variant().supports(feature)
    }

    // --- Drawing ---

    /// Draws `count` vertices starting at `first`.
    fn draw_arrays(&mut self, primitive: u32, first: i32, count: i32);

    /// Draws indexed geometry. `offset` is a byte offset into the bound index buffer.
    fn draw_elements(
        &mut self,
        primitive: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    );

    /// Draws `instances` instances of a vertex range.
    fn draw_arrays_instanced(&mut self, primitive: u32, first: i32, count: i32, instances: i32);

    /// Draws `instances` instances of a vertex range starting at `base_instance`.
    fn draw_arrays_instanced_base_instance(
        &mut self,
        primitive: u32,
        first: i32,
        count: i32,
        instances: i32,
        base_instance: i32,
    );

    /// Draws instanced indexed geometry with base vertex and base instance offsets.
    ///
    /// Variants without the offsets log one warning per nonzero offset and
    /// draw without them.
    #[allow(clippy::too_many_arguments)]
    fn draw_elements_instanced_base_vertex_base_instance(
        &mut self,
        primitive: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
        base_instance: i32,
    );

    /// Draws with parameters read from the bound indirect buffer.
    fn draw_arrays_indirect(&mut self, primitive: u32, indirect: usize);

    /// Draws indexed geometry with parameters read from the bound indirect buffer.
    fn draw_elements_indirect(&mut self, primitive: u32, index_type: u32, indirect: usize);

    /// Sets the patch size for tessellated draws.
    fn set_vertices_per_patch(&mut self, vertices: i32);

    // --- Vertex input ---

    /// Describes the layout of a vertex attribute.
    ///
    /// The call is chosen from `shader_data_type`, the type the shader
    /// declares: float vectors and matrices use the float pointer call, int
    /// and uint vectors the integer pointer call.
    ///
    /// # Panics
    ///
    /// Panics if `shader_data_type` is not a vertex attribute type the
    /// variant knows. That is a caller contract violation.
    #[allow(clippy::too_many_arguments)]
    fn vertex_attribute_pointer(
        &mut self,
        shader_data_type: u32,
        index: u32,
        size: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    );

    /// Sets the instance divisor of an attribute.
    fn vertex_attrib_divisor(&mut self, index: u32, divisor: u32);

    /// Enables an attribute array.
    fn enable_vertex_attribute_array(&mut self, location: u32);

    /// Makes `program` current.
    fn use_program(&mut self, program: ProgramId);

    // --- Framebuffers ---

    /// Creates a framebuffer object.
    fn create_frame_buffer_object(&mut self) -> u32;

    /// Deletes a framebuffer object.
    fn release_frame_buffer_object(&mut self, frame_buffer: u32);

    /// Returns `true` if the bound framebuffer is complete.
    fn check_frame_buffer_complete(&mut self) -> bool;

    /// Binds a framebuffer for drawing, reading or both.
    fn bind_frame_buffer_object(&mut self, frame_buffer: u32, mode: FboBindMode);

    /// The framebuffer currently bound.
    fn bound_frame_buffer_object(&mut self) -> u32;

    /// Attaches a texture to the bound framebuffer.
    ///
    /// Binding all faces of a cube map at once is refused with a warning and
    /// issues no native call. Unsupported targets are logged and skipped.
    fn bind_frame_buffer_attachment(&mut self, texture: &TextureBinding, attachment: &Attachment);

    /// Attaches a render buffer to the bound framebuffer.
    fn bind_frame_buffer_attachment_render_buffer(
        &mut self,
        render_buffer: u32,
        attachment: &Attachment,
    );

    /// Returns `true` when `attachment` must be backed by a render buffer
    /// instead of a texture on this variant.
    fn frame_buffer_needs_render_buffer(&self, attachment: &Attachment) -> bool;

    /// Selects the color attachments drawn into, by color index.
    fn draw_buffers(&mut self, color_indices: &[i32]);

    /// Selects the read buffer.
    fn read_buffer(&mut self, mode: u32);

    /// Selects a single draw buffer.
    fn draw_buffer(&mut self, mode: u32);

    /// Binds named fragment outputs to color numbers before linking.
    fn bind_frag_data_location(&mut self, program: ProgramId, outputs: &[(String, u32)]);

    /// Copies a rectangle between the bound read and draw framebuffers.
    ///
    /// Rectangles are `[x0, y0, x1, y1]`.
    fn blit_framebuffer(&mut self, src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32);

    // --- Fixed-function state ---

    /// Sets the blend equation.
    fn blend_equation(&mut self, mode: u32);

    /// Sets the blend function of one draw buffer.
    fn blend_func_i(&mut self, buffer: u32, src: u32, dst: u32);

    /// Sets separate color and alpha blend functions of one draw buffer.
    fn blend_func_separate_i(
        &mut self,
        buffer: u32,
        src_rgb: u32,
        dst_rgb: u32,
        src_alpha: u32,
        dst_alpha: u32,
    );

    /// Enables the fixed-function alpha test.
    fn alpha_test(&mut self, func: u32, reference: f32);

    /// Enables depth testing with the given comparison.
    fn depth_test(&mut self, func: u32);

    /// Enables or disables depth writes.
    fn depth_mask(&mut self, enabled: bool);

    /// Sets the depth range.
    fn depth_range(&mut self, near: f64, far: f64);

    /// Sets the front face winding.
    fn front_face(&mut self, mode: u32);

    /// Sets the polygon rasterization mode.
    fn raster_mode(&mut self, face: u32, mode: u32);

    /// Toggles multisample rasterization.
    fn set_msaa_enabled(&mut self, enabled: bool);

    /// Toggles alpha to coverage.
    fn set_alpha_coverage_enabled(&mut self, enabled: bool);

    /// Enables a user clip plane.
    fn enable_clip_plane(&mut self, index: u32);

    /// Disables a user clip plane.
    fn disable_clip_plane(&mut self, index: u32);

    /// Sets a fixed-function clip plane equation.
    fn set_clip_plane(&mut self, index: u32, normal: [f32; 3], distance: f32);

    /// Number of user clip planes, `0` where they do not exist.
    fn max_clip_plane_count(&mut self) -> i32;

    /// Sets a fixed point size, or hands sizing to the program.
    fn point_size(&mut self, programmable: bool, value: f32);

    /// Enables primitive restart on `restart_index`.
    fn enable_primitive_restart(&mut self, restart_index: u32);

    /// Disables primitive restart.
    fn disable_primitive_restart(&mut self);

    /// Orders memory accesses across shader invocations.
    fn memory_barrier(&mut self, barriers: MemoryBarrierFlags);

    /// Enables an indexed capability.
    fn enable_i(&mut self, cap: u32, index: u32);

    /// Disables an indexed capability.
    fn disable_i(&mut self, cap: u32, index: u32);

    /// Toggles seamless cube map filtering.
    fn set_seamless_cubemap(&mut self, enabled: bool);

    /// Clears one color draw buffer to `color`.
    fn clear_buffer_f(&mut self, draw_buffer: i32, color: [f32; 4]);

    /// Launches compute work groups.
    fn dispatch_compute(&mut self, x: u32, y: u32, z: u32);

    /// Binds a texture level to an image unit.
    #[allow(clippy::too_many_arguments)]
    fn bind_image_texture(
        &mut self,
        image_unit: u32,
        texture: u32,
        mip_level: i32,
        layered: bool,
        layer: i32,
        access: u32,
        format: u32,
    );

    // --- Synchronization ---

    /// Inserts a fence. `None` means fences are unavailable.
    fn fence_sync(&mut self) -> Option<SyncHandle>;

    /// Blocks until `sync` signals or `timeout_ns` elapses.
    fn client_wait_sync(&mut self, sync: SyncHandle, timeout_ns: u64);

    /// Makes the server wait on `sync` without a timeout.
    fn wait_sync(&mut self, sync: SyncHandle);

    /// Polls `sync`. `false` also means fences are unavailable.
    fn was_sync_signaled(&mut self, sync: SyncHandle) -> bool;

    /// Deletes a fence.
    fn delete_sync(&mut self, sync: SyncHandle);

    // --- Buffers ---

    /// Maps `size` bytes of the buffer bound to `target` for reading and writing.
    ///
    /// The pointer stays valid until [`Self::unmap_buffer`]. `None` means the
    /// mapping failed or is unavailable.
    fn map_buffer(&mut self, target: u32, size: usize) -> Option<NonNull<u8>>;

    /// Unmaps the buffer bound to `target`.
    fn unmap_buffer(&mut self, target: u32) -> bool;

    /// Binds a buffer to an indexed binding point.
    fn bind_buffer_base(&mut self, target: u32, index: u32, buffer: u32);

    /// Assigns a uniform block to a binding point.
    fn bind_uniform_block(&mut self, program: ProgramId, block_index: u32, binding: u32);

    /// Assigns a shader storage block to a binding point.
    fn bind_shader_storage_block(&mut self, program: ProgramId, block_index: u32, binding: u32);

    // --- Uniform uploads ---

    /// Uploads `float` values.
    fn uniform_1fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads `vec2` values.
    fn uniform_2fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads `vec3` values.
    fn uniform_3fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads `vec4` values.
    fn uniform_4fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads `int` values.
    fn uniform_1iv(&mut self, location: i32, count: i32, values: &[i32]);
    /// Uploads `ivec2` values.
    fn uniform_2iv(&mut self, location: i32, count: i32, values: &[i32]);
    /// Uploads `ivec3` values.
    fn uniform_3iv(&mut self, location: i32, count: i32, values: &[i32]);
    /// Uploads `ivec4` values.
    fn uniform_4iv(&mut self, location: i32, count: i32, values: &[i32]);
    /// Uploads `uint` values.
    fn uniform_1uiv(&mut self, location: i32, count: i32, values: &[u32]);
    /// Uploads `uvec2` values.
    fn uniform_2uiv(&mut self, location: i32, count: i32, values: &[u32]);
    /// Uploads `uvec3` values.
    fn uniform_3uiv(&mut self, location: i32, count: i32, values: &[u32]);
    /// Uploads `uvec4` values.
    fn uniform_4uiv(&mut self, location: i32, count: i32, values: &[u32]);
    /// Uploads column-major `mat2` values.
    fn uniform_matrix_2fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat3` values.
    fn uniform_matrix_3fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat4` values.
    fn uniform_matrix_4fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat2x3` values.
    fn uniform_matrix_2x3fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat3x2` values.
    fn uniform_matrix_3x2fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat2x4` values.
    fn uniform_matrix_2x4fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat4x2` values.
    fn uniform_matrix_4x2fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat3x4` values.
    fn uniform_matrix_3x4fv(&mut self, location: i32, count: i32, values: &[f32]);
    /// Uploads column-major `mat4x3` values.
    fn uniform_matrix_4x3fv(&mut self, location: i32, count: i32, values: &[f32]);

    /// Returns `true` if a default-block uniform of `gl_type` can be uploaded
    /// on this variant.
    fn supports_uniform_upload(&self, gl_type: u32) -> bool;

    /// Uploads `value` to a default-block uniform through the matching entry point.
    ///
    /// Bools are uploaded as ints, samplers and images as their unit index.
    ///
    /// # Returns
    ///
    /// `true` if the value was handed to the driver. Block members, unknown
    /// types and shapes the variant cannot upload give `false`.
    fn apply_uniform(&mut self, uniform: &ShaderUniform, value: &UniformValue) -> bool {
        if uniform.is_block_member() || uniform.location < 0 {
            return false;
        }
        let location = uniform.location;
        let count = uniform.size.max(1);
        let elements = count as usize;

        match layout::classify(uniform.gl_type) {
            GlTypeClass::Vector { kind, components } => {
                let total = elements * components as usize;
                match (kind, components) {
                    (ScalarKind::Float, 1) => {
                        self.uniform_1fv(location, count, &value.to_floats(total))
                    }
                    (ScalarKind::Float, 2) => {
                        self.uniform_2fv(location, count, &value.to_floats(total))
                    }
                    (ScalarKind::Float, 3) => {
                        self.uniform_3fv(location, count, &value.to_floats(total))
                    }
                    (ScalarKind::Float, _) => {
                        self.uniform_4fv(location, count, &value.to_floats(total))
                    }
                    (ScalarKind::UInt, 1) => {
                        self.uniform_1uiv(location, count, &value.to_uints(total))
                    }
                    (ScalarKind::UInt, 2) => {
                        self.uniform_2uiv(location, count, &value.to_uints(total))
                    }
                    (ScalarKind::UInt, 3) => {
                        self.uniform_3uiv(location, count, &value.to_uints(total))
                    }
                    (ScalarKind::UInt, _) => {
                        self.uniform_4uiv(location, count, &value.to_uints(total))
                    }
                    (ScalarKind::Int | ScalarKind::Bool, 1) => {
                        self.uniform_1iv(location, count, &value.to_ints(total))
                    }
                    (ScalarKind::Int | ScalarKind::Bool, 2) => {
                        self.uniform_2iv(location, count, &value.to_ints(total))
                    }
                    (ScalarKind::Int | ScalarKind::Bool, 3) => {
                        self.uniform_3iv(location, count, &value.to_ints(total))
                    }
                    (ScalarKind::Int | ScalarKind::Bool, _) => {
                        self.uniform_4iv(location, count, &value.to_ints(total))
                    }
                }
            }
            GlTypeClass::Matrix { columns, rows } => {
                let values = value.to_floats(elements * (columns * rows) as usize);
                match (columns, rows) {
                    (2, 2) => self.uniform_matrix_2fv(location, count, &values),
                    (3, 3) => self.uniform_matrix_3fv(location, count, &values),
                    (4, 4) => self.uniform_matrix_4fv(location, count, &values),
                    (2, 3) => self.uniform_matrix_2x3fv(location, count, &values),
                    (3, 2) => self.uniform_matrix_3x2fv(location, count, &values),
                    (2, 4) => self.uniform_matrix_2x4fv(location, count, &values),
                    (4, 2) => self.uniform_matrix_4x2fv(location, count, &values),
                    (3, 4) => self.uniform_matrix_3x4fv(location, count, &values),
                    _ => self.uniform_matrix_4x3fv(location, count, &values),
                }
            }
            GlTypeClass::Sampler | GlTypeClass::Image => {
                self.uniform_1iv(location, count, &value.to_ints(elements))
            }
            GlTypeClass::Unknown => {
                log::warn!(
                    "GraphicsHelper: cannot upload '{}' of unknown type {:#x}",
                    uniform.name,
                    uniform.gl_type
                );
                return false;
            }
        }
        self.supports_uniform_upload(uniform.gl_type)
    }

    // --- Types and reflection ---

    /// Maps a GL type enumerant to its engine-level type on this variant.
    fn uniform_type_from_gl_type(&self, gl_type: u32) -> UniformType;

    /// Computes the raw byte size of a reflected uniform. Identical on every variant.
    fn uniform_byte_size(&self, uniform: &ShaderUniform) -> u32 {
        layout::uniform_byte_size(uniform)
    }

    /// Reflects the active uniforms of a linked program, in driver order.
    fn program_uniforms_and_locations(&mut self, program: ProgramId) -> Vec<ShaderUniform>;

    /// Reflects the active uniform blocks of a linked program.
    fn program_uniform_blocks(&mut self, program: ProgramId) -> Vec<ShaderUniformBlock>;

    /// Reflects the active shader storage blocks of a linked program.
    fn program_shader_storage_blocks(&mut self, program: ProgramId) -> Vec<ShaderStorageBlock>;

    /// Reflects the active vertex attributes of a linked program, in driver order.
    fn program_attributes_and_locations(&mut self, program: ProgramId) -> Vec<ShaderAttribute>;

    /// Runs every reflection query for a freshly linked program.
    fn reflect_program(&mut self, program: ProgramId) -> ProgramReflection {
        ProgramReflection {
            uniforms: self.program_uniforms_and_locations(program),
            uniform_blocks: self.program_uniform_blocks(program),
            storage_blocks: self.program_shader_storage_blocks(program),
            attributes: self.program_attributes_and_locations(program),
        }
    }

    /// Packs `value` into uniform block memory. See
    /// [`build_uniform_buffer`](crate::renderer::api::util::build_uniform_buffer).
    fn build_uniform_buffer(
        &self,
        value: &UniformValue,
        uniform: &ShaderUniform,
        buffer: &mut [u8],
    ) -> bool;

    // --- Dimension queries ---

    /// The `(width, height)` of a render buffer, `(0, 0)` when unavailable.
    fn get_render_buffer_dimensions(&mut self, render_buffer: u32) -> (i32, i32);

    /// The `(width, height)` of a texture level, `(0, 0)` when unavailable.
    fn get_texture_dimensions(&mut self, texture: u32, target: u32, level: i32) -> (i32, i32);
}
