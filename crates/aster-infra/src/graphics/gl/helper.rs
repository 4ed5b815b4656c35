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

//! The GL helper type and its [`GraphicsHelper`] implementation.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;

use aster_core::renderer::api::{
    util, Attachment, FboBindMode, MemoryBarrierFlags, ProbeSettings, ProgramId,
    ShaderAttribute, ShaderStorageBlock, ShaderUniform, ShaderUniformBlock, SyncHandle,
    TextureBinding, UniformType, UniformValue,
};
use aster_core::renderer::api::{gl, ApiFamily, Feature};
use aster_core::{GraphicsHelper, HelperError, HelperVariant};

use super::functions::{required_entry_points, EntryPoint, GlFunctions};
use super::{draw, framebuffer, reflection, state, sync, types, uniforms};

pub(super) const ELEMENT_INDEX_UINT_EXTENSION: &str = "GL_OES_element_index_uint";

/// A graphics helper driving one OpenGL or OpenGL ES context.
///
/// The helper holds the context's function table through an `Rc`, which
/// keeps it on the thread that owns the context.
pub struct GlGraphicsHelper {
    pub(super) variant: HelperVariant,
    pub(super) gl: Rc<dyn GlFunctions>,
    pub(super) settings: ProbeSettings,
    /// ES 2 only: `GL_OES_element_index_uint` is present.
    pub(super) element_index_uint: bool,
    /// GL 2 only: the 2.1 non-square matrix uploads resolved.
    pub(super) non_square_matrices: bool,
    warned: RefCell<HashSet<&'static str>>,
}

impl GlGraphicsHelper {
    /// Binds a helper of `variant` to a context's function table.
    ///
    /// # Arguments
    ///
    /// * `variant`: The variant chosen for the context, usually by [`GlCapabilityProbe`](super::GlCapabilityProbe).
    /// * `gl`: The context's native function table.
    /// * `settings`: Logging and reflection settings.
    ///
    /// # Returns
    ///
    /// The helper, or [`HelperError::MissingEntryPoints`] naming every
    /// required entry point the context lacks.
    pub fn initialize_helper(
        variant: HelperVariant,
        gl: Rc<dyn GlFunctions>,
        settings: ProbeSettings,
    ) -> Result<Self, HelperError> {
        if variant.family() == ApiFamily::Rhi {
            return Err(HelperError::UnavailableVariant(variant));
        }

        let missing: Vec<String> = required_entry_points(variant)
            .into_iter()
            .filter(|entry| !gl.has_entry_point(*entry))
            .map(|entry| entry.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(HelperError::MissingEntryPoints { variant, missing });
        }

        let element_index_uint =
            variant != HelperVariant::Es2 || gl.has_extension(ELEMENT_INDEX_UINT_EXTENSION);
        let non_square_matrices =
            variant != HelperVariant::Gl2 || gl.has_entry_point(EntryPoint::NonSquareMatrices);

        log::debug!(
            "GlGraphicsHelper: {variant} helper bound to a {} context",
            gl.context_version()
        );

        Ok(Self {
            variant,
            gl,
            settings,
            element_index_uint,
            non_square_matrices,
            warned: RefCell::new(HashSet::new()),
        })
    }

    /// The settings this helper was created with.
    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// The native function table.
    pub fn functions(&self) -> &Rc<dyn GlFunctions> {
        &self.gl
    }

    pub(super) fn is_es(&self) -> bool {
        self.variant.family() == ApiFamily::Es
    }

    /// GL 2 and ES 2, the variants without instancing or integer attributes.
    pub(super) fn is_legacy(&self) -> bool {
        matches!(self.variant, HelperVariant::Gl2 | HelperVariant::Es2)
    }

    /// Logs a "not supported" warning, once per `key` when warn-once is enabled.
    pub(super) fn warn_unsupported(&self, key: &'static str, message: fmt::Arguments<'_>) {
        if self.settings.warn_once && !self.warned.borrow_mut().insert(key) {
            return;
        }
        log::warn!("{message}");
    }

    /// Logs a warning the first time `key` is seen, whatever the settings.
    pub(super) fn warn_once(&self, key: &'static str, message: fmt::Arguments<'_>) {
        if self.warned.borrow_mut().insert(key) {
            log::warn!("{message}");
        }
    }
}

impl fmt::Debug for GlGraphicsHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlGraphicsHelper")
            .field("variant", &self.variant)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GraphicsHelper for GlGraphicsHelper {
    fn variant(&self) -> HelperVariant {
        self.variant
    }

    fn draw_arrays(&mut self, primitive: u32, first: i32, count: i32) {
        self.gl.draw_arrays(primitive, first, count);
    }

    fn draw_elements(
        &mut self,
        primitive: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    ) {
        draw::draw_elements(self, primitive, count, index_type, offset, base_vertex);
    }

    fn draw_arrays_instanced(&mut self, primitive: u32, first: i32, count: i32, instances: i32) {
        draw::draw_arrays_instanced(self, primitive, first, count, instances);
    }

    fn draw_arrays_instanced_base_instance(
        &mut self,
        primitive: u32,
        first: i32,
        count: i32,
        instances: i32,
        base_instance: i32,
    ) {
        draw::draw_arrays_instanced_base_instance(
            self,
            primitive,
            first,
            count,
            instances,
            base_instance,
        );
    }

    fn draw_elements_instanced_base_vertex_base_instance(
        &mut self,
        primitive: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
        base_instance: i32,
    ) {
        draw::draw_elements_instanced_base_vertex_base_instance(
            self,
            primitive,
            count,
            index_type,
            offset,
            instances,
            base_vertex,
            base_instance,
        );
    }

    fn draw_arrays_indirect(&mut self, primitive: u32, indirect: usize) {
        draw::draw_arrays_indirect(self, primitive, indirect);
    }

    fn draw_elements_indirect(&mut self, primitive: u32, index_type: u32, indirect: usize) {
        draw::draw_elements_indirect(self, primitive, index_type, indirect);
    }

    fn set_vertices_per_patch(&mut self, vertices: i32) {
        draw::set_vertices_per_patch(self, vertices);
    }

    fn vertex_attribute_pointer(
        &mut self,
        shader_data_type: u32,
        index: u32,
        size: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        draw::vertex_attribute_pointer(
            self,
            shader_data_type,
            index,
            size,
            component_type,
            normalized,
            stride,
            offset,
        );
    }

    fn vertex_attrib_divisor(&mut self, index: u32, divisor: u32) {
        draw::vertex_attrib_divisor(self, index, divisor);
    }

    fn enable_vertex_attribute_array(&mut self, location: u32) {
        self.gl.enable_vertex_attrib_array(location);
    }

    fn use_program(&mut self, program: ProgramId) {
        self.gl.use_program(program);
    }

    fn create_frame_buffer_object(&mut self) -> u32 {
        self.gl.gen_framebuffer()
    }

    fn release_frame_buffer_object(&mut self, frame_buffer: u32) {
        self.gl.delete_framebuffer(frame_buffer);
    }

    fn check_frame_buffer_complete(&mut self) -> bool {
        self.gl.check_framebuffer_status(gl::FRAMEBUFFER) == gl::FRAMEBUFFER_COMPLETE
    }

    fn bind_frame_buffer_object(&mut self, frame_buffer: u32, mode: FboBindMode) {
        framebuffer::bind_frame_buffer_object(self, frame_buffer, mode);
    }

    fn bound_frame_buffer_object(&mut self) -> u32 {
        self.gl.get_integer_v(gl::FRAMEBUFFER_BINDING).max(0) as u32
    }

    fn bind_frame_buffer_attachment(&mut self, texture: &TextureBinding, attachment: &Attachment) {
        framebuffer::bind_frame_buffer_attachment(self, texture, attachment);
    }

    fn bind_frame_buffer_attachment_render_buffer(
        &mut self,
        render_buffer: u32,
        attachment: &Attachment,
    ) {
        framebuffer::bind_frame_buffer_attachment_render_buffer(self, render_buffer, attachment);
    }

    fn frame_buffer_needs_render_buffer(&self, attachment: &Attachment) -> bool {
        framebuffer::frame_buffer_needs_render_buffer(self, attachment)
    }

    fn draw_buffers(&mut self, color_indices: &[i32]) {
        framebuffer::draw_buffers(self, color_indices);
    }

    fn read_buffer(&mut self, mode: u32) {
        framebuffer::read_buffer(self, mode);
    }

    fn draw_buffer(&mut self, mode: u32) {
        framebuffer::draw_buffer(self, mode);
    }

    fn bind_frag_data_location(&mut self, program: ProgramId, outputs: &[(String, u32)]) {
        framebuffer::bind_frag_data_location(self, program, outputs);
    }

    fn blit_framebuffer(&mut self, src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32) {
        framebuffer::blit_framebuffer(self, src, dst, mask, filter);
    }

    fn blend_equation(&mut self, mode: u32) {
        self.gl.blend_equation(mode);
    }

    fn blend_func_i(&mut self, buffer: u32, src: u32, dst: u32) {
        state::blend_func_i(self, buffer, src, dst);
    }

    fn blend_func_separate_i(
        &mut self,
        buffer: u32,
        src_rgb: u32,
        dst_rgb: u32,
        src_alpha: u32,
        dst_alpha: u32,
    ) {
        state::blend_func_separate_i(self, buffer, src_rgb, dst_rgb, src_alpha, dst_alpha);
    }

    fn alpha_test(&mut self, func: u32, reference: f32) {
        state::alpha_test(self, func, reference);
    }

    fn depth_test(&mut self, func: u32) {
        self.gl.enable(gl::DEPTH_TEST);
        self.gl.depth_func(func);
    }

    fn depth_mask(&mut self, enabled: bool) {
        self.gl.depth_mask(enabled);
    }

    fn depth_range(&mut self, near: f64, far: f64) {
        self.gl.depth_range(near, far);
    }

    fn front_face(&mut self, mode: u32) {
        self.gl.front_face(mode);
    }

    fn raster_mode(&mut self, face: u32, mode: u32) {
        state::raster_mode(self, face, mode);
    }

    fn set_msaa_enabled(&mut self, enabled: bool) {
        state::set_msaa_enabled(self, enabled);
    }

    fn set_alpha_coverage_enabled(&mut self, enabled: bool) {
        if enabled {
            self.gl.enable(gl::SAMPLE_ALPHA_TO_COVERAGE);
        } else {
            self.gl.disable(gl::SAMPLE_ALPHA_TO_COVERAGE);
        }
    }

    fn enable_clip_plane(&mut self, index: u32) {
        state::enable_clip_plane(self, index);
    }

    fn disable_clip_plane(&mut self, index: u32) {
        state::disable_clip_plane(self, index);
    }

    fn set_clip_plane(&mut self, index: u32, normal: [f32; 3], distance: f32) {
        state::set_clip_plane(self, index, normal, distance);
    }

    fn max_clip_plane_count(&mut self) -> i32 {
        state::max_clip_plane_count(self)
    }

    fn point_size(&mut self, programmable: bool, value: f32) {
        state::point_size(self, programmable, value);
    }

    fn enable_primitive_restart(&mut self, restart_index: u32) {
        state::enable_primitive_restart(self, restart_index);
    }

    fn disable_primitive_restart(&mut self) {
        state::disable_primitive_restart(self);
    }

    fn memory_barrier(&mut self, barriers: MemoryBarrierFlags) {
        state::memory_barrier(self, barriers);
    }

    fn enable_i(&mut self, cap: u32, index: u32) {
        state::enable_i(self, cap, index, true);
    }

    fn disable_i(&mut self, cap: u32, index: u32) {
        state::enable_i(self, cap, index, false);
    }

    fn set_seamless_cubemap(&mut self, enabled: bool) {
        state::set_seamless_cubemap(self, enabled);
    }

    fn clear_buffer_f(&mut self, draw_buffer: i32, color: [f32; 4]) {
        state::clear_buffer_f(self, draw_buffer, color);
    }

    fn dispatch_compute(&mut self, x: u32, y: u32, z: u32) {
        state::dispatch_compute(self, x, y, z);
    }

    fn bind_image_texture(
        &mut self,
        image_unit: u32,
        texture: u32,
        mip_level: i32,
        layered: bool,
        layer: i32,
        access: u32,
        format: u32,
    ) {
        state::bind_image_texture(
            self, image_unit, texture, mip_level, layered, layer, access, format,
        );
    }

    fn fence_sync(&mut self) -> Option<SyncHandle> {
        sync::fence_sync(self)
    }

    fn client_wait_sync(&mut self, sync: SyncHandle, timeout_ns: u64) {
        sync::client_wait_sync(self, sync, timeout_ns);
    }

    fn wait_sync(&mut self, sync: SyncHandle) {
        sync::wait_sync(self, sync);
    }

    fn was_sync_signaled(&mut self, sync: SyncHandle) -> bool {
        sync::was_sync_signaled(self, sync)
    }

    fn delete_sync(&mut self, sync: SyncHandle) {
        sync::delete_sync(self, sync);
    }

    fn map_buffer(&mut self, target: u32, size: usize) -> Option<NonNull<u8>> {
        sync::map_buffer(self, target, size)
    }

    fn unmap_buffer(&mut self, target: u32) -> bool {
        sync::unmap_buffer(self, target)
    }

    fn bind_buffer_base(&mut self, target: u32, index: u32, buffer: u32) {
        sync::bind_buffer_base(self, target, index, buffer);
    }

    fn bind_uniform_block(&mut self, program: ProgramId, block_index: u32, binding: u32) {
        sync::bind_uniform_block(self, program, block_index, binding);
    }

    fn bind_shader_storage_block(&mut self, program: ProgramId, block_index: u32, binding: u32) {
        sync::bind_shader_storage_block(self, program, block_index, binding);
    }

    fn uniform_1fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_floats(self, 1, location, count, values);
    }

    fn uniform_2fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_floats(self, 2, location, count, values);
    }

    fn uniform_3fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_floats(self, 3, location, count, values);
    }

    fn uniform_4fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_floats(self, 4, location, count, values);
    }

    fn uniform_1iv(&mut self, location: i32, count: i32, values: &[i32]) {
        uniforms::upload_ints(self, 1, location, count, values);
    }

    fn uniform_2iv(&mut self, location: i32, count: i32, values: &[i32]) {
        uniforms::upload_ints(self, 2, location, count, values);
    }

    fn uniform_3iv(&mut self, location: i32, count: i32, values: &[i32]) {
        uniforms::upload_ints(self, 3, location, count, values);
    }

    fn uniform_4iv(&mut self, location: i32, count: i32, values: &[i32]) {
        uniforms::upload_ints(self, 4, location, count, values);
    }

    fn uniform_1uiv(&mut self, location: i32, count: i32, values: &[u32]) {
        uniforms::upload_uints(self, 1, location, count, values);
    }

    fn uniform_2uiv(&mut self, location: i32, count: i32, values: &[u32]) {
        uniforms::upload_uints(self, 2, location, count, values);
    }

    fn uniform_3uiv(&mut self, location: i32, count: i32, values: &[u32]) {
        uniforms::upload_uints(self, 3, location, count, values);
    }

    fn uniform_4uiv(&mut self, location: i32, count: i32, values: &[u32]) {
        uniforms::upload_uints(self, 4, location, count, values);
    }

    fn uniform_matrix_2fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 2, 2, location, count, values);
    }

    fn uniform_matrix_3fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 3, 3, location, count, values);
    }

    fn uniform_matrix_4fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 4, 4, location, count, values);
    }

    fn uniform_matrix_2x3fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 2, 3, location, count, values);
    }

    fn uniform_matrix_3x2fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 3, 2, location, count, values);
    }

    fn uniform_matrix_2x4fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 2, 4, location, count, values);
    }

    fn uniform_matrix_4x2fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 4, 2, location, count, values);
    }

    fn uniform_matrix_3x4fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 3, 4, location, count, values);
    }

    fn uniform_matrix_4x3fv(&mut self, location: i32, count: i32, values: &[f32]) {
        uniforms::upload_matrix(self, 4, 3, location, count, values);
    }

    fn supports_uniform_upload(&self, gl_type: u32) -> bool {
        uniforms::shape_supported(self, gl_type)
    }

    fn uniform_type_from_gl_type(&self, gl_type: u32) -> UniformType {
        types::uniform_type_from_gl_type(self.variant, gl_type)
    }

    fn program_uniforms_and_locations(&mut self, program: ProgramId) -> Vec<ShaderUniform> {
        reflection::program_uniforms_and_locations(self, program)
    }

    fn program_uniform_blocks(&mut self, program: ProgramId) -> Vec<ShaderUniformBlock> {
        reflection::program_uniform_blocks(self, program)
    }

    fn program_shader_storage_blocks(&mut self, program: ProgramId) -> Vec<ShaderStorageBlock> {
        reflection::program_shader_storage_blocks(self, program)
    }

    fn program_attributes_and_locations(&mut self, program: ProgramId) -> Vec<ShaderAttribute> {
        reflection::program_attributes_and_locations(self, program)
    }

    fn build_uniform_buffer(
        &self,
        value: &UniformValue,
        uniform: &ShaderUniform,
        buffer: &mut [u8],
    ) -> bool {
        if !self.variant.supports(Feature::UniformBufferObject) {
            self.warn_unsupported(
                "ubo",
                format_args!("UBO are not supported by {}", self.variant),
            );
            return false;
        }
        util::build_uniform_buffer(value, uniform, buffer)
    }

    fn get_render_buffer_dimensions(&mut self, render_buffer: u32) -> (i32, i32) {
        framebuffer::get_render_buffer_dimensions(self, render_buffer)
    }

    fn get_texture_dimensions(&mut self, texture: u32, target: u32, level: i32) -> (i32, i32) {
        framebuffer::get_texture_dimensions(self, texture, target, level)
    }
}
