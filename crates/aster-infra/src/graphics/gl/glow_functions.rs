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

//! [`GlFunctions`] over a live `glow` context.
//!
//! Most entry points forward to [`glow::HasContext`]. The few that `glow`
//! does not wrap (legacy fixed-function calls, `glMapBuffer` and the program
//! interface queries) are resolved through the same loader when the table is
//! built and report as missing when the driver does not export them.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::ffi::{c_char, c_void};
use std::num::NonZeroU32;

use aster_core::renderer::api::{gl, ContextVersion};
use glow::HasContext;

use super::functions::{required_entry_points, ActiveVariable, EntryPoint, GlFunctions};
use super::probe::GlCapabilityProbe;

type Fence = <glow::Context as HasContext>::Fence;

type AlphaFuncFn = unsafe extern "system" fn(u32, f32);
type ClipPlaneFn = unsafe extern "system" fn(u32, *const f64);
type PointSizeFn = unsafe extern "system" fn(f32);
type MapBufferFn = unsafe extern "system" fn(u32, u32) -> *mut c_void;
type PrimitiveRestartIndexFn = unsafe extern "system" fn(u32);
type GetProgramInterfaceivFn = unsafe extern "system" fn(u32, u32, u32, *mut i32);
type GetProgramResourceNameFn =
    unsafe extern "system" fn(u32, u32, u32, i32, *mut i32, *mut c_char);
type GetProgramResourceivFn =
    unsafe extern "system" fn(u32, u32, u32, i32, *const u32, i32, *mut i32, *mut i32);
type GetRenderbufferParameterivFn = unsafe extern "system" fn(u32, u32, *mut i32);
type GetTexLevelParameterivFn = unsafe extern "system" fn(u32, i32, u32, *mut i32);

/// Entry points resolved directly from the loader.
#[derive(Default)]
struct RawEntryPoints {
    alpha_func: Option<AlphaFuncFn>,
    clip_plane: Option<ClipPlaneFn>,
    point_size: Option<PointSizeFn>,
    map_buffer: Option<MapBufferFn>,
    primitive_restart_index: Option<PrimitiveRestartIndexFn>,
    get_program_interface_iv: Option<GetProgramInterfaceivFn>,
    get_program_resource_name: Option<GetProgramResourceNameFn>,
    get_program_resource_iv: Option<GetProgramResourceivFn>,
    get_renderbuffer_parameter_iv: Option<GetRenderbufferParameterivFn>,
    get_tex_level_parameter_iv: Option<GetTexLevelParameterivFn>,
}

/// # Safety
///
/// `F` must be the `extern "system"` function pointer type of `name`.
unsafe fn load<F: Copy>(loader: &mut dyn FnMut(&str) -> *const c_void, name: &str) -> Option<F> {
    let address = loader(name);
    if address.is_null() {
        None
    } else {
        Some(std::mem::transmute_copy::<*const c_void, F>(&address))
    }
}

impl RawEntryPoints {
    unsafe fn load(loader: &mut dyn FnMut(&str) -> *const c_void) -> Self {
        Self {
            alpha_func: load(loader, "glAlphaFunc"),
            clip_plane: load(loader, "glClipPlane"),
            point_size: load(loader, "glPointSize"),
            map_buffer: load(loader, "glMapBuffer"),
            primitive_restart_index: load(loader, "glPrimitiveRestartIndex"),
            get_program_interface_iv: load(loader, "glGetProgramInterfaceiv"),
            get_program_resource_name: load(loader, "glGetProgramResourceName"),
            get_program_resource_iv: load(loader, "glGetProgramResourceiv"),
            get_renderbuffer_parameter_iv: load(loader, "glGetRenderbufferParameteriv"),
            get_tex_level_parameter_iv: load(loader, "glGetTexLevelParameteriv"),
        }
    }

    fn has_program_interface(&self) -> bool {
        self.get_program_interface_iv.is_some()
            && self.get_program_resource_name.is_some()
            && self.get_program_resource_iv.is_some()
    }
}

/// Entry points that extensions provide ahead of the core version.
const EXTENSION_ENTRY_POINTS: &[(EntryPoint, &str)] = &[
    (EntryPoint::DrawBuffers, "GL_EXT_draw_buffers"),
    (EntryPoint::DrawBuffers, "GL_ARB_draw_buffers"),
    (EntryPoint::VertexAttribDivisor, "GL_ARB_instanced_arrays"),
    (EntryPoint::DrawArraysInstanced, "GL_ARB_draw_instanced"),
    (EntryPoint::DrawElementsInstanced, "GL_ARB_draw_instanced"),
    (EntryPoint::DrawElementsBaseVertex, "GL_EXT_draw_elements_base_vertex"),
    (EntryPoint::DrawElementsBaseVertex, "GL_OES_draw_elements_base_vertex"),
    (EntryPoint::DrawElementsInstancedBaseVertex, "GL_EXT_draw_elements_base_vertex"),
    (EntryPoint::DrawElementsInstancedBaseVertex, "GL_OES_draw_elements_base_vertex"),
    (EntryPoint::UniformBlocks, "GL_ARB_uniform_buffer_object"),
    (EntryPoint::FenceSync, "GL_ARB_sync"),
    (EntryPoint::BlitFramebuffer, "GL_ARB_framebuffer_object"),
    (EntryPoint::BlitFramebuffer, "GL_EXT_framebuffer_blit"),
    (EntryPoint::MemoryBarrier, "GL_ARB_shader_image_load_store"),
    (EntryPoint::BindImageTexture, "GL_ARB_shader_image_load_store"),
    (EntryPoint::DispatchCompute, "GL_ARB_compute_shader"),
    (EntryPoint::ShaderStorageBlockBinding, "GL_ARB_shader_storage_buffer_object"),
];

/// The entry points a context of `version` exports without the loader-resolved ones.
///
/// Core functions of the version come first, then any provided by the
/// extensions `has_extension` reports.
fn available_entry_points(
    version: ContextVersion,
    has_extension: impl Fn(&str) -> bool,
) -> HashSet<EntryPoint> {
    let mut available: HashSet<EntryPoint> = GlCapabilityProbe::best_variant(version)
        .map(required_entry_points)
        .unwrap_or_default()
        .into_iter()
        .collect();
    if version.family == aster_core::renderer::api::ApiFamily::Desktop {
        available.insert(EntryPoint::PolygonMode);
        available.insert(EntryPoint::DrawBuffers);
        if version.at_least(2, 1) {
            available.insert(EntryPoint::NonSquareMatrices);
        }
    }
    for (entry, extension) in EXTENSION_ENTRY_POINTS {
        if has_extension(extension) {
            available.insert(*entry);
        }
    }
    available
}

fn program(name: u32) -> Option<glow::NativeProgram> {
    NonZeroU32::new(name).map(glow::NativeProgram)
}

fn framebuffer(name: u32) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(name).map(glow::NativeFramebuffer)
}

fn texture(name: u32) -> Option<glow::NativeTexture> {
    NonZeroU32::new(name).map(glow::NativeTexture)
}

fn renderbuffer(name: u32) -> Option<glow::NativeRenderbuffer> {
    NonZeroU32::new(name).map(glow::NativeRenderbuffer)
}

fn buffer(name: u32) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(name).map(glow::NativeBuffer)
}

fn uniform_location(location: i32) -> Option<glow::NativeUniformLocation> {
    u32::try_from(location).ok().map(glow::NativeUniformLocation)
}

/// Byte offsets into bound buffers, as the GL API takes them.
fn offset(offset: usize) -> i32 {
    i32::try_from(offset).unwrap_or(i32::MAX)
}

/// The first `count` elements of `components` values each.
fn elements<T>(values: &[T], components: u32, count: i32) -> &[T] {
    let wanted = (count.max(0) as usize).saturating_mul(components as usize);
    &values[..wanted.min(values.len())]
}

fn truncate(mut name: String, max_name_length: usize) -> String {
    if name.len() > max_name_length {
        let mut end = max_name_length;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}

/// A [`GlFunctions`] table bound to a `glow` context.
///
/// Sync objects are handed out as small integer handles that map to the
/// `glow` fences this table owns.
pub struct GlowFunctions {
    gl: glow::Context,
    version: ContextVersion,
    entry_points: HashSet<EntryPoint>,
    raw: RawEntryPoints,
    fences: RefCell<HashMap<u64, Fence>>,
    next_fence: Cell<u64>,
}

impl GlowFunctions {
    /// Builds the table for the context current on this thread.
    ///
    /// # Safety
    ///
    /// The context `loader` resolves from must be current on the calling
    /// thread, for as long as the table is used.
    pub unsafe fn from_loader_function<F>(mut loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        let raw = RawEntryPoints::load(&mut loader);
        let gl = glow::Context::from_loader_function(&mut loader);
        let version = {
            let reported = gl.version();
            if reported.is_embedded {
                ContextVersion::es(reported.major, reported.minor)
            } else {
                ContextVersion::desktop(reported.major, reported.minor)
            }
        };
        let extensions = gl.supported_extensions();
        let entry_points = available_entry_points(version, |name| extensions.contains(name));
        log::debug!(
            "GlowFunctions: {version} context, {} extensions, {} optional entry points",
            extensions.len(),
            entry_points.len()
        );

        Self {
            gl,
            version,
            entry_points,
            raw,
            fences: RefCell::new(HashMap::new()),
            next_fence: Cell::new(1),
        }
    }

    /// The wrapped `glow` context.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn missing(&self, entry: &str) {
        log::error!("GlowFunctions: {entry} is not exported by the {} driver", self.version);
    }
}

#[allow(clippy::too_many_arguments)]
impl GlFunctions for GlowFunctions {
    fn context_version(&self) -> ContextVersion {
        self.version
    }

    fn has_extension(&self, name: &str) -> bool {
        self.gl.supported_extensions().contains(name)
    }

    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        match entry {
            EntryPoint::MapBuffer => self.raw.map_buffer.is_some(),
            EntryPoint::ClipPlane => self.raw.clip_plane.is_some(),
            EntryPoint::PrimitiveRestartIndex => self.raw.primitive_restart_index.is_some(),
            EntryPoint::ProgramInterface => self.raw.has_program_interface(),
            _ => self.entry_points.contains(&entry),
        }
    }

    // --- Drawing ---

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode, first, count) }
    }

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, at: usize) {
        unsafe { self.gl.draw_elements(mode, count, index_type, offset(at)) }
    }

    fn draw_elements_base_vertex(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        at: usize,
        base_vertex: i32,
    ) {
        unsafe {
            self.gl
                .draw_elements_base_vertex(mode, count, index_type, offset(at), base_vertex)
        }
    }

    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instances: i32) {
        unsafe { self.gl.draw_arrays_instanced(mode, first, count, instances) }
    }

    fn draw_arrays_instanced_base_instance(
        &self,
        mode: u32,
        first: i32,
        count: i32,
        instances: i32,
        base_instance: u32,
    ) {
        unsafe {
            self.gl
                .draw_arrays_instanced_base_instance(mode, first, count, instances, base_instance)
        }
    }

    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        at: usize,
        instances: i32,
    ) {
        unsafe {
            self.gl
                .draw_elements_instanced(mode, count, index_type, offset(at), instances)
        }
    }

    fn draw_elements_instanced_base_vertex(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        at: usize,
        instances: i32,
        base_vertex: i32,
    ) {
        unsafe {
            self.gl.draw_elements_instanced_base_vertex(
                mode,
                count,
                index_type,
                offset(at),
                instances,
                base_vertex,
            )
        }
    }

    fn draw_elements_instanced_base_vertex_base_instance(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        at: usize,
        instances: i32,
        base_vertex: i32,
        base_instance: u32,
    ) {
        unsafe {
            self.gl.draw_elements_instanced_base_vertex_base_instance(
                mode,
                count,
                index_type,
                offset(at),
                instances,
                base_vertex,
                base_instance,
            )
        }
    }

    fn draw_arrays_indirect(&self, mode: u32, indirect: usize) {
        unsafe { self.gl.draw_arrays_indirect_offset(mode, offset(indirect)) }
    }

    fn draw_elements_indirect(&self, mode: u32, index_type: u32, indirect: usize) {
        unsafe {
            self.gl
                .draw_elements_indirect_offset(mode, index_type, offset(indirect))
        }
    }

    fn patch_parameter_i(&self, pname: u32, value: i32) {
        unsafe { self.gl.patch_parameter_i32(pname, value) }
    }

    // --- Vertex input ---

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        at: usize,
    ) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                size,
                component_type,
                normalized,
                stride,
                offset(at),
            )
        }
    }

    fn vertex_attrib_i_pointer(
        &self,
        index: u32,
        size: i32,
        component_type: u32,
        stride: i32,
        at: usize,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_i32(index, size, component_type, stride, offset(at))
        }
    }

    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        unsafe { self.gl.vertex_attrib_divisor(index, divisor) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn use_program(&self, name: u32) {
        unsafe { self.gl.use_program(program(name)) }
    }

    // --- Reflection ---

    fn get_program_iv(&self, name: u32, pname: u32) -> i32 {
        program(name).map_or(0, |p| unsafe { self.gl.get_program_parameter_i32(p, pname) })
    }

    fn get_active_uniform(&self, name: u32, index: u32, max_name_length: usize) -> ActiveVariable {
        program(name)
            .and_then(|p| unsafe { self.gl.get_active_uniform(p, index) })
            .map(|active| ActiveVariable {
                name: truncate(active.name, max_name_length),
                size: active.size,
                gl_type: active.utype,
            })
            .unwrap_or_default()
    }

    fn get_uniform_location(&self, name: u32, uniform: &str) -> i32 {
        program(name)
            .and_then(|p| unsafe { self.gl.get_uniform_location(p, uniform) })
            .map_or(-1, |location| location.0 as i32)
    }

    fn get_active_uniforms_iv(&self, name: u32, indices: &[u32], pname: u32) -> Vec<i32> {
        match program(name) {
            Some(p) => unsafe { self.gl.get_active_uniforms_parameter(p, indices, pname) },
            None => vec![0; indices.len()],
        }
    }

    fn get_active_uniform_block_name(
        &self,
        name: u32,
        block_index: u32,
        max_name_length: usize,
    ) -> String {
        program(name).map_or_else(String::new, |p| {
            let block = unsafe { self.gl.get_active_uniform_block_name(p, block_index) };
            truncate(block, max_name_length)
        })
    }

    fn get_active_uniform_block_iv(&self, name: u32, block_index: u32, pname: u32) -> i32 {
        program(name).map_or(0, |p| unsafe {
            self.gl
                .get_active_uniform_block_parameter_i32(p, block_index, pname)
        })
    }

    fn get_program_interface_iv(&self, name: u32, interface: u32, pname: u32) -> i32 {
        let Some(query) = self.raw.get_program_interface_iv else {
            self.missing("glGetProgramInterfaceiv");
            return 0;
        };
        let mut value = 0;
        unsafe { query(name, interface, pname, &mut value) };
        value
    }

    fn get_program_resource_name(
        &self,
        name: u32,
        interface: u32,
        index: u32,
        max_name_length: usize,
    ) -> String {
        let Some(query) = self.raw.get_program_resource_name else {
            self.missing("glGetProgramResourceName");
            return String::new();
        };
        let mut bytes = vec![0u8; max_name_length.max(1)];
        let mut length = 0;
        let capacity = i32::try_from(bytes.len()).unwrap_or(i32::MAX);
        unsafe {
            query(
                name,
                interface,
                index,
                capacity,
                &mut length,
                bytes.as_mut_ptr().cast::<c_char>(),
            )
        };
        bytes.truncate(length.max(0) as usize);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn get_program_resource_iv(
        &self,
        name: u32,
        interface: u32,
        index: u32,
        properties: &[u32],
    ) -> Vec<i32> {
        let Some(query) = self.raw.get_program_resource_iv else {
            self.missing("glGetProgramResourceiv");
            return vec![0; properties.len()];
        };
        let mut values = vec![0; properties.len()];
        let count = i32::try_from(properties.len()).unwrap_or(i32::MAX);
        let mut written = 0;
        unsafe {
            query(
                name,
                interface,
                index,
                count,
                properties.as_ptr(),
                count,
                &mut written,
                values.as_mut_ptr(),
            )
        };
        values
    }

    fn get_active_attrib(&self, name: u32, index: u32, max_name_length: usize) -> ActiveVariable {
        program(name)
            .and_then(|p| unsafe { self.gl.get_active_attribute(p, index) })
            .map(|active| ActiveVariable {
                name: truncate(active.name, max_name_length),
                size: active.size,
                gl_type: active.atype,
            })
            .unwrap_or_default()
    }

    fn get_attrib_location(&self, name: u32, attribute: &str) -> i32 {
        program(name)
            .and_then(|p| unsafe { self.gl.get_attrib_location(p, attribute) })
            .map_or(-1, |location| location as i32)
    }

    // --- Buffer and block bindings ---

    fn uniform_block_binding(&self, name: u32, block_index: u32, binding: u32) {
        if let Some(p) = program(name) {
            unsafe { self.gl.uniform_block_binding(p, block_index, binding) }
        }
    }

    fn shader_storage_block_binding(&self, name: u32, block_index: u32, binding: u32) {
        if let Some(p) = program(name) {
            unsafe { self.gl.shader_storage_block_binding(p, block_index, binding) }
        }
    }

    fn bind_buffer_base(&self, target: u32, index: u32, name: u32) {
        unsafe { self.gl.bind_buffer_base(target, index, buffer(name)) }
    }

    fn bind_frag_data_location(&self, name: u32, color: u32, output: &str) {
        if let Some(p) = program(name) {
            unsafe { self.gl.bind_frag_data_location(p, color, output) }
        }
    }

    // --- Framebuffers and textures ---

    fn gen_framebuffer(&self) -> u32 {
        match unsafe { self.gl.create_framebuffer() } {
            Ok(created) => created.0.get(),
            Err(message) => {
                log::error!("GlowFunctions: glGenFramebuffers failed: {message}");
                0
            }
        }
    }

    fn delete_framebuffer(&self, name: u32) {
        if let Some(fbo) = framebuffer(name) {
            unsafe { self.gl.delete_framebuffer(fbo) }
        }
    }

    fn bind_framebuffer(&self, target: u32, name: u32) {
        unsafe { self.gl.bind_framebuffer(target, framebuffer(name)) }
    }

    fn check_framebuffer_status(&self, target: u32) -> u32 {
        unsafe { self.gl.check_framebuffer_status(target) }
    }

    fn framebuffer_texture(&self, target: u32, attachment: u32, name: u32, level: i32) {
        unsafe {
            self.gl
                .framebuffer_texture(target, attachment, texture(name), level)
        }
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        tex_target: u32,
        name: u32,
        level: i32,
    ) {
        unsafe {
            self.gl
                .framebuffer_texture_2d(target, attachment, tex_target, texture(name), level)
        }
    }

    fn framebuffer_texture_layer(
        &self,
        target: u32,
        attachment: u32,
        name: u32,
        level: i32,
        layer: i32,
    ) {
        unsafe {
            self.gl
                .framebuffer_texture_layer(target, attachment, texture(name), level, layer)
        }
    }

    fn framebuffer_renderbuffer(
        &self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        name: u32,
    ) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                target,
                attachment,
                renderbuffer_target,
                renderbuffer(name),
            )
        }
    }

    fn bind_texture(&self, target: u32, name: u32) {
        unsafe { self.gl.bind_texture(target, texture(name)) }
    }

    fn bind_renderbuffer(&self, target: u32, name: u32) {
        unsafe { self.gl.bind_renderbuffer(target, renderbuffer(name)) }
    }

    fn draw_buffers(&self, buffers: &[u32]) {
        unsafe { self.gl.draw_buffers(buffers) }
    }

    fn read_buffer(&self, mode: u32) {
        unsafe { self.gl.read_buffer(mode) }
    }

    fn draw_buffer(&self, mode: u32) {
        unsafe { self.gl.draw_buffer(mode) }
    }

    fn blit_framebuffer(&self, src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32) {
        unsafe {
            self.gl.blit_framebuffer(
                src[0], src[1], src[2], src[3], dst[0], dst[1], dst[2], dst[3], mask, filter,
            )
        }
    }

    // --- Queries ---

    fn get_integer_v(&self, pname: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(pname) }
    }

    fn get_renderbuffer_parameter_iv(&self, target: u32, pname: u32) -> i32 {
        let Some(query) = self.raw.get_renderbuffer_parameter_iv else {
            self.missing("glGetRenderbufferParameteriv");
            return 0;
        };
        let mut value = 0;
        unsafe { query(target, pname, &mut value) };
        value
    }

    fn get_tex_level_parameter_iv(&self, target: u32, level: i32, pname: u32) -> i32 {
        let Some(query) = self.raw.get_tex_level_parameter_iv else {
            self.missing("glGetTexLevelParameteriv");
            return 0;
        };
        let mut value = 0;
        unsafe { query(target, level, pname, &mut value) };
        value
    }

    // --- Fixed-function state ---

    fn enable(&self, cap: u32) {
        unsafe { self.gl.enable(cap) }
    }

    fn disable(&self, cap: u32) {
        unsafe { self.gl.disable(cap) }
    }

    fn enable_i(&self, cap: u32, index: u32) {
        unsafe { self.gl.enable_draw_buffer(cap, index) }
    }

    fn disable_i(&self, cap: u32, index: u32) {
        unsafe { self.gl.disable_draw_buffer(cap, index) }
    }

    fn blend_equation(&self, mode: u32) {
        unsafe { self.gl.blend_equation(mode) }
    }

    fn blend_func_i(&self, buffer: u32, src: u32, dst: u32) {
        unsafe { self.gl.blend_func_draw_buffer(buffer, src, dst) }
    }

    fn blend_func_separate_i(
        &self,
        buffer: u32,
        src_rgb: u32,
        dst_rgb: u32,
        src_alpha: u32,
        dst_alpha: u32,
    ) {
        unsafe {
            self.gl
                .blend_func_separate_draw_buffer(buffer, src_rgb, dst_rgb, src_alpha, dst_alpha)
        }
    }

    fn alpha_func(&self, func: u32, reference: f32) {
        match self.raw.alpha_func {
            Some(alpha_func) => unsafe { alpha_func(func, reference) },
            None => self.missing("glAlphaFunc"),
        }
    }

    fn depth_func(&self, func: u32) {
        unsafe { self.gl.depth_func(func) }
    }

    fn depth_mask(&self, enabled: bool) {
        unsafe { self.gl.depth_mask(enabled) }
    }

    fn depth_range(&self, near: f64, far: f64) {
        if self.version.family == aster_core::renderer::api::ApiFamily::Es {
            unsafe { self.gl.depth_range_f32(near as f32, far as f32) }
        } else {
            unsafe { self.gl.depth_range_f64(near, far) }
        }
    }

    fn front_face(&self, mode: u32) {
        unsafe { self.gl.front_face(mode) }
    }

    fn polygon_mode(&self, face: u32, mode: u32) {
        unsafe { self.gl.polygon_mode(face, mode) }
    }

    fn clip_plane(&self, plane: u32, equation: [f64; 4]) {
        match self.raw.clip_plane {
            Some(clip_plane) => unsafe { clip_plane(plane, equation.as_ptr()) },
            None => self.missing("glClipPlane"),
        }
    }

    fn point_size(&self, size: f32) {
        match self.raw.point_size {
            Some(point_size) => unsafe { point_size(size) },
            None => self.missing("glPointSize"),
        }
    }

    fn primitive_restart_index(&self, index: u32) {
        match self.raw.primitive_restart_index {
            Some(restart_index) => unsafe { restart_index(index) },
            None => self.missing("glPrimitiveRestartIndex"),
        }
    }

    fn memory_barrier(&self, barriers: u32) {
        unsafe { self.gl.memory_barrier(barriers) }
    }

    fn clear_buffer_fv(&self, buffer: u32, draw_buffer: i32, values: [f32; 4]) {
        let Ok(draw_buffer) = u32::try_from(draw_buffer) else {
            return;
        };
        unsafe { self.gl.clear_buffer_f32_slice(buffer, draw_buffer, &values) }
    }

    fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        unsafe { self.gl.dispatch_compute(x, y, z) }
    }

    fn bind_image_texture(
        &self,
        unit: u32,
        name: u32,
        level: i32,
        layered: bool,
        layer: i32,
        access: u32,
        format: u32,
    ) {
        unsafe {
            self.gl
                .bind_image_texture(unit, texture(name), level, layered, layer, access, format)
        }
    }

    // --- Sync objects ---

    fn fence_sync(&self, condition: u32, flags: u32) -> u64 {
        match unsafe { self.gl.fence_sync(condition, flags) } {
            Ok(fence) => {
                let handle = self.next_fence.get();
                self.next_fence.set(handle + 1);
                self.fences.borrow_mut().insert(handle, fence);
                handle
            }
            Err(message) => {
                log::error!("GlowFunctions: glFenceSync failed: {message}");
                0
            }
        }
    }

    fn client_wait_sync(&self, sync: u64, flags: u32, timeout_ns: u64) -> u32 {
        let Some(fence) = self.fences.borrow().get(&sync).copied() else {
            return gl::WAIT_FAILED;
        };
        let timeout = i32::try_from(timeout_ns).unwrap_or(i32::MAX);
        unsafe { self.gl.client_wait_sync(fence, flags, timeout) }
    }

    fn wait_sync(&self, sync: u64, flags: u32, timeout: u64) {
        if let Some(fence) = self.fences.borrow().get(&sync).copied() {
            unsafe { self.gl.wait_sync(fence, flags, timeout) }
        }
    }

    fn get_sync_iv(&self, sync: u64, pname: u32) -> i32 {
        let Some(fence) = self.fences.borrow().get(&sync).copied() else {
            return 0;
        };
        if pname != gl::SYNC_STATUS {
            log::debug!("GlowFunctions: glGetSynciv({pname:#x}) is not forwarded");
            return 0;
        }
        unsafe { self.gl.get_sync_status(fence) as i32 }
    }

    fn delete_sync(&self, sync: u64) {
        if let Some(fence) = self.fences.borrow_mut().remove(&sync) {
            unsafe { self.gl.delete_sync(fence) }
        }
    }

    // --- Buffer mapping ---

    fn map_buffer(&self, target: u32, access: u32) -> *mut u8 {
        match self.raw.map_buffer {
            Some(map_buffer) => unsafe { map_buffer(target, access).cast::<u8>() },
            None => {
                self.missing("glMapBuffer");
                std::ptr::null_mut()
            }
        }
    }

    fn map_buffer_range(&self, target: u32, at: usize, length: usize, access: u32) -> *mut u8 {
        unsafe {
            self.gl
                .map_buffer_range(target, offset(at), offset(length), access)
        }
    }

    fn unmap_buffer(&self, target: u32) -> bool {
        unsafe { self.gl.unmap_buffer(target) };
        true
    }

    // --- Uniform uploads ---

    fn uniform_f32v(&self, components: u32, location: i32, count: i32, values: &[f32]) {
        let Some(location) = uniform_location(location) else {
            return;
        };
        let values = elements(values, components, count);
        unsafe {
            match components {
                1 => self.gl.uniform_1_f32_slice(Some(&location), values),
                2 => self.gl.uniform_2_f32_slice(Some(&location), values),
                3 => self.gl.uniform_3_f32_slice(Some(&location), values),
                _ => self.gl.uniform_4_f32_slice(Some(&location), values),
            }
        }
    }

    fn uniform_i32v(&self, components: u32, location: i32, count: i32, values: &[i32]) {
        let Some(location) = uniform_location(location) else {
            return;
        };
        let values = elements(values, components, count);
        unsafe {
            match components {
                1 => self.gl.uniform_1_i32_slice(Some(&location), values),
                2 => self.gl.uniform_2_i32_slice(Some(&location), values),
                3 => self.gl.uniform_3_i32_slice(Some(&location), values),
                _ => self.gl.uniform_4_i32_slice(Some(&location), values),
            }
        }
    }

    fn uniform_u32v(&self, components: u32, location: i32, count: i32, values: &[u32]) {
        let Some(location) = uniform_location(location) else {
            return;
        };
        let values = elements(values, components, count);
        unsafe {
            match components {
                1 => self.gl.uniform_1_u32_slice(Some(&location), values),
                2 => self.gl.uniform_2_u32_slice(Some(&location), values),
                3 => self.gl.uniform_3_u32_slice(Some(&location), values),
                _ => self.gl.uniform_4_u32_slice(Some(&location), values),
            }
        }
    }

    fn uniform_matrix_f32v(
        &self,
        columns: u32,
        rows: u32,
        location: i32,
        count: i32,
        transpose: bool,
        values: &[f32],
    ) {
        let Some(location) = uniform_location(location) else {
            return;
        };
        let values = elements(values, columns * rows, count);
        let location = Some(&location);
        unsafe {
            match (columns, rows) {
                (2, 2) => self.gl.uniform_matrix_2_f32_slice(location, transpose, values),
                (3, 3) => self.gl.uniform_matrix_3_f32_slice(location, transpose, values),
                (4, 4) => self.gl.uniform_matrix_4_f32_slice(location, transpose, values),
                (2, 3) => self.gl.uniform_matrix_2x3_f32_slice(location, transpose, values),
                (3, 2) => self.gl.uniform_matrix_3x2_f32_slice(location, transpose, values),
                (2, 4) => self.gl.uniform_matrix_2x4_f32_slice(location, transpose, values),
                (4, 2) => self.gl.uniform_matrix_4x2_f32_slice(location, transpose, values),
                (3, 4) => self.gl.uniform_matrix_3x4_f32_slice(location, transpose, values),
                _ => self.gl.uniform_matrix_4x3_f32_slice(location, transpose, values),
            }
        }
    }
}
