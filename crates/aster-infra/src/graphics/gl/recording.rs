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

//! A [`GlFunctions`] table that records calls instead of reaching a driver.
//!
//! Used for headless runs and for checking which native calls a helper
//! issues on each variant. Reflection queries answer from a scripted program.
//! [`capture_logs`] installs a logger that keeps records per thread, so
//! tests can assert on the warnings a helper emits.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::sync::Once;

use aster_core::renderer::api::{
    gl, ContextVersion, ShaderAttribute, ShaderStorageBlock, ShaderUniformBlock,
};
use log::{Level, LevelFilter, Log, Metadata, Record};

use super::functions::{ActiveVariable, EntryPoint, GlFunctions};

/// One recorded native call.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    DrawArrays { mode: u32, first: i32, count: i32 },
    DrawElements { mode: u32, count: i32, index_type: u32, offset: usize },
    DrawElementsBaseVertex {
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    },
    DrawArraysInstanced { mode: u32, first: i32, count: i32, instances: i32 },
    DrawArraysInstancedBaseInstance {
        mode: u32,
        first: i32,
        count: i32,
        instances: i32,
        base_instance: u32,
    },
    DrawElementsInstanced { mode: u32, count: i32, index_type: u32, offset: usize, instances: i32 },
    DrawElementsInstancedBaseVertex {
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
    },
    DrawElementsInstancedBaseVertexBaseInstance {
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
        base_instance: u32,
    },
    DrawArraysIndirect { mode: u32, indirect: usize },
    DrawElementsIndirect { mode: u32, index_type: u32, indirect: usize },
    PatchParameter { pname: u32, value: i32 },
    VertexAttribPointer {
        index: u32,
        size: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    },
    VertexAttribIPointer { index: u32, size: i32, component_type: u32, stride: i32, offset: usize },
    VertexAttribDivisor { index: u32, divisor: u32 },
    EnableVertexAttribArray(u32),
    UseProgram(u32),
    UniformBlockBinding { program: u32, block_index: u32, binding: u32 },
    ShaderStorageBlockBinding { program: u32, block_index: u32, binding: u32 },
    BindBufferBase { target: u32, index: u32, buffer: u32 },
    BindFragDataLocation { program: u32, color: u32, name: String },
    GenFramebuffer(u32),
    DeleteFramebuffer(u32),
    BindFramebuffer { target: u32, framebuffer: u32 },
    FramebufferTexture { target: u32, attachment: u32, texture: u32, level: i32 },
    FramebufferTexture2D {
        target: u32,
        attachment: u32,
        tex_target: u32,
        texture: u32,
        level: i32,
    },
    FramebufferTextureLayer { target: u32, attachment: u32, texture: u32, level: i32, layer: i32 },
    FramebufferRenderbuffer {
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: u32,
    },
    BindTexture { target: u32, texture: u32 },
    BindRenderbuffer { target: u32, renderbuffer: u32 },
    DrawBuffers(Vec<u32>),
    ReadBuffer(u32),
    DrawBuffer(u32),
    BlitFramebuffer { src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32 },
    Enable(u32),
    Disable(u32),
    EnableI { cap: u32, index: u32 },
    DisableI { cap: u32, index: u32 },
    BlendEquation(u32),
    BlendFuncI { buffer: u32, src: u32, dst: u32 },
    BlendFuncSeparateI { buffer: u32, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32 },
    AlphaFunc { func: u32, reference: f32 },
    DepthFunc(u32),
    DepthMask(bool),
    DepthRange { near: f64, far: f64 },
    FrontFace(u32),
    PolygonMode { face: u32, mode: u32 },
    ClipPlane { plane: u32, equation: [f64; 4] },
    PointSize(f32),
    PrimitiveRestartIndex(u32),
    MemoryBarrier(u32),
    ClearBufferfv { buffer: u32, draw_buffer: i32, values: [f32; 4] },
    DispatchCompute { x: u32, y: u32, z: u32 },
    BindImageTexture {
        unit: u32,
        texture: u32,
        level: i32,
        layered: bool,
        layer: i32,
        access: u32,
        format: u32,
    },
    FenceSync { condition: u32, flags: u32 },
    ClientWaitSync { sync: u64, flags: u32, timeout_ns: u64 },
    WaitSync { sync: u64, flags: u32, timeout: u64 },
    DeleteSync(u64),
    MapBuffer { target: u32, access: u32 },
    MapBufferRange { target: u32, offset: usize, length: usize, access: u32 },
    UnmapBuffer(u32),
    UniformF32 { components: u32, location: i32, count: i32, values: Vec<f32> },
    UniformI32 { components: u32, location: i32, count: i32, values: Vec<i32> },
    UniformU32 { components: u32, location: i32, count: i32, values: Vec<u32> },
    UniformMatrix {
        columns: u32,
        rows: u32,
        location: i32,
        count: i32,
        transpose: bool,
        values: Vec<f32>,
    },
}

/// An active uniform of the scripted program, with its block layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedUniform {
    /// What `glGetActiveUniform` reports.
    pub variable: ActiveVariable,
    /// The default-block location, looked up by name.
    pub location: i32,
    /// `GL_UNIFORM_BLOCK_INDEX`.
    pub block_index: i32,
    /// `GL_UNIFORM_OFFSET`.
    pub offset: i32,
    /// `GL_UNIFORM_ARRAY_STRIDE`.
    pub array_stride: i32,
    /// `GL_UNIFORM_MATRIX_STRIDE`.
    pub matrix_stride: i32,
}

impl ScriptedUniform {
    /// A default-block uniform.
    pub fn new(name: &str, gl_type: u32, size: i32, location: i32) -> Self {
        Self {
            variable: ActiveVariable {
                name: name.to_string(),
                size,
                gl_type,
            },
            location,
            block_index: -1,
            offset: -1,
            array_stride: -1,
            matrix_stride: -1,
        }
    }

    /// A member of uniform block `block_index`. Block members have no location.
    pub fn in_block(
        name: &str,
        gl_type: u32,
        size: i32,
        block_index: i32,
        offset: i32,
        array_stride: i32,
        matrix_stride: i32,
    ) -> Self {
        Self {
            location: -1,
            block_index,
            offset,
            array_stride,
            matrix_stride,
            ..Self::new(name, gl_type, size, -1)
        }
    }
}

const FENCE_HANDLE: u64 = 0x5e7c;
const MAPPED_BUFFER_BYTES: usize = 256;

/// A recording [`GlFunctions`] implementation.
#[derive(Debug)]
pub struct RecordingFunctions {
    version: ContextVersion,
    extensions: HashSet<String>,
    missing_entry_points: HashSet<EntryPoint>,
    uniforms: Vec<ScriptedUniform>,
    uniform_blocks: Vec<ShaderUniformBlock>,
    storage_blocks: Vec<ShaderStorageBlock>,
    attributes: Vec<ShaderAttribute>,
    integers: HashMap<u32, i32>,
    framebuffer_status: u32,
    fence_handle: u64,
    signaled: bool,
    next_framebuffer: Cell<u32>,
    mapped: RefCell<Vec<u8>>,
    calls: RefCell<Vec<GlCall>>,
}

impl RecordingFunctions {
    /// A context of `version` resolving every entry point and advertising no extension.
    pub fn new(version: ContextVersion) -> Self {
        Self {
            version,
            extensions: HashSet::new(),
            missing_entry_points: HashSet::new(),
            uniforms: Vec::new(),
            uniform_blocks: Vec::new(),
            storage_blocks: Vec::new(),
            attributes: Vec::new(),
            integers: HashMap::new(),
            framebuffer_status: gl::FRAMEBUFFER_COMPLETE,
            fence_handle: FENCE_HANDLE,
            signaled: true,
            next_framebuffer: Cell::new(1),
            mapped: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Advertises an extension.
    pub fn with_extension(mut self, name: &str) -> Self {
        self.extensions.insert(name.to_string());
        self
    }

    /// Makes an entry point fail to resolve.
    pub fn without_entry_point(mut self, entry: EntryPoint) -> Self {
        self.missing_entry_points.insert(entry);
        self
    }

    /// Adds an active uniform to the scripted program.
    pub fn with_uniform(mut self, uniform: ScriptedUniform) -> Self {
        self.uniforms.push(uniform);
        self
    }

    /// Adds an active uniform block. Its `index` is its position.
    pub fn with_uniform_block(mut self, block: ShaderUniformBlock) -> Self {
        self.uniform_blocks.push(block);
        self
    }

    /// Adds an active shader storage block. Its `index` is its position.
    pub fn with_storage_block(mut self, block: ShaderStorageBlock) -> Self {
        self.storage_blocks.push(block);
        self
    }

    /// Adds an active vertex attribute.
    pub fn with_attribute(mut self, attribute: ShaderAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Answers `pname` with `value` in every integer query.
    pub fn with_integer(mut self, pname: u32, value: i32) -> Self {
        self.integers.insert(pname, value);
        self
    }

    /// Makes `glFenceSync` fail.
    pub fn with_failing_fences(mut self) -> Self {
        self.fence_handle = 0;
        self
    }

    /// Sets what fence status polls report.
    pub fn with_signaled_fences(mut self, signaled: bool) -> Self {
        self.signaled = signaled;
        self
    }

    /// Sets what `glCheckFramebufferStatus` reports.
    pub fn with_framebuffer_status(mut self, status: u32) -> Self {
        self.framebuffer_status = status;
        self
    }

    /// Every call recorded so far, oldest first.
    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    /// Forgets the recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn integer(&self, pname: u32) -> i32 {
        self.integers.get(&pname).copied().unwrap_or(0)
    }

    fn map(&self, length: usize) -> *mut u8 {
        let mut mapped = self.mapped.borrow_mut();
        mapped.clear();
        mapped.resize(length, 0);
        mapped.as_mut_ptr()
    }
}

fn truncated(name: &str, max_name_length: usize) -> String {
    name.chars().take(max_name_length).collect()
}

fn uniform_field(uniform: &ScriptedUniform, pname: u32) -> i32 {
    match pname {
        gl::UNIFORM_BLOCK_INDEX => uniform.block_index,
        gl::UNIFORM_OFFSET => uniform.offset,
        gl::UNIFORM_ARRAY_STRIDE => uniform.array_stride,
        gl::UNIFORM_MATRIX_STRIDE => uniform.matrix_stride,
        _ => 0,
    }
}

impl GlFunctions for RecordingFunctions {
    fn context_version(&self) -> ContextVersion {
        self.version
    }

    fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        !self.missing_entry_points.contains(&entry)
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }

    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: usize) {
        self.record(GlCall::DrawElements {
            mode,
            count,
            index_type,
            offset,
        });
    }

    fn draw_elements_base_vertex(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    ) {
        self.record(GlCall::DrawElementsBaseVertex {
            mode,
            count,
            index_type,
            offset,
            base_vertex,
        });
    }

    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instances: i32) {
        self.record(GlCall::DrawArraysInstanced {
            mode,
            first,
            count,
            instances,
        });
    }

    fn draw_arrays_instanced_base_instance(
        &self,
        mode: u32,
        first: i32,
        count: i32,
        instances: i32,
        base_instance: u32,
    ) {
        self.record(GlCall::DrawArraysInstancedBaseInstance {
            mode,
            first,
            count,
            instances,
            base_instance,
        });
    }

    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
    ) {
        self.record(GlCall::DrawElementsInstanced {
            mode,
            count,
            index_type,
            offset,
            instances,
        });
    }

    fn draw_elements_instanced_base_vertex(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
    ) {
        self.record(GlCall::DrawElementsInstancedBaseVertex {
            mode,
            count,
            index_type,
            offset,
            instances,
            base_vertex,
        });
    }

    fn draw_elements_instanced_base_vertex_base_instance(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
        base_instance: u32,
    ) {
        self.record(GlCall::DrawElementsInstancedBaseVertexBaseInstance {
            mode,
            count,
            index_type,
            offset,
            instances,
            base_vertex,
            base_instance,
        });
    }

    fn draw_arrays_indirect(&self, mode: u32, indirect: usize) {
        self.record(GlCall::DrawArraysIndirect { mode, indirect });
    }

    fn draw_elements_indirect(&self, mode: u32, index_type: u32, indirect: usize) {
        self.record(GlCall::DrawElementsIndirect {
            mode,
            index_type,
            indirect,
        });
    }

    fn patch_parameter_i(&self, pname: u32, value: i32) {
        self.record(GlCall::PatchParameter { pname, value });
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        self.record(GlCall::VertexAttribPointer {
            index,
            size,
            component_type,
            normalized,
            stride,
            offset,
        });
    }

    fn vertex_attrib_i_pointer(
        &self,
        index: u32,
        size: i32,
        component_type: u32,
        stride: i32,
        offset: usize,
    ) {
        self.record(GlCall::VertexAttribIPointer {
            index,
            size,
            component_type,
            stride,
            offset,
        });
    }

    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        self.record(GlCall::VertexAttribDivisor { index, divisor });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn use_program(&self, program: u32) {
        self.record(GlCall::UseProgram(program));
    }

    fn get_program_iv(&self, _program: u32, pname: u32) -> i32 {
        match pname {
            gl::ACTIVE_UNIFORMS => self.uniforms.len() as i32,
            gl::ACTIVE_UNIFORM_BLOCKS => self.uniform_blocks.len() as i32,
            gl::ACTIVE_ATTRIBUTES => self.attributes.len() as i32,
            other => self.integer(other),
        }
    }

    fn get_active_uniform(
        &self,
        _program: u32,
        index: u32,
        max_name_length: usize,
    ) -> ActiveVariable {
        self.uniforms
            .get(index as usize)
            .map(|uniform| ActiveVariable {
                name: truncated(&uniform.variable.name, max_name_length),
                ..uniform.variable.clone()
            })
            .unwrap_or_default()
    }

    fn get_uniform_location(&self, _program: u32, name: &str) -> i32 {
        let bare = name.strip_suffix("[0]").unwrap_or(name);
        self.uniforms
            .iter()
            .find(|u| {
                let reported = u.variable.name.strip_suffix("[0]").unwrap_or(&u.variable.name);
                reported == bare
            })
            .map_or(-1, |u| u.location)
    }

    fn get_active_uniforms_iv(&self, _program: u32, indices: &[u32], pname: u32) -> Vec<i32> {
        indices
            .iter()
            .map(|&i| {
                self.uniforms
                    .get(i as usize)
                    .map_or(0, |uniform| uniform_field(uniform, pname))
            })
            .collect()
    }

    fn get_active_uniform_block_name(
        &self,
        _program: u32,
        block_index: u32,
        max_name_length: usize,
    ) -> String {
        self.uniform_blocks
            .get(block_index as usize)
            .map(|block| truncated(&block.name, max_name_length))
            .unwrap_or_default()
    }

    fn get_active_uniform_block_iv(&self, _program: u32, block_index: u32, pname: u32) -> i32 {
        let Some(block) = self.uniform_blocks.get(block_index as usize) else {
            return 0;
        };
        match pname {
            gl::UNIFORM_BLOCK_BINDING => block.binding,
            gl::UNIFORM_BLOCK_DATA_SIZE => block.size,
            gl::UNIFORM_BLOCK_ACTIVE_UNIFORMS => block.active_uniforms_count,
            _ => 0,
        }
    }

    fn get_program_interface_iv(&self, _program: u32, interface: u32, pname: u32) -> i32 {
        match (interface, pname) {
            (gl::SHADER_STORAGE_BLOCK, gl::ACTIVE_RESOURCES) => self.storage_blocks.len() as i32,
            (gl::UNIFORM_BLOCK, gl::ACTIVE_RESOURCES) => self.uniform_blocks.len() as i32,
            _ => 0,
        }
    }

    fn get_program_resource_name(
        &self,
        _program: u32,
        interface: u32,
        index: u32,
        max_name_length: usize,
    ) -> String {
        if interface != gl::SHADER_STORAGE_BLOCK {
            return String::new();
        }
        self.storage_blocks
            .get(index as usize)
            .map(|block| truncated(&block.name, max_name_length))
            .unwrap_or_default()
    }

    fn get_program_resource_iv(
        &self,
        _program: u32,
        interface: u32,
        index: u32,
        properties: &[u32],
    ) -> Vec<i32> {
        let block = match interface {
            gl::SHADER_STORAGE_BLOCK => self.storage_blocks.get(index as usize),
            _ => None,
        };
        properties
            .iter()
            .map(|&property| match (block, property) {
                (Some(block), gl::BUFFER_BINDING) => block.binding,
                (Some(block), gl::BUFFER_DATA_SIZE) => block.size,
                (Some(block), gl::NUM_ACTIVE_VARIABLES) => block.active_variables_count,
                _ => 0,
            })
            .collect()
    }

    fn get_active_attrib(
        &self,
        _program: u32,
        index: u32,
        max_name_length: usize,
    ) -> ActiveVariable {
        self.attributes
            .get(index as usize)
            .map(|attribute| ActiveVariable {
                name: truncated(&attribute.name, max_name_length),
                size: attribute.size,
                gl_type: attribute.gl_type,
            })
            .unwrap_or_default()
    }

    fn get_attrib_location(&self, _program: u32, name: &str) -> i32 {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map_or(-1, |a| a.location)
    }

    fn uniform_block_binding(&self, program: u32, block_index: u32, binding: u32) {
        self.record(GlCall::UniformBlockBinding {
            program,
            block_index,
            binding,
        });
    }

    fn shader_storage_block_binding(&self, program: u32, block_index: u32, binding: u32) {
        self.record(GlCall::ShaderStorageBlockBinding {
            program,
            block_index,
            binding,
        });
    }

    fn bind_buffer_base(&self, target: u32, index: u32, buffer: u32) {
        self.record(GlCall::BindBufferBase {
            target,
            index,
            buffer,
        });
    }

    fn bind_frag_data_location(&self, program: u32, color: u32, name: &str) {
        self.record(GlCall::BindFragDataLocation {
            program,
            color,
            name: name.to_string(),
        });
    }

    fn gen_framebuffer(&self) -> u32 {
        let name = self.next_framebuffer.get();
        self.next_framebuffer.set(name + 1);
        self.record(GlCall::GenFramebuffer(name));
        name
    }

    fn delete_framebuffer(&self, framebuffer: u32) {
        self.record(GlCall::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&self, target: u32, framebuffer: u32) {
        self.record(GlCall::BindFramebuffer {
            target,
            framebuffer,
        });
    }

    fn check_framebuffer_status(&self, _target: u32) -> u32 {
        self.framebuffer_status
    }

    fn framebuffer_texture(&self, target: u32, attachment: u32, texture: u32, level: i32) {
        self.record(GlCall::FramebufferTexture {
            target,
            attachment,
            texture,
            level,
        });
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        tex_target: u32,
        texture: u32,
        level: i32,
    ) {
        self.record(GlCall::FramebufferTexture2D {
            target,
            attachment,
            tex_target,
            texture,
            level,
        });
    }

    fn framebuffer_texture_layer(
        &self,
        target: u32,
        attachment: u32,
        texture: u32,
        level: i32,
        layer: i32,
    ) {
        self.record(GlCall::FramebufferTextureLayer {
            target,
            attachment,
            texture,
            level,
            layer,
        });
    }

    fn framebuffer_renderbuffer(
        &self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: u32,
    ) {
        self.record(GlCall::FramebufferRenderbuffer {
            target,
            attachment,
            renderbuffer_target,
            renderbuffer,
        });
    }

    fn bind_texture(&self, target: u32, texture: u32) {
        self.record(GlCall::BindTexture { target, texture });
    }

    fn bind_renderbuffer(&self, target: u32, renderbuffer: u32) {
        self.record(GlCall::BindRenderbuffer {
            target,
            renderbuffer,
        });
    }

    fn draw_buffers(&self, buffers: &[u32]) {
        self.record(GlCall::DrawBuffers(buffers.to_vec()));
    }

    fn read_buffer(&self, mode: u32) {
        self.record(GlCall::ReadBuffer(mode));
    }

    fn draw_buffer(&self, mode: u32) {
        self.record(GlCall::DrawBuffer(mode));
    }

    fn blit_framebuffer(&self, src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32) {
        self.record(GlCall::BlitFramebuffer {
            src,
            dst,
            mask,
            filter,
        });
    }

    fn get_integer_v(&self, pname: u32) -> i32 {
        self.integer(pname)
    }

    fn get_renderbuffer_parameter_iv(&self, _target: u32, pname: u32) -> i32 {
        self.integer(pname)
    }

    fn get_tex_level_parameter_iv(&self, _target: u32, _level: i32, pname: u32) -> i32 {
        self.integer(pname)
    }

    fn enable(&self, cap: u32) {
        self.record(GlCall::Enable(cap));
    }

    fn disable(&self, cap: u32) {
        self.record(GlCall::Disable(cap));
    }

    fn enable_i(&self, cap: u32, index: u32) {
        self.record(GlCall::EnableI { cap, index });
    }

    fn disable_i(&self, cap: u32, index: u32) {
        self.record(GlCall::DisableI { cap, index });
    }

    fn blend_equation(&self, mode: u32) {
        self.record(GlCall::BlendEquation(mode));
    }

    fn blend_func_i(&self, buffer: u32, src: u32, dst: u32) {
        self.record(GlCall::BlendFuncI { buffer, src, dst });
    }

    fn blend_func_separate_i(
        &self,
        buffer: u32,
        src_rgb: u32,
        dst_rgb: u32,
        src_alpha: u32,
        dst_alpha: u32,
    ) {
        self.record(GlCall::BlendFuncSeparateI {
            buffer,
            src_rgb,
            dst_rgb,
            src_alpha,
            dst_alpha,
        });
    }

    fn alpha_func(&self, func: u32, reference: f32) {
        self.record(GlCall::AlphaFunc { func, reference });
    }

    fn depth_func(&self, func: u32) {
        self.record(GlCall::DepthFunc(func));
    }

    fn depth_mask(&self, enabled: bool) {
        self.record(GlCall::DepthMask(enabled));
    }

    fn depth_range(&self, near: f64, far: f64) {
        self.record(GlCall::DepthRange { near, far });
    }

    fn front_face(&self, mode: u32) {
        self.record(GlCall::FrontFace(mode));
    }

    fn polygon_mode(&self, face: u32, mode: u32) {
        self.record(GlCall::PolygonMode { face, mode });
    }

    fn clip_plane(&self, plane: u32, equation: [f64; 4]) {
        self.record(GlCall::ClipPlane { plane, equation });
    }

    fn point_size(&self, size: f32) {
        self.record(GlCall::PointSize(size));
    }

    fn primitive_restart_index(&self, index: u32) {
        self.record(GlCall::PrimitiveRestartIndex(index));
    }

    fn memory_barrier(&self, barriers: u32) {
        self.record(GlCall::MemoryBarrier(barriers));
    }

    fn clear_buffer_fv(&self, buffer: u32, draw_buffer: i32, values: [f32; 4]) {
        self.record(GlCall::ClearBufferfv {
            buffer,
            draw_buffer,
            values,
        });
    }

    fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        self.record(GlCall::DispatchCompute { x, y, z });
    }

    fn bind_image_texture(
        &self,
        unit: u32,
        texture: u32,
        level: i32,
        layered: bool,
        layer: i32,
        access: u32,
        format: u32,
    ) {
        self.record(GlCall::BindImageTexture {
            unit,
            texture,
            level,
            layered,
            layer,
            access,
            format,
        });
    }

    fn fence_sync(&self, condition: u32, flags: u32) -> u64 {
        self.record(GlCall::FenceSync { condition, flags });
        self.fence_handle
    }

    fn client_wait_sync(&self, sync: u64, flags: u32, timeout_ns: u64) -> u32 {
        self.record(GlCall::ClientWaitSync {
            sync,
            flags,
            timeout_ns,
        });
        gl::SIGNALED as u32
    }

    fn wait_sync(&self, sync: u64, flags: u32, timeout: u64) {
        self.record(GlCall::WaitSync {
            sync,
            flags,
            timeout,
        });
    }

    fn get_sync_iv(&self, _sync: u64, pname: u32) -> i32 {
        match pname {
            gl::SYNC_STATUS if self.signaled => gl::SIGNALED,
            gl::SYNC_STATUS => gl::UNSIGNALED,
            other => self.integer(other),
        }
    }

    fn delete_sync(&self, sync: u64) {
        self.record(GlCall::DeleteSync(sync));
    }

    fn map_buffer(&self, target: u32, access: u32) -> *mut u8 {
        self.record(GlCall::MapBuffer { target, access });
        self.map(MAPPED_BUFFER_BYTES)
    }

    fn map_buffer_range(&self, target: u32, offset: usize, length: usize, access: u32) -> *mut u8 {
        self.record(GlCall::MapBufferRange {
            target,
            offset,
            length,
            access,
        });
        self.map(length.max(1))
    }

    fn unmap_buffer(&self, target: u32) -> bool {
        self.record(GlCall::UnmapBuffer(target));
        true
    }

    fn uniform_f32v(&self, components: u32, location: i32, count: i32, values: &[f32]) {
        self.record(GlCall::UniformF32 {
            components,
            location,
            count,
            values: values.to_vec(),
        });
    }

    fn uniform_i32v(&self, components: u32, location: i32, count: i32, values: &[i32]) {
        self.record(GlCall::UniformI32 {
            components,
            location,
            count,
            values: values.to_vec(),
        });
    }

    fn uniform_u32v(&self, components: u32, location: i32, count: i32, values: &[u32]) {
        self.record(GlCall::UniformU32 {
            components,
            location,
            count,
            values: values.to_vec(),
        });
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
        self.record(GlCall::UniformMatrix {
            columns,
            rows,
            location,
            count,
            transpose,
            values: values.to_vec(),
        });
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let message = record.args().to_string();
        CAPTURED.with(|captured| captured.borrow_mut().push((record.level(), message)));
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Records emitted on the current thread since [`capture_logs`] was called.
#[derive(Debug)]
pub struct LogCapture {
    _private: (),
}

impl LogCapture {
    /// Every captured record, oldest first.
    pub fn entries(&self) -> Vec<(Level, String)> {
        CAPTURED.with(|captured| captured.borrow().clone())
    }

    /// The captured messages at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    /// The captured warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    /// The captured errors.
    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    /// Forgets everything captured so far on this thread.
    pub fn clear(&self) {
        CAPTURED.with(|captured| captured.borrow_mut().clear());
    }
}

/// Routes `log` records into a per-thread buffer and starts a fresh capture.
///
/// The capturing logger is installed on first use. If another logger was
/// installed before, nothing is captured.
pub fn capture_logs() -> LogCapture {
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    let capture = LogCapture { _private: () };
    capture.clear();
    capture
}
