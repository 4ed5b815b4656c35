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

//! The native function table a GL helper drives.
//!
//! [`GlFunctions`] mirrors the subset of the GL / GLES C API the helpers
//! call, with handles and out-parameters turned into plain Rust values. The
//! embedder implements it over whatever loader owns the context. The crate
//! ships `GlowFunctions` for live contexts (feature `glow`) and
//! `RecordingFunctions` for tests and headless tooling (feature `testing`).

use aster_core::renderer::api::ContextVersion;
use aster_core::HelperVariant;
use std::fmt;

/// Name, array size and type of one active uniform or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveVariable {
    /// The name as the driver reports it.
    pub name: String,
    /// The declared array length.
    pub size: i32,
    /// The raw GL type.
    pub gl_type: u32,
}

/// Optional entry points a variant may depend on.
///
/// Core GL 2.0 / ES 2.0 functions are assumed present on every context and
/// are not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `glMapBuffer`.
    MapBuffer,
    /// `glMapBufferRange`.
    MapBufferRange,
    /// `glClipPlane`.
    ClipPlane,
    /// `glPolygonMode`.
    PolygonMode,
    /// `glDrawBuffers`.
    DrawBuffers,
    /// `glDrawArraysInstanced`.
    DrawArraysInstanced,
    /// `glDrawElementsInstanced`.
    DrawElementsInstanced,
    /// `glDrawElementsBaseVertex`.
    DrawElementsBaseVertex,
    /// `glDrawElementsInstancedBaseVertex`.
    DrawElementsInstancedBaseVertex,
    /// `glDrawArraysInstancedBaseInstance`.
    DrawArraysInstancedBaseInstance,
    /// `glDrawElementsInstancedBaseVertexBaseInstance`.
    DrawElementsInstancedBaseVertexBaseInstance,
    /// `glDrawArraysIndirect`.
    DrawArraysIndirect,
    /// `glDrawElementsIndirect`.
    DrawElementsIndirect,
    /// `glVertexAttribIPointer`.
    VertexAttribIPointer,
    /// `glVertexAttribDivisor`.
    VertexAttribDivisor,
    /// `glGetActiveUniformBlockiv` and the rest of the uniform block API.
    UniformBlocks,
    /// `glFenceSync` and the rest of the sync object API.
    FenceSync,
    /// `glBlitFramebuffer`.
    BlitFramebuffer,
    /// `glFramebufferTexture`.
    FramebufferTexture,
    /// `glFramebufferTextureLayer`.
    FramebufferTextureLayer,
    /// `glPrimitiveRestartIndex`.
    PrimitiveRestartIndex,
    /// `glUniform1uiv` and the other unsigned uploads.
    UniformUnsigned,
    /// `glUniformMatrix2x3fv` and the other non-square uploads.
    NonSquareMatrices,
    /// `glClearBufferfv`.
    ClearBufferfv,
    /// `glBindFragDataLocation`.
    BindFragDataLocation,
    /// `glPatchParameteri`.
    PatchParameter,
    /// `glGetProgramInterfaceiv` and the program resource queries.
    ProgramInterface,
    /// `glMemoryBarrier`.
    MemoryBarrier,
    /// `glDispatchCompute`.
    DispatchCompute,
    /// `glBindImageTexture`.
    BindImageTexture,
    /// `glBlendFunci`.
    BlendFunci,
    /// `glEnablei`.
    EnableIndexed,
    /// `glShaderStorageBlockBinding`.
    ShaderStorageBlockBinding,
}

impl EntryPoint {
    /// The C name of the entry point.
    pub const fn name(self) -> &'static str {
        match self {
            EntryPoint::MapBuffer => "glMapBuffer",
            EntryPoint::MapBufferRange => "glMapBufferRange",
            EntryPoint::ClipPlane => "glClipPlane",
            EntryPoint::PolygonMode => "glPolygonMode",
            EntryPoint::DrawBuffers => "glDrawBuffers",
            EntryPoint::DrawArraysInstanced => "glDrawArraysInstanced",
            EntryPoint::DrawElementsInstanced => "glDrawElementsInstanced",
            EntryPoint::DrawElementsBaseVertex => "glDrawElementsBaseVertex",
            EntryPoint::DrawElementsInstancedBaseVertex => "glDrawElementsInstancedBaseVertex",
            EntryPoint::DrawArraysInstancedBaseInstance => "glDrawArraysInstancedBaseInstance",
            EntryPoint::DrawElementsInstancedBaseVertexBaseInstance => {
                "glDrawElementsInstancedBaseVertexBaseInstance"
            }
            EntryPoint::DrawArraysIndirect => "glDrawArraysIndirect",
            EntryPoint::DrawElementsIndirect => "glDrawElementsIndirect",
            EntryPoint::VertexAttribIPointer => "glVertexAttribIPointer",
            EntryPoint::VertexAttribDivisor => "glVertexAttribDivisor",
            EntryPoint::UniformBlocks => "glGetActiveUniformBlockiv",
            EntryPoint::FenceSync => "glFenceSync",
            EntryPoint::BlitFramebuffer => "glBlitFramebuffer",
            EntryPoint::FramebufferTexture => "glFramebufferTexture",
            EntryPoint::FramebufferTextureLayer => "glFramebufferTextureLayer",
            EntryPoint::PrimitiveRestartIndex => "glPrimitiveRestartIndex",
            EntryPoint::UniformUnsigned => "glUniform1uiv",
            EntryPoint::NonSquareMatrices => "glUniformMatrix2x3fv",
            EntryPoint::ClearBufferfv => "glClearBufferfv",
            EntryPoint::BindFragDataLocation => "glBindFragDataLocation",
            EntryPoint::PatchParameter => "glPatchParameteri",
            EntryPoint::ProgramInterface => "glGetProgramInterfaceiv",
            EntryPoint::MemoryBarrier => "glMemoryBarrier",
            EntryPoint::DispatchCompute => "glDispatchCompute",
            EntryPoint::BindImageTexture => "glBindImageTexture",
            EntryPoint::BlendFunci => "glBlendFunci",
            EntryPoint::EnableIndexed => "glEnablei",
            EntryPoint::ShaderStorageBlockBinding => "glShaderStorageBlockBinding",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const GL3_2_ENTRY_POINTS: &[EntryPoint] = &[
    EntryPoint::DrawArraysInstanced,
    EntryPoint::DrawElementsInstanced,
    EntryPoint::DrawElementsBaseVertex,
    EntryPoint::DrawElementsInstancedBaseVertex,
    EntryPoint::VertexAttribIPointer,
    EntryPoint::UniformBlocks,
    EntryPoint::FenceSync,
    EntryPoint::MapBufferRange,
    EntryPoint::BlitFramebuffer,
    EntryPoint::FramebufferTexture,
    EntryPoint::FramebufferTextureLayer,
    EntryPoint::DrawBuffers,
    EntryPoint::PrimitiveRestartIndex,
    EntryPoint::UniformUnsigned,
    EntryPoint::NonSquareMatrices,
    EntryPoint::ClearBufferfv,
    EntryPoint::BindFragDataLocation,
    EntryPoint::PolygonMode,
    EntryPoint::EnableIndexed,
];

const GL3_3_EXTRA: &[EntryPoint] = &[EntryPoint::VertexAttribDivisor];

const GL4_EXTRA: &[EntryPoint] = &[
    EntryPoint::DrawArraysInstancedBaseInstance,
    EntryPoint::DrawElementsInstancedBaseVertexBaseInstance,
    EntryPoint::DrawArraysIndirect,
    EntryPoint::DrawElementsIndirect,
    EntryPoint::PatchParameter,
    EntryPoint::ProgramInterface,
    EntryPoint::MemoryBarrier,
    EntryPoint::DispatchCompute,
    EntryPoint::BindImageTexture,
    EntryPoint::BlendFunci,
    EntryPoint::ShaderStorageBlockBinding,
];

const ES3_ENTRY_POINTS: &[EntryPoint] = &[
    EntryPoint::DrawArraysInstanced,
    EntryPoint::DrawElementsInstanced,
    EntryPoint::VertexAttribIPointer,
    EntryPoint::VertexAttribDivisor,
    EntryPoint::UniformBlocks,
    EntryPoint::FenceSync,
    EntryPoint::MapBufferRange,
    EntryPoint::BlitFramebuffer,
    EntryPoint::FramebufferTextureLayer,
    EntryPoint::DrawBuffers,
    EntryPoint::UniformUnsigned,
    EntryPoint::NonSquareMatrices,
    EntryPoint::ClearBufferfv,
];

const ES3_1_EXTRA: &[EntryPoint] = &[
    EntryPoint::DrawArraysIndirect,
    EntryPoint::DrawElementsIndirect,
    EntryPoint::ProgramInterface,
    EntryPoint::MemoryBarrier,
    EntryPoint::DispatchCompute,
    EntryPoint::BindImageTexture,
];

const ES3_2_EXTRA: &[EntryPoint] = &[
    EntryPoint::DrawElementsBaseVertex,
    EntryPoint::DrawElementsInstancedBaseVertex,
    EntryPoint::PatchParameter,
    EntryPoint::BlendFunci,
    EntryPoint::EnableIndexed,
    EntryPoint::FramebufferTexture,
];

/// The optional entry points `variant` cannot work without.
pub fn required_entry_points(variant: HelperVariant) -> Vec<EntryPoint> {
    let groups: &[&[EntryPoint]] = match variant {
        HelperVariant::Gl2 => &[&[
            EntryPoint::MapBuffer,
            EntryPoint::ClipPlane,
            EntryPoint::PolygonMode,
            EntryPoint::DrawBuffers,
        ]],
        HelperVariant::Gl3_2 => &[GL3_2_ENTRY_POINTS],
        HelperVariant::Gl3_3 => &[GL3_2_ENTRY_POINTS, GL3_3_EXTRA],
        HelperVariant::Gl4 => &[GL3_2_ENTRY_POINTS, GL3_3_EXTRA, GL4_EXTRA],
        HelperVariant::Es2 | HelperVariant::Rhi => &[],
        HelperVariant::Es3 => &[ES3_ENTRY_POINTS],
        HelperVariant::Es3_1 => &[ES3_ENTRY_POINTS, ES3_1_EXTRA],
        HelperVariant::Es3_2 => &[ES3_ENTRY_POINTS, ES3_1_EXTRA, ES3_2_EXTRA],
    };
    groups.iter().flat_map(|group| group.iter().copied()).collect()
}

/// The GL entry points a helper calls, bound to one live context.
///
/// Every method runs on the thread the context is current on. Methods take
/// `&self`: implementations forward to the driver, which owns the state.
/// Byte offsets into bound buffers are passed as `usize`.
#[allow(clippy::too_many_arguments)]
pub trait GlFunctions {
    // --- Context ---

    /// The API family and version of the context.
    fn context_version(&self) -> ContextVersion;
    /// Returns `true` if the context advertises `name` (for example `GL_OES_element_index_uint`).
    fn has_extension(&self, name: &str) -> bool;
    /// Returns `true` if `entry` resolved on this context.
    fn has_entry_point(&self, entry: EntryPoint) -> bool;

    // --- Drawing ---

    /// `glDrawArrays`.
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
    /// `glDrawElements`.
    fn draw_elements(&self, mode: u32, count: i32, index_type: u32, offset: usize);
    /// `glDrawElementsBaseVertex`.
    fn draw_elements_base_vertex(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        base_vertex: i32,
    );
    /// `glDrawArraysInstanced`.
    fn draw_arrays_instanced(&self, mode: u32, first: i32, count: i32, instances: i32);
    /// `glDrawArraysInstancedBaseInstance`.
    fn draw_arrays_instanced_base_instance(
        &self,
        mode: u32,
        first: i32,
        count: i32,
        instances: i32,
        base_instance: u32,
    );
    /// `glDrawElementsInstanced`.
    fn draw_elements_instanced(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
    );
    /// `glDrawElementsInstancedBaseVertex`.
    fn draw_elements_instanced_base_vertex(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
    );
    /// `glDrawElementsInstancedBaseVertexBaseInstance`.
    fn draw_elements_instanced_base_vertex_base_instance(
        &self,
        mode: u32,
        count: i32,
        index_type: u32,
        offset: usize,
        instances: i32,
        base_vertex: i32,
        base_instance: u32,
    );
    /// `glDrawArraysIndirect`.
    fn draw_arrays_indirect(&self, mode: u32, indirect: usize);
    /// `glDrawElementsIndirect`.
    fn draw_elements_indirect(&self, mode: u32, index_type: u32, indirect: usize);
    /// `glPatchParameteri`.
    fn patch_parameter_i(&self, pname: u32, value: i32);

    // --- Vertex input ---

    /// `glVertexAttribPointer`.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        component_type: u32,
        normalized: bool,
        stride: i32,
        offset: usize,
    );
    /// `glVertexAttribIPointer`.
    fn vertex_attrib_i_pointer(
        &self,
        index: u32,
        size: i32,
        component_type: u32,
        stride: i32,
        offset: usize,
    );
    /// `glVertexAttribDivisor`.
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32);
    /// `glEnableVertexAttribArray`.
    fn enable_vertex_attrib_array(&self, index: u32);
    /// `glUseProgram`.
    fn use_program(&self, program: u32);

    // --- Reflection ---

    /// `glGetProgramiv`.
    fn get_program_iv(&self, program: u32, pname: u32) -> i32;
    /// `glGetActiveUniform` with a name buffer of `max_name_length` bytes.
    fn get_active_uniform(&self, program: u32, index: u32, max_name_length: usize)
        -> ActiveVariable;
    /// `glGetUniformLocation`.
    fn get_uniform_location(&self, program: u32, name: &str) -> i32;
    /// `glGetActiveUniformsiv`, one result per index.
    fn get_active_uniforms_iv(&self, program: u32, indices: &[u32], pname: u32) -> Vec<i32>;
    /// `glGetActiveUniformBlockName`.
    fn get_active_uniform_block_name(
        &self,
        program: u32,
        block_index: u32,
        max_name_length: usize,
    ) -> String;
    /// `glGetActiveUniformBlockiv`.
    fn get_active_uniform_block_iv(&self, program: u32, block_index: u32, pname: u32) -> i32;
    /// `glGetProgramInterfaceiv`.
    fn get_program_interface_iv(&self, program: u32, interface: u32, pname: u32) -> i32;
    /// `glGetProgramResourceName`.
    fn get_program_resource_name(
        &self,
        program: u32,
        interface: u32,
        index: u32,
        max_name_length: usize,
    ) -> String;
    /// `glGetProgramResourceiv`, one result per property.
    fn get_program_resource_iv(
        &self,
        program: u32,
        interface: u32,
        index: u32,
        properties: &[u32],
    ) -> Vec<i32>;
    /// `glGetActiveAttrib` with a name buffer of `max_name_length` bytes.
    fn get_active_attrib(&self, program: u32, index: u32, max_name_length: usize)
        -> ActiveVariable;
    /// `glGetAttribLocation`.
    fn get_attrib_location(&self, program: u32, name: &str) -> i32;

    // --- Buffer and block bindings ---

    /// `glUniformBlockBinding`.
    fn uniform_block_binding(&self, program: u32, block_index: u32, binding: u32);
    /// `glShaderStorageBlockBinding`.
    fn shader_storage_block_binding(&self, program: u32, block_index: u32, binding: u32);
    /// `glBindBufferBase`.
    fn bind_buffer_base(&self, target: u32, index: u32, buffer: u32);
    /// `glBindFragDataLocation`.
    fn bind_frag_data_location(&self, program: u32, color: u32, name: &str);

    // --- Framebuffers and textures ---

    /// `glGenFramebuffers` for one name.
    fn gen_framebuffer(&self) -> u32;
    /// `glDeleteFramebuffers` for one name.
    fn delete_framebuffer(&self, framebuffer: u32);
    /// `glBindFramebuffer`.
    fn bind_framebuffer(&self, target: u32, framebuffer: u32);
    /// `glCheckFramebufferStatus`.
    fn check_framebuffer_status(&self, target: u32) -> u32;
    /// `glFramebufferTexture`.
    fn framebuffer_texture(&self, target: u32, attachment: u32, texture: u32, level: i32);
    /// `glFramebufferTexture2D`.
    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        tex_target: u32,
        texture: u32,
        level: i32,
    );
    /// `glFramebufferTextureLayer`.
    fn framebuffer_texture_layer(
        &self,
        target: u32,
        attachment: u32,
        texture: u32,
        level: i32,
        layer: i32,
    );
    /// `glFramebufferRenderbuffer`.
    fn framebuffer_renderbuffer(
        &self,
        target: u32,
        attachment: u32,
        renderbuffer_target: u32,
        renderbuffer: u32,
    );
    /// `glBindTexture`.
    fn bind_texture(&self, target: u32, texture: u32);
    /// `glBindRenderbuffer`.
    fn bind_renderbuffer(&self, target: u32, renderbuffer: u32);
    /// `glDrawBuffers`.
    fn draw_buffers(&self, buffers: &[u32]);
    /// `glReadBuffer`.
    fn read_buffer(&self, mode: u32);
    /// `glDrawBuffer`.
    fn draw_buffer(&self, mode: u32);
    /// `glBlitFramebuffer`.
    fn blit_framebuffer(&self, src: [i32; 4], dst: [i32; 4], mask: u32, filter: u32);

    // --- Queries ---

    /// `glGetIntegerv` for a single value.
    fn get_integer_v(&self, pname: u32) -> i32;
    /// `glGetRenderbufferParameteriv`.
    fn get_renderbuffer_parameter_iv(&self, target: u32, pname: u32) -> i32;
    /// `glGetTexLevelParameteriv`.
    fn get_tex_level_parameter_iv(&self, target: u32, level: i32, pname: u32) -> i32;

    // --- Fixed-function state ---

    /// `glEnable`.
    fn enable(&self, cap: u32);
    /// `glDisable`.
    fn disable(&self, cap: u32);
    /// `glEnablei`.
    fn enable_i(&self, cap: u32, index: u32);
    /// `glDisablei`.
    fn disable_i(&self, cap: u32, index: u32);
    /// `glBlendEquation`.
    fn blend_equation(&self, mode: u32);
    /// `glBlendFunci`.
    fn blend_func_i(&self, buffer: u32, src: u32, dst: u32);
    /// `glBlendFuncSeparatei`.
    fn blend_func_separate_i(
        &self,
        buffer: u32,
        src_rgb: u32,
        dst_rgb: u32,
        src_alpha: u32,
        dst_alpha: u32,
    );
    /// `glAlphaFunc`.
    fn alpha_func(&self, func: u32, reference: f32);
    /// `glDepthFunc`.
    fn depth_func(&self, func: u32);
    /// `glDepthMask`.
    fn depth_mask(&self, enabled: bool);
    /// `glDepthRange` / `glDepthRangef`.
    fn depth_range(&self, near: f64, far: f64);
    /// `glFrontFace`.
    fn front_face(&self, mode: u32);
    /// `glPolygonMode`.
    fn polygon_mode(&self, face: u32, mode: u32);
    /// `glClipPlane`.
    fn clip_plane(&self, plane: u32, equation: [f64; 4]);
    /// `glPointSize`.
    fn point_size(&self, size: f32);
    /// `glPrimitiveRestartIndex`.
    fn primitive_restart_index(&self, index: u32);
    /// `glMemoryBarrier`.
    fn memory_barrier(&self, barriers: u32);
    /// `glClearBufferfv` on the color buffer.
    fn clear_buffer_fv(&self, buffer: u32, draw_buffer: i32, values: [f32; 4]);
    /// `glDispatchCompute`.
    fn dispatch_compute(&self, x: u32, y: u32, z: u32);
    /// `glBindImageTexture`.
    fn bind_image_texture(
        &self,
        unit: u32,
        texture: u32,
        level: i32,
        layered: bool,
        layer: i32,
        access: u32,
        format: u32,
    );

    // --- Sync objects ---

    /// `glFenceSync`. `0` means the fence could not be created.
    fn fence_sync(&self, condition: u32, flags: u32) -> u64;
    /// `glClientWaitSync`.
    fn client_wait_sync(&self, sync: u64, flags: u32, timeout_ns: u64) -> u32;
    /// `glWaitSync`.
    fn wait_sync(&self, sync: u64, flags: u32, timeout: u64);
    /// `glGetSynciv` for a single value.
    fn get_sync_iv(&self, sync: u64, pname: u32) -> i32;
    /// `glDeleteSync`.
    fn delete_sync(&self, sync: u64);

    // --- Buffer mapping ---

    /// `glMapBuffer`. Null on failure.
    fn map_buffer(&self, target: u32, access: u32) -> *mut u8;
    /// `glMapBufferRange`. Null on failure.
    fn map_buffer_range(&self, target: u32, offset: usize, length: usize, access: u32)
        -> *mut u8;
    /// `glUnmapBuffer`.
    fn unmap_buffer(&self, target: u32) -> bool;

    // --- Uniform uploads ---

    /// `glUniform{components}fv`.
    fn uniform_f32v(&self, components: u32, location: i32, count: i32, values: &[f32]);
    /// `glUniform{components}iv`.
    fn uniform_i32v(&self, components: u32, location: i32, count: i32, values: &[i32]);
    /// `glUniform{components}uiv`.
    fn uniform_u32v(&self, components: u32, location: i32, count: i32, values: &[u32]);
    /// `glUniformMatrix{columns}x{rows}fv`.
    fn uniform_matrix_f32v(
        &self,
        columns: u32,
        rows: u32,
        location: i32,
        count: i32,
        transpose: bool,
        values: &[f32],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_lists_grow_with_the_variant() {
        let gl3 = required_entry_points(HelperVariant::Gl3_2);
        let gl33 = required_entry_points(HelperVariant::Gl3_3);
        let gl4 = required_entry_points(HelperVariant::Gl4);
        assert!(gl3.iter().all(|e| gl33.contains(e)));
        assert!(gl33.iter().all(|e| gl4.contains(e)));
        assert!(!gl3.contains(&EntryPoint::VertexAttribDivisor));
        assert!(gl33.contains(&EntryPoint::VertexAttribDivisor));
    }

    #[test]
    fn es2_requires_nothing_optional() {
        assert!(required_entry_points(HelperVariant::Es2).is_empty());
    }

    #[test]
    fn es3_2_requires_base_vertex_but_not_base_instance() {
        let es32 = required_entry_points(HelperVariant::Es3_2);
        assert!(es32.contains(&EntryPoint::DrawElementsInstancedBaseVertex));
        assert!(!es32.contains(&EntryPoint::DrawElementsInstancedBaseVertexBaseInstance));
    }

    #[test]
    fn entry_point_display_is_the_c_name() {
        assert_eq!(format!("{}", EntryPoint::FenceSync), "glFenceSync");
    }
}
