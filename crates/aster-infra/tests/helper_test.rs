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

//! Behaviour of the GL helper variants, observed through the native calls
//! they issue and the warnings they log.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use aster_core::renderer::api::{
    gl, Attachment, AttachmentPoint, CubeMapFace, ContextVersion, ProbeSettings, ShaderUniform,
    SyncHandle, TextureBinding, TextureTarget, UniformValue,
};
use aster_core::{GraphicsHelper, HelperVariant};
use aster_infra::graphics::gl::recording::{capture_logs, GlCall, RecordingFunctions};
use aster_infra::graphics::gl::{EntryPoint, GlFunctions, GlGraphicsHelper};

const GL_VARIANTS: [HelperVariant; 8] = [
    HelperVariant::Gl2,
    HelperVariant::Gl3_2,
    HelperVariant::Gl3_3,
    HelperVariant::Gl4,
    HelperVariant::Es2,
    HelperVariant::Es3,
    HelperVariant::Es3_1,
    HelperVariant::Es3_2,
];

fn context_for(variant: HelperVariant) -> ContextVersion {
    let (major, minor) = variant.version();
    match variant {
        HelperVariant::Es2 | HelperVariant::Es3 | HelperVariant::Es3_1 | HelperVariant::Es3_2 => {
            ContextVersion::es(major, minor)
        }
        _ => ContextVersion::desktop(major, minor),
    }
}

fn helper_with(
    variant: HelperVariant,
    recorder: RecordingFunctions,
    settings: ProbeSettings,
) -> (GlGraphicsHelper, Rc<RecordingFunctions>) {
    let recorder = Rc::new(recorder);
    let functions: Rc<dyn GlFunctions> = recorder.clone();
    let helper = GlGraphicsHelper::initialize_helper(variant, functions, settings)
        .expect("every entry point resolves on the recorder");
    (helper, recorder)
}

fn helper_for(variant: HelperVariant) -> (GlGraphicsHelper, Rc<RecordingFunctions>) {
    helper_with(
        variant,
        RecordingFunctions::new(context_for(variant)),
        ProbeSettings::default(),
    )
}

fn any_contains(messages: &[String], needle: &str) -> bool {
    messages.iter().any(|message| message.contains(needle))
}

// --- Drawing ---

#[test]
fn test_es3_drops_both_offsets_with_a_warning_each() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es3);

    helper.draw_elements_instanced_base_vertex_base_instance(
        gl::TRIANGLES,
        36,
        gl::UNSIGNED_SHORT,
        0,
        4,
        10,
        2,
    );

    assert_eq!(
        gl_calls.calls(),
        vec![GlCall::DrawElementsInstanced {
            mode: gl::TRIANGLES,
            count: 36,
            index_type: gl::UNSIGNED_SHORT,
            offset: 0,
            instances: 4,
        }]
    );
    let warnings = logs.warnings();
    assert!(any_contains(&warnings, "baseInstance = 2"), "{warnings:?}");
    assert!(any_contains(&warnings, "baseVertex = 10"), "{warnings:?}");
}

#[test]
fn test_es3_2_keeps_base_vertex_and_drops_base_instance() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es3_2);

    helper.draw_elements_instanced_base_vertex_base_instance(
        gl::TRIANGLES,
        6,
        gl::UNSIGNED_INT,
        128,
        2,
        5,
        1,
    );

    assert_eq!(
        gl_calls.calls(),
        vec![GlCall::DrawElementsInstancedBaseVertex {
            mode: gl::TRIANGLES,
            count: 6,
            index_type: gl::UNSIGNED_INT,
            offset: 128,
            instances: 2,
            base_vertex: 5,
        }]
    );
    let warnings = logs.warnings();
    assert!(any_contains(&warnings, "baseInstance = 1"));
    assert!(!any_contains(&warnings, "baseVertex"));
}

#[test]
fn test_gl4_forwards_both_offsets() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl4);

    helper.draw_elements_instanced_base_vertex_base_instance(
        gl::TRIANGLES,
        6,
        gl::UNSIGNED_INT,
        0,
        3,
        7,
        9,
    );

    assert_eq!(
        gl_calls.calls(),
        vec![GlCall::DrawElementsInstancedBaseVertexBaseInstance {
            mode: gl::TRIANGLES,
            count: 6,
            index_type: gl::UNSIGNED_INT,
            offset: 0,
            instances: 3,
            base_vertex: 7,
            base_instance: 9,
        }]
    );
    assert!(logs.warnings().is_empty());
}

#[test]
fn test_zero_offsets_draw_silently() {
    let logs = capture_logs();
    let (mut helper, _gl_calls) = helper_for(HelperVariant::Es3);

    helper.draw_elements_instanced_base_vertex_base_instance(
        gl::TRIANGLES,
        3,
        gl::UNSIGNED_SHORT,
        0,
        1,
        0,
        0,
    );
    helper.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, 0, 0);

    assert!(logs.warnings().is_empty());
}

#[test]
fn test_gl2_emulates_instancing_with_repeated_draws() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl2);

    helper.draw_arrays_instanced(gl::TRIANGLES, 0, 3, 3);

    let draw = GlCall::DrawArrays {
        mode: gl::TRIANGLES,
        first: 0,
        count: 3,
    };
    assert_eq!(gl_calls.calls(), vec![draw.clone(), draw.clone(), draw]);
}

#[test]
fn test_es2_skips_32_bit_indices_without_the_extension() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es2);

    helper.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_INT, 0, 0);
    helper.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_INT, 0, 0);

    assert!(gl_calls.calls().is_empty());
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("GL_OES_element_index_uint"));
}

#[test]
fn test_es2_draws_32_bit_indices_with_the_extension() {
    let recorder = RecordingFunctions::new(ContextVersion::es(2, 0))
        .with_extension("GL_OES_element_index_uint");
    let (mut helper, gl_calls) =
        helper_with(HelperVariant::Es2, recorder, ProbeSettings::default());

    helper.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_INT, 0, 0);

    assert_eq!(
        gl_calls.calls(),
        vec![GlCall::DrawElements {
            mode: gl::TRIANGLES,
            count: 3,
            index_type: gl::UNSIGNED_INT,
            offset: 0,
        }]
    );
}

#[test]
fn test_warn_once_can_be_disabled() {
    let logs = capture_logs();
    let (mut repeated, _) = helper_with(
        HelperVariant::Es3,
        RecordingFunctions::new(ContextVersion::es(3, 0)),
        ProbeSettings {
            warn_once: false,
            ..ProbeSettings::default()
        },
    );
    repeated.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, 0, 4);
    repeated.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, 0, 4);
    assert_eq!(logs.warnings().len(), 2);

    logs.clear();
    let (mut once, _) = helper_for(HelperVariant::Es3);
    once.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, 0, 4);
    once.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, 0, 4);
    assert_eq!(logs.warnings().len(), 1);
}

#[test]
fn test_indirect_and_tessellation_are_gated() {
    let logs = capture_logs();
    let (mut es3, es3_calls) = helper_for(HelperVariant::Es3);
    es3.draw_arrays_indirect(gl::TRIANGLES, 0);
    es3.set_vertices_per_patch(3);
    assert!(es3_calls.calls().is_empty());
    assert!(any_contains(&logs.warnings(), "Indirect drawing is not supported"));

    let (mut es3_2, es3_2_calls) = helper_for(HelperVariant::Es3_2);
    es3_2.draw_arrays_indirect(gl::TRIANGLES, 16);
    es3_2.set_vertices_per_patch(3);
    assert_eq!(
        es3_2_calls.calls(),
        vec![
            GlCall::DrawArraysIndirect {
                mode: gl::TRIANGLES,
                indirect: 16,
            },
            GlCall::PatchParameter {
                pname: gl::PATCH_VERTICES,
                value: 3,
            },
        ]
    );
}

// --- Vertex input ---

#[test]
fn test_attribute_pointer_follows_the_shader_type() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl3_3);

    helper.vertex_attribute_pointer(gl::FLOAT_VEC3, 0, 3, gl::FLOAT, false, 24, 0);
    helper.vertex_attribute_pointer(gl::UNSIGNED_INT_VEC2, 1, 2, gl::UNSIGNED_INT, false, 24, 12);
    helper.vertex_attribute_pointer(gl::FLOAT_MAT2X3, 2, 3, gl::FLOAT, false, 24, 0);

    assert_eq!(
        gl_calls.calls(),
        vec![
            GlCall::VertexAttribPointer {
                index: 0,
                size: 3,
                component_type: gl::FLOAT,
                normalized: false,
                stride: 24,
                offset: 0,
            },
            GlCall::VertexAttribIPointer {
                index: 1,
                size: 2,
                component_type: gl::UNSIGNED_INT,
                stride: 24,
                offset: 12,
            },
            GlCall::VertexAttribPointer {
                index: 2,
                size: 3,
                component_type: gl::FLOAT,
                normalized: false,
                stride: 24,
                offset: 0,
            },
        ]
    );
}

#[test]
#[should_panic(expected = "unhandled shader data type")]
fn test_es2_integer_attribute_is_a_contract_violation() {
    let (mut helper, _) = helper_for(HelperVariant::Es2);
    helper.vertex_attribute_pointer(gl::INT_VEC2, 0, 2, gl::INT, false, 8, 0);
}

const FLOAT_ATTRIBUTES: [u32; 7] = [
    gl::FLOAT,
    gl::FLOAT_VEC2,
    gl::FLOAT_VEC3,
    gl::FLOAT_VEC4,
    gl::FLOAT_MAT2,
    gl::FLOAT_MAT3,
    gl::FLOAT_MAT4,
];

const NON_SQUARE_ATTRIBUTES: [u32; 6] = [
    gl::FLOAT_MAT2X3,
    gl::FLOAT_MAT2X4,
    gl::FLOAT_MAT3X2,
    gl::FLOAT_MAT3X4,
    gl::FLOAT_MAT4X2,
    gl::FLOAT_MAT4X3,
];

const INTEGER_ATTRIBUTES: [u32; 8] = [
    gl::INT,
    gl::INT_VEC2,
    gl::INT_VEC3,
    gl::INT_VEC4,
    gl::UNSIGNED_INT,
    gl::UNSIGNED_INT_VEC2,
    gl::UNSIGNED_INT_VEC3,
    gl::UNSIGNED_INT_VEC4,
];

/// Points attribute 0 at `shader_data_type` on a fresh helper; `None` if it panicked.
fn attribute_calls(variant: HelperVariant, shader_data_type: u32) -> Option<Vec<GlCall>> {
    catch_unwind(AssertUnwindSafe(|| {
        let (mut helper, gl_calls) = helper_for(variant);
        helper.vertex_attribute_pointer(shader_data_type, 0, 2, gl::FLOAT, false, 16, 4);
        gl_calls.calls()
    }))
    .ok()
}

#[test]
fn test_every_attribute_type_on_every_variant() {
    let float_pointer = vec![GlCall::VertexAttribPointer {
        index: 0,
        size: 2,
        component_type: gl::FLOAT,
        normalized: false,
        stride: 16,
        offset: 4,
    }];
    let integer_pointer = vec![GlCall::VertexAttribIPointer {
        index: 0,
        size: 2,
        component_type: gl::FLOAT,
        stride: 16,
        offset: 4,
    }];

    for variant in GL_VARIANTS {
        for shader_data_type in FLOAT_ATTRIBUTES {
            assert_eq!(
                attribute_calls(variant, shader_data_type).as_ref(),
                Some(&float_pointer),
                "{variant} {shader_data_type:#x}"
            );
        }
        for shader_data_type in NON_SQUARE_ATTRIBUTES {
            let expected = (variant != HelperVariant::Es2).then(|| float_pointer.clone());
            assert_eq!(
                attribute_calls(variant, shader_data_type),
                expected,
                "{variant} {shader_data_type:#x}"
            );
        }
        let legacy = matches!(variant, HelperVariant::Gl2 | HelperVariant::Es2);
        for shader_data_type in INTEGER_ATTRIBUTES {
            let expected = (!legacy).then(|| integer_pointer.clone());
            assert_eq!(
                attribute_calls(variant, shader_data_type),
                expected,
                "{variant} {shader_data_type:#x}"
            );
        }
    }
}

#[test]
fn test_gl2_non_square_attribute_uses_the_float_pointer() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl2);
    helper.vertex_attribute_pointer(gl::FLOAT_MAT3X2, 5, 2, gl::FLOAT, false, 24, 8);
    assert_eq!(
        gl_calls.calls(),
        vec![GlCall::VertexAttribPointer {
            index: 5,
            size: 2,
            component_type: gl::FLOAT,
            normalized: false,
            stride: 24,
            offset: 8,
        }]
    );
}

#[test]
#[should_panic(expected = "unhandled shader data type")]
fn test_gl4_double_attribute_is_a_contract_violation() {
    let (mut helper, _) = helper_for(HelperVariant::Gl4);
    helper.vertex_attribute_pointer(gl::DOUBLE, 0, 1, gl::DOUBLE, false, 8, 0);
}

#[test]
fn test_divisor_needs_gl3_3_or_es3() {
    let (mut gl3_2, gl3_2_calls) = helper_for(HelperVariant::Gl3_2);
    gl3_2.vertex_attrib_divisor(1, 1);
    assert!(gl3_2_calls.calls().is_empty());

    let (mut es3, es3_calls) = helper_for(HelperVariant::Es3);
    es3.vertex_attrib_divisor(1, 1);
    assert_eq!(
        es3_calls.calls(),
        vec![GlCall::VertexAttribDivisor {
            index: 1,
            divisor: 1,
        }]
    );
}

// --- Framebuffers ---

#[test]
fn test_all_cube_faces_at_once_is_refused_everywhere() {
    let cube = TextureBinding::new(5, TextureTarget::CubeMap);
    let attachment = Attachment::new(AttachmentPoint::Color(0)).with_face(CubeMapFace::AllFaces);

    for variant in GL_VARIANTS {
        let logs = capture_logs();
        let (mut helper, gl_calls) = helper_for(variant);

        helper.bind_frame_buffer_attachment(&cube, &attachment);

        assert!(gl_calls.calls().is_empty(), "{variant} issued calls");
        assert!(
            any_contains(&logs.warnings(), "all the faces of a cube map"),
            "{variant} did not warn"
        );
    }
}

#[test]
fn test_single_cube_face_attaches_as_2d() {
    let cube = TextureBinding::new(5, TextureTarget::CubeMap);
    let attachment = Attachment::new(AttachmentPoint::Color(0)).with_face(CubeMapFace::PositiveY);

    let (mut gl3, gl3_calls) = helper_for(HelperVariant::Gl3_3);
    gl3.bind_frame_buffer_attachment(&cube, &attachment);
    assert_eq!(
        gl3_calls.calls(),
        vec![
            GlCall::BindTexture {
                target: gl::TEXTURE_CUBE_MAP,
                texture: 5,
            },
            GlCall::FramebufferTexture2D {
                target: gl::DRAW_FRAMEBUFFER,
                attachment: gl::COLOR_ATTACHMENT0,
                tex_target: gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
                texture: 5,
                level: 0,
            },
            GlCall::BindTexture {
                target: gl::TEXTURE_CUBE_MAP,
                texture: 0,
            },
        ]
    );

    let (mut es2, es2_calls) = helper_for(HelperVariant::Es2);
    es2.bind_frame_buffer_attachment(&cube, &attachment);
    assert!(es2_calls.calls().contains(&GlCall::FramebufferTexture2D {
        target: gl::FRAMEBUFFER,
        attachment: gl::COLOR_ATTACHMENT0,
        tex_target: gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
        texture: 5,
        level: 0,
    }));
}

#[test]
fn test_layered_targets_attach_one_layer() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl4);

    let array = TextureBinding::new(3, TextureTarget::Target2DArray);
    helper.bind_frame_buffer_attachment(
        &array,
        &Attachment::new(AttachmentPoint::Color(1)).with_layer(3),
    );
    let cube_array = TextureBinding::new(4, TextureTarget::CubeMapArray);
    helper.bind_frame_buffer_attachment(
        &cube_array,
        &Attachment::new(AttachmentPoint::Depth)
            .with_face(CubeMapFace::NegativeX)
            .with_layer(2),
    );

    let layers: Vec<GlCall> = gl_calls
        .calls()
        .into_iter()
        .filter(|call| matches!(call, GlCall::FramebufferTextureLayer { .. }))
        .collect();
    assert_eq!(
        layers,
        vec![
            GlCall::FramebufferTextureLayer {
                target: gl::DRAW_FRAMEBUFFER,
                attachment: gl::COLOR_ATTACHMENT0 + 1,
                texture: 3,
                level: 0,
                layer: 3,
            },
            GlCall::FramebufferTextureLayer {
                target: gl::DRAW_FRAMEBUFFER,
                attachment: gl::DEPTH_ATTACHMENT,
                texture: 4,
                level: 0,
                layer: 13,
            },
        ]
    );
}

#[test]
fn test_es2_refuses_extra_color_attachments() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es2);

    helper.bind_frame_buffer_attachment(
        &TextureBinding::new(1, TextureTarget::Target2D),
        &Attachment::new(AttachmentPoint::Color(1)),
    );

    assert!(gl_calls.calls().is_empty());
    assert!(any_contains(&logs.errors(), "Unsupported FBO attachment point"));
}

#[test]
fn test_only_es3_family_needs_depth_stencil_render_buffers() {
    let depth_stencil = Attachment::new(AttachmentPoint::DepthStencil);
    let depth = Attachment::new(AttachmentPoint::Depth);

    for variant in GL_VARIANTS {
        let (helper, _) = helper_for(variant);
        assert_eq!(
            helper.frame_buffer_needs_render_buffer(&depth_stencil),
            variant.is_es3_family(),
            "{variant}"
        );
        assert!(!helper.frame_buffer_needs_render_buffer(&depth), "{variant}");
    }
}

#[test]
fn test_es_depth_stencil_render_buffer_fills_both_points() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es3);

    helper.bind_frame_buffer_attachment_render_buffer(
        7,
        &Attachment::new(AttachmentPoint::DepthStencil),
    );

    assert_eq!(
        gl_calls.calls(),
        vec![
            GlCall::BindRenderbuffer {
                target: gl::RENDERBUFFER,
                renderbuffer: 7,
            },
            GlCall::FramebufferRenderbuffer {
                target: gl::FRAMEBUFFER,
                attachment: gl::DEPTH_ATTACHMENT,
                renderbuffer_target: gl::RENDERBUFFER,
                renderbuffer: 7,
            },
            GlCall::FramebufferRenderbuffer {
                target: gl::FRAMEBUFFER,
                attachment: gl::STENCIL_ATTACHMENT,
                renderbuffer_target: gl::RENDERBUFFER,
                renderbuffer: 7,
            },
            GlCall::BindRenderbuffer {
                target: gl::RENDERBUFFER,
                renderbuffer: 0,
            },
        ]
    );
}

#[test]
fn test_draw_buffers_map_color_indices() {
    let logs = capture_logs();
    let (mut es2, es2_calls) = helper_for(HelperVariant::Es2);
    es2.draw_buffers(&[0, 1]);
    assert!(es2_calls.calls().is_empty());
    assert!(any_contains(&logs.warnings(), "drawBuffers is not supported"));

    let (mut gl3, gl3_calls) = helper_for(HelperVariant::Gl3_2);
    gl3.draw_buffers(&[0, 2]);
    assert_eq!(
        gl3_calls.calls(),
        vec![GlCall::DrawBuffers(vec![
            gl::COLOR_ATTACHMENT0,
            gl::COLOR_ATTACHMENT0 + 2
        ])]
    );
}

#[test]
fn test_negative_draw_buffer_indices_are_skipped() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl3_2);
    helper.draw_buffers(&[0, -1, 2]);
    assert_eq!(
        gl_calls.calls(),
        vec![GlCall::DrawBuffers(vec![
            gl::COLOR_ATTACHMENT0,
            gl::COLOR_ATTACHMENT0 + 2
        ])]
    );
    assert!(any_contains(&logs.warnings(), "negative color attachment index -1"));
}

// --- Fixed-function state ---

#[test]
fn test_clip_planes_per_variant() {
    let logs = capture_logs();
    let (mut es3, es3_calls) = helper_for(HelperVariant::Es3);
    es3.enable_clip_plane(0);
    assert!(es3_calls.calls().is_empty());
    assert!(any_contains(&logs.errors(), "User clip planes"));
    assert_eq!(es3.max_clip_plane_count(), 0);

    let (mut gl2, gl2_calls) = helper_for(HelperVariant::Gl2);
    gl2.set_clip_plane(1, [0.0, 1.0, 0.0], -2.0);
    assert_eq!(
        gl2_calls.calls(),
        vec![GlCall::ClipPlane {
            plane: gl::CLIP_DISTANCE0 + 1,
            equation: [0.0, 1.0, 0.0, -2.0],
        }]
    );

    let recorder = RecordingFunctions::new(ContextVersion::desktop(3, 3))
        .with_integer(gl::MAX_CLIP_DISTANCES, 8);
    let (mut gl3, gl3_calls) =
        helper_with(HelperVariant::Gl3_3, recorder, ProbeSettings::default());
    gl3.set_clip_plane(1, [0.0, 1.0, 0.0], -2.0);
    assert!(gl3_calls.calls().is_empty());
    assert_eq!(gl3.max_clip_plane_count(), 8);
}

#[test]
fn test_alpha_test_only_exists_on_gl2() {
    let (mut gl2, gl2_calls) = helper_for(HelperVariant::Gl2);
    gl2.alpha_test(gl::GREATER, 0.5);
    assert_eq!(
        gl2_calls.calls(),
        vec![
            GlCall::Enable(gl::ALPHA_TEST),
            GlCall::AlphaFunc {
                func: gl::GREATER,
                reference: 0.5,
            },
        ]
    );

    let (mut gl3, gl3_calls) = helper_for(HelperVariant::Gl3_3);
    gl3.alpha_test(gl::GREATER, 0.5);
    assert!(gl3_calls.calls().is_empty());
}

#[test]
fn test_indexed_enable_starts_at_gl3_2() {
    let (mut gl3, gl3_calls) = helper_for(HelperVariant::Gl3_2);
    gl3.enable_i(gl::BLEND, 1);
    assert_eq!(
        gl3_calls.calls(),
        vec![GlCall::EnableI {
            cap: gl::BLEND,
            index: 1,
        }]
    );

    let (mut es3_1, es3_1_calls) = helper_for(HelperVariant::Es3_1);
    es3_1.enable_i(gl::BLEND, 1);
    assert!(es3_1_calls.calls().is_empty());
}

// --- Synchronization and buffers ---

#[test]
fn test_es2_fences_report_the_sentinel() {
    let logs = capture_logs();
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es2);

    assert_eq!(helper.fence_sync(), None);
    let foreign = SyncHandle::from_raw(1).expect("non-zero handle");
    assert!(!helper.was_sync_signaled(foreign));

    assert!(gl_calls.calls().is_empty());
    assert!(any_contains(&logs.warnings(), "Fences are not supported"));
}

#[test]
fn test_es3_fence_lifecycle() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Es3);

    let fence = helper.fence_sync().expect("ES 3.0 has fences");
    assert!(helper.was_sync_signaled(fence));
    helper.wait_sync(fence);
    helper.delete_sync(fence);

    assert_eq!(
        gl_calls.calls(),
        vec![
            GlCall::FenceSync {
                condition: gl::SYNC_GPU_COMMANDS_COMPLETE,
                flags: 0,
            },
            GlCall::WaitSync {
                sync: fence.raw(),
                flags: 0,
                timeout: gl::TIMEOUT_IGNORED,
            },
            GlCall::DeleteSync(fence.raw()),
        ]
    );
}

#[test]
fn test_unsignaled_and_failed_fences() {
    let recorder =
        RecordingFunctions::new(ContextVersion::desktop(3, 3)).with_signaled_fences(false);
    let (mut pending, _) = helper_with(HelperVariant::Gl3_3, recorder, ProbeSettings::default());
    let fence = pending.fence_sync().expect("fence created");
    assert!(!pending.was_sync_signaled(fence));

    let logs = capture_logs();
    let recorder = RecordingFunctions::new(ContextVersion::desktop(3, 3)).with_failing_fences();
    let (mut failing, _) = helper_with(HelperVariant::Gl3_3, recorder, ProbeSettings::default());
    assert_eq!(failing.fence_sync(), None);
    assert!(any_contains(&logs.errors(), "glFenceSync"));
}

#[test]
fn test_map_buffer_per_variant() {
    let (mut gl2, gl2_calls) = helper_for(HelperVariant::Gl2);
    assert!(gl2.map_buffer(gl::ARRAY_BUFFER, 64).is_some());
    assert_eq!(
        gl2_calls.calls(),
        vec![GlCall::MapBuffer {
            target: gl::ARRAY_BUFFER,
            access: gl::READ_WRITE,
        }]
    );

    let (mut gl3, gl3_calls) = helper_for(HelperVariant::Gl3_3);
    assert!(gl3.map_buffer(gl::ARRAY_BUFFER, 64).is_some());
    assert!(gl3.unmap_buffer(gl::ARRAY_BUFFER));
    assert_eq!(
        gl3_calls.calls(),
        vec![
            GlCall::MapBufferRange {
                target: gl::ARRAY_BUFFER,
                offset: 0,
                length: 64,
                access: gl::MAP_READ_BIT | gl::MAP_WRITE_BIT,
            },
            GlCall::UnmapBuffer(gl::ARRAY_BUFFER),
        ]
    );

    let (mut es2, es2_calls) = helper_for(HelperVariant::Es2);
    assert!(es2.map_buffer(gl::ARRAY_BUFFER, 64).is_none());
    assert!(!es2.unmap_buffer(gl::ARRAY_BUFFER));
    assert!(es2_calls.calls().is_empty());
}

#[test]
fn test_storage_block_binding_is_native_only_on_gl4() {
    let (mut gl4, gl4_calls) = helper_for(HelperVariant::Gl4);
    gl4.bind_shader_storage_block(3, 0, 2);
    assert_eq!(
        gl4_calls.calls(),
        vec![GlCall::ShaderStorageBlockBinding {
            program: 3,
            block_index: 0,
            binding: 2,
        }]
    );

    let logs = capture_logs();
    let (mut es3_1, es3_1_calls) = helper_for(HelperVariant::Es3_1);
    es3_1.bind_shader_storage_block(3, 0, 2);
    assert!(es3_1_calls.calls().is_empty());
    assert!(any_contains(&logs.warnings(), "declare the binding in the shader"));
}

// --- Uniforms ---

#[test]
fn test_unsigned_uploads_are_missing_on_legacy_variants() {
    let logs = capture_logs();
    let (mut es2, es2_calls) = helper_for(HelperVariant::Es2);
    es2.uniform_2uiv(0, 1, &[1, 2]);
    assert!(es2_calls.calls().is_empty());
    assert!(any_contains(&logs.warnings(), "glUniform2uiv"));

    let (mut es3, es3_calls) = helper_for(HelperVariant::Es3);
    es3.uniform_2uiv(0, 1, &[1, 2]);
    assert_eq!(
        es3_calls.calls(),
        vec![GlCall::UniformU32 {
            components: 2,
            location: 0,
            count: 1,
            values: vec![1, 2],
        }]
    );
}

#[test]
fn test_gl2_non_square_uploads_depend_on_the_entry_point() {
    let values = [0.0f32; 6];

    let recorder = RecordingFunctions::new(ContextVersion::desktop(2, 0))
        .without_entry_point(EntryPoint::NonSquareMatrices);
    let (mut bare, bare_calls) =
        helper_with(HelperVariant::Gl2, recorder, ProbeSettings::default());
    bare.uniform_matrix_2x3fv(4, 1, &values);
    assert!(bare_calls.calls().is_empty());

    let (mut full, full_calls) = helper_for(HelperVariant::Gl2);
    full.uniform_matrix_2x3fv(4, 1, &values);
    assert_eq!(
        full_calls.calls(),
        vec![GlCall::UniformMatrix {
            columns: 2,
            rows: 3,
            location: 4,
            count: 1,
            transpose: false,
            values: values.to_vec(),
        }]
    );
}

#[test]
fn test_apply_uniform_picks_the_entry_point_from_the_type() {
    let (mut helper, gl_calls) = helper_for(HelperVariant::Gl3_3);
    let vec3 = ShaderUniform {
        name: "tint".into(),
        gl_type: gl::FLOAT_VEC3,
        size: 1,
        location: 4,
        block_index: -1,
        ..ShaderUniform::default()
    };
    let flag = ShaderUniform {
        name: "enabled".into(),
        gl_type: gl::BOOL,
        size: 1,
        location: 5,
        block_index: -1,
        ..ShaderUniform::default()
    };
    let member = ShaderUniform {
        block_index: 0,
        location: -1,
        ..vec3.clone()
    };

    assert!(helper.apply_uniform(&vec3, &UniformValue::Float(vec![0.25, 0.5, 1.0])));
    assert!(helper.apply_uniform(&flag, &UniformValue::Bool(vec![true])));
    assert!(!helper.apply_uniform(&member, &UniformValue::Float(vec![1.0, 1.0, 1.0])));

    assert_eq!(
        gl_calls.calls(),
        vec![
            GlCall::UniformF32 {
                components: 3,
                location: 4,
                count: 1,
                values: vec![0.25, 0.5, 1.0],
            },
            GlCall::UniformI32 {
                components: 1,
                location: 5,
                count: 1,
                values: vec![1],
            },
        ]
    );
}

#[test]
fn test_apply_uniform_reports_shapes_the_variant_cannot_upload() {
    let uvec2 = ShaderUniform {
        name: "tileCount".into(),
        gl_type: gl::UNSIGNED_INT_VEC2,
        size: 1,
        location: 2,
        block_index: -1,
        ..ShaderUniform::default()
    };
    let value = UniformValue::UInt(vec![4, 8]);

    let (mut gl2, gl2_calls) = helper_for(HelperVariant::Gl2);
    assert!(!gl2.supports_uniform_upload(gl::UNSIGNED_INT_VEC2));
    assert!(!gl2.apply_uniform(&uvec2, &value));
    assert!(gl2_calls.calls().is_empty());

    let (mut gl33, gl33_calls) = helper_for(HelperVariant::Gl3_3);
    assert!(gl33.apply_uniform(&uvec2, &value));
    assert_eq!(
        gl33_calls.calls(),
        vec![GlCall::UniformU32 {
            components: 2,
            location: 2,
            count: 1,
            values: vec![4, 8],
        }]
    );
}

#[test]
fn test_es2_apply_uniform_refuses_non_square_matrices() {
    let skew = ShaderUniform {
        name: "skew".into(),
        gl_type: gl::FLOAT_MAT2X3,
        size: 1,
        location: 1,
        block_index: -1,
        ..ShaderUniform::default()
    };
    let (mut es2, es2_calls) = helper_for(HelperVariant::Es2);
    assert!(!es2.apply_uniform(&skew, &UniformValue::Float(vec![0.0; 6])));
    assert!(es2_calls.calls().is_empty());
    assert!(es2.supports_uniform_upload(gl::FLOAT_MAT3));

    let recorder = RecordingFunctions::new(ContextVersion::desktop(2, 0))
        .without_entry_point(EntryPoint::NonSquareMatrices);
    let (bare, _) = helper_with(HelperVariant::Gl2, recorder, ProbeSettings::default());
    assert!(!bare.supports_uniform_upload(gl::FLOAT_MAT2X3));
    let (full, _) = helper_for(HelperVariant::Gl2);
    assert!(full.supports_uniform_upload(gl::FLOAT_MAT2X3));
}

#[test]
fn test_uniform_buffers_need_ubo_support() {
    let member = ShaderUniform {
        name: "scale".into(),
        gl_type: gl::FLOAT,
        size: 1,
        location: -1,
        block_index: 0,
        offset: 4,
        ..ShaderUniform::default()
    };
    let value = UniformValue::Float(vec![2.0]);

    for variant in [HelperVariant::Gl2, HelperVariant::Es2] {
        let (helper, _) = helper_for(variant);
        let mut block = [0u8; 16];
        assert!(!helper.build_uniform_buffer(&value, &member, &mut block), "{variant}");
        assert_eq!(block, [0u8; 16]);
    }

    let (helper, _) = helper_for(HelperVariant::Es3);
    let mut block = [0u8; 16];
    assert!(helper.build_uniform_buffer(&value, &member, &mut block));
    assert_eq!(block[4..8], 2.0f32.to_ne_bytes());
}
