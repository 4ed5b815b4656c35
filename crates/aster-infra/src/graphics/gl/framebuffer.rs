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

//! Framebuffer objects, attachments and draw buffer selection.

use aster_core::renderer::api::{
    gl, Attachment, AttachmentPoint, CubeMapFace, FboBindMode, Feature, TextureBinding,
    TextureTarget,
};
use aster_core::HelperVariant;

use super::helper::GlGraphicsHelper;

/// The native call an attachment resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttachCall {
    Texture2D { tex_target: u32 },
    Layer { layer: i32 },
    Whole,
}

/// The framebuffer binding point attachment calls go through.
fn attach_target(helper: &GlGraphicsHelper) -> u32 {
    if helper.variant == HelperVariant::Es2 {
        gl::FRAMEBUFFER
    } else {
        gl::DRAW_FRAMEBUFFER
    }
}

pub(super) fn bind_frame_buffer_object(
    helper: &GlGraphicsHelper,
    frame_buffer: u32,
    mode: FboBindMode,
) {
    let target = if helper.variant == HelperVariant::Es2 {
        gl::FRAMEBUFFER
    } else {
        mode.to_gl()
    };
    helper.gl.bind_framebuffer(target, frame_buffer);
}

/// Maps an attachment point to its enumerant, or logs why the variant cannot attach there.
fn attachment_enum(helper: &GlGraphicsHelper, point: AttachmentPoint) -> Option<u32> {
    let supported = match helper.variant {
        HelperVariant::Es2 => matches!(
            point,
            AttachmentPoint::Color(0) | AttachmentPoint::Depth | AttachmentPoint::Stencil
        ),
        HelperVariant::Gl2 | HelperVariant::Es3 | HelperVariant::Es3_1 => {
            point != AttachmentPoint::DepthStencil
        }
        _ => true,
    };
    match point.to_gl() {
        Some(attachment) if supported => Some(attachment),
        _ => {
            log::error!(
                "Unsupported FBO attachment point {point:?} on {}",
                helper.variant
            );
            None
        }
    }
}

fn resolve_attach_call(
    helper: &GlGraphicsHelper,
    target: TextureTarget,
    attachment: &Attachment,
) -> Option<AttachCall> {
    let variant = helper.variant;
    let desktop_layers = matches!(
        variant,
        HelperVariant::Gl3_2 | HelperVariant::Gl3_3 | HelperVariant::Gl4
    );
    let es_layers = variant.is_es3_family();

    match target {
        TextureTarget::Target2D => Some(AttachCall::Texture2D {
            tex_target: gl::TEXTURE_2D,
        }),
        TextureTarget::Rectangle if !helper.is_es() => Some(AttachCall::Texture2D {
            tex_target: gl::TEXTURE_RECTANGLE,
        }),
        TextureTarget::CubeMap => attachment
            .face
            .to_gl()
            .map(|face| AttachCall::Texture2D { tex_target: face }),
        t if desktop_layers && t.is_layered() => Some(AttachCall::Layer {
            layer: attachment.layer,
        }),
        TextureTarget::Target2DArray | TextureTarget::Target3D if es_layers => {
            Some(AttachCall::Layer {
                layer: attachment.layer,
            })
        }
        TextureTarget::Target2DMultisampleArray if variant == HelperVariant::Es3_2 => {
            Some(AttachCall::Layer {
                layer: attachment.layer,
            })
        }
        TextureTarget::CubeMapArray
            if (desktop_layers || variant == HelperVariant::Es3_2)
                && attachment.face != CubeMapFace::AllFaces =>
        {
            attachment.face.index().map(|face| AttachCall::Layer {
                layer: attachment.layer * 6 + face,
            })
        }
        _ if desktop_layers || variant == HelperVariant::Es3_2 => Some(AttachCall::Whole),
        _ => None,
    }
}

pub(super) fn bind_frame_buffer_attachment(
    helper: &GlGraphicsHelper,
    texture: &TextureBinding,
    attachment: &Attachment,
) {
    if texture.target == TextureTarget::CubeMap && attachment.face == CubeMapFace::AllFaces {
        log::warn!(
            "{} doesn't handle attaching all the faces of a cube map texture at once to an FBO",
            helper.variant
        );
        return;
    }

    let Some(attachment_point) = attachment_enum(helper, attachment.point) else {
        return;
    };
    let Some(call) = resolve_attach_call(helper, texture.target, attachment) else {
        log::error!(
            "Unsupported Texture FBO attachment format {:?} on {}",
            texture.target,
            helper.variant
        );
        return;
    };

    let fbo_target = attach_target(helper);
    let tex_target = texture.target.to_gl();
    helper.gl.bind_texture(tex_target, texture.id);
    match call {
        AttachCall::Texture2D { tex_target } => helper.gl.framebuffer_texture_2d(
            fbo_target,
            attachment_point,
            tex_target,
            texture.id,
            attachment.mip_level,
        ),
        AttachCall::Layer { layer } => helper.gl.framebuffer_texture_layer(
            fbo_target,
            attachment_point,
            texture.id,
            attachment.mip_level,
            layer,
        ),
        AttachCall::Whole => helper.gl.framebuffer_texture(
            fbo_target,
            attachment_point,
            texture.id,
            attachment.mip_level,
        ),
    }
    helper.gl.bind_texture(tex_target, 0);
}

pub(super) fn bind_frame_buffer_attachment_render_buffer(
    helper: &GlGraphicsHelper,
    render_buffer: u32,
    attachment: &Attachment,
) {
    if !helper.is_es() {
        log::error!(
            "{} attaches textures only, render buffer attachments are not used",
            helper.variant
        );
        return;
    }

    let point = attachment.point;
    let depth = matches!(point, AttachmentPoint::DepthStencil | AttachmentPoint::Depth);
    let stencil = matches!(point, AttachmentPoint::DepthStencil | AttachmentPoint::Stencil);
    if !depth && !stencil {
        log::error!(
            "Renderbuffers only supported for combined depth-stencil, depth, or stencil, but got attachment point {point:?}"
        );
        return;
    }

    helper.gl.bind_renderbuffer(gl::RENDERBUFFER, render_buffer);
    if depth {
        helper.gl.framebuffer_renderbuffer(
            gl::FRAMEBUFFER,
            gl::DEPTH_ATTACHMENT,
            gl::RENDERBUFFER,
            render_buffer,
        );
    }
    if stencil {
        helper.gl.framebuffer_renderbuffer(
            gl::FRAMEBUFFER,
            gl::STENCIL_ATTACHMENT,
            gl::RENDERBUFFER,
            render_buffer,
        );
    }
    helper.gl.bind_renderbuffer(gl::RENDERBUFFER, 0);
}

/// On ES 3.x packed depth-stencil attachments are backed by a render buffer.
pub(super) fn frame_buffer_needs_render_buffer(
    helper: &GlGraphicsHelper,
    attachment: &Attachment,
) -> bool {
    helper.variant.is_es3_family() && attachment.point == AttachmentPoint::DepthStencil
}

pub(super) fn draw_buffers(helper: &GlGraphicsHelper, color_indices: &[i32]) {
    if !helper.variant.supports(Feature::MRT) {
        helper.warn_once(
            "draw_buffers",
            format_args!("drawBuffers is not supported by {}", helper.variant),
        );
        return;
    }
    let buffers: Vec<u32> = color_indices
        .iter()
        .filter_map(|&index| match u32::try_from(index) {
            Ok(index) => Some(gl::COLOR_ATTACHMENT0 + index),
            Err(_) => {
                log::warn!("drawBuffers: skipping negative color attachment index {index}");
                None
            }
        })
        .collect();
    helper.gl.draw_buffers(&buffers);
}

pub(super) fn read_buffer(helper: &GlGraphicsHelper, mode: u32) {
    if helper.variant == HelperVariant::Es2 {
        helper.warn_once(
            "read_buffer",
            format_args!("glReadBuffer is not supported by {}", helper.variant),
        );
    } else {
        helper.gl.read_buffer(mode);
    }
}

pub(super) fn draw_buffer(helper: &GlGraphicsHelper, mode: u32) {
    if helper.is_es() {
        helper.warn_once(
            "draw_buffer",
            format_args!("glDrawBuffer is not supported by {}", helper.variant),
        );
    } else {
        helper.gl.draw_buffer(mode);
    }
}

pub(super) fn bind_frag_data_location(
    helper: &GlGraphicsHelper,
    program: u32,
    outputs: &[(String, u32)],
) {
    if !helper.variant.supports(Feature::BindableFragmentOutputs) || helper.is_es() {
        log::error!(
            "bindFragDataLocation is not supported by {}",
            helper.variant
        );
        return;
    }
    for (name, color) in outputs {
        helper.gl.bind_frag_data_location(program, *color, name);
    }
}

pub(super) fn blit_framebuffer(
    helper: &GlGraphicsHelper,
    src: [i32; 4],
    dst: [i32; 4],
    mask: u32,
    filter: u32,
) {
    if helper.variant.supports(Feature::BlitFramebuffer) {
        helper.gl.blit_framebuffer(src, dst, mask, filter);
    } else {
        helper.warn_unsupported(
            "blit",
            format_args!("Framebuffer blits are not supported by {}", helper.variant),
        );
    }
}

pub(super) fn get_render_buffer_dimensions(
    helper: &GlGraphicsHelper,
    render_buffer: u32,
) -> (i32, i32) {
    if !helper
        .variant
        .supports(Feature::RenderBufferDimensionRetrieval)
    {
        log::error!(
            "Render buffer dimensions cannot be queried on {}",
            helper.variant
        );
        return (0, 0);
    }
    helper.gl.bind_renderbuffer(gl::RENDERBUFFER, render_buffer);
    let width = helper
        .gl
        .get_renderbuffer_parameter_iv(gl::RENDERBUFFER, gl::RENDERBUFFER_WIDTH);
    let height = helper
        .gl
        .get_renderbuffer_parameter_iv(gl::RENDERBUFFER, gl::RENDERBUFFER_HEIGHT);
    helper.gl.bind_renderbuffer(gl::RENDERBUFFER, 0);
    (width, height)
}

pub(super) fn get_texture_dimensions(
    helper: &GlGraphicsHelper,
    texture: u32,
    target: u32,
    level: i32,
) -> (i32, i32) {
    if !helper.variant.supports(Feature::TextureDimensionRetrieval) {
        log::error!(
            "getTextureDimensions is not supported by {}",
            helper.variant
        );
        return (0, 0);
    }
    helper.gl.bind_texture(target, texture);
    let width = helper
        .gl
        .get_tex_level_parameter_iv(target, level, gl::TEXTURE_WIDTH);
    let height = helper
        .gl
        .get_tex_level_parameter_iv(target, level, gl::TEXTURE_HEIGHT);
    helper.gl.bind_texture(target, 0);
    (width, height)
}
