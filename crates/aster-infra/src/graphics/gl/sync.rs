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

//! Fences, buffer mapping and indexed buffer bindings.

use std::ptr::NonNull;

use aster_core::renderer::api::{gl, Feature, SyncHandle};
use aster_core::HelperVariant;

use super::helper::GlGraphicsHelper;

fn fences_available(helper: &GlGraphicsHelper) -> bool {
    if helper.variant.supports(Feature::Fences) {
        return true;
    }
    let since = if helper.is_es() {
        "OpenGL ES 3.0"
    } else {
        "OpenGL 3.2"
    };
    helper.warn_unsupported(
        "fences",
        format_args!("Fences are not supported by {} (since {since})", helper.variant),
    );
    false
}

pub(super) fn fence_sync(helper: &GlGraphicsHelper) -> Option<SyncHandle> {
    if !fences_available(helper) {
        return None;
    }
    let raw = helper.gl.fence_sync(gl::SYNC_GPU_COMMANDS_COMPLETE, 0);
    let handle = SyncHandle::from_raw(raw);
    if handle.is_none() {
        log::error!("glFenceSync failed to create a fence");
    }
    handle
}

pub(super) fn client_wait_sync(helper: &GlGraphicsHelper, sync: SyncHandle, timeout_ns: u64) {
    if fences_available(helper) {
        helper
            .gl
            .client_wait_sync(sync.raw(), gl::SYNC_FLUSH_COMMANDS_BIT, timeout_ns);
    }
}

pub(super) fn wait_sync(helper: &GlGraphicsHelper, sync: SyncHandle) {
    if fences_available(helper) {
        helper.gl.wait_sync(sync.raw(), 0, gl::TIMEOUT_IGNORED);
    }
}

pub(super) fn was_sync_signaled(helper: &GlGraphicsHelper, sync: SyncHandle) -> bool {
    fences_available(helper) && helper.gl.get_sync_iv(sync.raw(), gl::SYNC_STATUS) == gl::SIGNALED
}

pub(super) fn delete_sync(helper: &GlGraphicsHelper, sync: SyncHandle) {
    if fences_available(helper) {
        helper.gl.delete_sync(sync.raw());
    }
}

pub(super) fn map_buffer(
    helper: &GlGraphicsHelper,
    target: u32,
    size: usize,
) -> Option<NonNull<u8>> {
    let ptr = match helper.variant {
        HelperVariant::Es2 => {
            helper.warn_unsupported(
                "map_buffer",
                format_args!("Map buffer is not a core requirement for {}", helper.variant),
            );
            return None;
        }
        HelperVariant::Gl2 => helper.gl.map_buffer(target, gl::READ_WRITE),
        _ => helper
            .gl
            .map_buffer_range(target, 0, size, gl::MAP_READ_BIT | gl::MAP_WRITE_BIT),
    };
    NonNull::new(ptr)
}

pub(super) fn unmap_buffer(helper: &GlGraphicsHelper, target: u32) -> bool {
    if helper.variant == HelperVariant::Es2 {
        helper.warn_unsupported(
            "map_buffer",
            format_args!("Map buffer is not a core requirement for {}", helper.variant),
        );
        return false;
    }
    helper.gl.unmap_buffer(target)
}

pub(super) fn bind_buffer_base(helper: &GlGraphicsHelper, target: u32, index: u32, buffer: u32) {
    if helper.variant.supports(Feature::UniformBufferObject) {
        helper.gl.bind_buffer_base(target, index, buffer);
    } else {
        helper.warn_unsupported(
            "bind_buffer_base",
            format_args!("bindBufferBase is not supported by {}", helper.variant),
        );
    }
}

pub(super) fn bind_uniform_block(
    helper: &GlGraphicsHelper,
    program: u32,
    block_index: u32,
    binding: u32,
) {
    if helper.variant.supports(Feature::UniformBufferObject) {
        helper.gl.uniform_block_binding(program, block_index, binding);
    } else {
        helper.warn_unsupported(
            "ubo",
            format_args!("UBO are not supported by {}", helper.variant),
        );
    }
}

/// ES 3.1 and 3.2 have storage blocks but fix their binding in the shader.
pub(super) fn bind_shader_storage_block(
    helper: &GlGraphicsHelper,
    program: u32,
    block_index: u32,
    binding: u32,
) {
    if helper.variant == HelperVariant::Gl4 {
        helper
            .gl
            .shader_storage_block_binding(program, block_index, binding);
    } else if helper.variant.supports(Feature::ShaderStorageObject) {
        helper.warn_unsupported(
            "ssbo_binding",
            format_args!(
                "{} cannot rebind shader storage blocks, declare the binding in the shader",
                helper.variant
            ),
        );
    } else {
        helper.warn_unsupported(
            "ssbo",
            format_args!("SSBO are not supported by {}", helper.variant),
        );
    }
}
