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

//! Default-block uniform uploads.

use aster_core::renderer::api::{classify, GlTypeClass, ScalarKind};
use aster_core::HelperVariant;

use super::helper::GlGraphicsHelper;

pub(super) fn upload_floats(
    helper: &GlGraphicsHelper,
    components: u32,
    location: i32,
    count: i32,
    values: &[f32],
) {
    helper.gl.uniform_f32v(components, location, count, values);
}

pub(super) fn upload_ints(
    helper: &GlGraphicsHelper,
    components: u32,
    location: i32,
    count: i32,
    values: &[i32],
) {
    helper.gl.uniform_i32v(components, location, count, values);
}

pub(super) fn upload_uints(
    helper: &GlGraphicsHelper,
    components: u32,
    location: i32,
    count: i32,
    values: &[u32],
) {
    if !uints_available(helper) {
        helper.warn_unsupported(
            "uniform_uiv",
            format_args!(
                "glUniform{components}uiv is not supported by {}",
                helper.variant
            ),
        );
        return;
    }
    helper.gl.uniform_u32v(components, location, count, values);
}

/// Matrices are uploaded column-major, never transposed.
pub(super) fn upload_matrix(
    helper: &GlGraphicsHelper,
    columns: u32,
    rows: u32,
    location: i32,
    count: i32,
    values: &[f32],
) {
    if columns != rows && !non_square_matrices_available(helper) {
        helper.warn_unsupported(
            "uniform_matrix_non_square",
            format_args!(
                "glUniformMatrix{columns}x{rows}fv is not supported by {}",
                helper.variant
            ),
        );
        return;
    }
    helper
        .gl
        .uniform_matrix_f32v(columns, rows, location, count, false, values);
}

fn uints_available(helper: &GlGraphicsHelper) -> bool {
    !helper.is_legacy()
}

fn non_square_matrices_available(helper: &GlGraphicsHelper) -> bool {
    match helper.variant {
        HelperVariant::Es2 => false,
        HelperVariant::Gl2 => helper.non_square_matrices,
        _ => true,
    }
}

/// Whether a default-block uniform of `gl_type` has an upload entry point.
pub(super) fn shape_supported(helper: &GlGraphicsHelper, gl_type: u32) -> bool {
    match classify(gl_type) {
        GlTypeClass::Vector {
            kind: ScalarKind::UInt,
            ..
        } => uints_available(helper),
        GlTypeClass::Matrix { columns, rows } if columns != rows => {
            non_square_matrices_available(helper)
        }
        GlTypeClass::Unknown => false,
        _ => true,
    }
}
