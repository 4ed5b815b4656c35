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

//! Program reflection against scripted driver answers.

use std::rc::Rc;

use aster_core::renderer::api::{
    gl, ContextVersion, ProbeSettings, ShaderAttribute, ShaderStorageBlock, ShaderUniformBlock,
    UniformType,
};
use aster_core::{GraphicsHelper, HelperVariant};
use aster_infra::graphics::gl::recording::{capture_logs, RecordingFunctions, ScriptedUniform};
use aster_infra::graphics::gl::{GlFunctions, GlGraphicsHelper};

const PROGRAM: u32 = 9;

fn scripted_program(version: ContextVersion) -> RecordingFunctions {
    RecordingFunctions::new(version)
        .with_uniform(ScriptedUniform::new("mvp", gl::FLOAT_MAT4, 1, 0))
        .with_uniform(ScriptedUniform::new("lights", gl::FLOAT_VEC4, 4, 2))
        .with_uniform(ScriptedUniform::in_block(
            "Camera.view",
            gl::FLOAT_MAT4,
            1,
            0,
            0,
            0,
            16,
        ))
        .with_uniform(ScriptedUniform::in_block(
            "Camera.weights",
            gl::FLOAT,
            3,
            0,
            64,
            16,
            0,
        ))
        .with_uniform_block(ShaderUniformBlock {
            name: "Camera".into(),
            index: 0,
            binding: 1,
            active_uniforms_count: 2,
            size: 112,
        })
        .with_storage_block(ShaderStorageBlock {
            name: "Particles".into(),
            index: 0,
            binding: 3,
            active_variables_count: 1,
            size: 0,
        })
        .with_attribute(ShaderAttribute {
            name: "position".into(),
            gl_type: gl::FLOAT_VEC3,
            size: 1,
            location: 0,
        })
        .with_attribute(ShaderAttribute {
            name: "uv".into(),
            gl_type: gl::FLOAT_VEC2,
            size: 1,
            location: 1,
        })
}

fn helper(
    variant: HelperVariant,
    version: ContextVersion,
    settings: ProbeSettings,
) -> GlGraphicsHelper {
    let gl: Rc<dyn GlFunctions> = Rc::new(scripted_program(version));
    GlGraphicsHelper::initialize_helper(variant, gl, settings).expect("helper initializes")
}

#[test]
fn test_desktop_uniforms_get_array_suffix_and_block_layout() {
    let mut helper = helper(
        HelperVariant::Gl3_3,
        ContextVersion::desktop(3, 3),
        ProbeSettings::default(),
    );

    let uniforms = helper.program_uniforms_and_locations(PROGRAM);
    let names: Vec<&str> = uniforms.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["mvp", "lights[0]", "Camera.view", "Camera.weights[0]"]);

    let lights = &uniforms[1];
    assert_eq!(lights.location, 2);
    assert_eq!(lights.size, 4);
    assert_eq!(lights.block_index, -1);
    assert_eq!(lights.raw_byte_size, 16);

    let view = &uniforms[2];
    assert!(view.is_block_member());
    assert_eq!(view.location, -1);
    assert_eq!(view.matrix_stride, 16);
    assert_eq!(view.raw_byte_size, 64);

    let weights = &uniforms[3];
    assert_eq!(weights.offset, 64);
    assert_eq!(weights.array_stride, 16);
    // The array stride multiplies the element size as reported.
    assert_eq!(weights.raw_byte_size, 4 * 16);
}

#[test]
fn test_es3_names_are_left_untouched() {
    let mut helper = helper(HelperVariant::Es3, ContextVersion::es(3, 0), ProbeSettings::default());

    let uniforms = helper.program_uniforms_and_locations(PROGRAM);

    assert_eq!(uniforms[1].name, "lights");
    assert_eq!(uniforms[1].location, 2);
}

#[test]
fn test_array_workaround_can_be_disabled() {
    let settings = ProbeSettings {
        array_name_workaround: false,
        ..ProbeSettings::default()
    };
    let mut helper = helper(HelperVariant::Gl4, ContextVersion::desktop(4, 6), settings);

    let uniforms = helper.program_uniforms_and_locations(PROGRAM);

    assert_eq!(uniforms[1].name, "lights");
}

#[test]
fn test_uniform_blocks_are_reflected_with_ubo_support() {
    let mut helper = helper(
        HelperVariant::Gl3_2,
        ContextVersion::desktop(3, 2),
        ProbeSettings::default(),
    );

    let blocks = helper.program_uniform_blocks(PROGRAM);

    assert_eq!(
        blocks,
        vec![ShaderUniformBlock {
            name: "Camera".into(),
            index: 0,
            binding: 1,
            active_uniforms_count: 2,
            size: 112,
        }]
    );
}

#[test]
fn test_es2_has_no_blocks_and_no_block_layout() {
    let logs = capture_logs();
    let mut helper = helper(HelperVariant::Es2, ContextVersion::es(2, 0), ProbeSettings::default());

    assert!(helper.program_uniform_blocks(PROGRAM).is_empty());
    assert!(helper.program_shader_storage_blocks(PROGRAM).is_empty());
    let uniforms = helper.program_uniforms_and_locations(PROGRAM);

    assert!(uniforms.iter().all(|u| u.block_index == -1 && u.offset == -1));
    let warnings = logs.warnings();
    assert!(warnings.iter().any(|w| w.contains("UBO are not supported")));
    assert!(warnings.iter().any(|w| w.contains("SSBO are not supported")));
}

#[test]
fn test_storage_blocks_need_gl4_or_es3_1() {
    let mut gl4 = helper(
        HelperVariant::Gl4,
        ContextVersion::desktop(4, 6),
        ProbeSettings::default(),
    );
    assert_eq!(
        gl4.program_shader_storage_blocks(PROGRAM),
        vec![ShaderStorageBlock {
            name: "Particles".into(),
            index: 0,
            binding: 3,
            active_variables_count: 1,
            size: 0,
        }]
    );

    let mut es3_1 = helper(
        HelperVariant::Es3_1,
        ContextVersion::es(3, 1),
        ProbeSettings::default(),
    );
    assert_eq!(es3_1.program_shader_storage_blocks(PROGRAM).len(), 1);

    let mut es3 = helper(HelperVariant::Es3, ContextVersion::es(3, 0), ProbeSettings::default());
    assert!(es3.program_shader_storage_blocks(PROGRAM).is_empty());
}

#[test]
fn test_attributes_keep_driver_order_and_locations() {
    let mut helper = helper(HelperVariant::Es2, ContextVersion::es(2, 0), ProbeSettings::default());

    let attributes = helper.program_attributes_and_locations(PROGRAM);

    let summary: Vec<(&str, i32)> = attributes
        .iter()
        .map(|a| (a.name.as_str(), a.location))
        .collect();
    assert_eq!(summary, [("position", 0), ("uv", 1)]);
}

#[test]
fn test_reflect_program_groups_block_members() {
    let mut helper = helper(
        HelperVariant::Gl3_3,
        ContextVersion::desktop(3, 3),
        ProbeSettings::default(),
    );

    let reflection = helper.reflect_program(PROGRAM);

    assert_eq!(reflection.uniforms.len(), 4);
    assert_eq!(reflection.attributes.len(), 2);
    assert_eq!(reflection.block_members(0).count(), 2);
    assert!(reflection.uniform("lights[0]").is_some());
    assert!(reflection.storage_blocks.is_empty());
}

#[test]
fn test_unknown_types_resolve_to_unknown_with_a_warning() {
    let logs = capture_logs();
    let helper = helper(HelperVariant::Es2, ContextVersion::es(2, 0), ProbeSettings::default());

    assert_eq!(helper.uniform_type_from_gl_type(gl::SAMPLER_2D), UniformType::Sampler);
    assert_eq!(helper.uniform_type_from_gl_type(gl::SAMPLER_3D), UniformType::Unknown);
    assert!(logs
        .warnings()
        .iter()
        .any(|w| w.contains("does not know the uniform type")));
}
