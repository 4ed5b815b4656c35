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

//! Variant selection and helper initialization through the capability probe.

use std::io::Write;
use std::rc::Rc;

use anyhow::Result;
use aster_core::renderer::api::{ContextVersion, ProbeSettings};
use aster_core::{CapabilityProbe, GraphicsHelper, HelperError, HelperVariant};
use aster_infra::graphics::gl::recording::RecordingFunctions;
use aster_infra::graphics::gl::{
    create_helper_for_context, EntryPoint, GlCapabilityProbe, GlFunctions, GlGraphicsHelper,
};
use tempfile::NamedTempFile;

fn context(version: ContextVersion) -> Rc<dyn GlFunctions> {
    Rc::new(RecordingFunctions::new(version))
}

fn forcing(variant: HelperVariant) -> GlCapabilityProbe {
    GlCapabilityProbe::new(ProbeSettings {
        forced_variant: Some(variant),
        ..ProbeSettings::default()
    })
}

#[test]
fn test_probe_binds_the_best_variant() -> Result<()> {
    let probe = GlCapabilityProbe::default();

    let es = probe.create_helper(context(ContextVersion::es(3, 1)))?;
    assert_eq!(es.variant(), HelperVariant::Es3_1);

    let desktop = probe.create_helper(context(ContextVersion::desktop(4, 6)))?;
    assert_eq!(desktop.variant(), HelperVariant::Gl4);

    let legacy = probe.create_helper(context(ContextVersion::desktop(2, 1)))?;
    assert_eq!(legacy.variant(), HelperVariant::Gl2);
    Ok(())
}

#[test]
fn test_forced_variant_may_step_down_within_a_family() -> Result<()> {
    let helper = forcing(HelperVariant::Es3).create_helper(context(ContextVersion::es(3, 2)))?;
    assert_eq!(helper.variant(), HelperVariant::Es3);
    Ok(())
}

#[test]
fn test_forced_variant_cannot_step_up() {
    let err = forcing(HelperVariant::Gl4)
        .select_variant(&context(ContextVersion::desktop(3, 3)))
        .unwrap_err();
    assert!(matches!(
        err,
        HelperError::VariantMismatch {
            requested: HelperVariant::Gl4,
            ..
        }
    ));
}

#[test]
fn test_forced_variant_cannot_cross_families() {
    let err = forcing(HelperVariant::Es2)
        .select_variant(&context(ContextVersion::desktop(4, 5)))
        .unwrap_err();
    match err {
        HelperError::VariantMismatch { requested, context } => {
            assert_eq!(requested, HelperVariant::Es2);
            assert_eq!(context, ContextVersion::desktop(4, 5));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ancient_contexts_are_unsupported() {
    let err = GlCapabilityProbe::default()
        .create_helper(context(ContextVersion::desktop(1, 5)))
        .unwrap_err();
    assert!(matches!(err, HelperError::UnsupportedContext(_)));
}

#[test]
fn test_missing_entry_points_are_all_reported() {
    let gl: Rc<dyn GlFunctions> = Rc::new(
        RecordingFunctions::new(ContextVersion::desktop(4, 5))
            .without_entry_point(EntryPoint::DispatchCompute)
            .without_entry_point(EntryPoint::BindImageTexture),
    );

    let err = GlCapabilityProbe::default().create_helper(gl).unwrap_err();

    match err {
        HelperError::MissingEntryPoints { variant, missing } => {
            assert_eq!(variant, HelperVariant::Gl4);
            assert_eq!(missing.len(), 2);
            assert!(missing.contains(&EntryPoint::DispatchCompute.name().to_string()));
            assert!(missing.contains(&EntryPoint::BindImageTexture.name().to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_optional_entry_points_do_not_block_initialization() -> Result<()> {
    // GL 2 only needs the 2.1 matrix uploads when they are used.
    let gl: Rc<dyn GlFunctions> = Rc::new(
        RecordingFunctions::new(ContextVersion::desktop(2, 0))
            .without_entry_point(EntryPoint::NonSquareMatrices),
    );
    let helper = GlCapabilityProbe::default().create_helper(gl)?;
    assert_eq!(helper.variant(), HelperVariant::Gl2);
    Ok(())
}

#[test]
fn test_rhi_variant_has_no_gl_implementation() {
    let err = GlGraphicsHelper::initialize_helper(
        HelperVariant::Rhi,
        context(ContextVersion::desktop(4, 6)),
        ProbeSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        HelperError::UnavailableVariant(HelperVariant::Rhi)
    ));
}

#[test]
fn test_settings_file_drives_the_probe() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{ "forced_variant": "Gl3_2", "max_name_length": 64 }}"#)?;

    let helper = create_helper_for_context(
        context(ContextVersion::desktop(4, 6)),
        Some(file.path()),
    )?;

    assert_eq!(helper.variant(), HelperVariant::Gl3_2);
    assert_eq!(helper.settings().max_name_length, 64);
    assert!(helper.settings().warn_once);
    Ok(())
}

#[test]
fn test_malformed_settings_file_reports_the_step() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{{ forced_variant")?;

    let err = create_helper_for_context(context(ContextVersion::es(3, 0)), Some(file.path()))
        .unwrap_err();

    assert!(format!("{err:#}").contains("loading probe settings"));
    Ok(())
}
