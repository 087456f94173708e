//! Integration tests for assembling scripts from pipelines
//!
//! These tests exercise the full path: catalog → pipeline → builder.

mod common;

use common::builders::{JobValuesBuilder, PipelineBuilder};
use common::{bare_builder, fragments, offset_of};
use scriptbuilder_rs::{ComponentKind, ConfigValue, PipelineError, ScriptBuilder, Values};

#[test]
fn test_standard_job_script() {
    let pipeline = PipelineBuilder::new().standard_job().build();
    let script = ScriptBuilder::default().build(&pipeline).unwrap();

    assert!(script.text.starts_with("#!/usr/bin/env python\n"));
    assert!(script.report.is_complete());
    assert_eq!(script.report.emitted.len(), 3);

    let helpers = offset_of(&script.text, "def awsUpload(");
    let params = offset_of(&script.text, "VEGLParams = VEGLParameters()");
    let mesh = offset_of(&script.text, "VEGLPaddedBox = VEGLParams.getPaddedBounds()");
    assert!(helpers < params && params < mesh);
}

#[test]
fn test_build_is_deterministic() {
    let pipeline = PipelineBuilder::new().standard_job().build();
    let builder = ScriptBuilder::default();
    let first = builder.build(&pipeline).unwrap();
    let second = builder.build(&pipeline).unwrap();
    assert_eq!(first.text, second.text);
}

#[test]
fn test_reorder_moves_fragments() {
    let mut pipeline = PipelineBuilder::new()
        .node(ComponentKind::AwsUtils)
        .node(ComponentKind::MeshStep)
        .build();
    let parts = fragments(&pipeline);

    pipeline.reorder(&["VEGLStep60", "AWSUtils0"]).unwrap();
    let script = bare_builder().build(&pipeline).unwrap();
    assert_eq!(script.text, format!("{}{}", parts[1], parts[0]));
}

#[test]
fn test_remove_then_rebuild() {
    let mut pipeline = PipelineBuilder::new()
        .standard_job()
        .node(ComponentKind::AwsUtils)
        .build();
    let before = fragments(&pipeline);

    pipeline.remove_node("VEGLParams0").unwrap();
    let script = bare_builder().build(&pipeline).unwrap();

    let expected: String = [&before[0], &before[2], &before[3]]
        .iter()
        .map(|s| s.as_str())
        .collect();
    assert_eq!(script.text, expected);
    assert!(!script.text.contains("class VEGLParameters"));
}

#[test]
fn test_utility_fragment_ignores_values() {
    let catalog = scriptbuilder_rs::ComponentCatalog::builtin();
    let mut pipeline = scriptbuilder_rs::Pipeline::new();
    pipeline
        .add_node(&catalog, ComponentKind::AwsUtils, Values::new())
        .unwrap();

    // The utility kind declares no fields, so any value is rejected up front.
    assert!(pipeline.configure("AWSUtils0", "bucket", "s3://x").is_err());

    let a = bare_builder().build(&pipeline).unwrap();
    let b = bare_builder().build(&pipeline).unwrap();
    assert_eq!(a.text, b.text);
}

#[test]
fn test_mesh_counts_for_reference_region() {
    // 0..100 easting with 25m cells gives 4 cells along x.
    let values = JobValuesBuilder::new().easting(0.0, 100.0).cell_x(25).build();
    let pipeline = PipelineBuilder::new()
        .node_with(ComponentKind::JobParameters, values)
        .node(ComponentKind::MeshStep)
        .build();

    let script = bare_builder().build(&pipeline).unwrap();
    assert!(script.text.contains("# Expected mesh: 4 x 2 x 8 cells\n"));
    assert!(script.text.contains("return VEGLBBox(0.0, 100.0, 0.0, 50.0)\n"));
    assert!(script
        .text
        .contains("num_x_cells = int((maxEasting - minEasting) // cell_x)\n"));
}

#[test]
fn test_configured_instance_flows_into_step() {
    let mut pipeline = PipelineBuilder::new()
        .node_with(
            ComponentKind::JobParameters,
            JobValuesBuilder::new().instance("jobParams").build(),
        )
        .node(ComponentKind::MeshStep)
        .build();
    pipeline
        .configure("VEGLStep60", "paramsInstance", "jobParams")
        .unwrap();

    let script = bare_builder().build(&pipeline).unwrap();
    assert!(script.text.contains("\njobParams = VEGLParameters()\n"));
    assert!(script.text.contains("cell_x = jobParams.getCellX()\n"));
}

#[test]
fn test_failed_node_aborts_build() {
    let mut pipeline = PipelineBuilder::new()
        .node(ComponentKind::AwsUtils)
        .node(ComponentKind::JobParameters)
        .build();
    pipeline
        .configure("VEGLParams0", "mgaZone", ConfigValue::from("55"))
        .unwrap();

    let err = ScriptBuilder::default().build(&pipeline).unwrap_err();
    assert!(matches!(err, PipelineError::Build { .. }));
    assert_eq!(err.node(), Some("VEGLParams0"));
    assert!(err.to_string().contains("VEGLParams0"));
}

#[test]
fn test_empty_pipeline_builds() {
    let pipeline = PipelineBuilder::new().build();
    assert_eq!(bare_builder().build(&pipeline).unwrap().text, "");
    let banner = ScriptBuilder::default().build(&pipeline).unwrap();
    assert!(banner.text.starts_with("#!/usr/bin/env python\n"));
    assert!(!banner.text.contains("import"));
}
