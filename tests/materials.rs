use fragmat::{
    AccessMethod, AccessibilityReport, MaterialReport, MaterialSource, Model, ReportFormat,
    SchemaLayout, analyze, resolve, write_report_file,
};
use fragmat::info::{SENTINEL_MAGENTA, SENTINEL_PURPLE};
use fragmat_dev::{FragmentBuilder, MaterialSpec};
use fragmat_parser::{FragBuf, LoadOptions};
use std::io::Write;

fn model(builder: FragmentBuilder) -> Model {
    Model::from_vec(builder.build()).unwrap()
}

#[test]
fn healthy_model_resolves_every_material() {
    let model = model(
        FragmentBuilder::new()
            .material(MaterialSpec::rgba(255, 0, 0, 255))
            .material(MaterialSpec::rgba(0, 128, 255, 200).with_faces(1)),
    );
    let first = resolve(&model, 0);
    assert!(first.is_valid);
    assert_eq!(first.hex_color(), "#FF0000");

    let second = resolve(&model, 1);
    assert_eq!(second.rgba(), [0, 128, 255, 200]);
    assert_eq!(second.rendered_faces, "TWO");
    assert_eq!(second.stroke, "DEFAULT");
    assert_eq!(second.access_method, AccessMethod::Standard);
}

#[test]
fn corrupt_records_report_faults() {
    let model = model(
        FragmentBuilder::new()
            .material(MaterialSpec::rgba(1, 2, 3, 4))
            .dangling()
            .broken_vtable()
            .material(MaterialSpec::rgba(9, 9, 9, 9).with_faces(7)),
    );

    let dangling = resolve(&model, 1);
    assert!(!dangling.is_valid);
    assert_eq!(dangling.exception_type, "InvalidOffset");
    assert!(matches!(dangling.access_method, AccessMethod::StandardFailed(_)));
    assert_eq!(dangling.rgba(), SENTINEL_MAGENTA);

    assert_eq!(resolve(&model, 2).exception_type, "InvalidVTable");

    let bad_tag = resolve(&model, 3);
    assert_eq!(bad_tag.exception_type, "InvalidEnum");
    assert!(bad_tag.error_details.contains("material index 3"));
}

#[test]
fn empty_slot_uses_reference_comparison() {
    let model = model(
        FragmentBuilder::new()
            .absent()
            .dangling()
            .material(MaterialSpec::rgba(10, 20, 30, 40)),
    );
    let info = resolve(&model, 0);
    assert_eq!(info.access_method, AccessMethod::ReferenceComparison(2));
    assert_eq!(info.rgba(), SENTINEL_PURPLE);
    let reference = info.reference.unwrap();
    assert_eq!([reference.r, reference.g, reference.b, reference.a], [10, 20, 30, 40]);
}

#[test]
fn empty_slots_without_siblings_fall_back_to_default() {
    let model = model(FragmentBuilder::new().absent().absent());
    let info = resolve(&model, 1);
    assert_eq!(info.access_method, AccessMethod::Default);
    assert_eq!(info.error_details, "All access strategies failed");
}

#[test]
fn out_of_range_and_missing_meshes() {
    let model = model(FragmentBuilder::new().material(MaterialSpec::rgba(0, 0, 0, 0)));
    assert_eq!(resolve(&model, 1).error_details, "Material index out of range");

    let bare = model_without_meshes();
    assert!(!bare.has_materials());
    assert_eq!(resolve(&bare, 0).error_details, "Material index out of range");
    assert_eq!(analyze(&bare), "No Meshes found in model");
}

fn model_without_meshes() -> Model {
    model(FragmentBuilder::new().without_meshes())
}

#[test]
fn alternating_corruption_is_detected() {
    let mut builder = FragmentBuilder::new();
    for i in 0..12u8 {
        builder = if i % 2 == 0 {
            builder.material(MaterialSpec::rgba(i, i, i, 255))
        } else {
            builder.dangling()
        };
    }
    let model = model(builder);
    let report = AccessibilityReport::analyze(&model);
    assert_eq!((report.accessible, report.inaccessible), (6, 6));

    let text = report.to_string();
    assert!(text.contains("Every 2th material accessible (6 matches)"));
    assert!(text.contains("Complex accessibility pattern with 12 blocks"));
    assert!(text.contains("Material Class Structure:"));
    assert!(text.contains("Materials Field: id 6"));
}

#[test]
fn custom_field_ids_locate_materials() {
    let data = FragmentBuilder::new()
        .with_field_ids(2, 1)
        .material(MaterialSpec::rgba(7, 7, 7, 7))
        .build();

    let default_layout = Model::from_vec(data.clone()).unwrap();
    assert!(!default_layout.has_materials());

    let layout = SchemaLayout {
        model_meshes_field: 2,
        meshes_materials_field: 1,
    };
    let model = Model::from_buf(FragBuf::from_vec(data), layout).unwrap();
    assert_eq!(model.material_count(), 1);
    assert!(resolve(&model, 0).is_valid);
}

#[test]
fn report_file_round_trip_through_disk() {
    let data = FragmentBuilder::new()
        .material(MaterialSpec::rgba(1, 1, 1, 1))
        .absent()
        .broken_vtable()
        .build();
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input.write_all(&data).unwrap();
    input.flush().unwrap();

    let model = Model::open(input.path(), &LoadOptions::default()).unwrap();
    let report = MaterialReport::collect(&model, Some(&Default::default()));
    assert_eq!((report.total, report.valid, report.invalid), (3, 1, 2));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("materials.json");
    write_report_file(&out, &report, ReportFormat::Json).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["materials"][1]["access_method"], "Reference comparison (index 0)");
    assert_eq!(json["materials"][2]["exception_type"], "InvalidVTable");
    assert_eq!(json["analysis"]["runs"].as_array().unwrap().len(), 2);
}
