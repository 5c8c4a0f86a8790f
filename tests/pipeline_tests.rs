mod support;

use nalgebra::Vector3;
use support::{approx_eq, mesh_extents, open_edge_count};
use tpmsgen::domain::{PeriodSpec, compose_box};
use tpmsgen::float_types::Real;
use tpmsgen::sdf::Step;
use tpmsgen::tpms::ImplicitField;
use tpmsgen::{
    LatticeParameters, MeshingOptions, SurfaceFamily, ThresholdSpec, TpmsError, generate_field,
    generate_mesh,
};

#[test]
fn gyroid_specimen_spans_two_periods() {
    let params =
        LatticeParameters::isotropic(SurfaceFamily::Gyroid, 10.0, ThresholdSpec::Porosity(0.5));
    let options = MeshingOptions::default()
        .with_periods(PeriodSpec::Uniform(2))
        .with_step(Step::Uniform(1.0));
    let mesh = generate_mesh(&params, &options).unwrap();
    assert!(!mesh.is_empty());
    let extents = mesh_extents(&mesh);
    for i in 0..3 {
        assert!(approx_eq(extents[i], 20.0, 1.5), "extents {extents:?}");
    }
}

#[test]
fn gyroid_specimen_is_closed_at_every_box_face() {
    let params =
        LatticeParameters::isotropic(SurfaceFamily::Gyroid, 10.0, ThresholdSpec::Porosity(0.5));
    let options = MeshingOptions::default()
        .with_periods(PeriodSpec::Uniform(2))
        .with_step(Step::Uniform(1.0));
    let mesh = generate_mesh(&params, &options).unwrap();
    assert_eq!(open_edge_count(&mesh), 0);

    let bb = mesh.bounding_box().unwrap();
    for i in 0..3 {
        assert!(approx_eq(bb.mins[i], -10.0, 0.5), "{bb:?}");
        assert!(approx_eq(bb.maxs[i], 10.0, 0.5), "{bb:?}");
    }
}

#[test]
fn padded_box_bounds_match_the_default() {
    let params =
        LatticeParameters::isotropic(SurfaceFamily::Diamond, 6.0, ThresholdSpec::Porosity(0.4));
    let options = MeshingOptions::default()
        .with_periods(PeriodSpec::Uniform(2))
        .with_step(Step::Uniform(0.5));
    let specimen = generate_field(&params, &options).unwrap();
    let padded = specimen.bounds().expanded(&Vector3::repeat(0.75));

    let default = generate_mesh(&params, &options).unwrap();
    let explicit = generate_mesh(&params, &options.with_bounds(padded)).unwrap();
    assert_eq!(default.len(), explicit.len());
    assert_eq!(open_edge_count(&explicit), 0);
}

#[test]
fn diamond_specimen_follows_per_axis_periods() {
    let params = LatticeParameters::new(
        SurfaceFamily::Diamond,
        Vector3::new(4.0, 4.0, 6.0),
        ThresholdSpec::Porosity(0.4),
    )
    .with_rotation(0.0, 0.0, 45.0);
    let options = MeshingOptions::default()
        .with_periods(PeriodSpec::PerAxis(2, 3, 1))
        .with_step(Step::Uniform(0.4));
    let mesh = generate_mesh(&params, &options).unwrap();
    let extents = mesh_extents(&mesh);
    let expected = Vector3::new(8.0, 12.0, 6.0);
    for i in 0..3 {
        assert!(approx_eq(extents[i], expected[i], 0.6), "extents {extents:?}");
    }
}

#[test]
fn box_extents_follow_period_counts() {
    let params =
        LatticeParameters::isotropic(SurfaceFamily::Gyroid, 1.0, ThresholdSpec::Isovalue(0.0));
    let l = Vector3::new(2.0, 3.0, 5.0);
    let field = params.build_field().unwrap();
    let specimen = compose_box(field, &l, PeriodSpec::PerAxis(2, 3, 4)).unwrap();
    assert_eq!(*specimen.extents(), Vector3::new(4.0, 9.0, 20.0));
}

#[test]
fn clipped_field_is_outside_beyond_the_box() {
    let params =
        LatticeParameters::isotropic(SurfaceFamily::Gyroid, 10.0, ThresholdSpec::Porosity(0.0));
    let specimen = generate_field(&params, &MeshingOptions::default()).unwrap();
    // porosity 0 is solid everywhere inside the 4-period box
    assert!(specimen.value(&nalgebra::Point3::new(0.0, 3.0, -7.0)) < 0.0);
    assert!(specimen.value(&nalgebra::Point3::new(21.0, 0.0, 0.0)) > 0.0);
}

#[test]
fn out_of_range_porosity_is_rejected() {
    let params =
        LatticeParameters::isotropic(SurfaceFamily::Gyroid, 10.0, ThresholdSpec::Porosity(1.2));
    let err = generate_mesh(&params, &MeshingOptions::default()).unwrap_err();
    assert!(matches!(err, TpmsError::InvalidParameter { name: "porosity", .. }));
}

#[test]
fn oversized_sheet_is_a_calibration_error() {
    let l = 10.0;
    let params = LatticeParameters::isotropic(
        SurfaceFamily::SheetGyroid,
        l,
        ThresholdSpec::Thickness(0.9 * l),
    );
    let err = generate_mesh(&params, &MeshingOptions::default()).unwrap_err();
    match err {
        TpmsError::CalibrationRange { fraction, .. } => assert!(approx_eq(fraction, 0.9, 1e-9)),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn sheet_volume_grows_with_thickness() {
    let volume = |thickness: Real| {
        let params = LatticeParameters::isotropic(
            SurfaceFamily::SheetGyroid,
            10.0,
            ThresholdSpec::Thickness(thickness),
        );
        let options = MeshingOptions::default()
            .with_periods(PeriodSpec::Uniform(1))
            .with_step(Step::Uniform(0.5));
        let mesh = generate_mesh(&params, &options).unwrap();
        assert!(!mesh.is_empty());
        mesh.signed_volume().abs()
    };
    let thin = volume(1.5);
    let thick = volume(3.0);
    assert!(thick > thin, "thin {thin}, thick {thick}");
}

#[test]
fn conflicting_period_tuple_is_rejected() {
    let err = PeriodSpec::try_from([2u32, 2].as_slice()).unwrap_err();
    assert!(err.is_invalid_parameter());
}
