//! Turns command-line and batch inputs into meshes on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use nalgebra::Vector3;
use tpmsgen::float_types::Real;
use tpmsgen::io::StlFormat;
use tpmsgen::{
    LatticeParameters, MeshingOptions, PeriodSpec, Step, SurfaceFamily, ThresholdSpec, TpmsError,
    generate_mesh,
};

use crate::cli::config::{JobConfig, Periods, SampleConfig, SampleDefaults};

/// Default grid spacing when neither the row nor the defaults give one.
const DEFAULT_STEP: Real = 0.2;
/// Samples across a sheet wall when the step is derived from its thickness.
const SAMPLES_PER_WALL: Real = 6.0;

/// A fully resolved specimen, ready to mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    pub params: LatticeParameters,
    pub options: MeshingOptions,
}

/// Rotation angles accepted on the command surface.
pub fn check_angles(angles: &[Real; 3]) -> Result<(), TpmsError> {
    for (axis, &a) in ["x", "y", "z"].iter().zip(angles) {
        if !(0.0..=90.0).contains(&a) {
            return Err(TpmsError::invalid(
                "rotation",
                format!("theta_{axis} must be between 0 and 90, got {a}"),
            ));
        }
    }
    Ok(())
}

/// Mesh `specimen` and write it to `path`. Returns the triangle count.
pub fn write_specimen(specimen: &Specimen, path: &Path, format: StlFormat) -> Result<usize> {
    let mesh = generate_mesh(&specimen.params, &specimen.options)
        .with_context(|| format!("generating {}", path.display()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    mesh.write_stl(path, format)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(mesh.len())
}

/// Resolve one batch row against the job defaults.
pub fn resolve_sample(sample: &SampleConfig, defaults: &SampleDefaults) -> Result<Specimen> {
    let family: SurfaceFamily = sample
        .family
        .as_deref()
        .or(defaults.family.as_deref())
        .ok_or_else(|| anyhow!("no family given and no default family"))?
        .parse()?;

    let wavelengths = match (sample.wavelength, sample.wavelengths) {
        (Some(l), None) => Vector3::repeat(l),
        (None, Some([x, y, z])) => Vector3::new(x, y, z),
        (None, None) => bail!("one of wavelength or wavelengths is required"),
        (Some(_), Some(_)) => bail!("wavelength and wavelengths are mutually exclusive"),
    };

    let threshold = ThresholdSpec::from_options(sample.porosity, sample.isovalue, sample.thickness)?;

    let rotation = sample.rotation.or(defaults.rotation).unwrap_or([0.0; 3]);
    check_angles(&rotation)?;

    let step = sample
        .step
        .or(defaults.step)
        .or(sample.thickness.map(|t| t / SAMPLES_PER_WALL))
        .unwrap_or(DEFAULT_STEP);

    let mut options = MeshingOptions::default().with_step(Step::Uniform(step));
    match (&sample.box_size, &sample.periods) {
        (Some(size), _) => options = options.with_box_size(Vector3::from(*size)),
        (None, Some(periods)) => options = options.with_periods(period_spec(periods)?),
        (None, None) => {
            if let Some(size) = defaults.box_size {
                options = options.with_box_size(Vector3::from(size));
            } else if let Some(periods) = &defaults.periods {
                options = options.with_periods(period_spec(periods)?);
            }
        }
    }

    let [x, y, z] = rotation;
    let params = LatticeParameters::new(family, wavelengths, threshold).with_rotation(x, y, z);
    params.validate()?;
    options.validate()?;
    Ok(Specimen { params, options })
}

fn period_spec(periods: &Periods) -> Result<PeriodSpec, TpmsError> {
    PeriodSpec::try_from(periods.to_vec().as_slice())
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every row of `job`, writing one STL per row into `out_dir`.
///
/// Rows are independent: a failing row is logged and recorded, and the
/// remaining rows still run. A row whose lattice comes out empty is written
/// but counted as failed.
pub fn run_batch(job: &JobConfig, out_dir: &Path) -> Result<BatchReport> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let format = if job.output.ascii {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    };

    let mut report = BatchReport::default();
    for (i, sample) in job.samples.iter().enumerate() {
        let path = out_dir.join(format!("{}.stl", sample.name));
        let outcome = resolve_sample(sample, &job.defaults)
            .and_then(|specimen| write_specimen(&specimen, &path, format));
        match outcome {
            Ok(0) => {
                tracing::error!(row = i, name = %sample.name, "lattice is empty");
                report
                    .failed
                    .push((sample.name.clone(), "lattice produced no triangles".into()));
            }
            Ok(triangles) => {
                tracing::info!(row = i, name = %sample.name, triangles, path = %path.display(), "wrote specimen");
                report.written.push(path);
            }
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::error!(row = i, name = %sample.name, error = %reason, "sample failed");
                report.failed.push((sample.name.clone(), reason));
            }
        }
    }
    Ok(report)
}
