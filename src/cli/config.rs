//! TOML batch job files.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tpmsgen::float_types::Real;

/// Top-level batch job.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub defaults: SampleDefaults,
    #[serde(default, rename = "sample")]
    pub samples: Vec<SampleConfig>,
}

/// Where and how meshes are written.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Write ASCII instead of binary STL (default: false).
    #[serde(default)]
    pub ascii: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            ascii: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

/// Values used by every sample that does not override them.
#[derive(Debug, Default, Deserialize)]
pub struct SampleDefaults {
    pub family: Option<String>,
    pub step: Option<Real>,
    pub periods: Option<Periods>,
    /// Absolute box edge lengths; takes precedence over `periods`.
    pub box_size: Option<[Real; 3]>,
    /// Euler angles in degrees about x, y and z.
    pub rotation: Option<[Real; 3]>,
}

/// Period count as one value for all axes or one per axis.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Periods {
    Uniform(u32),
    PerAxis(Vec<u32>),
}

impl Periods {
    pub fn to_vec(&self) -> Vec<u32> {
        match self {
            Periods::Uniform(n) => vec![*n],
            Periods::PerAxis(v) => v.clone(),
        }
    }
}

/// One specimen.
#[derive(Debug, Deserialize)]
pub struct SampleConfig {
    /// File stem for the written mesh.
    pub name: String,
    pub family: Option<String>,
    /// Same wavelength on every axis.
    pub wavelength: Option<Real>,
    /// Per-axis wavelengths.
    pub wavelengths: Option<[Real; 3]>,
    pub porosity: Option<Real>,
    pub isovalue: Option<Real>,
    pub thickness: Option<Real>,
    pub step: Option<Real>,
    pub periods: Option<Periods>,
    pub box_size: Option<[Real; 3]>,
    pub rotation: Option<[Real; 3]>,
}

/// Load and parse a TOML batch file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: JobConfig =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_job() {
        let job: JobConfig = toml::from_str(
            r#"
            [output]
            directory = "specimens"

            [defaults]
            family = "sheet-gyroid"
            box_size = [45.0, 45.0, 135.0]

            [[sample]]
            name = "s01"
            wavelength = 5.0
            thickness = 0.9

            [[sample]]
            name = "s02"
            family = "diamond"
            wavelengths = [4.0, 4.0, 8.0]
            isovalue = 0.2
            periods = [2, 2, 3]
            "#,
        )
        .unwrap();
        assert_eq!(job.output.directory, "specimens");
        assert!(!job.output.ascii);
        assert_eq!(job.defaults.box_size, Some([45.0, 45.0, 135.0]));
        assert_eq!(job.samples.len(), 2);
        assert_eq!(job.samples[1].periods.as_ref().map(Periods::to_vec), Some(vec![2, 2, 3]));
    }

    #[test]
    fn empty_job_uses_defaults() {
        let job: JobConfig = toml::from_str("").unwrap();
        assert_eq!(job.output.directory, "./output");
        assert!(job.samples.is_empty());
    }
}
