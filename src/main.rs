//! tpmsgen command-line interface.
//!
//! ```sh
//! tpmsgen generate gyroid.stl gyroid 10 10 10 0 0 45 0.6 -s 0.2 -n 4
//! tpmsgen generate sheet.stl sheet-gyroid 5 5 5 0 0 0 --thickness 0.9 --periods 9 9 27
//! tpmsgen batch job.toml -o specimens
//! tpmsgen families
//! ```

mod cli;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use nalgebra::Vector3;
use std::path::PathBuf;
use tpmsgen::calibration::THICKNESS_LIMIT;
use tpmsgen::float_types::Real;
use tpmsgen::io::StlFormat;
use tpmsgen::{LatticeParameters, MeshingOptions, PeriodSpec, Step, SurfaceFamily, ThresholdSpec};

use cli::runner::{self, Specimen};

#[derive(Parser)]
#[command(name = "tpmsgen")]
#[command(about = "Generate STL files of gyroid, diamond and sheet-gyroid TPMS lattices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single specimen.
    Generate(GenerateArgs),
    /// Generate every sample listed in a TOML job file.
    Batch {
        /// Path to the job file.
        config: PathBuf,
        /// Output directory (overrides the job file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the supported surface families.
    Families,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Name of the STL file to write.
    filename: PathBuf,
    /// Surface family (`gyroid`, `diamond` or `sheet-gyroid`).
    tpms: SurfaceFamily,
    /// Wavelength along x.
    lambda_x: Real,
    /// Wavelength along y.
    lambda_y: Real,
    /// Wavelength along z.
    lambda_z: Real,
    /// Lattice rotation about x, in degrees (0-90).
    #[arg(value_parser = parse_angle)]
    theta_x: Real,
    /// Lattice rotation about y, in degrees (0-90).
    #[arg(value_parser = parse_angle)]
    theta_y: Real,
    /// Lattice rotation about z, in degrees (0-90).
    #[arg(value_parser = parse_angle)]
    theta_z: Real,
    /// Fraction of free space in the structure (0-1).
    #[arg(value_parser = parse_porosity)]
    porosity: Option<Real>,
    /// Isosurface threshold, used instead of porosity.
    #[arg(long, conflicts_with_all = ["porosity", "thickness"], allow_negative_numbers = true)]
    isovalue: Option<Real>,
    /// Sheet wall thickness, used instead of porosity (sheet-gyroid only).
    #[arg(long, conflicts_with = "porosity")]
    thickness: Option<Real>,
    /// Grid spacing, in the same units as the wavelengths.
    #[arg(short = 's', long = "step-size", default_value_t = 0.2)]
    step: Real,
    /// Number of periods on every axis.
    #[arg(short = 'n', long = "num-periods", conflicts_with = "periods")]
    num_periods: Option<u32>,
    /// Number of periods per axis.
    #[arg(long, num_args = 3, value_names = ["NX", "NY", "NZ"])]
    periods: Option<Vec<u32>>,
    /// Write ASCII instead of binary STL.
    #[arg(long)]
    ascii: bool,
}

fn parse_angle(s: &str) -> Result<Real, String> {
    let a: Real = s.parse().map_err(|e| format!("{e}"))?;
    runner::check_angles(&[a, 0.0, 0.0]).map_err(|_| format!("must be between 0 and 90, got {a}"))?;
    Ok(a)
}

fn parse_porosity(s: &str) -> Result<Real, String> {
    let p: Real = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("must be between 0 and 1, got {p}"))
    }
}

impl GenerateArgs {
    fn specimen(&self) -> anyhow::Result<Specimen> {
        let threshold = ThresholdSpec::from_options(self.porosity, self.isovalue, self.thickness)?;
        let periods = match (&self.periods, self.num_periods) {
            (Some(counts), _) => PeriodSpec::try_from(counts.as_slice())?,
            (None, Some(n)) => PeriodSpec::Uniform(n),
            (None, None) => PeriodSpec::default(),
        };
        let params = LatticeParameters::new(
            self.tpms,
            Vector3::new(self.lambda_x, self.lambda_y, self.lambda_z),
            threshold,
        )
        .with_rotation(self.theta_x, self.theta_y, self.theta_z);
        params.validate()?;
        let options = MeshingOptions::default()
            .with_step(Step::Uniform(self.step))
            .with_periods(periods);
        options.validate()?;
        Ok(Specimen { params, options })
    }

    fn format(&self) -> StlFormat {
        if self.ascii {
            StlFormat::Ascii
        } else {
            StlFormat::Binary
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let specimen = args.specimen()?;
            let triangles = runner::write_specimen(&specimen, &args.filename, args.format())?;
            if triangles == 0 {
                bail!("lattice produced no triangles; {} is empty", args.filename.display());
            }
            println!("Wrote {} triangles to {}", triangles, args.filename.display());
            Ok(())
        }
        Commands::Batch { config, output } => {
            let job = cli::config::load_config(&config)?;
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            let report = runner::run_batch(&job, &out_dir)
                .with_context(|| format!("running {}", config.display()))?;

            println!(
                "{} of {} samples written to {}",
                report.written.len(),
                job.samples.len(),
                out_dir.display()
            );
            for (name, reason) in &report.failed {
                println!("  failed: {name}: {reason}");
            }
            if !report.is_success() {
                bail!("{} sample(s) failed", report.failed.len());
            }
            Ok(())
        }
        Commands::Families => {
            println!("Supported surface families:");
            for family in SurfaceFamily::ALL {
                let thresholds = if family.supports_thickness() {
                    format!("porosity, isovalue or thickness (< {THICKNESS_LIMIT} of the wavelength)")
                } else {
                    "porosity or isovalue".to_string()
                };
                println!("  {family:<14} {thresholds}");
            }
            Ok(())
        }
    }
}
