//! Geneva drive generator
//!
//! Builds the wheel and crank for one parameter set and writes each solid
//! as `<output>/<role>.<format>`.
//!
//! ```text
//! geneva --slot-quantity 8 --vertices 64 --format obj --output out/
//! geneva --params drive.json --subtract-relief-holes
//! geneva --only wheel-body --only crank-assembly
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use geneva_core::{AssemblyOptions, Parameters, ReliefHoles, ResultContainer, Role};
use geneva_mesh::export::{write_ascii_stl, write_obj};
use geneva_mesh::Mesh;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Stl,
    Obj,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Stl => "stl",
            Format::Obj => "obj",
        }
    }
}

/// Generate a Geneva drive as mesh files
#[derive(Debug, Parser)]
#[command(name = "geneva")]
#[command(about = "Generate a Geneva drive wheel and crank", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON parameter file; flags below override its fields
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    wheel_radius: Option<f64>,
    #[arg(long)]
    slot_quantity: Option<u32>,
    #[arg(long)]
    pin_radius: Option<f64>,
    #[arg(long)]
    clearance: Option<f64>,
    #[arg(long)]
    pin_tolerance: Option<f64>,
    #[arg(long)]
    stop_disc_tolerance: Option<f64>,
    #[arg(long)]
    stop_cutout_tolerance: Option<f64>,
    #[arg(long)]
    base_tolerance: Option<f64>,
    #[arg(long)]
    wheel_hole_radius: Option<f64>,
    #[arg(long)]
    crank_hole_radius: Option<f64>,
    #[arg(long)]
    hole_tolerance: Option<f64>,
    /// Vertices per circular cross-section
    #[arg(long)]
    vertices: Option<u32>,

    /// Subtract the relief cutters instead of writing them out
    #[arg(long)]
    subtract_relief_holes: bool,

    /// Write only the named solid; repeat for several
    #[arg(long, value_name = "ROLE", value_parser = parse_role)]
    only: Vec<Role>,

    #[arg(long, value_enum, default_value_t = Format::Stl)]
    format: Format,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn parameters(&self) -> Result<Parameters> {
        let mut params = match &self.params {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Parameters::default(),
        };

        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field {
                    params.$field = value;
                })*
            };
        }
        apply!(
            height,
            wheel_radius,
            slot_quantity,
            pin_radius,
            clearance,
            pin_tolerance,
            stop_disc_tolerance,
            stop_cutout_tolerance,
            base_tolerance,
            wheel_hole_radius,
            crank_hole_radius,
            hole_tolerance,
            vertices,
        );
        Ok(params)
    }

    fn options(&self) -> AssemblyOptions {
        AssemblyOptions {
            relief_holes: if self.subtract_relief_holes {
                ReliefHoles::Subtract
            } else {
                ReliefHoles::Keep
            },
        }
    }

    /// Whether a solid with this role should be written.
    fn writes(&self, role: Role) -> bool {
        self.only.is_empty() || self.only.contains(&role)
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn parse_role(name: &str) -> Result<Role, String> {
    Role::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Role::ALL.iter().map(|r| r.name()).collect();
        format!("unknown solid '{name}', expected one of: {}", known.join(", "))
    })
}

fn write_solid(path: &Path, name: &str, format: Format, mesh: &Mesh) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    match format {
        Format::Stl => write_ascii_stl(mesh, name, &mut out)?,
        Format::Obj => write_obj(mesh, name, &mut out)?,
    }
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(cli.log_level())
            .finish(),
    )?;

    let params = cli.parameters()?;
    let mut container = ResultContainer::new();
    let set = container.regenerate(&params, &cli.options())?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    for named in set.iter().filter(|n| cli.writes(n.role)) {
        let path = cli
            .output
            .join(format!("{}.{}", named.name(), cli.format.extension()));
        let mesh = named.mesh();
        write_solid(&path, named.name(), cli.format, &mesh)?;
        info!(
            solid = named.name(),
            triangles = mesh.triangle_count(),
            path = %path.display(),
            "written"
        );
    }

    Ok(())
}
