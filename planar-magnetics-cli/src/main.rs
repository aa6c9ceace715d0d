/*!
  Binary for the CLI of planar-magnetics: plm
*/

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod cli;
pub mod error;

use std::fs::read_to_string;
use std::path::Path;

use clap::Parser;
use colored::Colorize;

use cli::{CliApp, Command, DesignArgs, OutputArgs, OutputFormat};
use error::CliError;
use planar_magnetics::changelog::Changelog;
use planar_magnetics::conduction::weight_to_thickness;
use planar_magnetics::geometry::Polygon;
use planar_magnetics::io::{DxfWriter, KicadWriter, ToKicad};
use planar_magnetics::materials::COPPER;
use planar_magnetics::windings::cffc::Turn;
use planar_magnetics::windings::{CffcParameters, CffcWinding, Spiral, SpiralParameters};

fn read_design(path: &Path) -> Result<String, CliError> {
    read_to_string(path).map_err(|error| CliError::DesignRead {
        error,
        filename: path.to_path_buf(),
    })
}

fn write_output(
    output: &OutputArgs,
    item: &dyn ToKicad,
    polygons: &[&Polygon],
) -> Result<(), CliError> {
    let writer = output.open()?;

    match output.format {
        OutputFormat::Kicad => KicadWriter::new(writer)
            .write(item)
            .map_err(CliError::from)?,
        OutputFormat::Dxf => DxfWriter::new(writer)
            .write_polygons(polygons.iter().copied())
            .map_err(CliError::from)?,
    }

    if let Some(path) = &output.output {
        println!(
            "Wrote footprint to {}.",
            path.display().to_string().green().bold()
        );
    }

    Ok(())
}

fn print_dcr(dcr: f64) {
    println!(
        "Estimated DCR: {}",
        format!("{:.3} mOhm", 1e3 * dcr).green().bold()
    );
}

fn generate_spiral(
    design: &DesignArgs,
    output: &OutputArgs,
    copper_weight: Option<f64>,
    temperature: f64,
) -> Result<(), CliError> {
    let content = read_design(&design.params)?;
    let parameters: SpiralParameters =
        serde_json::from_str(&content).map_err(|error| CliError::DesignParse {
            error,
            filename: design.params.clone(),
        })?;

    log::info!("Generating spiral winding ...");
    let spiral = Spiral::new(&parameters).map_err(CliError::from)?;

    if let Some(weight) = copper_weight {
        let rho = COPPER.resistivity_at(temperature);
        let dcr = spiral
            .estimate_dcr(weight_to_thickness(weight), rho)
            .map_err(CliError::from)?;
        print_dcr(dcr);
    }

    write_output(output, &spiral, &[spiral.polygon()])
}

fn generate_cffc(
    design: &DesignArgs,
    output: &OutputArgs,
    stackup: Option<&[f64]>,
    temperature: f64,
) -> Result<(), CliError> {
    let content = read_design(&design.params)?;
    let parameters: CffcParameters =
        serde_json::from_str(&content).map_err(|error| CliError::DesignParse {
            error,
            filename: design.params.clone(),
        })?;

    log::info!("Generating stacked winding ...");
    let winding = CffcWinding::new(&parameters).map_err(CliError::from)?;

    if let Some(stackup) = stackup {
        let dcr = winding
            .estimate_dcr(stackup, temperature, &COPPER)
            .map_err(CliError::from)?;
        print_dcr(dcr);
    }

    let polygons: Vec<&Polygon> = winding.turns().iter().map(Turn::polygon).collect();
    write_output(output, &winding, &polygons)
}

fn check_changelog(file: &Path) -> Result<(), CliError> {
    let content = read_to_string(file).map_err(|error| CliError::ChangelogRead {
        error,
        filename: file.to_path_buf(),
    })?;

    let changelog = Changelog::parse(&content)
        .map_err(planar_magnetics::Error::from)
        .map_err(CliError::from)?;

    println!(
        "{} {} released version(s).",
        "valid changelog:".green().bold(),
        changelog.releases().len()
    );
    for release in changelog.releases() {
        println!("  v{}", release.version());
    }

    Ok(())
}

fn run(cli: CliApp) -> Result<(), CliError> {
    match &cli.command {
        Command::Spiral {
            design,
            output,
            copper_weight,
            temperature,
        } => generate_spiral(design, output, *copper_weight, *temperature),
        Command::Cffc {
            design,
            output,
            stackup,
            temperature,
        } => generate_cffc(design, output, stackup.as_deref(), *temperature),
        Command::CheckChangelog { file } => check_changelog(file),
    }
}

fn main() {
    let cli = CliApp::parse();

    cli.logging.initialize_logging();
    log::info!("Version: {}", clap::crate_version!());

    run(cli).unwrap_or_else(|err| {
        log::error!("{} {err}", "error:".red().bold());
        std::process::exit(1)
    })
}
