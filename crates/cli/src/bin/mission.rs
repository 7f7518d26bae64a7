use std::path::PathBuf;

use clap::Parser;
use lightsail_calculator::export::{mission as mission_export, trajectory as trajectory_export};
use lightsail_calculator::materials::MaterialCatalog;
use lightsail_calculator::motion::TimeGrid;
use lightsail_calculator::sail::summary::SailSummary;
use lightsail_calculator::sail::{MultilayerSail, SailConfig};
use lightsail_calculator::units::{gw_to_w, nm_to_m, w_to_gw};

#[derive(Parser)]
#[command(author, version, about = "Lightsail mission calculator")]
struct Cli {
    /// Sail name used in the exported artifacts
    #[arg(long, default_value = "sail")]
    name: String,

    /// Layer material name, front to back (repeat per layer)
    #[arg(long = "material", required = true)]
    materials: Vec<String>,

    /// Layer thickness in nm, same order as --material
    #[arg(long = "thickness-nm", required = true)]
    thicknesses_nm: Vec<f64>,

    /// Sail mass in grams (at least one of --mass-g/--area-m2 required)
    #[arg(long)]
    mass_g: Option<f64>,

    /// Sail area in m²
    #[arg(long)]
    area_m2: Option<f64>,

    /// Laser power in GW (defaults to the solved thermal maximum)
    #[arg(long)]
    power_gw: Option<f64>,

    /// Target speed as a fraction of light speed
    #[arg(long, default_value_t = 0.2)]
    target: f64,

    /// Laser wavelength in nm
    #[arg(long, default_value_t = 1064.0)]
    wavelength_nm: f64,

    /// Payload temperature limit in K
    #[arg(long, default_value_t = 1000.0)]
    payload_max_temp: f64,

    /// Material catalog (directory of TOML records or a YAML file);
    /// defaults to the built-in catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Trajectory CSV output path (`-` for stdout)
    #[arg(long, default_value = "out/trajectory.csv")]
    trajectory: PathBuf,

    /// Mission JSON sidecar output path
    #[arg(long, default_value = "out/mission.json")]
    sidecar: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => MaterialCatalog::load(path)?,
        None => MaterialCatalog::builtin(),
    };

    let config = SailConfig {
        name: cli.name.clone(),
        materials: cli.materials.clone(),
        thicknesses_m: cli.thicknesses_nm.iter().map(|&t| nm_to_m(t)).collect(),
        mass_kg: cli.mass_g.map(|g| g * 1.0e-3),
        area_m2: cli.area_m2,
        target_beta: cli.target,
        payload_max_temperature_k: cli.payload_max_temp,
        power_w: cli.power_gw.map(gw_to_w),
        wavelength_m: nm_to_m(cli.wavelength_nm),
        ..SailConfig::default()
    };

    let sail = MultilayerSail::build(config, &catalog)?;
    let samples = sail.mission_trajectory(&TimeGrid::default())?;

    let mut writer = trajectory_export::writer_for_path(&cli.trajectory)?;
    trajectory_export::write_samples(writer.as_mut(), &samples)?;

    let summary = SailSummary::from(&sail);
    mission_export::write_sidecar(&cli.sidecar, &summary, &samples)?;

    println!("sail: {}", sail.name);
    println!("  mass: {:.4} g over {:.3} m^2", sail.mass_kg * 1.0e3, sail.area_m2);
    println!(
        "  optics: R = {:.4}, T = {:.4}, A = {:.3e}",
        sail.reflectance, sail.transmittance, sail.absorptance
    );
    println!(
        "  power: {:.2} GW, equilibrium temperature {:.1} K",
        w_to_gw(sail.power_w),
        sail.temperature_reached_k
    );
    for probe in &sail.power_probes {
        println!(
            "    probe: {:.2} GW -> {:.1} K",
            w_to_gw(probe.power_w),
            probe.temperature_k
        );
    }
    println!(
        "  laser array diameter: {:.1} km, figure of merit W = {:.3} sqrt(g)/m",
        sail.laser_diameter_m * 1.0e-3,
        sail.figure_of_merit
    );
    if let Some(last) = samples.last() {
        println!(
            "  trajectory: beta = {:.4} at t = {:.0} s, distance {:.3e} m",
            last.beta, last.time_s, last.distance_m
        );
    }

    Ok(())
}
