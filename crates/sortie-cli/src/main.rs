//! Sortie planner - organizes drone flight missions into launch groups.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sortie_core::build_sortie_plan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sortie_cli::{loader, writer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder containing mission GeoJSON files
    #[arg(long)]
    missions: PathBuf,

    /// Restricted landing zone GeoJSON file
    #[arg(long)]
    zone: PathBuf,

    /// Number of drones flown simultaneously per sortie
    #[arg(long, default_value_t = 3)]
    drones: usize,

    /// Output CSV path
    #[arg(long, default_value = "fly_missions.csv")]
    out: PathBuf,

    /// Seed for the repair shuffle; omit for a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Buffer radius around mission paths in meters
    #[arg(long, default_value_t = 3.0)]
    mission_buffer_m: f64,

    /// Buffer radius around the landing zone in meters
    #[arg(long, default_value_t = 20.0)]
    zone_buffer_m: f64,

    /// Feature property that names a mission for the dissolve
    #[arg(long, default_value = "Missn_Name")]
    mission_field: String,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sortie_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let missions =
        loader::load_missions(&args.missions, &args.mission_field, args.mission_buffer_m)?;
    let zone = loader::load_zone(&args.zone, args.zone_buffer_m)?;
    println!("A total of {} missions have been loaded...", missions.len());
    println!("A total of {} zone areas have been loaded...", zone.parts.len());

    let flights: Vec<_> = missions
        .iter()
        .map(|mission| mission.footprint.clone())
        .collect();

    let mut rng = match args.seed {
        Some(seed) => {
            tracing::info!("Using repair shuffle seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let plan = build_sortie_plan(&flights, &zone, args.drones, &mut rng)?;

    println!("The following flight sorties have been organized:");
    for sortie in &plan.sorties {
        let ids: Vec<String> = sortie.flights.iter().map(|id| id.to_string()).collect();
        println!("  {}: [{}]", sortie.label, ids.join(", "));
    }
    println!("Flight deck approved...");

    println!("Creating CSV flight plan...");
    writer::write_flight_plan(&plan, &args.out)?;
    println!("Flight plan created at {}...", args.out.display());

    Ok(())
}
