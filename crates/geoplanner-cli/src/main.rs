use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geoplanner_cli::commands::points::handle_points_command;
use geoplanner_cli::commands::route::{handle_route_command, RouteCommandArgs};
use geoplanner_cli::commands::routes::handle_routes_command;
use geoplanner_cli::commands::MapSources;
use geoplanner_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Waypoint route planner")]
struct Cli {
    /// Points file (`ID;Nome;Latitude;Longitude`). Defaults to $GEOPLANNER_POINTS.
    #[arg(long, global = true)]
    points: Option<PathBuf>,

    /// Routes file (`ID;Nome;Extremidade 1;Extremidade 2;Comprimento`). Defaults to $GEOPLANNER_ROUTES.
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the points of the map.
    Points,
    /// List the routes of the map.
    Routes,
    /// Compute the shortest path between two point identifiers.
    Route {
        /// Origin point identifier.
        #[arg(long = "from")]
        from: String,
        /// Destination point identifier.
        #[arg(long = "to")]
        to: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let sources = MapSources::resolve(cli.points.as_deref(), cli.routes.as_deref())?;
    let map = sources.load()?;

    match cli.command {
        Command::Points => handle_points_command(&map, cli.format),
        Command::Routes => handle_routes_command(&map, cli.format),
        Command::Route { from, to } => {
            handle_route_command(&map, &RouteCommandArgs { from, to }, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
