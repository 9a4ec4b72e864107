use std::path::PathBuf;

use clap::{Parser, Subcommand};

use domscout_router::config::{load_config, AppConfig};
use domscout_router::history::{NavigationTarget, Navigator};
use domscout_router::observability::init_logging;
use domscout_router::routing::{Params, Revision};

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect the DomScout client route table", long_about = None)]
struct Cli {
    /// Built-in table to use when no config is given.
    #[arg(short, long, default_value = "current")]
    revision: Revision,

    /// Take the route table and base path from a config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path the application is mounted under (overrides the config).
    #[arg(long, env = "BASE_URL")]
    base_path: Option<String>,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route in declaration order
    List,
    /// Resolve a location such as /target/example.com/42
    Resolve { location: String },
    /// Build the href of a named route
    Href {
        name: String,
        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Navigate through locations in order and print the resulting history
    Navigate {
        /// Locations relative to the base, e.g. /results/42
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Validate a config file
    Check { path: PathBuf },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging("warn");

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = AppConfig::default();
            config.router.revision = cli.revision;
            config
        }
    };
    if let Some(base_path) = &cli.base_path {
        config.router.base_path = base_path.clone();
    }
    let table = config.route_table()?;
    let base = config.router.base_path.clone();

    match cli.command {
        Commands::List => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table.summaries())?);
            } else {
                for route in table.iter() {
                    println!("{:<28} {:<10} {}", route.path.as_str(), route.name, route.view.as_str());
                }
            }
        }
        Commands::Resolve { location } => match table.resolve(&location) {
            Some(route) if cli.json => println!("{}", serde_json::to_string_pretty(&route)?),
            Some(route) => {
                println!("{} ({})", route.name, route.pattern);
                for (key, value) in route.params.iter() {
                    println!("  {} = {}", key, value);
                }
            }
            None => {
                eprintln!("No route matches '{}'", location);
                std::process::exit(1);
            }
        },
        Commands::Href { name, params } => {
            let params: Params = params.into_iter().collect();
            let navigator = Navigator::new(table, config.router.web_history(&base));
            let href = navigator.href(NavigationTarget::named(name, params))?;
            if cli.json {
                println!("{}", serde_json::json!({ "href": href }));
            } else {
                println!("{}", href);
            }
        }
        Commands::Navigate { locations } => {
            let mut navigator = Navigator::new(table, config.router.web_history(&base));
            for location in locations {
                match navigator.push(location.as_str()) {
                    Ok(Some(route)) => println!("{:<28} {}", navigator.href(location.as_str())?, route.name),
                    Ok(None) => println!("{:<28} (no route)", navigator.href(location.as_str())?),
                    Err(e) => println!("{:<28} skipped: {}", location, e),
                }
            }
            let history = navigator.history();
            println!(
                "history: {} of {} entries kept, at {}",
                history.len(),
                config.router.max_history,
                history.create_href(history.location())
            );
        }
        Commands::Check { path } => match load_config(&path) {
            Ok(config) => {
                println!(
                    "{}: ok ({} routes, base '{}')",
                    path.display(),
                    config.route_table()?.len(),
                    config.router.base_path
                );
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
