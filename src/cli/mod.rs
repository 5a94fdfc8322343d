pub mod client;
pub mod utils;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

pub use client::DashboardClient;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PATH: &str = "rest/turnilo/dashboards";

#[derive(Parser)]
#[command(name = "dashboards")]
#[command(about = "Create, update, delete or get Turnilo dashboards through the REST API")]
#[command(version)]
pub struct Cli {
    #[arg(short = 'H', long, global = true, default_value = DEFAULT_HOST, help = "Host of the API")]
    pub host: String,

    #[arg(short, long, global = true, default_value_t = DEFAULT_PORT, help = "Port of the API")]
    pub port: u16,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create a dashboard from a JSON file")]
    Create {
        #[arg(help = "Path to the dashboard JSON file")]
        file: PathBuf,
    },

    #[command(about = "Replace a dashboard with the contents of a JSON file")]
    Update {
        #[arg(help = "Path to the dashboard JSON file")]
        file: PathBuf,
        #[arg(help = "Dashboard id")]
        id: String,
    },

    #[command(about = "Delete a dashboard")]
    Delete {
        #[arg(help = "Dashboard id")]
        id: String,
    },

    #[command(about = "Get one dashboard by id, or list them")]
    Get {
        #[arg(help = "Dashboard id (lists all when omitted)")]
        id: Option<String>,
        #[arg(long, help = "Only list dashboards with this shortName")]
        short_name: Option<String>,
        #[arg(long, help = "Only list dashboards with this dataCube")]
        data_cube: Option<String>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = DashboardClient::new(&cli.host, cli.port);

    let response = match cli.command {
        Commands::Create { file } => client.create(read_json(&file)?).await?,
        Commands::Update { file, id } => client.update(&id, read_json(&file)?).await?,
        Commands::Delete { id } => client.delete(&id).await?,
        Commands::Get {
            id: Some(id),
            short_name: None,
            data_cube: None,
        } => client.get(&id).await?,
        Commands::Get { id: Some(_), .. } => {
            anyhow::bail!("--short-name/--data-cube only apply when listing");
        }
        Commands::Get {
            id: None,
            short_name,
            data_cube,
        } => client.list(short_name.as_deref(), data_cube.as_deref()).await?,
    };

    utils::print_response(response).await
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
