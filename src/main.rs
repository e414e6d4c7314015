use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::debug;
use vet_admin::{
    api::ApiClient,
    cli::{self, Screen},
    config,
};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Prints a clinic collection as a table")]
    #[command(long_about = None)]
    List(ListArgs),

    #[command(about = "Opens an interactive screen, or the home menu when none is given")]
    #[command(long_about = None)]
    Open(OpenArgs),
}

#[derive(clap::Args)]
struct ConnectionArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    /// Overrides the backend address from the config
    #[arg(long)]
    backend_url: Option<String>,
}

#[derive(clap::Args)]
struct ListArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[arg(value_enum)]
    screen: Screen,
}

#[derive(clap::Args)]
struct OpenArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[arg(value_enum)]
    screen: Option<Screen>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::List(args) => {
            let client = connect(args.connection)?;

            cli::list(args.screen, &client)?;
        }
        Cli::Open(args) => {
            let client = connect(args.connection)?;

            cli::open(args.screen, &client)?;
        }
    };

    Ok(())
}

fn connect(args: ConnectionArgs) -> anyhow::Result<ApiClient> {
    debug!("Подгружаем конфиг из {:?}", args.config_path);
    let mut cfg = config::load(args.config_path)?;

    if let Some(url) = args.backend_url {
        debug!("Адрес бэкенда переопределён: {}", url);
        cfg.backend_url = url;
        config::normalize(&mut cfg)?;
    }

    Ok(ApiClient::new(&cfg)?)
}
