use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use construacademy::config::{read_config, Config};
use construacademy::config_data::write_sample_cfg;
use construacademy::logger::configure_logger;
use construacademy::server::server_run;

const CFG_FILE_NAME: &str = "construacademy.toml";

#[derive(Parser)]
#[command(name = "construacademy", version, about = "ConstruAcademy content site")]
struct Cli {
    /// Configuration file. Defaults to construacademy.toml next to the
    /// binary, in the current directory, or in the user config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a sample configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn get_config_path() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    let cur_dir = env::current_dir().unwrap();

    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    if cur_dir.join(CFG_FILE_NAME).exists() {
        return Some(cur_dir.join(CFG_FILE_NAME));
    }

    let cfg_dir = dirs::config_dir().expect("Could not find user config dir");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

fn open_config(cfg_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config_path = cfg_path.or_else(get_config_path).context(
        "Could not find the ConstruAcademy configuration. Run with --init-config to create one.",
    )?;

    println!("Reading config from {}", config_path.to_str().unwrap());
    read_config(&config_path).context("Error reading configuration")
}

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = cli.config.unwrap_or_else(|| {
            dirs::config_dir()
                .expect("Could not find user config dir")
                .join(CFG_FILE_NAME)
        });
        write_sample_cfg(&path).context("Error writing sample configuration")?;
        println!("Sample config written to {}", path.to_str().unwrap());
        return Ok(());
    }

    let config = open_config(cli.config)?;
    configure_logger(&config).map_err(|e| anyhow::anyhow!("Error configuring logger: {}", e))?;

    println!("Listening on {}:{}", config.server.address, config.server.port);
    server_run(config).await?;
    Ok(())
}
