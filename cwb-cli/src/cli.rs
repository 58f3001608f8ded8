use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cwb_core::{Config, Dashboard, DisplayState, provider_from_config};
use inquire::{Select, Text};
use tracing::debug;

use crate::render::render_card;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cwb-weather", version, about = "Taiwan CWB weather card")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and location in the config file.
    Configure,

    /// Fetch once and print the weather card.
    Show(ShowArgs),

    /// Print the card and refresh it on demand.
    Watch(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// CWB open data authorization key; overrides the config file.
    #[arg(long, env = "CWB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Observation station name, e.g. "臺北".
    #[arg(long)]
    location: Option<String>,

    /// County for the forecast, e.g. "臺北市".
    #[arg(long)]
    forecast_location: Option<String>,

    /// Print the display state as JSON instead of the card.
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    fn apply_to(&self, config: &mut Config) {
        if let Some(key) = &self.api_key {
            config.set_api_key(key.clone());
        }
        if let Some(location) = &self.location {
            config.set_location(location.clone());
        }
        if let Some(county) = &self.forecast_location {
            config.forecast_location = Some(county.trim().to_string());
        }
    }
}

const REFRESH: &str = "重新整理";
const QUIT: &str = "離開";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show(args) => {
                let mut dashboard = dashboard(&args)?;
                print_state(dashboard.refresh().await, args.json)
            }
            Command::Watch(args) => {
                let mut dashboard = dashboard(&args)?;
                loop {
                    print_state(dashboard.refresh().await, args.json)?;

                    let choice = Select::new("下一步：", vec![REFRESH, QUIT])
                        .prompt()
                        .context("Failed to read menu choice")?;
                    if choice == QUIT {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn dashboard(args: &ShowArgs) -> anyhow::Result<Dashboard<cwb_core::CwbProvider>> {
    let mut config = Config::load()?;
    args.apply_to(&mut config);
    debug!(
        location = %config.location_name,
        forecast_location = ?config.forecast_location,
        base_url = %config.base_url,
        "resolved configuration"
    );

    Ok(Dashboard::new(provider_from_config(&config)?))
}

fn print_state(state: &DisplayState, json: bool) -> anyhow::Result<()> {
    if json {
        let out =
            serde_json::to_string_pretty(state).context("Failed to serialize display state")?;
        println!("{out}");
    } else {
        println!("{}", render_card(state));
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut key_prompt = Text::new("CWB API key:")
        .with_help_message("Issued at https://opendata.cwb.gov.tw/user/authkey");
    if let Some(current) = config.api_key.as_deref() {
        key_prompt = key_prompt.with_default(current);
    }
    let api_key = key_prompt.prompt().context("Failed to read API key")?;

    let location = Text::new("Observation station:")
        .with_default(&config.location_name)
        .prompt()
        .context("Failed to read location")?;

    let county = Text::new("Forecast county (empty for the first county):")
        .with_default(config.forecast_location.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read forecast county")?;

    config.set_api_key(api_key);
    config.set_location(location);
    config.forecast_location = Some(county.trim().to_string()).filter(|c| !c.is_empty());

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
