use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "physics_lab_toolbox",
    about = "Doppler shift sweeps and reaction enthalpy calculations",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Path to the TOML config (created with defaults when missing)
    #[arg(long = "config", value_name = "FILE", global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Interface language: auto, en, es, ko
    #[arg(long = "lang", short = 'L', value_name = "CODE", global = true)]
    pub lang: Option<String>,

    /// Log progress at info level
    #[arg(long, short = 'v', action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep the source speed and plot the observed frequency
    Doppler(DopplerArgs),
    /// Compute ΔH and ΔU of a preset reaction
    Enthalpy(EnthalpyArgs),
    /// Print the formation enthalpy table
    Compounds,
}

#[derive(Debug, Args)]
pub struct DopplerArgs {
    /// Wave speed in the medium [m/s]
    #[arg(long)]
    pub wave_speed: Option<f64>,
    /// Source frequency [Hz]
    #[arg(long)]
    pub base_frequency: Option<f64>,
    /// Observer speed [m/s]
    #[arg(long, allow_hyphen_values = true)]
    pub observer_speed: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub source_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub source_max: Option<f64>,
    #[arg(long)]
    pub steps: Option<usize>,
    /// Also render GIF animations
    #[arg(long, action = ArgAction::SetTrue)]
    pub animate: bool,
    /// Skip the static PNG chart
    #[arg(long = "no-plot", action = ArgAction::SetTrue)]
    pub no_plot: bool,
    /// Output directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

impl DopplerArgs {
    /// 명령줄 값으로 설정을 덮어쓴 사본을 만든다.
    pub fn apply(&self, config: &Config) -> Config {
        let mut cfg = config.clone();
        let d = &mut cfg.doppler;
        if let Some(v) = self.wave_speed {
            d.wave_speed = v;
        }
        if let Some(v) = self.base_frequency {
            d.base_frequency = v;
        }
        if let Some(v) = self.observer_speed {
            d.observer_speed = v;
        }
        if let Some(v) = self.source_min {
            d.source_speed_min = v;
        }
        if let Some(v) = self.source_max {
            d.source_speed_max = v;
        }
        if let Some(v) = self.steps {
            d.steps = v;
        }
        if let Some(dir) = &self.out {
            cfg.output.directory = dir.clone();
        }
        cfg
    }
}

#[derive(Debug, Args)]
pub struct EnthalpyArgs {
    /// Preset key, e.g. methane_combustion (defaults to the configured preset)
    #[arg(long)]
    pub preset: Option<String>,
    /// List the available presets and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub list: bool,
    /// Temperature for ΔU [K]
    #[arg(long)]
    pub temperature: Option<f64>,
    /// Skip the bar chart
    #[arg(long = "no-plot", action = ArgAction::SetTrue)]
    pub no_plot: bool,
}
