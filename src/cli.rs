//! Command-line arguments for the demo

use std::path::PathBuf;

use clap::Parser;
use numeric_input::{Unit, WidgetConfig};

/// Interactive numeric input with a percent/pixel toggle
#[derive(Parser, Debug)]
#[command(name = "numeric-input", version, about)]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/numeric-input/config.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Starting unit: percent (%) or pixel (px)
    #[arg(short, long, value_parser = parse_unit)]
    pub unit: Option<Unit>,

    /// Starting value
    #[arg(short = 'v', long, value_name = "N")]
    pub value: Option<f64>,
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    match s {
        "percent" | "%" => Ok(Unit::Percent),
        "pixel" | "px" => Ok(Unit::Pixel),
        other => Err(format!("unknown unit '{other}', expected percent or px")),
    }
}

impl CliArgs {
    /// Command-line values win over the file.
    pub fn apply(&self, mut config: WidgetConfig) -> color_eyre::Result<WidgetConfig> {
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(value) = self.value {
            config.initial_value = value;
        }
        config.validate()?;
        Ok(config)
    }
}
