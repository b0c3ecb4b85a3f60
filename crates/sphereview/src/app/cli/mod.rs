use clap::Parser;
use std::path::PathBuf;

use crate::lib::controls::{Representation, Resolution};
use crate::lib::settings::ViewerConfig;

#[derive(Parser, Debug)]
#[command(name = "sphereview")]
#[command(about = "A tessellated sphere viewer with live resolution and representation controls", long_about = None)]
pub struct Args {
    /// Initial tessellation resolution (clamped to 8..=80)
    #[arg(short, long, value_name = "N")]
    pub resolution: Option<u32>,

    /// Initial representation: 'points', 'wireframe' or 'surface'
    #[arg(long, value_name = "MODE")]
    pub representation: Option<Representation>,

    /// Settings file (defaults to ./sphereview.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Draw the sphere without the procedural vertex colors
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log frame time diagnostics
    #[arg(long)]
    pub diagnostics: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Apply command line overrides on top of a config resolved from settings
    pub fn apply_overrides(&self, mut config: ViewerConfig) -> ViewerConfig {
        if let Some(resolution) = self.resolution {
            config.resolution = Resolution::new(resolution);
        }
        if let Some(representation) = self.representation {
            config.representation = representation;
        }
        if self.no_color {
            config.scene.colored = false;
        }
        config
    }
}
