mod config;
mod demo;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use shoreline_render::EffectMode;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;
use crate::demo::Demo;

#[derive(Parser)]
#[command(name = "shoreline-cli", about = "Headless runner for the shoreline water scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the demo scene and render frames against the recording backend
    Render {
        /// Number of frames to render
        #[arg(short, long, default_value = "3")]
        frames: u64,
        /// YAML scene configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Screen effect, overriding the configuration
        #[arg(short, long, value_enum)]
        effect: Option<EffectArg>,
        /// Draw the debug grid in the reflection pass
        #[arg(long)]
        grid: bool,
        /// Print frame summaries as JSON
        #[arg(long)]
        json: bool,
        /// Print every backend call of the last frame
        #[arg(long)]
        transcript: bool,
    },
    /// Print the default configuration as YAML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum EffectArg {
    None,
    BoxBlur,
    Sharpen,
    Chromatic,
    Depth,
    Wireframe,
}

impl From<EffectArg> for EffectMode {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::None => EffectMode::None,
            EffectArg::BoxBlur => EffectMode::BoxBlur,
            EffectArg::Sharpen => EffectMode::Sharpen,
            EffectArg::Chromatic => EffectMode::Chromatic,
            EffectArg::Depth => EffectMode::Depth,
            EffectArg::Wireframe => EffectMode::Wireframe,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("shoreline-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", shoreline_common::crate_info());
            println!("input: {}", shoreline_input::crate_info());
            println!("render: {}", shoreline_render::crate_info());
        }
        Commands::Render {
            frames,
            config,
            effect,
            grid,
            json,
            transcript,
        } => {
            let mut scene_config = match &config {
                Some(path) => DemoConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => DemoConfig::default(),
            };
            if let Some(effect) = effect {
                scene_config.effect = effect.into();
            }
            scene_config.show_grid |= grid;

            let mut demo = Demo::build(&scene_config);
            let summaries = demo.run(frames);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summaries).context("failed to encode summaries")?
                );
            } else {
                println!(
                    "Rendering {frames} frames: {} instances, effect={:?}",
                    demo.scene().instance_count(),
                    demo.orchestrator().effect()
                );
                for summary in &summaries {
                    println!("{summary}");
                }
                let camera = demo.camera();
                println!("camera: theta={:.1} phi={:.1}", camera.theta(), camera.phi());
            }
            if transcript {
                print!("{}", demo.backend().transcript());
            }
        }
        Commands::Config => {
            let yaml = DemoConfig::default()
                .to_yaml()
                .context("failed to encode default config")?;
            print!("{yaml}");
        }
    }

    Ok(())
}
