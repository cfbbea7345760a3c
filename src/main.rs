// SCRIPTFORGE Main Entry Point
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

use scriptforge_core::script::export::{
    build_shot_list, build_storyboard, build_subtitles, build_voiceover,
};
use scriptforge_core::script::extract::force_json;
use scriptforge_core::script::lint::lint;
use scriptforge_core::script::model::Script;
use scriptforge_core::script::normalize::normalize;
use scriptforge_core::script::prompt;
use scriptforge_core::server;
use scriptforge_core::state::{ServiceConfig, ServiceState};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "scriptforge-core")]
#[command(about = "ScriptForge Short-Video Script Service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Script API Web Server
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },

    /// Generate a script for a topic and print it as JSON
    Generate {
        /// Topic of the video
        #[arg(short, long, default_value = "psychologie")]
        topic: String,

        /// Script style: viral, docu or quiz
        #[arg(short, long, default_value = "viral")]
        style: String,

        /// Target duration in seconds
        #[arg(short, long, default_value_t = 45)]
        duration: i64,
    },

    /// Lint a script file and print the issues
    Lint {
        /// Path to a Script JSON file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Export a script file to a text artifact
    Export {
        /// Path to a Script JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Format: storyboard, captions, voiceover or shotlist
        #[arg(short, long, default_value = "storyboard")]
        format: String,

        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_script(path: &PathBuf) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let value = force_json(&content).context("input is not valid JSON")?;
    Script::from_model_value(value).ok_or_else(|| anyhow!("input is not a Script object"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env();
    let state = Arc::new(ServiceState::new(config));

    let args = Cli::parse();

    match args.command {
        Commands::Serve { port } => {
            info!("--- SCRIPTFORGE SCRIPT SERVICE v0.1.1 ---");
            server::start_server(port, state).await;
        }
        Commands::Generate { topic, style, duration } => {
            let built = prompt::build_generation_prompt(&topic, &style, duration);
            let raw = match state.llm.generate(&built).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("[CLI] model call failed, degrading: {}", e);
                    String::new()
                }
            };
            let mut script = force_json(&raw)
                .ok()
                .and_then(Script::from_model_value)
                .unwrap_or_else(|| Script::skeleton(&topic, &style, duration));
            normalize(&mut script, &style, duration, &topic);
            println!("{}", serde_json::to_string_pretty(&script)?);
        }
        Commands::Lint { input } => {
            let script = load_script(&input)?;
            let issues = lint(&script);
            if issues.is_empty() {
                println!("Aucun problème détecté.");
            } else {
                for issue in issues {
                    println!("- {issue}");
                }
            }
        }
        Commands::Export { input, format, output } => {
            let mut script = load_script(&input)?;
            let style = script.style.clone();
            let duration_sec = script.duration_sec;
            let topic = script.title.clone();
            normalize(&mut script, &style, duration_sec, &topic);

            let content = match format.as_str() {
                "captions" => build_subtitles(&script),
                "voiceover" => build_voiceover(&script),
                "shotlist" => build_shot_list(&script),
                "storyboard" => build_storyboard(&script),
                other => return Err(anyhow!("unknown format '{other}'")),
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    info!("[CLI] Export saved: {}", path.display());
                }
                None => print!("{content}"),
            }
        }
    }

    Ok(())
}
