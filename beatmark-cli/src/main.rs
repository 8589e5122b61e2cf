mod local;
mod remote;

use std::path::PathBuf;

use anyhow::Result;
use beatmark_client::{BeatmarkClient, DEFAULT_SERVER};
use beatmark_core::generate::BeatsPerBar;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "beatmark", version, about = "Maintain beat timestamp CSVs and record beats")]
struct Cli {
    /// Directory holding beat_timestamps.csv and scene_list.txt
    #[arg(long, env = "BEATMARK_DIR", default_value = ".", global = true)]
    dir: PathBuf,

    /// Backend origin for the server commands
    #[arg(long, env = "BEATMARK_SERVER", default_value = DEFAULT_SERVER, global = true)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort every scene's beats ascending and close the gaps
    Sort,
    /// Remove all beats of the given scenes
    DeleteScene {
        #[arg(required = true)]
        scenes: Vec<String>,
    },
    /// Generate a beat grid CSV from a scene,start_sec,end_sec,bpm config
    Generate {
        config: PathBuf,
        #[arg(short, long, default_value = "beat_timestamps.csv")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "4")]
        beats: Beats,
    },
    /// List scenes known to the server
    Scenes,
    /// List WAV files served by the server
    Wavs,
    /// Show beat counts per scene
    Count {
        scene: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Record a beat at TIME seconds for SCENE
    Record { scene: String, time: f64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum Beats {
    #[value(name = "4")]
    Four,
    #[value(name = "8")]
    Eight,
}

impl From<Beats> for BeatsPerBar {
    fn from(b: Beats) -> Self {
        match b {
            Beats::Four => BeatsPerBar::Four,
            Beats::Eight => BeatsPerBar::Eight,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let files = local::BeatFiles::new(&cli.dir);
    let client = || BeatmarkClient::new(&cli.server);

    match cli.command {
        Command::Sort => local::sort(&files),
        Command::DeleteScene { scenes } => local::delete_scenes(&files, &scenes).map(|_| ()),
        Command::Generate { config, output, beats } => {
            local::generate(&config, &output, beats.into()).map(|_| ())
        }
        Command::Scenes => remote::print_scenes(&client()).await,
        Command::Wavs => remote::print_wavs(&client()).await,
        Command::Count { scene, json } => {
            remote::print_counts(&client(), scene.as_deref(), json).await
        }
        Command::Record { scene, time } => remote::record(&client(), &scene, time).await,
    }
}
