mod app;

use anyhow::Result;
use app::setup::{self, InputPaths};
use clap::Parser;
use coltree::config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "coltree")]
#[command(about = "Content collection tree browser", long_about = None)]
struct Args {
    /// Collection hierarchy JSON ({"data": <root>} or the bare root record)
    #[arg(value_name = "NODES", required_unless_present = "init_config")]
    nodes: Option<PathBuf>,

    /// Content status JSON ([{"contentId": ..., "status": ...}])
    #[arg(short, long, value_name = "FILE")]
    status: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial display language
    #[arg(short, long, value_name = "CODE", env = "COLTREE_LANG")]
    lang: Option<String>,

    /// Print the decorated tree as JSON instead of opening the browser
    #[arg(short, long)]
    print: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write logs to this file (stderr otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Write the default configuration to the user config path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    match args.log_file {
        Some(ref path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    if args.init_config {
        let path = config::save_config(&config::AppConfig::default(), args.config)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    // Load configuration
    let config = config::load_config(args.config)?;

    let Some(nodes) = args.nodes else {
        anyhow::bail!("No collection file given");
    };
    let paths = InputPaths {
        nodes,
        status: args.status,
    };

    if args.print {
        return setup::print_decorated(&config, &paths, args.lang.as_deref()).await;
    }

    let mut app = app::CollectionTreeApp::new(config, paths, args.lang.as_deref())?;
    let opened = app.run().await?;
    drop(app);

    for selection in opened {
        println!("{}", serde_json::to_string(&selection)?);
    }

    Ok(())
}
