use clap::{Parser, Subcommand};
use jsonbudget_lib::{commands, VERSION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jsonbudget")]
#[command(about = "Keep large JSON API responses inside an agent's context budget")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a response as the agent sees it: outline plus limited data
    Render {
        /// JSON file to read (stdin when omitted)
        file: Option<PathBuf>,
        /// Tool name used in the header and archive filename
        #[arg(long)]
        tool: Option<String>,
        /// Archive the full response into this directory
        #[arg(long)]
        save_dir: Option<PathBuf>,
        /// Call parameter as key=value (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
        /// Largest array kept in full
        #[arg(long)]
        max_items: Option<usize>,
    },

    /// Print the structure outline of a response
    Structure {
        /// JSON file to read (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Show which array field exceeds the budget
    Locate {
        /// JSON file to read (stdin when omitted)
        file: Option<PathBuf>,
        /// Largest array kept in full
        #[arg(long)]
        max_items: Option<usize>,
    },
}

fn init_tracing() {
    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { file, tool, save_dir, params, max_items } => {
            commands::render::run(file, tool, save_dir, params, max_items)
        }
        Commands::Structure { file } => commands::inspect::structure(file),
        Commands::Locate { file, max_items } => commands::inspect::locate(file, max_items),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
