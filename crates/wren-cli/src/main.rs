use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wren-cli", version, about = "Wren browser core CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate app lifecycle transitions
    Lifecycle {
        #[command(subcommand)]
        action: commands::lifecycle::LifecycleAction,
    },
    /// Rating prompt engine
    Rating {
        #[command(subcommand)]
        action: commands::rating::RatingAction,
    },
    /// Days-used tracking
    Usage {
        #[command(subcommand)]
        action: commands::usage::UsageAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Lifecycle { action } => commands::lifecycle::run(action),
        Commands::Rating { action } => commands::rating::run(action),
        Commands::Usage { action } => commands::usage::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
