mod commands;

use clap::{Parser, Subcommand};

use quotabar_core::Provider;

#[derive(Parser)]
#[command(
    name = "quotabar",
    version,
    about = "Claude and ChatGPT usage quotas for your terminal or Waybar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show Claude usage (5-hour and 7-day windows)
    Claude(commands::usage::UsageArgs),
    /// Show Codex usage (primary and secondary windows)
    Codex(commands::usage::UsageArgs),
    /// Create the default configuration file
    Init,
    /// Check configuration and browser cookie access
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Claude(args) => commands::usage::execute(Provider::Claude, &args),
        Commands::Codex(args) => commands::usage::execute(Provider::Codex, &args),
        Commands::Init => commands::init::execute(),
        Commands::Doctor => commands::doctor::execute(),
    }
}
