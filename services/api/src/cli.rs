use crate::demo::{run_demo, run_shortlist, DemoArgs, ShortlistArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dugout::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Dugout",
    about = "Score football coaches against club vacancies and run the recruiter API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank a roster CSV against vacancy requirements read from JSON
    Shortlist(ShortlistArgs),
    /// Walk through club, vacancy, shortlist and mandate creation in memory
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Roster CSV to import before accepting requests
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Shortlist(args) => run_shortlist(args),
        Command::Demo(args) => run_demo(args),
    }
}
