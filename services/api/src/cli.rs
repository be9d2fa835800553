use crate::craft::{run_craft, CraftArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use outreach_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Sourcing Email Crafter",
    about = "Draft, score, and refine personalized recruiting outreach e-mails",
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
    /// Craft a single e-mail from a JSON request file and print the result
    Craft(CraftArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Craft(args) => run_craft(args).await,
    }
}
