use crate::reports::{run_lead_report, run_roi_projection, LeadReportArgs, RoiProjectionArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Insight",
    about = "Score marketing leads and project customer ROI from the command line",
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
    /// Work with lead exports
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
    /// Run the ROI calculator
    Roi {
        #[command(subcommand)]
        command: RoiCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// Score every lead in a CSV export and print the ranked pipeline
    Score(LeadReportArgs),
}

#[derive(Subcommand, Debug)]
enum RoiCommand {
    /// Project savings, implementation cost and payback for a business profile
    Project(RoiProjectionArgs),
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
        Command::Leads {
            command: LeadsCommand::Score(args),
        } => run_lead_report(args),
        Command::Roi {
            command: RoiCommand::Project(args),
        } => run_roi_projection(args),
    }
}
