//! Command-line interface for querying TripScores offline.
//!
//! `tripscore report` renders one user's continents, countries, country
//! details, or travel map; `tripscore admin` renders the cross-user
//! analytics. Both read visits from a JSON export or a SQLite database and
//! print pretty JSON on stdout. Every option can also come from a
//! configuration file or a `TRIPSCORE_*` environment variable.
#![forbid(unsafe_code)]

use chrono::Utc;
use clap::{Parser, Subcommand};

mod admin;
mod error;
mod output;
mod report;
mod source;

use admin::{AdminArgs, run_admin};
pub use error::CliError;
use report::{ReportArgs, run_report};

const ARG_VISITS: &str = "visits";
const ARG_FETCH_LIMIT: &str = "fetch-limit";
const ARG_CLUSTER_DECIMALS: &str = "cluster-decimals";
const ARG_KIND: &str = "kind";
const ARG_USER: &str = "user";
const ARG_CONTINENT: &str = "continent";
const ARG_COUNTRY: &str = "country";
const ARG_LIMIT: &str = "limit";
const ARG_BUCKET: &str = "bucket";
const ENV_REPORT_VISITS: &str = "TRIPSCORE_CMDS_REPORT_VISITS";
const ENV_REPORT_USER: &str = "TRIPSCORE_CMDS_REPORT_USER";
const ENV_REPORT_CONTINENT: &str = "TRIPSCORE_CMDS_REPORT_CONTINENT";
const ENV_REPORT_COUNTRY: &str = "TRIPSCORE_CMDS_REPORT_COUNTRY";
const ENV_ADMIN_VISITS: &str = "TRIPSCORE_CMDS_ADMIN_VISITS";

/// Run the TripScore CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, the visit source cannot
/// be read, or the query fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Report(args) => run_report(args, Utc::now(), &mut stdout),
        Command::Admin(args) => run_admin(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripscore",
    about = "Compute TripScores and travel analytics from geotagged visits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one user's score reports.
    Report(ReportArgs),
    /// Render analytics across every user.
    Admin(AdminArgs),
}

#[cfg(test)]
mod tests;
