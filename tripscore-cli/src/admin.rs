//! `admin` command: analytics across every user.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripscore_scorer::AdminAnalytics;
use tripscore_scorer::analytics::TimeBucket;

use crate::output::write_json;
use crate::source::SourceConfig;
use crate::{
    ARG_BUCKET, ARG_CLUSTER_DECIMALS, ARG_FETCH_LIMIT, ARG_KIND, ARG_LIMIT, ARG_VISITS, CliError,
    ENV_ADMIN_VISITS,
};

/// Rows returned by ranked views when `--limit` is not given.
const DEFAULT_ADMIN_LIMIT: usize = 10;

/// Which analytics view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AdminKind {
    /// Visit counts per trust level, verification status, and source.
    #[default]
    Trust,
    /// Users ranked by TripScore.
    TopUsers,
    /// Newest visits flagged suspicious.
    Suspicious,
    /// Trust levels over time.
    Timeline,
    /// Places per continent across users.
    Continents,
    /// Places per country across users.
    Countries,
    /// Busiest cluster cells.
    Locations,
}

/// Width of a timeline bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum BucketArg {
    #[default]
    Day,
    Week,
    Month,
}

impl From<BucketArg> for TimeBucket {
    fn from(value: BucketArg) -> Self {
        match value {
            BucketArg::Day => Self::Day,
            BucketArg::Week => Self::Week,
            BucketArg::Month => Self::Month,
        }
    }
}

/// CLI arguments for the `admin` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Render analytics across every user's visits: trust \
                 breakdowns, suspicious visits, rankings, and usage by \
                 continent, country, or location.",
    about = "Render cross-user analytics"
)]
#[ortho_config(prefix = "TRIPSCORE")]
pub(crate) struct AdminArgs {
    /// Visits file: `.json` export or SQLite database.
    #[arg(long = ARG_VISITS, value_name = "path")]
    #[serde(default)]
    pub(crate) visits: Option<Utf8PathBuf>,
    /// View to render (defaults to `trust`).
    #[arg(long = ARG_KIND, value_enum)]
    #[serde(default)]
    pub(crate) kind: Option<AdminKind>,
    /// Rows returned by ranked views.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Timeline bucket width (defaults to `day`).
    #[arg(long = ARG_BUCKET, value_enum)]
    #[serde(default)]
    pub(crate) bucket: Option<BucketArg>,
    /// Maximum number of visits read.
    #[arg(long = ARG_FETCH_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) fetch_limit: Option<usize>,
    /// Decimal places kept when clustering coordinates into places.
    #[arg(long = ARG_CLUSTER_DECIMALS, value_name = "digits")]
    #[serde(default)]
    pub(crate) cluster_decimals: Option<u8>,
}

impl AdminArgs {
    pub(crate) fn into_config(self) -> Result<AdminConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AdminConfig::try_from(merged)
    }
}

/// Resolved `admin` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdminConfig {
    pub(crate) source: SourceConfig,
    pub(crate) kind: AdminKind,
    pub(crate) limit: usize,
    pub(crate) bucket: TimeBucket,
}

impl TryFrom<AdminArgs> for AdminConfig {
    type Error = CliError;

    fn try_from(args: AdminArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            source: SourceConfig::from_parts(
                args.visits,
                ENV_ADMIN_VISITS,
                args.fetch_limit,
                args.cluster_decimals,
            )?,
            kind: args.kind.unwrap_or_default(),
            limit: args.limit.unwrap_or(DEFAULT_ADMIN_LIMIT),
            bucket: args.bucket.unwrap_or_default().into(),
        })
    }
}

pub(crate) fn run_admin(args: AdminArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.source.validate_sources()?;
    execute_admin(&config, writer)
}

/// Run a resolved analytics view against its visit source.
pub(crate) fn execute_admin(config: &AdminConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let store = config.source.open_store()?;
    let analytics = AdminAnalytics::with_config(&*store, config.source.engine);
    match config.kind {
        AdminKind::Trust => write_json(writer, &analytics.trust_breakdown()?),
        AdminKind::TopUsers => write_json(writer, &analytics.top_users(config.limit)?),
        AdminKind::Suspicious => write_json(writer, &analytics.suspicious_visits(config.limit)?),
        AdminKind::Timeline => write_json(writer, &analytics.trust_timeline(config.bucket)?),
        AdminKind::Continents => write_json(writer, &analytics.continent_breakdown()?),
        AdminKind::Countries => write_json(writer, &analytics.country_breakdown()?),
        AdminKind::Locations => {
            write_json(writer, &analytics.location_breakdown(config.limit)?)
        }
    }
}
