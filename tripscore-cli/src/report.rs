//! `report` command: one user's TripScore views.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripscore_core::NoMediaLookup;
use tripscore_scorer::TripScoreEngine;

use crate::output::write_json;
use crate::source::SourceConfig;
use crate::{
    ARG_CLUSTER_DECIMALS, ARG_CONTINENT, ARG_COUNTRY, ARG_FETCH_LIMIT, ARG_KIND, ARG_USER,
    ARG_VISITS, CliError, ENV_REPORT_CONTINENT, ENV_REPORT_COUNTRY, ENV_REPORT_USER,
    ENV_REPORT_VISITS,
};

/// Which per-user view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ReportKind {
    /// Score and distance per continent.
    #[default]
    Continents,
    /// Countries of one continent, visited or not.
    Countries,
    /// Places of one country, newest first.
    Country,
    /// Numbered places in visit order with travel statistics.
    TravelMap,
}

/// CLI arguments for the `report` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Render one user's TripScore. Visits are read from a JSON \
                 export or a SQLite database; every option can also come \
                 from configuration files or environment variables.",
    about = "Render a user's TripScore report"
)]
#[ortho_config(prefix = "TRIPSCORE")]
pub(crate) struct ReportArgs {
    /// Visits file: `.json` export or SQLite database.
    #[arg(long = ARG_VISITS, value_name = "path")]
    #[serde(default)]
    pub(crate) visits: Option<Utf8PathBuf>,
    /// User whose visits are scored.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// View to render (defaults to `continents`).
    #[arg(long = ARG_KIND, value_enum)]
    #[serde(default)]
    pub(crate) kind: Option<ReportKind>,
    /// Continent for the `countries` view, such as `ASIA` or `Europe`.
    #[arg(long = ARG_CONTINENT, value_name = "name")]
    #[serde(default)]
    pub(crate) continent: Option<String>,
    /// Country for the `country` view.
    #[arg(long = ARG_COUNTRY, value_name = "name")]
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Maximum number of visits read.
    #[arg(long = ARG_FETCH_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) fetch_limit: Option<usize>,
    /// Decimal places kept when clustering coordinates into places.
    #[arg(long = ARG_CLUSTER_DECIMALS, value_name = "digits")]
    #[serde(default)]
    pub(crate) cluster_decimals: Option<u8>,
}

impl ReportArgs {
    pub(crate) fn into_config(self) -> Result<ReportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReportConfig::try_from(merged)
    }
}

/// The view requested, with the scope it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReportQuery {
    Continents,
    Countries { continent: String },
    Country { country: String },
    TravelMap,
}

/// Resolved `report` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportConfig {
    pub(crate) source: SourceConfig,
    pub(crate) user: String,
    pub(crate) query: ReportQuery,
}

impl TryFrom<ReportArgs> for ReportConfig {
    type Error = CliError;

    fn try_from(args: ReportArgs) -> Result<Self, Self::Error> {
        let source = SourceConfig::from_parts(
            args.visits,
            ENV_REPORT_VISITS,
            args.fetch_limit,
            args.cluster_decimals,
        )?;
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_REPORT_USER,
        })?;
        let query = match args.kind.unwrap_or_default() {
            ReportKind::Continents => ReportQuery::Continents,
            ReportKind::Countries => ReportQuery::Countries {
                continent: args.continent.ok_or(CliError::MissingArgument {
                    field: ARG_CONTINENT,
                    env: ENV_REPORT_CONTINENT,
                })?,
            },
            ReportKind::Country => ReportQuery::Country {
                country: args.country.ok_or(CliError::MissingArgument {
                    field: ARG_COUNTRY,
                    env: ENV_REPORT_COUNTRY,
                })?,
            },
            ReportKind::TravelMap => ReportQuery::TravelMap,
        };
        Ok(Self {
            source,
            user,
            query,
        })
    }
}

pub(crate) fn run_report(
    args: ReportArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.source.validate_sources()?;
    execute_report(&config, now, writer)
}

/// Run a resolved report against its visit source.
pub(crate) fn execute_report(
    config: &ReportConfig,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let store = config.source.open_store()?;
    let engine = TripScoreEngine::with_config(&*store, NoMediaLookup, config.source.engine)?;
    let user = config.user.as_str();
    match &config.query {
        ReportQuery::Continents => write_json(writer, &engine.continents(user)?),
        ReportQuery::Countries { continent } => {
            write_json(writer, &engine.countries_of_continent(user, continent)?)
        }
        ReportQuery::Country { country } => {
            write_json(writer, &engine.country_details(user, country)?)
        }
        ReportQuery::TravelMap => write_json(writer, &engine.travel_map(user, now)?),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ReportConfig, CliError> {
    let merged = ReportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ReportConfig::try_from(merged)
}
