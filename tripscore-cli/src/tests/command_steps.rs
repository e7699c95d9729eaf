//! Behaviour-driven step definitions driving the report and admin commands.

use super::helpers::{VisitFiles, sample_visits};
use super::*;
use crate::admin::run_admin;
use crate::report::run_report;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

#[derive(Debug)]
struct CommandWorld {
    files: VisitFiles,
    visits_path: RefCell<Option<Utf8PathBuf>>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            files: VisitFiles::new(),
            visits_path: RefCell::new(None),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, command: &[&str]) -> Vec<String> {
        let mut argv = vec!["tripscore".to_owned()];
        argv.extend(command.iter().map(|&arg| arg.to_owned()));
        if let Some(path) = self.visits_path.borrow().as_ref() {
            argv.extend([format!("--{ARG_VISITS}"), path.as_str().to_owned()]);
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn run(&self, command: &[&str]) {
        let invocation = self.build_command_line(command);
        let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
        let mut buffer = self.stdout.borrow_mut();
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Report(args) => {
                run_report(args, tripscore_core::test_support::day(30), &mut *buffer)
            }
            Command::Admin(args) => run_admin(args, &mut *buffer),
        });
        self.result.replace(Some(outcome));
    }

    fn output(&self) -> Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be JSON")
    }

    fn error_field(&self) -> &'static str {
        let borrowed = self.result.borrow();
        match borrowed.as_ref().expect("result recorded") {
            Err(
                CliError::MissingArgument { field, .. } | CliError::MissingSourceFile { field, .. },
            ) => *field,
            other => panic!("expected a missing input error, found {other:?}"),
        }
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a JSON visits export for alice and bob")]
fn json_export(#[from(world)] world: &CommandWorld) {
    let path = world.files.write_json(&sample_visits());
    world.visits_path.replace(Some(path));
}

#[given("a SQLite visits database for alice and bob")]
fn sqlite_database(#[from(world)] world: &CommandWorld) {
    let path = world.files.write_sqlite(&sample_visits());
    world.visits_path.replace(Some(path));
}

#[given("the visits file does not exist")]
fn missing_visits_file(#[from(world)] world: &CommandWorld) {
    world
        .visits_path
        .replace(Some(world.files.root().join("absent.db")));
}

#[given("I request the countries of Asia")]
fn request_asia(#[from(world)] world: &CommandWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_KIND}"),
        "countries".to_owned(),
        format!("--{ARG_CONTINENT}"),
        "Asia".to_owned(),
    ]);
}

#[given("I request the countries view without a continent")]
fn request_countries_without_scope(#[from(world)] world: &CommandWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_KIND}"), "countries".to_owned()]);
}

#[when("I run the report command for alice")]
fn run_report_for_alice(#[from(world)] world: &CommandWorld) {
    world.run(&["report", "--user", "alice"]);
}

#[when("I run the admin command for top users")]
fn run_top_users(#[from(world)] world: &CommandWorld) {
    world.run(&["admin", "--kind", "top-users"]);
}

#[when("I run the admin command for suspicious visits")]
fn run_suspicious(#[from(world)] world: &CommandWorld) {
    world.run(&["admin", "--kind", "suspicious", "--limit", "5"]);
}

#[then("the command prints a total score of three")]
fn prints_total_three(#[from(world)] world: &CommandWorld) {
    let report = world.output();
    assert_eq!(report["totalScore"], 3);
    assert_eq!(report["continents"].as_array().map(Vec::len), Some(7));
}

#[then("the command prints Japan as visited")]
fn prints_japan_visited(#[from(world)] world: &CommandWorld) {
    let report = world.output();
    assert_eq!(report["continent"], "ASIA");
    let japan = report["countries"]
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["name"] == "Japan"))
        .expect("Japan row");
    assert_eq!(japan["visited"], true);
    assert_eq!(japan["score"], 1);
}

#[then("the command fails because the visits file is missing")]
fn fails_missing_file(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.error_field(), ARG_VISITS);
}

#[then("the command fails because the continent is missing")]
fn fails_missing_continent(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.error_field(), ARG_CONTINENT);
}

#[then("alice is ranked above bob")]
fn alice_above_bob(#[from(world)] world: &CommandWorld) {
    let ranking = world.output();
    let users: Vec<&str> = ranking
        .as_array()
        .expect("ranking array")
        .iter()
        .filter_map(|row| row["userId"].as_str())
        .collect();
    assert_eq!(users, ["alice", "bob"]);
    assert_eq!(ranking[0]["totalScore"], 3);
}

#[then("one suspicious visit from bob is listed")]
fn one_suspicious_visit(#[from(world)] world: &CommandWorld) {
    let output = world.output();
    let rows = output.as_array().expect("suspicious visits array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["visitId"], "b-flagged");
    assert_eq!(rows[0]["userId"], "bob");
    assert_eq!(rows[0]["scoring"], false);
}

macro_rules! register_scenario {
    ($fn_name:ident, $path:literal, $scenario_title:literal) => {
        #[scenario(path = $path, name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_scenario!(
    report_continents_from_json,
    "tests/features/report_command.feature",
    "rendering a continents report from a JSON export"
);
register_scenario!(
    report_countries_from_sqlite,
    "tests/features/report_command.feature",
    "rendering the countries of Asia from SQLite"
);
register_scenario!(
    report_missing_visits_file,
    "tests/features/report_command.feature",
    "rejecting a missing visits file"
);
register_scenario!(
    report_countries_without_continent,
    "tests/features/report_command.feature",
    "rejecting the countries view without a continent"
);
register_scenario!(
    admin_top_users,
    "tests/features/admin_command.feature",
    "ranking users by TripScore"
);
register_scenario!(
    admin_suspicious_visits,
    "tests/features/admin_command.feature",
    "listing suspicious visits"
);
