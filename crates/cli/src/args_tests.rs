// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("dvbx").chain(args.iter().copied())).unwrap()
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[parameterized(
    empty = { &[], Invocation::Help },
    help = { &["help"], Invocation::Help },
    short_help = { &["-h"], Invocation::Help },
    long_help = { &["--help"], Invocation::Help },
    version = { &["version"], Invocation::Version },
    short_version = { &["-v"], Invocation::Version },
    ps = { &["ps"], Invocation::Ps },
    stop = { &["stop"], Invocation::Stop },
    logs_primary = { &["logs"], Invocation::Logs(None) },
    logs_service = { &["logs", "db"], Invocation::Logs(Some("db".into())) },
    attach_service = { &["attach", "db"], Invocation::Attach(Some("db".into())) },
)]
fn reserved_words(args: &[&str], expected: Invocation) {
    assert_eq!(parse(args).invocation(), expected);
}

#[test]
fn unknown_word_runs_a_task_with_variables() {
    let cli = parse(&["test", "filter=unit", "--verbose=1"]);
    assert_eq!(
        cli.invocation(),
        Invocation::Run {
            task: "test".into(),
            variables: vars(&[("filter", "unit"), ("verbose", "1")])
        }
    );
}

#[test]
fn shell_takes_service_and_variables() {
    assert_eq!(
        parse(&["shell", "db"]).invocation(),
        Invocation::Shell { service: Some("db".into()), variables: IndexMap::new() }
    );
    assert_eq!(
        parse(&["shell", "user=me"]).invocation(),
        Invocation::Shell { service: None, variables: vars(&[("user", "me")]) }
    );
}

#[test]
fn file_option_precedes_the_task() {
    let cli = parse(&["-f", "ci/dvbx.yml", "build"]);
    assert_eq!(cli.file, Some(PathBuf::from("ci/dvbx.yml")));
    assert_eq!(cli.invocation(), Invocation::Run { task: "build".into(), variables: IndexMap::new() });

    let cli = parse(&["--file=other.yml", "build"]);
    assert_eq!(cli.file, Some(PathBuf::from("other.yml")));
}

#[parameterized(
    plain = { &["a=1"], &[("a", "1")] },
    dashed = { &["--a=1"], &[("a", "1")] },
    first_equals_splits = { &["url=http://x?a=b"], &[("url", "http://x?a=b")] },
    missing_value = { &["a="], &[] },
    missing_key = { &["=1"], &[] },
    bare_word = { &["verbose"], &[] },
    later_wins = { &["a=1", "a=2"], &[("a", "2")] },
)]
fn variable_parsing(args: &[&str], expected: &[(&str, &str)]) {
    assert_eq!(parse_variables(&strings(args)), vars(expected));
}
