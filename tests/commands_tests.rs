// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::FakeApi;
use rust_decimal::Decimal;
use std::time::Duration;
use tallyclip::api::Download;
use tallyclip::cli;
use tallyclip::commands::{dashboard, exporter, reports, settings, transactions};
use tallyclip::config::Settings;
use tallyclip::models::{ChartKind, ExportKind};
use tallyclip::render::{EMPTY_DASHBOARD, NoticeKind};
use tempfile::tempdir;

const SAMPLE: &str = r#"[
    {"type": "income", "amount": "1000", "category": "salary", "description": "pay", "date": "2025-03-01"},
    {"type": "expense", "amount": "300", "category": "food", "description": "groceries", "date": "2025-03-01"},
    {"type": "expense", "amount": "200", "category": "rent", "description": "room", "date": "2025-03-01"},
    {"type": "expense", "amount": "100", "category": "food", "description": "snacks", "date": "2025-03-02"},
    {"type": "expense", "amount": "oops", "category": "food", "description": "bad", "date": "2025-03-02"},
    {"type": "expense", "amount": "50", "category": "fun", "description": "movie", "date": "2025-04-05"}
]"#;

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some((_, sub)) => sub.clone(),
        None => panic!("no subcommand in {:?}", args),
    }
}

#[test]
fn add_with_missing_fields_sends_nothing() {
    let api = FakeApi::default();
    let sub = sub_matches(&["tallyclip", "add", "--type", "expense", "--amount", "5"]);
    let err = transactions::add(&api, &sub).unwrap_err();
    assert!(err.to_string().contains("Please fill all fields"));
    assert!(api.added.lock().unwrap().is_empty());
}

#[test]
fn add_posts_validated_transaction() {
    let api = FakeApi::default();
    let sub = sub_matches(&[
        "tallyclip",
        "add",
        "--type",
        "income",
        "--amount",
        " 1200.50 ",
        "--category",
        "salary",
        "--description",
        "March pay",
        "--date",
        "2025-03-28",
    ]);
    let notice = transactions::add(&api, &sub).unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    let added = api.added.lock().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].amount, "1200.50");
    assert_eq!(added[0].date, "2025-03-28");
    let body = serde_json::to_value(&added[0]).unwrap();
    assert_eq!(body["type"], "income");
}

#[test]
fn add_rejects_negative_amount() {
    let api = FakeApi::default();
    let sub = sub_matches(&[
        "tallyclip",
        "add",
        "--amount=-3",
        "--category",
        "food",
        "--description",
        "x",
    ]);
    assert!(transactions::add(&api, &sub).is_err());
    assert!(api.added.lock().unwrap().is_empty());
}

#[test]
fn remove_with_yes_skips_prompt() {
    let api = FakeApi::with_json(SAMPLE);
    let sub = sub_matches(&["tallyclip", "rm", "2", "--yes"]);
    let notice = transactions::remove(&api, &sub).unwrap().unwrap();
    assert_eq!(notice.text, "Transaction deleted");
    assert_eq!(*api.deleted.lock().unwrap(), vec![2]);

    let bad = sub_matches(&["tallyclip", "rm", "99", "-y"]);
    assert!(transactions::remove(&api, &bad).is_err());
}

#[test]
fn dashboard_counts_skipped_records() {
    let api = FakeApi::with_json(SAMPLE);
    let dash = dashboard::load(&api, 10).unwrap();
    assert_eq!(dash.record_count, 5);
    assert_eq!(dash.skipped, 1);
    assert_eq!(dash.report.total_expense, Decimal::from(650));
    assert_eq!(dash.report.category_breakdown[0].category, "food");
}

#[test]
fn dashboard_top_flag_limits_rows() {
    let api = FakeApi::with_json(SAMPLE);
    let sub = sub_matches(&["tallyclip", "dashboard", "--top", "1"]);
    let top = *sub.get_one::<usize>("top").unwrap();
    let dash = dashboard::load(&api, top).unwrap();
    assert_eq!(dash.report.category_breakdown.len(), 1);
}

#[test]
fn dashboard_writes_breakdown_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("breakdown.csv");
    let api = FakeApi::with_json(SAMPLE);
    let sub = sub_matches(&[
        "tallyclip",
        "dashboard",
        "--csv",
        path.to_str().unwrap(),
        "--json",
    ]);
    dashboard::handle(&api, &Settings::default(), &sub).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Category,Amount,Percentage\nfood,$400.00,61.5%\n"));
}

#[test]
fn watch_draws_every_fresh_refresh() {
    let api = FakeApi::with_json("[]");
    let mut out = Vec::new();
    let drawn = dashboard::watch_with(
        &api,
        &Settings::default(),
        Duration::from_millis(200),
        Some(3),
        &mut out,
    )
    .unwrap();
    assert_eq!(drawn, 3);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches(EMPTY_DASHBOARD).count(), 3);
}

#[test]
fn watch_discards_stale_response() {
    let api = FakeApi {
        first_list_delay: Some(Duration::from_millis(400)),
        ..FakeApi::with_json(SAMPLE)
    };
    let mut out = Vec::new();
    let drawn = dashboard::watch_with(
        &api,
        &Settings::default(),
        Duration::from_millis(20),
        Some(2),
        &mut out,
    )
    .unwrap();
    assert_eq!(drawn, 1);
    assert_eq!(api.list_calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn watch_draws_when_server_is_slower_than_interval() {
    let api = FakeApi {
        list_delay: Some(Duration::from_millis(150)),
        ..FakeApi::with_json(SAMPLE)
    };
    let mut out = Vec::new();
    let drawn = dashboard::watch_with(
        &api,
        &Settings::default(),
        Duration::from_millis(50),
        Some(6),
        &mut out,
    )
    .unwrap();
    assert!(drawn > 1, "only {drawn} of 6 refreshes drawn");
}

#[test]
fn local_and_server_reports_agree() {
    let api = FakeApi::with_json(SAMPLE);
    let server = reports::monthly(&api, 2025, 3, false).unwrap();
    let local = reports::monthly(&api, 2025, 3, true).unwrap();
    assert_eq!(server, local);
    assert_eq!(local.balance, Decimal::from(400));

    let err = reports::monthly(&api, 2025, 7, true).unwrap_err();
    assert_eq!(err.to_string(), "No transactions found for 2025-07");
}

#[test]
fn analysis_is_untruncated_and_monthly() {
    let api = FakeApi::with_json(SAMPLE);
    let april = reports::analysis(&api, 2025, 4, true).unwrap();
    assert_eq!(april.len(), 1);
    assert_eq!(april[0].category, "fun");
    assert_eq!(april[0].percentage, Decimal::from(100));
    let march = reports::analysis(&api, 2025, 3, false).unwrap();
    assert_eq!(march.len(), 2);
}

#[test]
fn export_writes_file_and_surfaces_not_found() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("all.csv");
    let api = FakeApi {
        export_body: Some(Download {
            filename: Some("budget_transactions_20250301.csv".into()),
            bytes: b"type,amount\nincome,1\n".to_vec(),
        }),
        ..FakeApi::default()
    };
    let path = exporter::export_to(&api, ExportKind::All, Some(&out)).unwrap();
    assert_eq!(path, out);
    assert_eq!(std::fs::read(&out).unwrap(), b"type,amount\nincome,1\n");

    let missing = FakeApi::default();
    let err = exporter::export_to(&missing, ExportKind::All, Some(&out)).unwrap_err();
    assert!(format!("{:#}", err).contains("No transactions to export"));
}

#[test]
fn export_kind_parses_cli_values() {
    assert_eq!(exporter::export_kind("all", 2025, 3).unwrap(), ExportKind::All);
    assert_eq!(
        exporter::export_kind("analysis", 2025, 3).unwrap(),
        ExportKind::Analysis {
            year: 2025,
            month: 3
        }
    );
    assert!(exporter::export_kind("pdf", 2025, 3).is_err());
}

#[test]
fn chart_is_decoded_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("pie.png");
    let api = FakeApi {
        chart_image: Some("data:image/png;base64,iVBORw==".into()),
        ..FakeApi::default()
    };
    let path = exporter::chart_to(&api, ChartKind::Category, 2025, 3, Some(&out)).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), vec![0x89, b'P', b'N', b'G']);
}

#[test]
fn global_server_flag_overrides_settings() {
    let matches = cli::build_cli().get_matches_from([
        "tallyclip",
        "dashboard",
        "--server",
        "http://budget.local:8080",
        "--currency-symbol",
        "€",
    ]);
    let s = Settings::default().with_overrides(&matches);
    assert_eq!(s.server_url, "http://budget.local:8080");
    assert_eq!(s.currency_symbol, "€");
    assert_eq!(s.timeout_secs, 15);
}

#[test]
fn config_set_updates_only_given_keys() {
    let sub = sub_matches(&["tallyclip", "config", "set", "--server-url", "http://x:1/"]);
    let set = match sub.subcommand() {
        Some(("set", m)) => m.clone(),
        _ => panic!("no set subcommand"),
    };
    let s = settings::apply(Settings::default(), &set);
    assert_eq!(s.server_url, "http://x:1");
    assert_eq!(s.currency_symbol, "$");
}
