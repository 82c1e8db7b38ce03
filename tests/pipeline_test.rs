//! End-to-end tests for the discovery -> scan -> report pipeline

use std::fs;
use std::path::Path;
use volscan::render::render_text;
use volscan::services::ranker::{partition, rank};
use volscan::*;

fn write_trades(dir: &Path, instrument: &str, prices: &[&str]) {
    let body: String = prices
        .iter()
        .enumerate()
        .map(|(i, price)| format!("{},10:00:{:02},{},1\n", instrument, i, price))
        .collect();
    fs::write(dir.join(format!("TICKER_{}.csv", instrument)), body).unwrap();
}

/// `count` instruments with distinct non-zero volatility plus `zeros` flat ones.
fn populate(dir: &Path, count: usize, zeros: usize) {
    for i in 0..count {
        let high = format!("{}", 100 + (i + 1) * 10);
        write_trades(dir, &format!("V{:02}", i), &["100", &high, "105"]);
    }
    for i in 0..zeros {
        write_trades(dir, &format!("Z{:02}", i), &["50", "50", "50"]);
    }
}

async fn scan_dir(dir: &Path) -> ScanOutcome {
    let files = discover(dir, "csv").unwrap();
    VolatilityScanner::new(ScannerConfig {
        max_workers: 3,
        ..ScannerConfig::default()
    })
    .run(files)
    .await
}

// =========================================================================
// Scenarios
// =========================================================================

#[tokio::test]
async fn test_single_file_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write_trades(dir.path(), "AAA", &["100", "150", "120"]);

    let outcome = scan_dir(dir.path()).await;
    assert_eq!(outcome.ranked, vec![RankedEntry::new("AAA", 40.0)]);
    assert_eq!(render_text(&outcome.report), "AAA - 40.0 %\n");
}

#[tokio::test]
async fn test_zero_volatility_in_flat_list() {
    let dir = tempfile::tempdir().unwrap();
    write_trades(dir.path(), "BBB", &["50", "50", "50"]);

    let outcome = scan_dir(dir.path()).await;
    assert_eq!(render_text(&outcome.report), "BBB - 0.0 %\n");
}

#[tokio::test]
async fn test_nine_results_stay_flat() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 8, 1);

    let outcome = scan_dir(dir.path()).await;
    assert_eq!(outcome.table.len(), 9);
    assert_eq!(outcome.report, Report::Flat(outcome.ranked.clone()));
}

#[tokio::test]
async fn test_ten_results_are_bucketed() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 8, 2);

    let outcome = scan_dir(dir.path()).await;
    let Report::Buckets(buckets) = &outcome.report else {
        panic!("expected buckets, got {:?}", outcome.report);
    };

    assert_eq!(buckets.highest.len(), 3);
    assert_eq!(buckets.highest[0].instrument, "V07");
    assert_eq!(buckets.lowest.len(), 3);
    assert_eq!(buckets.lowest[2].instrument, "V00");
    assert!(buckets.lowest[0].volatility >= buckets.lowest[2].volatility);
    assert_eq!(buckets.zero, vec!["Z00".to_string(), "Z01".to_string()]);

    let text = render_text(&outcome.report);
    assert!(text.starts_with("Highest volatility:\n"));
    assert!(text.contains("Zero volatility:\n\tZ00, Z01\n"));
}

#[tokio::test]
async fn test_failed_files_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 4, 0);
    fs::write(dir.path().join("EMPTY.csv"), "").unwrap();
    fs::write(dir.path().join("WITHDRAWN.csv"), "W,t1,abc,1\nW,t2,xyz,1\n").unwrap();
    fs::write(dir.path().join("ZEROPRICE.csv"), "ZP,t1,0,1\n").unwrap();

    let outcome = scan_dir(dir.path()).await;
    assert_eq!(outcome.pool.spawned, 7);
    assert_eq!(outcome.pool.failed, 3);
    assert_eq!(outcome.table.len(), 4);
    assert!(!outcome.table.contains_key("W"));
}

#[tokio::test]
async fn test_duplicate_instrument_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), "DUP,t1,100,1\nDUP,t2,150,1\n").unwrap();
    fs::write(dir.path().join("b.csv"), "DUP,t1,50,1\n").unwrap();

    let outcome = scan_dir(dir.path()).await;
    assert_eq!(outcome.collector.received, 2);
    assert_eq!(outcome.collector.overwritten, 1);
    assert_eq!(outcome.table.len(), 1);
    let value = outcome.table["DUP"];
    assert!(value == 0.0 || value == 40.0);
}

#[tokio::test]
async fn test_backpressure_with_many_files() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 60, 5);

    let files = discover(dir.path(), "csv").unwrap();
    let outcome = VolatilityScanner::new(ScannerConfig {
        max_workers: 2,
        channel_capacity: 1,
        ..ScannerConfig::default()
    })
    .run(files)
    .await;

    assert_eq!(outcome.table.len(), 65);
    assert_eq!(outcome.pool.succeeded, 65);
}

#[tokio::test]
async fn test_legacy_price_tracking() {
    let dir = tempfile::tempdir().unwrap();
    // A leading zero price is read as "no minimum yet" in legacy mode.
    write_trades(dir.path(), "LEAD", &["0", "100", "150"]);

    let files = discover(dir.path(), "csv").unwrap();
    let legacy = VolatilityScanner::new(ScannerConfig {
        price_tracking: PriceTracking::Legacy,
        ..ScannerConfig::default()
    })
    .run(files.clone())
    .await;
    let independent = VolatilityScanner::default().run(files).await;

    assert_eq!(legacy.table["LEAD"], 40.0);
    assert_eq!(independent.table["LEAD"], 200.0);
}

// =========================================================================
// Properties
// =========================================================================

#[tokio::test]
async fn test_ranking_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 10, 3);

    let outcome = scan_dir(dir.path()).await;
    let ranked_again = rank(&outcome.table);
    assert_eq!(ranked_again, outcome.ranked);
    assert_eq!(partition(&ranked_again, 3), outcome.report);
}

#[tokio::test]
async fn test_volatility_is_non_negative() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 12, 2);

    let outcome = scan_dir(dir.path()).await;
    assert!(outcome.ranked.iter().all(|e| e.volatility >= 0.0));
    assert!(outcome
        .ranked
        .windows(2)
        .all(|w| w[0].volatility >= w[1].volatility));
}

#[test]
fn test_empty_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("readme.txt"), "not a trade log").unwrap();

    let err = discover(dir.path(), "csv").unwrap_err();
    assert!(matches!(err, VolatilityError::EmptyDirectory(_)));
}
