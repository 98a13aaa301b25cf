// tests/unit_trend.rs
//! Tests for trend logs and decline streaks.

use chrono::NaiveDate;
use registry_centrality::dates;
use registry_centrality::error::CentralityError;
use registry_centrality::trend::{
    evaluate, is_tracked_name, Evaluation, TrendRecord, TrendStore, TrendTracker,
};
use std::fs;
use tempfile::TempDir;

fn month_ts(month: u32) -> i64 {
    let year = 2020 + i32::try_from((month - 1) / 12).unwrap();
    let month = (month - 1) % 12 + 1;
    dates::epoch_seconds(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
}

fn record(timestamp: i64, rank: u64, streak: Option<u32>) -> TrendRecord {
    TrendRecord {
        timestamp,
        rank,
        decline_streak: streak,
    }
}

#[test]
fn test_steady_decline_starts_and_extends_streak() {
    let temp = TempDir::new().unwrap();
    let tracker = TrendTracker::new(temp.path());

    for (i, rank) in [10, 20, 30, 40, 50].into_iter().enumerate() {
        let outcome = tracker
            .record("left-pad", month_ts(u32::try_from(i).unwrap() + 1), rank)
            .unwrap();
        assert_eq!(outcome.record.decline_streak, None);
        assert!(matches!(
            outcome.evaluation,
            Evaluation::InsufficientHistory { .. }
        ));
    }

    let sixth = tracker.record("left-pad", month_ts(6), 60).unwrap();
    assert_eq!(sixth.record.decline_streak, Some(1));
    match sixth.evaluation {
        Evaluation::Evaluated { slope, p_value, .. } => {
            assert!(slope > 0.0);
            assert!(p_value < 0.001);
        }
        Evaluation::InsufficientHistory { .. } => panic!("expected an evaluation"),
    }

    let seventh = tracker.record("left-pad", month_ts(7), 70).unwrap();
    assert_eq!(seventh.record.decline_streak, Some(2));

    let content = fs::read_to_string(temp.path().join("left-pad.csv")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], format!("{},10,", month_ts(1)));
    assert_eq!(lines[5], format!("{},60,1", month_ts(6)));
    assert_eq!(lines[6], format!("{},70,2", month_ts(7)));
}

#[test]
fn test_streak_builds_on_previous_record() {
    let priors: Vec<_> = [10, 20, 30, 40, 50]
        .into_iter()
        .enumerate()
        .map(|(i, rank)| {
            let streak = if i == 4 { Some(3) } else { None };
            record(month_ts(u32::try_from(i).unwrap() + 1), rank, streak)
        })
        .collect();

    assert_eq!(evaluate(&priors, month_ts(6), 60).streak(), Some(4));
}

#[test]
fn test_improving_rank_resets_streak() {
    let temp = TempDir::new().unwrap();
    let tracker = TrendTracker::new(temp.path());
    let store = tracker.store();
    for (i, rank) in [50, 40, 30, 20, 10].into_iter().enumerate() {
        let streak = if i == 4 { Some(2) } else { None };
        store
            .append(
                "chalk",
                &record(month_ts(u32::try_from(i).unwrap() + 1), rank, streak),
            )
            .unwrap();
    }

    let outcome = tracker.record("chalk", month_ts(6), 5).unwrap();
    assert_eq!(outcome.evaluation.streak(), Some(0));
    assert_eq!(outcome.record.decline_streak, None);

    let content = fs::read_to_string(store.path_for("chalk")).unwrap();
    assert_eq!(content.lines().last().unwrap(), format!("{},5,", month_ts(6)));
}

#[test]
fn test_rerecording_a_month_leaves_the_log_alone() {
    let temp = TempDir::new().unwrap();
    let tracker = TrendTracker::new(temp.path());
    for (i, rank) in [10, 20, 30, 40, 50, 60].into_iter().enumerate() {
        tracker
            .record("left-pad", month_ts(u32::try_from(i).unwrap() + 1), rank)
            .unwrap();
    }

    let again = tracker.record("left-pad", month_ts(6), 1).unwrap();
    assert_eq!(again.record, record(month_ts(6), 60, Some(1)));
    assert_eq!(again.evaluation.streak(), Some(1));

    let earlier = tracker.record("left-pad", month_ts(3), 99).unwrap();
    assert_eq!(earlier.record.timestamp, month_ts(6));

    let content = fs::read_to_string(temp.path().join("left-pad.csv")).unwrap();
    assert_eq!(content.lines().count(), 6);
    assert_eq!(content.lines().last().unwrap(), format!("{},60,1", month_ts(6)));
}

#[test]
fn test_noisy_history_is_not_a_decline() {
    let priors: Vec<_> = [10, 40, 12, 38, 15]
        .into_iter()
        .enumerate()
        .map(|(i, rank)| record(month_ts(u32::try_from(i).unwrap() + 1), rank, Some(1)))
        .collect();

    assert_eq!(evaluate(&priors, month_ts(6), 30).streak(), Some(0));
}

#[test]
fn test_short_history_is_not_evaluated() {
    let temp = TempDir::new().unwrap();
    let tracker = TrendTracker::new(temp.path());
    for (i, rank) in [3, 2, 1].into_iter().enumerate() {
        tracker
            .record("mocha", month_ts(u32::try_from(i).unwrap() + 1), rank)
            .unwrap();
    }

    let tail = tracker.tail("mocha", 5).unwrap();
    assert_eq!(tail.len(), 3);
    assert!(tail.iter().all(|r| r.decline_streak.is_none()));
    assert_eq!(
        evaluate(&tail, month_ts(4), 9),
        Evaluation::InsufficientHistory { priors: 3 }
    );
}

#[test]
fn test_scoped_packages_nest_under_scope_directory() {
    let temp = TempDir::new().unwrap();
    let store = TrendStore::new(temp.path());
    assert_eq!(
        store.path_for("@babel/core"),
        temp.path().join("@babel").join("core.csv")
    );

    store.append("@babel/core", &record(1, 7, None)).unwrap();
    assert!(temp.path().join("@babel/core.csv").is_file());
    assert_eq!(store.tail("@babel/core", 5).unwrap(), vec![record(1, 7, None)]);
}

#[test]
fn test_tail_reads_only_the_end_of_long_logs() {
    let temp = TempDir::new().unwrap();
    let store = TrendStore::new(temp.path());
    for i in 0..200u64 {
        let streak = u32::try_from(i % 4).unwrap();
        let streak = (streak > 0).then_some(streak);
        store
            .append("express", &record(1_600_000_000 + i64::try_from(i).unwrap(), i + 1, streak))
            .unwrap();
    }

    let tail = store.tail("express", 5).unwrap();
    let ranks: Vec<_> = tail.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![196, 197, 198, 199, 200]);
    assert_eq!(tail[4].decline_streak, Some(3));
    assert_eq!(tail[3].decline_streak, Some(2));
    assert_eq!(tail[2].decline_streak, None);

    assert_eq!(store.tail("express", 500).unwrap().len(), 200);
    assert!(store.tail("express", 0).unwrap().is_empty());
}

#[test]
fn test_missing_log_has_empty_tail() {
    let temp = TempDir::new().unwrap();
    let store = TrendStore::new(temp.path());
    assert!(store.tail("never-ranked", 5).unwrap().is_empty());
}

#[test]
fn test_corrupt_line_is_reported() {
    let temp = TempDir::new().unwrap();
    let store = TrendStore::new(temp.path());
    fs::write(store.path_for("broken"), "1,2,\nnot,a,record\n").unwrap();

    let err = store.tail("broken", 5).unwrap_err();
    assert!(matches!(err, CentralityError::CorruptTrendLog { .. }));
}

#[test]
fn test_record_line_format() {
    assert_eq!(record(1_580_515_200, 3, None).to_string(), "1580515200,3,");
    assert_eq!(record(1_580_515_200, 3, Some(0)).to_string(), "1580515200,3,");
    assert_eq!(record(1_580_515_200, 3, Some(2)).to_string(), "1580515200,3,2");
    assert_eq!(
        TrendRecord::parse("1580515200,3,2"),
        Some(record(1_580_515_200, 3, Some(2)))
    );
    assert_eq!(TrendRecord::parse("1580515200,3"), None);
}

#[test]
fn test_only_lowercase_names_are_tracked() {
    assert!(is_tracked_name("left-pad"));
    assert!(is_tracked_name("@types/node"));
    assert!(!is_tracked_name("JSONStream"));
    assert!(!is_tracked_name("../escaped"));
    assert!(!is_tracked_name("@scope/../up"));
}
