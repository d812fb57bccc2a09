//! Tests for the report pipeline

use super::{generate, mean_warning, ReportOutcome};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::results::ResultTable;
use crate::visualization::{fonts_available, PanelContent};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RESULTS: &str = "BenchmarkDotNet.Artifacts/results";

fn write_results(root: &Path, name: &str, content: &str) -> PathBuf {
    let dir = root.join(RESULTS);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config_for(dir: &TempDir) -> ReportConfig {
    ReportConfig::new(dir.path())
        .with_output(dir.path().join("assets/overview.png"))
        .with_size(800, 800)
}

#[test]
fn test_no_results_found() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    let err = generate(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::NoResultsFound { .. })
    ));
    assert!(!config.output.exists());
}

#[test]
fn test_empty_result_set_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = write_results(
        dir.path(),
        "Benchmarks.Bench-report.csv",
        "Method,FileName,Mean,Allocated\n",
    );
    let config = config_for(&dir);

    let outcome = generate(&config).unwrap();
    assert_eq!(outcome, ReportOutcome::Empty { source });
    assert!(!config.output.exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir).with_patterns(Vec::<String>::new());

    let err = generate(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::Config(_))
    ));
}

#[test]
fn test_full_run_writes_chart() {
    if !fonts_available() {
        eprintln!("skipping: no system font available");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_results(
        dir.path(),
        "Benchmarks.Bench-report.csv",
        "Method,FileName,Mean,Error,Allocated\n\
         A,f1,100 ms,1 ms,1 MB\n\
         B,f1,200 ms,1 ms,2 MB\n\
         A,f2,50 ms,1 ms,512 KB\n\
         B,f2,NA,NA,NA\n",
    );
    let config = config_for(&dir);

    match generate(&config).unwrap() {
        ReportOutcome::Written { output, chart, .. } => {
            assert_eq!(output, config.output);
            assert!(fs::metadata(&output).unwrap().len() > 0);

            let PanelContent::Bars(time) = &chart.time.content else {
                panic!("Expected time bars, got {:?}", chart.time.content);
            };
            assert_eq!(time.samples, vec!["f1", "f2"]);
            assert_eq!(time.methods, vec!["A", "B"]);
            assert_eq!(time.get("f1", "A"), Some(100.0));
            assert_eq!(time.get("f1", "B"), Some(200.0));
            assert_eq!(time.get("f2", "A"), Some(50.0));
            assert_eq!(time.get("f2", "B"), None);

            let PanelContent::Bars(memory) = &chart.memory.content else {
                panic!("Expected memory bars, got {:?}", chart.memory.content);
            };
            assert_eq!(memory.get("f2", "A"), Some(0.5));
        }
        other => panic!("Expected Written, got {:?}", other),
    }
}

#[test]
fn test_missing_allocated_still_writes_chart() {
    if !fonts_available() {
        eprintln!("skipping: no system font available");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_results(
        dir.path(),
        "Benchmarks.Bench-report.csv",
        "Method,FileName,Mean\nA,f1,1 ms\nB,f1,2 ms\n",
    );
    let config = config_for(&dir);

    match generate(&config).unwrap() {
        ReportOutcome::Written { output, chart, .. } => {
            assert!(output.exists());
            assert!(chart.time.has_data());
            assert!(!chart.memory.has_data());
        }
        other => panic!("Expected Written, got {:?}", other),
    }
}

#[test]
fn test_output_is_overwritten() {
    if !fonts_available() {
        eprintln!("skipping: no system font available");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_results(
        dir.path(),
        "Benchmarks.Bench-report.csv",
        "Method,FileName,Mean,Allocated\nA,f1,1 ms,1 KB\n",
    );
    let config = config_for(&dir).with_output(dir.path().join("overview.svg"));
    fs::write(&config.output, "stale").unwrap();

    generate(&config).unwrap();
    let content = fs::read_to_string(&config.output).unwrap();
    assert!(content.contains("<svg"));
    assert!(!content.starts_with("stale"));
}

#[test]
fn test_missing_method_column_still_writes_chart() {
    if !fonts_available() {
        eprintln!("skipping: no system font available");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_results(
        dir.path(),
        "Benchmarks.Bench-report.csv",
        "FileName,Mean,Allocated\nf1,1 ms,1 KB\n",
    );
    let config = config_for(&dir);

    match generate(&config).unwrap() {
        ReportOutcome::Written { output, chart, .. } => {
            assert!(output.exists());
            let expected = PanelContent::Placeholder("Method column not found in results".into());
            assert_eq!(chart.time.content, expected);
            assert_eq!(chart.memory.content, expected);
        }
        other => panic!("Expected Written, got {:?}", other),
    }
}

#[test]
fn test_overflowing_cells_still_write_chart() {
    if !fonts_available() {
        eprintln!("skipping: no system font available");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_results(
        dir.path(),
        "Benchmarks.Bench-report.csv",
        "Method,FileName,Mean,Allocated\nA,f1,1e308 s,1 KB\nB,f1,2 ms,1e306 GB\n",
    );
    let config = config_for(&dir);

    match generate(&config).unwrap() {
        ReportOutcome::Written { output, chart, .. } => {
            assert!(fs::metadata(&output).unwrap().len() > 0);
            assert!(chart.time.has_data());
            assert!(chart.memory.has_data());
        }
        other => panic!("Expected Written, got {:?}", other),
    }
}

#[test]
fn test_mean_warning_names_missing_column() {
    let table = ResultTable::from_reader("Method,FileName,Allocated\nA,f1,1 KB\n".as_bytes(), b',')
        .unwrap();
    let warning = mean_warning(&table).unwrap();
    assert!(warning.starts_with("'Mean' column not found"), "{}", warning);
    assert!(!warning.contains("NA"));
}

#[test]
fn test_mean_warning_all_na() {
    let table = ResultTable::from_reader("Method,FileName,Mean\nA,f1,NA\n".as_bytes(), b',')
        .unwrap();
    let warning = mean_warning(&table).unwrap();
    assert!(warning.starts_with("All 'Mean' values are NA"), "{}", warning);
}

#[test]
fn test_mean_warning_absent_with_values() {
    let table = ResultTable::from_reader("Method,FileName,Mean\nA,f1,1 ms\n".as_bytes(), b',')
        .unwrap();
    assert_eq!(mean_warning(&table), None);
}
