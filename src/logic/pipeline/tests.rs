use std::fs;

use tempfile::tempdir;

use super::*;
use crate::logic::catalog::{builtin_rules, Severity};
use crate::logic::dataset::{read_json, read_jsonl, write_json, write_jsonl};
use crate::logic::features::{FeatureRecord, LayoutInfo};
use crate::logic::split::{SplitManifest, SplitRatios};

fn run_through(layout: &DatasetLayout, last: Stage) {
    let config = PipelineConfig::default();
    for stage in Stage::ALL {
        run_stage(stage, layout, &config).unwrap();
        if stage == last {
            break;
        }
    }
}

#[test]
fn test_full_run_produces_splits() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());

    let produced = run_all(&layout, &PipelineConfig::default()).unwrap();
    assert_eq!(produced.len(), 3);
    assert!(produced.iter().all(|(path, size)| path.is_file() && *size > 0));

    let mut total = 0;
    for partition in Partition::ALL {
        let rows: Vec<FeatureRecord> = read_jsonl(&layout.split(partition)).unwrap();
        total += rows.len();
    }
    assert_eq!(total, 30);

    let manifest: SplitManifest = read_json(&layout.split_manifest()).unwrap();
    assert_eq!(manifest.seed, 42);
    assert_eq!(manifest.total_records, 30);
    assert!(manifest.layout.is_current());
}

#[test]
fn test_intermediate_artifacts() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    run_through(&layout, Stage::Features);

    let catalog_lines = fs::read_to_string(layout.catalog()).unwrap();
    assert_eq!(catalog_lines.lines().count(), 7);
    assert!(catalog_lines.lines().next().unwrap().starts_with(r#"{"rule_id":"CIS-5.2.1","category":"SSH""#));

    let labeled = fs::read_to_string(layout.labeled()).unwrap();
    assert_eq!(labeled.lines().count(), 30);
    assert!(labeled.lines().next().unwrap().starts_with(r#"{"config_id":"SSH-0001","category":"SSH","parameter":"PermitRootLogin""#));

    let features: Vec<FeatureRecord> = read_jsonl(&layout.features()).unwrap();
    assert_eq!(features.len(), 30);
    let critical = features.iter().filter(|r| r.labeled.severity == Severity::Critical).count();
    assert_eq!(critical, 11);

    let sidecar: LayoutInfo = read_json(&layout.feature_layout()).unwrap();
    assert!(sidecar.is_current());
}

#[test]
fn test_reruns_are_byte_identical() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    run_all(&DatasetLayout::new(first.path()), &PipelineConfig::default()).unwrap();
    run_all(&DatasetLayout::new(second.path()), &PipelineConfig::default()).unwrap();

    let a = DatasetLayout::new(first.path());
    let b = DatasetLayout::new(second.path());
    for partition in Partition::ALL {
        assert_eq!(
            fs::read(a.split(partition)).unwrap(),
            fs::read(b.split(partition)).unwrap()
        );
    }
    assert_eq!(fs::read(a.labeled()).unwrap(), fs::read(b.labeled()).unwrap());
}

#[test]
fn test_out_of_order_stage_is_missing_input() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());

    match run_stage(Stage::Label, &layout, &PipelineConfig::default()) {
        Err(PipelineError::MissingInput { path }) => assert_eq!(path, layout.catalog()),
        other => panic!("Expected MissingInput, got {:?}", other),
    }
    assert!(!layout.labeled().exists());

    assert!(matches!(
        run_stage(Stage::Split, &layout, &PipelineConfig::default()),
        Err(PipelineError::MissingInput { .. })
    ));
}

#[test]
fn test_layout_mismatch_rejected() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    run_through(&layout, Stage::Features);

    let stale = LayoutInfo {
        version: 0,
        ..LayoutInfo::current()
    };
    write_json(&layout.feature_layout(), &stale).unwrap();

    match run_stage(Stage::Split, &layout, &PipelineConfig::default()) {
        Err(PipelineError::SchemaMismatch { location, .. }) => {
            assert!(location.ends_with("feature_layout.json"))
        }
        other => panic!("Expected SchemaMismatch, got {:?}", other),
    }
    assert!(!layout.split(Partition::Train).exists());
}

#[test]
fn test_tampered_features_rejected() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    run_through(&layout, Stage::Features);

    let mut records: Vec<FeatureRecord> = read_jsonl(&layout.features()).unwrap();
    records[0].feature_weak_auth ^= 1;
    write_jsonl(&layout.features(), &records).unwrap();

    assert!(matches!(
        run_stage(Stage::Split, &layout, &PipelineConfig::default()),
        Err(PipelineError::SchemaMismatch { .. })
    ));
}

#[test]
fn test_label_uses_persisted_catalog() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    run_through(&layout, Stage::Generate);

    let rules: Vec<_> = builtin_rules()
        .into_iter()
        .filter(|r| r.parameter != "PermitEmptyPasswords")
        .collect();
    write_jsonl(&layout.catalog(), &rules).unwrap();

    match run_stage(Stage::Label, &layout, &PipelineConfig::default()) {
        Err(PipelineError::MissingRule { parameter, .. }) => {
            assert_eq!(parameter, "PermitEmptyPasswords")
        }
        other => panic!("Expected MissingRule, got {:?}", other),
    }
}

#[test]
fn test_run_all_reports_failing_stage() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    let config = PipelineConfig {
        ratios: SplitRatios { train: 0.8, validation: 0.15, test: 0.15 },
        ..PipelineConfig::default()
    };

    let failure = run_all(&layout, &config).unwrap_err();
    assert_eq!(failure.stage, Stage::Split);
    assert!(matches!(failure.source, PipelineError::InvalidConfig(_)));
    assert!(failure.to_string().starts_with("stage split failed"));
    // Earlier stages still committed their artifacts
    assert!(layout.features().is_file());
}

#[test]
fn test_failed_split_leaves_previous_split_intact() {
    let dir = tempdir().unwrap();
    let layout = DatasetLayout::new(dir.path());
    run_all(&layout, &PipelineConfig::default()).unwrap();

    let train_before = fs::read(layout.split(Partition::Train)).unwrap();
    let manifest_before = fs::read(layout.split_manifest()).unwrap();

    // Block the test partition directory so its staging write fails
    let test_dir = layout.split(Partition::Test).parent().unwrap().to_path_buf();
    fs::remove_dir_all(&test_dir).unwrap();
    fs::write(&test_dir, "not a directory").unwrap();

    let reseeded = PipelineConfig { split_seed: 7, ..PipelineConfig::default() };
    assert!(matches!(
        run_stage(Stage::Split, &layout, &reseeded),
        Err(PipelineError::Io { .. })
    ));

    assert_eq!(fs::read(layout.split(Partition::Train)).unwrap(), train_before);
    assert_eq!(fs::read(layout.split_manifest()).unwrap(), manifest_before);
    let train_dir = layout.split(Partition::Train).parent().unwrap().to_path_buf();
    assert_eq!(fs::read_dir(&train_dir).unwrap().count(), 1);
}
