//! Stage bodies
//!
//! Each function loads what it needs from disk, does its work, writes its
//! artifact atomically and logs statistics. Returned values are for callers
//! that want the in-memory result too.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::logic::catalog::{RuleCatalog, Rule, Severity};
use crate::logic::config::PipelineConfig;
use crate::logic::dataset::{
    read_json, read_jsonl, write_json, write_jsonl, DatasetLayout, StagedWrites,
};
use crate::logic::evaluator::{evaluate, summarize, LabelSummary, LabeledRecord};
use crate::logic::features::{augment_all, verify_features, FeatureRecord, LayoutInfo, FEATURE_LAYOUT};
use crate::logic::generator::{
    default_permission_targets, default_ssh_domains, generate_all, Configuration, GeneratedConfigs,
};
use crate::logic::split::{class_fractions, split_dataset, DatasetSplits, Partition, SplitManifest};

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(PipelineError::io(path, e)),
        _ => Ok(()),
    }
}

fn log_distribution(label: &str, counts: &BTreeMap<Severity, usize>) {
    let parts: Vec<String> = counts.iter().map(|(s, n)| format!("{}={}", s, n)).collect();
    log::info!("  {}: {}", label, parts.join(", "));
}

// ============================================================================
// PHASE 1
// ============================================================================

/// Persist the built-in benchmark table as the rule catalog
pub fn extract_rules(layout: &DatasetLayout) -> Result<RuleCatalog> {
    let catalog = RuleCatalog::builtin();
    let path = layout.catalog();
    write_jsonl(&path, catalog.rules())?;

    log::info!("Extracted {} rules to {}", catalog.len(), path.display());
    log_distribution("By severity", &catalog.severity_counts());
    for (category, count) in catalog.category_counts() {
        log::info!("  Category {}: {}", category, count);
    }

    Ok(catalog)
}

// ============================================================================
// PHASE 2
// ============================================================================

pub fn generate(layout: &DatasetLayout, config: &PipelineConfig) -> Result<GeneratedConfigs> {
    let batch = generate_all(
        config.generation_seed,
        config.window,
        &default_ssh_domains(),
        &default_permission_targets(),
    )?;

    let ssh_path = layout.ssh_configs();
    let perm_path = layout.permission_configs();
    write_json(&ssh_path, &batch.ssh)?;
    write_json(&perm_path, &batch.permissions)?;

    log::info!("Generated {} SSH configurations -> {}", batch.ssh.len(), ssh_path.display());
    log::info!(
        "Generated {} file permission configurations -> {}",
        batch.permissions.len(),
        perm_path.display()
    );
    let vulnerable = batch.vulnerable();
    log::info!(
        "Total: {} ({} vulnerable, {} secure)",
        batch.total(),
        vulnerable,
        batch.total() - vulnerable
    );

    Ok(batch)
}

// ============================================================================
// PHASE 3
// ============================================================================

pub fn label(layout: &DatasetLayout) -> Result<LabelSummary> {
    let rules: Vec<Rule> = read_jsonl(&layout.catalog())?;
    let catalog = RuleCatalog::new(rules)?;

    let mut configs: Vec<Configuration> = read_json(&layout.ssh_configs())?;
    let permissions: Vec<Configuration> = read_json(&layout.permission_configs())?;
    configs.extend(permissions);
    log::debug!("Loaded {} rules and {} configurations", catalog.len(), configs.len());

    let records = evaluate(&configs, &catalog)?;
    let path = layout.labeled();
    write_jsonl(&path, &records)?;

    let summary = summarize(&configs, &records);
    log::info!("Labeled {} records -> {}", summary.total, path.display());
    log::info!(
        "  Vulnerable: {} / Compliant: {}",
        summary.vulnerable,
        summary.total - summary.vulnerable
    );
    log_distribution("By severity", &summary.by_severity);
    for config_id in &summary.disagreements {
        log::warn!("{}: configuration severity differs from its worst finding", config_id);
    }

    Ok(summary)
}

// ============================================================================
// PHASE 4
// ============================================================================

pub fn features(layout: &DatasetLayout) -> Result<Vec<FeatureRecord>> {
    let labeled_path = layout.labeled();
    let labeled: Vec<LabeledRecord> = read_jsonl(&labeled_path)?;

    if let Some(index) = labeled.iter().position(|r| !r.is_consistent()) {
        return Err(PipelineError::schema(
            format!("{}:{}", labeled_path.display(), index + 1),
            "is_compliant, is_vulnerable and severity disagree",
        ));
    }

    let records = augment_all(&labeled);
    let path = layout.features();
    write_jsonl(&path, &records)?;
    write_json(&layout.feature_layout(), &LayoutInfo::current())?;

    log::info!(
        "Added {} feature columns to {} records -> {}",
        FEATURE_LAYOUT.len(),
        records.len(),
        path.display()
    );
    for (index, name) in FEATURE_LAYOUT.iter().enumerate() {
        let set = records.iter().filter(|r| r.vector()[index] == 1).count();
        log::debug!("  {}: {}/{}", name, set, records.len());
    }

    Ok(records)
}

// ============================================================================
// PHASE 5
// ============================================================================

pub fn split(layout: &DatasetLayout, config: &PipelineConfig) -> Result<DatasetSplits> {
    config.ratios.validate()?;

    let layout_path = layout.feature_layout();
    let stored: LayoutInfo = read_json(&layout_path)?;
    if !stored.is_current() {
        return Err(PipelineError::schema(
            layout_path.display().to_string(),
            format!(
                "feature layout v{} (hash {:08x}) does not match current v{} (hash {:08x})",
                stored.version,
                stored.hash,
                LayoutInfo::current().version,
                LayoutInfo::current().hash
            ),
        ));
    }

    let features_path = layout.features();
    let records: Vec<FeatureRecord> = read_jsonl(&features_path)?;
    verify_features(&records, &features_path.display().to_string())?;
    log::info!("Loaded {} records from {}", records.len(), features_path.display());

    let splits = split_dataset(records, &config.ratios, config.split_seed)?;
    let manifest = SplitManifest::build(&splits, &config.ratios, config.split_seed);

    // Manifest goes last: it only exists next to a complete set of partitions
    let mut batch = StagedWrites::new();
    for partition in Partition::ALL {
        batch.jsonl(&layout.split(partition), splits.get(partition))?;
    }
    batch.json(&layout.split_manifest(), &manifest)?;
    remove_stale(&layout.split_manifest())?;
    batch.commit()?;

    for partition in Partition::ALL {
        let rows = splits.get(partition);

        let fractions: Vec<String> = class_fractions(rows)
            .iter()
            .map(|(s, f)| format!("{}={:.3}", s, f))
            .collect();
        log::info!(
            "  {:<10} {:>5} records ({:>5.1}%)  {}",
            partition.as_str(),
            rows.len(),
            100.0 * rows.len() as f64 / splits.total().max(1) as f64,
            fractions.join(", ")
        );
    }

    log::info!("Split manifest -> {}", layout.split_manifest().display());

    Ok(splits)
}
