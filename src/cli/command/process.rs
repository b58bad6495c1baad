//! Process stage: raw store → cleaned tables → JSON artifacts.

use std::{fs, path::Path};

use anyhow::{anyhow, Result};

use crate::{
    dataset::Dataset,
    output::{save_annual, save_regional},
    table::Table,
};

use super::{output_store_dir, raw_store_dir, BatchSummary};

/// Builds both output artifacts from the raw store. A failure in one output
/// is logged and does not abort the other.
pub fn process() -> Result<BatchSummary> {
    let raw_dir = raw_store_dir();
    let output_dir = output_store_dir();
    fs::create_dir_all(&output_dir)?;

    let mut summary = BatchSummary::new("process");

    let annual_path = output_dir.join("global-annual.json");
    match process_annual(&raw_dir.join("global.csv"), &annual_path) {
        Ok(()) => {
            println!("Processed global data saved to `{}`", annual_path.display());
            summary.record_success("global-annual");
        }
        Err(e) => {
            eprintln!("Error processing global data: {:#}", e);
            summary.record_failure("global-annual");
        }
    }

    let regional_path = output_dir.join("regional.json");
    match process_regional(&raw_dir.join("zonal.csv"), &regional_path) {
        Ok(()) => {
            println!(
                "Processed regional data saved to `{}`",
                regional_path.display()
            );
            summary.record_success("regional");
        }
        Err(e) => {
            eprintln!("Error processing regional data: {:#}", e);
            summary.record_failure("regional");
        }
    }

    Ok(summary)
}

fn process_annual(raw_path: &Path, output_path: &Path) -> Result<()> {
    let table = Table::from_csv(raw_path, header_skip("global")?)?;
    save_annual(&table, output_path)?;

    Ok(())
}

fn process_regional(raw_path: &Path, output_path: &Path) -> Result<()> {
    let table = Table::from_csv(raw_path, header_skip("zonal")?)?;
    save_regional(&table, output_path)?;

    Ok(())
}

fn header_skip(name: &str) -> Result<usize> {
    Dataset::by_name(name)
        .map(|dataset| dataset.header_skip)
        .ok_or_else(|| anyhow!("unknown dataset `{}`", name))
}

// -- Tests -------------------------------------------------------------------
