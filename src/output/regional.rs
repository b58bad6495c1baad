//! Reshaping of the zonal table into the regional artifact.
//!
//! Pass-through cleaning and reshaping only; no statistics are computed for
//! regional data.

use std::{collections::BTreeMap, path::Path};

use anyhow::Result;
use serde::Serialize;

use crate::table::{FormatError, Table};

/// Columns reserved for the hemisphere aggregates. Everything else in the
/// zonal table is a latitude-band zone.
const HEMISPHERE_COLUMNS: [&str; 3] = ["Glob", "NHem", "SHem"];

#[derive(Debug, Serialize)]
pub struct RegionalData {
    pub years: Vec<i32>,
    pub hemispheres: Hemispheres,
    pub zones: BTreeMap<String, Vec<Option<f64>>>,
}

#[derive(Debug, Serialize)]
pub struct Hemispheres {
    #[serde(rename = "Global")]
    pub global: Vec<Option<f64>>,
    #[serde(rename = "Northern")]
    pub northern: Vec<Option<f64>>,
    #[serde(rename = "Southern")]
    pub southern: Vec<Option<f64>>,
}

/// Builds the regional artifact from a cleaned zonal table.
pub fn build_regional(table: &Table) -> Result<RegionalData, FormatError> {
    let hemispheres = Hemispheres {
        global: table.require_column("Glob")?.to_vec(),
        northern: table.require_column("NHem")?.to_vec(),
        southern: table.require_column("SHem")?.to_vec(),
    };

    let zones = table
        .column_names()
        .iter()
        .filter(|name| !HEMISPHERE_COLUMNS.contains(&name.as_str()))
        .map(|name| {
            let series = table.column(name).expect("listed column").to_vec();
            (name.clone(), series)
        })
        .collect();

    Ok(RegionalData {
        years: table.years().to_vec(),
        hemispheres,
        zones,
    })
}

/// Builds the regional artifact and writes it to `path`.
pub fn save_regional(table: &Table, path: &Path) -> Result<()> {
    let regional = build_regional(table)?;
    super::write_json(&regional, path)?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
