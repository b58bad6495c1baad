//! Assembly of the annual global anomaly artifact.

use std::{collections::BTreeMap, path::Path};

use anyhow::Result;
use serde::Serialize;

use crate::{
    stats::fit_trend,
    table::{FormatError, Table},
};

/// The annual mean anomaly column in the source format.
const ANNUAL_COLUMN: &str = "J-D";

const TOP_YEARS: usize = 10;

#[derive(Debug, Serialize)]
pub struct AnnualData {
    pub years: Vec<i32>,
    pub temperatures: Vec<Option<f64>>,
    pub trend: Vec<f64>,
    pub statistics: Statistics,
    pub warmest_years: Vec<WarmestYear>,
    pub decadal_averages: Vec<DecadalAverage>,
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub warming_rate: f64,
    pub r_squared: f64,
    pub current_anomaly: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WarmestYear {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "J-D")]
    pub anomaly: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DecadalAverage {
    pub decade: i32,
    #[serde(rename = "J-D")]
    pub mean: f64,
}

/// Builds the annual artifact from a cleaned global table.
///
/// Rounding is applied here and nowhere earlier, so intermediate statistics
/// never compound rounding error.
pub fn build_annual(table: &Table) -> Result<AnnualData, FormatError> {
    let years = table.years();
    let temperatures = table.require_column(ANNUAL_COLUMN)?;

    let trend = fit_trend(years, temperatures);

    let current_anomaly = temperatures
        .iter()
        .rev()
        .find_map(|value| *value)
        .unwrap_or(0.0);

    Ok(AnnualData {
        years: years.to_vec(),
        temperatures: temperatures.to_vec(),
        trend: trend.trend_line,
        statistics: Statistics {
            warming_rate: round_to(trend.warming_rate_per_decade, 3),
            r_squared: round_to(trend.r_squared, 4),
            current_anomaly: round_to(current_anomaly, 2),
        },
        warmest_years: warmest_years(years, temperatures),
        decadal_averages: decadal_averages(years, temperatures),
    })
}

/// Builds the annual artifact and writes it to `path`.
pub fn save_annual(table: &Table, path: &Path) -> Result<()> {
    let annual = build_annual(table)?;
    super::write_json(&annual, path)?;

    Ok(())
}

/// The top-N years by anomaly, descending. The sort is stable, so tied
/// values keep their original (chronological) row order.
fn warmest_years(years: &[i32], values: &[Option<f64>]) -> Vec<WarmestYear> {
    let mut ranked: Vec<WarmestYear> = years
        .iter()
        .zip(values)
        .filter_map(|(year, value)| {
            value.map(|anomaly| WarmestYear {
                year: *year,
                anomaly,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.anomaly
            .partial_cmp(&a.anomaly)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(TOP_YEARS);

    ranked
}

/// Mean anomaly per decade bucket, ascending by decade. Decades with no
/// present values are omitted.
fn decadal_averages(years: &[i32], values: &[Option<f64>]) -> Vec<DecadalAverage> {
    let mut buckets: BTreeMap<i32, (f64, usize)> = BTreeMap::new();

    for (year, value) in years.iter().zip(values) {
        if let Some(value) = value {
            let decade = year.div_euclid(10) * 10;
            let bucket = buckets.entry(decade).or_insert((0.0, 0));
            bucket.0 += value;
            bucket.1 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(decade, (sum, count))| DecadalAverage {
            decade,
            mean: sum / count as f64,
        })
        .collect()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10.0_f64.powi(places);
    (value * factor).round() / factor
}

// -- Tests -------------------------------------------------------------------
