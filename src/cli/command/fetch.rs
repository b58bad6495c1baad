//! Fetch stage: download every registered dataset into the raw store.

use std::fs;

use anyhow::Result;

use crate::{cli::create_spinner, dataset::DATASETS, download::download_csv};

use super::{raw_store_dir, BatchSummary};

/// Downloads each dataset in turn. A failed download is logged and skipped;
/// the remaining datasets are still attempted.
pub async fn fetch() -> Result<BatchSummary> {
    let raw_dir = raw_store_dir();
    fs::create_dir_all(&raw_dir)?;

    let mut summary = BatchSummary::new("fetch");

    for dataset in &DATASETS {
        let file_path = raw_dir.join(dataset.raw_file_name());

        let bar = create_spinner(format!("Downloading {} data...", dataset.name));
        match download_csv(dataset.url, &file_path).await {
            Ok(()) => {
                bar.finish_with_message(format!("Saved to `{}`", file_path.display()));
                summary.record_success(dataset.name);
            }
            Err(e) => {
                bar.finish_with_message(format!("Failed to download {} data", dataset.name));
                eprintln!("Error: {:#}", e);
                summary.record_failure(dataset.name);
            }
        }
    }

    Ok(summary)
}
