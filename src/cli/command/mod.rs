pub mod fetch;
pub mod process;

use std::path::PathBuf;

pub use fetch::fetch;
pub use process::process;

/// Directory the fetch stage writes raw downloads to.
pub fn raw_store_dir() -> PathBuf {
    PathBuf::from("data").join("raw")
}

/// Directory the process stage writes JSON artifacts to.
pub fn output_store_dir() -> PathBuf {
    PathBuf::from("public").join("data")
}

/// Per-item outcomes of a pipeline stage.
///
/// Failures never abort the stage; they are collected here so the caller can
/// decide the process exit status once the whole batch has run.
#[derive(Debug)]
pub struct BatchSummary {
    stage: &'static str,
    succeeded: Vec<&'static str>,
    failed: Vec<&'static str>,
}

impl BatchSummary {
    pub fn new(stage: &'static str) -> Self {
        BatchSummary {
            stage,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record_success(&mut self, item: &'static str) {
        self.succeeded.push(item);
    }

    pub fn record_failure(&mut self, item: &'static str) {
        self.failed.push(item);
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn report(&self) {
        println!(
            "{}: {} succeeded, {} failed",
            self.stage,
            self.succeeded.len(),
            self.failed.len()
        );
        for item in &self.failed {
            println!("  failed: {}", item);
        }
    }
}

// -- Tests -------------------------------------------------------------------
