//! Downloads a dataset file and saves it verbatim to the raw store.

use std::{
    fs::File,
    io::{copy, Cursor},
    path::Path,
    time::Duration,
};

use anyhow::{anyhow, Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Downloads the resource at the specified URL and saves it to the specified
/// file path. The file is overwritten if it exists.
pub async fn download_csv(url: &str, file_path: &Path) -> Result<(), Error> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("failed to download {}: {}", url, response.status()));
    }

    let mut file = File::create(file_path)?;
    let mut content = Cursor::new(response.bytes().await?);
    copy(&mut content, &mut file)?;

    Ok(())
}
