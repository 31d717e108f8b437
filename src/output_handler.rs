use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::CheckerError;

// The output file has to be created by the user before the first run
pub async fn ensure_output_exists(path: &Path) -> Result<(), CheckerError> {
    match fs::try_exists(path).await {
        Ok(true) => Ok(()),
        _ => Err(CheckerError::MissingOutputFile(path.to_path_buf())),
    }
}

/// Replace the file contents with one proxy per line.
///
/// Nothing is rolled back if a write fails halfway.
pub async fn write_valid_proxies(path: &Path, proxies: &[String]) -> Result<(), CheckerError> {
    let file = File::create(path).await?;
    let mut writer = BufWriter::new(file);
    for proxy in proxies {
        writer.write_all(proxy.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}
