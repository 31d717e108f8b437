use log::{error, info};
use std::sync::Arc;

use crate::config::Config;
use crate::error::CheckerError;
use crate::output_handler::{ensure_output_exists, write_valid_proxies};
use crate::proxy_handler::ProxyProber;
use crate::source_handler::aggregate;
use crate::validator::validate_all;

#[derive(Debug)]
pub struct RunSummary {
    pub fetched: usize,
    pub valid_proxies: Vec<String>,
    pub written: bool,
}

/// One full sweep: fetch lists, probe every candidate, persist the survivors.
///
/// Only a missing output file stops the run. A failed write is reported and
/// the validated proxies stay available in the summary.
pub async fn run(config: &Config, prober: Arc<dyn ProxyProber>) -> Result<RunSummary, CheckerError> {
    let output = config.valid_proxies_file.as_path();
    ensure_output_exists(output).await?;

    let candidates = aggregate(&config.source_urls, config.fetch_timeout).await;
    let valid_proxies = validate_all(prober, &candidates, config.max_concurrency).await;

    let written = match write_valid_proxies(output, &valid_proxies).await {
        Ok(()) => {
            println!(
                "Total valid proxies: {} written to {}",
                valid_proxies.len(),
                output.display()
            );
            info!("Wrote {} valid proxies to {}", valid_proxies.len(), output.display());
            true
        }
        Err(e) => {
            println!("{}", e);
            error!("Valid proxies were not saved to {}", output.display());
            false
        }
    };

    Ok(RunSummary {
        fetched: candidates.len(),
        valid_proxies,
        written,
    })
}
