use log::error;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::proxy_handler::{ProbeOutcome, ProxyProber};

/// Probe every candidate with at most `concurrency` probes in flight.
///
/// A permit is taken before each probe is spawned, so the next candidate
/// starts as soon as any running probe finishes. Validated proxies come back
/// in completion order.
pub async fn validate_all(
    prober: Arc<dyn ProxyProber>,
    candidates: &HashSet<String>,
    concurrency: usize,
) -> Vec<String> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut probes = JoinSet::new();
    let mut valid_proxies = Vec::new();

    for candidate in candidates {
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                error!("Probe pool closed early: {}", e);
                break;
            }
        };
        let prober = prober.clone();
        let candidate = candidate.clone();
        probes.spawn(async move {
            let outcome = prober.probe(&candidate).await;
            drop(permit);
            outcome
        });

        while let Some(joined) = probes.try_join_next() {
            collect(joined, &mut valid_proxies);
        }
    }

    while let Some(joined) = probes.join_next().await {
        collect(joined, &mut valid_proxies);
    }

    valid_proxies
}

// Discarded candidates are already logged by the prober
fn collect(joined: Result<ProbeOutcome, JoinError>, valid_proxies: &mut Vec<String>) {
    match joined {
        Ok(ProbeOutcome::Validated(proxy)) => {
            println!("Valid Proxy: {}", proxy);
            valid_proxies.push(proxy);
        }
        Ok(ProbeOutcome::Discarded) => {}
        Err(e) => error!("Probe task failed: {}", e),
    }
}
