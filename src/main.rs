use checker::run;
use config::Config;
use error::CheckerError;
use proxy_handler::HttpProber;

use log::{error, info, warn};
use std::sync::Arc;

mod checker;
mod config;
mod error;
mod output_handler;
mod proxy_handler;
mod source_handler;
mod utils;
mod validator;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    info!(
        "Checking proxies from {} sources against {} ({} concurrent probes)",
        config.source_urls.len(),
        config.check_url,
        config.max_concurrency
    );

    let prober = Arc::new(HttpProber::new(
        config.check_url.clone(),
        config.probe_timeout,
    ));

    match run(&config, prober).await {
        Ok(summary) if summary.written => info!(
            "Run finished: {} fetched, {} valid",
            summary.fetched,
            summary.valid_proxies.len()
        ),
        Ok(summary) => warn!(
            "Run finished but {} valid proxies were not saved",
            summary.valid_proxies.len()
        ),
        Err(e @ CheckerError::MissingOutputFile(_)) => {
            println!("{}", e);
            error!("Output file missing, no proxies were checked");
        }
        Err(e) => error!("{}", e),
    }
}
