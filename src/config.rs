use dotenv::dotenv;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_URLS: [&str; 2] = [
    "https://raw.githubusercontent.com/vakhov/fresh-proxy-list/refs/heads/master/http.txt",
    "https://raw.githubusercontent.com/jetkai/proxy-list/main/online-proxies/txt/proxies-http.txt",
];
pub const DEFAULT_CHECK_URL: &str = "http://httpbin.org/ip";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MAX_CONCURRENCY: usize = 50;
pub const VALID_PROXIES_FILE_NAME: &str = "validproxies";

#[derive(Debug, Clone)]
pub struct Config {
    pub source_urls: Vec<String>,
    pub check_url: String,
    pub fetch_timeout: Duration,
    pub probe_timeout: Duration,
    pub max_concurrency: usize,
    pub valid_proxies_file: PathBuf,
}

impl Config {
    // Load tunables from the environment, seeded from .env when present
    pub fn load() -> Config {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let source_urls = match non_empty("PROXY_SOURCE_URLS") {
            Some(val) => val
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
            None => {
                warn!("PROXY_SOURCE_URLS not set, using the default proxy lists");
                DEFAULT_SOURCE_URLS.iter().map(|url| url.to_string()).collect()
            }
        };

        let check_url = match non_empty("PROXY_CHECK_URL") {
            Some(val) => val,
            None => DEFAULT_CHECK_URL.to_string(),
        };

        let fetch_timeout = Duration::from_secs(parse_or(
            non_empty("FETCH_TIMEOUT_SECS"),
            "FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        ));
        let probe_timeout = Duration::from_secs(parse_or(
            non_empty("PROBE_TIMEOUT_SECS"),
            "PROBE_TIMEOUT_SECS",
            DEFAULT_PROBE_TIMEOUT_SECS,
        ));

        let mut max_concurrency = parse_or(
            non_empty("MAX_CONCURRENCY"),
            "MAX_CONCURRENCY",
            DEFAULT_MAX_CONCURRENCY,
        );
        if max_concurrency == 0 {
            warn!("MAX_CONCURRENCY must be at least 1, using 1");
            max_concurrency = 1;
        }

        let valid_proxies_file = match non_empty("VALID_PROXIES_FILE") {
            Some(val) => PathBuf::from(val),
            None => default_valid_proxies_path(),
        };

        Config {
            source_urls,
            check_url,
            fetch_timeout,
            probe_timeout,
            max_concurrency,
            valid_proxies_file,
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        Some(val) => match val.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("{} has invalid value {:?}, using default {}", key, val, default);
                default
            }
        },
        None => default,
    }
}

// The output file lives next to the running executable
fn default_valid_proxies_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(VALID_PROXIES_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(VALID_PROXIES_FILE_NAME))
}
