use log::{error, info};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

use crate::error::CheckerError;
use crate::utils::parse_candidates;

pub async fn fetch_source(client: &Client, url: &str) -> Result<Vec<String>, CheckerError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CheckerError::SourceRequest {
            url: url.to_string(),
            source: e,
        })?;

    if !response.status().is_success() {
        return Err(CheckerError::SourceStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| CheckerError::SourceRequest {
            url: url.to_string(),
            source: e,
        })?;

    Ok(parse_candidates(&body))
}

/// Fetch every source list and merge the lines into one set of candidates.
///
/// A source that fails contributes nothing; the run carries on with whatever
/// the other sources returned.
pub async fn aggregate(urls: &[String], fetch_timeout: Duration) -> HashSet<String> {
    let mut all_proxies = HashSet::new();

    let client = match Client::builder().timeout(fetch_timeout).build() {
        Ok(client) => client,
        Err(e) => {
            println!("{}", CheckerError::Client(e));
            error!("Could not build the source client, no proxies fetched");
            return all_proxies;
        }
    };

    for url in urls {
        match fetch_source(&client, url).await {
            Ok(proxies) => {
                info!("Fetched {} lines from {}", proxies.len(), url);
                all_proxies.extend(proxies);
            }
            Err(e) => {
                println!("{}", e);
                error!("Skipping source {}", url);
            }
        }
    }

    println!("Total proxies fetched: {}", all_proxies.len());
    info!("Merged {} sources into one candidate set", urls.len());
    all_proxies
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(2);

    async fn list_server(route: &str, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn overlapping_sources_merge_into_a_set() {
        let first = list_server("/http.txt", "1.1.1.1:80\n2.2.2.2:8080\n").await;
        let second = list_server("/proxies.txt", "2.2.2.2:8080\n3.3.3.3:3128\n\n").await;
        let urls = vec![
            format!("{}/http.txt", first.uri()),
            format!("{}/proxies.txt", second.uri()),
        ];

        let proxies = aggregate(&urls, TIMEOUT).await;

        assert_eq!(proxies.len(), 3);
        assert!(proxies.contains("1.1.1.1:80"));
        assert!(proxies.contains("2.2.2.2:8080"));
        assert!(proxies.contains("3.3.3.3:3128"));
    }

    #[tokio::test]
    async fn lines_differing_only_in_whitespace_stay_distinct() {
        let first = list_server("/http.txt", "1.2.3.4:80\n").await;
        let second = list_server("/proxies.txt", "1.2.3.4:80 \n").await;
        let urls = vec![
            format!("{}/http.txt", first.uri()),
            format!("{}/proxies.txt", second.uri()),
        ];

        let proxies = aggregate(&urls, TIMEOUT).await;

        assert_eq!(proxies.len(), 2);
    }

    #[tokio::test]
    async fn failing_source_contributes_nothing() {
        let good = list_server("/http.txt", "1.1.1.1:80\n").await;
        let bad = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&bad)
            .await;
        let urls = vec![
            format!("{}/missing.txt", bad.uri()),
            "http://127.0.0.1:1/unreachable.txt".to_string(),
            format!("{}/http.txt", good.uri()),
        ];

        let proxies = aggregate(&urls, TIMEOUT).await;

        assert_eq!(proxies.len(), 1);
        assert!(proxies.contains("1.1.1.1:80"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = Client::new();

        let result = fetch_source(&client, &format!("{}/gone", server.uri())).await;

        assert!(matches!(result, Err(CheckerError::SourceStatus { .. })));
    }

    #[tokio::test]
    async fn slow_source_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("1.1.1.1:80\n")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        let urls = vec![format!("{}/slow.txt", server.uri())];

        let proxies = aggregate(&urls, Duration::from_millis(200)).await;

        assert!(proxies.is_empty());
    }

    #[tokio::test]
    async fn empty_body_yields_no_candidates() {
        let server = list_server("/empty.txt", "").await;
        let client = Client::new();

        let proxies = fetch_source(&client, &format!("{}/empty.txt", server.uri()))
            .await
            .unwrap();

        assert!(proxies.is_empty());
    }
}
