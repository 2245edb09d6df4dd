use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Country, Currency};

pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all";

#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    Url(String),
    File(String),
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Url(DEFAULT_ENDPOINT.to_string())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network response was not ok (status {status})")]
    Status { status: u16 },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct WireName {
    common: Option<String>,
    official: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireFlags {
    svg: Option<String>,
    png: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireCurrency {
    name: Option<String>,
    symbol: Option<String>,
}

// Every field is optional so one sparse entry never sinks the whole batch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireCountry {
    name: Option<WireName>,
    cca3: Option<String>,
    region: Option<String>,
    subregion: Option<String>,
    population: Option<u64>,
    area: Option<f64>,
    capital: Option<Vec<String>>,
    languages: Option<BTreeMap<String, String>>,
    currencies: Option<BTreeMap<String, WireCurrency>>,
    flags: Option<WireFlags>,
}

impl From<WireCountry> for Country {
    fn from(w: WireCountry) -> Self {
        let name = w.name.unwrap_or_default();
        let flags = w.flags.unwrap_or_default();
        Country {
            cca3: w.cca3.unwrap_or_default(),
            common_name: non_empty(name.common),
            official_name: non_empty(name.official),
            region: non_empty(w.region),
            subregion: non_empty(w.subregion),
            population: w.population,
            area: w.area,
            capital: w.capital.unwrap_or_default(),
            languages: w.languages.unwrap_or_default(),
            currencies: w
                .currencies
                .unwrap_or_default()
                .into_iter()
                .map(|(code, c)| {
                    (
                        code,
                        Currency {
                            name: c.name,
                            symbol: c.symbol,
                        },
                    )
                })
                .collect(),
            flag_url: non_empty(flags.svg).or_else(|| non_empty(flags.png)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses the response body of the countries endpoint.
pub fn parse_countries(body: &[u8]) -> Result<Vec<Country>, FetchError> {
    let wire: Vec<WireCountry> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode { source: e })?;
    Ok(wire.into_iter().map(Country::from).collect())
}

pub fn build_client(
    timeout_seconds: Option<u64>,
    proxy: Option<&str>,
) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "countrydeck/",
            env!("CARGO_PKG_VERSION")
        )),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(secs) = timeout_seconds.filter(|s| *s > 0) {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(proxy) = proxy.map(str::trim).filter(|p| !p.is_empty()) {
        let p = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(p);
    }
    builder
        .build()
        .map_err(|e| FetchError::ClientBuild { source: e })
}

/// Issues the single GET for the full record set. No retries.
pub async fn fetch_all(client: &reqwest::Client, url: &str) -> Result<Vec<Country>, FetchError> {
    debug!(url, "fetching countries");
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }
    let body = resp.bytes().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;
    let countries = parse_countries(&body)?;
    info!(count = countries.len(), bytes = body.len(), "loaded countries");
    Ok(countries)
}

pub async fn load(
    source: &DataSource,
    timeout_seconds: Option<u64>,
    proxy: Option<&str>,
) -> Result<Vec<Country>, FetchError> {
    match source {
        DataSource::Url(url) => {
            let client = build_client(timeout_seconds, proxy)?;
            fetch_all(&client, url).await
        }
        DataSource::File(path) => {
            let body = tokio::fs::read(path)
                .await
                .map_err(|e| FetchError::FileRead {
                    path: path.to_string(),
                    source: e,
                })?;
            let countries = parse_countries(&body)?;
            info!(count = countries.len(), path = %path, "loaded countries from file");
            Ok(countries)
        }
    }
}
