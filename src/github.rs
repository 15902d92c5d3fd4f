use anyhow::{ensure, Context};
use serde::{de, Deserialize, Deserializer};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// One public key as returned by `GET /users/{username}/keys`.
#[derive(Deserialize, Debug)]
pub struct KeyRecord {
    pub id: u64,
    #[serde(deserialize_with = "single_line")]
    pub key: String,
}

/// A key spanning several lines would be split apart when written out.
fn single_line<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    if key.contains(|c: char| c == '\n' || c == '\r') {
        return Err(de::Error::custom("key material contains a line break"));
    }
    Ok(key)
}

pub struct KeyFetcher {
    agent: ureq::Agent,
    api_url: Url,
}

impl KeyFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .with_context(|| format!("invalid api_url: {}", config.api_url))?;
        ensure!(
            !api_url.cannot_be_a_base(),
            "invalid api_url: {}",
            config.api_url
        );

        let mut builder = ureq::AgentBuilder::new().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            agent: builder.build(),
            api_url,
        })
    }

    /// `<api_url>/users/<username>/keys`, with the username encoded as one
    /// path segment.
    pub fn keys_url(&self, username: &str) -> String {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username, "keys"]);
        }
        url.into()
    }

    /// Fetches the key material published by `username`, in API order.
    pub fn fetch(&self, username: &str) -> Result<Vec<String>> {
        let url = self.keys_url(username);
        log::info!("Fetching keys for {}", username);

        let response = match self
            .agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(Error::Status {
                    url,
                    status,
                    body: response.into_string().unwrap_or_default(),
                })
            }
            Err(err) => {
                return Err(Error::Request {
                    url,
                    source: Box::new(err),
                })
            }
        };

        let body = match response.into_string() {
            Ok(body) => body,
            Err(source) => return Err(Error::Body { url, source }),
        };
        let keys = parse_keys(&body).map_err(|source| Error::Decode { url, source })?;

        log::info!("Keys fetched successfully.");
        Ok(keys)
    }
}

/// Decodes a key listing and keeps only the key material of each record.
pub fn parse_keys(body: &str) -> serde_json::Result<Vec<String>> {
    let records: Vec<KeyRecord> = serde_json::from_str(body)?;
    Ok(records
        .into_iter()
        .map(|record| {
            log::debug!("Received key {}", record.id);
            record.key
        })
        .collect())
}
