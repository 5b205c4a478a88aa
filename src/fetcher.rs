use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::GuardianConfig;
use crate::error::{ConfigError, FetchError};
use crate::news::{Article, NewsPage, NewsQuery};

const SHOW_FIELDS: &str = "headline,thumbnail,trailText";
/// Upstream error bodies are cut to this many characters before logging.
const MAX_ERROR_BODY: usize = 512;

/// Client for the Guardian content search API.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: Url,
    api_key: String,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    current_page: u32,
    pages: u32,
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    id: String,
    web_publication_date: String,
    web_url: String,
    section_name: String,
    fields: ResultFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultFields {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    trail_text: String,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl Fetcher {
    pub fn new(config: &GuardianConfig) -> Result<Self, ConfigError> {
        let api_key = config.api_key().ok_or(ConfigError::MissingApiKey)?;
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("WorldWire/1.0 (News Reader)")
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            page_size: config.page_size,
        })
    }

    /// Build the upstream search URL. `q` and `section` are only sent when
    /// non-empty so they never over-constrain the search.
    pub fn search_url(&self, query: &NewsQuery) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api-key", &self.api_key)
                .append_pair("page", &query.page.to_string())
                .append_pair("page-size", &self.page_size.to_string())
                .append_pair("show-fields", SHOW_FIELDS);

            if !query.search_term.is_empty() {
                pairs.append_pair("q", &query.search_term);
            }
            if !query.category.is_empty() {
                pairs.append_pair("section", &query.category);
            }
        }
        url
    }

    #[instrument(skip(self), fields(page = query.page, q = %query.search_term, section = %query.category))]
    pub async fn search(&self, query: &NewsQuery) -> Result<NewsPage, FetchError> {
        let url = self.search_url(query);
        debug!("Sending search request upstream");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let body = response.text().await?;
        let page = Self::parse_search_response(&body)?;

        debug!(
            articles = page.articles.len(),
            total_pages = page.total_pages,
            "Search completed"
        );
        Ok(page)
    }

    /// Reshape an upstream search body into a [`NewsPage`].
    pub fn parse_search_response(body: &str) -> Result<NewsPage, FetchError> {
        let envelope: SearchEnvelope = serde_json::from_str(body)?;
        let response = envelope.response;

        let articles = response
            .results
            .into_iter()
            .map(Self::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewsPage {
            articles,
            current_page: response.current_page,
            total_pages: response.pages,
        })
    }

    fn normalize(result: SearchResult) -> Result<Article, FetchError> {
        Ok(Article {
            date: format_display_date(&result.web_publication_date)?,
            id: result.id,
            title: result.fields.headline,
            description: result.fields.trail_text,
            image: result.fields.thumbnail.filter(|t| !t.is_empty()),
            url: result.web_url,
            category: result.section_name,
        })
    }
}

/// Format an ISO-8601 timestamp as `M/D/YYYY` (UTC).
pub fn format_display_date(iso: &str) -> Result<String, FetchError> {
    let parsed = DateTime::parse_from_rfc3339(iso).map_err(|source| FetchError::InvalidDate {
        value: iso.to_string(),
        source,
    })?;
    Ok(parsed.with_timezone(&Utc).format("%-m/%-d/%Y").to_string())
}
