use crate::api::models::{Envelope, Listing};
use crate::browser::query::{BrowseQuery, RetrievalQuery, SearchQuery};
use crate::config::ApiConfig;
use crate::{Error, Result};
use reqwest::{header, Client};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Anything that can answer a retrieval query. The browser core only talks
/// to this seam, so it can be driven without a network.
pub trait RecipeSource {
    fn fetch(&self, query: &RetrievalQuery) -> impl Future<Output = Result<Listing>> + Send;
}

/// HTTP client for the recipe catalog API
#[derive(Clone)]
pub struct RecipeClient {
    client: Client,
    base_url: String,
}

impl RecipeClient {
    /// Create a new client from API settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for one page of the catalog listing
    pub fn browse_url(&self, query: &BrowseQuery) -> String {
        format!(
            "{}/recipes?page={}&limit={}",
            self.base_url,
            query.page,
            query.limit.get()
        )
    }

    /// URL for a filtered search; values are encoded but otherwise untouched
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let params = query
            .params()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/recipes/search?{}", self.base_url, params)
    }

    /// GET a listing URL and interpret the envelope
    async fn get_listing(&self, url: &str) -> Result<Listing> {
        debug!("Recipe API request: GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = serde_json::from_str::<Envelope>(&body);

        if !status.is_success() {
            // Prefer the server's own message when the error body is still an envelope
            if let Some(msg) = envelope.as_ref().ok().and_then(Envelope::error_message) {
                warn!("Recipe API error: {} - {}", status, msg);
                return Err(Error::ServerReported(msg));
            }
            warn!("Recipe API error: {}", status);
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let envelope = envelope.map_err(|e| Error::Decode(e.to_string()))?;

        if let Some(msg) = envelope.error_message() {
            warn!("Recipe API reported an error: {}", msg);
            return Err(Error::ServerReported(msg));
        }

        debug!(
            "Recipe API returned {} recipes (total: {:?})",
            envelope.data.len(),
            envelope.total
        );

        Ok(Listing {
            items: envelope.data,
            total: envelope.total,
        })
    }

    /// Fetch one page of the catalog
    pub async fn browse(&self, query: &BrowseQuery) -> Result<Listing> {
        let url = self.browse_url(query);
        self.get_listing(&url).await
    }

    /// Run a filtered search. The endpoint is not paginated, so `total` is dropped.
    pub async fn search(&self, query: &SearchQuery) -> Result<Listing> {
        let url = self.search_url(query);
        let listing = self.get_listing(&url).await?;
        Ok(Listing {
            total: None,
            ..listing
        })
    }
}

impl RecipeSource for RecipeClient {
    async fn fetch(&self, query: &RetrievalQuery) -> Result<Listing> {
        match query {
            RetrievalQuery::Browse(browse) => self.browse(browse).await,
            RetrievalQuery::Search(search) => self.search(search).await,
        }
    }
}
