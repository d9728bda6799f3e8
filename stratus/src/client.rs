//! HTTP client for the search and document endpoints.
//!
//! Search requests go to `search-{domain}.{region}.{suffix}` and document
//! batches to `doc-{domain}.{region}.{suffix}`; both carry the configured
//! API version in the path. Percent-encoding is handled by the URL query
//! serializer. A sandboxed client answers every call locally.

use std::collections::HashMap;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::documents::{BatchOperation, DocValue, Document};
use crate::error::{Error, Result};
use crate::query::{compile, FilterExpression, Rank};
use crate::results::SearchResults;

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Options accepted by the search calls.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Filter expression compiled into the `fq` parameter.
    pub filter: Option<FilterExpression>,
    /// Results per page; the service default is 10.
    pub page_size: Option<u64>,
    /// 1-based page number.
    pub page: Option<u64>,
    pub rank: Option<Rank>,
    /// Fields to return with each hit.
    pub return_fields: Vec<String>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: FilterExpression) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn rank(mut self, rank: impl Into<Rank>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    pub fn return_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.return_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Client for one managed search domain.
#[derive(Debug)]
pub struct SearchClient {
    http: Client,
    config: Config,
}

impl SearchClient {
    pub fn new(config: Config) -> Result<Self> {
        if config.search_domain.is_empty() {
            return Err(Error::MissingSearchDomain);
        }
        Ok(SearchClient {
            http: Client::new(),
            config,
        })
    }

    /// Builds a client from `STRATUS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        SearchClient::new(Config::from_env()?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Searches the domain for the given term.
    ///
    /// Returns the matching document ids for the requested page. With a
    /// filter in `options`, the compiled expression is sent as the
    /// structured filter query; the term `matchall` also switches the
    /// service to the structured parser.
    pub async fn search(&self, term: &str, options: &SearchOptions) -> Result<SearchResults> {
        if self.config.sandbox {
            return Ok(SearchResults::sandbox_fake());
        }

        let page_size = options.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let url = self.build_search_url(term, options)?;
        self.execute_search(url, page_size).await
    }

    /// Searches with a filter expression as the whole query.
    ///
    /// The compiled expression is sent as `q` with the structured parser, so
    /// boolean combinations over several fields need no search term.
    pub async fn compound_search(
        &self,
        query: &FilterExpression,
        options: &SearchOptions,
    ) -> Result<SearchResults> {
        if self.config.sandbox {
            return Ok(SearchResults::sandbox_fake());
        }

        let page_size = options.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let compiled = compile(query)?;
        let mut url = self.search_endpoint()?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("q", compiled.trim());
            params.append_pair("q.parser", "structured");
            params.append_pair("size", &page_size.to_string());
            append_common(&mut params, options, page_size);
        }

        self.execute_search(url, page_size).await
    }

    /// Adds a document to the index under the given id.
    ///
    /// The field names must match the index fields defined on the domain.
    pub async fn add_item(&self, id: &str, fields: HashMap<String, DocValue>) -> Result<()> {
        if self.config.sandbox {
            return Ok(());
        }

        let batch = [BatchOperation::Add {
            id: id.to_string(),
            fields,
        }];
        self.doc_request(&batch).await
    }

    /// Adds several documents in one batch. An empty slice is a no-op.
    pub async fn add_items(&self, documents: &[Document]) -> Result<()> {
        if self.config.sandbox || documents.is_empty() {
            return Ok(());
        }

        let batch: Vec<BatchOperation> = documents
            .iter()
            .map(|doc| BatchOperation::Add {
                id: doc.id.clone(),
                fields: doc.fields.clone(),
            })
            .collect();
        self.doc_request(&batch).await
    }

    /// Updates a document by id. The service uses the same batch operation
    /// for adds and updates; this method exists so callers keep a stable
    /// interface if that ever changes.
    pub async fn update_item(&self, id: &str, fields: HashMap<String, DocValue>) -> Result<()> {
        self.add_item(id, fields).await
    }

    /// Removes a document by id. Deleting an id the index does not hold is
    /// still a successful request.
    pub async fn remove_item(&self, id: &str) -> Result<()> {
        if self.config.sandbox {
            return Ok(());
        }

        let batch = [BatchOperation::Delete { id: id.to_string() }];
        self.doc_request(&batch).await
    }

    fn search_endpoint(&self) -> Result<Url> {
        let url = format!(
            "http://search-{}.{}.{}/{}/search",
            self.config.search_domain,
            self.config.region,
            self.config.endpoint_suffix,
            self.config.api_version
        );
        Ok(Url::parse(&url)?)
    }

    fn doc_endpoint(&self) -> Result<Url> {
        let url = format!(
            "http://doc-{}.{}.{}/{}/documents/batch",
            self.config.search_domain,
            self.config.region,
            self.config.endpoint_suffix,
            self.config.api_version
        );
        Ok(Url::parse(&url)?)
    }

    fn build_search_url(&self, term: &str, options: &SearchOptions) -> Result<Url> {
        let page_size = options.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let mut url = self.search_endpoint()?;
        let mut params = url.query_pairs_mut();
        params.append_pair("q", term);

        let mut structured = term == "matchall";
        if let Some(filter) = &options.filter {
            structured = true;
            if !filter.is_empty() {
                let compiled = compile(filter)?;
                params.append_pair("fq", compiled.trim());
            }
        }
        if structured {
            params.append_pair("q.parser", "structured");
        }
        params.append_pair("size", &page_size.to_string());
        append_common(&mut params, options, page_size);

        drop(params);
        Ok(url)
    }

    async fn execute_search(&self, url: Url, page_size: u64) -> Result<SearchResults> {
        debug!(%url, "search request");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "search request failed");
            return Err(Error::Search {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        SearchResults::from_body(&body, page_size)
    }

    async fn doc_request(&self, batch: &[BatchOperation]) -> Result<()> {
        let url = self.doc_endpoint()?;
        debug!(%url, operations = batch.len(), "document batch request");

        let response = self.http.post(url).json(batch).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "document batch rejected");
            return Err(Error::DocumentUpdate {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

fn append_common(
    params: &mut url::form_urlencoded::Serializer<'_, url::UrlQuery<'_>>,
    options: &SearchOptions,
    page_size: u64,
) {
    if !options.return_fields.is_empty() {
        params.append_pair("return", &options.return_fields.join(","));
    }
    if let Some(page) = options.page {
        let start = page.saturating_sub(1) * page_size;
        params.append_pair("start", &start.to_string());
    }
    if let Some(rank) = &options.rank {
        params.append_pair("rank", &rank.to_string());
    }
}
