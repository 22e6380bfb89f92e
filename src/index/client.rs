//! Package index search client.
//!
//! # Example
//!
//! ```no_run
//! use venvscope::index::PackageIndexClient;
//!
//! let client = PackageIndexClient::pypi().unwrap();
//! for module in client.search_modules("flask").unwrap() {
//!     println!("{} {} - {}", module.name, module.version, module.summary);
//! }
//! ```

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

use crate::error::{Result, VenvscopeError};

use super::xmlrpc::{self, Value, XmlRpcError};

/// XML-RPC endpoint of the Python package index.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Remote procedure used for name searches.
const SEARCH_METHOD: &str = "search";

/// A package returned by an index search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    /// Package name.
    pub name: String,
    /// Latest published version.
    pub version: String,
    /// One-line description.
    pub summary: String,
}

/// A source of package search results.
///
/// Implemented by [`PackageIndexClient`]; callers can substitute their own
/// implementation to avoid network access.
pub trait PackageIndex {
    /// Search packages by name, preserving the order the source returns.
    fn search(&self, query_name: &str) -> Result<Vec<ModuleRecord>>;
}

/// Searches a package index over XML-RPC.
pub struct PackageIndexClient {
    client: Client,
    endpoint: String,
}

impl PackageIndexClient {
    /// Create a client for `endpoint`.
    ///
    /// `timeout` of `None` waits indefinitely for the index to answer.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("venvscope/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| VenvscopeError::remote(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a client for the public Python package index.
    pub fn pypi() -> Result<Self> {
        Self::new(DEFAULT_INDEX_URL, None)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Search the index for packages matching `query_name`.
    ///
    /// An empty result is not an error. Transport failures, non-success
    /// HTTP statuses, malformed responses and remote faults all surface as
    /// [`VenvscopeError::RemoteQuery`].
    pub fn search_modules(&self, query_name: &str) -> Result<Vec<ModuleRecord>> {
        let body = xmlrpc::encode_call(
            SEARCH_METHOD,
            &[Value::structure([("name", Value::from(query_name))])],
        );
        tracing::debug!("Searching {} for '{}'", self.endpoint, query_name);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .map_err(|e| VenvscopeError::remote(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VenvscopeError::remote(format!(
                "HTTP {} from {}",
                status, self.endpoint
            )));
        }

        let text = response
            .text()
            .map_err(|e| VenvscopeError::remote(format!("failed to read response: {}", e)))?;

        let value = xmlrpc::decode_response(&text).map_err(|e| match e {
            XmlRpcError::Fault { code, message } => {
                VenvscopeError::remote(format!("remote fault {}: {}", code, message))
            }
            malformed => VenvscopeError::remote(malformed),
        })?;

        let records = records_from(&value)?;
        tracing::debug!("Index returned {} result(s)", records.len());
        Ok(records)
    }
}

impl PackageIndex for PackageIndexClient {
    fn search(&self, query_name: &str) -> Result<Vec<ModuleRecord>> {
        self.search_modules(query_name)
    }
}

/// Map a search result array into records, keeping order and duplicates.
pub fn records_from(value: &Value) -> Result<Vec<ModuleRecord>> {
    let items = value
        .as_array()
        .ok_or_else(|| VenvscopeError::remote("search result is not an array"))?;

    items
        .iter()
        .map(|item| {
            if !matches!(item, Value::Struct(_)) {
                return Err(VenvscopeError::remote("search result item is not a struct"));
            }
            Ok(ModuleRecord {
                name: field_text(item.member("name")),
                version: field_text(item.member("version")),
                summary: field_text(item.member("summary")),
            })
        })
        .collect()
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Int(i)) => i.to_string(),
        Some(Value::Double(d)) => d.to_string(),
        Some(Value::Boolean(b)) => b.to_string(),
        _ => String::new(),
    }
}
