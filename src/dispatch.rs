//! Upstream call dispatch
//!
//! The dispatcher builds the request for one data set endpoint, sends it
//! through the retrying [`HttpClient`], then runs the raw body through
//! detection, decoding and result classification. Only the network call is
//! retried; malformed bodies and classified result codes fail immediately.

use crate::config::ClientConfig;
use crate::decode::parse_response;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::result_code::classify;
use crate::types::{RentalPage, RequestParameters, ResponseEnvelope};
use tracing::{debug, error, info};

/// Endpoint path of the apartment rent transaction data set
pub const APARTMENT_RENT_ENDPOINT: &str = "/1613000/RTMSDataSvcAptRent/getRTMSDataSvcAptRent";

/// Query parameter carrying the credential
const SERVICE_KEY_PARAM: &str = "serviceKey";

/// Sends parameterized calls to the data portal and normalizes the responses
#[derive(Clone)]
pub struct ApiDispatcher {
    http: HttpClient,
    service_key: String,
}

impl ApiDispatcher {
    /// Create a dispatcher over an existing client
    pub fn new(http: HttpClient, service_key: impl Into<String>) -> Self {
        Self {
            http,
            service_key: service_key.into(),
        }
    }

    /// Create a dispatcher from a validated config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_config())?;
        Ok(Self::new(http, config.service_key.clone()))
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch and decode one response without classifying it
    pub async fn fetch(&self, endpoint: &str, params: &RequestParameters) -> Result<ResponseEnvelope> {
        let request = params.query_pairs().into_iter().fold(
            RequestConfig::new().query(SERVICE_KEY_PARAM, self.service_key.as_str()),
            |request, (key, value)| request.query(key, value),
        );

        debug!(
            "Dispatching {} (LAWD_CD={}, DEAL_YMD={}, pageNo={}, numOfRows={})",
            endpoint, params.region_code, params.year_month, params.page_no, params.num_of_rows
        );

        let body = self.http.get_text(endpoint, request).await?;
        debug!("Raw body: {}", body.chars().take(200).collect::<String>());
        let decoded = parse_response(&body)?;
        debug!("Response decoded as {}", decoded.format);

        Ok(decoded.envelope)
    }

    /// Fetch, decode and classify one response, returning the page on success
    pub async fn dispatch(&self, endpoint: &str, params: &RequestParameters) -> Result<RentalPage> {
        let envelope = self.fetch(endpoint, params).await?;

        let classification = classify(&envelope.header);
        info!(
            "Result code {} classified as {:?}",
            envelope.header.result_code, classification
        );
        if let Err(err) = classification.into_result(&envelope.header) {
            error!(
                "Upstream rejected query for {} {}: {}",
                params.region_code, params.year_month, err
            );
            return Err(err);
        }

        info!(
            "Fetched {} records for {} {} (page {}, total {})",
            envelope.body.items.len(),
            params.region_code,
            params.year_month,
            envelope.body.page_no,
            envelope.body.total_count
        );

        Ok(RentalPage::from(envelope.body))
    }
}

impl std::fmt::Debug for ApiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiDispatcher")
            .field("http", &self.http)
            .field("service_key", &"***")
            .finish()
    }
}
