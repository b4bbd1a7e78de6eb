//! Rental query service
//!
//! Validates caller input, resolves district names to region codes and
//! delegates the call to the [`ApiDispatcher`]. Every validation failure is
//! reported before any network call is made.

use crate::config::ClientConfig;
use crate::dispatch::{ApiDispatcher, APARTMENT_RENT_ENDPOINT};
use crate::error::{Error, Result};
use crate::region::{is_code_shaped, Region, RegionLookup, StaticRegions};
use crate::types::{RentalPage, RentalRecord, RequestParameters, YearMonth};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Validation code for an unknown or malformed region code
pub const INVALID_DISTRICT_CODE: &str = "INVALID_DISTRICT_CODE";
/// Validation code for an unknown district name
pub const INVALID_DISTRICT: &str = "INVALID_DISTRICT";
/// Validation code for a malformed contract year-month
pub const INVALID_DEAL_YEAR_MONTH: &str = "INVALID_DEAL_YEAR_MONTH";
/// Validation code for a page number below 1
pub const INVALID_PAGE_NO: &str = "INVALID_PAGE_NO";
/// Validation code for a page size below 1
pub const INVALID_NUM_OF_ROWS: &str = "INVALID_NUM_OF_ROWS";

/// Query front door for apartment rent transactions
#[derive(Clone)]
pub struct RentalQueryService {
    dispatcher: ApiDispatcher,
    regions: Arc<dyn RegionLookup>,
    endpoint: String,
}

impl RentalQueryService {
    /// Create a service over a dispatcher and a region lookup
    pub fn new(dispatcher: ApiDispatcher, regions: Arc<dyn RegionLookup>) -> Self {
        Self {
            dispatcher,
            regions,
            endpoint: APARTMENT_RENT_ENDPOINT.to_string(),
        }
    }

    /// Create a service from config, using the built-in region table
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let dispatcher = ApiDispatcher::from_config(config)?;
        Ok(Self::new(dispatcher, Arc::new(StaticRegions)))
    }

    /// Query a different data set endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query one page of rent transactions
    ///
    /// `region` is either a 5-digit region code or a district name;
    /// `year_month` is `YYYYMM`.
    pub async fn query_rentals(
        &self,
        region: &str,
        year_month: &str,
        page_no: u32,
        num_of_rows: u32,
    ) -> Result<Vec<RentalRecord>> {
        self.query_rentals_page(region, year_month, page_no, num_of_rows)
            .await
            .map(|page| page.items)
    }

    /// Query one page of rent transactions, keeping the paging fields
    pub async fn query_rentals_page(
        &self,
        region: &str,
        year_month: &str,
        page_no: u32,
        num_of_rows: u32,
    ) -> Result<RentalPage> {
        let params = self.prepare(region, year_month, page_no, num_of_rows)?;
        info!(
            "Querying rentals: region={}, yearMonth={}, page={}, rows={}",
            params.region_code, params.year_month, params.page_no, params.num_of_rows
        );

        let page = self.dispatcher.dispatch(&self.endpoint, &params).await?;
        info!(
            "Query for {} {} returned {} records",
            params.region_code,
            params.year_month,
            page.items.len()
        );
        Ok(page)
    }

    /// Validate caller input into request parameters
    pub fn prepare(
        &self,
        region: &str,
        year_month: &str,
        page_no: u32,
        num_of_rows: u32,
    ) -> Result<RequestParameters> {
        let region_code = self.resolve_region(region)?;
        let year_month = parse_year_month(year_month)?;

        if page_no < 1 {
            return Err(Error::validation(INVALID_PAGE_NO, "pageNo must be at least 1"));
        }
        if num_of_rows < 1 {
            return Err(Error::validation(
                INVALID_NUM_OF_ROWS,
                "numOfRows must be at least 1",
            ));
        }

        Ok(RequestParameters {
            region_code,
            year_month,
            page_no,
            num_of_rows,
        })
    }

    /// Turn a region code or district name into a known region code
    pub fn resolve_region(&self, region: &str) -> Result<String> {
        let region = region.trim();
        if region.is_empty() {
            return Err(Error::validation(
                INVALID_DISTRICT_CODE,
                "region code or district name is required",
            ));
        }

        if region.bytes().all(|b| b.is_ascii_digit()) {
            if !is_code_shaped(region) {
                return Err(Error::validation(
                    INVALID_DISTRICT_CODE,
                    format!("region code must be 5 digits: {region}"),
                ));
            }
            return self
                .regions
                .by_code(region)
                .map(|r| r.code.to_string())
                .ok_or_else(|| {
                    Error::validation(
                        INVALID_DISTRICT_CODE,
                        format!("unknown region code: {region}"),
                    )
                });
        }

        self.regions
            .code_for(region)
            .map(str::to_string)
            .ok_or_else(|| Error::validation(INVALID_DISTRICT, format!("unknown district: {region}")))
    }

    /// All regions the service accepts
    pub fn available_regions(&self) -> Vec<Region> {
        self.regions.regions()
    }

    /// Regions of one province
    pub fn regions_in(&self, sido: &str) -> Vec<Region> {
        self.regions.regions_in(sido)
    }

    /// Region code to district name mapping
    pub fn region_mapping(&self) -> BTreeMap<&'static str, &'static str> {
        self.regions.code_name_mapping()
    }
}

impl std::fmt::Debug for RentalQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RentalQueryService")
            .field("dispatcher", &self.dispatcher)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Parse a `YYYYMM` string: exactly 6 ASCII digits, month 01 to 12
pub fn parse_year_month(raw: &str) -> Result<YearMonth> {
    let raw = raw.trim();
    let invalid = || {
        Error::validation(
            INVALID_DEAL_YEAR_MONTH,
            format!("contract year-month must be YYYYMM: {raw}"),
        )
    };

    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year: i32 = raw[..4].parse().map_err(|_| invalid())?;
    let month: u32 = raw[4..].parse().map_err(|_| invalid())?;
    YearMonth::new(year, month).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::BackoffType;
    use test_case::test_case;
    use wiremock::{matchers::any, Mock, MockServer, ResponseTemplate};

    fn offline_service() -> RentalQueryService {
        let config = ClientConfig::new("test-key").with_base_url("http://127.0.0.1:1");
        RentalQueryService::from_config(&config).unwrap()
    }

    #[test_case("11680", "11680" ; "known code")]
    #[test_case("강남구", "11680" ; "district name")]
    #[test_case("  종로구 ", "11110" ; "name with whitespace")]
    #[test_case("41110", "41110" ; "gyeonggi code")]
    fn test_resolve_region(input: &str, expected: &str) {
        assert_eq!(offline_service().resolve_region(input).unwrap(), expected);
    }

    #[test_case("", INVALID_DISTRICT_CODE ; "empty")]
    #[test_case("99999", INVALID_DISTRICT_CODE ; "unknown code")]
    #[test_case("1168", INVALID_DISTRICT_CODE ; "short code")]
    #[test_case("116800", INVALID_DISTRICT_CODE ; "long code")]
    #[test_case("없는구", INVALID_DISTRICT ; "unknown name")]
    fn test_resolve_region_rejected(input: &str, code: &str) {
        let err = offline_service().resolve_region(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), code);
    }

    #[test_case("202401", 2024, 1 ; "january")]
    #[test_case("199912", 1999, 12 ; "december")]
    #[test_case(" 202406 ", 2024, 6 ; "trimmed")]
    fn test_parse_year_month(raw: &str, year: i32, month: u32) {
        let ym = parse_year_month(raw).unwrap();
        assert_eq!((ym.year(), ym.month()), (year, month));
    }

    #[test_case("2024-1" ; "dash separated")]
    #[test_case("20241" ; "five digits")]
    #[test_case("2024011" ; "seven digits")]
    #[test_case("202400" ; "month zero")]
    #[test_case("202413" ; "month thirteen")]
    #[test_case("abcdef" ; "letters")]
    #[test_case("" ; "empty")]
    fn test_parse_year_month_rejected(raw: &str) {
        let err = parse_year_month(raw).unwrap_err();
        assert_eq!(err.code(), INVALID_DEAL_YEAR_MONTH);
    }

    #[test]
    fn test_prepare_page_bounds() {
        let service = offline_service();
        assert_eq!(
            service.prepare("11680", "202401", 0, 10).unwrap_err().code(),
            INVALID_PAGE_NO
        );
        assert_eq!(
            service.prepare("11680", "202401", 1, 0).unwrap_err().code(),
            INVALID_NUM_OF_ROWS
        );

        let params = service.prepare("마포구", "202401", 2, 50).unwrap();
        assert_eq!(params.region_code, "11440");
        assert_eq!(params.year_month.to_string(), "202401");
        assert_eq!((params.page_no, params.num_of_rows), (2, 50));
    }

    #[tokio::test]
    async fn test_validation_happens_before_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ClientConfig::new("test-key")
            .with_base_url(server.uri())
            .with_backoff(BackoffType::Constant, 1, 1);
        let service = RentalQueryService::from_config(&config).unwrap();

        let err = service
            .query_rentals("11680", "2024-1", 1, 10)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), INVALID_DEAL_YEAR_MONTH);
    }

    #[test]
    fn test_region_listing() {
        let service = offline_service();
        assert_eq!(service.available_regions().len(), service.region_mapping().len());
        assert_eq!(service.regions_in(crate::region::SEOUL).len(), 25);
        assert_eq!(service.region_mapping().get("11680"), Some(&"강남구"));
    }

    #[test]
    fn test_with_endpoint() {
        let service = offline_service().with_endpoint("/custom/path");
        assert_eq!(service.endpoint(), "/custom/path");
    }
}
