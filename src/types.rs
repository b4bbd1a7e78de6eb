//! Common types used throughout the crate
//!
//! This module contains the normalized record shape, the response envelope
//! every wire format is parsed into, and the validated request parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Rental Record
// ============================================================================

/// Upstream field names, in the order they appear in [`RentalRecord`]
pub const RECORD_FIELDS: [&str; 17] = [
    "aptNm",
    "buildYear",
    "contractTerm",
    "contractType",
    "dealDay",
    "dealMonth",
    "dealYear",
    "deposit",
    "excluUseAr",
    "floor",
    "jibun",
    "monthlyRent",
    "preDeposit",
    "preMonthlyRent",
    "sggCd",
    "umdNm",
    "useRRRight",
];

/// One apartment rent transaction
///
/// Every field is optional: the upstream service does not guarantee that
/// any of them is populated. Serializes with the upstream field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    /// Apartment complex name
    #[serde(rename = "aptNm")]
    pub apartment_name: Option<String>,
    #[serde(rename = "buildYear")]
    pub build_year: Option<String>,
    /// Contract term, e.g. "24.01~26.01"
    #[serde(rename = "contractTerm")]
    pub contract_term: Option<String>,
    /// New or renewal contract
    #[serde(rename = "contractType")]
    pub contract_type: Option<String>,
    #[serde(rename = "dealDay")]
    pub deal_day: Option<String>,
    #[serde(rename = "dealMonth")]
    pub deal_month: Option<String>,
    #[serde(rename = "dealYear")]
    pub deal_year: Option<String>,
    /// Deposit in units of 10,000 KRW, with thousands separators
    #[serde(rename = "deposit")]
    pub deposit: Option<String>,
    /// Exclusive-use area in square meters
    #[serde(rename = "excluUseAr")]
    pub exclusive_area: Option<String>,
    #[serde(rename = "floor")]
    pub floor: Option<String>,
    /// Lot number
    #[serde(rename = "jibun")]
    pub lot_number: Option<String>,
    #[serde(rename = "monthlyRent")]
    pub monthly_rent: Option<String>,
    #[serde(rename = "preDeposit")]
    pub previous_deposit: Option<String>,
    #[serde(rename = "preMonthlyRent")]
    pub previous_monthly_rent: Option<String>,
    /// 5-digit region code
    #[serde(rename = "sggCd")]
    pub region_code: Option<String>,
    /// Legal-dong name
    #[serde(rename = "umdNm")]
    pub legal_dong: Option<String>,
    #[serde(rename = "useRRRight")]
    pub usage_approval: Option<String>,
}

impl RentalRecord {
    /// Mutable slot for an upstream field name, `None` for unknown names
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            "aptNm" => &mut self.apartment_name,
            "buildYear" => &mut self.build_year,
            "contractTerm" => &mut self.contract_term,
            "contractType" => &mut self.contract_type,
            "dealDay" => &mut self.deal_day,
            "dealMonth" => &mut self.deal_month,
            "dealYear" => &mut self.deal_year,
            "deposit" => &mut self.deposit,
            "excluUseAr" => &mut self.exclusive_area,
            "floor" => &mut self.floor,
            "jibun" => &mut self.lot_number,
            "monthlyRent" => &mut self.monthly_rent,
            "preDeposit" => &mut self.previous_deposit,
            "preMonthlyRent" => &mut self.previous_monthly_rent,
            "sggCd" => &mut self.region_code,
            "umdNm" => &mut self.legal_dong,
            "useRRRight" => &mut self.usage_approval,
            _ => return None,
        };
        Some(slot)
    }

    /// Contract year and month as `YYYYMM`
    pub fn contract_year_month(&self) -> Option<String> {
        let year: u32 = self.deal_year.as_deref()?.trim().parse().ok()?;
        let month: u32 = self.deal_month.as_deref()?.trim().parse().ok()?;
        Some(format!("{year:04}{month:02}"))
    }

    /// Contract date assembled from the deal year, month and day
    pub fn contract_date(&self) -> Option<NaiveDate> {
        let year = self.deal_year.as_deref()?.trim().parse().ok()?;
        let month = self.deal_month.as_deref()?.trim().parse().ok()?;
        let day = self.deal_day.as_deref()?.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Deposit as a number (10,000 KRW units)
    pub fn deposit_amount(&self) -> Option<u64> {
        parse_amount(self.deposit.as_deref()?)
    }

    /// Monthly rent as a number (10,000 KRW units)
    pub fn monthly_rent_amount(&self) -> Option<u64> {
        parse_amount(self.monthly_rent.as_deref()?)
    }

    /// True when no field is populated
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_amount(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(|c| *c != ',').collect();
    digits.trim().parse().ok()
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Result header of a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub result_code: String,
    pub result_msg: String,
}

impl Header {
    /// Create a header
    pub fn new(result_code: impl Into<String>, result_msg: impl Into<String>) -> Self {
        Self {
            result_code: result_code.into(),
            result_msg: result_msg.into(),
        }
    }
}

/// Paged item list of a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub items: Vec<RentalRecord>,
    pub page_no: u32,
    pub num_of_rows: u32,
    pub total_count: u32,
}

impl Body {
    /// Body for formats without paging metadata: one page holding every item
    pub fn single_page(items: Vec<RentalRecord>) -> Self {
        let count = items.len() as u32;
        Self {
            items,
            page_no: 1,
            num_of_rows: count,
            total_count: count,
        }
    }
}

/// Normalized `{header, body}` wrapper produced for every wire format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub header: Header,
    pub body: Body,
}

/// Items of a successful query together with the paging fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPage {
    pub items: Vec<RentalRecord>,
    pub page_no: u32,
    pub num_of_rows: u32,
    pub total_count: u32,
}

impl From<Body> for RentalPage {
    fn from(body: Body) -> Self {
        Self {
            items: body.items,
            page_no: body.page_no,
            num_of_rows: body.num_of_rows,
            total_count: body.total_count,
        }
    }
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Validated contract year-month, rendered as `YYYYMM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create from parts, `None` if the month is out of range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

/// Query parameters for one upstream call
///
/// The credential is injected by the dispatcher, not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    /// 5-digit region code (`LAWD_CD`)
    pub region_code: String,
    /// Contract year-month (`DEAL_YMD`)
    pub year_month: YearMonth,
    pub page_no: u32,
    pub num_of_rows: u32,
}

impl RequestParameters {
    /// Upstream query parameters, excluding the credential
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("LAWD_CD", self.region_code.clone()),
            ("DEAL_YMD", self.year_month.to_string()),
            ("pageNo", self.page_no.to_string()),
            ("numOfRows", self.num_of_rows.to_string()),
        ]
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy between transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffType {
    /// Same delay every attempt
    Constant,
    /// Delay grows by the initial delay each attempt
    Linear,
    /// Delay doubles each attempt
    #[default]
    Exponential,
}
