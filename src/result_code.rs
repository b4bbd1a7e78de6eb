//! Upstream result-code taxonomy and result classification
//!
//! The public data portal documents a fixed set of result codes. Every
//! response envelope's `resultCode` is looked up here and classified as a
//! success, a recoverable (transient) error, or a fatal error.

use crate::error::Error;
use crate::types::Header;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Broad category of a result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    Normal,
    System,
    RequestParameter,
    Authorization,
}

/// Documented upstream result codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Normal,
    ApplicationError,
    DbError,
    NoData,
    HttpError,
    ServiceTimeout,
    InvalidRequestParameter,
    NoMandatoryRequestParameters,
    NoOpenapiService,
    ServiceAccessDenied,
    LimitedNumberOfServiceRequestsExceeds,
    ServiceKeyIsNotRegistered,
    DeadlineHasExpired,
    UnregisteredIp,
    UnsignedCall,
}

impl ResultCode {
    /// Every documented code, in table order
    pub const ALL: [ResultCode; 15] = [
        ResultCode::Normal,
        ResultCode::ApplicationError,
        ResultCode::DbError,
        ResultCode::NoData,
        ResultCode::HttpError,
        ResultCode::ServiceTimeout,
        ResultCode::InvalidRequestParameter,
        ResultCode::NoMandatoryRequestParameters,
        ResultCode::NoOpenapiService,
        ResultCode::ServiceAccessDenied,
        ResultCode::LimitedNumberOfServiceRequestsExceeds,
        ResultCode::ServiceKeyIsNotRegistered,
        ResultCode::DeadlineHasExpired,
        ResultCode::UnregisteredIp,
        ResultCode::UnsignedCall,
    ];

    /// Code as documented by the upstream service
    pub fn code(self) -> &'static str {
        match self {
            ResultCode::Normal => "00",
            ResultCode::ApplicationError => "01",
            ResultCode::DbError => "02",
            ResultCode::NoData => "03",
            ResultCode::HttpError => "04",
            ResultCode::ServiceTimeout => "05",
            ResultCode::InvalidRequestParameter => "10",
            ResultCode::NoMandatoryRequestParameters => "11",
            ResultCode::NoOpenapiService => "12",
            ResultCode::ServiceAccessDenied => "20",
            ResultCode::LimitedNumberOfServiceRequestsExceeds => "22",
            ResultCode::ServiceKeyIsNotRegistered => "30",
            ResultCode::DeadlineHasExpired => "31",
            ResultCode::UnregisteredIp => "32",
            ResultCode::UnsignedCall => "33",
        }
    }

    /// Message as documented by the upstream service
    pub fn message(self) -> &'static str {
        match self {
            ResultCode::Normal => "NORMAL SERVICE.",
            ResultCode::ApplicationError => "APPLICATION ERROR",
            ResultCode::DbError => "DB ERROR",
            ResultCode::NoData => "NO DATA",
            ResultCode::HttpError => "HTTP ERROR",
            ResultCode::ServiceTimeout => "SERVICETIMEOUT",
            ResultCode::InvalidRequestParameter => "INVALID REQUEST PARAMETER ERROR",
            ResultCode::NoMandatoryRequestParameters => "NO_MANDATORY_REQUEST_PARAMETERS_ERROR",
            ResultCode::NoOpenapiService => "NO_OPENAPI_SERVICE_ERROR",
            ResultCode::ServiceAccessDenied => "SERVICE_ACCESS_DENIED_ERROR",
            ResultCode::LimitedNumberOfServiceRequestsExceeds => {
                "LIMITED_NUMBER_OF_SERVICE_REQUESTS_EXCEEDS_ERROR"
            }
            ResultCode::ServiceKeyIsNotRegistered => "SERVICE_KEY_IS_NOT_REGISTERED_ERROR",
            ResultCode::DeadlineHasExpired => "DEADLINE_HAS_EXPIRED_ERROR",
            ResultCode::UnregisteredIp => "UNREGISTERED_IP_ERROR",
            ResultCode::UnsignedCall => "UNSIGNED_CALL_ERROR",
        }
    }

    pub fn category(self) -> ResultCategory {
        match self {
            ResultCode::Normal => ResultCategory::Normal,
            ResultCode::ApplicationError
            | ResultCode::DbError
            | ResultCode::NoData
            | ResultCode::HttpError
            | ResultCode::ServiceTimeout => ResultCategory::System,
            ResultCode::InvalidRequestParameter
            | ResultCode::NoMandatoryRequestParameters
            | ResultCode::NoOpenapiService => ResultCategory::RequestParameter,
            ResultCode::ServiceAccessDenied
            | ResultCode::LimitedNumberOfServiceRequestsExceeds
            | ResultCode::ServiceKeyIsNotRegistered
            | ResultCode::DeadlineHasExpired
            | ResultCode::UnregisteredIp
            | ResultCode::UnsignedCall => ResultCategory::Authorization,
        }
    }

    /// The designated success sentinel
    pub fn is_success(self) -> bool {
        self == ResultCode::Normal
    }

    /// Transient upstream conditions that may clear on a later call
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ResultCode::DbError
                | ResultCode::HttpError
                | ResultCode::ServiceTimeout
                | ResultCode::LimitedNumberOfServiceRequestsExceeds
        )
    }

    /// Look up a raw result code, `None` if it is not documented
    ///
    /// Numeric codes compare by value, so `"000"` and `"00"` are the same.
    pub fn lookup(raw: &str) -> Option<ResultCode> {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw.parse::<u32>().ok().and_then(|n| BY_NUMBER.get(&n).copied());
        }
        ResultCode::ALL.into_iter().find(|c| c.code() == raw)
    }

    /// Look up a raw result code, defaulting to `APPLICATION_ERROR`
    pub fn from_code(raw: &str) -> ResultCode {
        Self::lookup(raw).unwrap_or(ResultCode::ApplicationError)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

static BY_NUMBER: LazyLock<HashMap<u32, ResultCode>> = LazyLock::new(|| {
    ResultCode::ALL
        .into_iter()
        .filter_map(|c| c.code().parse().ok().map(|n| (n, c)))
        .collect()
});

// ============================================================================
// Classification
// ============================================================================

/// Outcome of classifying an envelope header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Success,
    Recoverable { code: ResultCode, message: String },
    Fatal { code: ResultCode, message: String },
}

impl Classification {
    pub fn is_success(&self) -> bool {
        matches!(self, Classification::Success)
    }

    /// Convert into a result, carrying the header's raw code on failure
    ///
    /// A blank header code is replaced by the matched taxonomy code.
    pub fn into_result(self, header: &Header) -> crate::Result<()> {
        let raw_or = |code: ResultCode| {
            let raw = header.result_code.trim();
            if raw.is_empty() {
                code.code().to_string()
            } else {
                header.result_code.clone()
            }
        };
        match self {
            Classification::Success => Ok(()),
            Classification::Recoverable { code, message } => {
                Err(Error::api(raw_or(code), message, true))
            }
            Classification::Fatal { code, message } => Err(Error::api(raw_or(code), message, false)),
        }
    }
}

/// Classify an envelope header against the result-code taxonomy
///
/// An empty or unknown result code classifies as `APPLICATION_ERROR`. The
/// header's own message is preferred over the documented one.
pub fn classify(header: &Header) -> Classification {
    let code = ResultCode::from_code(&header.result_code);
    if code.is_success() {
        return Classification::Success;
    }

    let message = if header.result_msg.trim().is_empty() {
        code.message().to_string()
    } else {
        header.result_msg.clone()
    };

    if code.is_recoverable() {
        Classification::Recoverable { code, message }
    } else {
        Classification::Fatal { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_documented_codes() {
        for code in ResultCode::ALL {
            assert_eq!(ResultCode::lookup(code.code()), Some(code));
        }
    }

    #[test]
    fn test_lookup_numeric_normalization() {
        assert_eq!(ResultCode::lookup("000"), Some(ResultCode::Normal));
        assert_eq!(ResultCode::lookup("0"), Some(ResultCode::Normal));
        assert_eq!(ResultCode::lookup(" 03 "), Some(ResultCode::NoData));
        assert_eq!(ResultCode::lookup("030"), Some(ResultCode::ServiceKeyIsNotRegistered));
        assert_eq!(ResultCode::lookup("99"), None);
        assert_eq!(ResultCode::lookup("ERROR"), None);
    }

    #[test]
    fn test_from_code_defaults_to_application_error() {
        assert_eq!(ResultCode::from_code(""), ResultCode::ApplicationError);
        assert_eq!(ResultCode::from_code("ERROR"), ResultCode::ApplicationError);
        assert_eq!(ResultCode::from_code("77"), ResultCode::ApplicationError);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ResultCode::Normal.category(), ResultCategory::Normal);
        assert_eq!(ResultCode::NoData.category(), ResultCategory::System);
        assert_eq!(
            ResultCode::NoMandatoryRequestParameters.category(),
            ResultCategory::RequestParameter
        );
        assert_eq!(
            ResultCode::UnsignedCall.category(),
            ResultCategory::Authorization
        );
    }

    #[test]
    fn test_classify_success() {
        assert!(classify(&Header::new("00", "NORMAL SERVICE.")).is_success());
        assert!(classify(&Header::new("000", "OK")).is_success());
    }

    #[test]
    fn test_classify_no_data_is_error() {
        let header = Header::new("03", "NO DATA");
        let classification = classify(&header);
        assert_eq!(
            classification,
            Classification::Fatal {
                code: ResultCode::NoData,
                message: "NO DATA".into()
            }
        );

        let err = classification.into_result(&header).unwrap_err();
        assert_eq!(err.code(), "03");
        assert_eq!(err.message(), "NO DATA");
    }

    #[test]
    fn test_classify_recoverable() {
        let header = Header::new("22", "");
        match classify(&header) {
            Classification::Recoverable { code, message } => {
                assert_eq!(code, ResultCode::LimitedNumberOfServiceRequestsExceeds);
                assert_eq!(message, "LIMITED_NUMBER_OF_SERVICE_REQUESTS_EXCEEDS_ERROR");
            }
            other => panic!("expected recoverable, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_unknown_code_keeps_raw_code_and_message() {
        let header = Header::new("ERROR", "SERVICE ERROR");
        let classification = classify(&header);
        assert!(matches!(
            classification,
            Classification::Fatal {
                code: ResultCode::ApplicationError,
                ..
            }
        ));

        let err = classification.into_result(&header).unwrap_err();
        assert_eq!(err.code(), "ERROR");
        assert_eq!(err.message(), "SERVICE ERROR");
    }

    #[test]
    fn test_lookup_rejects_signed_codes() {
        assert_eq!(ResultCode::lookup("+00"), None);
        assert_eq!(ResultCode::lookup("-3"), None);
        assert!(!classify(&Header::new("+00", "OK")).is_success());
    }

    #[test]
    fn test_blank_result_code_reports_taxonomy_code() {
        for raw in ["", "   "] {
            let header = Header::new(raw, "");
            let err = classify(&header).into_result(&header).unwrap_err();
            assert_eq!(err.code(), ResultCode::ApplicationError.code());
            assert_eq!(err.message(), "APPLICATION ERROR");
        }
    }

    #[test]
    fn test_json_header_without_code_has_error_code() {
        let decoded = crate::decode::parse_response(
            r#"{"response":{"header":{"resultMsg":""},"body":{"items":""}}}"#,
        )
        .unwrap();
        let header = &decoded.envelope.header;
        let api = crate::error::ApiError::from(classify(header).into_result(header).unwrap_err());
        assert_eq!(api.code, "01");
        assert_eq!(api.kind, crate::error::ErrorKind::Domain);
    }
}
