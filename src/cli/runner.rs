//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::decode::parse_response;
use crate::error::{ApiError, Error, Result, ResultExt};
use crate::region::{RegionLookup, StaticRegions};
use crate::result_code::{classify, ResultCode};
use crate::service::RentalQueryService;
use crate::types::RentalPage;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Query {
                region,
                deal_ymd,
                page_no,
                num_of_rows,
            } => self.query(region, deal_ymd, *page_no, *num_of_rows).await,
            Commands::Regions { sido } => {
                self.regions(sido.as_deref());
                Ok(())
            }
            Commands::ResultCodes => {
                self.result_codes();
                Ok(())
            }
            Commands::Parse { file } => self.parse(file),
        }
    }

    /// Load the client config: file (if given), then environment overrides
    fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let config = config.apply_env()?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    async fn query(&self, region: &str, deal_ymd: &str, page_no: u32, num_of_rows: u32) -> Result<()> {
        let config = self.load_config()?;
        let service = RentalQueryService::from_config(&config)?;

        match service
            .query_rentals_page(region, deal_ymd, page_no, num_of_rows)
            .await
        {
            Ok(page) => {
                self.output_message(&success_message(&page));
                Ok(())
            }
            Err(err) => {
                self.output_message(&failure_message(&err));
                Err(err)
            }
        }
    }

    fn regions(&self, sido: Option<&str>) {
        let lookup = StaticRegions;
        let regions = match sido {
            Some(sido) => lookup.regions_in(sido),
            None => lookup.regions(),
        };
        self.output_message(&json!({
            "count": regions.len(),
            "regions": regions,
        }));
    }

    fn result_codes(&self) {
        let codes: Vec<Value> = ResultCode::ALL
            .into_iter()
            .map(|code| {
                json!({
                    "name": code,
                    "code": code.code(),
                    "message": code.message(),
                    "category": code.category(),
                    "recoverable": code.is_recoverable(),
                })
            })
            .collect();
        self.output_message(&json!({ "resultCodes": codes }));
    }

    fn parse(&self, file: &Path) -> Result<()> {
        let body = fs::read_to_string(file)
            .with_context(|| format!("Failed to read response file '{}'", file.display()))?;

        let decoded = match parse_response(&body) {
            Ok(decoded) => decoded,
            Err(err) => {
                self.output_message(&failure_message(&err));
                return Err(err);
            }
        };

        let envelope = decoded.envelope;
        let outcome = classify(&envelope.header).into_result(&envelope.header);
        let mut message = json!({
            "format": decoded.format.to_string(),
            "header": envelope.header,
            "success": outcome.is_ok(),
            "data": envelope.body.items,
            "totalCount": envelope.body.total_count,
            "pageNo": envelope.body.page_no,
            "numOfRows": envelope.body.num_of_rows,
        });
        if let (Err(err), Some(obj)) = (&outcome, message.as_object_mut()) {
            let api = ApiError::from(err);
            obj.insert("errorCode".into(), Value::String(api.code));
            obj.insert("errorMessage".into(), Value::String(api.message));
        }
        self.output_message(&message);
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Body printed for a successful query
pub fn success_message(page: &RentalPage) -> Value {
    json!({
        "success": true,
        "data": page.items,
        "totalCount": page.total_count,
        "pageNo": page.page_no,
        "numOfRows": page.num_of_rows,
    })
}

/// Body printed for a failed query
pub fn failure_message(err: &Error) -> Value {
    let api = ApiError::from(err);
    json!({
        "success": false,
        "errorCode": api.code,
        "errorMessage": api.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RentalRecord;

    #[test]
    fn test_success_message_shape() {
        let page = RentalPage {
            items: vec![RentalRecord {
                apartment_name: Some("래미안".into()),
                ..Default::default()
            }],
            page_no: 1,
            num_of_rows: 10,
            total_count: 1,
        };
        let msg = success_message(&page);
        assert_eq!(msg["success"], true);
        assert_eq!(msg["data"][0]["aptNm"], "래미안");
        assert_eq!(msg["totalCount"], 1);
        assert_eq!(msg["pageNo"], 1);
        assert_eq!(msg["numOfRows"], 10);
    }

    #[test]
    fn test_failure_message_shape() {
        let msg = failure_message(&Error::api("03", "NO DATA", false));
        assert_eq!(
            msg,
            json!({"success": false, "errorCode": "03", "errorMessage": "NO DATA"})
        );
    }
}
