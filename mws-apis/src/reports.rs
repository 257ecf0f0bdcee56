//! Reports API section.
//!
//! Reports are requested, generated asynchronously by the service, then
//! downloaded as flat files in the marketplace charset.

use mws_core::Client;
use mws_core::config::{ClientConfig, SectionConfig};
use mws_core::error::Result;
use mws_core::operation::Operation;
use mws_core::parser::{FlatFile, XmlResponse};
use tracing::debug;

/// Reports section: path `/`, version `2009-01-01`, merchant sent as `Merchant`.
pub const REPORTS: SectionConfig =
    SectionConfig::new("/", "2009-01-01").merchant_param("Merchant");

/// Optional parameters for `RequestReport`.
#[derive(Debug, Clone, Default)]
pub struct RequestReportParams {
    /// Start of the reported period, ISO 8601.
    pub start_date: Option<String>,
    /// End of the reported period, ISO 8601.
    pub end_date: Option<String>,
    /// Report-type specific options, e.g. `ShowSalesChannel=true`.
    pub report_options: Option<String>,
    /// Marketplaces to report on.
    pub marketplace_ids: Vec<String>,
}

impl RequestReportParams {
    fn apply(self, operation: Operation) -> Operation {
        operation
            .optional_param("StartDate", self.start_date)
            .optional_param("EndDate", self.end_date)
            .optional_param("ReportOptions", self.report_options)
            .list_param("MarketplaceIdList.Id", self.marketplace_ids)
    }
}

/// Filters for `GetReportRequestList`.
#[derive(Debug, Clone, Default)]
pub struct ReportRequestListParams {
    /// Report request ids to return.
    pub report_request_ids: Vec<String>,
    /// Report types to return.
    pub report_types: Vec<String>,
    /// Processing statuses to return, e.g. `_DONE_`.
    pub processing_statuses: Vec<String>,
    /// Maximum number of requests to return.
    pub max_count: Option<u32>,
    /// Earliest request date, ISO 8601.
    pub requested_from_date: Option<String>,
    /// Latest request date, ISO 8601.
    pub requested_to_date: Option<String>,
}

impl ReportRequestListParams {
    fn apply(self, operation: Operation) -> Operation {
        operation
            .list_param("ReportRequestIdList.Id", self.report_request_ids)
            .list_param("ReportTypeList.Type", self.report_types)
            .list_param("ReportProcessingStatusList.Status", self.processing_statuses)
            .optional_param("MaxCount", self.max_count.map(|count| count.to_string()))
            .optional_param("RequestedFromDate", self.requested_from_date)
            .optional_param("RequestedToDate", self.requested_to_date)
    }
}

/// Filters for `GetReportList`.
#[derive(Debug, Clone, Default)]
pub struct ReportListParams {
    /// Maximum number of reports to return.
    pub max_count: Option<u32>,
    /// Report types to return.
    pub report_types: Vec<String>,
    /// Only acknowledged (or only unacknowledged) reports.
    pub acknowledged: Option<bool>,
    /// Report request ids the reports were generated for.
    pub report_request_ids: Vec<String>,
    /// Earliest availability date, ISO 8601.
    pub available_from_date: Option<String>,
    /// Latest availability date, ISO 8601.
    pub available_to_date: Option<String>,
}

impl ReportListParams {
    fn apply(self, operation: Operation) -> Operation {
        operation
            .optional_param("MaxCount", self.max_count.map(|count| count.to_string()))
            .list_param("ReportTypeList.Type", self.report_types)
            .optional_param("Acknowledged", self.acknowledged.map(|ack| ack.to_string()))
            .list_param("ReportRequestIdList.Id", self.report_request_ids)
            .optional_param("AvailableFromDate", self.available_from_date)
            .optional_param("AvailableToDate", self.available_to_date)
    }
}

/// Client for the Reports section.
#[derive(Debug)]
pub struct Reports {
    client: Client,
}

impl Reports {
    /// Creates a Reports client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(config, REPORTS)?,
        })
    }

    /// Creates a Reports client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// The underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The underlying client, for credential or marketplace changes.
    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    /// Asks the service to generate a report.
    pub async fn request_report(
        &mut self,
        report_type: &str,
        params: RequestReportParams,
    ) -> Result<XmlResponse> {
        let operation =
            params.apply(Operation::new("RequestReport").param("ReportType", report_type));
        self.run(operation).await
    }

    /// Lists report requests of the last 90 days.
    pub async fn get_report_request_list(
        &mut self,
        params: ReportRequestListParams,
    ) -> Result<XmlResponse> {
        let operation = params.apply(Operation::new("GetReportRequestList"));
        self.run(operation).await
    }

    /// Continues a report request listing.
    pub async fn get_report_request_list_by_next_token(
        &mut self,
        next_token: &str,
    ) -> Result<XmlResponse> {
        let operation =
            Operation::new("GetReportRequestListByNextToken").param("NextToken", next_token);
        self.run(operation).await
    }

    /// Lists reports available for download.
    pub async fn get_report_list(&mut self, params: ReportListParams) -> Result<XmlResponse> {
        let operation = params.apply(Operation::new("GetReportList"));
        self.run(operation).await
    }

    /// Continues a report listing.
    pub async fn get_report_list_by_next_token(
        &mut self,
        next_token: &str,
    ) -> Result<XmlResponse> {
        let operation = Operation::new("GetReportListByNextToken").param("NextToken", next_token);
        self.run(operation).await
    }

    /// Downloads a report.
    ///
    /// The body is decoded in the charset the response names, else the
    /// marketplace's.
    pub async fn get_report(&mut self, report_id: &str) -> Result<FlatFile> {
        self.client.set_operation("GetReport", [("ReportId", report_id)]);
        let report: FlatFile = self.client.execute_as().await?;
        if !report.is_valid() {
            debug!(report_id, "Report has no matching Content-MD5");
        }
        Ok(report)
    }

    async fn run(&mut self, operation: Operation) -> Result<XmlResponse> {
        self.client.set_operation_value(operation);
        self.client.execute_as().await
    }
}
