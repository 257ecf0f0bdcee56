//! Feeds API section.
//!
//! Uploads inventory and order data and reads back how it was processed.
//! Feed bodies are either XML documents or tab-separated flat files; the
//! client picks the content type from the body.

use mws_core::Client;
use mws_core::config::{ClientConfig, SectionConfig};
use mws_core::error::Result;
use mws_core::operation::Operation;
use mws_core::parser::{Parsed, XmlResponse};
use tracing::debug;

/// Feeds section: path `/`, version `2009-01-01`, merchant sent as `Merchant`.
pub const FEEDS: SectionConfig = SectionConfig::new("/", "2009-01-01").merchant_param("Merchant");

/// Optional parameters for `SubmitFeed`.
#[derive(Debug, Clone, Default)]
pub struct SubmitFeedParams {
    /// Marketplaces the feed applies to.
    pub marketplace_ids: Vec<String>,
    /// Replace all existing data for the feed type.
    pub purge_and_replace: Option<bool>,
}

impl SubmitFeedParams {
    /// Params targeting the given marketplaces.
    pub fn for_marketplaces<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            marketplace_ids: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    fn apply(self, operation: Operation) -> Operation {
        operation
            .list_param("MarketplaceIdList.Id", self.marketplace_ids)
            .optional_param(
                "PurgeAndReplace",
                self.purge_and_replace.map(|purge| purge.to_string()),
            )
    }
}

/// Filters for `GetFeedSubmissionList` and `GetFeedSubmissionCount`.
#[derive(Debug, Clone, Default)]
pub struct FeedSubmissionListParams {
    /// Submission ids to return. Other filters are ignored by the service
    /// when this is set.
    pub feed_submission_ids: Vec<String>,
    /// Maximum number of submissions to return.
    pub max_count: Option<u32>,
    /// Feed types to return.
    pub feed_types: Vec<String>,
    /// Processing statuses to return, e.g. `_DONE_`.
    pub processing_statuses: Vec<String>,
    /// Earliest submission date, ISO 8601.
    pub submitted_from_date: Option<String>,
    /// Latest submission date, ISO 8601.
    pub submitted_to_date: Option<String>,
}

impl FeedSubmissionListParams {
    fn apply(self, operation: Operation) -> Operation {
        operation
            .list_param("FeedSubmissionIdList.Id", self.feed_submission_ids)
            .optional_param("MaxCount", self.max_count.map(|count| count.to_string()))
            .list_param("FeedTypeList.Type", self.feed_types)
            .list_param("FeedProcessingStatusList.Status", self.processing_statuses)
            .optional_param("SubmittedFromDate", self.submitted_from_date)
            .optional_param("SubmittedToDate", self.submitted_to_date)
    }
}

/// Client for the Feeds section.
#[derive(Debug)]
pub struct Feeds {
    client: Client,
}

impl Feeds {
    /// Creates a Feeds client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(config, FEEDS)?,
        })
    }

    /// Creates a Feeds client from environment variables.
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

    /// Uploads a feed.
    ///
    /// `content` starting with `<?xml` is sent as XML, anything else as a
    /// tab-separated flat file in the marketplace charset.
    pub async fn submit_feed(
        &mut self,
        content: &str,
        feed_type: &str,
        params: SubmitFeedParams,
    ) -> Result<XmlResponse> {
        debug!(feed_type, content_length = content.len(), "Submitting feed");
        self.client.set_body(Some(content))?;
        let operation = params.apply(Operation::new("SubmitFeed").param("FeedType", feed_type));
        let result = self.run(operation).await;
        if result.is_err() {
            // Later calls on this section must not carry the rejected feed.
            self.client.set_body(None)?;
        }
        result
    }

    /// Lists feed submissions of the last 90 days.
    pub async fn get_feed_submission_list(
        &mut self,
        params: FeedSubmissionListParams,
    ) -> Result<XmlResponse> {
        let operation = params.apply(Operation::new("GetFeedSubmissionList"));
        self.run(operation).await
    }

    /// Continues a feed submission listing.
    pub async fn get_feed_submission_list_by_next_token(
        &mut self,
        next_token: &str,
    ) -> Result<XmlResponse> {
        let operation =
            Operation::new("GetFeedSubmissionListByNextToken").param("NextToken", next_token);
        self.run(operation).await
    }

    /// Counts feed submissions of the last 90 days.
    ///
    /// Submission ids and `max_count` are not accepted by this call and
    /// are dropped.
    pub async fn get_feed_submission_count(
        &mut self,
        params: FeedSubmissionListParams,
    ) -> Result<XmlResponse> {
        let params = FeedSubmissionListParams {
            feed_submission_ids: Vec::new(),
            max_count: None,
            ..params
        };
        let operation = params.apply(Operation::new("GetFeedSubmissionCount"));
        self.run(operation).await
    }

    /// Cancels submissions that have not started processing.
    pub async fn cancel_feed_submissions(
        &mut self,
        params: FeedSubmissionListParams,
    ) -> Result<XmlResponse> {
        let params = FeedSubmissionListParams {
            max_count: None,
            processing_statuses: Vec::new(),
            ..params
        };
        let operation = params.apply(Operation::new("CancelFeedSubmissions"));
        self.run(operation).await
    }

    /// Fetches the processing report of a submission.
    ///
    /// Reports come back as a flat file with a summary block, or as XML for
    /// XML feeds. A report that is not ready yet fails with
    /// [`FaultKind::FeedProcessingResultNotReady`](mws_core::FaultKind).
    pub async fn get_feed_submission_result(
        &mut self,
        feed_submission_id: &str,
    ) -> Result<Parsed> {
        self.client.set_operation(
            "GetFeedSubmissionResult",
            [("FeedSubmissionId", feed_submission_id)],
        );
        self.client.execute().await
    }

    async fn run(&mut self, operation: Operation) -> Result<XmlResponse> {
        self.client.set_operation_value(operation);
        self.client.execute_as().await
    }
}
