//! HTTP access to the NEIS meal service endpoint.

use reqwest::{Client, Request};
use sikdan_core::{
    model::{DateToken, SchoolId},
    ports::PortError,
};
use tracing::debug;

/// Issues meal service queries for one school.
pub struct NeisClient {
    client: Client,
    base_url: String,
    school: SchoolId,
}

impl NeisClient {
    /// Create a client for `school` against the endpoint at `base_url`.
    #[must_use]
    pub fn new<U: Into<String>>(client: Client, base_url: U, school: SchoolId) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            school,
        }
    }

    /// Build the GET request for a single date.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Network`] when the base URL cannot be parsed.
    pub fn build_request(&self, date: &DateToken) -> Result<Request, PortError> {
        self.client
            .get(&self.base_url)
            .query(&[
                ("ATPT_OFCDC_SC_CODE", self.school.office_code.as_str()),
                ("SD_SCHUL_CODE", self.school.school_code.as_str()),
                ("MLSV_YMD", date.as_str()),
            ])
            .build()
            .map_err(PortError::from)
    }

    /// Fetch the raw XML document for a date.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Network`] on transport failure or a non-success status.
    pub async fn fetch_meal_xml(&self, date: &DateToken) -> Result<String, PortError> {
        let request = self.build_request(date)?;
        debug!(url = %request.url(), "requesting meal service");

        self.client
            .execute(request)
            .await
            .map_err(PortError::from)?
            .error_for_status()
            .map_err(PortError::from)?
            .text()
            .await
            .map_err(PortError::from)
    }
}
