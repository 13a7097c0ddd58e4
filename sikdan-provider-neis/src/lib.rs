//! Provider implementation for the NEIS open data meal service.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use sikdan_core::{
    model::{DateToken, MealReport, SchoolId, SchoolMeta},
    plugin::SchoolPlugin,
    ports::{MealPort, PortError},
};

/// HTTP access to the meal service endpoint.
pub mod client;
/// Normalization of the XML response.
pub mod parser;

pub use client::NeisClient;
pub use parser::parse;

/// Meal service endpoint.
pub const BASE_URL: &str = "https://open.neis.go.kr/hub/mealServiceDietInfo";
/// Provincial education office the school belongs to.
pub const OFFICE_CODE: &str = "J10";
/// School served by this provider.
pub const SCHOOL_CODE: &str = "7530183";

/// Meal lookups for the configured school.
pub struct NeisMealPort {
    client: NeisClient,
    meta: SchoolMeta,
}

impl NeisMealPort {
    /// Create a new meal port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a meal port that talks to a different endpoint.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(client: Client, base_url: U) -> Self {
        let meta = school_meta();
        Self {
            client: NeisClient::new(client, base_url, meta.id.clone()),
            meta,
        }
    }
}

#[async_trait]
impl MealPort for NeisMealPort {
    fn school(&self) -> &SchoolMeta {
        &self.meta
    }

    async fn meals(&self, date: &DateToken) -> Result<MealReport, PortError> {
        let xml = self.client.fetch_meal_xml(date).await?;
        let (meals, nutrients) = parser::parse(&xml);

        Ok(MealReport {
            date: date.clone(),
            meals,
            nutrients,
        })
    }
}

/// Build the plugin bundle for the NEIS provider.
#[must_use]
pub fn plugin(client: Client) -> SchoolPlugin {
    SchoolPlugin {
        meta: school_meta(),
        meal_port: Arc::new(NeisMealPort::new(client)),
    }
}

fn school_meta() -> SchoolMeta {
    SchoolMeta {
        id: SchoolId {
            office_code: OFFICE_CODE.to_owned(),
            school_code: SCHOOL_CODE.to_owned(),
        },
        name: String::from("경기도교육청 7530183"),
    }
}
