//! Traits describing provider capabilities and shared error types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{DateToken, MealReport, SchoolMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the meal service backend.
pub enum PortError {
    /// Transport failed or the backend answered with a non-success status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
}

#[async_trait]
/// Trait for backends that serve a school's daily meals.
pub trait MealPort: Send + Sync {
    /// Metadata describing the school handled by this port.
    fn school(&self) -> &SchoolMeta;

    /// Fetch and normalize the meals served on the given date.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the upstream request fails.
    async fn meals(&self, date: &DateToken) -> Result<MealReport, PortError>;
}
