//! High-level service facade over the configured school provider.

use crate::date::to_display_label;
use crate::model::{DateToken, MealReport, SchoolMeta};
use crate::plugin::SchoolPlugin;
use crate::ports::PortError;

/// Public entry point for loading a school's meals.
pub struct SikdanService {
    plugin: SchoolPlugin,
}

impl SikdanService {
    /// Create a new service bound to the provided school plugin.
    #[must_use]
    pub fn new(plugin: SchoolPlugin) -> Self {
        Self { plugin }
    }

    /// Metadata of the school this service serves.
    #[must_use]
    pub fn school(&self) -> &SchoolMeta {
        &self.plugin.meta
    }

    /// Load the meal report for a date.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the provider request fails.
    pub async fn meals_for(&self, date: &DateToken) -> Result<MealReport, PortError> {
        tracing::debug!(
            school = %self.plugin.meta.name,
            date = %to_display_label(date),
            "loading meals"
        );
        self.plugin.meal_port.meals(date).await
    }
}
