//! Bundle pairing a school with the port that serves its meals.

use std::sync::Arc;

use crate::model::SchoolMeta;
use crate::ports::MealPort;

/// Provider implementation for a single school.
pub struct SchoolPlugin {
    /// Static metadata describing the school.
    pub meta: SchoolMeta,
    /// Implementation for fetching meals.
    pub meal_port: Arc<dyn MealPort>,
}
