//! Domain data structures for meal slots, dishes, nutrients, and daily reports.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Meal slots a school serves on a single day.
pub enum MealSlot {
    /// Morning meal, `조식` upstream.
    Breakfast,
    /// Midday meal, `중식` upstream.
    Lunch,
    /// Evening meal, `석식` upstream.
    Dinner,
}

impl MealSlot {
    /// All slots in serving order.
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Map the localized slot name used by the upstream API.
    ///
    /// Returns `None` for names that do not denote one of the three slots
    /// (snacks and the like).
    #[must_use]
    pub fn from_upstream(name: &str) -> Option<Self> {
        match name.trim() {
            "조식" => Some(Self::Breakfast),
            "중식" => Some(Self::Lunch),
            "석식" => Some(Self::Dinner),
            _ => None,
        }
    }

    /// Localized display name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "조식",
            Self::Lunch => "중식",
            Self::Dinner => "석식",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Dish names per meal slot, in upstream row order.
///
/// Duplicates are kept as delivered.
pub struct MealCollection {
    breakfast: Vec<String>,
    lunch: Vec<String>,
    dinner: Vec<String>,
}

impl MealCollection {
    /// Dishes served in the given slot.
    #[must_use]
    pub fn dishes(&self, slot: MealSlot) -> &[String] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Append dishes to the end of a slot.
    pub fn extend<I>(&mut self, slot: MealSlot, dishes: I)
    where
        I: IntoIterator<Item = String>,
    {
        let target = match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        };
        target.extend(dishes);
    }

    /// True when no slot holds a dish.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        MealSlot::ALL
            .into_iter()
            .all(|slot| self.dishes(slot).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Macronutrients summed for a day.
pub enum Nutrient {
    /// Carbohydrate, grams.
    Carbohydrate,
    /// Protein, grams.
    Protein,
    /// Fat, grams.
    Fat,
}

impl Nutrient {
    /// All tracked nutrients in display and matching order.
    pub const ALL: [Self; 3] = [Self::Carbohydrate, Self::Protein, Self::Fat];

    /// Substring identifying a statement about this nutrient in upstream text.
    /// Doubles as the display label.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Carbohydrate => "탄수화물",
            Self::Protein => "단백질",
            Self::Fat => "지방",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Grams of each macronutrient summed over every row of a response.
pub struct NutrientTotals {
    /// Carbohydrate total in grams.
    pub carbohydrate: f64,
    /// Protein total in grams.
    pub protein: f64,
    /// Fat total in grams.
    pub fat: f64,
}

impl NutrientTotals {
    /// Add grams to one accumulator.
    pub fn add(&mut self, nutrient: Nutrient, grams: f64) {
        match nutrient {
            Nutrient::Carbohydrate => self.carbohydrate += grams,
            Nutrient::Protein => self.protein += grams,
            Nutrient::Fat => self.fat += grams,
        }
    }

    /// Current total for one nutrient.
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Carbohydrate => self.carbohydrate,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Compact `YYYYMMDD` date expected by the upstream API.
///
/// Not validated against the calendar.
pub struct DateToken(pub String);

impl DateToken {
    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifiers the upstream API uses to select a school.
pub struct SchoolId {
    /// Provincial education office code (`ATPT_OFCDC_SC_CODE`).
    pub office_code: String,
    /// School code (`SD_SCHUL_CODE`).
    pub school_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a school and its human-friendly name.
pub struct SchoolMeta {
    /// Upstream identifiers.
    pub id: SchoolId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Everything shown for one date: dishes per slot and nutrient totals.
pub struct MealReport {
    /// Date the report was requested for.
    pub date: DateToken,
    /// Dishes per slot.
    pub meals: MealCollection,
    /// Summed macronutrients.
    pub nutrients: NutrientTotals,
}
