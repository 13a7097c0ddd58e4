//! Text shown for a meal report, independent of the widgets that draw it.

use sikdan_core::{
    date::to_display_label,
    model::{MealReport, MealSlot, Nutrient},
};

/// Label for a nutrient without a positive total.
pub(crate) const NO_INFORMATION: &str = "정보 없음";

/// Shown instead of content when a search fails.
pub(crate) const ERROR_MESSAGE: &str = "급식 정보를 불러오지 못했습니다. 잠시 후 다시 시도해주세요.";

pub(crate) const LOADING_MESSAGE: &str = "급식 정보를 불러오는 중…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SlotBody {
    /// Dishes in serving order.
    Items(Vec<String>),
    NoInformation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlotView {
    pub slot: MealSlot,
    pub body: SlotBody,
}

impl SlotView {
    /// Lines as displayed: numbered dishes or the single placeholder.
    pub(crate) fn lines(&self) -> Vec<String> {
        match &self.body {
            SlotBody::Items(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| format!("{}. {item}", idx + 1))
                .collect(),
            SlotBody::NoInformation(label) => vec![label.clone()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NutrientView {
    pub nutrient: Nutrient,
    pub value: String,
}

/// Everything the content panel shows for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MealView {
    pub title: String,
    pub slots: Vec<SlotView>,
    pub nutrients: Vec<NutrientView>,
}

impl MealView {
    pub(crate) fn from_report(report: &MealReport) -> Self {
        let title = format!("{} 급식 정보", to_display_label(&report.date));

        let slots = MealSlot::ALL
            .into_iter()
            .map(|slot| SlotView {
                slot,
                body: slot_body(slot, report.meals.dishes(slot)),
            })
            .collect();

        let nutrients = Nutrient::ALL
            .into_iter()
            .map(|nutrient| NutrientView {
                nutrient,
                value: nutrient_value(report.nutrients.get(nutrient)),
            })
            .collect();

        Self {
            title,
            slots,
            nutrients,
        }
    }
}

fn slot_body(slot: MealSlot, dishes: &[String]) -> SlotBody {
    if dishes.is_empty() {
        SlotBody::NoInformation(format!("{} 정보가 없습니다.", slot.label()))
    } else {
        SlotBody::Items(dishes.to_vec())
    }
}

/// Zero reads the same as a missing value.
pub(crate) fn nutrient_value(grams: f64) -> String {
    if grams > 0.0 {
        format!("{grams:.1}g")
    } else {
        NO_INFORMATION.to_owned()
    }
}
