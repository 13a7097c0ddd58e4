use std::sync::Arc;

use sikdan_core::{
    date,
    model::{DateToken, MealReport},
    ports::PortError,
    service::SikdanService,
};
use tracing::error;

/// Shown when a search is started without a date.
pub(crate) const EMPTY_DATE_NOTICE: &str = "날짜를 선택해주세요.";

/// Longest input accepted, `YYYY-MM-DD`.
pub(crate) const DATE_INPUT_LEN: usize = 10;

/// Which of the mutually exclusive panels is visible.
#[derive(Debug, Clone)]
pub(crate) enum Panel {
    /// Nothing searched yet.
    Initial,
    Loading,
    Content(MealReport),
    Error,
}

pub(crate) struct App {
    pub service: Arc<SikdanService>,

    pub date_input: String,
    pub panel: Panel,

    /// Blocking notice; input goes to dismissing it while set.
    pub notice: Option<&'static str>,
}

impl App {
    pub(crate) fn new(service: Arc<SikdanService>) -> Self {
        Self {
            service,
            date_input: date::today_display(),
            panel: Panel::Initial,
            notice: None,
        }
    }

    /// Enter the loading state for the current input.
    ///
    /// Returns `None` and raises the notice instead when the input is empty;
    /// the visible panel is left as it was.
    pub(crate) fn begin_search(&mut self) -> Option<DateToken> {
        let input = self.date_input.trim();
        if input.is_empty() {
            self.notice = Some(EMPTY_DATE_NOTICE);
            return None;
        }

        let token = date::to_api_token(input);
        self.panel = Panel::Loading;
        Some(token)
    }

    /// Leave the loading state with either the full report or the error panel.
    pub(crate) fn finish_search(&mut self, result: Result<MealReport, PortError>) {
        self.panel = match result {
            Ok(report) => Panel::Content(report),
            Err(err) => {
                error!(%err, "meal search failed");
                Panel::Error
            }
        };
    }

    pub(crate) fn push_date_char(&mut self, character: char) {
        let accepted = character.is_ascii_digit() || character == '-';
        if accepted && self.date_input.chars().count() < DATE_INPUT_LEN {
            self.date_input.push(character);
        }
    }
}
