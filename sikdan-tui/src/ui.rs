use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, Panel};
use crate::view::{ERROR_MESSAGE, LOADING_MESSAGE, MealView};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, date input, panel, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, input_area, panel_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(format!("sikdan – {}", app.service.school().name))
        .block(Block::default().borders(Borders::ALL).title("급식 정보"));
    frame.render_widget(header, *header_area);

    let input = Paragraph::new(app.date_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("날짜 (YYYY-MM-DD, Enter 조회)"),
    );
    frame.render_widget(input, *input_area);

    match &app.panel {
        Panel::Initial => {}
        Panel::Loading => draw_message(frame, *panel_area, LOADING_MESSAGE, Color::Yellow),
        Panel::Error => draw_message(frame, *panel_area, ERROR_MESSAGE, Color::Red),
        Panel::Content(report) => draw_content(frame, &MealView::from_report(report), *panel_area),
    }

    let status = Paragraph::new("숫자/- 입력 · Backspace 지우기 · Enter 조회 · Esc/Ctrl-C 종료")
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, *status_area);

    if let Some(notice) = app.notice {
        draw_notice(frame, area, notice);
    }
}

fn draw_message(frame: &mut Frame<'_>, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_content(frame: &mut Frame<'_>, view: &MealView, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(view.title.as_str())
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // slots
            Constraint::Length(3), // nutrients
        ])
        .split(inner);

    let chunks = layout_chunks.as_ref();
    let [slots_area, nutrients_area] = chunks else {
        return;
    };

    let slot_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(*slots_area);

    for (slot_view, column) in view.slots.iter().zip(slot_columns.iter()) {
        let items = slot_view
            .lines()
            .into_iter()
            .map(ListItem::new)
            .collect::<Vec<ListItem<'_>>>();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(slot_view.slot.label()),
        );
        frame.render_widget(list, *column);
    }

    let nutrient_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(*nutrients_area);

    for (nutrient_view, column) in view.nutrients.iter().zip(nutrient_columns.iter()) {
        let value = Paragraph::new(nutrient_view.value.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(nutrient_view.nutrient.marker()),
            );
        frame.render_widget(value, *column);
    }
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, notice: &str) {
    let popup = centered(area, 40, 5);
    let paragraph = Paragraph::new(vec![
        Line::from(notice),
        Line::from(""),
        Line::from("아무 키나 눌러 닫기").style(Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("알림")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
