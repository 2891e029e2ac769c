//! UI rendering components

pub mod composer_panel;
pub mod dashboard;
pub mod languages;
pub mod quiz_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let chunks =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(frame.area());

    match state.screen {
        Screen::Languages => languages::draw(frame, chunks[0], state, theme),
        Screen::Dashboard => dashboard::draw(frame, chunks[0], state, theme),
        Screen::Quiz => quiz_panel::draw(frame, chunks[0], state, theme),
        Screen::Composer => composer_panel::draw(frame, chunks[0], state, theme),
    }

    draw_status_line(frame, chunks[1], state, theme);
}

/// Bottom status line, shared by every screen
fn draw_status_line(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(message) = &state.status.message else {
        return;
    };

    let style = if state.status.is_error {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.info)
    };

    let line = Line::from(Span::styled(format!(" {}", message), style));
    frame.render_widget(Paragraph::new(line), area);
}
