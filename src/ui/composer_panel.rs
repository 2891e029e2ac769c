//! Custom quiz composer screen

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::quiz::composer::MIN_SELECTED_TOPICS;
use crate::theme::Theme;

/// Draw the custom quiz topic selection
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(composer) = &state.composer else {
        return;
    };

    let block = Block::default()
        .title(format!(" Custom Quiz: {} ", composer.language()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(inner);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Pick completed topics to mix into one quiz",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
    ];

    for (i, topic) in composer.selectable_topics().iter().enumerate() {
        let highlighted = i == state.composer_selected;
        let checked = composer.is_selected(topic);

        let marker = if highlighted { "\u{25B6} " } else { "  " };
        let checkbox = if checked { "[x]" } else { "[ ]" };
        let style = if highlighted {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else if checked {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.fg_primary)
        };

        lines.push(Line::from(Span::styled(
            format!(" {}{} {}", marker, checkbox, topic),
            style,
        )));
    }
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let count = composer.selected_count();
    let count_color = if count >= MIN_SELECTED_TOPICS { theme.success } else { theme.warning };
    let summary = vec![
        Line::from(Span::styled(
            format!(" Selected: {} (minimum {})", count, MIN_SELECTED_TOPICS),
            Style::default().fg(count_color),
        )),
        Line::from(Span::styled(
            " Medium difficulty, 10 questions, 30 minutes",
            Style::default().fg(theme.fg_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(summary), chunks[1]);

    let hints = Line::from(Span::styled(
        " [j/k] Move    [Space] Toggle    [s] Start    [Esc] Back",
        Style::default().fg(theme.fg_muted),
    ));
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}
