//! Language picker screen

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::curriculum;
use crate::theme::Theme;

/// Draw the language picker
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Dojo ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Choose a language to practice",
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(""),
    ];

    for (i, language) in curriculum::supported_languages().iter().enumerate() {
        let selected = i == state.language_selected;
        let completed = state
            .progress
            .language(language)
            .map(|p| p.completed_count())
            .unwrap_or(0);
        let total = curriculum::graph_for(language).map(|g| g.len()).unwrap_or(0);

        let marker = if selected { "\u{25B6} " } else { "  " }; // ▶
        let style = if selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<14}", marker, language), style),
            Span::styled(
                format!("{}/{} topics completed", completed, total),
                Style::default().fg(theme.fg_muted),
            ),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k] Move    [Enter] Select    [q] Quit",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, inner);
}
