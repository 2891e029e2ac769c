//! Topic dashboard for the chosen language

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::curriculum::resolver::{TopicStatus, overall_percentage, resolve_status};
use crate::progress::LanguageProgress;
use crate::theme::Theme;

/// Draw the topic dashboard
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(graph) = &state.graph else {
        return;
    };
    let default_progress = LanguageProgress::default();
    let progress = state.progress.language(&graph.language).unwrap_or(&default_progress);

    let percentage = overall_percentage(graph, progress);
    let title = format!(" {} - {:.1}% complete ", graph.language, percentage);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .split(inner);

    draw_topic_list(frame, chunks[0], state, progress, theme);
    draw_detail(frame, chunks[1], state, progress, theme);

    let hints = Line::from(Span::styled(
        " [j/k] Move    [Enter] Quiz    [m] Mark tutorial    [c] Custom quiz    [r] Refresh    [Esc] Back",
        Style::default().fg(theme.fg_muted),
    ));
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}

fn draw_topic_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    progress: &LanguageProgress,
    theme: &Theme,
) {
    let Some(graph) = &state.graph else { return };

    let mut lines = vec![Line::from("")];
    for (i, topic) in graph.topics.iter().enumerate() {
        let status = resolve_status(topic, progress);
        let selected = i == state.dashboard_selected;

        let icon = match status {
            TopicStatus::Completed => "\u{2713}", // ✓
            TopicStatus::InProgress => "\u{25D0}", // ◐
            TopicStatus::Available => "\u{25CB}", // ○
            TopicStatus::Locked => "\u{00B7}",    // ·
        };
        let status_color = match status {
            TopicStatus::Completed => theme.success,
            TopicStatus::InProgress => theme.warning,
            TopicStatus::Available => theme.info,
            TopicStatus::Locked => theme.fg_muted,
        };

        let marker = if selected { "\u{25B6} " } else { "  " };
        let name_style = if selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else if status == TopicStatus::Locked {
            Style::default().fg(theme.fg_muted)
        } else {
            Style::default().fg(theme.fg_primary)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, name_style),
            Span::styled(format!("{} ", icon), Style::default().fg(status_color)),
            Span::styled(format!("{}. {:<32}", topic.level, topic.name), name_style),
            Span::styled(format!("{:<12}", status.label()), Style::default().fg(status_color)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Detail pane for the selected topic
fn draw_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    progress: &LanguageProgress,
    theme: &Theme,
) {
    let Some(graph) = &state.graph else { return };
    let Some(topic) = graph.topics.get(state.dashboard_selected) else { return };

    let record = progress.topic(&topic.name);
    let attempts = record.map(|r| r.quiz_attempts).unwrap_or(0);
    let best = record.map(|r| r.best_quiz_score).unwrap_or(0);
    let tutorial = record.map(|r| r.tutorial_completed).unwrap_or(false);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", topic.description),
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(vec![
            Span::styled(
                format!(" Attempts: {}    Best score: {}%    Tutorial: ", attempts, best),
                Style::default().fg(theme.fg_muted),
            ),
            Span::styled(
                if tutorial { "done" } else { "not done" },
                Style::default().fg(if tutorial { theme.success } else { theme.fg_muted }),
            ),
        ]),
    ];

    if !topic.prerequisites.is_empty() {
        let prereqs: Vec<&str> = topic.prerequisites.iter().map(String::as_str).collect();
        lines.push(Line::from(Span::styled(
            format!(" Requires: {}", prereqs.join(", ")),
            Style::default().fg(theme.fg_muted),
        )));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}
