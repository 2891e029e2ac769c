//! Quiz screen, rendered per phase

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::quiz::{QuizPhase, QuizSession, config::ALLOWED_QUESTION_COUNTS};
use crate::service::models::{Answer, Question};
use crate::theme::Theme;

/// Draw the quiz screen for whatever phase the session is in
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(session) = &state.session else {
        return;
    };

    let overlay = centered_rect(80, 90, area);
    frame.render_widget(Clear, overlay);

    let title = match session.phase() {
        QuizPhase::Setup => format!(" Quiz Setup: {} ", session.config().target.label()),
        QuizPhase::Generating => " Generating Quiz... ".to_string(),
        QuizPhase::Active => format!(" Quiz: {} ", session.config().target.label()),
        QuizPhase::Completed => " Submitting... ".to_string(),
        QuizPhase::Results => " Quiz Results ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    match session.phase() {
        QuizPhase::Setup => draw_setup(frame, inner, session, theme),
        QuizPhase::Generating => draw_generating(frame, inner, session, theme),
        QuizPhase::Active => draw_active(frame, inner, state, session, theme),
        QuizPhase::Completed => draw_submitting(frame, inner, theme),
        QuizPhase::Results => draw_results(frame, inner, state, session, theme),
    }
}

fn draw_setup(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let config = session.config();
    let mut lines = vec![Line::from("")];

    if let Some(error) = session.error() {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.error),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  Difficulty",
        Style::default().fg(theme.fg_muted).add_modifier(Modifier::BOLD),
    )));
    for tier in crate::quiz::Difficulty::all() {
        let selected = *tier == config.difficulty;
        let prefix = if selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let style = if selected {
            Style::default().fg(theme.difficulty_color(*tier)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        lines.push(Line::from(Span::styled(format!("    {} {}", prefix, tier), style)));
    }
    lines.push(Line::from(Span::styled(
        format!("    {}", config.difficulty.description()),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "  Questions",
        Style::default().fg(theme.fg_muted).add_modifier(Modifier::BOLD),
    )));
    let mut count_spans = vec![Span::raw("    ")];
    for count in ALLOWED_QUESTION_COUNTS {
        let selected = count == config.num_questions;
        let style = if selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        count_spans.push(Span::styled(format!("[{:>2}] ", count), style));
    }
    lines.push(Line::from(count_spans));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("  Estimated time: {} minutes", config.estimated_minutes()),
        Style::default().fg(theme.info),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [j/k] Difficulty    [h/l] Questions    [Enter] Start    [Esc] Cancel",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_generating(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Generating quiz questions...",
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} questions at {} difficulty",
                session.config().num_questions,
                session.config().difficulty
            ),
            Style::default().fg(theme.fg_muted),
        )),
    ];

    let para = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

fn draw_active(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &QuizSession,
    theme: &Theme,
) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .split(area);

    draw_active_header(frame, chunks[0], session, theme);
    draw_question(frame, chunks[1], state, session, theme);
    draw_active_footer(frame, chunks[2], state, session, theme);
}

fn draw_active_header(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let seconds = session.seconds_remaining();
    let timer_color = if seconds <= 30 {
        theme.error
    } else if seconds <= 60 {
        theme.warning
    } else {
        theme.fg_primary
    };

    let mut spans = vec![
        Span::styled(
            format!(
                " Question {} of {}    ",
                session.current_index() + 1,
                session.questions().len()
            ),
            Style::default().fg(theme.fg_secondary),
        ),
        Span::styled(
            format!("{} answered    ", session.answered_count()),
            Style::default().fg(theme.fg_muted),
        ),
        Span::styled(
            format!("\u{23F1} {}", format_time(seconds)), // ⏱
            Style::default().fg(timer_color).add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(error) = session.error() {
        spans.push(Span::styled(
            format!("    {}", error),
            Style::default().fg(theme.error),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_question(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &QuizSession,
    theme: &Theme,
) {
    let Some(question) = session.current_question() else {
        return;
    };
    let answer = &session.answers()[session.current_index()];

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", question.kind()),
                Style::default().fg(theme.info),
            ),
            Span::styled(
                question.text(),
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    match question {
        Question::Mcq { options, .. } => {
            let chosen = match answer {
                Answer::Choice(i) => Some(*i),
                _ => None,
            };
            for (i, option) in options.iter().enumerate() {
                let selected = chosen == Some(i);
                let prefix = if selected { "\u{25CF}" } else { "\u{25CB}" };
                let letter = (b'A' + i as u8) as char;
                let style = if selected {
                    Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg_secondary)
                };
                lines.push(Line::from(Span::styled(
                    format!("   {} {}) {}", prefix, letter, option),
                    style,
                )));
                lines.push(Line::from(""));
            }
        }
        Question::Debugging { buggy_code, .. } => {
            for code_line in buggy_code.lines() {
                lines.push(Line::from(Span::styled(
                    format!("   {}", code_line),
                    Style::default().fg(theme.warning),
                )));
            }
            lines.push(Line::from(""));
            push_code_answer(&mut lines, answer, state.insert_mode, theme);
        }
        Question::Coding { .. } => {
            push_code_answer(&mut lines, answer, state.insert_mode, theme);
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Render the free-text answer area for coding and debugging questions
fn push_code_answer(lines: &mut Vec<Line<'_>>, answer: &Answer, insert_mode: bool, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        if insert_mode { " Your answer (editing):" } else { " Your answer:" },
        Style::default().fg(theme.fg_muted),
    )));

    match answer {
        Answer::Code(text) => {
            for code_line in text.lines() {
                lines.push(Line::from(Span::styled(
                    format!("   {}", code_line),
                    Style::default().fg(theme.fg_primary),
                )));
            }
            if insert_mode {
                lines.push(Line::from(Span::styled(
                    "   \u{2588}", // block cursor
                    Style::default().fg(theme.accent_primary),
                )));
            }
        }
        _ => {
            lines.push(Line::from(Span::styled(
                if insert_mode { "   \u{2588}" } else { "   (press i to type)" },
                Style::default().fg(theme.fg_muted),
            )));
        }
    }
}

fn draw_active_footer(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &QuizSession,
    theme: &Theme,
) {
    // One marker per question so skipped ones are visible before submitting
    let mut marker_spans = vec![Span::raw(" ")];
    for (i, answer) in session.answers().iter().enumerate() {
        let style = if i == session.current_index() {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else if answer.is_answered() {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.fg_muted)
        };
        let mark = if answer.is_answered() { "\u{25A0}" } else { "\u{25A1}" }; // ■ or □
        marker_spans.push(Span::styled(format!("{}{} ", i + 1, mark), style));
    }

    let hints = if state.insert_mode {
        " Typing    [Esc] Stop editing"
    } else {
        " [j/k] Option    [h/l] Question    [1-9] Jump    [i] Type    [s] Submit    [Esc] Abandon"
    };

    let lines = vec![
        Line::from(marker_spans),
        Line::from(Span::styled(hints, Style::default().fg(theme.fg_muted))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_submitting(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Submitting answers for grading...",
            Style::default().fg(theme.fg_primary),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_results(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &QuizSession,
    theme: &Theme,
) {
    let Some(result) = session.result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    let header_style = if result.passed {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
    };
    let verdict = if result.passed { "Passed!" } else { "Not passed" };
    let header = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} {}/{} correct ({}%)",
                verdict, result.score, result.total_questions, result.percentage
            ),
            header_style,
        )),
    ];
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), chunks[0]);

    let mut lines = Vec::new();
    for review in &result.detailed_results {
        let (mark, mark_color) = if review.is_correct {
            ("\u{2713}", theme.success)
        } else {
            ("\u{2717}", theme.error)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", mark), Style::default().fg(mark_color)),
            Span::styled(
                format!("Q{}. {}", review.question_number, review.question),
                Style::default().fg(theme.fg_primary),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "     Your answer: {}",
                format_answer(&review.user_answer, review.options.as_deref())
            ),
            Style::default().fg(theme.fg_secondary),
        )));
        if !review.is_correct {
            lines.push(Line::from(Span::styled(
                format!(
                    "     Correct: {}",
                    format_answer(&review.correct_answer, review.options.as_deref())
                ),
                Style::default().fg(theme.success),
            )));
        }
        if let Some(explanation) = &review.explanation {
            lines.push(Line::from(Span::styled(
                format!("     {}", explanation),
                Style::default().fg(theme.fg_muted),
            )));
        }
        lines.push(Line::from(""));
    }

    let review_para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.results_scroll, 0));
    frame.render_widget(review_para, chunks[1]);

    let hints = Line::from(Span::styled(
        " [j/k] Scroll    [r] Retake    [Enter/Esc] Back to dashboard",
        Style::default().fg(theme.fg_muted),
    ));
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}

/// Human-readable form of an answer, resolving MCQ indices to options
fn format_answer(answer: &Answer, options: Option<&[String]>) -> String {
    match answer {
        Answer::Unanswered => "(no answer)".to_string(),
        Answer::Choice(i) => {
            let letter = (b'A' + *i as u8) as char;
            match options.and_then(|opts| opts.get(*i)) {
                Some(option) => format!("{}) {}", letter, option),
                None => format!("option {}", letter),
            }
        }
        Answer::Code(text) => text.clone(),
    }
}

/// Format seconds as mm:ss
fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Create a centered rectangle with the given percentage of width and height
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formats_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn answers_format_for_review() {
        let options = vec!["foo".to_string(), "bar".to_string()];
        assert_eq!(format_answer(&Answer::Unanswered, None), "(no answer)");
        assert_eq!(format_answer(&Answer::Choice(1), Some(&options)), "B) bar");
        assert_eq!(format_answer(&Answer::Choice(3), Some(&options)), "option D");
        assert_eq!(format_answer(&Answer::Code("x = 1".into()), None), "x = 1");
    }
}
