//! UI rendering for the composer

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};
use std::time::{Duration, Instant};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::state::AppState;
use crate::compose::{FlowState, MAX_POST_CHARS};
use crate::models::SubmissionResult;

const TITLE: &str = "Hello friend, what would you like to share?";

/// Gauge switches to the warning color from this many characters
const NEAR_LIMIT: usize = MAX_POST_CHARS - 20;

/// Characters of the echoed post shown next to the success message
const ECHO_PREVIEW_CHARS: usize = 40;

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(3),    // Draft
            Constraint::Length(1), // Progress gauge
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_title_bar(frame, state, chunks[0]);
    render_draft(frame, state, chunks[1]);
    render_gauge(frame, state, chunks[2]);
    render_feedback(frame, state, chunks[3]);
    render_status_bar(frame, state, chunks[4]);
}

fn render_title_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let close = " Esc ✕ ";
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(close.width() as u16)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" 🐦 ", Style::default()),
        Span::styled(TITLE, colors.text()),
    ]))
    .style(Style::default().bg(colors.bg_bar));
    frame.render_widget(title, halves[0]);

    let close = Paragraph::new(Span::styled(close, colors.text_error()))
        .style(Style::default().bg(colors.bg_bar));
    frame.render_widget(close, halves[1]);
}

fn render_draft(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus())
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    let width = usize::from(inner.width);

    let lines: Vec<Line> = if state.draft.text().is_empty() {
        vec![Line::from(Span::styled(
            "What's on your mind?",
            colors.text_muted(),
        ))]
    } else {
        state
            .draft
            .text()
            .split('\n')
            .flat_map(|line| wrap_line(line, width))
            .map(|row| Line::from(Span::styled(row, colors.text())))
            .collect()
    };

    // Keep the cursor row visible
    let (cursor_row, cursor_col) = cursor_cell(state.draft.before_cursor(), width);
    let height = usize::from(inner.height);
    let scroll = (cursor_row + 1).saturating_sub(height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);

    if state.flow.state() != FlowState::Submitting && width > 0 && height > 0 {
        let x = inner.x + cursor_col as u16;
        let y = inner.y + (cursor_row - scroll) as u16;
        frame.set_cursor_position((x, y));
    }
}

fn render_gauge(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let progress = state.draft.progress();

    let gauge = Gauge::default()
        .gauge_style(colors.gauge(progress >= NEAR_LIMIT))
        .ratio(progress as f64 / MAX_POST_CHARS as f64)
        .label(format!("{progress}/{MAX_POST_CHARS}"));
    frame.render_widget(gauge, area);
}

fn render_feedback(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let mut spans = match (state.flow.state(), state.flow.feedback()) {
        (FlowState::Submitting, _) => vec![Span::styled(" Sending...", colors.text_muted())],
        (_, Some(result @ SubmissionResult::Success { id, echoed_text })) => vec![
            Span::styled(format!(" ✓ {}", result.message()), colors.text_success()),
            Span::styled(
                format!("  \"{}\" (id {id})", preview(echoed_text, ECHO_PREVIEW_CHARS)),
                colors.text_muted(),
            ),
        ],
        (_, Some(result @ SubmissionResult::Failure { reason })) => vec![
            Span::styled(format!(" ✗ {}", result.message()), colors.text_error()),
            Span::styled(format!("  {reason}"), colors.text_muted()),
        ],
        _ => Vec::new(),
    };

    if let Some(due) = state.flow.cleanup_at() {
        let secs = whole_secs_left(due.saturating_duration_since(Instant::now()));
        spans.push(Span::styled(format!("  · clears in {secs}s"), colors.text_muted()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let content = if state.status.is_empty() {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled("Ctrl+S", colors.key_hint()),
            Span::styled(": send  ", colors.text_muted()),
            Span::styled("Ctrl+T", colors.key_hint()),
            Span::styled(": theme  ", colors.text_muted()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(": close", colors.text_muted()),
        ]
    } else {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(&state.status, colors.text_muted()),
        ]
    };

    let status = Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_bar));
    frame.render_widget(status, area);
}

/// Single-line preview of at most `max_chars` characters
fn preview(text: &str, max_chars: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= max_chars {
        text
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Seconds left, rounded up so the countdown never shows 0 early
fn whole_secs_left(left: Duration) -> u64 {
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

/// Split one logical line into rows of at most `width` display columns
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows = vec![String::new()];
    let mut col = 0;
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if col + w > width && col > 0 {
            rows.push(String::new());
            col = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        col += w;
    }
    rows
}

/// Visual (row, column) of the cursor after wrapping `before_cursor`
fn cursor_cell(before_cursor: &str, width: usize) -> (usize, usize) {
    let mut row = 0;
    let mut col = 0;
    let mut lines = before_cursor.split('\n').peekable();
    while let Some(line) = lines.next() {
        let rows = wrap_line(line, width);
        if lines.peek().is_some() {
            row += rows.len();
        } else {
            row += rows.len() - 1;
            col = rows.last().map_or(0, |r| r.chars().filter_map(|c| c.width()).sum());
        }
    }
    if width > 0 && col >= width {
        row += 1;
        col = 0;
    }
    (row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Trigger;
    use crate::config::Config;
    use crate::models::PostResult;
    use ratatui::{Terminal, backend::TestBackend};

    const WIDTH: u16 = 80;
    const GAUGE_ROW: u16 = 7;

    fn draw(state: &AppState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, 10)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_gauge_uses_accent_below_warning_threshold() {
        let mut state = AppState::new(Config::default());
        state.draft.set_text(&"a".repeat(NEAR_LIMIT - 1));

        let terminal = draw(&state);
        assert!(row_text(&terminal, GAUGE_ROW).contains("259/280"));
        assert_eq!(
            terminal.backend().buffer()[(0, GAUGE_ROW)].fg,
            state.theme.colors().accent
        );
    }

    #[test]
    fn test_gauge_turns_warning_near_limit() {
        let mut state = AppState::new(Config::default());
        state.draft.set_text(&"a".repeat(NEAR_LIMIT));

        let terminal = draw(&state);
        assert!(row_text(&terminal, GAUGE_ROW).contains("260/280"));
        assert_eq!(
            terminal.backend().buffer()[(0, GAUGE_ROW)].fg,
            state.theme.colors().warning
        );
    }

    #[test]
    fn test_success_feedback_shows_echoed_text() {
        let mut state = AppState::new(Config::default());
        state.draft.set_text("Hello, World!");
        assert!(matches!(state.flow.begin(&state.draft), Trigger::Send(_)));
        state
            .flow
            .finish(Ok(PostResult::new("123", "Hello,\nWorld!")), Instant::now())
            .unwrap();

        let row = row_text(&draw(&state), GAUGE_ROW + 1);
        assert!(row.contains("\"Hello, World!\" (id 123)"));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("Hello,\nWorld!", 40), "Hello, World!");
        assert_eq!(preview("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_whole_secs_left_rounds_up() {
        assert_eq!(whole_secs_left(Duration::ZERO), 0);
        assert_eq!(whole_secs_left(Duration::from_millis(4_001)), 5);
        assert_eq!(whole_secs_left(Duration::from_secs(5)), 5);
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("", 4), vec![""]);
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        // Wide characters never straddle a row
        assert_eq!(wrap_line("ab界c", 3), vec!["ab", "界c"]);
    }

    #[test]
    fn test_cursor_cell() {
        assert_eq!(cursor_cell("", 10), (0, 0));
        assert_eq!(cursor_cell("hello", 10), (0, 5));
        assert_eq!(cursor_cell("hello\nwo", 10), (1, 2));
        assert_eq!(cursor_cell("abcdefghij", 4), (2, 2));
        assert_eq!(cursor_cell("abcd", 4), (1, 0));
        assert_eq!(cursor_cell("ab\n", 4), (1, 0));
    }
}
