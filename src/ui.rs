use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use taja::{
    clock::Clock,
    content::PracticeMode,
    drill::PositionDrill,
    paragraph::sentence_lines,
    session::{Outcome, PracticeSession},
    stats::LiveStats,
    strokes::total_strokes,
};

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // body
                Constraint::Length(1), // stats
                Constraint::Length(1), // key legend
            ])
            .split(area);

        let tier = match &self.screen {
            Screen::Drill(_) => self.config.drill_level.to_string(),
            Screen::Practice(_) if self.config.mode.uses_difficulty() => {
                self.config.difficulty.to_string()
            }
            Screen::Practice(_) => String::new(),
        };
        let header = format!(
            "{} · {} {}",
            self.config.language, self.config.mode, tier
        );
        Paragraph::new(Span::styled(header, dim_bold()))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let legend = match &self.screen {
            Screen::Drill(_) => "esc next key · ctrl+d level · tab mode · ctrl+l language · ctrl+c quit",
            Screen::Practice(s) if s.is_completed() => "enter next text · tab mode · esc quit",
            Screen::Practice(_) => {
                "ctrl+r new text · ctrl+d difficulty · tab mode · ctrl+l language · esc quit"
            }
        };
        Paragraph::new(Span::styled(legend, Style::default().add_modifier(Modifier::ITALIC)))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        match &self.screen {
            Screen::Drill(drill) => render_drill(drill, chunks[1], chunks[2], buf),
            Screen::Practice(session) => render_practice(session, chunks[1], chunks[2], buf),
        }
    }
}

fn render_drill<C: Clock>(drill: &PositionDrill<C>, body: Rect, footer: Rect, buf: &mut Buffer) {
    let key_style = match drill.feedback() {
        Some(true) => bold().fg(Color::Green),
        Some(false) => bold().fg(Color::Red),
        None => bold(),
    };
    let key = drill.current().map(String::from).unwrap_or_default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(body);

    Paragraph::new(Span::styled(key, key_style))
        .alignment(Alignment::Center)
        .render(rows[1], buf);
    Paragraph::new(Span::styled("type the key above", dim_bold()))
        .alignment(Alignment::Center)
        .render(rows[2], buf);

    let stats = format!(
        "streak {}   accuracy {}%",
        drill.streak(),
        drill.accuracy()
    );
    Paragraph::new(Span::styled(stats, bold().fg(Color::Magenta)))
        .alignment(Alignment::Center)
        .render(footer, buf);
}

/// One target line with its typed counterpart underneath
fn line_spans<'a, C: Clock>(
    session: &PracticeSession<C>,
    outcomes: &[Outcome],
    start: usize,
    text: &'a str,
) -> (Line<'a>, Line<'a>) {
    let cursor = session.typed_len();
    let typed: Vec<char> = session.typed().chars().collect();

    let mut target_spans = Vec::new();
    let mut typed_spans = Vec::new();

    for (offset, expected) in text.chars().enumerate() {
        let idx = start + offset;
        let shown = if expected == ' ' { '·' } else { expected };

        let style = match outcomes.get(idx) {
            Some(Outcome::Correct) => bold().fg(Color::Green),
            Some(Outcome::Incorrect) => bold().fg(Color::Red),
            None if idx == cursor => dim_bold().add_modifier(Modifier::UNDERLINED),
            None => dim_bold(),
        };
        target_spans.push(Span::styled(shown.to_string(), style));

        if let (Some(c), Some(outcome)) = (typed.get(idx), outcomes.get(idx)) {
            let color = match outcome {
                Outcome::Correct => Color::Green,
                Outcome::Incorrect => Color::Red,
            };
            typed_spans.push(Span::styled(c.to_string(), bold().fg(color)));
        }
    }

    if (start..=start + text.chars().count()).contains(&cursor) && session.is_composing() {
        typed_spans.push(Span::styled(
            session.preedit().to_string(),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ));
    }

    (Line::from(target_spans), Line::from(typed_spans))
}

fn render_practice<C: Clock>(
    session: &PracticeSession<C>,
    body: Rect,
    footer: Rect,
    buf: &mut Buffer,
) {
    let outcomes = session.outcomes();
    let target = session.target();

    let segments: Vec<(usize, String)> = if session.mode() == PracticeMode::Paragraph {
        // the separating space stays typeable at the end of each line
        let lines = sentence_lines(target);
        let last = lines.len().saturating_sub(1);
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let text = if i < last {
                    format!("{} ", line.text)
                } else {
                    line.text
                };
                (line.start, text)
            })
            .collect()
    } else {
        vec![(0, target.to_string())]
    };

    let mut lines = Vec::new();
    for (start, text) in &segments {
        let (target_line, typed_line) = line_spans(session, &outcomes, *start, text);
        lines.push(target_line);
        lines.push(typed_line);
        lines.push(Line::default());
    }

    let max_width = body.width.max(1) as usize;
    let occupied: usize = segments
        .iter()
        .map(|(_, text)| (text.width() / max_width + 1) * 2 + 1)
        .sum();
    let top_pad = top_padding(body.height, occupied);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(top_pad), Constraint::Min(1)])
        .split(body);

    let single_line = segments.len() == 1 && target.width() <= max_width;
    Paragraph::new(lines)
        .alignment(if single_line {
            // short prompts sit centered
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false })
        .render(rows[1], buf);

    let summary = match session.result() {
        Some(r) => format!(
            "done!  {} cpm · {} wpm · accuracy {}% · errors {}% · {}s",
            r.cpm, r.wpm, r.accuracy, r.error_rate, r.total_time
        ),
        None if !session.is_started() => {
            format!(
                "start typing to begin timing · {} strokes",
                total_strokes(target)
            )
        }
        None => live_summary(session.live_stats()),
    };
    let style = match session.result() {
        Some(r) if r.error_rate > 10 => bold().fg(Color::Red),
        Some(_) => bold().fg(Color::Green),
        None => bold().fg(Color::Magenta),
    };
    Paragraph::new(Span::styled(summary, style))
        .alignment(Alignment::Center)
        .render(footer, buf);
}

/// Rows above the text so it sits vertically centered; none when it overflows
fn top_padding(height: u16, occupied_rows: usize) -> u16 {
    let occupied = u16::try_from(occupied_rows).unwrap_or(u16::MAX);
    height.saturating_sub(occupied) / 2
}

fn live_summary(live: LiveStats) -> String {
    format!(
        "{} cpm · {} wpm · accuracy {}% · errors {}%",
        live.cpm, live.wpm, live.accuracy, live.error_rate
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use taja::config::Config;
    use taja::content::Language;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_practice_prompt_and_stats() {
        let config = Config {
            language: Language::English,
            mode: PracticeMode::Sentence,
            ..Config::default()
        };
        let app = App::new(config, Some("hello".to_string())).unwrap();

        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("hello"));
        assert!(text.contains("start typing"));
    }

    #[test]
    fn test_renders_drill_stats() {
        let config = Config {
            language: Language::Korean,
            mode: PracticeMode::Position,
            ..Config::default()
        };
        let app = App::new(config, None).unwrap();

        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("accuracy 100%"));
    }

    #[test]
    fn test_top_padding_centers_short_text() {
        assert_eq!(top_padding(12, 4), 4);
        assert_eq!(top_padding(12, 12), 0);
    }

    #[test]
    fn test_top_padding_for_huge_text() {
        // 65_539 rows must not wrap around to 3
        assert_eq!(top_padding(12, 65_539), 0);
        assert_eq!(top_padding(12, usize::MAX), 0);
    }

    #[test]
    fn test_live_summary_formats_baseline() {
        assert_eq!(
            live_summary(LiveStats::default()),
            "0 cpm · 0 wpm · accuracy 100% · errors 0%"
        );
    }
}
