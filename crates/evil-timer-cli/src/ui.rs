//! Terminal rendering for the tab shell.

use evil_timer_core::shell::{digit_width, separator_width};
use evil_timer_core::{Digits, Mode, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::commands::run::App;

const UNSELECTED: Color = Color::Rgb(117, 117, 117);

pub fn render(frame: &mut Frame, app: &App) {
    let [body, tab_bar] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(frame.area());

    match app.tab {
        Tab::Stopwatch => render_stopwatch(frame, body, app),
        Tab::Timers => render_modes(frame, body, app),
        placeholder => render_placeholder(frame, body, placeholder),
    }

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.label()))
        .select(app.tab.index())
        .style(Style::default().fg(UNSELECTED))
        .highlight_style(Style::default().fg(app.accent).add_modifier(Modifier::BOLD))
        .divider(" ")
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(tabs, tab_bar);
}

/// Lay six digits and two separators across `width` columns.
pub fn face_line(digits: Digits, width: u16) -> String {
    let width = f64::from(width);
    let cell = digit_width(width).floor().max(1.0) as usize;
    let sep = separator_width(width).round().max(1.0) as usize;
    let [m10, m1, s10, s1, h10, h1] = digits.as_array();
    format!(
        "{m10:^cell$}{m1:^cell$}{colon:^sep$}{s10:^cell$}{s1:^cell$}{dot:^sep$}{h10:^cell$}{h1:^cell$}",
        colon = ":",
        dot = ".",
    )
}

fn render_stopwatch(frame: &mut Frame, area: Rect, app: &App) {
    let [_, face, _, feedback, _, buttons, rule_top, lap, rule_bottom, _, hints] =
        Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

    let stopwatch = &app.stopwatch;
    let digits = stopwatch.display_digits();

    frame.render_widget(
        Paragraph::new(face_line(digits, face.width))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        face,
    );

    frame.render_widget(
        Paragraph::new(stopwatch.feedback_text())
            .style(Style::default().fg(app.accent))
            .alignment(Alignment::Center),
        feedback,
    );

    let [reset, dots, toggle] = Layout::horizontal([
        Constraint::Length(11),
        Constraint::Min(0),
        Constraint::Length(11),
    ])
    .areas(buttons);
    frame.render_widget(
        Paragraph::new(" ( Reset ) ").style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        reset,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("●", Style::default().fg(Color::White)),
            Span::raw(" "),
            Span::styled("●", Style::default().fg(Color::Gray)),
        ]))
        .alignment(Alignment::Center),
        dots,
    );
    let (label, color) = if stopwatch.is_running() {
        (" ( Stop )  ", Color::Red)
    } else {
        (" ( Start ) ", Color::Green)
    };
    frame.render_widget(
        Paragraph::new(label).style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        toggle,
    );

    let rule = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(rule.clone(), rule_top);
    frame.render_widget(rule, rule_bottom);

    // Static row; laps are not recorded.
    let lap_width = (lap.width / 4).max(8);
    let [lap_label, lap_time] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(lap_width)]).areas(lap);
    frame.render_widget(
        Paragraph::new("Lap 1").style(Style::default().fg(Color::White)),
        lap_label,
    );
    frame.render_widget(
        Paragraph::new(face_line(digits, lap_width)).alignment(Alignment::Right),
        lap_time,
    );

    frame.render_widget(
        Paragraph::new("space start/stop · r reset · tab switch · q quit")
            .style(Style::default().fg(UNSELECTED))
            .alignment(Alignment::Center),
        hints,
    );
}

fn render_modes(frame: &mut Frame, area: Rect, app: &App) {
    let [_, selector, detail, _, hints] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let current = app.stopwatch.mode();
    let index = Mode::ALL.iter().position(|&m| m == current).unwrap_or(0);
    let selector_widget = Tabs::new(Mode::ALL.iter().map(|m| m.label()))
        .select(index)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Black).bg(app.accent))
        .block(
            Block::bordered()
                .title(" Mode ")
                .border_style(Style::default().fg(app.accent)),
        );
    frame.render_widget(selector_widget, selector);

    let profile = current.profile();
    let feedback = if profile.phrases.is_empty() {
        "no feedback".to_string()
    } else {
        format!("{} phrases", profile.phrases.len())
    };
    frame.render_widget(
        Paragraph::new(format!("time x{:.4} · {feedback}", profile.multiplier))
            .style(Style::default().fg(UNSELECTED))
            .alignment(Alignment::Center),
        detail,
    );

    frame.render_widget(
        Paragraph::new("←/→ or 1-3 select mode · tab switch · q quit")
            .style(Style::default().fg(UNSELECTED))
            .alignment(Alignment::Center),
        hints,
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, tab: Tab) {
    let [_, title, note, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(tab.label())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        title,
    );
    frame.render_widget(
        Paragraph::new("Nothing here yet")
            .style(Style::default().fg(UNSELECTED))
            .alignment(Alignment::Center),
        note,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use evil_timer_core::{Stopwatch, StopwatchSettings};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn new_app(tab: Tab) -> App {
        App::new(Stopwatch::new(StopwatchSettings::default()), tab, Color::Yellow)
    }

    #[test]
    fn narrow_face_is_compact() {
        assert_eq!(face_line(Digits::from_secs(61.23), 8), "01:01.23");
    }

    #[test]
    fn wide_face_spreads_digits() {
        let line = face_line(Digits::from_secs(754.5), 50);
        assert!(line.len() >= 40 && line.len() <= 50, "{line:?}");
        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(compact, "12:34.50");
    }

    #[test]
    fn stopwatch_tab_shows_face_and_controls() {
        let screen = screen_text(&new_app(Tab::Stopwatch));
        assert!(screen.contains("Reset"));
        assert!(screen.contains("Start"));
        assert!(screen.contains("Lap 1"));
        assert!(screen.contains("World Clock"));
    }

    #[test]
    fn timers_tab_shows_mode_selector() {
        let screen = screen_text(&new_app(Tab::Timers));
        assert!(screen.contains("Normal"));
        assert!(screen.contains("Evil"));
        assert!(screen.contains("Coach"));
    }

    #[test]
    fn placeholder_tab_renders_title() {
        let screen = screen_text(&new_app(Tab::Alarms));
        assert!(screen.contains("Nothing here yet"));
    }
}
