//! Main application state and rendering

use crate::data::{Case, Direction};
use crate::game::{tally, Command, Event, Explorer, Outcome, Verdict};
use crate::tui::widgets::{EvidenceGauge, VerdictBox};
use crate::tui::{centered_rect, line_style, styled_block, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Oldest log lines are dropped past this
const LOG_LIMIT: usize = 200;

/// Current screen being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Exploring,
    Accusing,
    Verdict,
}

/// A line in the on-screen log
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

/// Application state
pub struct App<'c> {
    pub case: &'c Case,
    pub explorer: Explorer<'c>,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub input_buffer: String,
    pub log: Vec<LogLine>,
    pub outcome: Option<Outcome>,
}

impl<'c> App<'c> {
    pub fn new(case: &'c Case) -> crate::Result<Self> {
        let (explorer, arrival) = Explorer::enter(&case.mansion, case.rules)?;
        let mut app = Self {
            case,
            explorer,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Title,
            input_buffer: String::new(),
            log: Vec::new(),
            outcome: None,
        };
        app.push_line(format!("[SYSTEM] Case opened: {}", case.title));
        app.record(&arrival);
        Ok(app)
    }

    /// Handle keyboard input. Returns `false` once the player quits.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(self.running)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match self.current_screen {
            Screen::Title => match code {
                KeyCode::Enter => self.current_screen = Screen::Exploring,
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('?') => self.show_help = true,
                _ => {}
            },
            Screen::Exploring => {
                let command = match code {
                    KeyCode::Left => Command::Go(Direction::Left),
                    KeyCode::Right => Command::Go(Direction::Right),
                    KeyCode::Esc => Command::Exit,
                    KeyCode::Char('?') => {
                        self.show_help = true;
                        return;
                    }
                    KeyCode::Char(c) => Command::parse(&c.to_string()),
                    _ => return,
                };
                self.apply(command);
            }
            Screen::Accusing => match code {
                KeyCode::Enter => self.accuse(),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            },
            Screen::Verdict => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.running = false;
                }
            }
        }
    }

    /// Feed one exploration command to the explorer
    fn apply(&mut self, command: Command) {
        let events = self.explorer.step(command);
        self.record(&events);

        if self.explorer.is_finished() {
            let clues = self.explorer.clues().iter().map(str::to_string).collect();
            self.record(&[Event::CluesCollected(clues)]);
            self.push_line("[SYSTEM] Type the name of the suspect you accuse and press Enter.".to_string());
            self.current_screen = Screen::Accusing;
        }
    }

    fn accuse(&mut self) {
        let accused = self.input_buffer.trim().to_string();
        if accused.is_empty() {
            self.push_line("[WARN] Name a suspect first.".to_string());
            return;
        }

        let count = tally(self.explorer.clues(), &self.case.suspects, &accused);
        let verdict = Verdict::render(count, self.case.rules.guilty_threshold);
        tracing::info!(accused = %accused, tally = count, ?verdict, "verdict rendered");

        self.record(&[Event::VerdictRendered {
            accused: accused.clone(),
            tally: count,
            verdict,
        }]);
        self.outcome = Some(Outcome {
            accused,
            tally: count,
            verdict,
            clues: self.explorer.clues().iter().map(str::to_string).collect(),
        });
        self.input_buffer.clear();
        self.current_screen = Screen::Verdict;
    }

    fn record(&mut self, events: &[Event]) {
        for event in events {
            for line in event.lines() {
                self.push_line(line);
            }
        }
    }

    fn push_line(&mut self, text: String) {
        self.log.push(LogLine {
            timestamp: Utc::now(),
            text,
        });
        if self.log.len() > LOG_LIMIT {
            let excess = self.log.len() - LOG_LIMIT;
            self.log.drain(..excess);
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::Title => self.render_title(frame),
            Screen::Exploring | Screen::Accusing => self.render_game(frame),
            Screen::Verdict => {
                self.render_game(frame);
                self.render_verdict_overlay(frame);
            }
        }

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(15), Constraint::Length(4)])
            .split(area);

        let logo = Paragraph::new(LOGO)
            .style(Style::default().fg(self.theme.accent))
            .alignment(Alignment::Center);
        frame.render_widget(logo, chunks[0]);

        let prompt = vec![
            Line::from(Span::styled(
                self.case.title.clone(),
                Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD),
            )),
            Line::from("Press Enter to step inside, ? for help, q to quit"),
        ];
        let prompt = Paragraph::new(prompt).alignment(Alignment::Center);
        frame.render_widget(prompt, chunks[1]);
    }

    fn render_game(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_room_panel(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_log(frame, main_layout[0]);
        self.render_evidence_panel(frame, main_layout[1]);

        self.render_input(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Length(19),
                Constraint::Min(20),
                Constraint::Length(22),
            ])
            .split(area);

        let bordered = || Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border));

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(bordered());
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new(self.case.title.as_str())
            .style(Style::default().fg(self.theme.warning))
            .alignment(Alignment::Center)
            .block(bordered());
        frame.render_widget(title, header_layout[1]);

        let visits = Paragraph::new(format!(" Rooms visited: {} ", self.explorer.visited()))
            .style(Style::default().fg(self.theme.fg))
            .alignment(Alignment::Right)
            .block(bordered());
        frame.render_widget(visits, header_layout[2]);
    }

    fn render_room_panel(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(6)])
            .split(area);

        let location = match self.explorer.current() {
            Some(room) => vec![
                Line::from(Span::styled(
                    room.name().to_string(),
                    Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(match room.clue() {
                    Some(_) => Span::styled("A clue lies here.", Style::default().fg(self.theme.success)),
                    None => Span::styled("Nothing of note.", Style::default().fg(Color::DarkGray)),
                }),
            ],
            None => vec![Line::from(Span::styled(
                "Outside the mansion",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        let location = Paragraph::new(location)
            .wrap(Wrap { trim: true })
            .block(styled_block("Location", &self.theme));
        frame.render_widget(location, chunks[0]);

        let mut paths: Vec<ListItem> = Vec::new();
        if let Some(room) = self.explorer.current() {
            for direction in Direction::ALL {
                let (key, label) = match direction {
                    Direction::Left => ("[←/L]", "Left"),
                    Direction::Right => ("[→/R]", "Right"),
                };
                let item = match room.neighbor(direction) {
                    Some(next) => ListItem::new(format!(" {} {}: {}", key, label, next.name())),
                    None => ListItem::new(format!(" {} {}: -", key, label))
                        .style(Style::default().fg(Color::DarkGray)),
                };
                paths.push(item);
            }
            paths.push(ListItem::new(" [X/Esc] Leave the mansion"));
        }
        let paths = List::new(paths).block(styled_block("Paths", &self.theme));
        frame.render_widget(paths, chunks[1]);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let visible_lines = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible_lines);
        let lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.timestamp.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(entry.text.as_str(), line_style(&entry.text)),
                ])
            })
            .collect();

        let log = Paragraph::new(lines)
            .block(styled_block("Notebook", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(log, area);
    }

    fn render_evidence_panel(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block("Evidence", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let clues = self.explorer.clues();
        frame.render_widget(
            EvidenceGauge::new("Clues found", clues.len(), self.case.clue_count).color(self.theme.success),
            chunks[0],
        );

        let items: Vec<ListItem> = if clues.is_empty() {
            vec![ListItem::new("No clues yet.").style(Style::default().fg(Color::DarkGray))]
        } else {
            clues.iter().map(|c| ListItem::new(format!(" - {}", c))).collect()
        };
        frame.render_widget(List::new(items), chunks[1]);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let (prompt, style, border) = match self.current_screen {
            Screen::Accusing => (
                format!("accuse> {}_", self.input_buffer),
                Style::default().fg(self.theme.alert),
                self.theme.alert,
            ),
            _ => (
                "←/→ to move, x to leave, ? for help".to_string(),
                Style::default().fg(Color::DarkGray),
                self.theme.border,
            ),
        };

        let input = Paragraph::new(prompt).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Command "),
        );
        frame.render_widget(input, area);
    }

    fn render_verdict_overlay(&self, frame: &mut Frame) {
        let Some(outcome) = &self.outcome else {
            return;
        };
        let popup_area = centered_rect(frame.area(), 64, 9);
        frame.render_widget(Clear, popup_area);

        let color = match outcome.verdict {
            Verdict::Guilty => self.theme.success,
            Verdict::InsufficientEvidence => self.theme.warning,
        };
        let content = vec![
            String::new(),
            format!("Accused: {}", outcome.accused),
            format!("Clues against them: {}", outcome.tally),
            String::new(),
            outcome.verdict.headline(&outcome.accused),
            String::new(),
            "Press Enter to close the case".to_string(),
        ];
        frame.render_widget(
            VerdictBox::new("FINAL JUDGEMENT").content(content).border_color(color),
            popup_area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(frame.area(), 52, 17);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CaseFile;
    use ratatui::{backend::TestBackend, Terminal};

    fn case() -> Case {
        CaseFile::builtin().unwrap().build().unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn plays_through_to_a_guilty_verdict() {
        let case = case();
        let mut app = App::new(&case).unwrap();
        assert_eq!(app.current_screen, Screen::Title);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Exploring);

        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.explorer.current().unwrap().name(), "Study");
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.current_screen, Screen::Accusing);

        type_text(&mut app, "  Mr. Charles ");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Verdict);

        let outcome = app.outcome.clone().unwrap();
        assert_eq!(outcome.accused, "Mr. Charles");
        assert_eq!(outcome.tally, 3);
        assert_eq!(outcome.verdict, Verdict::Guilty);

        app.handle_key(KeyCode::Enter);
        assert!(!app.running);
    }

    #[test]
    fn blocked_paths_and_stray_keys_are_logged() {
        let case = case();
        let mut app = App::new(&case).unwrap();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Char('z'));

        assert_eq!(app.explorer.current().unwrap().name(), "Kitchen");
        let warnings: Vec<_> = app.log.iter().filter(|l| l.text.starts_with("[WARN]")).collect();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn empty_accusation_is_refused() {
        let case = case();
        let mut app = App::new(&case).unwrap();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.current_screen, Screen::Accusing);

        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Accusing);
        assert!(app.outcome.is_none());

        type_text(&mut app, "Nobody");
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Enter);
        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(outcome.accused, "Nobod");
        assert_eq!(outcome.verdict, Verdict::InsufficientEvidence);
    }

    #[test]
    fn renders_every_screen() {
        let case = case();
        let mut app = App::new(&case).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('?'));
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Left);
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Char('x'));
        type_text(&mut app, "Mrs. Helen");
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.handle_key(KeyCode::Enter);
        terminal.draw(|frame| app.render(frame)).unwrap();

        assert_eq!(app.outcome.as_ref().unwrap().tally, 1);
    }
}
