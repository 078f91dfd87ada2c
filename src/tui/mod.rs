//! Terminal User Interface
//!
//! Full-screen front end for the mansion using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
        }
    }
}

/// Style for a tagged log line such as `[CLUE] ...`
pub fn line_style(line: &str) -> Style {
    let (color, bold) = if line.starts_with("[WARN]") {
        (Color::Yellow, true)
    } else if line.starts_with("[ROOM]") {
        (Color::Cyan, true)
    } else if line.starts_with("[PATH]") {
        (Color::DarkGray, false)
    } else if line.starts_with("[CLUE]") {
        (Color::Green, false)
    } else if line.starts_with("[EVIDENCE]") {
        (Color::Magenta, false)
    } else if line.starts_with("[VERDICT]") {
        (Color::Red, true)
    } else if line.starts_with("[SYSTEM]") {
        (Color::Blue, false)
    } else {
        (Color::White, false)
    };

    if bold {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔════════════════════════════════════════════════════════════╗
║                                                            ║
║    ██████╗ ███████╗████████╗███████╗ ██████╗████████╗      ║
║    ██╔══██╗██╔════╝╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝      ║
║    ██║  ██║█████╗     ██║   █████╗  ██║        ██║         ║
║    ██║  ██║██╔══╝     ██║   ██╔══╝  ██║        ██║         ║
║    ██████╔╝███████╗   ██║   ███████╗╚██████╗   ██║         ║
║    ╚═════╝ ╚══════╝   ╚═╝   ╚══════╝ ╚═════╝   ╚═╝         ║
║                                                            ║
║                 Q  U  E  S  T                              ║
║                                                            ║
║          Someone in this house is lying to you.            ║
╚════════════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " DETECTIVE QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════╗
║                  CONTROLS                     ║
╠═══════════════════════════════════════════════╣
║  ← / l     Take the left path                 ║
║  → / r     Take the right path                ║
║  x / Esc   Leave the mansion                  ║
║  ?         Toggle this help                   ║
╠═══════════════════════════════════════════════╣
║                 ACCUSATION                    ║
╠═══════════════════════════════════════════════╣
║  Type the suspect's name, then press Enter.   ║
║  Names must match the case file exactly.      ║
╚═══════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(3),   // Input / status
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (room panel + log + evidence)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),  // Room and exits
            Constraint::Percentage(70),  // Log and evidence
        ])
        .split(area)
        .to_vec()
}

/// Create the main area layout (log + evidence)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60),  // Message log
            Constraint::Percentage(40),  // Evidence
        ])
        .split(area)
        .to_vec()
}

/// Centered popup area, clamped to the screen
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
