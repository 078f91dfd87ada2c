//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// How much of the case's evidence has been found
pub struct EvidenceGauge {
    found: usize,
    total: usize,
    label: String,
    color: Color,
}

impl EvidenceGauge {
    pub fn new(label: &str, found: usize, total: usize) -> Self {
        Self {
            found,
            total,
            label: label.to_string(),
            color: Color::Green,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Cells of a `width`-wide bar to fill
    fn filled(&self, width: u16) -> u16 {
        if self.total == 0 {
            return 0;
        }
        let found = self.found.min(self.total);
        (found * width as usize / self.total) as u16
    }
}

impl Widget for EvidenceGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let label = format!("{}: {}/{}", self.label, self.found, self.total);
        buf.set_string(area.x, area.y, &label, Style::default().fg(self.color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            let inner = area.width - 2;
            let filled = self.filled(inner);
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(self.color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// Double-bordered box for the final judgement
pub struct VerdictBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl VerdictBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for VerdictBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(area.x, bottom, "╚", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(right, bottom, "╝", style);
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        let title = format!(" {} ", self.title);
        let title_width = title.chars().count() as u16;
        if title_width < area.width {
            buf.set_string(
                area.x + (area.width - title_width) / 2,
                area.y,
                &title,
                style.add_modifier(Modifier::BOLD),
            );
        }

        let room = area.height - 2;
        for (i, line) in self.content.iter().take(room as usize).enumerate() {
            buf.set_stringn(
                area.x + 2,
                area.y + 1 + i as u16,
                line,
                area.width.saturating_sub(4) as usize,
                Style::default().fg(Color::White),
            );
        }
    }
}
