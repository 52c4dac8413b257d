use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event,
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::event::Event;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Raw-mode terminal that presents buffers by writing only changed cells.
pub struct Terminal {
    stdout: io::Stdout,
    previous: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            previous: unpainted(width, height),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input and drain everything pending.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.extend(Event::from_crossterm(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.extend(Event::from_crossterm(event::read()?));
            }
        }
        Ok(events)
    }

    /// Write the cells of `buf` that changed since the last present.
    pub fn present(&mut self, buf: Buffer) -> io::Result<()> {
        if buf.width() != self.previous.width() || buf.height() != self.previous.height() {
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            self.previous = unpainted(buf.width(), buf.height());
        }

        let mut cursor_at: Option<(u16, u16)> = None;
        let mut pen_fg: Option<Rgb> = None;
        let mut pen_bg: Option<Rgb> = None;
        let mut pen_style = TextStyle::new();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in buf.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }

            if cursor_at != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            // Attribute::Reset also resets colors, so restyle before recoloring.
            if cell.style != pen_style {
                apply_style(&mut self.stdout, cell.style)?;
                pen_style = cell.style;
                pen_fg = None;
                pen_bg = None;
            }
            if pen_fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(to_crossterm(cell.fg)))?;
                pen_fg = Some(cell.fg);
            }
            if pen_bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(to_crossterm(cell.bg)))?;
                pen_bg = Some(cell.bg);
            }

            write!(self.stdout, "{}", cell.char)?;
            let advance = char_width(cell.char).max(1) as u16;
            cursor_at = Some((x + advance, y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.previous = buf;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn apply_style(stdout: &mut io::Stdout, style: TextStyle) -> io::Result<()> {
    queue!(stdout, SetAttribute(Attribute::Reset))?;
    if style.bold {
        queue!(stdout, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(stdout, SetAttribute(Attribute::Dim))?;
    }
    if style.italic {
        queue!(stdout, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(stdout, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn to_crossterm(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// A buffer that differs from every real cell, forcing a full repaint.
fn unpainted(width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = '\0';
            }
        }
    }
    buf
}
