//! Crossterm terminal driver for pathpaint.
//!
//! Provides a [`CrosstermDriver`] that implements [`pathpaint_core::Driver`]:
//! board cells are painted as coloured blocks [`CELL_WIDTH`] columns wide,
//! and terminal key and mouse events are translated into
//! [`pathpaint_core::Msg`]s.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, warn};

use pathpaint_core::{CellKind, Driver, Frame, Key, MouseAction, Msg, Point};

/// Terminal columns used to draw one board cell, so cells look square.
pub const CELL_WIDTH: i32 = 2;

/// Display colour of each cell classification.
pub fn kind_color(kind: CellKind) -> CtColor {
    let (r, g, b) = match kind {
        CellKind::Empty => (255, 255, 255),
        CellKind::Open => (148, 190, 255),
        CellKind::Closed => (98, 159, 255),
        CellKind::Barrier => (0, 0, 0),
        CellKind::Start => (255, 165, 0),
        CellKind::End => (221, 160, 221),
        CellKind::Path => (91, 255, 68),
    };
    CtColor::Rgb { r, g, b }
}

/// Map a terminal position to the board cell drawn there.
///
/// Rows map one to one; columns are divided by `cell_width`. The result may
/// lie outside the board; callers clamp or ignore it.
#[inline]
pub fn cell_at(pos: Point, cell_width: i32) -> Point {
    Point::rc(pos.y, pos.x.div_euclid(cell_width.max(1)))
}

/// Maps a crossterm [`KeyCode`] to a pathpaint [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn key_msg(ev: KeyEvent) -> Option<Msg> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }
    to_key(ev.code).map(Msg::key)
}

fn mouse_msg(me: MouseEvent) -> Option<Msg> {
    let pos = Point::new(i32::from(me.column), i32::from(me.row));
    let action = match me.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
        MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
        MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
        MouseEventKind::Drag(MouseButton::Left) => MouseAction::DragMain,
        MouseEventKind::Drag(MouseButton::Right) => MouseAction::DragSecondary,
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::Moved => MouseAction::Move,
        _ => return None,
    };
    Some(Msg::mouse(action, pos))
}

fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(k) => key_msg(k),
        Event::Mouse(m) => mouse_msg(m),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: i32::from(w),
            height: i32::from(h),
        }),
        _ => None,
    }
}

/// A terminal back end using crossterm.
pub struct CrosstermDriver {
    out: Stdout,
    active: bool,
    board_rows: i32,
}

impl CrosstermDriver {
    /// Create a new driver writing to stdout.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            active: false,
            board_rows: 0,
        }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        let (w, h) = terminal::size()?;
        debug!("terminal initialised at {w}x{h}");
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>> {
        let mut msgs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(msgs);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(m) = to_msg(event::read()?) {
                msgs.push(m);
            }
        }
        Ok(msgs)
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        self.board_rows = frame.rows;
        let blank = " ".repeat(CELL_WIDTH as usize);
        for fc in &frame.cells {
            let x = fc.pos.col() * CELL_WIDTH;
            let y = fc.pos.row();
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                warn!("cell {} does not fit the terminal", fc.pos);
                continue;
            };
            queue!(
                self.out,
                cursor::MoveTo(x, y),
                SetBackgroundColor(kind_color(fc.kind)),
                Print(&blank)
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn status(&mut self, text: &str) -> Result<(), Box<dyn Error>> {
        let y = u16::try_from(self.board_rows).unwrap_or(u16::MAX);
        queue!(
            self.out,
            cursor::MoveTo(0, y),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(CtColor::Grey),
            Print(text),
            ResetColor
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        debug!("terminal restored");
    }
}

impl Drop for CrosstermDriver {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn cell_at_divides_columns_by_cell_width() {
        assert_eq!(cell_at(Point::new(0, 0), CELL_WIDTH), Point::rc(0, 0));
        assert_eq!(cell_at(Point::new(1, 3), CELL_WIDTH), Point::rc(3, 0));
        assert_eq!(cell_at(Point::new(9, 4), CELL_WIDTH), Point::rc(4, 4));
        assert_eq!(cell_at(Point::new(7, 2), 1), Point::rc(2, 7));
    }

    #[test]
    fn cell_at_guards_zero_width() {
        assert_eq!(cell_at(Point::new(5, 1), 0), Point::rc(1, 5));
    }

    #[test]
    fn space_and_chars_translate() {
        assert_eq!(
            to_msg(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Msg::key(Key::Space))
        );
        assert_eq!(
            to_msg(press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Msg::key(Key::Char('r')))
        );
        assert_eq!(
            to_msg(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Msg::key(Key::Escape))
        );
    }

    #[test]
    fn ctrl_c_is_quit() {
        assert_eq!(
            to_msg(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Msg::Quit)
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let ev = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('g'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(to_msg(ev), None);
    }

    #[test]
    fn mouse_buttons_translate() {
        assert_eq!(
            to_msg(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)),
            Some(Msg::mouse(MouseAction::Main, Point::new(4, 2)))
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Drag(MouseButton::Right), 1, 1)),
            Some(Msg::mouse(MouseAction::DragSecondary, Point::new(1, 1)))
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0)),
            Some(Msg::mouse(MouseAction::Release, Point::ZERO))
        );
        assert_eq!(to_msg(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn every_kind_has_a_distinct_colour() {
        let kinds = [
            CellKind::Empty,
            CellKind::Open,
            CellKind::Closed,
            CellKind::Barrier,
            CellKind::Start,
            CellKind::End,
            CellKind::Path,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(kind_color(*a), kind_color(*b), "{a:?} vs {b:?}");
            }
        }
    }
}
