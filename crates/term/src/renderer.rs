//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are encoded into a byte buffer first and written with one syscall.
//! After the first frame only runs of changed glyphs are re-sent.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Glyph};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame sent to the terminal.
    front: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            buf: Vec::with_capacity(16 * 1024),
            entered: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Safe to call when not entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.front = None;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// Callers keep one framebuffer and pass it in every frame; afterwards it
    /// holds the frame before this one and is ready to be rendered into again.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.front.take() {
            Some(mut prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                std::mem::swap(&mut prev, fb);
                self.front = Some(prev);
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                self.front = Some(fb.clone());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits SGR sequences only when the style actually changes.
struct StyleWriter {
    current: Option<CellStyle>,
}

impl StyleWriter {
    fn new() -> Self {
        Self { current: None }
    }

    fn print(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        if self.current != Some(glyph.style) {
            let style = glyph.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.current = Some(style);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut writer = StyleWriter::new();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &glyph in fb.row(y) {
            writer.print(out, glyph)?;
        }
    }
    writer.finish(out)
}

/// Encode only the changed runs of `next` relative to `prev` (same size).
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut writer = StyleWriter::new();
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, len) in changed_runs(prev.row(y), row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for &glyph in &row[start..start + len] {
                writer.print(out, glyph)?;
            }
        }
    }
    writer.finish(out)
}

/// (start, len) of every maximal run where the two rows differ.
fn changed_runs<'a>(prev: &'a [Glyph], next: &'a [Glyph]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let width = next.len();
    let differs = move |x: usize| prev.get(x) != next.get(x);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < width && !differs(x) {
            x += 1;
        }
        if x >= width {
            return None;
        }
        let start = x;
        while x < width && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(style: CellStyle, s: &str) -> Vec<Glyph> {
        s.chars().map(|c| style.glyph(c)).collect()
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = text(style, "abcdefg");
        let b = text(style, "aXYdeZg");

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 2), (5, 1)]);
    }

    #[test]
    fn style_change_alone_is_a_change() {
        let a = text(CellStyle::default(), "ab");
        let b = text(CellStyle::default().bold(), "ab");
        assert_eq!(changed_runs(&a, &b).collect::<Vec<_>>(), vec![(0, 2)]);
    }

    #[test]
    fn identical_frames_encode_no_glyphs() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "ab", CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn diff_only_sends_changed_glyphs() {
        let prev = FrameBuffer::new(8, 2);
        let mut next = prev.clone();
        next.put_char(5, 1, 'Q', CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&prev, &next, &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.matches('Q').count(), 1);
        // crossterm cursor positions are 1-based on the wire
        assert!(s.contains("\x1b[2;6H"));
    }

    #[test]
    fn full_redraw_contains_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", CellStyle::default());
        fb.put_str(0, 1, "def", CellStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("abc"));
        assert!(s.contains("def"));
    }
}
