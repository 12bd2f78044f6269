//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CardSnapshot, ClockReading, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::presenter::{Cue, TermPresenter};
use crate::types::CardFace;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const TABLE_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the card table.
pub struct GameView {
    /// Card width in terminal columns, including the cursor outline.
    card_w: u16,
    /// Card height in terminal rows.
    card_h: u16,
    /// Space between cards and around the table edge.
    gap: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Wide enough for "paper-plane" plus the outline.
        Self {
            card_w: 13,
            card_h: 3,
            gap: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen position of the table frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    columns: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &TermPresenter,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.w - 2,
            layout.h - 2,
            ' ',
            CellStyle::new(TABLE_BG, TABLE_BG),
        );
        fb.draw_box(
            layout.x,
            layout.y,
            layout.w,
            layout.h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for card in &snap.cards {
            let (px, py) = self.card_origin(&layout, card.index);
            self.draw_card(fb, px, py, card, hud.cue(card.index));
            if cursor == Some(card.index) && !snap.is_won() {
                fb.draw_box(
                    px,
                    py,
                    self.card_w,
                    self.card_h,
                    CellStyle::new(Rgb::new(250, 210, 60), TABLE_BG).bold(),
                );
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, &layout);

        if let Some(summary) = hud.summary() {
            let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            let mid = layout.y + layout.h / 2;
            fb.put_str_centered(layout.x, mid.saturating_sub(1), layout.w, " YOU WON ", style);

            let line_y = mid.saturating_add(1);
            let left = (layout.x + layout.w / 2).saturating_sub(5);
            fb.put_u32(left, line_y, summary.move_count, style);
            fb.put_str(left + 4, line_y, "moves", style);

            let end = put_clock(fb, left, line_y + 1, summary.elapsed_seconds, style);
            fb.put_str(end + 1, line_y + 1, "time", style);

            for i in 0..snap.max_stars {
                let ch = if i < summary.star_rating { '★' } else { '☆' };
                fb.put_char(left + i as u16, line_y + 2, ch, style);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        hud: &TermPresenter,
        cursor: Option<usize>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, cursor, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let columns = snap.columns.max(1) as u16;
        let rows = snap.cards.len().div_ceil(columns as usize) as u16;
        let w = columns * self.card_w + (columns + 1) * self.gap + 2;
        let h = rows * self.card_h + (rows + 1) * self.gap + 2;

        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            x,
            y,
            w,
            h,
            columns,
        }
    }

    fn card_origin(&self, layout: &Layout, index: usize) -> (u16, u16) {
        let col = index as u16 % layout.columns;
        let row = index as u16 / layout.columns;
        (
            layout.x + 1 + self.gap + col * (self.card_w + self.gap),
            layout.y + 1 + self.gap + row * (self.card_h + self.gap),
        )
    }

    fn draw_card(&self, fb: &mut FrameBuffer, px: u16, py: u16, card: &CardSnapshot, cue: Cue) {
        let white = Rgb::new(245, 245, 245);
        let style = match (card.face, cue) {
            (_, Cue::Mismatched) => CellStyle::new(white, Rgb::new(160, 45, 45)).bold(),
            (_, Cue::Matched) => CellStyle::new(white, Rgb::new(60, 180, 90)).bold(),
            (CardFace::Matched, Cue::None) => CellStyle::new(white, Rgb::new(30, 110, 60)),
            (CardFace::Revealed, Cue::None) => CellStyle::new(white, Rgb::new(40, 70, 130)).bold(),
            (CardFace::Hidden, Cue::None) => {
                let back = CellStyle::new(Rgb::new(90, 90, 120), Rgb::new(45, 45, 60)).dim();
                fb.fill_rect(px, py, self.card_w, self.card_h, '░', back);
                return;
            }
        };

        fb.fill_rect(px, py, self.card_w, self.card_h, ' ', style);
        fb.put_str_centered(
            px + 1,
            py + self.card_h / 2,
            self.card_w - 2,
            card.symbol.as_str(),
            style,
        );
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &TermPresenter,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let star = CellStyle::new(Rgb::new(250, 210, 60), PANEL_BG).bold();

        let mut y = layout.y;
        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x, y + 1, hud.move_count(), value);
        y += 3;

        fb.put_str(panel_x, y, "STARS", label);
        for i in 0..snap.max_stars {
            let (ch, style) = if i < hud.star_rating() {
                ('★', star)
            } else {
                ('☆', value.dim())
            };
            fb.put_char(panel_x + i as u16, y + 1, ch, style);
        }
        y += 3;

        fb.put_str(panel_x, y, "TIME", label);
        put_clock(fb, panel_x, y + 1, hud.elapsed_seconds(), value);
        y += 3;

        fb.put_str(panel_x, y, "PAIRS", label);
        fb.put_u32(panel_x, y + 1, (snap.matched_count() / 2) as u32, value);
        let total_x = panel_x + digits((snap.matched_count() / 2) as u32);
        fb.put_char(total_x, y + 1, '/', value);
        fb.put_u32(total_x + 1, y + 1, (snap.cards.len() / 2) as u32, value);
        y += 3;

        let hint = value.dim();
        fb.put_str(panel_x, y, "spc flip", hint);
        fb.put_str(panel_x, y + 1, "r   new", hint);
        fb.put_str(panel_x, y + 2, "q   quit", hint);
    }
}

fn digits(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Draw `m:ss` at `(x, y)`; returns the column just past it.
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, elapsed_seconds: u32, style: CellStyle) -> u16 {
    let clock = ClockReading::from_seconds(elapsed_seconds);
    fb.put_u32(x, y, clock.minutes, style);
    let sep_x = x + digits(clock.minutes);
    fb.put_char(sep_x, y, ':', style);
    fb.put_char(sep_x + 1, y, (b'0' + (clock.seconds / 10) as u8) as char, style);
    fb.put_char(sep_x + 2, y, (b'0' + (clock.seconds % 10) as u8) as char, style);
    sep_x + 3
}
