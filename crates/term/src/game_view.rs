//! GameView: maps a [`RoundSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. Cards are drawn as small boxes in
//! row-major order with the HUD line above the board.

use crate::core::snapshot::{CardView, RoundSnapshot};
use crate::core::CardPhase;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{FaceRef, RoundPhase};

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

/// Glyph and color for every face index the generator can hand out.
pub const FACE_GLYPHS: [(char, Rgb); 16] = [
    ('♠', Rgb::new(150, 170, 255)),
    ('♥', Rgb::new(240, 80, 100)),
    ('♦', Rgb::new(255, 140, 60)),
    ('♣', Rgb::new(100, 220, 120)),
    ('★', Rgb::new(250, 220, 70)),
    ('●', Rgb::new(80, 220, 220)),
    ('▲', Rgb::new(200, 120, 220)),
    ('■', Rgb::new(220, 220, 220)),
    ('◆', Rgb::new(120, 160, 240)),
    ('♪', Rgb::new(240, 130, 200)),
    ('☀', Rgb::new(255, 200, 40)),
    ('☂', Rgb::new(110, 200, 255)),
    ('✿', Rgb::new(255, 150, 170)),
    ('☾', Rgb::new(230, 230, 150)),
    ('⚑', Rgb::new(220, 90, 60)),
    ('✚', Rgb::new(90, 230, 170)),
];

/// Placeholder when a card has no face (empty face list).
const NO_FACE: char = '?';

const TABLE_BG: Rgb = Rgb::new(20, 24, 30);
const BACK_FG: Rgb = Rgb::new(70, 90, 140);
const EDGE_FG: Rgb = Rgb::new(150, 150, 160);
const CURSOR_FG: Rgb = Rgb::new(255, 220, 80);
const HUD_ROWS: u16 = 2;

pub fn face_glyph(face: Option<FaceRef>) -> (char, Rgb) {
    face.and_then(|f| FACE_GLYPHS.get(f.index()).copied())
        .unwrap_or((NO_FACE, Rgb::new(200, 200, 200)))
}

pub struct GameView {
    /// Card box width in terminal columns.
    card_w: u16,
    /// Card box height in terminal rows.
    card_h: u16,
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 5x3 keeps a 10x10 board inside a typical 80-column terminal.
        Self {
            card_w: 5,
            card_h: 3,
            gap: 1,
        }
    }
}

impl GameView {
    pub fn new(card_w: u16, card_h: u16, gap: u16) -> Self {
        Self {
            card_w: card_w.max(3),
            card_h: card_h.max(3),
            gap,
        }
    }

    /// Board size in terminal cells for a `rows` x `cols` round.
    pub fn board_size(&self, rows: u16, cols: u16) -> (u16, u16) {
        let w = cols.saturating_mul(self.card_w + self.gap).saturating_sub(self.gap);
        let h = rows.saturating_mul(self.card_h);
        (w, h)
    }

    /// Render a round into an existing framebuffer.
    ///
    /// `cursor` is the highlighted `(row, col)`, if any.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        cursor: Option<(u16, u16)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(200, 200, 200), TABLE_BG).cell(' '));

        let (board_w, board_h) = self.board_size(snap.rows, snap.cols);
        let total_h = board_h + HUD_ROWS;
        let start_x = viewport.width.saturating_sub(board_w) / 2;
        let start_y = viewport.height.saturating_sub(total_h) / 2;

        self.draw_hud(fb, snap, viewport, start_y);

        let board_y = start_y + HUD_ROWS;
        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let Some(card) = snap.card(row, col) else {
                    continue;
                };
                let x = start_x + col * (self.card_w + self.gap);
                let y = board_y + row * self.card_h;
                let selected = cursor == Some((row, col));
                self.draw_card(fb, x, y, card, selected);
            }
        }

        match snap.phase {
            RoundPhase::Paused => self.draw_overlay(fb, viewport, "PAUSED", "p resume  r restart  m menu", None),
            RoundPhase::Won => self.draw_overlay(fb, viewport, "YOU WIN!", "r restart  m menu", Some(snap)),
            RoundPhase::TimedOut => self.draw_overlay(fb, viewport, "TIME'S UP!", "r restart  m menu", Some(snap)),
            RoundPhase::NotStarted | RoundPhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RoundSnapshot, cursor: Option<(u16, u16)>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, viewport: Viewport, y: u16) {
        let label = CellStyle::new(Rgb::new(160, 160, 170), TABLE_BG);
        let value = CellStyle::new(Rgb::new(240, 240, 240), TABLE_BG).bold();
        let (m, s) = snap.clock();

        // "Score: N  Combo: xN  Time: MM:SS  Best: N"
        let combo_w = if snap.combo > 0 { 1 + digits(snap.combo) } else { 1 };
        let clock_w = digits(m).max(2) + 3;
        let hud_w = 7 + digits(snap.score) + 9 + combo_w + 8 + clock_w + 8 + digits(snap.best_score);

        let mut x = viewport.width.saturating_sub(hud_w) / 2;
        x = fb.put_str(x, y, "Score: ", label);
        x = fb.put_u32(x, y, snap.score, value);
        x = fb.put_str(x, y, "  Combo: ", label);
        if snap.combo > 0 {
            x = fb.put_str(x, y, "x", value);
            x = fb.put_u32(x, y, snap.combo, value);
        } else {
            x = fb.put_str(x, y, "-", value);
        }
        x = fb.put_str(x, y, "  Time: ", label);
        let time_style = if snap.time_left_ms <= 10_000 && snap.phase == RoundPhase::Running {
            CellStyle::new(Rgb::new(255, 90, 90), TABLE_BG).bold()
        } else {
            value
        };
        x = fb.put_clock(x, y, m, s, time_style);
        x = fb.put_str(x, y, "  Best: ", label);
        fb.put_u32(x, y, snap.best_score, value);
    }

    fn draw_card(&self, fb: &mut FrameBuffer, x: u16, y: u16, card: &CardView, selected: bool) {
        let (w, h) = (self.card_w, self.card_h);
        let mid_x = x + w / 2;
        let mid_y = y + h / 2;
        let edge = if selected {
            CellStyle::new(CURSOR_FG, TABLE_BG).bold()
        } else {
            CellStyle::new(EDGE_FG, TABLE_BG)
        };

        if card.vanished() {
            // Matched slots keep their place in the layout.
            let slot = CellStyle::new(Rgb::new(60, 60, 70), TABLE_BG).dim();
            fb.put_char(mid_x, mid_y, '·', slot);
            if selected {
                fb.draw_box(x, y, w, h, edge);
            }
            return;
        }

        if !card.shows_face() {
            fb.draw_box(x, y, w, h, edge);
            let back = CellStyle::new(BACK_FG, TABLE_BG);
            fb.fill_rect(x + 1, y + 1, w - 2, h - 2, '░', back);
            return;
        }

        let (glyph, color) = face_glyph(card.face);
        let mut face = CellStyle::new(color, TABLE_BG).bold();
        let mut border = edge;
        match card.phase {
            CardPhase::Revealing { .. } | CardPhase::Reverting { .. } => {
                face = face.dim();
                border = border.dim();
            }
            CardPhase::Matched { .. } => {
                let alpha = card.opacity_permille;
                face.fg = color.mix(TABLE_BG, alpha);
                if !selected {
                    border.fg = EDGE_FG.mix(TABLE_BG, alpha);
                }
            }
            CardPhase::FaceDown | CardPhase::FaceUp => {}
        }

        fb.draw_box(x, y, w, h, border);
        fb.put_char(mid_x, mid_y, glyph, face);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, viewport: Viewport, title: &str, help: &str, score: Option<&RoundSnapshot>) {
        // title, blank, [score, best, blank,] help
        let lines = if score.is_some() { 6 } else { 3 };
        let box_w = (help.chars().count() as u16 + 4).min(viewport.width);
        let box_h = (lines + 2).min(viewport.height);
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        let panel = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(0, 0, 0));
        fb.fill_rect(x, y, box_w, box_h, ' ', panel);
        fb.draw_box(x, y, box_w, box_h, panel.bold());

        let inner_x = x + 1;
        let inner_w = box_w.saturating_sub(2);
        let mut ty = y + 1;
        fb.put_str_centered(inner_x, ty, inner_w, title, panel.bold());
        ty += 2;

        if let Some(snap) = score {
            for (label, value) in [("Score: ", snap.score), ("Best: ", snap.best_score)] {
                let line_w = label.len() as u16 + digits(value);
                let lx = inner_x + inner_w.saturating_sub(line_w) / 2;
                let vx = fb.put_str(lx, ty, label, panel);
                fb.put_u32(vx, ty, value, panel.bold());
                ty += 1;
            }
            ty += 1;
        }

        fb.put_str_centered(inner_x, ty, inner_w, help, panel.dim());
    }
}

/// Decimal width of `n`.
pub(crate) fn digits(n: u32) -> u16 {
    n.checked_ilog10().map_or(1, |d| d as u16 + 1)
}
