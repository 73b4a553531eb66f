//! MenuView: the main menu (presets plus the custom configuration).

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{digits, Viewport};

const MENU_BG: Rgb = Rgb::new(20, 24, 30);

#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    /// Render the menu. `items` are pre-formatted entry labels.
    pub fn render_into(
        &self,
        items: &[String],
        selected: usize,
        best_score: u32,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(200, 200, 200), MENU_BG).cell(' '));

        let title = CellStyle::new(Rgb::new(250, 220, 70), MENU_BG).bold();
        let normal = CellStyle::new(Rgb::new(200, 200, 210), MENU_BG);
        let active = CellStyle::new(Rgb::new(20, 24, 30), Rgb::new(250, 220, 70)).bold();
        let hint = normal.dim();

        let item_w = items
            .iter()
            .map(|s| s.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let box_w = item_w.max(34).min(viewport.width);
        // title, blank, items, blank, best, hint
        let box_h = (items.len() as u16 + 7).min(viewport.height);
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        fb.draw_box(x, y, box_w, box_h, normal);
        let inner_x = x + 1;
        let inner_w = box_w.saturating_sub(2);

        let mut ty = y + 1;
        fb.put_str_centered(inner_x, ty, inner_w, "P A I R S", title);
        ty += 2;

        for (i, item) in items.iter().enumerate() {
            let style = if i == selected { active } else { normal };
            let lx = inner_x + inner_w.saturating_sub(item_w) / 2;
            fb.fill_rect(lx, ty, item_w, 1, ' ', style);
            fb.put_str(lx + 2, ty, item, style);
            ty += 1;
        }

        ty += 1;
        let lx = inner_x + inner_w.saturating_sub(6 + digits(best_score)) / 2;
        let vx = fb.put_str(lx, ty, "Best: ", normal);
        fb.put_u32(vx, ty, best_score, normal.bold());
        ty += 1;

        fb.put_str_centered(inner_x, ty, inner_w, "↑↓ select  Enter start  q quit", hint);
    }

    /// Render the custom board editor. `fields` are pre-formatted rows.
    pub fn render_custom_into(&self, fields: &[String], focused: usize, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(200, 200, 200), MENU_BG).cell(' '));

        let title = CellStyle::new(Rgb::new(250, 220, 70), MENU_BG).bold();
        let normal = CellStyle::new(Rgb::new(200, 200, 210), MENU_BG);
        let active = CellStyle::new(Rgb::new(20, 24, 30), Rgb::new(250, 220, 70)).bold();
        let hint = normal.dim();

        let field_w = fields
            .iter()
            .map(|s| s.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 6;
        let box_w = field_w.max(44).min(viewport.width);
        // title, blank, fields, blank, hint
        let box_h = (fields.len() as u16 + 6).min(viewport.height);
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        fb.draw_box(x, y, box_w, box_h, normal);
        let inner_x = x + 1;
        let inner_w = box_w.saturating_sub(2);

        let mut ty = y + 1;
        fb.put_str_centered(inner_x, ty, inner_w, "CUSTOM BOARD", title);
        ty += 2;

        for (i, field) in fields.iter().enumerate() {
            let style = if i == focused { active } else { normal };
            let lx = inner_x + inner_w.saturating_sub(field_w) / 2;
            fb.fill_rect(lx, ty, field_w, 1, ' ', style);
            let end = fb.put_str(lx + 2, ty, field, style);
            if i == focused {
                fb.put_str(end + 1, ty, "◂▸", style);
            }
            ty += 1;
        }

        ty += 1;
        fb.put_str_centered(inner_x, ty, inner_w, "↑↓ field  ←→ adjust  Enter play  Esc back", hint);
    }

    pub fn render(&self, items: &[String], selected: usize, best_score: u32, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(items, selected, best_score, viewport, &mut fb);
        fb
    }
}
