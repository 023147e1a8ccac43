//! GameView: maps a [`World`] into a terminal framebuffer.
//!
//! The play area is continuous, so it is sampled on a square grid of
//! `cell_units` world units. A grid cell is lit when its center falls inside
//! a shape. Each grid cell is drawn `cell_w x cell_h` characters.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::ops::Range;

use crate::core::World;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameConfig, GamePhase};

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

/// Upper bound on grid size along either axis.
const MAX_GRID: u16 = 512;
const PANEL_MIN_WIDTH: u16 = 12;

const SKY: Rgb = Rgb::new(24, 32, 56);
const PIPE: Rgb = Rgb::new(90, 200, 100);
const BIRD: Rgb = Rgb::new(250, 210, 60);
const HIT: Rgb = Rgb::new(230, 70, 70);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Terminal renderer for the flappy world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    /// World units per grid cell.
    cell_units: f64,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            cell_units: 20.0,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the play area landed in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub start_x: u16,
    pub start_y: u16,
    pub cols: u16,
    pub rows: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16, cell_units: f64) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            cell_units: if cell_units.is_finite() && cell_units > 0.0 {
                cell_units
            } else {
                20.0
            },
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Grid and frame placement for a play area in a viewport.
    pub fn layout(&self, config: &GameConfig, viewport: Viewport) -> Layout {
        let cols = grid_len(config.play_area_width, self.cell_units);
        let rows = grid_len(config.play_area_height, self.cell_units);
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        Layout {
            start_x,
            start_y,
            cols,
            rows,
            frame_w,
            frame_h,
        }
    }

    /// Render the world into an existing framebuffer.
    ///
    /// This is the allocation-free hot path once the framebuffer has the
    /// viewport's size.
    pub fn render_into(
        &self,
        world: &World,
        config: &GameConfig,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(config, viewport);
        let sky = CellStyle::new(Rgb::new(60, 70, 100), SKY);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            sky,
        );
        self.draw_border(fb, &layout, border);

        self.draw_obstacles(fb, world, config, &layout);
        self.draw_bird(fb, world, config, &layout);

        self.draw_side_panel(fb, world, viewport, &layout);

        match world.phase {
            GamePhase::Idle => self.draw_overlay_text(fb, &layout, "PRESS SPACE"),
            GamePhase::Ended => self.draw_overlay_text(fb, &layout, "GAME OVER"),
            GamePhase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, world: &World, config: &GameConfig, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(world, config, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout, style: CellStyle) {
        let (x, y, w, h) = (
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
        );
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_obstacles(
        &self,
        fb: &mut FrameBuffer,
        world: &World,
        config: &GameConfig,
        layout: &Layout,
    ) {
        let style = CellStyle::new(PIPE, SKY);
        for o in &world.obstacles {
            let cols = covered(o.x, o.right_edge(config.pipe_width), self.cell_units, layout.cols);
            if cols.is_empty() {
                continue;
            }
            let gap_top = o.top_height;
            let gap_bottom = o.gap_bottom(config.gap_height);
            for row in 0..layout.rows {
                let cy = (row as f64 + 0.5) * self.cell_units;
                if cy >= gap_top && cy < gap_bottom {
                    continue;
                }
                for col in cols.clone() {
                    self.fill_grid_cell(fb, layout, col, row, '█', style);
                }
            }
        }
    }

    fn draw_bird(&self, fb: &mut FrameBuffer, world: &World, config: &GameConfig, layout: &Layout) {
        let bird = &world.bird;
        let color = if world.phase == GamePhase::Ended {
            HIT
        } else {
            BIRD
        };
        let style = CellStyle::new(color, SKY).bold();

        let mut cols = covered(bird.x, bird.x + config.bird_size, self.cell_units, layout.cols);
        let mut rows = covered(bird.y, bird.y + config.bird_size, self.cell_units, layout.rows);
        // Birds smaller than a grid cell still get one cell.
        if cols.is_empty() {
            let c = center_cell(bird.x + config.bird_size / 2.0, self.cell_units, layout.cols);
            cols = c..c + 1;
        }
        if rows.is_empty() {
            let r = center_cell(bird.y + config.bird_size / 2.0, self.cell_units, layout.rows);
            rows = r..r + 1;
        }

        for row in rows {
            if row >= layout.rows {
                continue;
            }
            for col in cols.clone() {
                if col < layout.cols {
                    self.fill_grid_cell(fb, layout, col, row, '@', style);
                }
            }
        }
    }

    fn fill_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout
            .start_x
            .saturating_add(1)
            .saturating_add(col.saturating_mul(self.cell_w));
        let py = layout
            .start_y
            .saturating_add(1)
            .saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        world: &World,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, world.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROUND", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, world.round, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TICK", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, u32::try_from(world.tick).unwrap_or(u32::MAX), value);
        y = y.saturating_add(2);

        let hint = value.dim();
        fb.put_str(panel_x, y, "SPACE flap", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "Q quit", hint);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn grid_len(extent: f64, cell_units: f64) -> u16 {
    (extent / cell_units).ceil().clamp(1.0, MAX_GRID as f64) as u16
}

/// Grid cells whose centers fall in `[lo, hi)`, clipped to `0..n`.
fn covered(lo: f64, hi: f64, cell_units: f64, n: u16) -> Range<u16> {
    let clip = |v: f64| v.clamp(0.0, n as f64) as u16;
    let start = clip((lo / cell_units - 0.5).ceil());
    let end = clip((hi / cell_units - 0.5).ceil());
    start..end.max(start)
}

fn center_cell(v: f64, cell_units: f64, n: u16) -> u16 {
    let max = n.saturating_sub(1) as f64;
    (v / cell_units).floor().clamp(0.0, max) as u16
}
