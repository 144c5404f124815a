use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::{Block, BlockExt as _, Widget},
};
use wingbeat_engine::{BirdFrame, FrameState, SimConfig};

/// Renders one frame of the flock simulation.
///
/// The field is scaled to the available area; pipes draw as solid
/// columns, birds as a glyph picked from their tilt, and the floor as a
/// line under the playfield.
#[derive(Debug)]
pub struct FlockView<'a> {
    frame: &'a FrameState,
    config: &'a SimConfig,
    block: Option<Block<'a>>,
}

impl<'a> FlockView<'a> {
    pub fn new(frame: &'a FrameState, config: &'a SimConfig) -> Self {
        Self {
            frame,
            config,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn bird_glyph(bird: &BirdFrame) -> &'static str {
        if bird.tilt > 10.0 {
            "▲"
        } else if bird.tilt < -45.0 {
            "▼"
        } else {
            "►"
        }
    }
}

impl Widget for FlockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &FlockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let scale = CellScale::new(area, self.config);

        let floor_row = scale.row(self.config.floor_y);
        for pipe in &self.frame.pipes {
            let col_start = scale.col(pipe.x);
            let col_end = scale.col(pipe.x + self.config.pipe_width);
            let gap_top_row = scale.row(pipe.gap_top);
            let gap_bottom_row = scale.row(pipe.gap_bottom);
            for col in col_start..col_end {
                for row in 0..gap_top_row {
                    put(buf, area, col, row, "█", Color::Green);
                }
                for row in gap_bottom_row..floor_row {
                    put(buf, area, col, row, "█", Color::Green);
                }
            }
        }

        for col in 0..area.width {
            put(buf, area, col, floor_row, "▀", Color::Yellow);
        }

        for bird in &self.frame.birds {
            let col = scale.col(bird.x + self.config.bird_width / 2.0);
            let row = scale.row(bird.y + self.config.bird_height / 2.0);
            put(buf, area, col, row, FlockView::bird_glyph(bird), Color::Red);
        }
    }
}

/// Maps field coordinates onto terminal cells.
#[derive(Debug, Clone, Copy)]
struct CellScale {
    sx: f32,
    sy: f32,
}

impl CellScale {
    fn new(area: Rect, config: &SimConfig) -> Self {
        Self {
            sx: f32::from(area.width) / config.field_width,
            sy: f32::from(area.height) / config.field_height,
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn col(self, x: f32) -> u16 {
        (x.max(0.0) * self.sx) as u16
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn row(self, y: f32) -> u16 {
        (y.max(0.0) * self.sy) as u16
    }
}

fn put(buf: &mut Buffer, area: Rect, col: u16, row: u16, symbol: &str, color: Color) {
    if col >= area.width || row >= area.height {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
        cell.set_symbol(symbol).set_fg(color);
    }
}
