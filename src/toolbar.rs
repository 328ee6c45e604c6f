// Clickable buttons around the camera view. Each button carries the command
// it triggers, so a click resolves to a `UiCommand` without any index lookup.

use crate::brush::{BrushColor, BrushMode, BrushState};
use crate::session::UiCommand;
use crate::types::{pack_rgb, BLACK, BLUE, GREEN, RED, YELLOW};

const ROW_TOP_Y: usize = 10;
const ROW_BOTTOM_Y: usize = 550;
const ROW_HEIGHT: usize = 40;
const LEFT: usize = 10;
const GAP: usize = 6;
const SWATCH_WIDTH: usize = 36;

const MODE_FILL: u32 = 0x00_30_30_30;
const ACTION_FILL: u32 = 0x00_20_40_A0;

pub struct Button {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub fill: u32,
    pub label: &'static str,
    pub command: UiCommand,
}

impl Button {
    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Whether this button reflects the current brush (drawn outlined).
    pub fn is_active(&self, brush: &BrushState) -> bool {
        match self.command {
            UiCommand::SelectColor(rgb) => {
                !brush.eraser() && brush.color() == BrushColor::Solid(rgb)
            }
            UiCommand::SelectRainbow => !brush.eraser() && brush.color() == BrushColor::Rainbow,
            UiCommand::SelectMode(mode) => brush.mode() == mode,
            UiCommand::ToggleEraser => brush.eraser(),
            _ => false,
        }
    }
}

/// Width of a labelled button: 6 px per glyph plus padding.
fn label_width(label: &str) -> usize {
    label.len() * 6 + 16
}

pub struct Toolbar {
    buttons: Vec<Button>,
}

impl Toolbar {
    /// Top row: color swatches then brush modes. Bottom row: size and history.
    pub fn new() -> Self {
        let mut buttons = Vec::new();
        let mut x = LEFT;

        let swatches = [
            (pack_rgb(RED), UiCommand::SelectColor(RED)),
            (pack_rgb(GREEN), UiCommand::SelectColor(GREEN)),
            (pack_rgb(BLUE), UiCommand::SelectColor(BLUE)),
            (pack_rgb(YELLOW), UiCommand::SelectColor(YELLOW)),
            (pack_rgb(BLACK), UiCommand::SelectColor(BLACK)),
            (0, UiCommand::SelectRainbow),
        ];
        for (fill, command) in swatches {
            buttons.push(Button {
                x,
                y: ROW_TOP_Y,
                width: SWATCH_WIDTH,
                height: ROW_HEIGHT,
                fill,
                label: "",
                command,
            });
            x += SWATCH_WIDTH + GAP;
        }

        x += GAP;
        let modes = [
            (BrushMode::Pen.label(), UiCommand::SelectMode(BrushMode::Pen)),
            (BrushMode::Spray.label(), UiCommand::SelectMode(BrushMode::Spray)),
            (BrushMode::Circle.label(), UiCommand::SelectMode(BrushMode::Circle)),
            (BrushMode::Square.label(), UiCommand::SelectMode(BrushMode::Square)),
            ("ERASER", UiCommand::ToggleEraser),
        ];
        Self::push_row(&mut buttons, x, ROW_TOP_Y, MODE_FILL, &modes);

        let actions = [
            ("SIZE -", UiCommand::SizeDown),
            ("SIZE +", UiCommand::SizeUp),
            ("UNDO", UiCommand::Undo),
            ("REDO", UiCommand::Redo),
            ("CLEAR ALL", UiCommand::Clear),
        ];
        Self::push_row(&mut buttons, LEFT, ROW_BOTTOM_Y, ACTION_FILL, &actions);

        Self { buttons }
    }

    fn push_row(
        buttons: &mut Vec<Button>,
        mut x: usize,
        y: usize,
        fill: u32,
        items: &[(&'static str, UiCommand)],
    ) {
        for &(label, command) in items {
            let width = label_width(label);
            buttons.push(Button { x, y, width, height: ROW_HEIGHT, fill, label, command });
            x += width + GAP;
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Command under a click at window pixel (x, y), if any.
    pub fn command_at(&self, x: usize, y: usize) -> Option<UiCommand> {
        self.buttons.iter().find(|b| b.contains(x, y)).map(|b| b.command)
    }
}
