//! About screen: static content blocks.

use crate::app::App;

use super::helpers::{push_plain_block, LineCanvas};

pub fn build(app: &App, width: u16) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    for block in &app.content.about {
        push_plain_block(&mut canvas, block, width);
        canvas.blank();
    }
    canvas
}
