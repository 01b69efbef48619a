//! Work screen: interactive case-study cards.

use ratatui::prelude::*;

use crate::app::{App, HitTarget};
use crate::theme::{GREEN_DIM, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY};

use super::helpers::{heading, LineCanvas};

pub fn build(app: &App, width: u16) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    canvas.push(heading("WORK"));
    canvas.push_wrapped(
        "Selected engagements. Open one for the numbers.",
        width,
        Style::default().fg(TEXT_SECONDARY),
    );
    canvas.blank();

    for (i, item) in app.content.work_items.iter().enumerate() {
        canvas.push_hit(
            Line::from(vec![
                Span::styled("▸ ", Style::default().fg(GREEN_DIM)),
                Span::styled(
                    item.title.to_string(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            HitTarget::WorkCard(i),
        );
        canvas.push(Line::from(Span::styled(
            format!("  {}", item.summary),
            Style::default().fg(TEXT_MUTED),
        )));
        canvas.blank();
    }
    canvas
}
