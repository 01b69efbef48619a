//! Blog screen: filter bar, search, post list, and the post view with
//! interactive project tables.

use ratatui::prelude::*;

use crate::app::{App, HitTarget};
use crate::models::blocks::Block;
use crate::theme::{
    BG_SECONDARY, BG_TERTIARY, GREEN_DIM, GREEN_TERMINAL, TEXT_MUTED, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

use super::helpers::{heading, push_plain_block, LineCanvas, Segment};

pub fn build(app: &App, width: u16) -> LineCanvas {
    match app.open_post {
        Some(index) => build_post(app, index, width),
        None => build_list(app, width),
    }
}

fn build_list(app: &App, width: u16) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    canvas.push(heading("BLOG"));
    canvas.blank();

    // Filter controls.
    let mut segments: Vec<Segment> = Vec::new();
    for tag in app.filter_tags() {
        let active = app.blog_filter.active_tag == tag;
        let style = if active {
            Style::default()
                .fg(GREEN_TERMINAL)
                .bg(BG_TERTIARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY).bg(BG_SECONDARY)
        };
        segments.push((format!("[{}]", tag), style, Some(HitTarget::FilterTag(tag))));
        segments.push((" ".to_string(), Style::default(), None));
    }
    canvas.push_segments(segments);

    // Search box with a clear control once there is a query.
    let mut search: Vec<Segment> = vec![(
        "Search: ".to_string(),
        Style::default().fg(TEXT_MUTED),
        Some(HitTarget::SearchBox),
    )];
    let mut query = app.blog_filter.query.clone();
    if app.focus == crate::models::Focus::BlogSearch {
        query.push('█');
    }
    search.push((
        format!("{:<24}", query),
        Style::default().fg(TEXT_PRIMARY).bg(BG_SECONDARY),
        Some(HitTarget::SearchBox),
    ));
    if !app.blog_filter.query.is_empty() {
        search.push((" ".to_string(), Style::default(), None));
        search.push((
            "[x]".to_string(),
            Style::default().fg(TEXT_MUTED),
            Some(HitTarget::SearchClear),
        ));
    }
    canvas.push_segments(search);
    canvas.blank();

    let mut any_visible = false;
    for (i, post) in app.content.posts.iter().enumerate() {
        if !app.blog_filter.visible.get(i).copied().unwrap_or(true) {
            continue;
        }
        any_visible = true;
        canvas.push_hit(
            Line::from(vec![
                Span::styled("▸ ", Style::default().fg(GREEN_DIM)),
                Span::styled(
                    post.title.clone(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            HitTarget::PostCard(i),
        );
        canvas.push(Line::from(Span::styled(
            format!("  {}  {}", post.date, post.tag_line()),
            Style::default().fg(TEXT_MUTED),
        )));
        canvas.push_wrapped(
            &format!("  {}", post.summary),
            width,
            Style::default().fg(TEXT_SECONDARY),
        );
        canvas.blank();
    }
    if !any_visible {
        canvas.push(Line::from(Span::styled(
            "No posts match.",
            Style::default().fg(TEXT_MUTED),
        )));
    }
    canvas
}

fn build_post(app: &App, index: usize, width: u16) -> LineCanvas {
    let mut canvas = LineCanvas::new();
    let Some(post) = app.content.posts.get(index) else {
        return canvas;
    };

    canvas.push_hit(
        Line::from(Span::styled(
            "← Back to blog",
            Style::default().fg(GREEN_DIM),
        )),
        HitTarget::BackToBlog,
    );
    canvas.blank();
    canvas.push(Line::from(Span::styled(
        post.title.clone(),
        Style::default()
            .fg(GREEN_TERMINAL)
            .add_modifier(Modifier::BOLD),
    )));
    canvas.push(Line::from(Span::styled(
        format!("{}  {}  /blog/{}", post.date, post.tag_line(), post.slug),
        Style::default().fg(TEXT_MUTED),
    )));
    canvas.blank();

    let cards = app.project_cards.as_ref();
    for (bi, block) in post.content.iter().enumerate() {
        if cards.is_some_and(|c| c.is_hidden(bi)) {
            continue;
        }
        match (block, cards) {
            (Block::Table(table), Some(cards))
                if table.project_table && cards.table_index == bi =>
            {
                push_project_table(&mut canvas, table, cards, width);
            }
            _ => push_plain_block(&mut canvas, block, width),
        }
        canvas.blank();
    }
    canvas
}

fn push_project_table(
    canvas: &mut LineCanvas,
    table: &crate::models::Table,
    cards: &crate::models::ProjectCards,
    width: u16,
) {
    canvas.push(Line::from(Span::styled(
        table.headers.join("  |  "),
        Style::default()
            .fg(TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD),
    )));
    for (ri, row) in table.rows.iter().enumerate() {
        let active = cards.active_row == Some(ri);
        let style = if active {
            Style::default()
                .fg(GREEN_TERMINAL)
                .bg(BG_TERTIARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_PRIMARY)
        };
        let name = row.first().cloned().unwrap_or_default();
        canvas.push_hit(
            Line::from(Span::styled(row.join("  |  "), style)),
            HitTarget::ProjectRow { row: ri, name },
        );
    }

    // Reveal container sits immediately after the table.
    if let Some(card) = &cards.revealed {
        canvas.blank();
        canvas.push_segments(vec![
            (
                format!("■ {}", card.header.text),
                Style::default()
                    .fg(GREEN_TERMINAL)
                    .add_modifier(Modifier::BOLD),
                None,
            ),
            ("  ".to_string(), Style::default(), None),
            (
                "[ close ]".to_string(),
                Style::default().fg(TEXT_MUTED),
                Some(HitTarget::ProjectCardClose),
            ),
        ]);
        for meta in &card.metadata {
            canvas.push_wrapped(
                &meta.text,
                width,
                Style::default()
                    .fg(TEXT_SECONDARY)
                    .add_modifier(Modifier::ITALIC),
            );
        }
        for block in &card.content {
            push_plain_block(canvas, block, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::models::{Route, TagAliases, TAG_ALL};
    use std::time::Instant;

    #[test]
    fn test_list_hides_filtered_posts() {
        let mut app = test_app();
        app.start(Instant::now());
        app.navigate(Route::Blog, Instant::now());
        let aliases = TagAliases(app.config.blog_filters.clone());
        let mut location = app.location.clone();
        app.blog_filter
            .apply_tag("blockchain", &app.content.posts, &aliases, &mut location);

        let canvas = build(&app, 80);
        // Exactly one post remains: title plus meta, summary and blanks,
        // well under the full-list height.
        let full = {
            let mut a = test_app();
            a.start(Instant::now());
            a.navigate(Route::Blog, Instant::now());
            build(&a, 80).height()
        };
        assert!(canvas.height() < full);
    }

    #[test]
    fn test_all_tag_is_first_filter_control() {
        let mut app = test_app();
        app.start(Instant::now());
        assert_eq!(app.filter_tags().first().map(String::as_str), Some(TAG_ALL));
    }
}
