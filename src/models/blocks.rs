//! Content block structures
//!
//! Screens and blog posts are authored as flat runs of blocks, the same
//! shape the rendered article markup had: headings, paragraphs (with an
//! optional bold lead or emphasis styling), lists, and tables. The
//! project-card widget consumes these runs structurally, so the types
//! here carry exactly the distinctions it needs.

/// A single paragraph of content.
///
/// `bold_lead` marks a paragraph that opens with bold text (a project
/// header in the card widget); `emphasis` marks a fully italicized
/// paragraph (project metadata).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub bold_lead: Option<String>,
    pub emphasis: bool,
    pub text: String,
}

impl Paragraph {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            bold_lead: None,
            emphasis: false,
            text: text.into(),
        }
    }

    pub fn bold_led(lead: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            bold_lead: Some(lead.into()),
            emphasis: false,
            text: text.into(),
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            bold_lead: None,
            emphasis: true,
            text: text.into(),
        }
    }
}

/// A table block. `project_table` flags the tables the card widget
/// turns interactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub project_table: bool,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One block of screen or article content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(Paragraph),
    List(Vec<String>),
    Table(Table),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph::plain(text))
    }
}
