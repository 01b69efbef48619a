//! Project card parsing and reveal
//!
//! A flagged project table is followed by a run of detail blocks:
//! a bold-led paragraph opens a project, italic paragraphs under it are
//! metadata, plain paragraphs and lists are body content, and the group
//! ends at the next bold-led paragraph or the first block that is
//! neither. The parsed run is hidden in place; activating a table row
//! clones the matching group into a reveal card placed right after the
//! table, replacing whatever was shown before.

use crate::models::blocks::{Block, Paragraph};

/// Detail group for one project, stored as indexes into the source run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub name: String,
    pub header: usize,
    pub metadata: Vec<usize>,
    pub content: Vec<usize>,
}

/// Cloned content shown in the reveal container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealCard {
    pub header: Paragraph,
    pub metadata: Vec<Paragraph>,
    pub content: Vec<Block>,
}

/// One interactive project table and its parsed detail run.
#[derive(Debug, Clone)]
pub struct ProjectCards {
    /// Index of the flagged table in the block run.
    pub table_index: usize,
    pub projects: Vec<ProjectDetails>,
    /// Every block index consumed by a detail group; hidden from normal
    /// rendering.
    pub hidden: Vec<usize>,
    /// Row currently marked active, if any. At most one.
    pub active_row: Option<usize>,
    pub revealed: Option<RevealCard>,
}

/// The project name key for a header paragraph: bold lead text up to
/// the first parenthesis, trimmed.
fn project_key(lead: &str) -> String {
    lead.split('(').next().unwrap_or(lead).trim().to_string()
}

/// Parse every flagged project table in a block run.
pub fn parse_project_tables(blocks: &[Block]) -> Vec<ProjectCards> {
    let mut tables = Vec::new();

    for (table_index, block) in blocks.iter().enumerate() {
        let Block::Table(table) = block else { continue };
        if !table.project_table {
            continue;
        }

        let mut projects: Vec<ProjectDetails> = Vec::new();
        let mut hidden = Vec::new();
        let mut i = table_index + 1;

        // Headers between the table and the first detail are skipped.
        while matches!(blocks.get(i), Some(Block::Heading(_))) {
            i += 1;
        }

        while let Some(block) = blocks.get(i) {
            match block {
                Block::Paragraph(p) if p.bold_lead.is_some() => {
                    let lead = p.bold_lead.as_deref().unwrap_or_default();
                    let mut details = ProjectDetails {
                        name: project_key(lead),
                        header: i,
                        metadata: Vec::new(),
                        content: Vec::new(),
                    };
                    hidden.push(i);
                    let mut j = i + 1;
                    while let Some(detail) = blocks.get(j) {
                        match detail {
                            Block::Paragraph(dp) if dp.bold_lead.is_some() => break,
                            Block::Paragraph(dp) if dp.emphasis => {
                                details.metadata.push(j);
                                hidden.push(j);
                            }
                            Block::Paragraph(_) | Block::List(_) => {
                                details.content.push(j);
                                hidden.push(j);
                            }
                            // A structurally unrecognized block ends the group.
                            _ => break,
                        }
                        j += 1;
                    }
                    projects.push(details);
                    i = j;
                }
                // Stray paragraphs or lists before the next header are
                // part of the run but belong to no project.
                Block::Paragraph(_) | Block::List(_) => {
                    i += 1;
                }
                _ => break,
            }
        }

        tables.push(ProjectCards {
            table_index,
            projects,
            hidden,
            active_row: None,
            revealed: None,
        });
    }

    tables
}

impl ProjectCards {
    /// Reveal the project matching a table row's first cell. Replaces
    /// any previously shown card and marks the row exclusively active.
    /// Returns false (leaving state untouched) when no group matches.
    pub fn reveal(&mut self, row_index: usize, row_name: &str, blocks: &[Block]) -> bool {
        let name = row_name.trim();
        let Some(project) = self.projects.iter().find(|p| p.name == name) else {
            return false;
        };

        let Some(Block::Paragraph(header)) = blocks.get(project.header) else {
            return false;
        };
        let metadata = project
            .metadata
            .iter()
            .filter_map(|&i| match blocks.get(i) {
                Some(Block::Paragraph(p)) => Some(p.clone()),
                _ => None,
            })
            .collect();
        let content = project
            .content
            .iter()
            .filter_map(|&i| blocks.get(i).cloned())
            .collect();

        self.revealed = Some(RevealCard {
            header: header.clone(),
            metadata,
            content,
        });
        self.active_row = Some(row_index);
        true
    }

    /// Close the reveal card and clear the active row.
    pub fn close(&mut self) {
        self.revealed = None;
        self.active_row = None;
    }

    pub fn is_hidden(&self, block_index: usize) -> bool {
        self.hidden.contains(&block_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blocks::Table;
    use pretty_assertions::assert_eq;

    fn project_run() -> Vec<Block> {
        vec![
            Block::Heading("Past Projects".to_string()),
            Block::Table(Table {
                project_table: true,
                headers: vec!["Project".to_string(), "Year".to_string()],
                rows: vec![
                    vec!["Guild Framework".to_string(), "2023".to_string()],
                    vec!["Chain Settlement Engine".to_string(), "2024".to_string()],
                ],
            }),
            Block::Heading("Details".to_string()),
            Block::Paragraph(Paragraph::bold_led(
                "Guild Framework (2023)",
                "Guild Framework (2023)",
            )),
            Block::Paragraph(Paragraph::emphasized("Tech: Go, HTMX, Postgres")),
            Block::Paragraph(Paragraph::emphasized(
                "Purpose: membership tooling for creator guilds",
            )),
            Block::Paragraph(Paragraph::plain("Built and shipped in eight weeks.")),
            Block::List(vec![
                "Role-based access".to_string(),
                "Stripe billing".to_string(),
            ]),
            Block::Paragraph(Paragraph::bold_led(
                "Chain Settlement Engine (2024)",
                "Chain Settlement Engine (2024)",
            )),
            Block::Paragraph(Paragraph::emphasized("Tech: Rust, Postgres")),
            Block::Paragraph(Paragraph::plain("Batch settlement across two chains.")),
            Block::Heading("Unrelated section".to_string()),
            Block::Paragraph(Paragraph::plain("Not part of any project.")),
        ]
    }

    #[test]
    fn test_parse_groups_metadata_and_content() {
        let blocks = project_run();
        let tables = parse_project_tables(&blocks);
        assert_eq!(tables.len(), 1);
        let cards = &tables[0];
        assert_eq!(cards.table_index, 1);
        assert_eq!(cards.projects.len(), 2);

        let guild = &cards.projects[0];
        assert_eq!(guild.name, "Guild Framework");
        assert_eq!(guild.header, 3);
        assert_eq!(guild.metadata, vec![4, 5]);
        assert_eq!(guild.content, vec![6, 7]);

        let engine = &cards.projects[1];
        assert_eq!(engine.name, "Chain Settlement Engine");
        assert_eq!(engine.metadata, vec![9]);
        assert_eq!(engine.content, vec![10]);
    }

    #[test]
    fn test_unrecognized_block_ends_the_run() {
        let blocks = project_run();
        let tables = parse_project_tables(&blocks);
        // The trailing heading and paragraph after it are untouched.
        assert!(!tables[0].is_hidden(11));
        assert!(!tables[0].is_hidden(12));
    }

    #[test]
    fn test_parsed_details_are_hidden() {
        let blocks = project_run();
        let tables = parse_project_tables(&blocks);
        for i in 3..=10 {
            assert!(tables[0].is_hidden(i), "block {} should be hidden", i);
        }
        assert!(!tables[0].is_hidden(0));
        assert!(!tables[0].is_hidden(2));
    }

    #[test]
    fn test_reveal_clones_header_metadata_and_content() {
        let blocks = project_run();
        let mut cards = parse_project_tables(&blocks).remove(0);
        assert!(cards.reveal(0, "Guild Framework", &blocks));

        let card = cards.revealed.as_ref().unwrap();
        assert!(card.header.text.contains("Guild Framework"));
        assert!(card.metadata.iter().any(|m| m.text.contains("Tech:")));
        assert!(card.metadata.iter().any(|m| m.text.contains("Purpose:")));
        assert_eq!(card.content.len(), 2);
        assert_eq!(cards.active_row, Some(0));
    }

    #[test]
    fn test_reveal_switches_exclusively() {
        let blocks = project_run();
        let mut cards = parse_project_tables(&blocks).remove(0);
        cards.reveal(0, "Guild Framework", &blocks);
        assert!(cards.reveal(1, "Chain Settlement Engine", &blocks));
        assert_eq!(cards.active_row, Some(1));
        let card = cards.revealed.as_ref().unwrap();
        assert!(card.header.text.contains("Chain Settlement Engine"));
        assert!(!card.header.text.contains("Guild"));
    }

    #[test]
    fn test_reveal_unknown_row_is_noop() {
        let blocks = project_run();
        let mut cards = parse_project_tables(&blocks).remove(0);
        assert!(!cards.reveal(0, "Nonexistent", &blocks));
        assert_eq!(cards.active_row, None);
        assert!(cards.revealed.is_none());
    }

    #[test]
    fn test_close_clears_card_and_active_row() {
        let blocks = project_run();
        let mut cards = parse_project_tables(&blocks).remove(0);
        cards.reveal(0, "Guild Framework", &blocks);
        cards.close();
        assert!(cards.revealed.is_none());
        assert_eq!(cards.active_row, None);
    }

    #[test]
    fn test_unflagged_table_is_ignored() {
        let blocks = vec![Block::Table(Table {
            project_table: false,
            headers: vec!["A".to_string()],
            rows: vec![vec!["1".to_string()]],
        })];
        assert!(parse_project_tables(&blocks).is_empty());
    }
}
