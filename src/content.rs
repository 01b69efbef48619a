//! Embedded site content
//!
//! The screens the server used to render. Content is data only; every
//! behavior attached to it (popups, filters, project cards) lives in the
//! widgets that consume it.

use crate::models::blocks::{Block, Paragraph, Table};
use crate::models::{BlogPost, PopupGroup, Route};

/// One entry in the navigation bar / hamburger menu.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

/// An interactive card that opens a popup with details.
#[derive(Debug, Clone)]
pub struct DetailCard {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub details: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SiteContent {
    pub hero_subtitle: &'static str,
    pub nav: Vec<NavItem>,
    pub services_intro: &'static str,
    pub packages: Vec<DetailCard>,
    pub expertise: Vec<DetailCard>,
    pub work_items: Vec<DetailCard>,
    pub about: Vec<Block>,
    pub posts: Vec<BlogPost>,
}

impl SiteContent {
    pub fn post(&self, index: usize) -> Option<&BlogPost> {
        self.posts.get(index)
    }

    /// The card backing a popup in the given group.
    pub fn popup_card(&self, group: PopupGroup, id: usize) -> Option<&DetailCard> {
        match group {
            PopupGroup::Package => self.packages.get(id),
            PopupGroup::Expertise => self.expertise.get(id),
            PopupGroup::Work => self.work_items.get(id),
        }
    }
}

pub fn default_content() -> SiteContent {
    SiteContent {
        hero_subtitle: "Blockchain & AI consulting for teams that ship",
        nav: vec![
            NavItem { label: "Home", route: Route::Home },
            NavItem { label: "About", route: Route::About },
            NavItem { label: "Blog", route: Route::Blog },
            NavItem { label: "Work", route: Route::Work },
            NavItem { label: "Calendar", route: Route::Calendar },
        ],
        services_intro: "Engagements sized for where you are, from a focused audit to a fractional leadership seat.",
        packages: vec![
            DetailCard {
                id: "strategy-sprint",
                title: "Strategy Sprint",
                summary: "Two weeks to a concrete technical roadmap.",
                details: vec![
                    "Architecture review of your current stack.",
                    "Build-vs-buy calls on AI and chain infrastructure.",
                    "A prioritized ninety-day plan your team can execute.",
                ],
            },
            DetailCard {
                id: "integration-audit",
                title: "Integration Audit",
                summary: "Find the risk in your payment and chain integrations before production does.",
                details: vec![
                    "Contract and custody flow review.",
                    "Failure-mode walkthrough with your engineers.",
                    "Written findings with severity and fixes.",
                ],
            },
            DetailCard {
                id: "fractional-cto",
                title: "Fractional CTO",
                summary: "Senior technical leadership without the full-time seat.",
                details: vec![
                    "Weekly architecture and hiring support.",
                    "Vendor and roadmap accountability.",
                    "On call for fundraising diligence.",
                ],
            },
        ],
        expertise: vec![
            DetailCard {
                id: "blockchain-infra",
                title: "Blockchain Infrastructure",
                summary: "Settlement, custody, and indexing systems that survive mainnet.",
                details: vec![
                    "Production experience across EVM and Solana rails.",
                    "Indexers, signers, and settlement engines in Go and Rust.",
                ],
            },
            DetailCard {
                id: "ai-integration",
                title: "AI Integration",
                summary: "LLM features that hold up outside the demo.",
                details: vec![
                    "Retrieval pipelines and evaluation harnesses.",
                    "Cost and latency budgets enforced in CI.",
                ],
            },
            DetailCard {
                id: "payment-rails",
                title: "Payment Rails",
                summary: "Fiat and on-chain money movement, reconciled.",
                details: vec![
                    "Stripe, ACH, and stablecoin payout flows.",
                    "Ledgering that auditors sign off on.",
                ],
            },
        ],
        work_items: vec![
            DetailCard {
                id: "custody-indexer",
                title: "Custody Indexer",
                summary: "Real-time position tracking across four chains.",
                details: vec![
                    "Sub-second balance updates at 40k events/minute.",
                    "Zero missed deposits over eleven months in production.",
                ],
            },
            DetailCard {
                id: "llm-support-desk",
                title: "LLM Support Desk",
                summary: "Retrieval-backed support automation for a fintech.",
                details: vec![
                    "Deflected 60% of tier-one tickets.",
                    "Evaluation harness caught regressions before rollout.",
                ],
            },
            DetailCard {
                id: "settlement-engine",
                title: "Settlement Engine",
                summary: "Batch settlement with exactly-once guarantees.",
                details: vec![
                    "Idempotent retries across bank and chain legs.",
                    "Daily reconciliation to the cent.",
                ],
            },
        ],
        about: vec![
            Block::Heading("About".to_string()),
            Block::paragraph(
                "Blockhead Consulting is a one-person practice helping funded teams ship \
                 blockchain and AI systems that hold up in production.",
            ),
            Block::paragraph(
                "Fifteen years across payments, infrastructure, and developer tooling; the \
                 last six focused on chain settlement and applied LLM work.",
            ),
            Block::List(vec![
                "Based in Denver, working worldwide.".to_string(),
                "Writes about what actually shipped, not what demoed.".to_string(),
            ]),
        ],
        posts: vec![
            BlogPost {
                slug: "shipping-llm-features".to_string(),
                title: "Shipping LLM Features Without Regret".to_string(),
                date: "2026-05-12".to_string(),
                summary: "An evaluation harness is the only thing standing between your demo and your incident channel.".to_string(),
                tags: vec!["ai".to_string(), "engineering".to_string()],
                content: vec![
                    Block::paragraph(
                        "Every LLM feature that survived contact with users shared one trait: \
                         the team could measure it before they shipped it.",
                    ),
                    Block::paragraph(
                        "Start with twenty labeled examples. That is enough to catch the \
                         regressions that matter.",
                    ),
                    Block::List(vec![
                        "Pin your prompts in version control.".to_string(),
                        "Replay production traffic nightly.".to_string(),
                        "Budget latency like money.".to_string(),
                    ]),
                ],
            },
            BlogPost {
                slug: "stablecoin-payouts".to_string(),
                title: "Stablecoin Payouts, Reconciled".to_string(),
                date: "2026-03-02".to_string(),
                summary: "Moving money on-chain is easy; proving you moved it once is the product.".to_string(),
                tags: vec!["blockchain".to_string(), "payments".to_string()],
                content: vec![
                    Block::paragraph(
                        "The payout leg is a solved problem. The ledger that survives an audit \
                         is not.",
                    ),
                    Block::paragraph(
                        "Treat every transfer as unconfirmed until the chain and the bank \
                         agree, and design the retry path first.",
                    ),
                ],
            },
            BlogPost {
                slug: "past-projects".to_string(),
                title: "Past Projects".to_string(),
                date: "2026-01-20".to_string(),
                summary: "A tour of delivered work. Click a row for the full story.".to_string(),
                tags: vec!["portfolio".to_string(), "engineering".to_string()],
                content: vec![
                    Block::paragraph("Selected projects from the last three years."),
                    Block::Table(Table {
                        project_table: true,
                        headers: vec!["Project".to_string(), "Year".to_string(), "Stack".to_string()],
                        rows: vec![
                            vec!["Guild Framework".to_string(), "2023".to_string(), "Go".to_string()],
                            vec!["Chain Settlement Engine".to_string(), "2024".to_string(), "Rust".to_string()],
                            vec!["Custody Indexer".to_string(), "2025".to_string(), "Rust".to_string()],
                        ],
                    }),
                    Block::Paragraph(Paragraph::bold_led(
                        "Guild Framework (2023)",
                        "Guild Framework (2023)",
                    )),
                    Block::Paragraph(Paragraph::emphasized("Tech: Go, HTMX, Postgres")),
                    Block::Paragraph(Paragraph::emphasized(
                        "Purpose: membership and billing tooling for creator guilds",
                    )),
                    Block::paragraph(
                        "Eight weeks from kickoff to first paying guild. The framework still \
                         runs unmodified today.",
                    ),
                    Block::List(vec![
                        "Role-based access control".to_string(),
                        "Stripe billing with proration".to_string(),
                        "Self-serve guild onboarding".to_string(),
                    ]),
                    Block::Paragraph(Paragraph::bold_led(
                        "Chain Settlement Engine (2024)",
                        "Chain Settlement Engine (2024)",
                    )),
                    Block::Paragraph(Paragraph::emphasized("Tech: Rust, Postgres, Kafka")),
                    Block::Paragraph(Paragraph::emphasized(
                        "Purpose: exactly-once batch settlement across two chains",
                    )),
                    Block::paragraph(
                        "Replaced a nightly spreadsheet process with a continuously \
                         reconciled pipeline.",
                    ),
                    Block::Paragraph(Paragraph::bold_led(
                        "Custody Indexer (2025)",
                        "Custody Indexer (2025)",
                    )),
                    Block::Paragraph(Paragraph::emphasized("Tech: Rust, ClickHouse")),
                    Block::Paragraph(Paragraph::emphasized(
                        "Purpose: real-time position tracking across four chains",
                    )),
                    Block::paragraph("Eleven months in production without a missed deposit."),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_project_tables;

    #[test]
    fn test_default_content_has_all_sections() {
        let content = default_content();
        assert_eq!(content.nav.len(), 5);
        assert_eq!(content.packages.len(), 3);
        assert_eq!(content.expertise.len(), 3);
        assert_eq!(content.work_items.len(), 3);
        assert_eq!(content.posts.len(), 3);
    }

    #[test]
    fn test_projects_post_parses_into_cards() {
        let content = default_content();
        let post = content
            .posts
            .iter()
            .find(|p| p.slug == "past-projects")
            .unwrap();
        let tables = parse_project_tables(&post.content);
        assert_eq!(tables.len(), 1);
        let names: Vec<&str> = tables[0].projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Guild Framework", "Chain Settlement Engine", "Custody Indexer"]
        );
    }
}
