//! Blog post data and filtering
//!
//! Pure, synchronous filtering over the post list: tag tokens resolve
//! through a configurable alias table with word-boundary matching, and
//! free-text search matches case-insensitive substrings of title,
//! summary, or tags. Tag filtering also mutates the location query
//! string so the filter state stays bookmarkable.

use std::collections::HashMap;

use regex::Regex;

use crate::models::blocks::Block;
use crate::models::location::Location;

/// Tag token that always shows every post.
pub const TAG_ALL: &str = "all";

/// A blog post as rendered into the list.
#[derive(Debug, Clone)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub content: Vec<Block>,
}

impl BlogPost {
    /// The comma-joined tag string filters match against.
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }
}

/// Tag -> alias list. A tag with no entry resolves to itself.
#[derive(Debug, Clone, Default)]
pub struct TagAliases(pub HashMap<String, Vec<String>>);

impl TagAliases {
    pub fn resolve(&self, tag: &str) -> Vec<String> {
        let key = tag.to_lowercase();
        match self.0.get(&key) {
            Some(aliases) => aliases.clone(),
            None => vec![key],
        }
    }
}

/// Does `tag` select this post's tag line? Word-boundary match against
/// each alias, so "go" never matches "golang-adjacent" prose tags.
pub fn tag_matches(aliases: &TagAliases, tag: &str, post_tag_line: &str) -> bool {
    let tag = tag.to_lowercase();
    if tag == TAG_ALL {
        return true;
    }
    let haystack = post_tag_line.to_lowercase();
    aliases.resolve(&tag).iter().any(|alias| {
        let pattern = format!(r"\b{}\b", regex::escape(&alias.to_lowercase()));
        match Regex::new(&pattern) {
            Ok(re) => re.is_match(&haystack),
            Err(_) => false,
        }
    })
}

/// Does the free-text query select this post?
pub fn search_matches(post: &BlogPost, query: &str) -> bool {
    let q = query.to_lowercase();
    post.title.to_lowercase().contains(&q)
        || post.summary.to_lowercase().contains(&q)
        || post.tag_line().to_lowercase().contains(&q)
}

/// Per-screen filter state. Visibility is a parallel vector over the
/// post list; whichever control acted last (tag or search) owns it.
#[derive(Debug, Clone)]
pub struct BlogFilterState {
    pub active_tag: String,
    pub query: String,
    pub visible: Vec<bool>,
}

impl BlogFilterState {
    pub fn new(post_count: usize) -> Self {
        Self {
            active_tag: TAG_ALL.to_string(),
            query: String::new(),
            visible: vec![true; post_count],
        }
    }

    /// Apply a tag filter and push it into the location query string.
    pub fn apply_tag(
        &mut self,
        tag: &str,
        posts: &[BlogPost],
        aliases: &TagAliases,
        location: &mut Location,
    ) {
        let tag = tag.to_lowercase();
        self.active_tag = tag.clone();
        self.visible = posts
            .iter()
            .map(|p| tag_matches(aliases, &tag, &p.tag_line()))
            .collect();

        if tag == TAG_ALL {
            location.remove_query_param("tag");
        } else {
            location.set_query_param("tag", &tag);
        }
    }

    /// Apply a search query. An empty query shows everything.
    pub fn apply_search(&mut self, query: &str, posts: &[BlogPost]) {
        self.query = query.to_string();
        self.visible = posts.iter().map(|p| search_matches(p, query)).collect();
    }

    /// Clear the search box and re-show all posts.
    pub fn clear_search(&mut self, posts: &[BlogPost]) {
        self.apply_search("", posts);
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, summary: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            slug: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            date: "2025-01-01".to_string(),
            summary: summary.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: Vec::new(),
        }
    }

    fn posts() -> Vec<BlogPost> {
        vec![
            post("Shipping AI Agents", "Lessons from production", &["ai", "engineering"]),
            post("Payment Rails", "Moving money on-chain", &["blockchain", "payments"]),
            post("Past Projects", "A tour of delivered work", &["portfolio"]),
        ]
    }

    fn aliases() -> TagAliases {
        let mut map = HashMap::new();
        map.insert(
            "ai".to_string(),
            vec!["ai".to_string(), "machine learning".to_string()],
        );
        map.insert(
            "blockchain".to_string(),
            vec!["blockchain".to_string(), "ethereum".to_string()],
        );
        TagAliases(map)
    }

    #[test]
    fn test_tag_all_shows_every_post() {
        let posts = posts();
        let mut state = BlogFilterState::new(posts.len());
        let mut loc = Location::new("/blog");
        state.apply_tag("all", &posts, &aliases(), &mut loc);
        assert_eq!(state.visible_count(), 3);
        assert_eq!(loc.query_param("tag"), None);
    }

    #[test]
    fn test_unknown_tag_hides_every_post() {
        let posts = posts();
        let mut state = BlogFilterState::new(posts.len());
        let mut loc = Location::new("/blog");
        state.apply_tag("quantum", &posts, &aliases(), &mut loc);
        assert_eq!(state.visible_count(), 0);
    }

    #[test]
    fn test_tag_filter_uses_aliases() {
        let posts = posts();
        let mut state = BlogFilterState::new(posts.len());
        let mut loc = Location::new("/blog");
        state.apply_tag("ai", &posts, &aliases(), &mut loc);
        assert_eq!(state.visible, vec![true, false, false]);
        assert_eq!(loc.query_param("tag"), Some("ai"));
    }

    #[test]
    fn test_word_boundary_prevents_partial_match() {
        let aliases = TagAliases::default();
        // "rail" must not match inside "rails"
        assert!(!tag_matches(&aliases, "rail", "payments, rails"));
        assert!(tag_matches(&aliases, "rails", "payments, rails"));
    }

    #[test]
    fn test_search_matches_title_summary_and_tags() {
        let posts = posts();
        let mut state = BlogFilterState::new(posts.len());
        state.apply_search("agents", &posts);
        assert_eq!(state.visible, vec![true, false, false]);
        state.apply_search("on-chain", &posts);
        assert_eq!(state.visible, vec![false, true, false]);
        state.apply_search("PORTFOLIO", &posts);
        assert_eq!(state.visible, vec![false, false, true]);
    }

    #[test]
    fn test_clear_search_shows_all() {
        let posts = posts();
        let mut state = BlogFilterState::new(posts.len());
        state.apply_search("agents", &posts);
        state.clear_search(&posts);
        assert_eq!(state.visible_count(), 3);
    }
}
