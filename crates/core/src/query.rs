//! Library filtering, faceting, and display ordering.
//!
//! All queries run over the full in-memory post list; the library is
//! capped at human scale so there is no index to maintain. Filters
//! combine conjunctively.

use crate::record::SavedPost;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct tags and authors across the whole library, sorted.
///
/// Computed from the unfiltered post list so a narrow query still
/// shows every available refinement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Facets {
    pub tags: Vec<String>,
    pub authors: Vec<String>,
}

/// Collect facets over `posts`. Empty actor names are not offered.
pub fn build_facets(posts: &[SavedPost]) -> Facets {
    let mut tags = BTreeSet::new();
    let mut authors = BTreeSet::new();

    for post in posts {
        for tag in &post.tags {
            tags.insert(tag.clone());
        }
        if !post.post.actor.is_empty() {
            authors.insert(post.post.actor.clone());
        }
    }

    Facets { tags: tags.into_iter().collect(), authors: authors.into_iter().collect() }
}

/// Conjunctive library filter. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// Case-insensitive substring over actor, text, tags, and note.
    pub text: Option<String>,
    /// Exact tag membership.
    pub tag: Option<String>,
    /// Exact actor name.
    pub author: Option<String>,
    /// Lower bound on the display timestamp, inclusive.
    pub saved_after: Option<DateTime<Utc>>,
}

impl QueryFilter {
    pub fn matches(&self, post: &SavedPost) -> bool {
        self.matches_text(post) && self.matches_tag(post) && self.matches_author(post) && self.matches_saved_after(post)
    }

    fn matches_text(&self, post: &SavedPost) -> bool {
        let Some(query) = &self.text else {
            return true;
        };
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!(
            "{}\n{}\n{}\n{}",
            post.post.actor,
            post.post.text,
            post.tags.join(" "),
            post.note
        )
        .to_lowercase();
        haystack.contains(&needle)
    }

    fn matches_tag(&self, post: &SavedPost) -> bool {
        match &self.tag {
            Some(tag) => post.tags.iter().any(|t| t == tag),
            None => true,
        }
    }

    fn matches_author(&self, post: &SavedPost) -> bool {
        match &self.author {
            Some(author) => &post.post.actor == author,
            None => true,
        }
    }

    fn matches_saved_after(&self, post: &SavedPost) -> bool {
        match self.saved_after {
            // A record whose timestamps don't parse can't prove it is
            // inside the window, so it is excluded.
            Some(bound) => post.display_timestamp().is_some_and(|ts| ts >= bound),
            None => true,
        }
    }
}

/// Posts matching `filter`, in their stored order.
pub fn filter_posts(posts: &[SavedPost], filter: &QueryFilter) -> Vec<SavedPost> {
    posts.iter().filter(|post| filter.matches(post)).cloned().collect()
}

/// Order newest first by display timestamp.
///
/// The sort is stable, so equal timestamps and undated records keep
/// their insertion order; undated records sink to the end.
pub fn sort_for_display(posts: &mut [SavedPost]) {
    posts.sort_by_key(|post| {
        std::cmp::Reverse(post.display_timestamp().unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
    });
}

/// Parse a `saved_after` bound: RFC 3339, or a bare `YYYY-MM-DD` date
/// taken as midnight UTC.
pub fn parse_saved_after(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CapturedPost;

    fn post(id: &str, actor: &str, text: &str, tags: &[&str], note: &str, saved_at: &str) -> SavedPost {
        SavedPost {
            id: id.to_string(),
            post: CapturedPost {
                actor: actor.to_string(),
                text: text.to_string(),
                images: Vec::new(),
                timestamp: String::new(),
                url: String::new(),
                captured_at: String::new(),
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            note: note.to_string(),
            saved_at: saved_at.to_string(),
        }
    }

    fn sample() -> Vec<SavedPost> {
        vec![
            post(
                "p1",
                "Jane Doe",
                "We launched the beta today",
                &["launch", "rust"],
                "ship it",
                "2024-03-01T08:00:00Z",
            ),
            post(
                "p2",
                "Sam Lee",
                "Hiring senior engineers",
                &["hiring"],
                "",
                "2024-03-02T09:00:00Z",
            ),
            post("p3", "Jane Doe", "Conference recap", &["rust"], "slides in thread", "2024-02-20T10:00:00Z"),
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let posts = sample();
        let matched = filter_posts(&posts, &QueryFilter::default());
        assert_eq!(matched.len(), posts.len());
    }

    #[test]
    fn test_text_search_is_case_insensitive_and_covers_note() {
        let posts = sample();
        let filter = QueryFilter { text: Some("SHIP IT".to_string()), ..Default::default() };
        let matched = filter_posts(&posts, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "p1");
    }

    #[test]
    fn test_tag_filter_is_exact_membership() {
        let posts = sample();
        let filter = QueryFilter { tag: Some("rust".to_string()), ..Default::default() };
        let ids: Vec<String> = filter_posts(&posts, &filter).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        let filter = QueryFilter { tag: Some("rus".to_string()), ..Default::default() };
        assert!(filter_posts(&posts, &filter).is_empty());
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let posts = sample();
        let filter = QueryFilter {
            text: Some("recap".to_string()),
            tag: Some("rust".to_string()),
            author: Some("Jane Doe".to_string()),
            saved_after: None,
        };
        let matched = filter_posts(&posts, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "p3");

        let filter = QueryFilter {
            text: Some("recap".to_string()),
            tag: Some("hiring".to_string()),
            ..Default::default()
        };
        assert!(filter_posts(&posts, &filter).is_empty());
    }

    #[test]
    fn test_saved_after_excludes_unparseable_timestamps() {
        let mut posts = sample();
        posts.push(post("p4", "Ann Wu", "undated", &[], "", "not-a-timestamp"));

        let filter = QueryFilter { saved_after: parse_saved_after("2024-01-01"), ..Default::default() };
        let ids: Vec<String> = filter_posts(&posts, &filter).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_saved_after_bound_is_inclusive() {
        let posts = sample();
        let filter = QueryFilter {
            saved_after: parse_saved_after("2024-03-01T08:00:00Z"),
            ..Default::default()
        };
        let ids: Vec<String> = filter_posts(&posts, &filter).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_parse_saved_after_accepts_bare_date() {
        let bound = parse_saved_after("2024-03-01").unwrap();
        assert_eq!(bound.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert!(parse_saved_after("March 1st").is_none());
    }

    #[test]
    fn test_sort_newest_first_with_undated_last() {
        let mut posts = sample();
        posts.push(post("p4", "Ann Wu", "undated", &[], "", ""));
        sort_for_display(&mut posts);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1", "p3", "p4"]);
    }

    #[test]
    fn test_sort_keeps_insertion_order_on_ties() {
        let mut posts = vec![
            post("a", "X", "", &[], "", "2024-03-01T08:00:00Z"),
            post("b", "Y", "", &[], "", "2024-03-01T08:00:00Z"),
        ];
        sort_for_display(&mut posts);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_facets_are_sorted_and_skip_empty_actor() {
        let mut posts = sample();
        posts.push(post("p4", "", "anonymous", &["launch"], "", ""));
        let facets = build_facets(&posts);
        assert_eq!(facets.tags, vec!["hiring", "launch", "rust"]);
        assert_eq!(facets.authors, vec!["Jane Doe", "Sam Lee"]);
    }
}
