//! Tag-frequency ranking for the blog.

use std::collections::HashMap;

use serde::Serialize;

/// How many tags the ranking returns at most.
pub const TAG_LIMIT: usize = 12;

/// A tag with its occurrence count across published posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Rank tags across the given comma-separated tag fields.
///
/// Tokens are trimmed; empty tokens are dropped. Ordered by descending
/// count, ties by first appearance (stable), capped at [`TAG_LIMIT`].
pub fn rank_tags<'a, I>(tag_fields: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for field in tag_fields {
        for token in field.split(',') {
            let tag = token.trim();
            if tag.is_empty() {
                continue;
            }
            match index.get(tag) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(tag.to_string(), counts.len());
                    counts.push(TagCount {
                        tag: tag.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TAG_LIMIT);
    counts
}
