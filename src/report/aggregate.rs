//! Per-category and per-author post aggregation

use std::collections::HashMap;

use crate::models::{Category, Post, User};

/// Post titles grouped by category display name
///
/// Groups appear in the order their first post was encountered; titles
/// within a group keep post order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsByCategory {
    groups: Vec<(String, Vec<String>)>,
}

impl PostsByCategory {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, titles)| (name.as_str(), titles.as_slice()))
    }

    /// Titles listed under a category display name
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, titles)| titles.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of titles over all groups
    pub fn total_titles(&self) -> usize {
        self.groups.iter().map(|(_, titles)| titles.len()).sum()
    }
}

/// Name shown for a category id missing from the category list
pub fn fallback_category_name(id: u64) -> String {
    format!("ID:{id}")
}

/// Group post titles under each category a post belongs to
pub fn posts_per_category(posts: &[Post], categories: &[Category]) -> PostsByCategory {
    // A repeated id takes the name of its last entry.
    let names: HashMap<u64, &str> = categories
        .iter()
        .map(|cat| (cat.id, cat.name.as_str()))
        .collect();

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for post in posts {
        for &cat_id in &post.categories {
            let name = names
                .get(&cat_id)
                .map(|n| (*n).to_string())
                .unwrap_or_else(|| fallback_category_name(cat_id));

            let slot = match index.get(&name) {
                Some(&i) => i,
                None => {
                    index.insert(name.clone(), groups.len());
                    groups.push((name, Vec::new()));
                    groups.len() - 1
                }
            };
            groups[slot].1.push(post.title.text().to_string());
        }
    }

    PostsByCategory { groups }
}

/// One line of the user listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub name: String,
    pub posts: usize,
}

/// Count posts for every listed user, most prolific first
///
/// Every user appears exactly once per entry in `users`. Ties keep the
/// order of the user list. Posts by ids not in `users` are not shown.
pub fn posts_per_author(posts: &[Post], users: &[User]) -> Vec<AuthorCount> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for author in posts.iter().filter_map(|p| p.author) {
        *counts.entry(author).or_insert(0) += 1;
    }

    let mut authors: Vec<AuthorCount> = users
        .iter()
        .map(|user| AuthorCount {
            name: user.display_name().to_string(),
            posts: user
                .id
                .and_then(|id| counts.get(&id).copied())
                .unwrap_or(0),
        })
        .collect();

    // sort_by is stable
    authors.sort_by(|a, b| b.posts.cmp(&a.posts));
    authors
}
