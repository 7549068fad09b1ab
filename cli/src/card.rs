//! Terminal rendering of search results.
//!
//! A card always shows the full name, the star count and the description.
//! The expanded form adds a detail block with the owner avatar, name, stars,
//! watchers, score and both timestamps, each behind its localized label.

use colored::*;
use repo_search_core::{SearchItem, StringKey, StringLookup};

const STAR: &str = "★";

pub fn render(item: &SearchItem, strings: &dyn StringLookup, expand: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", item.full_name().bold()));
    out.push_str(&format!("  {} {}\n", STAR.yellow(), item.stars()));
    out.push_str(&format!("  {}\n", strings.lookup(StringKey::Description).bold()));
    out.push_str(&format!("  {}\n", item.description()));

    if expand {
        let avatar = item
            .avatar_url()
            .map(str::to_string)
            .unwrap_or_else(|| strings.lookup(StringKey::NoAvatar));
        let rows = [
            (StringKey::Avatar, avatar),
            (StringKey::Name, item.name().to_string()),
            (StringKey::Stars, item.stars().to_string()),
            (StringKey::Watchers, item.watchers().to_string()),
            (StringKey::Score, item.score().to_string()),
            (StringKey::CreatedAt, item.created()),
            (StringKey::UpdatedAt, item.updated()),
        ];
        for (key, value) in rows {
            out.push_str(&format!("    {} {}\n", strings.lookup(key).cyan().bold(), value));
        }
    }
    out
}

/// Render every item, separated by blank lines, or the empty-state text.
pub fn render_all(items: &[SearchItem], strings: &dyn StringLookup, expand: bool) -> String {
    if items.is_empty() {
        return format!("{}\n", strings.lookup(StringKey::NothingToShow).dimmed());
    }
    items
        .iter()
        .map(|item| render(item, strings, expand))
        .collect::<Vec<_>>()
        .join("\n")
}
