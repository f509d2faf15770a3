//! Plain-text and JSON rendering of profile cards

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{domain::AggregatedView, id::Slot};

/// Widest a single card column may grow
pub const MAX_CARD_WIDTH: usize = 44;
const COLUMN_SEPARATOR: &str = " │ ";

#[derive(Serialize)]
struct SlotView<'a> {
    slot: Slot,
    #[serde(flatten)]
    view: &'a AggregatedView,
}

/// Lines of a single card, top to bottom
pub fn card_lines(slot: Slot, view: &AggregatedView, now: DateTime<Utc>) -> Vec<String> {
    let profile = &view.profile;
    let marker = if slot.is_primary() { "★" } else { "☆" };

    let mut lines = vec![
        format!("{marker} {}", view.display_name()),
        format!("@{}", profile.login),
    ];

    if let Some(company) = profile.company() {
        lines.push(format!("Works at: {company}"));
    }
    if let Some(location) = profile.location() {
        lines.push(format!("Location: {location}"));
    }
    if let Some(blog) = profile.blog() {
        lines.push(format!("Blog: {blog}"));
    }
    if let Some(twitter) = profile.twitter_url() {
        lines.push(format!("Twitter: {twitter}"));
    }
    if !profile.html_url.is_empty() {
        lines.push(format!("Profile: {}", profile.html_url));
    }

    lines.push(String::new());
    lines.push(format!("Repos: {}", profile.public_repos));
    lines.push(format!("Gists: {}", profile.public_gists));
    lines.push(format!("Followers: {}", profile.followers));
    lines.push(format!("Following: {}", profile.following));
    lines.push(format!("Starred: {}", view.starred_count));
    lines.push(format!("Orgs: {}", view.orgs_count));

    let languages = if view.languages.is_empty() {
        "None".to_string()
    } else {
        view.languages.iter().join(", ")
    };
    lines.push(format!("Languages: {languages}"));

    lines.push(format!("Joined: {}", format_date(profile.created_at)));
    if let Some(updated_at) = profile.updated_at {
        lines.push(format!("Last Updated: {}", format_date(updated_at)));
    }
    if let Some(latest) = view.latest_event_at {
        let suffix = if view.is_recently_active(now) { " (recently active)" } else { "" };
        lines.push(format!("Last Active: {}{suffix}", format_date(latest)));
    }

    lines
}

/// Render cards next to each other, in the order given
pub fn render_cards(views: &[(Slot, &AggregatedView)], now: DateTime<Utc>) -> String {
    let cards: Vec<Vec<String>> = views
        .iter()
        .map(|(slot, view)| card_lines(*slot, view, now))
        .collect();

    let widths: Vec<usize> = cards
        .iter()
        .map(|lines| {
            lines
                .iter()
                .map(|l| l.width())
                .max()
                .unwrap_or(0)
                .min(MAX_CARD_WIDTH)
        })
        .collect();

    let height = cards.iter().map(Vec::len).max().unwrap_or(0);

    (0..height)
        .map(|row| {
            cards
                .iter()
                .zip(&widths)
                .map(|(lines, width)| fit(lines.get(row).map_or("", String::as_str), *width))
                .join(COLUMN_SEPARATOR)
                .trim_end()
                .to_string()
        })
        .join("\n")
}

/// Pretty JSON array of views tagged with their slot
pub fn render_json(views: &[(Slot, &AggregatedView)]) -> serde_json::Result<String> {
    let tagged: Vec<SlotView> = views
        .iter()
        .map(|(slot, view)| SlotView { slot: *slot, view: *view })
        .collect();
    serde_json::to_string_pretty(&tagged)
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Pad or truncate `text` to exactly `width` terminal columns
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    if text.width() > width {
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    } else {
        out.push_str(text);
        used = text.width();
    }

    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}
