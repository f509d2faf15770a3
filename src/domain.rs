use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Accounts with a public event newer than this are shown as recently active
pub const RECENT_ACTIVITY_DAYS: i64 = 7;

/// Account metadata from `/users/{handle}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileDto {
    pub login: CompactString,
    #[serde(default)]
    pub name: Option<CompactString>,
    #[serde(default)]
    pub avatar_url: CompactString,
    #[serde(default)]
    pub company: Option<CompactString>,
    #[serde(default)]
    pub location: Option<CompactString>,
    /// GitHub sends an empty string when unset
    #[serde(default)]
    pub blog: Option<CompactString>,
    #[serde(default)]
    pub twitter_username: Option<CompactString>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: CompactString,
}

/// Element of `/users/{handle}/repos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryDto {
    #[serde(default)]
    pub language: Option<CompactString>,
}

/// Element of `/users/{handle}/events/public`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDto {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Merged result of one successful aggregation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedView {
    #[serde(flatten)]
    pub profile: ProfileDto,
    pub languages: BTreeSet<CompactString>,
    pub starred_count: usize,
    pub orgs_count: usize,
    pub latest_event_at: Option<DateTime<Utc>>,
}

impl AggregatedView {
    pub fn new(
        profile: ProfileDto,
        repositories: &[RepositoryDto],
        starred_count: usize,
        orgs_count: usize,
        latest_event_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            profile,
            languages: distinct_languages(repositories),
            starred_count,
            orgs_count,
            latest_event_at,
        }
    }

    /// Display name, falling back to the login
    pub fn display_name(&self) -> &str {
        self.profile
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.profile.login)
    }

    pub fn is_recently_active(&self, now: DateTime<Utc>) -> bool {
        self.latest_event_at
            .is_some_and(|at| now.signed_duration_since(at) < Duration::days(RECENT_ACTIVITY_DAYS))
    }
}

impl ProfileDto {
    /// Blog URI, treating the empty string GitHub returns as absent
    pub fn blog(&self) -> Option<&str> {
        non_empty(self.blog.as_deref())
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(self.company.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }

    pub fn twitter_url(&self) -> Option<String> {
        non_empty(self.twitter_username.as_deref()).map(|t| format!("https://twitter.com/{t}"))
    }
}

/// Distinct, non-empty language tags across a repository list
pub fn distinct_languages(repositories: &[RepositoryDto]) -> BTreeSet<CompactString> {
    repositories
        .iter()
        .filter_map(|r| r.language.as_ref())
        .filter(|l| !l.is_empty())
        .cloned()
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
