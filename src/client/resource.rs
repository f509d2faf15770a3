//! Endpoints fetched for a single handle

use compact_str::{CompactString, format_compact};

use crate::id::Handle;

/// One of the five read-only resources making up a profile
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Resource {
    Profile,
    Repositories,
    Starred,
    Organizations,
    Events,
}

impl Resource {
    /// Path relative to the API base URL
    pub fn path(self, handle: &Handle) -> CompactString {
        match self {
            Resource::Profile => format_compact!("/users/{handle}"),
            Resource::Repositories => format_compact!("/users/{handle}/repos"),
            Resource::Starred => format_compact!("/users/{handle}/starred"),
            Resource::Organizations => format_compact!("/users/{handle}/orgs"),
            Resource::Events => format_compact!("/users/{handle}/events/public"),
        }
    }

    /// Only the profile lookup aborts a pipeline on its own
    pub fn is_fatal(self) -> bool {
        self == Resource::Profile
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Repositories => "repositories",
            Resource::Starred => "starred",
            Resource::Organizations => "organizations",
            Resource::Events => "events",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
