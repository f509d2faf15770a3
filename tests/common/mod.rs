#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use vibecheck::{
    client::{ClientConfig, ProfileService},
    id::Handle,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Payloads served for one account
pub struct Fixture {
    pub login: &'static str,
    pub profile: Value,
    pub languages: Vec<Option<&'static str>>,
    pub starred: usize,
    pub orgs: usize,
    pub events: Vec<&'static str>,
}

impl Fixture {
    pub fn torvalds() -> Self {
        Self {
            login: "torvalds",
            profile: json!({
                "login": "torvalds",
                "public_repos": 3,
                "public_gists": 0,
                "followers": 200000,
                "following": 0,
                "created_at": "2011-09-03T15:26:22Z"
            }),
            languages: vec![Some("C"), Some("C"), Some("Shell")],
            starred: 10,
            orgs: 1,
            events: vec!["2024-01-01T00:00:00Z", "2023-12-31T08:00:00Z"],
        }
    }

    pub fn named(login: &'static str) -> Self {
        Self {
            login,
            profile: json!({
                "login": login,
                "name": login.to_uppercase(),
                "public_repos": 1,
                "public_gists": 2,
                "followers": 3,
                "following": 4,
                "created_at": "2015-01-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z",
                "html_url": format!("https://github.com/{login}")
            }),
            languages: vec![Some("Rust")],
            starred: 2,
            orgs: 0,
            events: vec![],
        }
    }

    pub fn handle(&self) -> Handle {
        Handle::parse(self.login).unwrap()
    }

    /// Mount all five endpoints with successful responses
    pub async fn mount(&self, server: &MockServer) {
        self.mount_profile(server).await;
        for resource in ["repos", "starred", "orgs", "events/public"] {
            self.mount_secondary(server, resource, ResponseTemplate::new(200).set_body_json(self.body(resource)))
                .await;
        }
    }

    pub async fn mount_profile(&self, server: &MockServer) {
        self.mount_profile_with(server, ResponseTemplate::new(200).set_body_json(&self.profile))
            .await;
    }

    /// Mount all five endpoints, holding back the profile response for `delay`
    pub async fn mount_delayed(&self, server: &MockServer, delay: Duration) {
        self.mount_profile_with(
            server,
            ResponseTemplate::new(200).set_body_json(&self.profile).set_delay(delay),
        )
        .await;
        for resource in ["repos", "starred", "orgs", "events/public"] {
            self.mount_secondary(server, resource, ResponseTemplate::new(200).set_body_json(self.body(resource)))
                .await;
        }
    }

    async fn mount_profile_with(&self, server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}", self.login)))
            .respond_with(template)
            .mount(server)
            .await;
    }

    /// Mount every secondary endpoint, replacing `failing` with the given response
    pub async fn mount_with_failure(&self, server: &MockServer, failing: &str, response: ResponseTemplate) {
        self.mount_profile(server).await;
        for resource in ["repos", "starred", "orgs", "events/public"] {
            let template = if resource == failing {
                response.clone()
            } else {
                ResponseTemplate::new(200).set_body_json(self.body(resource))
            };
            self.mount_secondary(server, resource, template).await;
        }
    }

    async fn mount_secondary(&self, server: &MockServer, resource: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}/{resource}", self.login)))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn body(&self, resource: &str) -> Value {
        match resource {
            "repos" => Value::Array(
                self.languages
                    .iter()
                    .enumerate()
                    .map(|(i, language)| json!({ "id": i, "name": format!("repo-{i}"), "language": language }))
                    .collect(),
            ),
            "starred" => list_of(self.starred),
            "orgs" => list_of(self.orgs),
            "events/public" => Value::Array(
                self.events
                    .iter()
                    .map(|created_at| json!({ "type": "PushEvent", "created_at": created_at }))
                    .collect(),
            ),
            other => panic!("unknown resource {other}"),
        }
    }
}

pub fn list_of(len: usize) -> Value {
    Value::Array((0..len).map(|i| json!({ "id": i })).collect())
}

pub fn service_for(server: &MockServer) -> ProfileService {
    ProfileService::new(ClientConfig::new(server.uri())).unwrap()
}
