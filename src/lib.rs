//! Side-by-side comparison of GitHub profiles.
//!
//! A [`client::ProfileService`] turns a [`id::Handle`] into an
//! [`domain::AggregatedView`] by fetching the profile, repositories, starred
//! list, organizations and public events of the account. Up to three views
//! are kept in a [`stores::ComparisonStore`] and rendered by [`render`].

pub mod app_init;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod event;
pub mod id;
pub mod logging;
pub mod notice_service;
pub mod render;
pub mod result;
pub mod stores;
