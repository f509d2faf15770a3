//! GitHub profile client modules
//!
//! [`ProfileApi`] owns the network boundary and issues one request per
//! resource; [`ProfileService`] runs the aggregation pipeline on top of it.

pub mod api;
pub mod config;
pub mod error;
pub mod resource;
pub mod service;

// Re-export main types for convenience
pub use api::ProfileApi;
pub use config::ClientConfig;
pub use error::{AggregationError, ClientError};
pub use resource::Resource;
pub use service::ProfileService;
