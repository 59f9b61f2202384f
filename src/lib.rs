//! # scrappey-flow
//!
//! scrappey-flow is the execution core of a workflow node that drives the
//! Scrappey web-scraping API. It is designed to be embedded in a workflow host
//! that supplies input items, node parameters and credentials.
//!
//! ## Core Features
//!
//! - **Request Builder**: Turns ~60 declarative node parameters into one Scrappey request body
//! - **Browser Actions**: Compiles UI action records into the remote browser-automation script
//! - **Auto-Retry**: Replays a failed call of the previous HTTP node through Scrappey
//! - **Sessions**: Creates, lists, checks and destroys server-side browser sessions
//! - **Field Catalog**: Declarative parameter metadata with JSON-schema validation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scrappey_flow::{Context, Credentials, EngineBuilder, Vars};
//!
//! let engine = EngineBuilder::new().build()?;
//! let ctx = Context::new(vec![Vars::new()])
//!     .with_parameters(Vars::new().with("scrappeyOperations", "requestBuilder").with("url", "https://example.com"))
//!     .with_credentials(Credentials::new("api-key"));
//! let outputs = engine.execute(&ctx)?;
//! ```

mod builder;
pub mod catalog;
mod common;
mod config;
pub mod dispatcher;
mod engine;
mod error;
pub mod model;
pub mod operations;
mod runtime;
mod template;

pub use builder::EngineBuilder;
pub use common::Vars;
pub use config::{ClientConfig, Config, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, WhitelistedDomains};
pub use engine::{Engine, OutputItem, PairedItem};
pub use error::ScrappeyError;
pub use runtime::{Context, ExpressionEvaluator, ItemExpressionEvaluator, ParameterReader};

/// Result type alias for scrappey-flow operations.
pub type Result<T> = std::result::Result<T, ScrappeyError>;
