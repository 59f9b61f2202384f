//! Operation router and the handlers behind it.
//!
//! Every handler turns the parameters of one item into a request body; the
//! shared [`Operation::run`] sends that body through the [`Dispatcher`] and
//! hands back the raw JSON response.

pub mod auto_retry;
pub mod browser_actions;
pub mod proxy;
pub mod request_builder;
mod session;
mod websocket;

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    Credentials, Result, ScrappeyError,
    dispatcher::Dispatcher,
    model::{ApiResponse, SessionActiveResponse, SessionListResponse},
    runtime::ParameterReader,
};

pub use auto_retry::{AutoRetryBrowserOperation, AutoRetryRequestOperation};
pub use request_builder::RequestBuilderOperation;
pub use session::{SessionActiveOperation, SessionCreateOperation, SessionDestroyOperation, SessionListOperation};
pub use websocket::WebsocketCreateOperation;

/// Content type forced whenever a JSON body is sent.
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
/// `requestType` value selecting plain HTTP mode.
pub(crate) const REQUEST_TYPE_MARKER: &str = "request";

/// Value of the `scrappeyOperations` parameter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum OperationType {
    #[default]
    RequestBuilder,
    HttpRequestAutoRetry,
    HttpRequestAutoRetryBrowser,
    SessionCreate,
    SessionDestroy,
    SessionList,
    SessionActive,
    WebsocketCreate,
}

impl OperationType {
    /// Handler for this operation.
    pub fn operation(&self) -> Arc<dyn Operation> {
        match self {
            OperationType::RequestBuilder => Arc::new(RequestBuilderOperation),
            OperationType::HttpRequestAutoRetry => Arc::new(AutoRetryRequestOperation),
            OperationType::HttpRequestAutoRetryBrowser => Arc::new(AutoRetryBrowserOperation),
            OperationType::SessionCreate => Arc::new(SessionCreateOperation),
            OperationType::SessionDestroy => Arc::new(SessionDestroyOperation),
            OperationType::SessionList => Arc::new(SessionListOperation),
            OperationType::SessionActive => Arc::new(SessionActiveOperation),
            OperationType::WebsocketCreate => Arc::new(WebsocketCreateOperation),
        }
    }
}

/// Resolve an operation name to its handler.
pub fn route(name: &str) -> Result<Arc<dyn Operation>> {
    OperationType::from_str(name).map(|op| op.operation()).map_err(|_| ScrappeyError::Config(format!("Operation \"{}\" is not supported", name)))
}

#[async_trait]
pub trait Operation: Send + Sync {
    /// Returns the [`OperationType`] this handler serves.
    fn operation_type(&self) -> OperationType;

    /// Builds the request body for one item.
    ///
    /// # Arguments
    ///
    /// * `reader` - The [`ParameterReader`] of the item being processed.
    /// * `credentials` - The resolved [`Credentials`] of the run.
    ///
    /// # Returns
    ///
    /// Returns the JSON body to post to the API.
    fn build(
        &self,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value>;

    /// Builds the body, sends it and returns the raw API response.
    async fn run(
        &self,
        dispatcher: &Dispatcher,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value> {
        let body = self.build(reader, credentials)?;
        let response = dispatcher.send("", &credentials.api_key, &body).await?;
        log_outcome(self.operation_type(), reader.item_index(), &response);
        Ok(response)
    }
}

/// Log what the API reported; an error tag in a 2xx response is not raised.
fn log_outcome(
    op: OperationType,
    item_index: usize,
    response: &Value,
) {
    match op {
        OperationType::SessionList => match SessionListResponse::deserialize(response) {
            Ok(list) => info!("item {}: {} sessions listed", item_index, list.sessions.len()),
            Err(_) => info!("item {}: {} completed", item_index, op.as_ref()),
        },
        OperationType::SessionActive => match SessionActiveResponse::deserialize(response) {
            Ok(state) => info!("item {}: session active = {}", item_index, state.active),
            Err(_) => info!("item {}: {} completed", item_index, op.as_ref()),
        },
        _ => match ApiResponse::deserialize(response) {
            Ok(api) if api.is_error() => {
                warn!("item {}: {} reported an error: {}", item_index, op.as_ref(), api.error.as_deref().unwrap_or("unspecified"))
            }
            Ok(api) => {
                let status = api.solution.as_ref().and_then(|solution| solution.status_code);
                info!("item {}: {} completed (status {:?}, session {:?})", item_index, op.as_ref(), status, api.session)
            }
            Err(_) => info!("item {}: {} completed", item_index, op.as_ref()),
        },
    }
}
