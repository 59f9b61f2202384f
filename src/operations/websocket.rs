use async_trait::async_trait;
use serde_json::Value;

use crate::{Credentials, Result, model::Command, runtime::ParameterReader};

use super::{Operation, OperationType, session::setup_body};

/// `websocketCreate`: open a browser reachable over a websocket.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebsocketCreateOperation;

#[async_trait]
impl Operation for WebsocketCreateOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::WebsocketCreate
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value> {
        Ok(serde_json::to_value(setup_body(reader, credentials, Command::WebsocketCreate)?)?)
    }
}
