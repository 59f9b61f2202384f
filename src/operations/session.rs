use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{
    Credentials, Result, ScrappeyError,
    model::{Command, ProxySettings, SessionListBody, SessionRefBody, SessionSetupBody},
    runtime::ParameterReader,
};

use super::{Operation, OperationType, proxy::ProxyChoice};

/// Body shared by `sessions.create` and `websocket.create`.
pub(super) fn setup_body(
    reader: &ParameterReader<'_>,
    credentials: &Credentials,
    cmd: Command,
) -> Result<SessionSetupBody> {
    let mut proxy = ProxySettings::default();
    ProxyChoice::read(reader)?.apply(&mut proxy, credentials, None);

    Ok(SessionSetupBody {
        cmd,
        session: None,
        session_ttl: reader.integer("sessionTtl")?,
        headless: reader.string("headless")?,
        geoip: reader.string("geoip")?,
        proxy,
    })
}

/// Session id parameter that the call cannot go without.
fn required_session(
    reader: &ParameterReader<'_>,
    name: &str,
) -> Result<String> {
    reader.non_empty(name)?.ok_or_else(|| ScrappeyError::Config(format!("parameter '{}' must name a session", name)))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCreateOperation;

#[async_trait]
impl Operation for SessionCreateOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::SessionCreate
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value> {
        let mut body = setup_body(reader, credentials, Command::SessionsCreate)?;
        body.session = reader.non_empty("sessionId")?;
        debug!("item {}: creating session {:?} (ttl {}s)", reader.item_index(), body.session, body.session_ttl);
        Ok(serde_json::to_value(body)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionDestroyOperation;

#[async_trait]
impl Operation for SessionDestroyOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::SessionDestroy
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        _credentials: &Credentials,
    ) -> Result<Value> {
        let body = SessionRefBody {
            cmd: Command::SessionsDestroy,
            session: required_session(reader, "sessionToDestroy")?,
        };
        Ok(serde_json::to_value(body)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionListOperation;

#[async_trait]
impl Operation for SessionListOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::SessionList
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        _credentials: &Credentials,
    ) -> Result<Value> {
        let user_id = reader.integer("userId")?;
        let body = SessionListBody {
            cmd: Command::SessionsList,
            user_id: (user_id > 0).then_some(user_id),
        };
        Ok(serde_json::to_value(body)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionActiveOperation;

#[async_trait]
impl Operation for SessionActiveOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::SessionActive
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        _credentials: &Credentials,
    ) -> Result<Value> {
        let body = SessionRefBody {
            cmd: Command::SessionsActive,
            session: required_session(reader, "sessionToCheck")?,
        };
        Ok(serde_json::to_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{common::Vars, runtime::Context};

    fn build(
        operation: &dyn Operation,
        parameters: Value,
        credentials: &Credentials,
    ) -> Result<Value> {
        let ctx = Context::new(vec![Vars::new()]).with_parameters(Vars::from(parameters));
        operation.build(&ctx.reader(0), credentials)
    }

    #[test]
    fn test_create_defaults() {
        let body = build(&SessionCreateOperation, json!({}), &Credentials::new("k")).unwrap();
        assert_eq!(body, json!({"cmd": "sessions.create", "session_ttl": 180, "headless": "true", "geoip": "false"}));
    }

    #[test]
    fn test_create_with_id_and_credential_proxy() {
        let credentials = Credentials::new("k").with_proxy_url("http://u:p@proxy:8000");
        let body = build(&SessionCreateOperation, json!({"sessionId": "my-session", "sessionTtl": 300, "headless": "false", "geoip": "true"}), &credentials).unwrap();
        assert_eq!(
            body,
            json!({"cmd": "sessions.create", "session": "my-session", "session_ttl": 300, "headless": "false", "geoip": "true", "proxy": "http://u:p@proxy:8000"})
        );
    }

    #[test]
    fn test_create_blank_id_is_omitted() {
        let body = build(&SessionCreateOperation, json!({"sessionId": "   "}), &Credentials::new("k")).unwrap();
        assert!(body.get("session").is_none());
    }

    #[test]
    fn test_create_scrappey_proxy() {
        let body = build(
            &SessionCreateOperation,
            json!({"whichProxyToUse": "proxyFromScrappey", "proxyType": "mobileProxy", "customProxyCountryBoolean": true, "customProxyCountry": "France"}),
            &Credentials::new("k").with_proxy_url("http://cred:1"),
        )
        .unwrap();
        assert_eq!(body["mobileProxy"], json!(true));
        assert_eq!(body["proxyCountry"], json!("France"));
        assert!(body.get("proxy").is_none());
    }

    #[test]
    fn test_destroy_and_active() {
        let body = build(&SessionDestroyOperation, json!({"sessionToDestroy": "s-1"}), &Credentials::new("k")).unwrap();
        assert_eq!(body, json!({"cmd": "sessions.destroy", "session": "s-1"}));

        let body = build(&SessionActiveOperation, json!({"sessionToCheck": "s-2"}), &Credentials::new("k")).unwrap();
        assert_eq!(body, json!({"cmd": "sessions.active", "session": "s-2"}));
    }

    #[test]
    fn test_empty_session_is_rejected() {
        let result = build(&SessionDestroyOperation, json!({}), &Credentials::new("k"));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));

        let result = build(&SessionActiveOperation, json!({"sessionToCheck": ""}), &Credentials::new("k"));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));
    }

    #[test]
    fn test_list_user_id() {
        let body = build(&SessionListOperation, json!({}), &Credentials::new("k")).unwrap();
        assert_eq!(body, json!({"cmd": "sessions.list"}));

        let body = build(&SessionListOperation, json!({"userId": 42}), &Credentials::new("k")).unwrap();
        assert_eq!(body, json!({"cmd": "sessions.list", "userId": 42}));
    }
}
