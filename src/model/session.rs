use serde::{Deserialize, Serialize};

use super::{Command, ProxySettings};

/// Body of `sessions.create` and `websocket.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSetupBody {
    pub cmd: Command,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    pub session_ttl: u64,
    /// `"true"` / `"false"`, sent as a string.
    pub headless: String,
    /// `"true"` / `"false"`, sent as a string.
    pub geoip: String,
    #[serde(flatten)]
    pub proxy: ProxySettings,
}

/// Body of `sessions.destroy` and `sessions.active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRefBody {
    pub cmd: Command,
    pub session: String,
}

/// Body of `sessions.list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListBody {
    pub cmd: Command,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_setup_body_wire_shape() {
        let mut proxy = ProxySettings::default();
        proxy.premium_proxy = true;
        let body = SessionSetupBody {
            cmd: Command::SessionsCreate,
            session: None,
            session_ttl: 180,
            headless: "true".to_string(),
            geoip: "false".to_string(),
            proxy,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"cmd": "sessions.create", "session_ttl": 180, "headless": "true", "geoip": "false", "premiumProxy": true})
        );
    }

    #[test]
    fn test_list_body_user_id() {
        let body = SessionListBody {
            cmd: Command::SessionsList,
            user_id: Some(7),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"cmd": "sessions.list", "userId": 7}));
    }
}
