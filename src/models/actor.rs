//! Actor context captured alongside a change
//!
//! Describes who made a change and where it came from. Every field is
//! independently nullable: an unauthenticated actor or a change made outside
//! any request scope is a normal state, not an error.

use serde::Serialize;
use std::net::IpAddr;

/// Who and where a change originated
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorContext {
    /// Identifier of the authenticated actor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Username of the authenticated actor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Network address the change came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddr>,

    /// Type name of the actor entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type_name: Option<String>,

    /// Access-zone label of the request (e.g. firewall zone)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_zone: Option<String>,
}

impl ActorContext {
    /// Context with no actor and no request — the anonymous default
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// True if no sub-value was resolvable
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
            && self.username.is_none()
            && self.client_ip.is_none()
            && self.user_type_name.is_none()
            && self.access_zone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anonymous_context() {
        let ctx = ActorContext::anonymous();
        assert!(ctx.is_anonymous());
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let ctx = ActorContext::anonymous();
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({}));
    }

    #[test]
    fn test_populated_context_serialization() {
        let ctx = ActorContext {
            user_id: Some("17".to_string()),
            username: Some("mlopez".to_string()),
            client_ip: Some("10.1.2.3".parse().unwrap()),
            user_type_name: Some("app.access.User".to_string()),
            access_zone: Some("admin".to_string()),
        };
        assert!(!ctx.is_anonymous());
        assert_eq!(
            serde_json::to_value(&ctx).unwrap(),
            json!({
                "user_id": "17",
                "username": "mlopez",
                "client_ip": "10.1.2.3",
                "user_type_name": "app.access.User",
                "access_zone": "admin"
            })
        );
    }
}
