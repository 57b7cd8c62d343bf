//! Actor context collection
//!
//! Captures who made a change and where it came from, reading an explicit
//! [`RequestScope`] passed in at call time. Each sub-value is resolved
//! independently; an absent source yields `None`, never an error.

use crate::backend::RequestScope;
use crate::models::actor::ActorContext;

/// Service collecting the ambient actor/origin context of a change
pub struct ActorContextCollector<'a, S: RequestScope> {
    scope: &'a S,
}

impl<'a, S: RequestScope> ActorContextCollector<'a, S> {
    /// Create a new collector over a request scope
    pub fn new(scope: &'a S) -> Self {
        Self { scope }
    }

    /// Collect the actor context
    ///
    /// Pure read of the scope, no mutation. Missing request, missing actor
    /// and missing access-zone configuration are normal states.
    pub fn collect(&self) -> ActorContext {
        let request = self.scope.current_request();
        let (client_ip, access_zone) = match &request {
            Some(request) => (request.client_ip, self.scope.access_zone(request)),
            None => (None, None),
        };

        let (user_id, username, user_type_name) = match self.scope.current_actor() {
            Some(actor) => (Some(actor.id), Some(actor.username), Some(actor.type_name)),
            None => (None, None, None),
        };

        ActorContext {
            user_id,
            username,
            client_ip,
            user_type_name,
            access_zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Actor, RequestInfo};
    use std::net::IpAddr;

    /// Scope stub with everything configurable
    struct StubScope {
        request: Option<RequestInfo>,
        zone: Option<String>,
        actor: Option<Actor>,
    }

    impl RequestScope for StubScope {
        fn current_request(&self) -> Option<RequestInfo> {
            self.request.clone()
        }

        fn access_zone(&self, _request: &RequestInfo) -> Option<String> {
            self.zone.clone()
        }

        fn current_actor(&self) -> Option<Actor> {
            self.actor.clone()
        }
    }

    #[test]
    fn test_full_context() {
        let ip: IpAddr = "10.1.2.3".parse().unwrap();
        let scope = StubScope {
            request: Some(RequestInfo {
                client_ip: Some(ip),
            }),
            zone: Some("admin".to_string()),
            actor: Some(Actor {
                id: "17".to_string(),
                username: "mlopez".to_string(),
                type_name: "app.access.User".to_string(),
            }),
        };

        let ctx = ActorContextCollector::new(&scope).collect();
        assert_eq!(ctx.user_id.as_deref(), Some("17"));
        assert_eq!(ctx.username.as_deref(), Some("mlopez"));
        assert_eq!(ctx.client_ip, Some(ip));
        assert_eq!(ctx.user_type_name.as_deref(), Some("app.access.User"));
        assert_eq!(ctx.access_zone.as_deref(), Some("admin"));
    }

    #[test]
    fn test_no_request_no_actor() {
        let scope = StubScope {
            request: None,
            zone: Some("admin".to_string()),
            actor: None,
        };

        let ctx = ActorContextCollector::new(&scope).collect();
        assert!(ctx.is_anonymous());
    }

    #[test]
    fn test_actor_without_request() {
        // A change made from a background job: actor known, no request.
        let scope = StubScope {
            request: None,
            zone: None,
            actor: Some(Actor {
                id: "17".to_string(),
                username: "mlopez".to_string(),
                type_name: "app.access.User".to_string(),
            }),
        };

        let ctx = ActorContextCollector::new(&scope).collect();
        assert_eq!(ctx.username.as_deref(), Some("mlopez"));
        assert!(ctx.client_ip.is_none());
        assert!(ctx.access_zone.is_none());
    }

    #[test]
    fn test_request_without_zone_match() {
        let scope = StubScope {
            request: Some(RequestInfo {
                client_ip: Some("192.0.2.9".parse().unwrap()),
            }),
            zone: None,
            actor: None,
        };

        let ctx = ActorContextCollector::new(&scope).collect();
        assert!(ctx.client_ip.is_some());
        assert!(ctx.access_zone.is_none());
        assert!(ctx.user_id.is_none());
    }
}
