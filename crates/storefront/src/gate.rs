//! Path-prefix to role table deciding whether a page may be shown.

use serde::Serialize;
use shared::model::Role;
use utoipa::ToSchema;

pub const SIGN_IN_PATH: &str = "/auth/signin";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

const PUBLIC_PREFIXES: &[&str] = &["/shop", "/vendors", "/auth", "/api/auth"];

/// `None` means any signed-in user.
const GUARDED_PREFIXES: &[(&str, Option<Role>)] = &[
    ("/admin", Some(Role::Admin)),
    ("/vendor/dashboard", Some(Role::Vendor)),
    ("/account", None),
    ("/checkout", None),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "action", content = "location", rename_all = "snake_case")]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

pub struct RouteGate;

impl RouteGate {
    pub fn decide(path: &str, role: Option<Role>) -> GateDecision {
        let path = normalize(path);

        if path == "/" {
            return match role {
                Some(role) => GateDecision::Redirect(Self::home_for(role).to_string()),
                None => GateDecision::Allow,
            };
        }

        if PUBLIC_PREFIXES.iter().any(|prefix| under(path, prefix)) {
            return GateDecision::Allow;
        }

        let Some((_, required)) = GUARDED_PREFIXES
            .iter()
            .find(|(prefix, _)| under(path, prefix))
        else {
            return GateDecision::Allow;
        };

        match (role, required) {
            (None, _) => GateDecision::Redirect(SIGN_IN_PATH.to_string()),
            (Some(_), None) => GateDecision::Allow,
            (Some(role), Some(required)) if role == *required => GateDecision::Allow,
            (Some(_), Some(_)) => GateDecision::Redirect(UNAUTHORIZED_PATH.to_string()),
        }
    }

    pub fn home_for(role: Role) -> &'static str {
        match role {
            Role::Admin => "/admin",
            Role::Vendor => "/vendor/dashboard",
            Role::User => "/account",
        }
    }
}

/// Drops the query string and any trailing slash.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// `prefix` matched on a segment boundary: `/admin` covers `/admin/users`
/// but not `/administrator`.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(to: &str) -> GateDecision {
        GateDecision::Redirect(to.to_string())
    }

    #[test]
    fn root_sends_signed_in_users_home() {
        assert_eq!(RouteGate::decide("/", None), GateDecision::Allow);
        assert_eq!(RouteGate::decide("/", Some(Role::Admin)), redirect("/admin"));
        assert_eq!(
            RouteGate::decide("/", Some(Role::Vendor)),
            redirect("/vendor/dashboard")
        );
        assert_eq!(RouteGate::decide("/", Some(Role::User)), redirect("/account"));
    }

    #[test]
    fn public_pages_are_open() {
        for path in ["/shop", "/shop/fruits", "/vendors/123", "/auth/signin", "/api/auth/login"] {
            assert_eq!(RouteGate::decide(path, None), GateDecision::Allow, "{path}");
        }
    }

    #[test]
    fn guarded_pages_require_sign_in() {
        for path in ["/admin", "/vendor/dashboard/orders", "/account", "/checkout"] {
            assert_eq!(RouteGate::decide(path, None), redirect(SIGN_IN_PATH), "{path}");
        }
    }

    #[test]
    fn role_mismatch_is_unauthorized() {
        assert_eq!(
            RouteGate::decide("/admin/vendors", Some(Role::Vendor)),
            redirect(UNAUTHORIZED_PATH)
        );
        assert_eq!(
            RouteGate::decide("/vendor/dashboard", Some(Role::User)),
            redirect(UNAUTHORIZED_PATH)
        );
        assert_eq!(
            RouteGate::decide("/vendor/dashboard", Some(Role::Admin)),
            redirect(UNAUTHORIZED_PATH)
        );
        assert_eq!(
            RouteGate::decide("/admin", Some(Role::Admin)),
            GateDecision::Allow
        );
    }

    #[test]
    fn any_role_may_use_account_and_checkout() {
        for role in [Role::User, Role::Vendor, Role::Admin] {
            assert_eq!(RouteGate::decide("/account/orders", Some(role)), GateDecision::Allow);
            assert_eq!(RouteGate::decide("/checkout", Some(role)), GateDecision::Allow);
        }
    }

    #[test]
    fn prefixes_match_on_segment_boundaries() {
        assert_eq!(RouteGate::decide("/administrator", None), GateDecision::Allow);
        assert_eq!(RouteGate::decide("/accounting", None), GateDecision::Allow);
        assert_eq!(RouteGate::decide("/admin/", None), redirect(SIGN_IN_PATH));
        assert_eq!(
            RouteGate::decide("/admin?tab=vendors", None),
            redirect(SIGN_IN_PATH)
        );
    }

    #[test]
    fn unknown_pages_are_allowed() {
        assert_eq!(RouteGate::decide("/about", None), GateDecision::Allow);
    }
}
