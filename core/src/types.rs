//! Entities exchanged with the management API.
//!
//! # Design
//! These mirror the server's JSON shapes field for field. Response types use
//! `#[serde(default)]` because the server leaves out empty fields; a body
//! that is not JSON at all still fails to decode. None of these values are
//! cached or mutated by the client: callers get fresh copies per response and
//! send back whatever they pass in.

use serde::{Deserialize, Serialize};

/// A custom access-control role and its permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    pub org_id: i64,
    pub version: i64,
    /// Assigned by the server on creation; omitted on the wire while empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    #[serde(rename = "permission")]
    pub action: String,
    pub scope: String,
}

/// Grant of a role to a built-in role such as `Viewer` or `Editor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltInRole {
    #[serde(rename = "builtInRole")]
    pub builtin_role: String,
    #[serde(rename = "roleUid")]
    pub role_uid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub member_count: i64,
    pub permission: i64,
}

/// One page of a team search. The client never fetches further pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchTeam {
    pub total_count: i64,
    pub teams: Vec<Team>,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamMember {
    pub org_id: i64,
    pub team_id: i64,
    #[serde(alias = "userID")]
    pub user_id: i64,
    #[serde(rename = "auth_module")]
    pub auth_module: String,
    pub email: String,
    pub login: String,
    pub avatar_url: String,
    pub labels: Vec<String>,
    pub permission: i64,
}

/// Team or user preferences. Updates replace all three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: String,
    #[serde(rename = "homeDashboardId", alias = "homeDashboardID")]
    pub home_dashboard_id: i64,
    pub timezone: String,
}

/// A user account.
///
/// The server reports the server-admin flag as `isAdmin` from `/api/users`
/// and as `isGrafanaAdmin` from the single-user endpoints. Both decode into
/// `is_admin`; encoding always writes `isGrafanaAdmin`, which is what the
/// update endpoint reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub login: String,
    pub org_id: i64,
    pub theme: String,
    #[serde(rename = "isGrafanaAdmin", alias = "isAdmin")]
    pub is_admin: bool,
    pub is_disabled: bool,
}

/// Payload for creating a user through the admin API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    pub name: String,
    pub password: String,
    #[serde(rename = "OrgId", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemberInput {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoleAssignment<'a> {
    pub role_uid: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamCreated {
    pub team_id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserCreated {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_omits_empty_uid_and_permissions() {
        let role = Role {
            org_id: 1,
            version: 1,
            name: "test:policy".to_string(),
            description: "desc".to_string(),
            ..Role::default()
        };
        let json = serde_json::to_value(&role).unwrap();
        assert!(json.get("uid").is_none());
        assert!(json.get("permissions").is_none());
        assert_eq!(json["orgId"], 1);
        assert_eq!(json["name"], "test:policy");
    }

    #[test]
    fn permission_action_uses_permission_key() {
        let json = serde_json::to_value(Permission {
            action: "users:read".to_string(),
            scope: "global.users:*".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"permission": "users:read", "scope": "global.users:*"}));
    }

    #[test]
    fn role_ignores_unknown_fields() {
        let role: Role = serde_json::from_str(
            r#"{"orgId":1,"uid":"abc","name":"n","version":2,"description":"d",
                "permissions":[{"id":6,"permission":"a","scope":"s","created":"2021-02-22T16:16:05Z"}],
                "created":"2021-02-22T16:16:05Z"}"#,
        )
        .unwrap();
        assert_eq!(role.uid, "abc");
        assert_eq!(role.version, 2);
        assert_eq!(role.permissions[0].action, "a");
    }

    #[test]
    fn builtin_role_wire_names() {
        let grant = BuiltInRole {
            builtin_role: "Viewer".to_string(),
            role_uid: "vc3SCSsGz".to_string(),
        };
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json, serde_json::json!({"builtInRole": "Viewer", "roleUid": "vc3SCSsGz"}));
    }

    #[test]
    fn user_admin_flag_accepts_both_names() {
        let listed: User = serde_json::from_str(r#"{"id":1,"isAdmin":true}"#).unwrap();
        let single: User = serde_json::from_str(r#"{"id":2,"isGrafanaAdmin":true}"#).unwrap();
        assert!(listed.is_admin);
        assert!(single.is_admin);
    }

    #[test]
    fn user_encodes_grafana_admin_name() {
        let json = serde_json::to_value(User {
            id: 4,
            is_admin: true,
            ..User::default()
        })
        .unwrap();
        assert_eq!(json["isGrafanaAdmin"], true);
        assert!(json.get("isAdmin").is_none());
    }

    #[test]
    fn preferences_accept_upper_case_id() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"theme":"dark","homeDashboardID":7,"timezone":"utc"}"#).unwrap();
        assert_eq!(prefs.home_dashboard_id, 7);
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["homeDashboardId"], 7);
    }

    #[test]
    fn team_member_reads_auth_module() {
        let member: TeamMember = serde_json::from_str(
            r#"{"orgId":1,"teamId":1,"userID":3,"auth_module":"oauth_github","login":"user1","labels":[]}"#,
        )
        .unwrap();
        assert_eq!(member.user_id, 3);
        assert_eq!(member.auth_module, "oauth_github");
    }

    #[test]
    fn new_user_omits_missing_org() {
        let json = serde_json::to_value(NewUser {
            email: "a@b".to_string(),
            login: "a".to_string(),
            name: "A".to_string(),
            password: "pw".to_string(),
            org_id: None,
        })
        .unwrap();
        assert!(json.get("OrgId").is_none());
    }
}
