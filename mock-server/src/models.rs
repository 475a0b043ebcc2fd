//! Wire types served by the mock. Defined independently of the client crate
//! so the integration tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    pub org_id: i64,
    pub version: i64,
    pub uid: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Permission {
    pub permission: String,
    pub scope: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuiltInRole {
    #[serde(rename = "builtInRole")]
    pub builtin_role: String,
    #[serde(rename = "roleUid")]
    pub role_uid: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub member_count: i64,
    pub permission: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTeam {
    pub total_count: usize,
    pub teams: Vec<Team>,
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Deserialize)]
pub struct TeamInput {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub user_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub org_id: i64,
    pub team_id: i64,
    pub user_id: i64,
    #[serde(rename = "auth_module")]
    pub auth_module: String,
    pub email: String,
    pub login: String,
    pub avatar_url: String,
    pub labels: Vec<String>,
    pub permission: i64,
}

/// Stored and served as-is. `PUT` must carry all three fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: String,
    pub home_dashboard_id: i64,
    pub timezone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub role_uid: String,
}

/// Server-side user record.
#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub login: String,
    pub theme: String,
    pub is_admin: bool,
}

/// Shape of `/api/users` entries: the admin flag is `isAdmin`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub login: String,
    pub is_admin: bool,
}

/// Shape of single-user endpoints: the admin flag is `isGrafanaAdmin`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub login: String,
    pub theme: String,
    pub org_id: i64,
    pub is_grafana_admin: bool,
    pub is_disabled: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub is_grafana_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&User> for UserListItem {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            login: user.login.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            login: user.login.clone(),
            theme: user.theme.clone(),
            org_id: crate::ORG_ID,
            is_grafana_admin: user.is_admin,
            is_disabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: 1,
            email: "admin@localhost".to_string(),
            name: "Admin".to_string(),
            login: "admin".to_string(),
            theme: String::new(),
            is_admin: true,
        }
    }

    #[test]
    fn list_item_uses_is_admin() {
        let json = serde_json::to_value(UserListItem::from(&admin())).unwrap();
        assert_eq!(json["isAdmin"], true);
        assert!(json.get("isGrafanaAdmin").is_none());
    }

    #[test]
    fn detail_uses_is_grafana_admin() {
        let json = serde_json::to_value(UserDetail::from(&admin())).unwrap();
        assert_eq!(json["isGrafanaAdmin"], true);
        assert!(json.get("isAdmin").is_none());
        assert_eq!(json["orgId"], 1);
    }

    #[test]
    fn preferences_require_all_fields() {
        let result: Result<Preferences, _> = serde_json::from_str(r#"{"theme":"dark"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn role_accepts_missing_uid() {
        let role: Role = serde_json::from_str(r#"{"name":"custom:reader","orgId":1}"#).unwrap();
        assert!(role.uid.is_empty());
        assert!(role.permissions.is_empty());
    }
}
