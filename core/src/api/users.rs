//! Users, the signed-in user's preferences and user role assignments.

use super::segment;
use crate::client::{GrafanaClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::{NewUser, Preferences, Role, RoleAssignment, User, UserCreated};

const USERS: &str = "/api/users";
const USER_PREFERENCES: &str = "/api/user/preferences";

fn user_roles_path(id: i64) -> String {
    format!("/api/access-control/users/{id}/roles")
}

impl<T: Transport> GrafanaClient<T> {
    /// All users. The admin flag arrives as `isAdmin` here.
    pub fn users(&self) -> Result<Vec<User>> {
        self.request(HttpMethod::Get, USERS, &[], NO_BODY)
    }

    /// A single user. The admin flag arrives as `isGrafanaAdmin` here.
    pub fn user(&self, id: i64) -> Result<User> {
        self.request(HttpMethod::Get, &format!("{USERS}/{id}"), &[], NO_BODY)
    }

    /// Look a user up by exact email (or login); matching rules are the
    /// server's.
    pub fn user_by_email(&self, email: &str) -> Result<User> {
        self.request(
            HttpMethod::Get,
            &format!("{USERS}/lookup"),
            &[("loginOrEmail", email)],
            NO_BODY,
        )
    }

    /// Write `user` back as-is to `/api/users/{user.id}`.
    pub fn update_user(&self, user: &User) -> Result<()> {
        self.request_discard(HttpMethod::Put, &format!("{USERS}/{}", user.id), &[], Some(user))
    }

    /// Create a user through the admin API and return its ID.
    pub fn create_user(&self, user: &NewUser) -> Result<i64> {
        let created: UserCreated = self.request(HttpMethod::Post, "/api/admin/users", &[], Some(user))?;
        Ok(created.id)
    }

    pub fn delete_user(&self, id: i64) -> Result<()> {
        self.request_discard(HttpMethod::Delete, &format!("/api/admin/users/{id}"), &[], NO_BODY)
    }

    /// Preferences of the user the credentials belong to.
    pub fn user_preferences(&self) -> Result<Preferences> {
        self.request(HttpMethod::Get, USER_PREFERENCES, &[], NO_BODY)
    }

    /// Replace all of the signed-in user's preferences.
    pub fn update_user_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.request_discard(HttpMethod::Put, USER_PREFERENCES, &[], Some(preferences))
    }

    /// Assign a role to a user. The server answers 201 on success.
    pub fn new_user_role(&self, id: i64, role_uid: &str) -> Result<()> {
        self.request_discard(
            HttpMethod::Post,
            &user_roles_path(id),
            &[],
            Some(&RoleAssignment { role_uid }),
        )
    }

    pub fn user_roles(&self, id: i64) -> Result<Vec<Role>> {
        self.request(HttpMethod::Get, &user_roles_path(id), &[], NO_BODY)
    }

    pub fn delete_user_role(&self, id: i64, role_uid: &str) -> Result<()> {
        self.request_discard(
            HttpMethod::Delete,
            &format!("{}/{}", user_roles_path(id), segment(role_uid)?),
            &[],
            NO_BODY,
        )
    }
}
