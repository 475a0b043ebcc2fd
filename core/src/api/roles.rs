//! Custom access-control roles: `/api/access-control/roles`.

use super::segment;
use crate::client::{GrafanaClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::Role;

const ROLES: &str = "/api/access-control/roles";

fn role_path(uid: &str) -> Result<String> {
    Ok(format!("{ROLES}/{}", segment(uid)?))
}

impl<T: Transport> GrafanaClient<T> {
    pub fn list_roles(&self) -> Result<Vec<Role>> {
        self.request(HttpMethod::Get, ROLES, &[], NO_BODY)
    }

    /// Fetch a role with its permissions.
    pub fn get_role(&self, uid: &str) -> Result<Role> {
        self.request(HttpMethod::Get, &role_path(uid)?, &[], NO_BODY)
    }

    /// Create a role. The returned copy carries the server-assigned UID and
    /// version.
    pub fn new_role(&self, role: &Role) -> Result<Role> {
        self.request(HttpMethod::Post, ROLES, &[], Some(role))
    }

    /// Replace the role identified by `role.uid` with `role`.
    pub fn update_role(&self, role: &Role) -> Result<()> {
        self.request_discard(HttpMethod::Put, &role_path(&role.uid)?, &[], Some(role))
    }

    /// Delete a role. Whether an unknown UID is an error is up to the server.
    pub fn delete_role(&self, uid: &str) -> Result<()> {
        self.request_discard(HttpMethod::Delete, &role_path(uid)?, &[], NO_BODY)
    }
}
