//! Built-in role grants: `/api/access-control/builtin-roles`.
//!
//! Create and delete both send the (built-in role, role UID) pair as the
//! body; nothing is carried in the path.

use std::collections::BTreeMap;

use crate::client::{GrafanaClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::{BuiltInRole, Role};

const BUILTIN_ROLES: &str = "/api/access-control/builtin-roles";

impl<T: Transport> GrafanaClient<T> {
    /// All grants, keyed by built-in role name (`Viewer`, `Editor`, ...).
    pub fn builtin_roles(&self) -> Result<BTreeMap<String, Vec<Role>>> {
        self.request(HttpMethod::Get, BUILTIN_ROLES, &[], NO_BODY)
    }

    pub fn new_builtin_role(&self, grant: &BuiltInRole) -> Result<BuiltInRole> {
        self.request(HttpMethod::Post, BUILTIN_ROLES, &[], Some(grant))
    }

    pub fn delete_builtin_role(&self, grant: &BuiltInRole) -> Result<()> {
        self.request_discard(HttpMethod::Delete, BUILTIN_ROLES, &[], Some(grant))
    }
}
