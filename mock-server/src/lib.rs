//! In-memory stand-in for the access-control, team and user management API.
//!
//! Serves every endpoint the client crate calls with Grafana-shaped JSON:
//! `{"message": ...}` acknowledgements, 201 on role assignment, 404 on
//! unknown ids. State lives in one `Store` behind a `RwLock` and is lost when
//! the router is dropped.

mod access;
pub mod models;
mod teams;
mod users;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};

use models::{Message, Preferences, Role, User};

/// Every record in the mock belongs to this organisation.
pub const ORG_ID: i64 = 1;

#[derive(Debug)]
pub struct Store {
    pub(crate) roles: BTreeMap<String, Role>,
    pub(crate) builtin_roles: BTreeMap<String, Vec<String>>,
    pub(crate) teams: BTreeMap<i64, TeamRecord>,
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) user_preferences: Preferences,
    pub(crate) team_roles: BTreeMap<i64, Vec<String>>,
    pub(crate) user_roles: BTreeMap<i64, Vec<String>>,
    next_team_id: i64,
    next_user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct TeamRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub members: Vec<i64>,
    pub preferences: Preferences,
}

impl Store {
    /// Empty store with the built-in `admin` user (id 1).
    pub fn new() -> Self {
        let admin = User {
            id: 1,
            email: "admin@localhost".to_string(),
            name: String::new(),
            login: "admin".to_string(),
            theme: String::new(),
            is_admin: true,
        };
        Self {
            roles: BTreeMap::new(),
            builtin_roles: BTreeMap::new(),
            teams: BTreeMap::new(),
            users: BTreeMap::from([(admin.id, admin)]),
            user_preferences: Preferences::default(),
            team_roles: BTreeMap::new(),
            user_roles: BTreeMap::new(),
            next_team_id: 1,
            next_user_id: 2,
        }
    }

    pub(crate) fn allocate_team_id(&mut self) -> i64 {
        let id = self.next_team_id;
        self.next_team_id += 1;
        id
    }

    pub(crate) fn allocate_user_id(&mut self) -> i64 {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error half of every handler result.
pub(crate) type Rejection = (StatusCode, Json<Message>);

pub(crate) fn reject(status: StatusCode, message: &str) -> Rejection {
    (status, Json(Message::new(message)))
}

pub(crate) fn ok(message: &str) -> Json<Message> {
    Json(Message::new(message))
}

pub fn app() -> Router {
    app_with_store(Store::new())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/access-control/roles", get(access::list_roles).post(access::create_role))
        .route(
            "/api/access-control/roles/{uid}",
            get(access::get_role).put(access::update_role).delete(access::delete_role),
        )
        .route(
            "/api/access-control/builtin-roles",
            get(access::list_builtin_roles)
                .post(access::add_builtin_role)
                .delete(access::remove_builtin_role),
        )
        .route(
            "/api/access-control/teams/{id}/roles",
            get(access::list_team_roles).post(access::add_team_role),
        )
        .route("/api/access-control/teams/{id}/roles/{uid}", delete(access::remove_team_role))
        .route(
            "/api/access-control/users/{id}/roles",
            get(access::list_user_roles).post(access::add_user_role),
        )
        .route("/api/access-control/users/{id}/roles/{uid}", delete(access::remove_user_role))
        .route("/api/teams", post(teams::create_team))
        .route("/api/teams/search", get(teams::search_teams))
        .route(
            "/api/teams/{id}",
            get(teams::get_team).put(teams::update_team).delete(teams::delete_team),
        )
        .route("/api/teams/{id}/members", get(teams::list_members).post(teams::add_member))
        .route("/api/teams/{id}/members/{user_id}", delete(teams::remove_member))
        .route(
            "/api/teams/{id}/preferences",
            get(teams::get_preferences).put(teams::update_preferences),
        )
        .route("/api/users", get(users::list_users))
        .route("/api/users/lookup", get(users::lookup_user))
        .route("/api/users/{id}", get(users::get_user).put(users::update_user))
        .route("/api/admin/users", post(users::create_user))
        .route("/api/admin/users/{id}", delete(users::delete_user))
        .route(
            "/api/user/preferences",
            get(users::get_preferences).put(users::update_preferences),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
