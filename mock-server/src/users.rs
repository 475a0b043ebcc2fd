//! Users, admin user management and the signed-in user's preferences.
//!
//! `/api/users` reports the admin flag as `isAdmin`; every single-user
//! endpoint reports and accepts `isGrafanaAdmin`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::{Message, NewUser, Preferences, User, UserDetail, UserListItem, UserUpdate};
use crate::{ok, reject, Db, Rejection};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupParams {
    login_or_email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserCreated {
    id: i64,
    message: String,
}

fn user_not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "User not found")
}

pub(crate) async fn list_users(State(db): State<Db>) -> Json<Vec<UserListItem>> {
    let store = db.read().await;
    Json(store.users.values().map(UserListItem::from).collect())
}

pub(crate) async fn get_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<UserDetail>, Rejection> {
    let store = db.read().await;
    store
        .users
        .get(&id)
        .map(|user| Json(UserDetail::from(user)))
        .ok_or_else(user_not_found)
}

pub(crate) async fn lookup_user(
    State(db): State<Db>,
    Query(params): Query<LookupParams>,
) -> Result<Json<UserDetail>, Rejection> {
    let store = db.read().await;
    store
        .users
        .values()
        .find(|user| user.email == params.login_or_email || user.login == params.login_or_email)
        .map(|user| Json(UserDetail::from(user)))
        .ok_or_else(user_not_found)
}

pub(crate) async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UserUpdate>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(user_not_found)?;
    user.email = input.email;
    user.name = input.name;
    user.login = input.login;
    user.theme = input.theme;
    user.is_admin = input.is_grafana_admin;
    Ok(ok("User updated"))
}

pub(crate) async fn create_user(
    State(db): State<Db>,
    Json(input): Json<NewUser>,
) -> Result<Json<UserCreated>, Rejection> {
    let mut store = db.write().await;
    let login = if input.login.is_empty() {
        input.email.clone()
    } else {
        input.login
    };
    if store
        .users
        .values()
        .any(|user| user.email == input.email || user.login == login)
    {
        return Err(reject(StatusCode::PRECONDITION_FAILED, "User with same email or login exists"));
    }
    if input.password.is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Password is required"));
    }
    let id = store.allocate_user_id();
    store.users.insert(
        id,
        User {
            id,
            email: input.email,
            name: input.name,
            login,
            theme: String::new(),
            is_admin: false,
        },
    );
    tracing::info!(user_id = id, "user created");
    Ok(Json(UserCreated {
        id,
        message: "User created".to_string(),
    }))
}

pub(crate) async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    store.users.remove(&id).ok_or_else(user_not_found)?;
    store.user_roles.remove(&id);
    for team in store.teams.values_mut() {
        team.members.retain(|member| *member != id);
    }
    Ok(ok("User deleted"))
}

pub(crate) async fn get_preferences(State(db): State<Db>) -> Json<Preferences> {
    let store = db.read().await;
    Json(store.user_preferences.clone())
}

pub(crate) async fn update_preferences(
    State(db): State<Db>,
    Json(preferences): Json<Preferences>,
) -> Json<Message> {
    let mut store = db.write().await;
    store.user_preferences = preferences;
    ok("Preferences updated")
}
