//! Roles, built-in role grants and team/user role assignments.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::{BuiltInRole, Message, Role, RoleAssignment};
use crate::{ok, reject, Db, Rejection, Store, ORG_ID};

pub(crate) async fn list_roles(State(db): State<Db>) -> Json<Vec<Role>> {
    let store = db.read().await;
    Json(store.roles.values().cloned().collect())
}

pub(crate) async fn get_role(
    State(db): State<Db>,
    Path(uid): Path<String>,
) -> Result<Json<Role>, Rejection> {
    let store = db.read().await;
    store
        .roles
        .get(&uid)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Role not found"))
}

pub(crate) async fn create_role(
    State(db): State<Db>,
    Json(mut role): Json<Role>,
) -> Result<Json<Role>, Rejection> {
    let mut store = db.write().await;
    if role.uid.is_empty() {
        role.uid = Uuid::new_v4().simple().to_string();
    } else if store.roles.contains_key(&role.uid) {
        return Err(reject(StatusCode::CONFLICT, "Role with the same uid already exists"));
    }
    role.org_id = ORG_ID;
    if role.version == 0 {
        role.version = 1;
    }
    tracing::info!(uid = %role.uid, name = %role.name, "role created");
    store.roles.insert(role.uid.clone(), role.clone());
    Ok(Json(role))
}

pub(crate) async fn update_role(
    State(db): State<Db>,
    Path(uid): Path<String>,
    Json(mut role): Json<Role>,
) -> Result<Json<Role>, Rejection> {
    let mut store = db.write().await;
    let existing = store
        .roles
        .get_mut(&uid)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Role not found"))?;
    role.uid = uid;
    role.org_id = ORG_ID;
    *existing = role.clone();
    Ok(Json(role))
}

pub(crate) async fn delete_role(
    State(db): State<Db>,
    Path(uid): Path<String>,
) -> Result<Json<Message>, Rejection> {
    let mut guard = db.write().await;
    let store = &mut *guard;
    if store.roles.remove(&uid).is_none() {
        return Err(reject(StatusCode::NOT_FOUND, "Role not found"));
    }
    for grants in store.builtin_roles.values_mut() {
        grants.retain(|granted| granted != &uid);
    }
    for assigned in store.team_roles.values_mut().chain(store.user_roles.values_mut()) {
        assigned.retain(|granted| granted != &uid);
    }
    Ok(ok("Role deleted"))
}

pub(crate) async fn list_builtin_roles(State(db): State<Db>) -> Json<BTreeMap<String, Vec<Role>>> {
    let store = db.read().await;
    Json(
        store
            .builtin_roles
            .iter()
            .map(|(builtin, uids)| (builtin.clone(), resolve_roles(&store, uids)))
            .collect(),
    )
}

pub(crate) async fn add_builtin_role(
    State(db): State<Db>,
    Json(grant): Json<BuiltInRole>,
) -> Result<Json<BuiltInRole>, Rejection> {
    let mut store = db.write().await;
    if !store.roles.contains_key(&grant.role_uid) {
        return Err(reject(StatusCode::NOT_FOUND, "Role not found"));
    }
    let grants = store.builtin_roles.entry(grant.builtin_role.clone()).or_default();
    if !grants.contains(&grant.role_uid) {
        grants.push(grant.role_uid.clone());
    }
    Ok(Json(grant))
}

pub(crate) async fn remove_builtin_role(
    State(db): State<Db>,
    Json(grant): Json<BuiltInRole>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let removed = store
        .builtin_roles
        .get_mut(&grant.builtin_role)
        .map(|grants| remove_uid(grants, &grant.role_uid))
        .unwrap_or(false);
    if !removed {
        return Err(reject(StatusCode::NOT_FOUND, "Built-in role grant not found"));
    }
    Ok(ok("Built-in role grant removed"))
}

pub(crate) async fn list_team_roles(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Role>>, Rejection> {
    let store = db.read().await;
    if !store.teams.contains_key(&id) {
        return Err(reject(StatusCode::NOT_FOUND, "Team not found"));
    }
    let uids = store.team_roles.get(&id).cloned().unwrap_or_default();
    Ok(Json(resolve_roles(&store, &uids)))
}

pub(crate) async fn add_team_role(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<RoleAssignment>,
) -> Result<(StatusCode, Json<Message>), Rejection> {
    let mut store = db.write().await;
    if !store.teams.contains_key(&id) {
        return Err(reject(StatusCode::NOT_FOUND, "Team not found"));
    }
    if !store.roles.contains_key(&input.role_uid) {
        return Err(reject(StatusCode::NOT_FOUND, "Role not found"));
    }
    assign(store.team_roles.entry(id).or_default(), input.role_uid);
    Ok((StatusCode::CREATED, ok("Role added to the team.")))
}

pub(crate) async fn remove_team_role(
    State(db): State<Db>,
    Path((id, uid)): Path<(i64, String)>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let removed = store
        .team_roles
        .get_mut(&id)
        .map(|assigned| remove_uid(assigned, &uid))
        .unwrap_or(false);
    if !removed {
        return Err(reject(StatusCode::NOT_FOUND, "Role is not assigned to the team"));
    }
    Ok(ok("Role removed from the team."))
}

pub(crate) async fn list_user_roles(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Role>>, Rejection> {
    let store = db.read().await;
    if !store.users.contains_key(&id) {
        return Err(reject(StatusCode::NOT_FOUND, "User not found"));
    }
    let uids = store.user_roles.get(&id).cloned().unwrap_or_default();
    Ok(Json(resolve_roles(&store, &uids)))
}

pub(crate) async fn add_user_role(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<RoleAssignment>,
) -> Result<(StatusCode, Json<Message>), Rejection> {
    let mut store = db.write().await;
    if !store.users.contains_key(&id) {
        return Err(reject(StatusCode::NOT_FOUND, "User not found"));
    }
    if !store.roles.contains_key(&input.role_uid) {
        return Err(reject(StatusCode::NOT_FOUND, "Role not found"));
    }
    assign(store.user_roles.entry(id).or_default(), input.role_uid);
    Ok((StatusCode::CREATED, ok("Role added to the user.")))
}

pub(crate) async fn remove_user_role(
    State(db): State<Db>,
    Path((id, uid)): Path<(i64, String)>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let removed = store
        .user_roles
        .get_mut(&id)
        .map(|assigned| remove_uid(assigned, &uid))
        .unwrap_or(false);
    if !removed {
        return Err(reject(StatusCode::NOT_FOUND, "Role is not assigned to the user"));
    }
    Ok(ok("Role removed from the user."))
}

fn resolve_roles(store: &Store, uids: &[String]) -> Vec<Role> {
    uids.iter().filter_map(|uid| store.roles.get(uid).cloned()).collect()
}

fn assign(assigned: &mut Vec<String>, uid: String) {
    if !assigned.contains(&uid) {
        assigned.push(uid);
    }
}

fn remove_uid(assigned: &mut Vec<String>, uid: &str) -> bool {
    let before = assigned.len();
    assigned.retain(|granted| granted != uid);
    assigned.len() != before
}
