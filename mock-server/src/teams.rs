//! Team CRUD, search, membership and preferences.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::{MemberInput, Message, Preferences, SearchTeam, Team, TeamInput, TeamMember};
use crate::{ok, reject, Db, Rejection, TeamRecord, ORG_ID};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    query: String,
    page: Option<usize>,
    perpage: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamCreated {
    message: String,
    team_id: i64,
}

fn team_view(team: &TeamRecord) -> Team {
    Team {
        id: team.id,
        org_id: ORG_ID,
        name: team.name.clone(),
        email: team.email.clone(),
        avatar_url: format!("/avatar/team-{}", team.id),
        member_count: team.members.len() as i64,
        permission: 0,
    }
}

fn team_not_found() -> Rejection {
    reject(StatusCode::NOT_FOUND, "Team not found")
}

pub(crate) async fn search_teams(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<SearchTeam> {
    let store = db.read().await;
    let needle = params.query.to_lowercase();
    let matches: Vec<Team> = store
        .teams
        .values()
        .filter(|team| team.name.to_lowercase().contains(&needle))
        .map(team_view)
        .collect();

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.perpage.unwrap_or(1000).max(1);
    let total_count = matches.len();
    let teams = matches
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Json(SearchTeam {
        total_count,
        teams,
        page,
        per_page,
    })
}

pub(crate) async fn create_team(
    State(db): State<Db>,
    Json(input): Json<TeamInput>,
) -> Result<Json<TeamCreated>, Rejection> {
    let mut store = db.write().await;
    if store.teams.values().any(|team| team.name == input.name) {
        return Err(reject(StatusCode::CONFLICT, "Team name taken"));
    }
    let id = store.allocate_team_id();
    store.teams.insert(
        id,
        TeamRecord {
            id,
            name: input.name,
            email: input.email,
            members: Vec::new(),
            preferences: Preferences::default(),
        },
    );
    tracing::info!(team_id = id, "team created");
    Ok(Json(TeamCreated {
        message: "Team created".to_string(),
        team_id: id,
    }))
}

pub(crate) async fn get_team(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Team>, Rejection> {
    let store = db.read().await;
    store.teams.get(&id).map(|team| Json(team_view(team))).ok_or_else(team_not_found)
}

pub(crate) async fn update_team(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TeamInput>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let team = store.teams.get_mut(&id).ok_or_else(team_not_found)?;
    team.name = input.name;
    team.email = input.email;
    Ok(ok("Team updated"))
}

pub(crate) async fn delete_team(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    store.teams.remove(&id).ok_or_else(team_not_found)?;
    store.team_roles.remove(&id);
    Ok(ok("Team deleted"))
}

pub(crate) async fn list_members(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<TeamMember>>, Rejection> {
    let store = db.read().await;
    let team = store.teams.get(&id).ok_or_else(team_not_found)?;
    let members = team
        .members
        .iter()
        .filter_map(|user_id| store.users.get(user_id))
        .map(|user| TeamMember {
            org_id: ORG_ID,
            team_id: id,
            user_id: user.id,
            auth_module: String::new(),
            email: user.email.clone(),
            login: user.login.clone(),
            avatar_url: format!("/avatar/user-{}", user.id),
            labels: Vec::new(),
            permission: 0,
        })
        .collect();
    Ok(Json(members))
}

pub(crate) async fn add_member(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<MemberInput>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    if !store.users.contains_key(&input.user_id) {
        return Err(reject(StatusCode::NOT_FOUND, "User not found"));
    }
    let team = store.teams.get_mut(&id).ok_or_else(team_not_found)?;
    if team.members.contains(&input.user_id) {
        return Err(reject(StatusCode::BAD_REQUEST, "User is already added to this team"));
    }
    team.members.push(input.user_id);
    Ok(ok("Member added to Team"))
}

pub(crate) async fn remove_member(
    State(db): State<Db>,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let team = store.teams.get_mut(&id).ok_or_else(team_not_found)?;
    let before = team.members.len();
    team.members.retain(|member| *member != user_id);
    if team.members.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Team member not found"));
    }
    Ok(ok("Team Member removed"))
}

pub(crate) async fn get_preferences(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Preferences>, Rejection> {
    let store = db.read().await;
    store
        .teams
        .get(&id)
        .map(|team| Json(team.preferences.clone()))
        .ok_or_else(team_not_found)
}

pub(crate) async fn update_preferences(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let team = store.teams.get_mut(&id).ok_or_else(team_not_found)?;
    team.preferences = preferences;
    Ok(ok("Preferences updated"))
}
