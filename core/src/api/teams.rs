//! Teams, team members, team preferences and team role assignments.

use super::segment;
use crate::client::{GrafanaClient, NO_BODY};
use crate::error::Result;
use crate::http::{HttpMethod, Transport};
use crate::types::{
    MemberInput, Preferences, Role, RoleAssignment, SearchTeam, Team, TeamCreated, TeamInput, TeamMember,
};

const TEAMS: &str = "/api/teams";

/// Page size used by `search_teams`.
pub const DEFAULT_TEAM_PAGE_SIZE: u32 = 1000;

fn team_path(id: i64) -> String {
    format!("{TEAMS}/{id}")
}

fn team_roles_path(id: i64) -> String {
    format!("/api/access-control/teams/{id}/roles")
}

impl<T: Transport> GrafanaClient<T> {
    /// First page of teams matching `query` (up to 1000 entries).
    pub fn search_teams(&self, query: &str) -> Result<SearchTeam> {
        self.search_teams_page(query, 1, DEFAULT_TEAM_PAGE_SIZE)
    }

    /// One page of a team search. Walking further pages is left to the
    /// caller, using `total_count` from the envelope.
    pub fn search_teams_page(&self, query: &str, page: u32, per_page: u32) -> Result<SearchTeam> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        self.request(
            HttpMethod::Get,
            &format!("{TEAMS}/search"),
            &[("query", query), ("page", page.as_str()), ("perpage", per_page.as_str())],
            NO_BODY,
        )
    }

    pub fn team(&self, id: i64) -> Result<Team> {
        self.request(HttpMethod::Get, &team_path(id), &[], NO_BODY)
    }

    /// Create a team and return its server-assigned ID.
    pub fn add_team(&self, name: &str, email: &str) -> Result<i64> {
        let created: TeamCreated =
            self.request(HttpMethod::Post, TEAMS, &[], Some(&TeamInput { name, email }))?;
        Ok(created.team_id)
    }

    pub fn update_team(&self, id: i64, name: &str, email: &str) -> Result<()> {
        self.request_discard(HttpMethod::Put, &team_path(id), &[], Some(&TeamInput { name, email }))
    }

    pub fn delete_team(&self, id: i64) -> Result<()> {
        self.request_discard(HttpMethod::Delete, &team_path(id), &[], NO_BODY)
    }

    pub fn team_members(&self, id: i64) -> Result<Vec<TeamMember>> {
        self.request(HttpMethod::Get, &format!("{TEAMS}/{id}/members"), &[], NO_BODY)
    }

    pub fn add_team_member(&self, id: i64, user_id: i64) -> Result<()> {
        self.request_discard(
            HttpMethod::Post,
            &format!("{TEAMS}/{id}/members"),
            &[],
            Some(&MemberInput { user_id }),
        )
    }

    pub fn remove_member_from_team(&self, id: i64, user_id: i64) -> Result<()> {
        self.request_discard(
            HttpMethod::Delete,
            &format!("{TEAMS}/{id}/members/{user_id}"),
            &[],
            NO_BODY,
        )
    }

    pub fn team_preferences(&self, id: i64) -> Result<Preferences> {
        self.request(HttpMethod::Get, &format!("{TEAMS}/{id}/preferences"), &[], NO_BODY)
    }

    /// Replace all of a team's preferences; there is no partial update.
    pub fn update_team_preferences(&self, id: i64, preferences: &Preferences) -> Result<()> {
        self.request_discard(
            HttpMethod::Put,
            &format!("{TEAMS}/{id}/preferences"),
            &[],
            Some(preferences),
        )
    }

    /// Assign a role to a team. The server answers 201 on success.
    pub fn new_team_role(&self, id: i64, role_uid: &str) -> Result<()> {
        self.request_discard(
            HttpMethod::Post,
            &team_roles_path(id),
            &[],
            Some(&RoleAssignment { role_uid }),
        )
    }

    /// Full roles assigned to a team.
    pub fn team_roles(&self, id: i64) -> Result<Vec<Role>> {
        self.request(HttpMethod::Get, &team_roles_path(id), &[], NO_BODY)
    }

    pub fn delete_team_role(&self, id: i64, role_uid: &str) -> Result<()> {
        self.request_discard(
            HttpMethod::Delete,
            &format!("{}/{}", team_roles_path(id), segment(role_uid)?),
            &[],
            NO_BODY,
        )
    }
}
