//! Typed blocking client for the access-control, team and user management
//! API.
//!
//! # Overview
//! Every operation is one HTTP round trip: build the request, execute it
//! through a `Transport`, and decode the JSON answer into a typed value or
//! an `ApiError`. No retries, caching or pagination happen here.
//!
//! # Design
//! - `ClientConfig` (base URL, credentials, org, timeout) is set once and
//!   never mutated.
//! - `Dispatcher` is the shared build/parse path and does no I/O, so callers
//!   can also run the round trip themselves.
//! - `GrafanaClient` pairs a dispatcher with a `Transport` (`UreqTransport` by
//!   default); the resource methods live in `api` as thin wrappers over
//!   `GrafanaClient::request`.
//!
//! ```no_run
//! use gapi_core::{ClientConfig, GrafanaClient};
//!
//! # fn main() -> gapi_core::Result<()> {
//! let config = ClientConfig::new("http://localhost:3000")?.with_basic_auth("admin", "admin");
//! let client = GrafanaClient::new(config);
//! let found = client.search_teams("ops")?;
//! println!("{} teams", found.total_count);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::DEFAULT_TEAM_PAGE_SIZE;
pub use client::{GrafanaClient, NO_BODY};
pub use config::{ClientConfig, Credentials};
pub use dispatch::Dispatcher;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{BuiltInRole, NewUser, Permission, Preferences, Role, SearchTeam, Team, TeamMember, User};
