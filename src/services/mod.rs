//! GitHub API service implementations.
//!
//! Each service borrows the [`Transport`](crate::transport::Transport) and
//! maps its methods one-to-one onto REST endpoints. Responses are returned
//! as decoded JSON; list endpoints are fully paginated.

mod authorization;
mod issues;
mod organizations;
mod pull_requests;
mod repositories;
mod users;

pub use authorization::*;
pub use issues::*;
pub use organizations::*;
pub use pull_requests::*;
pub use repositories::*;
pub use users::*;
