//! Resource accessors.
//!
//! Each resource is a thin facade over the shared dispatcher. The client
//! creates them on first access and keeps them for its whole lifetime.

mod auth;
mod stats;
mod users;

use std::fmt;
use std::str::FromStr;

pub use auth::Auth;
pub use stats::Stats;
pub use users::Users;

use crate::error::ClientError;

/// Names accepted by [`Client::get_resource`](crate::Client::get_resource)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceName {
    Auth,
    Stats,
    Users,
}

impl ResourceName {
    pub const ALL: [ResourceName; 3] = [ResourceName::Auth, ResourceName::Stats, ResourceName::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceName::Auth => "auth",
            ResourceName::Stats => "stats",
            ResourceName::Users => "users",
        }
    }
}

impl FromStr for ResourceName {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ClientError::InvalidResourceName(s.to_string()))
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved resource accessor
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Auth(&'a Auth),
    Stats(&'a Stats),
    Users(&'a Users),
}

impl<'a> Resource<'a> {
    pub fn name(&self) -> ResourceName {
        match self {
            Resource::Auth(_) => ResourceName::Auth,
            Resource::Stats(_) => ResourceName::Stats,
            Resource::Users(_) => ResourceName::Users,
        }
    }

    pub fn as_auth(&self) -> Option<&'a Auth> {
        match *self {
            Resource::Auth(auth) => Some(auth),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&'a Stats> {
        match *self {
            Resource::Stats(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn as_users(&self) -> Option<&'a Users> {
        match *self {
            Resource::Users(users) => Some(users),
            _ => None,
        }
    }
}
