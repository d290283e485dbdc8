//! Client module.
//!
//! This module provides the [`Client`] type, its builder and the request
//! dispatcher shared with the resource accessors.

mod builder;
mod common;
mod dispatcher;

pub use builder::ClientBuilder;
pub use common::Client;

pub(crate) use dispatcher::Dispatcher;
