//! Referral management: a bearer-authenticated REST service over SQLite and
//! the client-side store, hooks and CLI views that consume it.

pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod logging;
pub mod server;
pub mod store;
pub mod view;
