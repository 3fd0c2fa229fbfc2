//! # SQL Tool Server Library
//!
//! Safe, read-only access to a MySQL database for tool-calling clients.
//!
//! # Architecture
//!
//! Components, leaves first:
//!
//! - [`db`] - The [`db::Backend`] seam and its MySQL implementation
//! - [`schema`] - Table and column introspection
//! - [`guard`] - Read-only statement whitelist
//! - [`executor`] - Guarded execution with JSON value normalization
//! - [`builder`] - `SELECT` assembly from structured parameters
//! - [`synth`] - Keyword-driven plain-language to SQL heuristics
//! - [`relations`] - Foreign-key edge extraction
//! - [`lint`] - Static suggestions for a SQL string
//! - [`tools`] - Named operations with argument decoding and envelopes
//! - [`server`] - Line-delimited JSON-RPC loop
//!
//! Ambient modules: [`config`], [`logging`], [`error`], [`output`], [`cli`]
//! and [`app`].

pub mod app;
pub mod builder;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod executor;
pub mod guard;
pub mod lint;
pub mod logging;
pub mod output;
pub mod relations;
pub mod schema;
pub mod server;
pub mod synth;
pub mod tools;
