//! TabVault — local persistence daemon for a browser extension.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod auth;
pub mod database;
pub mod http_handler;
pub mod http_server;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
