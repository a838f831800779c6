// TabVault shared type definitions
// Each submodule defines the persisted shape of one entity kind, plus the
// error taxonomy and search result type used across the daemon.

pub mod bookmark;
pub mod download;
pub mod errors;
pub mod history;
pub mod library;
pub mod search;
pub mod session;
pub mod tab;
