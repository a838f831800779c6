// TabVault cross-cutting services
// Passes that span entity kinds: fan-out search and the default-library
// rename heuristic.

pub mod library_namer;
pub mod search_engine;
