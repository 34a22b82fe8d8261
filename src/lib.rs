pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod notes;
pub mod optimizer;
pub mod scorer;
pub mod sizes;
// cmd and reports belong to the binary (main.rs).
