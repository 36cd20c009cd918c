//! Graphics backend implementations
//!
//! Contains concrete implementations of the capability traits in
//! [`crate::render::api`]. The built-in headless backend performs no real
//! GPU work; backends for real graphics APIs live in the applications that
//! own the window and context.

pub mod headless;
