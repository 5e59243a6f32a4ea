//! HTTP API Layer
//!
//! Server-rendered todo lists: `GET /{list_id}` renders the list,
//! `POST /{list_id}` applies a form submission (create / toggle / delete).
//! Clients sending `Accept: application/json` get JSON instead of HTML.

pub mod error;
pub mod handler;
pub mod middleware;
pub mod render;
pub mod server;
pub mod state;
pub mod types;

pub use server::{router, HttpServer, HttpServerConfig, HttpServerHandle};
pub use state::AppState;
