//! API layer - HTTP entry points.

pub mod http;
pub mod image_routes;
