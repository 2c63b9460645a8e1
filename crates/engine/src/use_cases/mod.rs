//! Use cases - one struct per operation, grouped by area.
//!
//! Each use case owns `Arc<dyn Port>` handles and exposes a single
//! `execute`. HTTP handlers call use cases and never touch ports directly.

pub mod comments;
pub mod engagement;
pub mod gallery;
pub mod generation;
pub mod identity;

pub use comments::CommentUseCases;
pub use engagement::EngagementUseCases;
pub use gallery::GalleryUseCases;
pub use generation::GenerationUseCases;
