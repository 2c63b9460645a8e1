extern crate self as atelier_domain;

pub mod entities;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{Comment, Image, ImageRecord, User};

// Re-export ID types
pub use ids::{CommentId, ImageId, UserId};

// Re-export value objects
pub use value_objects::{ExploreSort, GeneratedImage, UserRef};
