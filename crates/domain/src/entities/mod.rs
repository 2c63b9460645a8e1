//! Domain entities

mod comment;
mod image;
mod user;

pub use comment::Comment;
pub use image::{Image, ImageRecord};
pub use user::User;
