//! Value objects

mod explore_sort;
mod generated_image;
mod user_ref;

pub use explore_sort::ExploreSort;
pub use generated_image::GeneratedImage;
pub use user_ref::UserRef;
