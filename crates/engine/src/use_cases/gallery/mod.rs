//! Gallery use cases - saving, listing, and deleting stored images.

mod delete_image;
mod get_image;
mod list_explore_images;
mod list_user_images;
mod save_image;

pub use delete_image::{DeleteError, DeleteImage};
pub use get_image::GetImage;
pub use list_explore_images::ListExploreImages;
pub use list_user_images::{ListUserImages, ListUserImagesError};
pub use save_image::{SaveError, SaveImage};

use std::sync::Arc;

/// Container for gallery use cases.
pub struct GalleryUseCases {
    pub save: Arc<SaveImage>,
    pub list_for_user: Arc<ListUserImages>,
    pub list_explore: Arc<ListExploreImages>,
    pub get: Arc<GetImage>,
    pub delete: Arc<DeleteImage>,
}

impl GalleryUseCases {
    pub fn new(
        save: Arc<SaveImage>,
        list_for_user: Arc<ListUserImages>,
        list_explore: Arc<ListExploreImages>,
        get: Arc<GetImage>,
        delete: Arc<DeleteImage>,
    ) -> Self {
        Self {
            save,
            list_for_user,
            list_explore,
            get,
            delete,
        }
    }
}
