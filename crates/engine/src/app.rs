//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    persistence::SqliteRepositories,
    ports::{
        AssetStorePort, ClockPort, CommentRepo, ImageGenPort, ImageRepo, PromptRefinerPort,
        UserRepo,
    },
};
use crate::use_cases;
use crate::use_cases::identity::ResolveUser;

/// Main application state.
///
/// Holds the wired use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub generation: use_cases::GenerationUseCases,
    pub gallery: use_cases::GalleryUseCases,
    pub engagement: use_cases::EngagementUseCases,
    pub comments: use_cases::CommentUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repos: SqliteRepositories,
        refiner: Arc<dyn PromptRefinerPort>,
        image_gen: Arc<dyn ImageGenPort>,
        assets: Arc<dyn AssetStorePort>,
    ) -> Self {
        let clock_port: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let user_repo: Arc<dyn UserRepo> = repos.users.clone();
        let image_repo: Arc<dyn ImageRepo> = repos.images.clone();
        let comment_repo: Arc<dyn CommentRepo> = repos.comments.clone();

        // Identity resolution is shared by every user-keyed use case.
        let resolve_user = Arc::new(ResolveUser::new(user_repo));

        let generation = use_cases::GenerationUseCases::new(
            Arc::new(use_cases::generation::GenerateImage::new(
                refiner,
                image_gen,
                assets.clone(),
                clock_port.clone(),
            )),
            Arc::new(use_cases::generation::PublishImage::new(assets)),
        );

        let gallery = use_cases::GalleryUseCases::new(
            Arc::new(use_cases::gallery::SaveImage::new(
                resolve_user.clone(),
                image_repo.clone(),
                clock_port.clone(),
            )),
            Arc::new(use_cases::gallery::ListUserImages::new(
                resolve_user.clone(),
                image_repo.clone(),
            )),
            Arc::new(use_cases::gallery::ListExploreImages::new(
                image_repo.clone(),
            )),
            Arc::new(use_cases::gallery::GetImage::new(image_repo.clone())),
            Arc::new(use_cases::gallery::DeleteImage::new(
                resolve_user.clone(),
                image_repo.clone(),
            )),
        );

        let engagement = use_cases::EngagementUseCases::new(
            Arc::new(use_cases::engagement::LikeImage::new(
                resolve_user.clone(),
                image_repo.clone(),
            )),
            Arc::new(use_cases::engagement::UnlikeImage::new(
                resolve_user.clone(),
                image_repo.clone(),
            )),
            Arc::new(use_cases::engagement::ListLikedImages::new(
                resolve_user,
                image_repo,
            )),
        );

        let comments = use_cases::CommentUseCases::new(
            Arc::new(use_cases::comments::ListComments::new(comment_repo.clone())),
            Arc::new(use_cases::comments::CreateComment::new(
                comment_repo,
                clock_port,
            )),
        );

        Self {
            use_cases: UseCases {
                generation,
                gallery,
                engagement,
                comments,
            },
        }
    }
}
