//! List a user's own images, newest first.

use std::sync::Arc;

use atelier_domain::{ImageRecord, UserRef};

use crate::infrastructure::ports::{ImageRepo, RepoError};
use crate::use_cases::identity::{ResolveError, ResolveUser};

pub struct ListUserImages {
    resolve_user: Arc<ResolveUser>,
    image_repo: Arc<dyn ImageRepo>,
}

impl ListUserImages {
    pub fn new(resolve_user: Arc<ResolveUser>, image_repo: Arc<dyn ImageRepo>) -> Self {
        Self {
            resolve_user,
            image_repo,
        }
    }

    pub async fn execute(
        &self,
        user_ref: UserRef,
    ) -> Result<Vec<ImageRecord>, ListUserImagesError> {
        let user_id = self.resolve_user.execute(user_ref).await?;
        let records = self.image_repo.list_for_user(&user_id).await?;
        Ok(records)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListUserImagesError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockImageRepo, MockUserRepo};
    use atelier_domain::UserId;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn lists_for_the_resolved_user() {
        let mut user_repo = MockUserRepo::new();
        user_repo
            .expect_find_id_by_email()
            .with(eq("ada@example.com"))
            .returning(|_| Ok(Some(UserId::from("user-1"))));

        let mut image_repo = MockImageRepo::new();
        image_repo
            .expect_list_for_user()
            .with(eq(UserId::from("user-1")))
            .returning(|_| Ok(vec![]));

        let use_case = ListUserImages::new(
            Arc::new(ResolveUser::new(Arc::new(user_repo))),
            Arc::new(image_repo),
        );

        let records = use_case
            .execute(UserRef::parse("ada@example.com"))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn unknown_email_never_reaches_the_image_store() {
        let mut user_repo = MockUserRepo::new();
        user_repo.expect_find_id_by_email().returning(|_| Ok(None));

        let image_repo = MockImageRepo::new();

        let use_case = ListUserImages::new(
            Arc::new(ResolveUser::new(Arc::new(user_repo))),
            Arc::new(image_repo),
        );

        let err = use_case
            .execute(UserRef::parse("ghost@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ListUserImagesError::Resolve(_)));
    }
}
