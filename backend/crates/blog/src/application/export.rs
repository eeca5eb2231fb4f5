//! Personal data export

use std::sync::Arc;

use auth::User;

use crate::domain::entities::Post;
use crate::domain::reports::ExportedComment;
use crate::domain::repository::ExportRepository;
use crate::error::BlogResult;

#[derive(Debug, Clone)]
pub struct UserExport {
    pub user: User,
    pub posts: Vec<Post>,
    pub comments: Vec<ExportedComment>,
}

pub struct ExportUseCase<R>
where
    R: ExportRepository,
{
    repo: Arc<R>,
}

impl<R> ExportUseCase<R>
where
    R: ExportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn export(&self, user: User) -> BlogResult<UserExport> {
        let posts = self.repo.export_posts(user.user_id).await?;
        let comments = self.repo.export_comments(user.user_id).await?;

        tracing::info!(
            user_id = %user.user_id,
            posts = posts.len(),
            comments = comments.len(),
            "User data exported"
        );

        Ok(UserExport {
            user,
            posts,
            comments,
        })
    }
}
