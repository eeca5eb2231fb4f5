use kernel::id::{PostId, UserId};

use super::PgBlogRepository;
use crate::domain::entities::{LikeToggle, NewShare, NewView, PostStats, UserPostInteractions};
use crate::domain::repository::InteractionRepository;
use crate::domain::value_objects::ViewerKey;
use crate::error::BlogResult;

impl InteractionRepository for PgBlogRepository {
    async fn record_view(&self, view: &NewView) -> BlogResult<Option<i64>> {
        // The partial unique indexes decide what counts as a repeat view
        let conflict_target = match view.viewer {
            ViewerKey::User(_) => "(post_id, user_id) WHERE user_id IS NOT NULL",
            ViewerKey::Address(_) => "(post_id, ip_address) WHERE user_id IS NULL",
        };
        let sql = format!(
            r#"
            INSERT INTO post_views (post_id, user_id, ip_address, user_agent)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT {conflict_target} DO NOTHING
            RETURNING id
            "#
        );

        let view_id = sqlx::query_scalar::<_, i64>(&sql)
            .bind(view.post_id.get())
            .bind(view.viewer.user_id().map(UserId::get))
            .bind(&view.ip_address)
            .bind(&view.user_agent)
            .fetch_optional(&self.pool)
            .await?;

        Ok(view_id)
    }

    async fn toggle_like(&self, post_id: PostId, user_id: UserId) -> BlogResult<LikeToggle> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.get())
            .bind(user_id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed > 0 {
            tx.commit().await?;
            return Ok(LikeToggle::Unliked);
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(post_id.get())
        .bind(user_id.get())
        .fetch_optional(&mut *tx)
        .await?;

        // A concurrent toggle may have inserted first
        let like_id = match inserted {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT id FROM post_likes WHERE post_id = $1 AND user_id = $2",
                )
                .bind(post_id.get())
                .bind(user_id.get())
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(LikeToggle::Liked { like_id })
    }

    async fn record_share(&self, share: &NewShare) -> BlogResult<i64> {
        let share_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO post_shares (post_id, user_id, platform)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(share.post_id.get())
        .bind(share.user_id.map(UserId::get))
        .bind(&share.platform)
        .fetch_one(&self.pool)
        .await?;

        Ok(share_id)
    }

    async fn post_stats(&self, post_id: PostId) -> BlogResult<PostStats> {
        let (views, likes, comments, shares) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM post_views WHERE post_id = $1),
                (SELECT COUNT(*) FROM post_likes WHERE post_id = $1),
                (SELECT COUNT(*) FROM comments WHERE post_id = $1),
                (SELECT COUNT(*) FROM post_shares WHERE post_id = $1)
            "#,
        )
        .bind(post_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(PostStats {
            post_id,
            views,
            likes,
            comments,
            shares,
        })
    }

    async fn user_post_interactions(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> BlogResult<UserPostInteractions> {
        let (has_liked, has_viewed) = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM post_likes WHERE post_id = $1 AND user_id = $2),
                EXISTS(SELECT 1 FROM post_views WHERE post_id = $1 AND user_id = $2)
            "#,
        )
        .bind(post_id.get())
        .bind(user_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(UserPostInteractions {
            post_id,
            has_liked,
            has_viewed,
        })
    }
}
