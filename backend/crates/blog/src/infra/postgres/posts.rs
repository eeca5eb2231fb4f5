use kernel::id::{PostId, UserId};
use kernel::pagination::Page;

use super::{AUTHOR_COLUMNS, POST_COLUMNS, PgBlogRepository, PostDetailsRow};
use crate::domain::entities::{NewPost, Post, PostDetails};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::Slug;
use crate::error::{BlogError, BlogResult};

const SLUG_CONSTRAINT: &str = "posts_slug_key";

/// A unique violation on the slug becomes `SlugTaken`
fn slug_conflict(err: sqlx::Error) -> BlogError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.constraint() == Some(SLUG_CONSTRAINT) => {
            BlogError::SlugTaken
        }
        _ => BlogError::Database(err),
    }
}

impl PostRepository for PgBlogRepository {
    async fn create_post(&self, post: &NewPost) -> BlogResult<PostDetails> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (title, content, summary, slug, is_published, author_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.author_id
            "#
        );

        let row = sqlx::query_as::<_, PostDetailsRow>(&sql)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.summary)
            .bind(post.slug.as_str())
            .bind(post.is_published)
            .bind(post.author_id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(slug_conflict)?;

        Ok(row.into_details())
    }

    async fn find_post(&self, post_id: PostId) -> BlogResult<Option<PostDetails>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#
        );

        let row = sqlx::query_as::<_, PostDetailsRow>(&sql)
            .bind(post_id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostDetailsRow::into_details))
    }

    async fn list_published_posts(&self, page: Page) -> BlogResult<Vec<PostDetails>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.is_published
            ORDER BY p.created_at DESC, p.id DESC
            OFFSET $1 LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, PostDetailsRow>(&sql)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostDetailsRow::into_details).collect())
    }

    async fn list_author_posts(
        &self,
        author_id: UserId,
        page: Page,
    ) -> BlogResult<Vec<PostDetails>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.author_id = $1
            ORDER BY p.created_at DESC, p.id DESC
            OFFSET $2 LIMIT $3
            "#
        );

        let rows = sqlx::query_as::<_, PostDetailsRow>(&sql)
            .bind(author_id.get())
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(PostDetailsRow::into_details).collect())
    }

    async fn slug_taken(&self, slug: &Slug, except: Option<PostId>) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM posts
                WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug.as_str())
        .bind(except.map(PostId::get))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_post(&self, post: &Post) -> BlogResult<PostDetails> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE posts SET
                    title = $2,
                    content = $3,
                    summary = $4,
                    slug = $5,
                    is_published = $6,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.author_id
            "#
        );

        let row = sqlx::query_as::<_, PostDetailsRow>(&sql)
            .bind(post.post_id.get())
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.summary)
            .bind(post.slug.as_str())
            .bind(post.is_published)
            .fetch_optional(&self.pool)
            .await
            .map_err(slug_conflict)?
            .ok_or(BlogError::PostNotFound)?;

        Ok(row.into_details())
    }

    async fn delete_post(&self, post_id: PostId) -> BlogResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
