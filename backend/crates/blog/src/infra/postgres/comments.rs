use kernel::id::{CommentId, PostId, UserId};
use kernel::pagination::Page;

use super::{AUTHOR_COLUMNS, COMMENT_COLUMNS, CommentDetailsRow, CommentRow, PgBlogRepository};
use crate::domain::entities::{Comment, CommentDetails, NewComment};
use crate::domain::repository::CommentRepository;
use crate::error::{BlogError, BlogResult};

impl PgBlogRepository {
    async fn list_comments(
        &self,
        filter: &str,
        order: &str,
        key: i64,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS}
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE {filter}
            ORDER BY {order}
            OFFSET $2 LIMIT $3
            "#
        );

        let rows = sqlx::query_as::<_, CommentDetailsRow>(&sql)
            .bind(key)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentDetailsRow::into_details).collect())
    }
}

impl CommentRepository for PgBlogRepository {
    async fn create_comment(&self, comment: &NewComment) -> BlogResult<CommentDetails> {
        let sql = format!(
            r#"
            WITH c AS (
                INSERT INTO comments (content, post_id, author_id)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS}
            FROM c
            JOIN users u ON u.id = c.author_id
            "#
        );

        let row = sqlx::query_as::<_, CommentDetailsRow>(&sql)
            .bind(&comment.content)
            .bind(comment.post_id.get())
            .bind(comment.author_id.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into_details())
    }

    async fn find_comment(&self, comment_id: CommentId) -> BlogResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments c WHERE c.id = $1");

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment_id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_post_comments(
        &self,
        post_id: PostId,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>> {
        self.list_comments(
            "c.post_id = $1",
            "c.created_at ASC, c.id ASC",
            post_id.get(),
            page,
        )
        .await
    }

    async fn list_author_comments(
        &self,
        author_id: UserId,
        page: Page,
    ) -> BlogResult<Vec<CommentDetails>> {
        self.list_comments(
            "c.author_id = $1",
            "c.created_at DESC, c.id DESC",
            author_id.get(),
            page,
        )
        .await
    }

    async fn update_comment(&self, comment: &Comment) -> BlogResult<CommentDetails> {
        let sql = format!(
            r#"
            WITH c AS (
                UPDATE comments SET content = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {COMMENT_COLUMNS}, {AUTHOR_COLUMNS}
            FROM c
            JOIN users u ON u.id = c.author_id
            "#
        );

        let row = sqlx::query_as::<_, CommentDetailsRow>(&sql)
            .bind(comment.comment_id.get())
            .bind(&comment.content)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BlogError::CommentNotFound)?;

        Ok(row.into_details())
    }

    async fn delete_comment(&self, comment_id: CommentId) -> BlogResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
