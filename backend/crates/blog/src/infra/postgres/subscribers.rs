use auth::models::email::Email;
use kernel::id::SubscriberId;
use kernel::pagination::Page;

use super::{PgBlogRepository, SUBSCRIBER_COLUMNS, SubscriberRow};
use crate::domain::entities::{NewSubscriber, Subscriber, SubscriberStats};
use crate::domain::repository::SubscriberRepository;
use crate::error::BlogResult;

impl SubscriberRepository for PgBlogRepository {
    async fn find_subscriber_by_email(&self, email: &Email) -> BlogResult<Option<Subscriber>> {
        let sql = format!("SELECT {SUBSCRIBER_COLUMNS} FROM subscribers WHERE email = $1");

        let row = sqlx::query_as::<_, SubscriberRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SubscriberRow::into_subscriber))
    }

    async fn create_subscriber(
        &self,
        subscriber: &NewSubscriber,
    ) -> BlogResult<Option<Subscriber>> {
        let sql = format!(
            r#"
            INSERT INTO subscribers (email, full_name, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, SubscriberRow>(&sql)
            .bind(subscriber.email.as_str())
            .bind(&subscriber.full_name)
            .bind(subscriber.user_id.map(|id| id.get()))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SubscriberRow::into_subscriber))
    }

    async fn reactivate_subscriber(&self, subscriber_id: SubscriberId) -> BlogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE subscribers SET is_active = TRUE, unsubscribed_at = NULL
            WHERE id = $1 AND NOT is_active
            "#,
        )
        .bind(subscriber_id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_subscriber(&self, email: &Email) -> BlogResult<Option<Subscriber>> {
        let sql = format!(
            r#"
            UPDATE subscribers SET is_active = FALSE, unsubscribed_at = NOW()
            WHERE email = $1 AND is_active
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, SubscriberRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SubscriberRow::into_subscriber))
    }

    async fn list_active_subscribers(&self, page: Page) -> BlogResult<Vec<Subscriber>> {
        let sql = format!(
            r#"
            SELECT {SUBSCRIBER_COLUMNS}
            FROM subscribers
            WHERE is_active
            ORDER BY subscribed_at DESC, id DESC
            OFFSET $1 LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, SubscriberRow>(&sql)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(SubscriberRow::into_subscriber).collect())
    }

    async fn subscriber_stats(&self) -> BlogResult<SubscriberStats> {
        let (active, unsubscribed) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_active),
                COUNT(*) FILTER (WHERE NOT is_active)
            FROM subscribers
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(SubscriberStats::new(active, unsubscribed))
    }
}
