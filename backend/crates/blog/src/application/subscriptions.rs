//! Newsletter Subscription Use Cases

use std::sync::Arc;

use auth::models::email::Email;
use kernel::id::UserId;
use kernel::pagination::Page;

use crate::domain::entities::{NewSubscriber, SubscribeOutcome, Subscriber, SubscriberStats};
use crate::domain::repository::SubscriberRepository;
use crate::error::{BlogError, BlogResult};

pub const DEFAULT_SUBSCRIBERS_LIMIT: i64 = 50;
pub const SUBSCRIBER_NAME_MAX_LENGTH: usize = 100;

pub struct SubscribeInput {
    pub email: String,
    pub full_name: Option<String>,
    /// Linked when the caller is logged in
    pub user_id: Option<UserId>,
}

pub struct SubscriptionsUseCase<R>
where
    R: SubscriberRepository,
{
    repo: Arc<R>,
}

impl<R> SubscriptionsUseCase<R>
where
    R: SubscriberRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create, reactivate, or leave an active subscription alone
    pub async fn subscribe(&self, input: SubscribeInput) -> BlogResult<SubscribeOutcome> {
        let email = Email::new(input.email)?;
        let full_name = input
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if full_name
            .as_ref()
            .is_some_and(|n| n.chars().count() > SUBSCRIBER_NAME_MAX_LENGTH)
        {
            return Err(BlogError::Validation(format!(
                "full_name must be at most {SUBSCRIBER_NAME_MAX_LENGTH} characters"
            )));
        }

        if let Some(existing) = self.repo.find_subscriber_by_email(&email).await? {
            return self.resubscribe(existing).await;
        }

        let created = self
            .repo
            .create_subscriber(&NewSubscriber {
                email: email.clone(),
                full_name,
                user_id: input.user_id,
            })
            .await?;

        match created {
            Some(subscriber) => {
                tracing::info!(subscriber_id = %subscriber.subscriber_id, "Subscriber created");
                Ok(SubscribeOutcome::Subscribed {
                    subscriber_id: subscriber.subscriber_id,
                })
            }
            // lost a race with another subscribe for the same email
            None => {
                let existing = self
                    .repo
                    .find_subscriber_by_email(&email)
                    .await?
                    .ok_or_else(|| BlogError::Internal("subscriber vanished".to_string()))?;
                self.resubscribe(existing).await
            }
        }
    }

    async fn resubscribe(&self, existing: Subscriber) -> BlogResult<SubscribeOutcome> {
        if existing.is_active {
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
        if self.repo.reactivate_subscriber(existing.subscriber_id).await? {
            tracing::info!(subscriber_id = %existing.subscriber_id, "Subscription reactivated");
            Ok(SubscribeOutcome::Reactivated)
        } else {
            Ok(SubscribeOutcome::AlreadySubscribed)
        }
    }

    pub async fn unsubscribe(&self, email: &str) -> BlogResult<()> {
        let email = Email::new(email)?;

        let subscriber = self
            .repo
            .deactivate_subscriber(&email)
            .await?
            .ok_or(BlogError::SubscriberNotFound)?;

        tracing::info!(subscriber_id = %subscriber.subscriber_id, "Subscriber unsubscribed");

        Ok(())
    }

    pub async fn list_active(&self, page: Page) -> BlogResult<Vec<Subscriber>> {
        self.repo.list_active_subscribers(page).await
    }

    pub async fn stats(&self) -> BlogResult<SubscriberStats> {
        self.repo.subscriber_stats().await
    }
}
