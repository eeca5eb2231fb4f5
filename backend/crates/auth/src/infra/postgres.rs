//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::{
    user::{NewUser, User},
    user_settings::UserSettings,
};
use crate::domain::repository::{UserRepository, UserSettingsRepository};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USERNAME_CONSTRAINT: &str = "users_username_canonical_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

const USER_COLUMNS: &str = r#"
    id,
    username,
    email,
    hashed_password,
    full_name,
    bio,
    website,
    twitter,
    linkedin,
    is_active,
    is_admin,
    created_at,
    updated_at
"#;

const SETTINGS_COLUMNS: &str = r#"
    user_id,
    email_notifications,
    push_notifications,
    newsletter_subscription,
    comment_notifications,
    like_notifications,
    public_profile,
    show_email,
    blog_title,
    blog_description,
    allow_comments,
    moderate_comments,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_user(&self, filter: &str, bind: UserLookup<'_>) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}");
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match bind {
            UserLookup::Id(id) => query.bind(id),
            UserLookup::Text(text) => query.bind(text),
        };

        let row = query.fetch_optional(&self.pool).await?;
        row.map(|r| r.into_user()).transpose()
    }
}

enum UserLookup<'a> {
    Id(i64),
    Text(&'a str),
}

/// Translate a unique violation on the users table into the matching
/// conflict; anything else stays a database error.
fn user_conflict(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some(USERNAME_CONSTRAINT) => return AuthError::UserNameTaken,
            Some(EMAIL_CONSTRAINT) => return AuthError::EmailTaken,
            _ => {}
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (
                username,
                username_canonical,
                email,
                hashed_password,
                full_name
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_name.original())
            .bind(user.user_name.canonical())
            .bind(user.email.as_str())
            .bind(user.password.as_phc_string())
            .bind(&user.full_name)
            .fetch_one(&self.pool)
            .await
            .map_err(user_conflict)?;

        row.into_user()
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        self.fetch_user("id = $1", UserLookup::Id(user_id.get())).await
    }

    async fn find_user_by_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        self.fetch_user(
            "username_canonical = $1",
            UserLookup::Text(user_name.canonical()),
        )
        .await
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_user("email = $1", UserLookup::Text(email.as_str()))
            .await
    }

    async fn user_name_taken(
        &self,
        user_name: &UserName,
        except: Option<UserId>,
    ) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username_canonical = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(user_name.canonical())
        .bind(except.map(UserId::get))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn email_taken(&self, email: &Email, except: Option<UserId>) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email.as_str())
        .bind(except.map(UserId::get))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_user(&self, user: &User) -> AuthResult<User> {
        let sql = format!(
            r#"
            UPDATE users SET
                username = $2,
                username_canonical = $3,
                email = $4,
                hashed_password = $5,
                full_name = $6,
                bio = $7,
                website = $8,
                twitter = $9,
                linkedin = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.user_id.get())
            .bind(user.user_name.original())
            .bind(user.user_name.canonical())
            .bind(user.email.as_str())
            .bind(user.password.as_phc_string())
            .bind(&user.full_name)
            .bind(&user.bio)
            .bind(&user.website)
            .bind(&user.twitter)
            .bind(&user.linkedin)
            .fetch_optional(&self.pool)
            .await
            .map_err(user_conflict)?
            .ok_or(AuthError::UserNotFound)?;

        row.into_user()
    }

    async fn deactivate_user(&self, user_id: UserId) -> AuthResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id.get())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Settings Repository Implementation
// ============================================================================

impl UserSettingsRepository for PgAuthRepository {
    async fn find_or_create_settings(&self, user_id: UserId) -> AuthResult<UserSettings> {
        // Two first reads may race; the unique user_id makes the loser a no-op
        sqlx::query("INSERT INTO user_settings (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id.get())
            .execute(&self.pool)
            .await?;

        let sql = format!("SELECT {SETTINGS_COLUMNS} FROM user_settings WHERE user_id = $1");
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(user_id.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into_settings())
    }

    async fn update_settings(&self, settings: &UserSettings) -> AuthResult<UserSettings> {
        let sql = format!(
            r#"
            UPDATE user_settings SET
                email_notifications = $2,
                push_notifications = $3,
                newsletter_subscription = $4,
                comment_notifications = $5,
                like_notifications = $6,
                public_profile = $7,
                show_email = $8,
                blog_title = $9,
                blog_description = $10,
                allow_comments = $11,
                moderate_comments = $12,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {SETTINGS_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(settings.user_id.get())
            .bind(settings.email_notifications)
            .bind(settings.push_notifications)
            .bind(settings.newsletter_subscription)
            .bind(settings.comment_notifications)
            .bind(settings.like_notifications)
            .bind(settings.public_profile)
            .bind(settings.show_email)
            .bind(&settings.blog_title)
            .bind(&settings.blog_description)
            .bind(settings.allow_comments)
            .bind(settings.moderate_comments)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(row.into_settings())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    hashed_password: String,
    full_name: Option<String>,
    bio: Option<String>,
    website: Option<String>,
    twitter: Option<String>,
    linkedin: Option<String>,
    is_active: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::new(self.id),
            user_name: UserName::from_db(&self.username),
            email: Email::from_db(self.email),
            password: UserPassword::from_phc_string(self.hashed_password)?,
            full_name: self.full_name,
            bio: self.bio,
            website: self.website,
            twitter: self.twitter,
            linkedin: self.linkedin,
            is_active: self.is_active,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    user_id: i64,
    email_notifications: bool,
    push_notifications: bool,
    newsletter_subscription: bool,
    comment_notifications: bool,
    like_notifications: bool,
    public_profile: bool,
    show_email: bool,
    blog_title: String,
    blog_description: String,
    allow_comments: bool,
    moderate_comments: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl SettingsRow {
    fn into_settings(self) -> UserSettings {
        UserSettings {
            user_id: UserId::new(self.user_id),
            email_notifications: self.email_notifications,
            push_notifications: self.push_notifications,
            newsletter_subscription: self.newsletter_subscription,
            comment_notifications: self.comment_notifications,
            like_notifications: self.like_notifications,
            public_profile: self.public_profile,
            show_email: self.show_email,
            blog_title: self.blog_title,
            blog_description: self.blog_description,
            allow_comments: self.allow_comments,
            moderate_comments: self.moderate_comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
