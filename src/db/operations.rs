use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::db::models::{
    CoinPurchase, ContentTag, HomeworkSubject, Poll, PollId, PollOption, QuizQuestion,
    UserId, UserProfile,
};
use crate::error::AppError;

pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    pub async fn get_pool_status(&self) -> Result<DbPoolStatus, AppError> {
        let size = self.pool.size() as u32;
        let idle = self.pool.num_idle() as u32;
        let active = size - idle;

        Ok(DbPoolStatus {
            total_connections: size,
            active_connections: active,
            idle_connections: idle,
        })
    }

    pub async fn create_subject(&self, subject: &HomeworkSubject) -> Result<HomeworkSubject, AppError> {
        let subject = sqlx::query_as::<_, HomeworkSubject>(
            r#"
            INSERT INTO homework_subjects (id, subject_name)
            VALUES ($1, $2)
            RETURNING id, subject_name
            "#,
        )
        .bind(subject.id)
        .bind(&subject.subject_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(subject)
    }

    pub async fn get_subject_by_id(&self, id: Uuid) -> Result<Option<HomeworkSubject>, AppError> {
        let subject = sqlx::query_as::<_, HomeworkSubject>(
            "SELECT id, subject_name FROM homework_subjects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(subject)
    }

    pub async fn create_purchase(&self, purchase: &CoinPurchase) -> Result<CoinPurchase, AppError> {
        let purchase = sqlx::query_as::<_, CoinPurchase>(
            r#"
            INSERT INTO coin_purchases (id, user_id, purchase_token, payment_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, purchase_token, payment_status, created_at, updated_at
            "#,
        )
        .bind(purchase.id)
        .bind(purchase.user_id)
        .bind(&purchase.purchase_token)
        .bind(purchase.payment_status)
        .bind(purchase.created_at)
        .bind(purchase.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(purchase)
    }

    pub async fn get_purchase_by_id(&self, id: Uuid) -> Result<Option<CoinPurchase>, AppError> {
        let purchase = sqlx::query_as::<_, CoinPurchase>(
            "SELECT id, user_id, purchase_token, payment_status, created_at, updated_at FROM coin_purchases WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(purchase)
    }

    pub async fn create_poll(&self, poll: &Poll) -> Result<Poll, AppError> {
        let poll = sqlx::query_as::<_, Poll>(
            r#"
            INSERT INTO polls (id, user_id, poll_question, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, poll_question, created_at, expires_at
            "#,
        )
        .bind(poll.id)
        .bind(poll.user_id)
        .bind(&poll.poll_question)
        .bind(poll.created_at)
        .bind(poll.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(poll)
    }

    pub async fn get_poll_by_id(&self, id: PollId) -> Result<Option<Poll>, AppError> {
        let poll = sqlx::query_as::<_, Poll>(
            "SELECT id, user_id, poll_question, created_at, expires_at FROM polls WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(poll)
    }

    pub async fn create_poll_option(&self, option: &PollOption) -> Result<PollOption, AppError> {
        let option = sqlx::query_as::<_, PollOption>(
            r#"
            INSERT INTO poll_options (id, poll_id, option_text, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING id, poll_id, option_text, display_order
            "#,
        )
        .bind(option.id)
        .bind(option.poll_id)
        .bind(&option.option_text)
        .bind(option.display_order)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(option)
    }

    /// Options for a poll, ordered by display_order.
    pub async fn get_options_for_poll(&self, poll_id: PollId) -> Result<Vec<PollOption>, AppError> {
        let options = sqlx::query_as::<_, PollOption>(
            "SELECT id, poll_id, option_text, display_order FROM poll_options WHERE poll_id = $1 ORDER BY display_order",
        )
        .bind(poll_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(options)
    }

    pub async fn create_quiz_question(&self, question: &QuizQuestion) -> Result<QuizQuestion, AppError> {
        let question = sqlx::query_as::<_, QuizQuestion>(
            r#"
            INSERT INTO quiz_questions (id, quiz_id, question_text, answer_options, correct_answer)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, quiz_id, question_text, answer_options, correct_answer
            "#,
        )
        .bind(question.id)
        .bind(question.quiz_id)
        .bind(&question.question_text)
        .bind(&question.answer_options)
        .bind(&question.correct_answer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(question)
    }

    pub async fn get_quiz_question_by_id(&self, id: Uuid) -> Result<Option<QuizQuestion>, AppError> {
        let question = sqlx::query_as::<_, QuizQuestion>(
            "SELECT id, quiz_id, question_text, answer_options, correct_answer FROM quiz_questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(question)
    }

    pub async fn create_content_tag(&self, tag: &ContentTag) -> Result<ContentTag, AppError> {
        let tag = sqlx::query_as::<_, ContentTag>(
            r#"
            INSERT INTO content_tags (id, content_type, content_url, mood)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content_type, content_url, mood
            "#,
        )
        .bind(tag.id)
        .bind(tag.content_type)
        .bind(&tag.content_url)
        .bind(&tag.mood)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(tag)
    }

    pub async fn get_content_tag_by_id(&self, id: Uuid) -> Result<Option<ContentTag>, AppError> {
        let tag = sqlx::query_as::<_, ContentTag>(
            "SELECT id, content_type, content_url, mood FROM content_tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(tag)
    }

    pub async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (id, user_id, avatar_url, bio, theme_preferences, mood_status, privacy_settings)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, avatar_url, bio, theme_preferences, mood_status, privacy_settings
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.avatar_url)
        .bind(&profile.bio)
        .bind(&profile.theme_preferences)
        .bind(&profile.mood_status)
        .bind(&profile.privacy_settings)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(profile)
    }

    pub async fn get_profile_by_user_id(&self, user_id: UserId) -> Result<Option<UserProfile>, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT id, user_id, avatar_url, bio, theme_preferences, mood_status, privacy_settings FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(profile)
    }
}

#[derive(Debug, Clone)]
pub struct DbPoolStatus {
    pub total_connections: u32,
    pub active_connections: u32,
    pub idle_connections: u32,
}
