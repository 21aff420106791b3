use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Identifier of a user record. The user entity itself lives outside this
/// crate; only its id is referenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PollId(pub Uuid);

/// Identifier of a quiz record. Like [`UserId`], the quiz entity is external.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct QuizId(pub Uuid);

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} must be a non-empty string",
            field
        )));
    }
    Ok(())
}

/// Status of a coin purchase. Any value outside this set is rejected both
/// at parse time and during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Done,
    Failure,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Done => "done",
            PaymentStatus::Failure => "failure",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "done" => Ok(PaymentStatus::Done),
            "failure" => Ok(PaymentStatus::Failure),
            other => Err(AppError::ValidationError(format!(
                "payment_status must be one of pending, done, failure; got '{}'",
                other
            ))),
        }
    }
}

/// Kind of external content a [`ContentTag`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "content_type", rename_all = "lowercase")]
pub enum ContentType {
    News,
    Article,
    Post,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::News => "news",
            ContentType::Article => "article",
            ContentType::Post => "post",
        }
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(ContentType::News),
            "article" => Ok(ContentType::Article),
            "post" => Ok(ContentType::Post),
            other => Err(AppError::ValidationError(format!(
                "content_type must be one of news, article, post; got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HomeworkSubject {
    pub id: Uuid,
    pub subject_name: String,
}

impl HomeworkSubject {
    pub fn new(subject_name: String) -> Result<Self, AppError> {
        require_text("subject_name", &subject_name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            subject_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoinPurchase {
    pub id: Uuid,
    pub user_id: UserId,
    pub purchase_token: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoinPurchase {
    pub fn new(
        user_id: UserId,
        purchase_token: String,
        payment_status: PaymentStatus,
    ) -> Result<Self, AppError> {
        require_text("purchase_token", &purchase_token)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            purchase_token,
            payment_status,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Poll {
    pub id: PollId,
    pub user_id: UserId,
    pub poll_question: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Poll {
    /// Builds a poll stamped with the creation time. An expiry, if given,
    /// must not precede creation.
    pub fn new(
        user_id: UserId,
        poll_question: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        require_text("poll_question", &poll_question)?;
        let created_at = Utc::now();
        if let Some(expiry) = expires_at {
            if expiry < created_at {
                return Err(AppError::ValidationError(format!(
                    "expires_at {} precedes created_at {}",
                    expiry, created_at
                )));
            }
        }
        Ok(Self {
            id: PollId(Uuid::new_v4()),
            user_id,
            poll_question,
            created_at,
            expires_at,
        })
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expiry) => Utc::now() > expiry,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PollOption {
    pub id: Uuid,
    pub poll_id: PollId,
    pub option_text: String,
    /// Position of this option within its poll; reads order by it.
    pub display_order: i32,
}

impl PollOption {
    pub fn new(poll_id: PollId, option_text: String, display_order: i32) -> Result<Self, AppError> {
        require_text("option_text", &option_text)?;
        if display_order < 0 {
            return Err(AppError::ValidationError(format!(
                "display_order must not be negative; got {}",
                display_order
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            poll_id,
            option_text,
            display_order,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: QuizId,
    pub question_text: String,
    /// Candidate answers in presentation order.
    pub answer_options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn new(
        quiz_id: QuizId,
        question_text: String,
        answer_options: Vec<String>,
        correct_answer: String,
    ) -> Result<Self, AppError> {
        require_text("question_text", &question_text)?;
        if answer_options.is_empty() {
            return Err(AppError::ValidationError(
                "answer_options must contain at least one option".to_string(),
            ));
        }
        if !answer_options.iter().any(|option| option == &correct_answer) {
            return Err(AppError::ValidationError(format!(
                "correct_answer '{}' is not one of the answer_options",
                correct_answer
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            quiz_id,
            question_text,
            answer_options,
            correct_answer,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentTag {
    pub id: Uuid,
    pub content_type: ContentType,
    pub content_url: String,
    pub mood: Option<String>,
}

impl ContentTag {
    pub fn new(
        content_type: ContentType,
        content_url: String,
        mood: Option<String>,
    ) -> Result<Self, AppError> {
        require_text("content_url", &content_url)?;
        Ok(Self {
            id: Uuid::new_v4(),
            content_type,
            content_url,
            mood,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: UserId,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub theme_preferences: Option<String>,
    pub mood_status: Option<String>,
    pub privacy_settings: Option<String>,
}

impl UserProfile {
    /// One profile per user is intended; nothing here enforces it.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            avatar_url: None,
            bio: None,
            theme_preferences: None,
            mood_status: None,
            privacy_settings: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_id() -> UserId {
        UserId(Uuid::new_v4())
    }

    #[test]
    fn test_subject_requires_name() {
        assert!(HomeworkSubject::new("Mathematics".to_string()).is_ok());
        assert!(HomeworkSubject::new("".to_string()).is_err());
        assert!(HomeworkSubject::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_payment_status_rejects_unknown_values() {
        assert_eq!(PaymentStatus::from_str("pending").unwrap(), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_str("done").unwrap(), PaymentStatus::Done);
        assert_eq!(PaymentStatus::from_str("failure").unwrap(), PaymentStatus::Failure);

        let err = PaymentStatus::from_str("refunded").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        // Same rejection through the serde path
        assert!(serde_json::from_str::<PaymentStatus>("\"refunded\"").is_err());
        assert_eq!(
            serde_json::from_str::<PaymentStatus>("\"done\"").unwrap(),
            PaymentStatus::Done
        );
    }

    #[test]
    fn test_content_type_rejects_unknown_values() {
        assert_eq!(ContentType::from_str("news").unwrap(), ContentType::News);
        assert_eq!(ContentType::from_str("post").unwrap(), ContentType::Post);

        let err = ContentType::from_str("video").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(serde_json::from_str::<ContentType>("\"video\"").is_err());
    }

    #[test]
    fn test_purchase_requires_token() {
        let purchase = CoinPurchase::new(user_id(), "tok_123".to_string(), PaymentStatus::Pending)
            .expect("valid purchase");
        assert_eq!(purchase.created_at, purchase.updated_at);

        assert!(CoinPurchase::new(user_id(), "".to_string(), PaymentStatus::Done).is_err());
    }

    #[test]
    fn test_poll_requires_question() {
        assert!(Poll::new(user_id(), "".to_string(), None).is_err());

        let poll = Poll::new(user_id(), "Favorite subject?".to_string(), None).unwrap();
        assert!(poll.expires_at.is_none());
        assert!(!poll.is_expired());
    }

    #[test]
    fn test_poll_created_at_defaults_to_now() {
        let before = Utc::now();
        let poll = Poll::new(user_id(), "Favorite subject?".to_string(), None).unwrap();
        let after = Utc::now();
        assert!(poll.created_at >= before && poll.created_at <= after);
    }

    #[test]
    fn test_poll_rejects_expiry_before_creation() {
        let past = Utc::now() - Duration::hours(1);
        let err = Poll::new(user_id(), "Too late?".to_string(), Some(past)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let future = Utc::now() + Duration::hours(1);
        let poll = Poll::new(user_id(), "In time?".to_string(), Some(future)).unwrap();
        assert!(!poll.is_expired());
    }

    #[test]
    fn test_poll_option_requires_text() {
        let poll_id = PollId(Uuid::new_v4());
        assert!(PollOption::new(poll_id, "Algebra".to_string(), 0).is_ok());
        assert!(PollOption::new(poll_id, " ".to_string(), 0).is_err());
    }

    #[test]
    fn test_poll_option_rejects_negative_display_order() {
        let poll_id = PollId(Uuid::new_v4());
        let err = PollOption::new(poll_id, "Algebra".to_string(), -1).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_quiz_question_requires_options() {
        let quiz_id = QuizId(Uuid::new_v4());
        let err = QuizQuestion::new(
            quiz_id,
            "2 + 2 = ?".to_string(),
            vec![],
            "4".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_quiz_correct_answer_must_be_an_option() {
        let quiz_id = QuizId(Uuid::new_v4());
        let options = vec!["3".to_string(), "4".to_string(), "5".to_string()];

        let err = QuizQuestion::new(
            quiz_id,
            "2 + 2 = ?".to_string(),
            options.clone(),
            "22".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let question =
            QuizQuestion::new(quiz_id, "2 + 2 = ?".to_string(), options, "4".to_string()).unwrap();
        assert_eq!(question.answer_options.len(), 3);
        assert_eq!(question.correct_answer, "4");
    }

    #[test]
    fn test_content_tag_requires_url() {
        assert!(ContentTag::new(ContentType::News, "".to_string(), None).is_err());

        let tag = ContentTag::new(
            ContentType::Article,
            "https://example.com/a/1".to_string(),
            Some("curious".to_string()),
        )
        .unwrap();
        assert_eq!(tag.content_type.as_str(), "article");
        assert_eq!(tag.mood.as_deref(), Some("curious"));
    }

    #[test]
    fn test_profile_defaults_optional_fields_to_none() {
        let profile = UserProfile::new(user_id());
        assert!(profile.avatar_url.is_none());
        assert!(profile.bio.is_none());
        assert!(profile.theme_preferences.is_none());
        assert!(profile.mood_status.is_none());
        assert!(profile.privacy_settings.is_none());
    }
}
