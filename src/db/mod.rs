//! Database module for the StudyHub server
//!
//! This module holds the validated record shapes and the
//! data access layer operations over them.

pub mod models;
pub mod operations;

pub use models::{
    CoinPurchase, ContentTag, ContentType, HomeworkSubject, PaymentStatus, Poll, PollId,
    PollOption, QuizId, QuizQuestion, UserId, UserProfile,
};
pub use operations::DbOperations;
