use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;

use interview_core::model::{
    Category, Difficulty, MetricsId, PerformanceMetrics, PracticeSessionRecord, Profile,
    ProfileFields, ProfileId, Question, QuestionId, ResponseId, SessionId, SessionResponseRecord,
    UserId,
};

use crate::repository::StorageError;

fn de(err: sqlx::Error) -> StorageError {
    StorageError::Serialization(err.to_string())
}

fn parse<T>(raw: &str, what: &str) -> Result<T, StorageError>
where
    T: FromStr,
{
    raw.parse::<T>()
        .map_err(|_| StorageError::Serialization(format!("invalid {what}: {raw}")))
}

fn count_u32(raw: i64, what: &str) -> Result<u32, StorageError> {
    u32::try_from(raw).map_err(|_| StorageError::Serialization(format!("{what} out of range")))
}

fn optional_u32(raw: Option<i64>, what: &str) -> Result<Option<u32>, StorageError> {
    raw.map(|value| count_u32(value, what)).transpose()
}

pub fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let id: String = row.try_get("id").map_err(de)?;
    let category: String = row.try_get("category").map_err(de)?;
    let difficulty: String = row.try_get("difficulty").map_err(de)?;
    let prompt: String = row.try_get("prompt").map_err(de)?;
    let sample_answer: Option<String> = row.try_get("sample_answer").map_err(de)?;
    let tags_json: String = row.try_get("tags").map_err(de)?;
    let time_limit: Option<i64> = row.try_get("time_limit_secs").map_err(de)?;
    let is_active: bool = row.try_get("is_active").map_err(de)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(de)?;

    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| StorageError::Serialization(format!("invalid tags json: {e}")))?;

    Question::from_persisted(
        parse::<QuestionId>(&id, "question id")?,
        parse::<Category>(&category, "category")?,
        parse::<Difficulty>(&difficulty, "difficulty")?,
        prompt,
        sample_answer,
        tags,
        optional_u32(time_limit, "time_limit_secs")?,
        is_active,
        created_at,
    )
    .map_err(|e| StorageError::Serialization(e.to_string()))
}

pub fn map_profile_row(row: &SqliteRow) -> Result<Profile, StorageError> {
    let id: String = row.try_get("id").map_err(de)?;
    let user_id: String = row.try_get("user_id").map_err(de)?;
    let full_name: Option<String> = row.try_get("full_name").map_err(de)?;
    let avatar_url: Option<String> = row.try_get("avatar_url").map_err(de)?;
    let target_role: Option<String> = row.try_get("target_role").map_err(de)?;
    let experience_level: Option<String> = row.try_get("experience_level").map_err(de)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(de)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(de)?;

    let fields = ProfileFields {
        full_name,
        avatar_url: avatar_url
            .map(|raw| {
                interview_core::model::AvatarUrl::new(&raw)
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .transpose()?,
        target_role,
        experience_level: experience_level
            .map(|raw| parse(&raw, "experience level"))
            .transpose()?,
    };

    Profile::from_persisted(
        parse::<ProfileId>(&id, "profile id")?,
        parse::<UserId>(&user_id, "user id")?,
        fields,
        created_at,
        updated_at,
    )
    .map_err(|e| StorageError::Serialization(e.to_string()))
}

pub fn map_session_row(row: &SqliteRow) -> Result<PracticeSessionRecord, StorageError> {
    let id: String = row.try_get("id").map_err(de)?;
    let user_id: String = row.try_get("user_id").map_err(de)?;
    let category: Option<String> = row.try_get("category").map_err(de)?;
    let total: i64 = row.try_get("total_questions").map_err(de)?;
    let completed: i64 = row.try_get("completed_questions").map_err(de)?;
    let average_score: Option<f64> = row.try_get("average_score").map_err(de)?;
    let started_at: DateTime<Utc> = row.try_get("started_at").map_err(de)?;
    let completed_at: Option<DateTime<Utc>> = row.try_get("completed_at").map_err(de)?;
    let duration: Option<i64> = row.try_get("duration_seconds").map_err(de)?;

    PracticeSessionRecord::from_persisted(
        parse::<SessionId>(&id, "session id")?,
        parse::<UserId>(&user_id, "user id")?,
        category.map(|raw| parse(&raw, "category")).transpose()?,
        count_u32(total, "total_questions")?,
        count_u32(completed, "completed_questions")?,
        average_score,
        started_at,
        completed_at,
        optional_u32(duration, "duration_seconds")?,
    )
    .map_err(|e| StorageError::Serialization(e.to_string()))
}

pub fn map_response_row(row: &SqliteRow) -> Result<SessionResponseRecord, StorageError> {
    let id: String = row.try_get("id").map_err(de)?;
    let session_id: String = row.try_get("session_id").map_err(de)?;
    let question_id: String = row.try_get("question_id").map_err(de)?;
    let answer: Option<String> = row.try_get("user_answer").map_err(de)?;
    let score: Option<f64> = row.try_get("score").map_err(de)?;
    let feedback: Option<String> = row.try_get("feedback").map_err(de)?;
    let time_taken: Option<i64> = row.try_get("time_taken_seconds").map_err(de)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(de)?;

    Ok(SessionResponseRecord::new(
        parse::<ResponseId>(&id, "response id")?,
        parse::<SessionId>(&session_id, "session id")?,
        parse::<QuestionId>(&question_id, "question id")?,
        answer,
        score,
        feedback,
        optional_u32(time_taken, "time_taken_seconds")?,
        created_at,
    ))
}

pub fn map_metrics_row(row: &SqliteRow) -> Result<PerformanceMetrics, StorageError> {
    let id: String = row.try_get("id").map_err(de)?;
    let user_id: String = row.try_get("user_id").map_err(de)?;
    let metric_date: NaiveDate = row.try_get("metric_date").map_err(de)?;
    let total_sessions: i64 = row.try_get("total_sessions").map_err(de)?;
    let total_questions: i64 = row.try_get("total_questions_answered").map_err(de)?;
    let average_score: Option<f64> = row.try_get("average_score").map_err(de)?;
    let hr_score: Option<f64> = row.try_get("hr_score").map_err(de)?;
    let technical_score: Option<f64> = row.try_get("technical_score").map_err(de)?;
    let behavioral_score: Option<f64> = row.try_get("behavioral_score").map_err(de)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(de)?;

    Ok(PerformanceMetrics::new(
        parse::<MetricsId>(&id, "metrics id")?,
        parse::<UserId>(&user_id, "user id")?,
        metric_date,
        count_u32(total_sessions, "total_sessions")?,
        count_u32(total_questions, "total_questions_answered")?,
        average_score,
        hr_score,
        technical_score,
        behavioral_score,
        created_at,
    ))
}
