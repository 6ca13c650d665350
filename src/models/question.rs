// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

/// Option label (e.g. "A") to option text.
pub type OptionMap = BTreeMap<String, String>;

/// Represents the 'questions' table in the database.
/// The question text is the natural key within an exam.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    /// Surrogate id. Ascending id is the authoritative question order.
    pub id: i64,

    pub exam_id: String,

    /// Owner of the exam, denormalized for ownership checks.
    pub teacher_id: String,

    pub question_text: String,

    /// Labeled choices, stored as a JSON object.
    pub options: Json<OptionMap>,

    /// Label of the correct choice.
    pub correct_option: String,

    pub image_url: Option<String>,
}

/// DTO for sending a question to a student (excludes the correct option).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub question_text: String,
    pub options: OptionMap,
    pub image_url: Option<String>,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        PublicQuestion {
            question_text: q.question_text,
            options: q.options.0,
            image_url: q.image_url,
        }
    }
}
