//! Field rules shared by the store and any form layer in front of it.
//!
//! Lengths are counted in characters after trimming surrounding whitespace.
//! The opening message of a thread and later chat messages have different
//! upper bounds (1000 vs 500); both are kept as separate constants.

use std::fmt;

use serde::Serialize;

use crate::models::NewThread;

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 100;
pub const OPENING_MESSAGE_MIN: usize = 10;
pub const OPENING_MESSAGE_MAX: usize = 1000;
pub const CHAT_MESSAGE_MAX: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Category,
    Content,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Category => "category",
            Field::Content => "content",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Empty => f.write_str("is required"),
            Problem::TooShort { min } => write!(f, "must be at least {min} characters"),
            Problem::TooLong { max } => write!(f, "must be at most {max} characters"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub problem: Problem,
}

/// Every failing field of a single command, in field order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid input: {}", summary(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn has(&self, field: Field) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }

    pub fn problem(&self, field: Field) -> Option<Problem> {
        self.fields.iter().find(|e| e.field == field).map(|e| e.problem)
    }
}

fn summary(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{} {}", e.field, e.problem))
        .collect::<Vec<_>>()
        .join("; ")
}

fn check_len(field: Field, value: &str, min: usize, max: usize) -> Option<FieldError> {
    let len = value.trim().chars().count();
    let problem = if len == 0 {
        Problem::Empty
    } else if len < min {
        Problem::TooShort { min }
    } else if len > max {
        Problem::TooLong { max }
    } else {
        return None;
    };
    Some(FieldError { field, problem })
}

fn finish(fields: Vec<FieldError>) -> Result<(), ValidationError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { fields })
    }
}

pub fn validate_new_thread(new: &NewThread) -> Result<(), ValidationError> {
    let mut fields = Vec::new();
    fields.extend(check_len(Field::Title, &new.title, TITLE_MIN, TITLE_MAX));
    if new.category.trim().is_empty() {
        fields.push(FieldError { field: Field::Category, problem: Problem::Empty });
    }
    fields.extend(check_len(
        Field::Content,
        &new.opening_message,
        OPENING_MESSAGE_MIN,
        OPENING_MESSAGE_MAX,
    ));
    finish(fields)
}

pub fn validate_chat_message(content: &str) -> Result<(), ValidationError> {
    finish(check_len(Field::Content, content, 1, CHAT_MESSAGE_MAX).into_iter().collect())
}
