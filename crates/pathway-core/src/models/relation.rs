use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::QuestionId;
use super::question::QuestionType;

/// The condition guarding a relation.
///
/// Serialized externally tagged, so a relation reads `{"includes": "b"}` or
/// `{"equals": "true"}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Predicate {
    /// Set membership against a MULTIPLE_CHOICE response.
    Includes(String),
    /// Scalar equality against a TEXT, SINGLE_CHOICE or BOOLEAN response.
    Equals(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Includes,
    Equals,
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateKind::Includes => f.write_str("includes"),
            PredicateKind::Equals => f.write_str("equals"),
        }
    }
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Includes(_) => PredicateKind::Includes,
            Predicate::Equals(_) => PredicateKind::Equals,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Predicate::Includes(v) | Predicate::Equals(v) => v,
        }
    }
}

impl PredicateKind {
    /// Whether a predicate of this kind may guard a relation leaving a
    /// question of `question_type`.
    pub fn accepts(&self, question_type: QuestionType) -> bool {
        match self {
            PredicateKind::Includes => question_type == QuestionType::MultipleChoice,
            PredicateKind::Equals => matches!(
                question_type,
                QuestionType::SingleChoice | QuestionType::Boolean | QuestionType::Text
            ),
        }
    }
}

/// A conditional edge from one question to its successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRelation {
    pub question_id: QuestionId,
    #[serde(flatten)]
    pub predicate: Predicate,
    pub next_question_id: QuestionId,
}

/// A relation as submitted for creation, before its predicate is checked.
///
/// Exactly one of `includes` / `equals` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RelationInput {
    pub question_id: QuestionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    pub next_question_id: QuestionId,
}
