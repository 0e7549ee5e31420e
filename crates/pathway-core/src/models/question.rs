use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::relation::{Predicate, QuestionRelation};
use super::{QuestionId, QuestionnaireId};
use crate::error::CoreError;

/// The type tag of a question. Always derived from [`QuestionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum QuestionType {
    /// Single input.
    Text,
    /// Checkbox, e.g. "Select all that apply".
    MultipleChoice,
    /// Radio group, e.g. "Choose the best answer".
    SingleChoice,
    Boolean,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "TEXT",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::SingleChoice => "SINGLE_CHOICE",
            QuestionType::Boolean => "BOOLEAN",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::SingleChoice)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionOption {
    /// Canonical token referenced by responses and relation predicates.
    pub value: String,
    /// Display text.
    pub text: String,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// A non-empty, ordered option list whose values are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QuestionOption>", into = "Vec<QuestionOption>")]
pub struct OptionSet(Vec<QuestionOption>);

impl OptionSet {
    pub fn new(options: Vec<QuestionOption>) -> Result<Self, CoreError> {
        if options.is_empty() {
            return Err(CoreError::EmptyOptions);
        }
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.value.as_str()) {
                return Err(CoreError::DuplicateOptionValue(option.value.clone()));
            }
        }
        Ok(Self(options))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|o| o.value == value)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|o| o.value.as_str())
    }

    pub fn as_slice(&self) -> &[QuestionOption] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<QuestionOption>> for OptionSet {
    type Error = CoreError;

    fn try_from(options: Vec<QuestionOption>) -> Result<Self, Self::Error> {
        Self::new(options)
    }
}

impl From<OptionSet> for Vec<QuestionOption> {
    fn from(set: OptionSet) -> Self {
        set.0
    }
}

/// The four question variants. Options exist only on the choice variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    Text,
    MultipleChoice { options: OptionSet },
    SingleChoice { options: OptionSet },
    Boolean,
}

impl QuestionKind {
    /// Build a variant from an authoring draft's type tag and optional options.
    ///
    /// Options supplied for a TEXT or BOOLEAN question are rejected rather
    /// than dropped.
    pub fn from_parts(
        question_type: QuestionType,
        options: Option<Vec<QuestionOption>>,
    ) -> Result<Self, CoreError> {
        match question_type {
            QuestionType::Text | QuestionType::Boolean => {
                if options.is_some_and(|o| !o.is_empty()) {
                    return Err(CoreError::TypeMismatch { question_type });
                }
                Ok(if question_type == QuestionType::Text {
                    QuestionKind::Text
                } else {
                    QuestionKind::Boolean
                })
            }
            QuestionType::MultipleChoice | QuestionType::SingleChoice => {
                let options = match options {
                    Some(options) if !options.is_empty() => OptionSet::new(options)?,
                    _ => return Err(CoreError::MissingOptions { question_type }),
                };
                Ok(if question_type == QuestionType::MultipleChoice {
                    QuestionKind::MultipleChoice { options }
                } else {
                    QuestionKind::SingleChoice { options }
                })
            }
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Text => QuestionType::Text,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::SingleChoice { .. } => QuestionType::SingleChoice,
            QuestionKind::Boolean => QuestionType::Boolean,
        }
    }

    pub fn options(&self) -> Option<&OptionSet> {
        match self {
            QuestionKind::MultipleChoice { options } | QuestionKind::SingleChoice { options } => {
                Some(options)
            }
            QuestionKind::Text | QuestionKind::Boolean => None,
        }
    }
}

/// A question of any variant plus its outgoing relations.
///
/// The variant is fixed at construction; there is no way to change a
/// question's kind (and so its type tag) afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub questionnaire_id: QuestionnaireId,
    /// The question text the user sees.
    pub text: String,
    #[serde(flatten)]
    kind: QuestionKind,
    #[serde(default)]
    next: Vec<QuestionRelation>,
}

impl Question {
    pub fn new(
        id: QuestionId,
        questionnaire_id: QuestionnaireId,
        text: impl Into<String>,
        kind: QuestionKind,
    ) -> Self {
        Self {
            id,
            questionnaire_id,
            text: text.into(),
            kind,
            next: Vec::new(),
        }
    }

    /// Append a relation whose source is this question.
    pub fn with_relation(mut self, predicate: Predicate, next_question_id: QuestionId) -> Self {
        self.next.push(QuestionRelation {
            question_id: self.id,
            predicate,
            next_question_id,
        });
        self
    }

    pub fn push_relation(&mut self, relation: QuestionRelation) -> Result<(), CoreError> {
        if relation.question_id != self.id {
            return Err(CoreError::RelationSourceMismatch {
                question_id: self.id,
                relation_source: relation.question_id,
            });
        }
        self.next.push(relation);
        Ok(())
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Option list of a choice question. Asking a TEXT or BOOLEAN question
    /// for its options is a caller bug and fails with `TypeMismatch`.
    pub fn options(&self) -> Result<&OptionSet, CoreError> {
        self.kind.options().ok_or(CoreError::TypeMismatch {
            question_type: self.question_type(),
        })
    }

    /// Outgoing relations in declaration order.
    pub fn next(&self) -> &[QuestionRelation] {
        &self.next
    }
}
