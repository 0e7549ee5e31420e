use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionKind, QuestionOption, QuestionType};
use super::QuestionnaireId;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub id: QuestionnaireId,
    pub title: String,
    pub questions: Vec<Question>,
}

/// An authoring request for one question, before its type is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<Vec<QuestionOption>>,
}

impl QuestionDraft {
    pub fn into_parts(self) -> Result<(String, QuestionKind), CoreError> {
        let kind = QuestionKind::from_parts(self.question_type, self.options)?;
        Ok((self.text, kind))
    }
}

/// A draft appended to an existing questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub questionnaire_id: QuestionnaireId,
    #[serde(flatten)]
    pub draft: QuestionDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestionnaire {
    pub title: String,
    pub questions: Vec<QuestionDraft>,
}
