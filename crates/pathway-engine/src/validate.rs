use std::collections::BTreeSet;

use pathway_core::models::question::{Question, QuestionKind, QuestionType};
use pathway_core::models::response::{AcceptedResponse, ResponseValue};

use crate::error::ResponseError;

/// Check a submitted value against its question's variant and options.
///
/// TEXT accepts any string, including the empty one. MULTIPLE_CHOICE
/// collapses duplicates and accepts the empty selection.
pub fn validate(question: &Question, raw: &ResponseValue) -> Result<AcceptedResponse, ResponseError> {
    match (question.kind(), raw) {
        (QuestionKind::Boolean, ResponseValue::Boolean(value)) => {
            Ok(AcceptedResponse::Boolean(*value))
        }
        (QuestionKind::Text, ResponseValue::Text(value)) => Ok(AcceptedResponse::Text(value.clone())),
        (QuestionKind::SingleChoice { options }, ResponseValue::Text(value)) => {
            if !options.contains(value) {
                return Err(ResponseError::UnknownOption {
                    question_id: question.id,
                    value: value.clone(),
                });
            }
            Ok(AcceptedResponse::SingleChoice(value.clone()))
        }
        (QuestionKind::MultipleChoice { options }, ResponseValue::Choices(values)) => {
            let mut selected = BTreeSet::new();
            for value in values {
                if !options.contains(value) {
                    return Err(ResponseError::UnknownOption {
                        question_id: question.id,
                        value: value.clone(),
                    });
                }
                selected.insert(value.clone());
            }
            Ok(AcceptedResponse::MultipleChoice(selected))
        }
        (kind, raw) => Err(ResponseError::InvalidResponseType {
            question_id: question.id,
            question_type: kind.question_type(),
            expected: expected_shape(kind),
            actual: raw.shape(),
        }),
    }
}

/// [`validate`], restricted to the question types a submission channel
/// serves. `answered_as` names the channel in the rejection.
pub fn validate_as(
    question: &Question,
    raw: &ResponseValue,
    accepted: &[QuestionType],
    answered_as: &'static str,
) -> Result<AcceptedResponse, ResponseError> {
    let question_type = question.question_type();
    if !accepted.contains(&question_type) {
        return Err(ResponseError::QuestionTypeNotAccepted {
            question_id: question.id,
            question_type,
            answered_as,
        });
    }
    validate(question, raw)
}

fn expected_shape(kind: &QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Boolean => "boolean",
        QuestionKind::Text | QuestionKind::SingleChoice { .. } => "string",
        QuestionKind::MultipleChoice { .. } => "list of strings",
    }
}
