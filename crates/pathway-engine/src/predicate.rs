use pathway_core::models::relation::{Predicate, QuestionRelation};
use pathway_core::models::response::AcceptedResponse;

use crate::error::RelationError;

/// Decide whether `response` satisfies `relation`'s predicate.
///
/// `includes` tests membership of one token in a MULTIPLE_CHOICE selection.
/// `equals` compares a scalar exactly; a boolean compares as `"true"` or
/// `"false"`. Any other pairing is an authoring error, never a non-match.
pub fn matches(relation: &QuestionRelation, response: &AcceptedResponse) -> Result<bool, RelationError> {
    match (&relation.predicate, response) {
        (Predicate::Includes(token), AcceptedResponse::MultipleChoice(selected)) => {
            Ok(selected.contains(token))
        }
        (Predicate::Equals(expected), AcceptedResponse::Text(value))
        | (Predicate::Equals(expected), AcceptedResponse::SingleChoice(value)) => {
            Ok(expected == value)
        }
        (Predicate::Equals(expected), AcceptedResponse::Boolean(value)) => {
            Ok(expected == canonical_bool(*value))
        }
        (predicate, response) => Err(RelationError::RelationTypeMismatch {
            question_id: relation.question_id,
            next_question_id: relation.next_question_id,
            kind: predicate.kind(),
            response_type: response.question_type(),
        }),
    }
}

pub(crate) fn canonical_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
