use pathway_core::models::QuestionId;
use pathway_core::models::question::Question;
use pathway_core::models::response::AcceptedResponse;

use crate::error::RelationError;
use crate::predicate::matches;

/// Targets of every relation of `question` that `response` satisfies.
///
/// Relations are evaluated in declaration order and targets are kept in
/// that order, duplicates included. No default successor is invented when
/// nothing matches. The first mismatched relation aborts the traversal.
pub fn next_questions(
    question: &Question,
    response: &AcceptedResponse,
) -> Result<Vec<QuestionId>, RelationError> {
    let mut next = Vec::new();
    for relation in question.next() {
        if matches(relation, response)? {
            next.push(relation.next_question_id);
        }
    }
    Ok(next)
}
