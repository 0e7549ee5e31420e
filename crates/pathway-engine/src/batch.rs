use std::collections::HashMap;

use pathway_core::catalog::Catalog;
use pathway_core::models::QuestionId;
use pathway_core::models::question::{Question, QuestionKind};
use pathway_core::models::relation::{Predicate, QuestionRelation, RelationInput};

use crate::error::{BatchError, BatchRejection};

/// Read access to the questions a relation batch refers to.
pub trait QuestionLookup {
    fn question(&self, id: QuestionId) -> Option<&Question>;
}

impl QuestionLookup for Catalog {
    fn question(&self, id: QuestionId) -> Option<&Question> {
        Catalog::question(self, id)
    }
}

impl QuestionLookup for HashMap<QuestionId, Question> {
    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.get(&id)
    }
}

impl QuestionLookup for [Question] {
    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.iter().find(|q| q.id == id)
    }
}

/// Check every entry of a relation batch before anything is committed.
///
/// Sources and targets must already exist in `lookup`; a target introduced
/// by another entry of the same batch does not count. The first offending
/// entry rejects the whole batch.
pub fn validate_relation_batch<L>(
    lookup: &L,
    batch: &[RelationInput],
) -> Result<Vec<QuestionRelation>, BatchError>
where
    L: QuestionLookup + ?Sized,
{
    batch
        .iter()
        .enumerate()
        .map(|(index, input)| {
            check_entry(lookup, input).map_err(|reason| BatchError { index, reason })
        })
        .collect()
}

fn check_entry<L>(lookup: &L, input: &RelationInput) -> Result<QuestionRelation, BatchRejection>
where
    L: QuestionLookup + ?Sized,
{
    let predicate = predicate_of(input)?;

    let source = lookup
        .question(input.question_id)
        .ok_or(BatchRejection::UnknownSource(input.question_id))?;
    if lookup.question(input.next_question_id).is_none() {
        return Err(BatchRejection::UnknownTarget(input.next_question_id));
    }

    let kind = predicate.kind();
    let question_type = source.question_type();
    if !kind.accepts(question_type) {
        return Err(BatchRejection::IncompatiblePredicate {
            kind,
            question_type,
        });
    }

    let value = predicate.value();
    match source.kind() {
        QuestionKind::MultipleChoice { options } | QuestionKind::SingleChoice { options }
            if !options.contains(value) =>
        {
            return Err(BatchRejection::UnknownOption {
                question_id: source.id,
                value: value.to_string(),
            });
        }
        QuestionKind::Boolean if value != "true" && value != "false" => {
            return Err(BatchRejection::NotABooleanLiteral(value.to_string()));
        }
        _ => {}
    }

    Ok(QuestionRelation {
        question_id: input.question_id,
        predicate,
        next_question_id: input.next_question_id,
    })
}

fn predicate_of(input: &RelationInput) -> Result<Predicate, BatchRejection> {
    match (&input.includes, &input.equals) {
        (Some(token), None) => Ok(Predicate::Includes(token.clone())),
        (None, Some(value)) => Ok(Predicate::Equals(value.clone())),
        (Some(_), Some(_)) => Err(BatchRejection::ConflictingPredicates),
        (None, None) => Err(BatchRejection::MissingPredicate),
    }
}
