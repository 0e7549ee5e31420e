//! pathway-engine
//!
//! Adaptive questionnaire traversal. Pure and synchronous: no I/O and
//! no shared state. Validates submitted responses against their
//! question's variant, evaluates relation predicates, computes successor
//! questions, and checks relation batches before they are committed.

pub mod batch;
pub mod error;
pub mod predicate;
pub mod traversal;
pub mod validate;

use pathway_core::models::QuestionId;
use pathway_core::models::question::{Question, QuestionType};
use pathway_core::models::response::{AcceptedResponse, ResponseValue};

use error::EngineError;

pub use batch::{validate_relation_batch, QuestionLookup};
pub use predicate::matches;
pub use traversal::next_questions;
pub use validate::{validate, validate_as};

/// The outcome of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub response: AcceptedResponse,
    /// Successors in relation declaration order. Empty when no relation
    /// matched.
    pub next: Vec<QuestionId>,
}

/// Validate `raw` against `question`, then route the accepted response.
pub fn respond(question: &Question, raw: &ResponseValue) -> Result<Step, EngineError> {
    let response = validate(question, raw)?;
    let next = next_questions(question, &response)?;
    Ok(Step { response, next })
}

/// [`respond`] for a submission channel that serves only `accepted` types.
pub fn respond_as(
    question: &Question,
    raw: &ResponseValue,
    accepted: &[QuestionType],
    answered_as: &'static str,
) -> Result<Step, EngineError> {
    let response = validate_as(question, raw, accepted, answered_as)?;
    let next = next_questions(question, &response)?;
    Ok(Step { response, next })
}
