use std::collections::BTreeSet;

use pathway_core::models::question::{Question, QuestionKind, QuestionOption, QuestionType};
use pathway_core::models::relation::{Predicate, PredicateKind, QuestionRelation};
use pathway_core::models::response::{AcceptedResponse, ResponseValue};
use pathway_engine::error::{EngineError, RelationError, ResponseError};
use pathway_engine::{matches, next_questions, respond, validate};

fn multiple_choice(id: i64, values: &[&str]) -> Question {
    let options = values.iter().map(|v| QuestionOption::new(*v, *v)).collect();
    Question::new(
        id,
        1,
        "Select all that apply",
        QuestionKind::from_parts(QuestionType::MultipleChoice, Some(options)).unwrap(),
    )
}

fn selection(values: &[&str]) -> AcceptedResponse {
    AcceptedResponse::MultipleChoice(values.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>())
}

#[test]
fn boolean_equals_true_routes_only_on_true() {
    let question = Question::new(1, 1, "Smoker?", QuestionKind::Boolean)
        .with_relation(Predicate::Equals("true".into()), 7);

    assert_eq!(next_questions(&question, &AcceptedResponse::Boolean(true)), Ok(vec![7]));
    assert_eq!(next_questions(&question, &AcceptedResponse::Boolean(false)), Ok(vec![]));
}

#[test]
fn includes_tests_membership_not_set_equality() {
    let question = multiple_choice(1, &["a", "b", "c"])
        .with_relation(Predicate::Includes("b".into()), 3);

    assert_eq!(next_questions(&question, &selection(&["a", "b"])), Ok(vec![3]));
    assert_eq!(next_questions(&question, &selection(&["a", "c"])), Ok(vec![]));
    assert_eq!(next_questions(&question, &selection(&[])), Ok(vec![]));
}

#[test]
fn text_equals_is_case_sensitive() {
    let question = Question::new(1, 1, "Say yes", QuestionKind::Text)
        .with_relation(Predicate::Equals("yes".into()), 2);

    assert_eq!(next_questions(&question, &AcceptedResponse::Text("yes".into())), Ok(vec![2]));
    assert_eq!(next_questions(&question, &AcceptedResponse::Text("Yes".into())), Ok(vec![]));
    assert_eq!(next_questions(&question, &AcceptedResponse::Text("yes ".into())), Ok(vec![]));
}

#[test]
fn text_equals_true_matches_text_true() {
    let question = Question::new(1, 1, "Anything", QuestionKind::Text)
        .with_relation(Predicate::Equals("true".into()), 2);
    assert_eq!(next_questions(&question, &AcceptedResponse::Text("true".into())), Ok(vec![2]));
}

#[test]
fn matching_targets_keep_declaration_order() {
    let question = multiple_choice(1, &["a", "b"])
        .with_relation(Predicate::Includes("b".into()), 9)
        .with_relation(Predicate::Includes("a".into()), 4)
        .with_relation(Predicate::Includes("b".into()), 5);

    assert_eq!(next_questions(&question, &selection(&["a", "b"])), Ok(vec![9, 4, 5]));
}

#[test]
fn duplicate_targets_are_not_collapsed() {
    let question = multiple_choice(1, &["a", "b"])
        .with_relation(Predicate::Includes("a".into()), 6)
        .with_relation(Predicate::Includes("b".into()), 6);

    assert_eq!(next_questions(&question, &selection(&["a", "b"])), Ok(vec![6, 6]));
}

#[test]
fn traversal_is_deterministic() {
    let question = multiple_choice(1, &["a", "b", "c"])
        .with_relation(Predicate::Includes("c".into()), 2)
        .with_relation(Predicate::Includes("a".into()), 3);
    let response = selection(&["a", "c"]);

    let first = next_questions(&question, &response).unwrap();
    for _ in 0..10 {
        assert_eq!(next_questions(&question, &response).unwrap(), first);
    }
}

#[test]
fn includes_against_scalar_is_a_mismatch() {
    let relation = QuestionRelation {
        question_id: 1,
        predicate: Predicate::Includes("x".into()),
        next_question_id: 2,
    };
    for response in [
        AcceptedResponse::Text("x".into()),
        AcceptedResponse::SingleChoice("x".into()),
        AcceptedResponse::Boolean(true),
    ] {
        let err = matches(&relation, &response).unwrap_err();
        let RelationError::RelationTypeMismatch { kind, .. } = err;
        assert_eq!(kind, PredicateKind::Includes);
    }
}

#[test]
fn equals_against_set_is_a_mismatch() {
    let question = multiple_choice(1, &["x"])
        .with_relation(Predicate::Equals("x".into()), 2);

    assert_eq!(
        next_questions(&question, &selection(&["x"])),
        Err(RelationError::RelationTypeMismatch {
            question_id: 1,
            next_question_id: 2,
            kind: PredicateKind::Equals,
            response_type: QuestionType::MultipleChoice,
        })
    );
}

#[test]
fn no_relations_means_no_successor() {
    let question = Question::new(1, 1, "Last one", QuestionKind::Text);
    assert_eq!(next_questions(&question, &AcceptedResponse::Text("done".into())), Ok(vec![]));
}

#[test]
fn respond_validates_before_routing() {
    let options = vec![QuestionOption::new("x", "X"), QuestionOption::new("y", "Y")];
    let question = Question::new(
        1,
        1,
        "Pick",
        QuestionKind::from_parts(QuestionType::SingleChoice, Some(options)).unwrap(),
    )
    .with_relation(Predicate::Equals("y".into()), 8);

    let step = respond(&question, &ResponseValue::from("y")).unwrap();
    assert_eq!(step.response, validate(&question, &ResponseValue::from("y")).unwrap());
    assert_eq!(step.next, vec![8]);

    assert_eq!(
        respond(&question, &ResponseValue::from("z")),
        Err(EngineError::Response(ResponseError::UnknownOption {
            question_id: 1,
            value: "z".to_string()
        }))
    );
}
