use pathway_core::error::CoreError;
use pathway_core::models::question::{
    OptionSet, Question, QuestionKind, QuestionOption, QuestionType,
};
use pathway_core::models::relation::Predicate;

fn options(values: &[&str]) -> Vec<QuestionOption> {
    values
        .iter()
        .map(|v| QuestionOption::new(*v, v.to_uppercase()))
        .collect()
}

#[test]
fn type_tag_follows_variant() {
    let kind = QuestionKind::from_parts(QuestionType::SingleChoice, Some(options(&["x", "y"])))
        .unwrap();
    let question = Question::new(1, 1, "Pick one", kind);
    assert_eq!(question.question_type(), QuestionType::SingleChoice);
    assert_eq!(question.options().unwrap().len(), 2);
}

#[test]
fn options_on_text_question_are_rejected() {
    let err = QuestionKind::from_parts(QuestionType::Text, Some(options(&["a"]))).unwrap_err();
    assert_eq!(
        err,
        CoreError::TypeMismatch {
            question_type: QuestionType::Text
        }
    );
}

#[test]
fn reading_options_of_boolean_question_fails_fast() {
    let question = Question::new(1, 1, "Smoker?", QuestionKind::Boolean);
    assert!(matches!(
        question.options(),
        Err(CoreError::TypeMismatch {
            question_type: QuestionType::Boolean
        })
    ));
}

#[test]
fn choice_question_requires_options() {
    let err = QuestionKind::from_parts(QuestionType::MultipleChoice, None).unwrap_err();
    assert_eq!(
        err,
        CoreError::MissingOptions {
            question_type: QuestionType::MultipleChoice
        }
    );

    let err = QuestionKind::from_parts(QuestionType::SingleChoice, Some(vec![])).unwrap_err();
    assert!(matches!(err, CoreError::MissingOptions { .. }));
}

#[test]
fn option_values_must_be_unique() {
    let err = OptionSet::new(options(&["a", "b", "a"])).unwrap_err();
    assert_eq!(err, CoreError::DuplicateOptionValue("a".to_string()));
}

#[test]
fn question_serializes_with_flat_type_tag() {
    let kind = QuestionKind::from_parts(QuestionType::MultipleChoice, Some(options(&["a", "b"])))
        .unwrap();
    let question =
        Question::new(4, 2, "Symptoms", kind).with_relation(Predicate::Includes("b".into()), 9);

    let json = serde_json::to_value(&question).unwrap();
    assert_eq!(json["type"], "MULTIPLE_CHOICE");
    assert_eq!(json["questionnaireId"], 2);
    assert_eq!(json["options"][1]["value"], "b");
    assert_eq!(json["next"][0]["includes"], "b");
    assert_eq!(json["next"][0]["nextQuestionId"], 9);

    let back: Question = serde_json::from_value(json).unwrap();
    assert_eq!(back, question);
}

#[test]
fn deserializing_duplicate_options_fails() {
    let json = serde_json::json!({
        "id": 1,
        "questionnaireId": 1,
        "text": "Pick",
        "type": "SINGLE_CHOICE",
        "options": [
            { "value": "x", "text": "X" },
            { "value": "x", "text": "Also X" }
        ]
    });
    assert!(serde_json::from_value::<Question>(json).is_err());
}

#[test]
fn push_relation_checks_source() {
    let mut question = Question::new(1, 1, "Name?", QuestionKind::Text);
    let foreign = pathway_core::models::relation::QuestionRelation {
        question_id: 2,
        predicate: Predicate::Equals("x".into()),
        next_question_id: 3,
    };
    assert_eq!(
        question.push_relation(foreign),
        Err(CoreError::RelationSourceMismatch {
            question_id: 1,
            relation_source: 2
        })
    );
    assert!(question.next().is_empty());
}
