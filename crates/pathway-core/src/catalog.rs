//! The authoring document: every questionnaire and question, with relations.
//!
//! The catalog is persisted as one JSON document so that a multi-question
//! change (a new questionnaire, a relation batch) is committed by a single
//! write or not at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::question::Question;
use crate::models::questionnaire::{NewQuestion, Questionnaire, QuestionDraft};
use crate::models::relation::QuestionRelation;
use crate::models::{QuestionId, QuestionnaireId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    last_questionnaire_id: QuestionnaireId,
    #[serde(default)]
    last_question_id: QuestionId,
    #[serde(default)]
    questionnaires: BTreeMap<QuestionnaireId, QuestionnaireEntry>,
    #[serde(default)]
    questions: BTreeMap<QuestionId, Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionnaireEntry {
    title: String,
    question_ids: Vec<QuestionId>,
}

impl Catalog {
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(&id)
    }

    pub fn questionnaire(&self, id: QuestionnaireId) -> Option<Questionnaire> {
        self.questionnaires
            .get(&id)
            .map(|entry| self.assemble(id, entry))
    }

    pub fn questionnaires(&self) -> Vec<Questionnaire> {
        self.questionnaires
            .iter()
            .map(|(id, entry)| self.assemble(*id, entry))
            .collect()
    }

    fn assemble(&self, id: QuestionnaireId, entry: &QuestionnaireEntry) -> Questionnaire {
        Questionnaire {
            id,
            title: entry.title.clone(),
            questions: entry
                .question_ids
                .iter()
                .filter_map(|qid| self.questions.get(qid).cloned())
                .collect(),
        }
    }

    /// Create a questionnaire together with its initial questions.
    ///
    /// Every draft is checked before any id is allocated.
    pub fn create_questionnaire(
        &mut self,
        title: impl Into<String>,
        drafts: Vec<QuestionDraft>,
    ) -> Result<Questionnaire, CoreError> {
        let parts = drafts
            .into_iter()
            .map(QuestionDraft::into_parts)
            .collect::<Result<Vec<_>, _>>()?;

        self.last_questionnaire_id += 1;
        let questionnaire_id = self.last_questionnaire_id;

        let mut question_ids = Vec::with_capacity(parts.len());
        for (text, kind) in parts {
            self.last_question_id += 1;
            let question = Question::new(self.last_question_id, questionnaire_id, text, kind);
            question_ids.push(question.id);
            self.questions.insert(question.id, question);
        }

        let entry = QuestionnaireEntry {
            title: title.into(),
            question_ids,
        };
        let questionnaire = self.assemble(questionnaire_id, &entry);
        self.questionnaires.insert(questionnaire_id, entry);
        Ok(questionnaire)
    }

    /// Append questions to existing questionnaires. All-or-nothing.
    pub fn add_questions(&mut self, new: Vec<NewQuestion>) -> Result<Vec<Question>, CoreError> {
        let mut parts = Vec::with_capacity(new.len());
        for item in new {
            if !self.questionnaires.contains_key(&item.questionnaire_id) {
                return Err(CoreError::QuestionnaireNotFound(item.questionnaire_id));
            }
            let (text, kind) = item.draft.into_parts()?;
            parts.push((item.questionnaire_id, text, kind));
        }

        let mut created = Vec::with_capacity(parts.len());
        for (questionnaire_id, text, kind) in parts {
            self.last_question_id += 1;
            let question = Question::new(self.last_question_id, questionnaire_id, text, kind);
            if let Some(entry) = self.questionnaires.get_mut(&questionnaire_id) {
                entry.question_ids.push(question.id);
            }
            self.questions.insert(question.id, question.clone());
            created.push(question);
        }
        Ok(created)
    }

    /// Append already-validated relations to their source questions, in order.
    ///
    /// Fails without changing anything if a source question is missing.
    pub fn attach_relations(&mut self, relations: Vec<QuestionRelation>) -> Result<(), CoreError> {
        if let Some(missing) = relations
            .iter()
            .find(|r| !self.questions.contains_key(&r.question_id))
        {
            return Err(CoreError::QuestionNotFound(missing.question_id));
        }

        for relation in relations {
            let source = self
                .questions
                .get_mut(&relation.question_id)
                .ok_or(CoreError::QuestionNotFound(relation.question_id))?;
            source.push_relation(relation)?;
        }
        Ok(())
    }
}
