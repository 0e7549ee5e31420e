pub mod question;
pub mod questionnaire;
pub mod relation;
pub mod response;
pub mod user;

pub type UserId = i64;
pub type QuestionnaireId = i64;
pub type QuestionId = i64;
