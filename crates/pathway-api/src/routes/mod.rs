pub mod assignments;
pub mod health;
pub mod questionnaires;
pub mod questions;
pub mod relations;
pub mod responses;
pub mod session;
pub mod users;
