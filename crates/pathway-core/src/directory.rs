//! The identity document: users, their credential digests, open sessions
//! and doctor-patient assignments.

use std::collections::{BTreeMap, BTreeSet};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::user::{Role, User, UserUpdate};
use crate::models::UserId;

/// How long a session token stays valid after it is issued.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_secs(7 * 24 * 60 * 60);

/// A salted password digest. The hashing scheme lives in `pathway-auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub salt: String,
    pub digest: String,
    pub iterations: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    user_id: UserId,
    issued_at: Timestamp,
}

impl Session {
    fn is_live(&self, at: Timestamp) -> bool {
        at.duration_since(self.issued_at) < SESSION_TTL
    }
}

/// A patient in a doctor's care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub doctor_id: UserId,
    pub patient_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    user: User,
    credential: Credential,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    #[serde(default)]
    last_user_id: UserId,
    #[serde(default)]
    accounts: BTreeMap<UserId, Account>,
    /// Opaque bearer token -> session.
    #[serde(default)]
    sessions: BTreeMap<String, Session>,
    #[serde(default)]
    assignments: BTreeSet<Assignment>,
}

impl Directory {
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.accounts.get(&id).map(|a| &a.user)
    }

    pub fn users(&self) -> Vec<User> {
        self.accounts.values().map(|a| a.user.clone()).collect()
    }

    pub fn find_by_email(&self, email: &str) -> Option<(&User, &Credential)> {
        self.accounts
            .values()
            .find(|a| a.user.email == email)
            .map(|a| (&a.user, &a.credential))
    }

    pub fn create_user(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        credential: Credential,
        joined_at: Timestamp,
    ) -> Result<User, CoreError> {
        let email = email.into();
        if self.find_by_email(&email).is_some() {
            return Err(CoreError::DuplicateEmail(email));
        }

        self.last_user_id += 1;
        let user = User {
            id: self.last_user_id,
            name: name.into(),
            email,
            role,
            join_date: joined_at,
            last_visit: None,
            adherence: None,
            image_url: None,
            birthday: None,
        };
        self.accounts.insert(
            user.id,
            Account {
                user: user.clone(),
                credential,
            },
        );
        Ok(user)
    }

    pub fn update_user(&mut self, id: UserId, update: UserUpdate) -> Result<User, CoreError> {
        if let Some(email) = &update.email
            && self
                .find_by_email(email)
                .is_some_and(|(other, _)| other.id != id)
        {
            return Err(CoreError::DuplicateEmail(email.clone()));
        }

        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(CoreError::UserNotFound(id))?;
        account.user.apply(update);
        Ok(account.user.clone())
    }

    /// Record a new session token for `user_id` and stamp the visit time.
    /// Sessions that have outlived [`SESSION_TTL`] are dropped.
    pub fn open_session(
        &mut self,
        token: impl Into<String>,
        user_id: UserId,
        at: Timestamp,
    ) -> Result<(), CoreError> {
        let account = self
            .accounts
            .get_mut(&user_id)
            .ok_or(CoreError::UserNotFound(user_id))?;
        account.user.last_visit = Some(at);
        self.sessions.retain(|_, session| session.is_live(at));
        self.sessions.insert(
            token.into(),
            Session {
                user_id,
                issued_at: at,
            },
        );
        Ok(())
    }

    /// Remove a session token. Returns whether it existed.
    pub fn close_session(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// The user behind `token`, if the session is still live at `at`.
    pub fn user_for_token(&self, token: &str, at: Timestamp) -> Option<&User> {
        self.sessions
            .get(token)
            .filter(|session| session.is_live(at))
            .and_then(|session| self.user(session.user_id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Put `patient_id` in the care of `doctor_id`. Returns `false` if the
    /// assignment already existed.
    pub fn assign(&mut self, doctor_id: UserId, patient_id: UserId) -> Result<bool, CoreError> {
        self.expect_role(doctor_id, Role::Doctor)?;
        self.expect_role(patient_id, Role::Patient)?;
        Ok(self.assignments.insert(Assignment {
            doctor_id,
            patient_id,
        }))
    }

    /// Returns whether the assignment existed.
    pub fn unassign(&mut self, doctor_id: UserId, patient_id: UserId) -> bool {
        self.assignments.remove(&Assignment {
            doctor_id,
            patient_id,
        })
    }

    pub fn patients_of(&self, doctor_id: UserId) -> Vec<User> {
        self.assignments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .filter_map(|a| self.user(a.patient_id).cloned())
            .collect()
    }

    pub fn doctors_of(&self, patient_id: UserId) -> Vec<User> {
        self.assignments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .filter_map(|a| self.user(a.doctor_id).cloned())
            .collect()
    }

    fn expect_role(&self, user_id: UserId, expected: Role) -> Result<(), CoreError> {
        let user = self.user(user_id).ok_or(CoreError::UserNotFound(user_id))?;
        if user.role != expected {
            return Err(CoreError::UnexpectedRole {
                user_id,
                expected,
                actual: user.role,
            });
        }
        Ok(())
    }
}
