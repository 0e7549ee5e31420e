//! pathway-auth
//!
//! Role checks, the per-request caller context, session tokens and
//! password digests.

pub mod context;
pub mod credentials;
pub mod error;
pub mod flows;
pub mod guard;

pub use context::{AuthContext, Caller};
pub use guard::enforce;
