//! Create/edit forms.
//!
//! Every form checks its input locally first; a failed check raises an
//! "Incomplete information" notice and nothing is sent. Forms that carry
//! images upload them before writing the record and discard them again if
//! the write fails.

mod broker;
mod login;
mod password;
mod project;
mod property;
pub mod validation;

pub use broker::BrokerForm;
pub use login::{LoginForm, INVALID_CREDENTIALS};
pub use password::{PasswordReset, ResetStep};
pub use project::ProjectForm;
pub use property::PropertyForm;
