pub mod config;
pub mod error;
pub mod indent;
pub mod job;
pub mod logging;
pub mod placeholder;
pub mod substitute;

pub use config::{Config, MissingPlaceholder};
pub use error::{ReplaceError, Result};
pub use job::ReplaceJob;
pub use placeholder::{PLACEHOLDER_PATTERN, PlaceholderMatch};
pub use substitute::{Outcome, Substitution, substitute};
