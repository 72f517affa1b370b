//! Operator selection of areas, themes and locales.
//!
//! Each entity kind takes an include list (default `["all"]`) and an
//! exclude list (default `["none"]`). At most one of them may be narrowed.
//! [`EntityFilter::plan`] validates all three kinds and produces the
//! [`DeployPlan`] the work enumerator consumes.

mod resolver;
mod types;
mod validator;

pub use resolver::{EntityFilter, SelectionError};
pub use types::{DeployPlan, Selection, SelectionSpec, EXCLUDE_NONE, INCLUDE_ALL};
pub use validator::{LocaleCodeValidator, LocaleValidator};
