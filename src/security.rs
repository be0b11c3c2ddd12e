//! SQL injection screening: pattern rules and structural validation.

mod keywords;
mod rules;
mod validator;

pub use keywords::{keyword_cluster, keyword_variants};
pub use rules::{Rule, RuleSet};
pub use validator::Validator;
