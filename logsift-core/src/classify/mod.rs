//! Page classification
//!
//! Tags each record's path with a caller-defined category. Rules come in two
//! ordered lists:
//!
//! - `contains_rules`: a category matches when any of its patterns occurs in
//!   the path. Every matching entry overwrites the previous one, so the last
//!   match in list order wins; authors put the most specific rule last.
//! - `exact_rules`: a category matches when the path equals one of its values.
//!   These run after the substring pass and always have the final word.
//!
//! A path no rule touches keeps `page_class` absent.

mod classifier;
mod error;
mod rules;


pub use classifier::*;
pub use error::*;
pub use rules::*;
