mod checker;
mod error;
mod path;
mod rule_set;

#[allow(unused_imports)]
pub use {checker::*, error::*, path::*, rule_set::*};
