//! Grammar combinators, productions and validation

pub mod matcher;
pub mod production;
pub mod rule;
pub mod validate;

pub use matcher::Matcher;
pub use production::{Production, ProductionDef, ProductionRegistry};
pub use rule::{GrammarRule, Terminal};
pub use validate::{nullable_productions, validate};
