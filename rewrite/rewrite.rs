//! Body-decoupled grounding: rewrite the rules of selected program
//! sections into a disjunctive "guess and check" encoding whose ground
//! size does not multiply out over every variable combination of a rule.
//!
//! Each non-ground rule `h :- b_1, ..., b_n` in a rewritten section
//! contributes, in order:
//!
//! 1. a per-variable domain guess with saturation on `sat`,
//! 2. derivations of a rule-local flag `sat_r<n>` from every binding
//!    that falsifies the body (or satisfies the head),
//! 3. a choice over the head's instances,
//! 4. existence constraints for the body-only variables,
//! 5. `r<n>_unfound` witnesses for bindings under which the rule
//!    fails to support a head instance.
//!
//! Once all rules are done, `sat` is closed over the rule-local flags,
//! and a `#sum` denial per registered head instance forbids it to be
//! true while every rule that could derive it is unfounded. Rules in a
//! `normal` section additionally justify their heads along a guessed
//! acyclic order, which rules out circular self-support.
//!
//! The passes are independent of surface syntax: they build
//! [statements](Statement), and a [`Builder`] decides where those go.

mod collectors;
mod combinations;
mod context;
mod domain;
mod driver;
mod graph;
mod guess;
mod normal;
mod output;
mod registry;
mod sat;
mod unfound;

use thiserror::Error;

use decouple_syntax::*;

pub use context::RuleContext;
pub use domain::{Domains, Instance};
pub use driver::{Options, Rewriter};
pub use output::Builder;
pub use registry::{Registry, RuleId};

/// Things that abort a rewrite. There is no partial output: every
/// rule is checked before the first statement is built.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RewriteError {
    #[error("malformed syntax tree: {0}")]
    MalformedAst(String),

    #[error("unsupported comparison operator `{0}`")]
    UnsupportedOperator(String),
}

impl From<SyntaxError> for RewriteError {
    fn from(error: SyntaxError) -> Self {
        match error {
            SyntaxError::UnknownOperator(op) => Self::UnsupportedOperator(op),
        }
    }
}
