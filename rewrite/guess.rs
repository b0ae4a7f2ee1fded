//! Guess the head instances of a rewritten rule.

use decouple_syntax::*;

use crate::combinations::{assignments, Assignment};
use crate::context::RuleContext;
use crate::domain::Domains;

/// A single choice over the head's instances: compact
/// (`{p(X) : dom(X)}`), or fully enumerated (`{p(1); p(2)}`).
/// Constraints have nothing to guess.
pub fn guess(context: &RuleContext, domains: &Domains, ground_guess: bool) -> Option<Rule> {
    let head = context.head()?;
    let vars = context.head_variables();
    let elements = if ground_guess {
        let var_domains = context.domains(domains, &vars);
        assignments(&vars, &var_domains)
            .map(|assignment| ChoiceElement::new(context.atom(head, &assignment), []))
            .collect::<Vec<_>>()
    } else {
        vec![ChoiceElement::new(
            context.atom(head, &Assignment::new()),
            vars.iter()
                .map(|&v| domains.domain_literal(context.variable(v))),
        )]
    };
    if elements.is_empty() {
        return None;
    }
    Some(Rule::new(Head::Choice(Choice::new(elements, None)), []))
}
