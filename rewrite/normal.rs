//! Acyclic justification for normal programs.
//!
//! The unfound witnesses alone accept atoms that support each other in
//! a cycle (e.g., `p :- q.` and `q :- p.` with both guessed true). In a
//! `normal` section we also guess a strict total order over the ground
//! head instances and require every positive body atom to precede the
//! head it supports; a cycle can't respect any such order.

use indexmap::IndexSet;

use decouple_syntax::*;
use decouple_tracer::*;

use crate::domain::{Domains, Instance};
use crate::registry::{unfound_atom, RuleId};

/// The ground head instances ordered by `_prec/2`.
#[derive(Clone, Debug, Default)]
pub struct Precedence {
    instances: IndexSet<Instance>,
}

impl Precedence {
    /// Every non-fact ground instance of the head of every rule in a
    /// `normal` section.
    pub fn collect(sections: &[Section], domains: &Domains, trace: Trace) -> Self {
        let instances = sections
            .iter()
            .filter(|s| s.kind == SectionKind::Normal)
            .flat_map(|s| s.rules())
            .filter_map(|r| r.head.atom())
            .flat_map(|atom| domains.instances(atom))
            .filter(|i| !domains.is_fact(i))
            .collect::<IndexSet<_>>();
        trace!(
            trace,
            Order,
            "Ordered instances: {{{}}}",
            instances
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self { instances }
    }

    pub fn contains(&self, instance: &Instance) -> bool {
        self.instances.contains(instance)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// One disjunction per pair picks a direction; two constraints per
    /// triple forbid both of its cycles.
    pub fn order(&self) -> Vec<Rule> {
        let n = self.instances.len();
        let mut rules = Vec::new();
        for (i, a) in self.instances.iter().enumerate() {
            for b in self.instances.iter().skip(i + 1) {
                rules.push(Rule::new(
                    Head::Disjunction(vec![prec(a, b), prec(b, a)]),
                    [],
                ));
            }
        }
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    let (a, b, c) = (&self.instances[i], &self.instances[j], &self.instances[k]);
                    rules.push(cycle(a, b, c));
                    rules.push(cycle(a, c, b));
                }
            }
        }
        rules
    }

    /// A rule with head instance `head` and positive body atom instance
    /// `body` is unfounded for `head` unless `body` comes first.
    pub fn strengthen(
        &self,
        rule: RuleId,
        head: &Instance,
        body: &Instance,
        existence: &[Literal],
    ) -> Option<Rule> {
        let mut literals = existence.to_vec();
        if body != head {
            if !self.contains(body) {
                return None;
            }
            literals.push(Literal::Negative(prec(body, head)));
        }
        let positions = (0..head.arity()).collect::<Vec<_>>();
        let unfound = unfound_atom(
            rule,
            &positions,
            head.arity(),
            head.arguments.iter().cloned().map(Term::Constant),
        );
        Some(Rule::normal(unfound, literals))
    }
}

/// `_prec(a,b)`: `a` precedes `b`.
fn prec(a: &Instance, b: &Instance) -> Application {
    Application::new(
        Symbol::from("_prec"),
        [Term::Function(a.to_atom()), Term::Function(b.to_atom())],
    )
}

fn cycle(a: &Instance, b: &Instance, c: &Instance) -> Rule {
    Rule::constraint([
        Literal::Positive(prec(a, b)),
        Literal::Positive(prec(b, c)),
        Literal::Positive(prec(c, a)),
    ])
}
