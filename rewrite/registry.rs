//! The foundedness registry: which unfound witnesses each rule emitted
//! for each head instance, and the denials built from them.

use std::collections::HashMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};

use decouple_syntax::*;

use crate::domain::{Domains, Instance};

/// Rewritten rules are numbered from 1. Checked ground rules get
/// letters instead: `A`, ..., `Z`, `AA`, `AB`, ...
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RuleId {
    Numbered(usize),
    Ground(usize),
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(n) => f.write_fmt(format_args!("{n}")),
            Self::Ground(k) => {
                let mut letters = Vec::new();
                let mut n = k + 1;
                while n > 0 {
                    n -= 1;
                    letters.push(char::from(b'A' + (n % 26) as u8));
                    n /= 26;
                }
                f.write_str(&letters.into_iter().rev().collect::<String>())
            }
        }
    }
}

/// `r<id>_unfound(args)`, or `r<id>_unfound_<i>_..._<j>(args)` when
/// only head positions `i, ..., j` of an `arity`-ary head are bound.
pub fn unfound_atom(
    rule: RuleId,
    positions: &[usize],
    arity: usize,
    arguments: impl IntoIterator<Item = Term>,
) -> Application {
    let mut name = format!("r{rule}_unfound");
    if positions.len() < arity {
        for i in positions {
            name.push_str(&format!("_{i}"));
        }
    }
    Application::new(Symbol::new(name), arguments)
}

/// Head instances that some rule may fail to support. Append-only.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: IndexMap<Instance, IndexMap<RuleId, IndexSet<Vec<usize>>>>,
    heads: Vec<(RuleId, Application)>,
}

impl Registry {
    /// Record a rule that may derive instances of `head`.
    pub fn declare(&mut self, rule: RuleId, head: Application) {
        self.heads.push((rule, head));
    }

    /// Record that `rule` emitted an unfound witness binding the
    /// given head positions of `instance`.
    pub fn register(&mut self, instance: Instance, rule: RuleId, positions: Vec<usize>) {
        self.entries
            .entry(instance)
            .or_default()
            .entry(rule)
            .or_default()
            .insert(positions);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One denial per registered instance: it may not hold while every
    /// rule that could derive it is unfounded. Instances that some
    /// rule derives without any possible witness are always supported
    /// and get none.
    pub fn denials(&self, domains: &Domains) -> Vec<Rule> {
        self.entries
            .iter()
            .filter(|(instance, rules)| {
                self.heads.iter().all(|(rule, head)| {
                    rules.contains_key(rule) || !matches(head, instance, domains)
                })
            })
            .map(|(instance, rules)| {
                let arity = instance.arity();
                let mut body = vec![Literal::Positive(instance.to_atom())];
                body.extend(rules.iter().map(|(&rule, subsets)| {
                    Literal::Sum(Sum::at_least_one(subsets.iter().map(|positions| {
                        Literal::Positive(unfound_atom(
                            rule,
                            positions,
                            arity,
                            instance.project(positions).into_iter().map(Term::Constant),
                        ))
                    })))
                }));
                Rule::constraint(body)
            })
            .collect()
    }
}

/// Could `head` derive `instance`?
fn matches(head: &Application, instance: &Instance, domains: &Domains) -> bool {
    if head.predicate != instance.predicate || head.arity() != instance.arity() {
        return false;
    }
    let mut bindings = HashMap::<&Symbol, &Constant>::new();
    head.arguments
        .iter()
        .zip(&instance.arguments)
        .all(|(arg, c)| match arg {
            Term::Constant(d) => d == c,
            Term::Variable(v) => {
                domains.domain(v).contains(c)
                    && (v.name() == "_" || *bindings.entry(v).or_insert(c) == c)
            }
            Term::Interval(i, j) => matches!(c, Constant::Number(n) if i <= n && n <= j),
            Term::Function(_) => false,
        })
}
