//! Collect what the passes need to know about a whole program before
//! rewriting any of it: the term universe, per-variable subdomains,
//! facts, the signatures of non-ground heads, and what to show.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use decouple_syntax::*;
use decouple_tracer::*;

use crate::collectors::IsGround;
use crate::combinations::Combinations;

/// Atoms of `_dom_<Var>(...)` declare the subdomain of `<Var>`.
const SUBDOMAIN_PREFIX: &str = "_dom_";

/// A ground atom over constants, e.g., `p(1,a)`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instance {
    pub predicate: Symbol,
    pub arguments: Vec<Constant>,
}

impl Instance {
    pub fn new(predicate: Symbol, arguments: impl IntoIterator<Item = Constant>) -> Self {
        Self {
            predicate,
            arguments: arguments.into_iter().collect(),
        }
    }

    /// The instance of a variable-free atom, if its arguments are constants.
    pub fn from_atom(atom: &Application) -> Option<Self> {
        atom.arguments
            .iter()
            .map(|arg| match arg {
                Term::Constant(c) => Some(c.clone()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|arguments| Self::new(atom.predicate.clone(), arguments))
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.predicate.clone(), self.arity())
    }

    pub fn to_atom(&self) -> Application {
        Application::new(
            self.predicate.clone(),
            self.arguments.iter().cloned().map(Term::Constant),
        )
    }

    /// The constants at the given argument positions.
    pub fn project(&self, positions: &[usize]) -> Vec<Constant> {
        positions
            .iter()
            .filter_map(|&i| self.arguments.get(i).cloned())
            .collect()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_atom().fmt(f)
    }
}

/// Program-wide tables, built once by [`Domains::collect`] and
/// read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Domains {
    universe: IndexSet<Constant>,
    subdomains: IndexMap<Symbol, IndexSet<Constant>>,
    facts: IndexSet<Instance>,
    heads: IndexSet<Signature>,
    shows: IndexSet<Signature>,
    directives: Vec<Signature>,
}

impl Domains {
    pub fn collect(sections: &[Section], trace: Trace) -> Self {
        let mut domains = Self::default();
        for section in sections {
            for statement in &section.statements {
                match statement {
                    Statement::Show(signature) => domains.directives.push(signature.clone()),
                    Statement::Rule(rule) => domains.collect_rule(rule, section.kind),
                }
            }
        }

        trace!(trace, Collect, "Universe: {{{}}}", join(&domains.universe));
        for (var, subdomain) in &domains.subdomains {
            trace!(trace, Collect, "Subdomain of {}: {{{}}}", var, join(subdomain));
        }
        trace!(trace, Collect, "Facts: {{{}}}", join(&domains.facts));
        trace!(trace, Collect, "Non-ground heads: {{{}}}", join(&domains.heads));

        domains
    }

    fn collect_rule(&mut self, rule: &Rule, kind: SectionKind) {
        let mut collector = DomainCollector::new(self);
        collector.visit_rule(rule);

        let ground = rule.is_ground();
        match &rule.head {
            Head::Atom(atom) if ground && rule.is_fact() => {
                let facts = self.instances(atom);
                self.facts.extend(facts);
            }
            head if !ground && kind.is_rewritten() => {
                if let Some(atom) = head.atom() {
                    self.heads.insert(atom.signature());
                }
            }
            _ => (),
        }
    }

    /// Every constant in the program, in first-seen order.
    pub fn universe(&self) -> &IndexSet<Constant> {
        &self.universe
    }

    /// The values a variable ranges over: its declared subdomain,
    /// or else the whole universe.
    pub fn domain(&self, var: &Symbol) -> &IndexSet<Constant> {
        self.subdomains.get(var).unwrap_or(&self.universe)
    }

    /// The condition restricting a variable to its domain,
    /// e.g., `dom(X)` or `_dom_X(X)`.
    pub fn domain_literal(&self, var: &Symbol) -> Literal {
        let predicate = if self.subdomains.contains_key(var) {
            Symbol::new(format!("{SUBDOMAIN_PREFIX}{var}"))
        } else {
            Symbol::from("dom")
        };
        Literal::Positive(Application::new(predicate, [Term::Variable(var.clone())]))
    }

    pub fn is_fact(&self, instance: &Instance) -> bool {
        self.facts.contains(instance)
    }

    /// Does some non-ground rule of a rewritten section derive atoms
    /// with this signature?
    pub fn is_head(&self, signature: &Signature) -> bool {
        self.heads.contains(signature)
    }

    /// `#show` directives written in the program.
    pub fn directives(&self) -> &[Signature] {
        &self.directives
    }

    /// Every signature used in the program, in first-seen order.
    pub fn shows(&self) -> impl Iterator<Item = &Signature> {
        self.shows.iter()
    }

    /// Every ground instance of an atom: variables range over their
    /// domains, intervals over their elements. Function arguments
    /// have no instances.
    pub fn instances(&self, atom: &Application) -> Vec<Instance> {
        enum Slot {
            Fixed(Constant),
            Free(usize),
        }

        let mut variables = IndexMap::<&Symbol, usize>::new();
        let mut ranges = Vec::<Vec<Constant>>::new();
        let mut slots = Vec::with_capacity(atom.arity());
        for arg in &atom.arguments {
            let slot = match arg {
                Term::Constant(c) => Slot::Fixed(c.clone()),
                Term::Variable(v) => Slot::Free(*variables.entry(v).or_insert_with(|| {
                    ranges.push(self.domain(v).iter().cloned().collect());
                    ranges.len() - 1
                })),
                Term::Interval(i, j) => {
                    ranges.push(Term::interval_values(*i, *j).collect());
                    Slot::Free(ranges.len() - 1)
                }
                Term::Function(_) => return vec![],
            };
            slots.push(slot);
        }

        let radices = ranges.iter().map(Vec::len).collect::<Vec<_>>();
        Combinations::mixed(&radices)
            .map(|digits| {
                Instance::new(
                    atom.predicate.clone(),
                    slots.iter().map(|slot| match slot {
                        Slot::Fixed(c) => c.clone(),
                        Slot::Free(k) => ranges[*k][digits[*k]].clone(),
                    }),
                )
            })
            .collect()
    }
}

/// Walks one rule, filling the universe, subdomains, and show table.
struct DomainCollector<'d> {
    domains: &'d mut Domains,
    subdomain: Option<Symbol>,
}

impl<'d> DomainCollector<'d> {
    fn new(domains: &'d mut Domains) -> Self {
        Self {
            domains,
            subdomain: None,
        }
    }

    fn add(&mut self, c: Constant) {
        if let Some(var) = &self.subdomain {
            self.domains
                .subdomains
                .entry(var.clone())
                .or_default()
                .insert(c.clone());
        }
        self.domains.universe.insert(c);
    }
}

impl<'a, 'd> Visit<'a> for DomainCollector<'d> {
    fn visit_constant(&mut self, c: &'a Constant) {
        self.add(c.clone());
    }

    fn visit_interval(&mut self, start: i64, end: i64) {
        for c in Term::interval_values(start, end) {
            self.add(c);
        }
    }

    fn visit_atom(&mut self, a: &'a Application) {
        self.domains.shows.insert(a.signature());
        self.subdomain = a
            .predicate
            .name()
            .strip_prefix(SUBDOMAIN_PREFIX)
            .filter(|var| !var.is_empty())
            .map(Symbol::from);
        visit_atom(self, a);
        self.subdomain = None;
    }
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
