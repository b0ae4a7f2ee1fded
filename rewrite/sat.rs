//! Satisfiability: guess a binding for every variable of a rule,
//! saturate on `sat`, and derive `sat_r<n>` from any binding under
//! which the rule is satisfied.

use decouple_syntax::*;

use crate::combinations::{assignments, Assignment, Covered};
use crate::context::{HeadKind, Occurrence, Polarity, RuleContext};
use crate::domain::Domains;

pub struct SatEncoder<'a> {
    id: usize,
    context: &'a RuleContext,
    domains: &'a Domains,
}

impl<'a> SatEncoder<'a> {
    pub fn new(id: usize, context: &'a RuleContext, domains: &'a Domains) -> Self {
        Self {
            id,
            context,
            domains,
        }
    }

    /// `sat_r<n>`
    pub fn flag(id: usize) -> Application {
        Application::new(Symbol::new(format!("sat_r{id}")), [])
    }

    /// `r<n>_<V>(c)`: variable `V` of rule `n` is bound to `c`.
    fn binding(&self, v: usize, c: &Constant) -> Application {
        Application::new(
            Symbol::new(format!("r{}_{}", self.id, self.context.variable(v))),
            [Term::Constant(c.clone())],
        )
    }

    fn trivial(&self) -> bool {
        self.context.kind() == HeadKind::Choice
            || (0..self.context.variables().len())
                .any(|v| self.domains.domain(self.context.variable(v)).is_empty())
    }

    /// For every variable, a disjunctive guess over its domain and
    /// the rules that saturate it once `sat` holds.
    pub fn saturate(&self) -> Vec<Rule> {
        if self.trivial() {
            return vec![];
        }
        let sat = Literal::Positive(Application::new(Symbol::from("sat"), []));
        let mut rules = Vec::new();
        for v in 0..self.context.variables().len() {
            let domain = self.domains.domain(self.context.variable(v));
            let atoms = domain
                .iter()
                .map(|c| self.binding(v, c))
                .collect::<Vec<_>>();
            rules.push(Rule::new(Head::Disjunction(atoms.clone()), []));
            rules.extend(
                atoms
                    .into_iter()
                    .map(|atom| Rule::normal(atom, [sat.clone()])),
            );
        }
        rules
    }

    /// Derive `sat_r<n>` from every binding that falsifies a body
    /// literal or satisfies the head. Comparisons go first; the
    /// bindings they falsify prune the atoms' bindings.
    pub fn derive(&self) -> Vec<Rule> {
        let flag = Self::flag(self.id);
        if self.trivial() {
            return vec![Rule::fact(flag)];
        }

        let mut covered = Covered::default();
        let mut rules = Vec::new();
        for comparison in self.context.comparisons() {
            let vars = comparison.variables().into_iter().collect::<Vec<_>>();
            let domains = self.context.domains(self.domains, &vars);
            for assignment in assignments(&vars, &domains) {
                if covered.covers(&assignment) {
                    continue;
                }
                if comparison.holds(&assignment) == Some(false) {
                    rules.push(Rule::normal(flag.clone(), self.bindings(&vars, &assignment)));
                    covered.insert(assignment);
                }
            }
        }

        for occurrence in self.context.occurrences() {
            let vars = occurrence.variables().into_iter().collect::<Vec<_>>();
            let domains = self.context.domains(self.domains, &vars);
            for assignment in assignments(&vars, &domains) {
                if covered.covers(&assignment) {
                    continue;
                }
                let mut body = self.bindings(&vars, &assignment);
                body.push(self.satisfier(occurrence, &assignment));
                rules.push(Rule::normal(flag.clone(), body));
            }
        }

        rules
    }

    fn bindings(&self, vars: &[usize], assignment: &Assignment) -> Vec<Literal> {
        vars.iter()
            .filter_map(|v| {
                assignment
                    .get(v)
                    .map(|c| Literal::Positive(self.binding(*v, c)))
            })
            .collect()
    }

    /// The literal that satisfies the rule under a binding: the head
    /// atom, or the complement of a body literal.
    fn satisfier(&self, occurrence: &Occurrence, assignment: &Assignment) -> Literal {
        let atom = self.context.atom(occurrence, assignment);
        match occurrence.polarity {
            Polarity::Head | Polarity::Negative => Literal::Positive(atom),
            Polarity::Positive => Literal::Negative(atom),
        }
    }
}
