//! Per-rule scratch state: the rule's variables, atom occurrences,
//! and comparisons, in the shapes the rewriting passes consume.

use std::fmt;

use indexmap::IndexSet;

use decouple_syntax::*;

use crate::combinations::Assignment;
use crate::domain::{Domains, Instance};
use crate::RewriteError;

/// An argument of a rewritten atom or comparison:
/// a rule variable (by index) or a constant.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Operand {
    Variable(usize),
    Constant(Constant),
}

impl Operand {
    pub fn variable(&self) -> Option<usize> {
        match self {
            Self::Variable(v) => Some(*v),
            Self::Constant(_) => None,
        }
    }

    /// The operand's value under an assignment, if it's bound.
    pub fn value(&self, assignment: &Assignment) -> Option<Constant> {
        match self {
            Self::Variable(v) => assignment.get(v).cloned(),
            Self::Constant(c) => Some(c.clone()),
        }
    }
}

/// Where an atom occurs in a rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Polarity {
    Head,
    Positive,
    Negative,
}

/// An atom of a rule, with its arguments resolved into operands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Occurrence {
    pub predicate: Symbol,
    pub arguments: Vec<Operand>,
    pub polarity: Polarity,
}

impl Occurrence {
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Distinct variables in argument order.
    pub fn variables(&self) -> IndexSet<usize> {
        self.arguments.iter().filter_map(Operand::variable).collect()
    }

    pub fn instantiate(&self, assignment: &Assignment) -> Option<Instance> {
        self.arguments
            .iter()
            .map(|arg| arg.value(assignment))
            .collect::<Option<Vec<_>>>()
            .map(|arguments| Instance::new(self.predicate.clone(), arguments))
    }
}

/// A comparison between two operands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comparison {
    pub left: Operand,
    pub op: RelOp,
    pub right: Operand,
}

impl Comparison {
    pub fn variables(&self) -> IndexSet<usize> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(Operand::variable)
            .collect()
    }

    /// Evaluate under an assignment that binds all of our variables.
    pub fn holds(&self, assignment: &Assignment) -> Option<bool> {
        let left = self.left.value(assignment)?;
        let right = self.right.value(assignment)?;
        Some(self.op.eval(left, right))
    }
}

/// What a rewritten rule derives.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeadKind {
    /// An integrity constraint: nothing.
    Constraint,

    /// A single atom.
    Atom,

    /// A single unbounded, unconditional choice element `{p(X)}`.
    Choice,
}

/// Everything the passes need to know about one non-ground rule.
/// Built fresh for every rule; nothing carries over.
#[derive(Clone, Debug)]
pub struct RuleContext {
    variables: Vec<Symbol>,
    kind: HeadKind,
    occurrences: Vec<Occurrence>,
    comparisons: Vec<Comparison>,
}

impl RuleContext {
    pub fn new(rule: &Rule) -> Result<Self, RewriteError> {
        let mut builder = ContextBuilder::default();
        let kind = match &rule.head {
            Head::Falsity => HeadKind::Constraint,
            Head::Atom(atom) => {
                builder.atom(atom, Polarity::Head)?;
                HeadKind::Atom
            }
            Head::Choice(choice) => match choice.single() {
                Some(atom) => {
                    builder.atom(atom, Polarity::Head)?;
                    HeadKind::Choice
                }
                None => {
                    return Err(RewriteError::MalformedAst(format!(
                        "can't rewrite choice head `{choice}`"
                    )))
                }
            },
            Head::Disjunction(_) => {
                return Err(RewriteError::MalformedAst(format!(
                    "can't rewrite disjunctive head `{}`",
                    rule.head
                )))
            }
        };
        for literal in &rule.body {
            match literal {
                Literal::Positive(atom) => builder.atom(atom, Polarity::Positive)?,
                Literal::Negative(atom) => builder.atom(atom, Polarity::Negative)?,
                Literal::Relation(left, op, right) => {
                    let comparison = Comparison {
                        left: builder.operand(left)?,
                        op: *op,
                        right: builder.operand(right)?,
                    };
                    builder.comparisons.push(comparison);
                }
                Literal::Sum(sum) => {
                    return Err(RewriteError::MalformedAst(format!(
                        "can't rewrite body aggregate `{sum}`"
                    )))
                }
            }
        }

        let ContextBuilder {
            variables,
            occurrences,
            comparisons,
            ..
        } = builder;
        Ok(Self {
            variables: variables.into_iter().collect(),
            kind,
            occurrences,
            comparisons,
        })
    }

    /// The rule's variables, head first, in order of occurrence.
    pub fn variables(&self) -> &[Symbol] {
        &self.variables
    }

    pub fn variable(&self, v: usize) -> &Symbol {
        &self.variables[v]
    }

    pub fn kind(&self) -> HeadKind {
        self.kind
    }

    /// All atom occurrences, head (if any) first.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn head(&self) -> Option<&Occurrence> {
        self.occurrences
            .first()
            .filter(|o| o.polarity == Polarity::Head)
    }

    pub fn body_atoms(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences
            .iter()
            .filter(|o| o.polarity != Polarity::Head)
    }

    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    /// Distinct head variables, in head order.
    pub fn head_variables(&self) -> Vec<usize> {
        self.head()
            .map(|h| h.variables().into_iter().collect())
            .unwrap_or_default()
    }

    /// Variables that don't occur in the head.
    pub fn remainder(&self) -> Vec<usize> {
        let head = self.head_variables();
        (0..self.variables.len())
            .filter(|v| !head.contains(v))
            .collect()
    }

    /// The domains of the given variables.
    pub fn domains<'d>(&self, domains: &'d Domains, vars: &[usize]) -> Vec<&'d IndexSet<Constant>> {
        vars.iter()
            .map(|&v| domains.domain(self.variable(v)))
            .collect()
    }

    /// Render an occurrence with some variables bound; free
    /// variables keep their names.
    pub fn atom(&self, occurrence: &Occurrence, assignment: &Assignment) -> Application {
        Application::new(
            occurrence.predicate.clone(),
            occurrence.arguments.iter().map(|arg| match arg {
                Operand::Constant(c) => Term::Constant(c.clone()),
                Operand::Variable(v) => match assignment.get(v) {
                    Some(c) => Term::Constant(c.clone()),
                    None => Term::Variable(self.variable(*v).clone()),
                },
            }),
        )
    }
}

impl fmt::Display for RuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let empty = Assignment::new();
        f.write_fmt(format_args!(
            "variables [{}], atoms [{}], comparisons [{}]",
            self.variables
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            self.occurrences
                .iter()
                .map(|o| match o.polarity {
                    Polarity::Head => format!("head {}", self.atom(o, &empty)),
                    Polarity::Positive => self.atom(o, &empty).to_string(),
                    Polarity::Negative => format!("not {}", self.atom(o, &empty)),
                })
                .collect::<Vec<_>>()
                .join(", "),
            self.comparisons
                .iter()
                .map(|c| {
                    let operand = |o: &Operand| match o {
                        Operand::Variable(v) => self.variable(*v).to_string(),
                        Operand::Constant(c) => c.to_string(),
                    };
                    format!("{}{}{}", operand(&c.left), c.op, operand(&c.right))
                })
                .collect::<Vec<_>>()
                .join(", "),
        ))
    }
}

#[derive(Default)]
struct ContextBuilder {
    variables: IndexSet<Symbol>,
    occurrences: Vec<Occurrence>,
    comparisons: Vec<Comparison>,
    anonymous: usize,
}

impl ContextBuilder {
    fn atom(&mut self, atom: &Application, polarity: Polarity) -> Result<(), RewriteError> {
        let arguments = atom
            .arguments
            .iter()
            .map(|arg| self.operand(arg))
            .collect::<Result<Vec<_>, _>>()?;
        self.occurrences.push(Occurrence {
            predicate: atom.predicate.clone(),
            arguments,
            polarity,
        });
        Ok(())
    }

    fn operand(&mut self, term: &Term) -> Result<Operand, RewriteError> {
        match term {
            Term::Constant(c) => Ok(Operand::Constant(c.clone())),
            Term::Variable(name) if name.name() == "_" => {
                let name = Symbol::new(format!("Anon{}", self.anonymous));
                self.anonymous += 1;
                Ok(Operand::Variable(self.variables.insert_full(name).0))
            }
            Term::Variable(name) => Ok(Operand::Variable(self.variables.insert_full(name.clone()).0)),
            Term::Interval(..) | Term::Function(..) => Err(RewriteError::MalformedAst(format!(
                "expected a variable or a constant, found `{term}`"
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn context(statement: Statement) -> Result<RuleContext, RewriteError> {
        match statement {
            Statement::Rule(rule) => RuleContext::new(&rule),
            Statement::Show(_) => unreachable!(),
        }
    }

    #[test]
    fn variables_head_first() {
        let context = context(rule!(
            atom!(p(var!(Y), 1)),
            if pos!(q(var!(X), var!(Y))),
            neg!(r(var!(Z))),
            rel!(var!(X), Lt, var!(Z)),
        ))
        .unwrap();
        assert_eq!(context.variables(), [sym!(Y), sym!(X), sym!(Z)]);
        assert_eq!(context.kind(), HeadKind::Atom);
        assert_eq!(context.head_variables(), [0]);
        assert_eq!(context.remainder(), [1, 2]);
        assert_eq!(context.body_atoms().count(), 2);
        assert_eq!(
            context.comparisons(),
            [Comparison {
                left: Operand::Variable(1),
                op: RelOp::Lt,
                right: Operand::Variable(2),
            }]
        );
        assert_eq!(
            context.to_string(),
            "variables [Y, X, Z], atoms [head p(Y,1), q(X,Y), not r(Z)], comparisons [X<Z]"
        );
    }

    #[test]
    fn anonymous_variables_are_distinct() {
        let context = context(rule!(
            atom!(p(var!(X))),
            if pos!(q(var!(X), var!(_))),
            pos!(r(var!(_))),
        ))
        .unwrap();
        assert_eq!(context.variables(), [sym!(X), sym!(Anon0), sym!(Anon1)]);
    }

    #[test]
    fn constraints_and_choices() {
        let constraint = context(rule!(if pos!(q(var!(X))), neg!(r(var!(X))))).unwrap();
        assert_eq!(constraint.kind(), HeadKind::Constraint);
        assert!(constraint.head().is_none());
        assert_eq!(constraint.remainder(), [0]);

        let choice = context(rule!({atom!(b(var!(X)))} if pos!(a(var!(X))))).unwrap();
        assert_eq!(choice.kind(), HeadKind::Choice);
        assert_eq!(choice.head_variables(), [0]);
    }

    #[test]
    fn instantiate() {
        let context = context(rule!(atom!(p(var!(X), "a")), if pos!(q(var!(X))))).unwrap();
        let head = context.head().unwrap();
        assert_eq!(head.instantiate(&Assignment::new()), None);
        assert_eq!(
            head.instantiate(&Assignment::from([(0, Constant::from(1))]))
                .map(|i| i.to_string()),
            Some(String::from("p(1,a)"))
        );
        assert_eq!(context.atom(head, &Assignment::new()).to_string(), "p(X,a)");
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            context(rule!(atom!(p(var!(X))), if rel!(interval!(1..2), Eq, var!(X)))),
            Err(RewriteError::MalformedAst(_))
        ));
        assert!(matches!(
            context(rule!(atom!(p(interval!(1..2), var!(X))), if pos!(q(var!(X))))),
            Err(RewriteError::MalformedAst(_))
        ));
        let disjunctive = Statement::Rule(Rule::new(
            Head::Disjunction(vec![atom!(p(var!(X))), atom!(q(var!(X)))]),
            [pos!(r(var!(X)))],
        ));
        assert_eq!(
            context(disjunctive).unwrap_err().to_string(),
            "malformed syntax tree: can't rewrite disjunctive head `p(X) | q(X)`"
        );
    }
}
