//! Foundedness: a guessed head instance must be supported by some
//! rule instance. Instead of grounding every rule instance, we emit
//! `unfound` witnesses for the bindings under which a rule fails to
//! support a head instance, and bind body-only variables through
//! existence constraints. The [registry](Registry) collects what was
//! emitted, for the final denials.

use indexmap::{IndexMap, IndexSet};

use decouple_syntax::*;

use crate::collectors::IsGround;
use crate::combinations::{assignments, Assignment, Covered};
use crate::context::{Occurrence, Polarity, RuleContext};
use crate::domain::{Domains, Instance};
use crate::graph::DependencyGraph;
use crate::normal::Precedence;
use crate::registry::{unfound_atom, Registry, RuleId};

pub struct UnfoundednessPreventer<'a> {
    id: usize,
    context: &'a RuleContext,
    domains: &'a Domains,
    ground_guess: bool,
    head: &'a Occurrence,
    head_vars: Vec<usize>,
    reached: IndexMap<usize, Vec<usize>>,
}

/// What a witness for one binding of a literal's variables needs.
struct Frame {
    positions: Vec<usize>,
    unfound: Application,
    completions: Vec<Instance>,
    existence: Vec<Literal>,
}

impl<'a> UnfoundednessPreventer<'a> {
    /// Constraints derive nothing, and so need no foundedness check.
    pub fn new(
        id: usize,
        context: &'a RuleContext,
        domains: &'a Domains,
        ground_guess: bool,
    ) -> Option<Self> {
        let head = context.head()?;
        let head_vars = context.head_variables();
        let graph = DependencyGraph::new(context);
        let reached = context
            .remainder()
            .into_iter()
            .map(|r| (r, graph.reached(r, &head_vars)))
            .collect();
        Some(Self {
            id,
            context,
            domains,
            ground_guess,
            head,
            head_vars,
            reached,
        })
    }

    fn rule(&self) -> RuleId {
        RuleId::Numbered(self.id)
    }

    /// `r<n>f_<V>(args)`: body-only variable `V` of rule `n` takes
    /// the first argument, for the head values that follow.
    fn existence_atom(&self, r: usize, arguments: impl IntoIterator<Item = Term>) -> Application {
        Application::new(
            Symbol::new(format!("r{}f_{}", self.id, self.context.variable(r))),
            arguments,
        )
    }

    fn reached_values(&self, r: usize, assignment: &Assignment) -> Vec<Term> {
        self.reached[&r]
            .iter()
            .filter_map(|v| assignment.get(v).cloned().map(Term::Constant))
            .collect()
    }

    /// Every body-only variable takes exactly one value per instance
    /// of the head variables it depends on.
    pub fn existence(&self) -> Vec<Rule> {
        let mut rules = Vec::new();
        for (&r, reached) in &self.reached {
            let var = self.context.variable(r);
            let unreached = self
                .head_vars
                .iter()
                .copied()
                .filter(|h| !reached.contains(h))
                .collect::<Vec<_>>();
            let reached_domains = self.context.domains(self.domains, reached);
            for assignment in assignments(reached, &reached_domains) {
                let values = self.reached_values(r, &assignment);
                let head = Literal::Positive(self.context.atom(self.head, &assignment));
                if self.ground_guess {
                    let elements = self
                        .domains
                        .domain(var)
                        .iter()
                        .map(|c| {
                            let mut args = vec![Term::Constant(c.clone())];
                            args.extend(values.iter().cloned());
                            ChoiceElement::new(self.existence_atom(r, args), [])
                        })
                        .collect::<Vec<_>>();
                    let choice = Choice::new(elements, Some(ChoiceBounds::exactly_one()));
                    if unreached.is_empty() {
                        rules.push(Rule::new(Head::Choice(choice), [head]));
                    } else if reached.is_empty() {
                        rules.push(Rule::new(Head::Choice(choice), []));
                    } else {
                        let unreached_domains = self.context.domains(self.domains, &unreached);
                        for completion in assignments(&unreached, &unreached_domains) {
                            let mut full = assignment.clone();
                            full.extend(completion);
                            let head = Literal::Positive(self.context.atom(self.head, &full));
                            rules.push(Rule::new(Head::Choice(choice.clone()), [head]));
                        }
                    }
                } else {
                    let mut args = vec![Term::Variable(var.clone())];
                    args.extend(values);
                    let element =
                        ChoiceElement::new(self.existence_atom(r, args), [self.domains.domain_literal(var)]);
                    let choice = Choice::new([element], Some(ChoiceBounds::exactly_one()));
                    let body = if unreached.is_empty() {
                        vec![head]
                    } else if reached.is_empty() {
                        vec![]
                    } else {
                        let mut body = vec![head];
                        body.extend(
                            unreached
                                .iter()
                                .map(|&h| self.domains.domain_literal(self.context.variable(h))),
                        );
                        body
                    };
                    rules.push(Rule::new(Head::Choice(choice), body));
                }
            }
        }
        rules
    }

    /// The head variables needed to decide a literal with the given
    /// variables, and the literal's body-only variables.
    fn split(&self, vars: &IndexSet<usize>) -> (Vec<usize>, Vec<usize>) {
        let rem = vars
            .iter()
            .copied()
            .filter(|v| self.reached.contains_key(v))
            .collect::<Vec<_>>();
        let needed = self
            .head_vars
            .iter()
            .copied()
            .filter(|h| vars.contains(h) || rem.iter().any(|r| self.reached[r].contains(h)))
            .collect();
        (needed, rem)
    }

    /// The partial head instance that `assignment` decides, and its
    /// completions that aren't facts; `None` if there are none.
    fn frame(&self, needed: &[usize], rem: &[usize], assignment: &Assignment) -> Option<Frame> {
        let mut positions = Vec::new();
        let mut partial = Vec::new();
        for (i, arg) in self.head.arguments.iter().enumerate() {
            if let Some(v) = arg.variable() {
                if !needed.contains(&v) {
                    continue;
                }
            }
            positions.push(i);
            partial.extend(arg.value(assignment).map(Term::Constant));
        }

        let unneeded = self
            .head_vars
            .iter()
            .copied()
            .filter(|h| !needed.contains(h))
            .collect::<Vec<_>>();
        let unneeded_domains = self.context.domains(self.domains, &unneeded);
        let completions = assignments(&unneeded, &unneeded_domains)
            .filter_map(|completion| {
                let mut full = assignment.clone();
                full.extend(completion);
                self.head.instantiate(&full)
            })
            .filter(|i| !self.domains.is_fact(i))
            .collect::<Vec<_>>();
        if completions.is_empty() {
            return None;
        }

        let existence = rem
            .iter()
            .filter_map(|&r| {
                let c = assignment.get(&r)?;
                let mut args = vec![Term::Constant(c.clone())];
                args.extend(self.reached_values(r, assignment));
                Some(Literal::Positive(self.existence_atom(r, args)))
            })
            .collect();

        Some(Frame {
            unfound: unfound_atom(self.rule(), &positions, self.head.arity(), partial),
            positions,
            completions,
            existence,
        })
    }

    fn register(&self, frame: &Frame, registry: &mut Registry) {
        for instance in &frame.completions {
            registry.register(instance.clone(), self.rule(), frame.positions.clone());
        }
    }

    /// Witnesses for every binding that falsifies a comparison or a
    /// body atom. Comparisons go first; the bindings they falsify
    /// prune the atoms' bindings.
    pub fn witnesses(&self, registry: &mut Registry, precedence: Option<&Precedence>) -> Vec<Rule> {
        let mut covered = Covered::default();
        let mut rules = Vec::new();

        for comparison in self.context.comparisons() {
            let (needed, rem) = self.split(&comparison.variables());
            let vars = [needed.as_slice(), rem.as_slice()].concat();
            let domains = self.context.domains(self.domains, &vars);
            for assignment in assignments(&vars, &domains) {
                if covered.covers(&assignment) {
                    continue;
                }
                let Some(frame) = self.frame(&needed, &rem, &assignment) else {
                    continue;
                };
                if comparison.holds(&assignment) != Some(false) {
                    continue;
                }
                covered.insert(assignment);
                rules.push(Rule::normal(frame.unfound.clone(), frame.existence.clone()));
                self.register(&frame, registry);
            }
        }

        for occurrence in self.context.body_atoms() {
            let (needed, rem) = self.split(&occurrence.variables());
            let vars = [needed.as_slice(), rem.as_slice()].concat();
            let domains = self.context.domains(self.domains, &vars);
            for assignment in assignments(&vars, &domains) {
                if covered.covers(&assignment) {
                    continue;
                }
                let Some(frame) = self.frame(&needed, &rem, &assignment) else {
                    continue;
                };
                let Some(instance) = occurrence.instantiate(&assignment) else {
                    continue;
                };
                let positive = occurrence.polarity == Polarity::Positive;
                if positive && self.domains.is_fact(&instance) {
                    continue;
                }
                let failure = if positive {
                    Literal::Negative(instance.to_atom())
                } else {
                    Literal::Positive(instance.to_atom())
                };
                let mut body = vec![failure];
                body.extend(frame.existence.iter().cloned());
                rules.push(Rule::normal(frame.unfound.clone(), body));
                self.register(&frame, registry);

                if let (Some(precedence), true) = (precedence, positive) {
                    for head in &frame.completions {
                        if let Some(rule) =
                            precedence.strengthen(self.rule(), head, &instance, &frame.existence)
                        {
                            rules.push(rule);
                            registry.register(head.clone(), self.rule(), (0..head.arity()).collect());
                        }
                    }
                }
            }
        }

        rules
    }
}

/// A head instance of a ground rule that needs a foundedness check,
/// and the literals the rule needs to derive it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroundCheck<'a> {
    pub head: Instance,
    pub body: Vec<&'a Literal>,
}

/// The non-fact head instances of a ground rule that need a check:
/// those of a predicate some rewritten rule also derives, and, given
/// the order of a normal section, every ordered instance. Intervals
/// expand, and each choice element brings its condition.
pub fn ground_checks<'a>(
    rule: &'a Rule,
    domains: &Domains,
    precedence: Option<&Precedence>,
) -> Vec<GroundCheck<'a>> {
    if !rule.is_ground() {
        return vec![];
    }
    let derived: Vec<(&'a Application, Vec<&'a Literal>)> = match &rule.head {
        Head::Falsity => vec![],
        Head::Atom(atom) => vec![(atom, vec![])],
        Head::Disjunction(atoms) => atoms.iter().map(|atom| (atom, vec![])).collect(),
        Head::Choice(choice) => choice
            .elements
            .iter()
            .map(|e| (&e.atom, e.condition.iter().collect()))
            .collect(),
    };
    derived
        .into_iter()
        .flat_map(|(atom, condition)| {
            domains
                .instances(atom)
                .into_iter()
                .map(move |head| (head, condition.clone()))
        })
        .filter(|(head, _)| {
            !domains.is_fact(head)
                && (domains.is_head(&head.signature())
                    || precedence.is_some_and(|p| p.contains(head)))
        })
        .map(|(head, condition)| GroundCheck {
            head,
            body: rule.body.iter().chain(condition).collect(),
        })
        .collect()
}

/// One witness per literal of a ground check that may fail.
pub fn check_ground(
    id: RuleId,
    check: &GroundCheck,
    domains: &Domains,
    registry: &mut Registry,
    precedence: Option<&Precedence>,
) -> Vec<Rule> {
    let head = &check.head;
    let positions = (0..head.arity()).collect::<Vec<_>>();
    let unfound = unfound_atom(
        id,
        &positions,
        head.arity(),
        head.arguments.iter().cloned().map(Term::Constant),
    );

    let mut rules = Vec::new();
    for &literal in &check.body {
        let body = match literal {
            Literal::Positive(atom) => Instance::from_atom(atom),
            _ => None,
        };
        let failure = match literal {
            Literal::Positive(atom) => {
                if body.as_ref().is_some_and(|b| domains.is_fact(b)) {
                    continue;
                }
                Some(Literal::Negative(atom.clone()))
            }
            Literal::Negative(atom) => Some(Literal::Positive(atom.clone())),
            Literal::Relation(left, op, right) => match (left.as_ref(), right.as_ref()) {
                (Term::Constant(l), Term::Constant(r)) if op.eval(l, r) => continue,
                (Term::Constant(_), Term::Constant(_)) => None,
                _ => Some(Literal::Relation(left.clone(), op.negate(), right.clone())),
            },
            Literal::Sum(sum) => Some(Literal::Sum(Sum {
                op: sum.op.negate(),
                ..sum.clone()
            })),
        };
        rules.push(Rule::normal(unfound.clone(), failure));
        registry.register(head.clone(), id, positions.clone());

        if let (Some(precedence), Some(body)) = (precedence, body) {
            if let Some(rule) = precedence.strengthen(id, head, &body, &[]) {
                rules.push(rule);
            }
        }
    }
    rules
}

#[cfg(test)]
mod test {
    use decouple_tracer::*;

    use super::*;

    struct Rewritten {
        existence: Vec<String>,
        witnesses: Vec<String>,
        denials: Vec<String>,
    }

    fn rewrite(sections: &[Section], index: usize, ground_guess: bool) -> Rewritten {
        let domains = Domains::collect(sections, Trace::none());
        let rule = sections
            .iter()
            .flat_map(|s| s.rules())
            .nth(index)
            .unwrap();
        let context = RuleContext::new(rule).unwrap();
        let preventer = UnfoundednessPreventer::new(1, &context, &domains, ground_guess).unwrap();
        let mut registry = Registry::default();
        registry.declare(RuleId::Numbered(1), context.atom(context.head().unwrap(), &Assignment::new()));
        let render = |rules: Vec<Rule>| -> Vec<String> {
            rules.iter().map(ToString::to_string).collect()
        };
        Rewritten {
            existence: render(preventer.existence()),
            witnesses: render(preventer.witnesses(&mut registry, None)),
            denials: render(registry.denials(&domains)),
        }
    }

    #[test]
    fn head_variables_only() {
        let rewritten = rewrite(
            &[Section::new(
                SectionKind::Rules,
                [
                    rule!(atom!(q(1))),
                    rule!(atom!(r(2))),
                    rule!(atom!(p(var!(X), var!(Y))), if pos!(q(var!(X))), pos!(r(var!(Y)))),
                ],
            )],
            2,
            false,
        );
        assert!(rewritten.existence.is_empty());
        assert_eq!(
            rewritten.witnesses,
            [
                "r1_unfound_0(2) :- not q(2).",
                "r1_unfound_1(1) :- not r(1).",
            ]
        );
        assert_eq!(
            rewritten.denials,
            [
                ":- p(2,1), #sum {1:r1_unfound_0(2); 1:r1_unfound_1(1)} >= 1.",
                ":- p(2,2), #sum {1:r1_unfound_0(2)} >= 1.",
                ":- p(1,1), #sum {1:r1_unfound_1(1)} >= 1.",
            ]
        );
    }

    #[test]
    fn body_only_variables() {
        // p(X) :- q(X,Z), not r(Z).
        let sections = [Section::new(
            SectionKind::Rules,
            [
                rule!(atom!(q(1, 1))),
                rule!(atom!(q(2, 2))),
                rule!(atom!(r(2))),
                rule!(atom!(p(var!(X))), if pos!(q(var!(X), var!(Z))), neg!(r(var!(Z)))),
            ],
        )];
        let rewritten = rewrite(&sections, 3, false);
        assert_eq!(
            rewritten.existence,
            ["1<={r1f_Z(Z,1) : dom(Z)}<=1 :- p(1).", "1<={r1f_Z(Z,2) : dom(Z)}<=1 :- p(2)."]
        );
        assert_eq!(
            rewritten.witnesses,
            [
                "r1_unfound(1) :- not q(1,2), r1f_Z(2,1).",
                "r1_unfound(2) :- not q(2,1), r1f_Z(1,2).",
                "r1_unfound(1) :- r(1), r1f_Z(1,1).",
                "r1_unfound(1) :- r(2), r1f_Z(2,1).",
                "r1_unfound(2) :- r(1), r1f_Z(1,2).",
                "r1_unfound(2) :- r(2), r1f_Z(2,2).",
            ]
        );
        assert_eq!(
            rewritten.denials,
            [
                ":- p(1), #sum {1:r1_unfound(1)} >= 1.",
                ":- p(2), #sum {1:r1_unfound(2)} >= 1.",
            ]
        );

        let rewritten = rewrite(&sections, 3, true);
        assert_eq!(
            rewritten.existence,
            [
                "1<={r1f_Z(1,1); r1f_Z(2,1)}<=1 :- p(1).",
                "1<={r1f_Z(1,2); r1f_Z(2,2)}<=1 :- p(2).",
            ]
        );
    }

    #[test]
    fn unreached_head_variables() {
        // p(X,Y) :- q(X), s(Z), Z < Y.  (Z reaches Y only)
        let sections = [Section::new(
            SectionKind::Rules,
            [
                rule!(atom!(q(1))),
                rule!(atom!(s(1))),
                rule!(atom!(s(2))),
                rule!(
                    atom!(p(var!(X), var!(Y))),
                    if pos!(q(var!(X))),
                    pos!(s(var!(Z))),
                    rel!(var!(Z), Lt, var!(Y)),
                ),
            ],
        )];
        let rewritten = rewrite(&sections, 3, false);
        assert_eq!(
            rewritten.existence,
            [
                "1<={r1f_Z(Z,1) : dom(Z)}<=1 :- p(X,1), dom(X).",
                "1<={r1f_Z(Z,2) : dom(Z)}<=1 :- p(X,2), dom(X).",
            ]
        );
        assert_eq!(
            rewritten.witnesses,
            [
                "r1_unfound_1(1) :- r1f_Z(1,1).",
                "r1_unfound_1(1) :- r1f_Z(2,1).",
                "r1_unfound_1(2) :- r1f_Z(2,2).",
                "r1_unfound_0(2) :- not q(2).",
            ]
        );

        let rewritten = rewrite(&sections, 3, true);
        assert_eq!(
            rewritten.existence,
            [
                "1<={r1f_Z(1,1); r1f_Z(2,1)}<=1 :- p(1,1).",
                "1<={r1f_Z(1,1); r1f_Z(2,1)}<=1 :- p(2,1).",
                "1<={r1f_Z(1,2); r1f_Z(2,2)}<=1 :- p(1,2).",
                "1<={r1f_Z(1,2); r1f_Z(2,2)}<=1 :- p(2,2).",
            ]
        );
    }

    #[test]
    fn unrelated_body_variables() {
        // p(X) :- q(X), s(Z).
        let rewritten = rewrite(
            &[Section::new(
                SectionKind::Rules,
                [
                    rule!(atom!(s(1))),
                    rule!(atom!(t(2))),
                    rule!(atom!(p(var!(X))), if pos!(q(var!(X))), pos!(s(var!(Z)))),
                ],
            )],
            2,
            false,
        );
        assert_eq!(rewritten.existence, ["1<={r1f_Z(Z) : dom(Z)}<=1."]);
        assert_eq!(
            rewritten.witnesses,
            [
                "r1_unfound(1) :- not q(1).",
                "r1_unfound(2) :- not q(2).",
                "r1_unfound :- not s(2), r1f_Z(2).",
            ]
        );
        assert_eq!(
            rewritten.denials,
            [
                ":- p(1), #sum {1:r1_unfound(1); 1:r1_unfound} >= 1.",
                ":- p(2), #sum {1:r1_unfound(2); 1:r1_unfound} >= 1.",
            ]
        );
    }

    #[test]
    fn facts_need_no_justification() {
        // p(X) :- q(X).  with p(1) a fact.
        let rewritten = rewrite(
            &[Section::new(
                SectionKind::Rules,
                [
                    rule!(atom!(p(1))),
                    rule!(atom!(s(2))),
                    rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                ],
            )],
            2,
            false,
        );
        assert_eq!(rewritten.witnesses, ["r1_unfound(2) :- not q(2)."]);
        assert_eq!(rewritten.denials, [":- p(2), #sum {1:r1_unfound(2)} >= 1."]);
    }

    #[test]
    fn comparisons_prune_witnesses() {
        // p(X) :- q(X,Z), Z < X.
        let rewritten = rewrite(
            &[Section::new(
                SectionKind::Rules,
                [
                    rule!(atom!(d(1))),
                    rule!(atom!(d(2))),
                    rule!(atom!(p(var!(X))), if pos!(q(var!(X), var!(Z))), rel!(var!(Z), Lt, var!(X))),
                ],
            )],
            2,
            false,
        );
        assert_eq!(
            rewritten.witnesses,
            [
                "r1_unfound(1) :- r1f_Z(1,1).",
                "r1_unfound(1) :- r1f_Z(2,1).",
                "r1_unfound(2) :- r1f_Z(2,2).",
                "r1_unfound(2) :- not q(2,1), r1f_Z(1,2).",
            ]
        );
        assert_eq!(
            rewritten.denials,
            [
                ":- p(1), #sum {1:r1_unfound(1)} >= 1.",
                ":- p(2), #sum {1:r1_unfound(2)} >= 1.",
            ]
        );
    }

    fn heads(checks: &[GroundCheck]) -> Vec<String> {
        checks.iter().map(|c| c.head.to_string()).collect()
    }

    #[test]
    fn ground_rules() {
        let sections = [Section::new(
            SectionKind::Rules,
            [
                rule!(atom!(q(1))),
                rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                rule!(atom!(p(2)), if pos!(q(1)), neg!(s(2)), rel!(1, Lt, 2), rel!(2, Lt, 1)),
                rule!(atom!(p(1)), if pos!(s(1))),
                rule!(atom!(s(1)), if pos!(q(1))),
                rule!(atom!(p(1)), if pos!(q(var!(X)))),
            ],
        )];
        let domains = Domains::collect(&sections, Trace::none());
        let rules = sections[0].rules().collect::<Vec<_>>();

        assert!(ground_checks(rules[0], &domains, None).is_empty());
        assert!(ground_checks(rules[4], &domains, None).is_empty());
        assert!(ground_checks(rules[5], &domains, None).is_empty());
        let checks = ground_checks(rules[2], &domains, None);
        assert_eq!(heads(&checks), ["p(2)"]);

        let mut registry = Registry::default();
        let checked = check_ground(RuleId::Ground(0), &checks[0], &domains, &mut registry, None);
        assert_eq!(
            checked.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["rA_unfound(2) :- s(2).", "rA_unfound(2)."]
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ground_heads_expand() {
        let sections = [Section::new(
            SectionKind::Rules,
            [
                rule!(atom!(q(1))),
                rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                rule!(atom!(p(interval!(1..2))), if pos!(s(1))),
                Statement::Rule(Rule::new(
                    Head::Choice(Choice::new([ChoiceElement::new(atom!(p(3)), [pos!(s(2))])], None)),
                    [pos!(q(1))],
                )),
                Statement::Rule(Rule::new(Head::Disjunction(vec![atom!(p(4)), atom!(t(4))]), [pos!(s(1))])),
                rule!(atom!(p(atom!(f(1)))), if pos!(s(1))),
            ],
        )];
        let domains = Domains::collect(&sections, Trace::none());
        let rules = sections[0].rules().collect::<Vec<_>>();

        assert_eq!(heads(&ground_checks(rules[2], &domains, None)), ["p(1)", "p(2)"]);
        assert_eq!(heads(&ground_checks(rules[4], &domains, None)), ["p(4)"]);
        assert!(ground_checks(rules[5], &domains, None).is_empty());

        let checks = ground_checks(rules[3], &domains, None);
        assert_eq!(heads(&checks), ["p(3)"]);
        assert_eq!(checks[0].body, [&pos!(q(1)), &pos!(s(2))]);
        let mut registry = Registry::default();
        let checked = check_ground(RuleId::Ground(1), &checks[0], &domains, &mut registry, None);
        assert_eq!(
            checked.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["rB_unfound(3) :- not s(2)."]
        );
    }

    #[test]
    fn ordered_ground_heads() {
        // p(X) :- q(X). q(1) :- p(1).  (normal)
        let sections = [Section::new(
            SectionKind::Normal,
            [
                rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                rule!(atom!(q(1)), if pos!(p(1))),
            ],
        )];
        let domains = Domains::collect(&sections, Trace::none());
        let precedence = Precedence::collect(&sections, &domains, Trace::none());
        let rule = sections[0].rules().nth(1).unwrap();

        assert!(ground_checks(rule, &domains, None).is_empty());
        let checks = ground_checks(rule, &domains, Some(&precedence));
        assert_eq!(heads(&checks), ["q(1)"]);
        let mut registry = Registry::default();
        let checked = check_ground(
            RuleId::Ground(0),
            &checks[0],
            &domains,
            &mut registry,
            Some(&precedence),
        );
        assert_eq!(
            checked.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["rA_unfound(1) :- not p(1).", "rA_unfound(1) :- not _prec(p(1),q(1))."]
        );
    }
}
