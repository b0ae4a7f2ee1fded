//! Run every pass over a sectioned program, in order, and emit the
//! global closure once all rules are done.

use decouple_syntax::*;
use decouple_tracer::*;

use crate::collectors::IsGround;
use crate::combinations::Assignment;
use crate::context::RuleContext;
use crate::domain::Domains;
use crate::guess::guess;
use crate::normal::Precedence;
use crate::output::Builder;
use crate::registry::{Registry, RuleId};
use crate::sat::SatEncoder;
use crate::unfound::{check_ground, ground_checks, GroundCheck, UnfoundednessPreventer};
use crate::RewriteError;

/// Output switches, read once per rewrite.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Don't emit `#show` directives.
    pub no_show: bool,

    /// Enumerate head guesses and existence constraints instead of
    /// conditioning them on `dom/1`, which is then left out.
    pub ground_guess: bool,

    /// Pass-through sections are grounded elsewhere, so don't echo
    /// them. Implies `ground_guess`.
    pub ground: bool,
}

impl Options {
    fn ground_guess(&self) -> bool {
        self.ground_guess || self.ground
    }
}

/// What to do with one statement, decided before anything is emitted.
enum Step<'a> {
    Echo(&'a Statement),
    Rewrite {
        id: usize,
        context: RuleContext,
        normal: bool,
    },
    Check {
        id: RuleId,
        check: GroundCheck<'a>,
        normal: bool,
    },
}

pub struct Rewriter {
    options: Options,
    trace: Trace,
}

impl Rewriter {
    pub fn new(options: Options, trace: Trace) -> Self {
        Self { options, trace }
    }

    /// Rewrite a program into `out`. Nothing is added to `out` unless
    /// every rule can be rewritten.
    pub fn rewrite<B: Builder>(&self, sections: &[Section], out: &mut B) -> Result<(), RewriteError> {
        let trace = self.trace;
        let ground_guess = self.options.ground_guess();
        let domains = Domains::collect(sections, trace);
        let precedence = sections
            .iter()
            .any(|s| s.kind == SectionKind::Normal)
            .then(|| Precedence::collect(sections, &domains, trace));
        let steps = self.plan(sections, &domains, precedence.as_ref())?;

        if !self.options.no_show {
            for signature in domains.directives() {
                out.add(Statement::Show(signature.clone()));
            }
        }

        let mut registry = Registry::default();
        let mut rewritten = 0;
        for step in &steps {
            match step {
                Step::Echo(statement) => out.add((*statement).clone()),
                Step::Rewrite {
                    id,
                    context,
                    normal,
                } => {
                    let encoder = SatEncoder::new(*id, context, &domains);
                    let mut rules = encoder.saturate();
                    rules.extend(encoder.derive());
                    rules.extend(guess(context, &domains, ground_guess));
                    if let Some(preventer) =
                        UnfoundednessPreventer::new(*id, context, &domains, ground_guess)
                    {
                        if let Some(head) = context.head() {
                            registry.declare(
                                RuleId::Numbered(*id),
                                context.atom(head, &Assignment::new()),
                            );
                        }
                        rules.extend(preventer.existence());
                        rules.extend(preventer.witnesses(
                            &mut registry,
                            precedence.as_ref().filter(|_| *normal),
                        ));
                    }
                    trace!(trace, Emit, "Rule {}: {} statements", id, rules.len());
                    out.add_rules(rules);
                    rewritten += 1;
                }
                Step::Check { id, check, normal } => {
                    registry.declare(*id, check.head.to_atom());
                    let rules = check_ground(
                        *id,
                        check,
                        &domains,
                        &mut registry,
                        precedence.as_ref().filter(|_| *normal),
                    );
                    trace!(trace, Emit, "Ground rule {}: {} statements", id, rules.len());
                    out.add_rules(rules);
                }
            }
        }

        if rewritten > 0 {
            let sat = Application::new(Symbol::from("sat"), []);
            out.add_rule(Rule::normal(
                sat.clone(),
                (1..=rewritten).map(|id| Literal::Positive(SatEncoder::flag(id))),
            ));
            out.add_rule(Rule::constraint([Literal::Negative(sat)]));
        }

        let denials = registry.denials(&domains);
        trace!(
            trace,
            Found,
            "{} registered instances, {} denials",
            registry.len(),
            denials.len()
        );
        out.add_rules(denials);

        if let Some(precedence) = precedence.as_ref().filter(|p| !p.is_empty()) {
            let order = precedence.order();
            trace!(
                trace,
                Order,
                "{} ordered instances, {} order statements",
                precedence.len(),
                order.len()
            );
            out.add_rules(order);
        }

        if !ground_guess {
            out.add_rules(domains.universe().iter().map(|c| {
                Rule::fact(Application::new(
                    Symbol::from("dom"),
                    [Term::Constant(c.clone())],
                ))
            }));
        }

        if !self.options.no_show {
            for signature in domains.shows() {
                out.add(Statement::Show(signature.clone()));
            }
        }

        Ok(())
    }

    /// Rewrite a program into text, one statement per line.
    pub fn render(&self, sections: &[Section]) -> Result<String, RewriteError> {
        let mut text = String::new();
        self.rewrite(sections, &mut text)?;
        Ok(text)
    }

    /// Number the rewritten rules, build their contexts, and pick the
    /// ground head instances to check. Fails on the first rule that
    /// can't be rewritten.
    fn plan<'a>(
        &self,
        sections: &'a [Section],
        domains: &Domains,
        precedence: Option<&Precedence>,
    ) -> Result<Vec<Step<'a>>, RewriteError> {
        let mut steps = Vec::new();
        let mut rules = 0;
        let mut checks = 0;
        for section in sections {
            let normal = section.kind == SectionKind::Normal;
            for statement in &section.statements {
                let Statement::Rule(rule) = statement else {
                    continue;
                };
                if section.kind.is_rewritten() && !rule.is_ground() {
                    let context = RuleContext::new(rule)?;
                    rules += 1;
                    trace!(self.trace, Rewrite, "Rule {}: {}", rules, context);
                    steps.push(Step::Rewrite {
                        id: rules,
                        context,
                        normal,
                    });
                    continue;
                }

                if section.kind.is_rewritten() || !self.options.ground {
                    steps.push(Step::Echo(statement));
                }
                let ordered = precedence.filter(|_| normal);
                for check in ground_checks(rule, domains, ordered) {
                    let id = RuleId::Ground(checks);
                    trace!(self.trace, Rewrite, "Ground rule {}: {} for {}", id, rule, check.head);
                    steps.push(Step::Check { id, check, normal });
                    checks += 1;
                }
            }
        }
        Ok(steps)
    }
}
