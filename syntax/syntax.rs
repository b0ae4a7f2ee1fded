//! Syntactic elements of the non-ground ASP programs that we rewrite,
//! and of the programs that we emit.
//!
//! See the "ASP-Core-2 Input Language Format" (2012) and the clingo
//! guide. Parsing concrete syntax is left to an external parser; it
//! hands us a program already divided into [sections](Section).
//! [`Display`](fmt::Display) renders every element in the surface
//! syntax that clingo reads back.

mod visit;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use visit::*;

/// Things that may go wrong when building syntax from tokens.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    #[error("unknown comparison operator `{0}`")]
    UnknownOperator(String),
}

/// Uninterpreted element that names itself, a predicate, or a variable.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: String) -> Self {
        Symbol(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(String::from(s))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uninterpreted element that represents itself. Numbers sort
/// before names, as in clingo's total order on symbols.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Constant {
    Number(i64),
    Name(Symbol),
}

impl From<&str> for Constant {
    fn from(s: &str) -> Self {
        Self::Name(Symbol::from(s))
    }
}

impl From<Symbol> for Constant {
    fn from(s: Symbol) -> Self {
        Self::Name(s)
    }
}

impl From<i64> for Constant {
    fn from(i: i64) -> Self {
        Self::Number(i)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(i) => f.write_fmt(format_args!("{i}")),
            Self::Name(s) => f.write_fmt(format_args!("{s}")),
        }
    }
}

/// Arithmetic relational operators: equal, not equal, less than,
/// greater than, less than or equal to, greater than or equal to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Leq,
    Geq,
}

impl RelOp {
    pub fn eval<T>(&self, x: T, y: T) -> bool
    where
        T: Eq + Ord,
    {
        use RelOp::*;
        match self {
            Eq => x == y,
            Ne => x != y,
            Lt => x < y,
            Gt => x > y,
            Leq => x <= y,
            Geq => x >= y,
        }
    }

    pub fn negate(self) -> Self {
        use RelOp::*;
        match self {
            Eq => Ne,
            Ne => Eq,
            Lt => Geq,
            Gt => Leq,
            Leq => Gt,
            Geq => Lt,
        }
    }
}

impl FromStr for RelOp {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RelOp::*;
        match s {
            "=" | "==" => Ok(Eq),
            "!=" | "<>" => Ok(Ne),
            "<" => Ok(Lt),
            ">" => Ok(Gt),
            "<=" => Ok(Leq),
            ">=" => Ok(Geq),
            _ => Err(SyntaxError::UnknownOperator(String::from(s))),
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RelOp::*;
        f.write_str(match self {
            Eq => "=",
            Ne => "!=",
            Lt => "<",
            Gt => ">",
            Leq => "<=",
            Geq => ">=",
        })
    }
}

/// Interpreted element that represents either itself (a constant),
/// something else (a variable), a range of integers, or a symbolic
/// function (e.g., a ground atom used as an argument).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Term {
    Constant(Constant),
    Variable(Symbol),
    Interval(i64, i64),
    Function(Application),
}

impl Term {
    /// The integers `start..=end`, in order; empty if `start > end`.
    pub fn interval_values(start: i64, end: i64) -> impl Iterator<Item = Constant> {
        (start..=end).map(Constant::Number)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Self::Constant(Constant::Number(i))
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Self::Constant(Constant::from(s))
    }
}

impl From<Application> for Term {
    fn from(a: Application) -> Self {
        Self::Function(a)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Term::*;
        match self {
            Constant(x) => x.fmt(f),
            Variable(x) => x.fmt(f),
            Interval(i, j) => f.write_fmt(format_args!("{i}..{j}")),
            Function(x) => x.fmt(f),
        }
    }
}

/// An _n_-ary predicate applied to a tuple of terms.
/// If _n_ = 0, the arguments are elided.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Application {
    pub predicate: Symbol,
    pub arguments: Vec<Term>,
}

impl Application {
    pub fn new(predicate: Symbol, arguments: impl IntoIterator<Item = Term>) -> Self {
        Self {
            predicate,
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.predicate.clone(), self.arity())
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Application {
            predicate,
            arguments,
        } = self;
        if arguments.is_empty() {
            predicate.fmt(f)
        } else {
            f.write_fmt(format_args!("{}({})", predicate, join(arguments, ",")))
        }
    }
}

/// A predicate name and arity, e.g., `p/2`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Signature {
    pub predicate: Symbol,
    pub arity: usize,
}

impl Signature {
    pub fn new(predicate: Symbol, arity: usize) -> Self {
        Self { predicate, arity }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.predicate, self.arity))
    }
}

/// An atom, its negation as failure, a boolean arithmetic
/// relation (e.g., `X < 2`), or a body `#sum` aggregate.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Literal {
    Positive(Application),
    Negative(Application),
    Relation(Box<Term>, RelOp, Box<Term>),
    Sum(Sum),
}

impl Literal {
    /// Boxing constructor.
    pub fn relation(x: Term, rel: RelOp, y: Term) -> Self {
        Self::Relation(Box::new(x), rel, Box::new(y))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Literal::*;
        match self {
            Positive(atom) => atom.fmt(f),
            Negative(atom) => f.write_fmt(format_args!("not {atom}")),
            Relation(x, rel, y) => f.write_fmt(format_args!("{x}{rel}{y}")),
            Sum(sum) => sum.fmt(f),
        }
    }
}

/// One element `a : c_1, ..., c_n` of a choice.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ChoiceElement {
    pub atom: Application,
    pub condition: Vec<Literal>,
}

impl ChoiceElement {
    pub fn new(atom: Application, condition: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            atom,
            condition: condition.into_iter().collect(),
        }
    }
}

impl fmt::Display for ChoiceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.condition.is_empty() {
            self.atom.fmt(f)
        } else {
            f.write_fmt(format_args!("{} : {}", self.atom, join(&self.condition, ", ")))
        }
    }
}

/// Cardinality bounds on a choice.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ChoiceBounds {
    pub lower_bound: usize,
    pub upper_bound: usize,
}

impl ChoiceBounds {
    pub fn new(lower_bound: usize, upper_bound: usize) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }

    /// Exactly one element.
    pub fn exactly_one() -> Self {
        Self::new(1, 1)
    }
}

/// A _choice_ `l <= {a_1 : c_1; ...; a_n : c_n} <= u` denotes
/// all the ways of choosing which of its atoms are true.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Choice {
    pub elements: Vec<ChoiceElement>,
    pub bounds: Option<ChoiceBounds>,
}

impl Choice {
    pub fn new(
        elements: impl IntoIterator<Item = ChoiceElement>,
        bounds: Option<ChoiceBounds>,
    ) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            bounds,
        }
    }

    /// The atom of a choice with a single unconditional
    /// element and no bounds, e.g., `{p(X)}`.
    pub fn single(&self) -> Option<&Application> {
        match (&self.elements[..], &self.bounds) {
            ([element], None) if element.condition.is_empty() => Some(&element.atom),
            _ => None,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ChoiceBounds { lower_bound, .. }) = &self.bounds {
            f.write_fmt(format_args!("{lower_bound}<="))?;
        }
        f.write_fmt(format_args!("{{{}}}", join(&self.elements, "; ")))?;
        if let Some(ChoiceBounds { upper_bound, .. }) = &self.bounds {
            f.write_fmt(format_args!("<={upper_bound}"))?;
        }
        Ok(())
    }
}

/// One element `w : c_1, ..., c_n` of a `#sum` aggregate.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SumElement {
    pub weight: Term,
    pub condition: Vec<Literal>,
}

impl SumElement {
    pub fn new(weight: Term, condition: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            weight,
            condition: condition.into_iter().collect(),
        }
    }
}

impl fmt::Display for SumElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.weight, join(&self.condition, ", ")))
    }
}

/// A body aggregate `#sum {e_1; ...; e_n} op bound`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Sum {
    pub elements: Vec<SumElement>,
    pub op: RelOp,
    pub bound: Term,
}

impl Sum {
    pub fn new(elements: impl IntoIterator<Item = SumElement>, op: RelOp, bound: Term) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            op,
            bound,
        }
    }

    /// True when at least one condition holds (with unit weights).
    pub fn at_least_one(conditions: impl IntoIterator<Item = Literal>) -> Self {
        let one = || Term::Constant(Constant::Number(1));
        Self::new(
            conditions.into_iter().map(|c| SumElement::new(one(), [c])),
            RelOp::Geq,
            one(),
        )
    }
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "#sum {{{}}} {} {}",
            join(&self.elements, "; "),
            self.op,
            self.bound
        ))
    }
}

/// Rule heads come in several flavors: none at all (an integrity
/// constraint), a single atom, a disjunction `a | b | c` of atoms,
/// or a choice.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Head {
    Falsity,
    Atom(Application),
    Disjunction(Vec<Application>),
    Choice(Choice),
}

impl Head {
    /// The single atom this head derives or guesses, if there is one.
    pub fn atom(&self) -> Option<&Application> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::Choice(choice) => choice.single(),
            Self::Falsity | Self::Disjunction(_) => None,
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Falsity => Ok(()),
            Self::Atom(atom) => atom.fmt(f),
            Self::Disjunction(atoms) => f.write_str(&join(atoms, " | ")),
            Self::Choice(choice) => choice.fmt(f),
        }
    }
}

/// A head and a conjunctive body.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rule {
    pub head: Head,
    pub body: Vec<Literal>,
}

impl Rule {
    pub fn new(head: Head, body: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            head,
            body: body.into_iter().collect(),
        }
    }

    /// Boxing constructor for a single-atom head.
    pub fn normal(head: Application, body: impl IntoIterator<Item = Literal>) -> Self {
        Self::new(Head::Atom(head), body)
    }

    /// Boxing constructor for a headless rule.
    pub fn constraint(body: impl IntoIterator<Item = Literal>) -> Self {
        Self::new(Head::Falsity, body)
    }

    /// Boxing constructor for a bodiless single-atom rule.
    pub fn fact(head: Application) -> Self {
        Self::normal(head, [])
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty() && matches!(self.head, Head::Atom(_))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.head, self.body.is_empty()) {
            (Head::Falsity, true) => f.write_str("#false."),
            (Head::Falsity, false) => f.write_fmt(format_args!(":- {}.", join(&self.body, ", "))),
            (head, true) => f.write_fmt(format_args!("{head}.")),
            (head, false) => f.write_fmt(format_args!("{} :- {}.", head, join(&self.body, ", "))),
        }
    }
}

/// A top-level element of a program.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Statement {
    Rule(Rule),
    Show(Signature),
}

impl From<Rule> for Statement {
    fn from(r: Rule) -> Self {
        Self::Rule(r)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => rule.fmt(f),
            Self::Show(signature) => f.write_fmt(format_args!("#show {signature}.")),
        }
    }
}

/// A collection of statements (or anything else printable line by line).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Program<S = Statement>(Vec<S>);

impl<S> Default for Program<S> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<S> Program<S> {
    pub fn new(statements: impl IntoIterator<Item = S>) -> Self {
        Self(statements.into_iter().collect())
    }

    pub fn push(&mut self, statement: S) {
        self.0.push(statement);
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S> IntoIterator for Program<S> {
    type Item = S;
    type IntoIter = <Vec<S> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S> FromIterator<S> for Program<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S> fmt::Display for Program<S>
where
    S: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.iter() {
            s.fmt(f)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// How the rewriter treats a section of the input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SectionKind {
    /// Echoed verbatim (e.g., `#program base`).
    PassThrough,

    /// Rewritten (`#program rules`).
    Rules,

    /// Rewritten, with acyclic justification (`#program normal`).
    Normal,
}

impl SectionKind {
    pub fn is_rewritten(&self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// A named part of an input program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub statements: Vec<Statement>,
}

impl Section {
    pub fn new(kind: SectionKind, statements: impl IntoIterator<Item = Statement>) -> Self {
        Self {
            kind,
            statements: statements.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Rule(rule) => Some(rule),
            Statement::Show(_) => None,
        })
    }
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// These constructor macros can make tests involving syntactic elements
/// (most of them) much more readable. They are *not* intended as a public
/// interface, and *should* be behind `#[cfg(test)]`, but [cargo can't
/// currently export test code across crates](https://github.com/rust-lang/cargo/issues/8379).
#[cfg(any(test, feature = "macros"))]
mod macros {
    #[macro_export]
    macro_rules! sym {
        ($name: ident) => {
            Symbol::from(stringify!($name))
        };
    }

    #[macro_export]
    macro_rules! atom {
        ($pred: ident) => {
            Application::new(sym!($pred), [])
        };
        ($pred: ident($($arg: expr),*)) => {
            Application::new(sym!($pred), [$(Term::from($arg)),*])
        };
    }

    #[macro_export]
    macro_rules! pos {
        ($pred: ident $(($($args: tt)*))?) => {
            Literal::Positive(atom!($pred$(($($args)*))?))
        };
    }

    #[macro_export]
    macro_rules! neg {
        ($pred: ident $(($($args: tt)*))?) => {
            Literal::Negative(atom!($pred$(($($args)*))?))
        };
    }

    #[macro_export]
    macro_rules! rel {
        ($l: expr, $op: ident, $r: expr) => {
            Literal::relation(Term::from($l), RelOp::$op, Term::from($r))
        };
    }

    #[macro_export]
    macro_rules! var {
        (_) => {
            Term::Variable(Symbol::from("_"))
        };
        ($name: ident) => {
            Term::Variable(sym!($name))
        };
    }

    #[macro_export]
    macro_rules! interval {
        ($start: literal .. $end: literal) => {
            Term::Interval($start, $end)
        };
    }

    #[macro_export]
    macro_rules! rule {
        (if $($body: expr),* $(,)?) => {
            Statement::Rule(Rule::constraint([$($body),*]))
        };
        ({$choice: expr} $(if $($body: expr),* $(,)?)?) => {
            Statement::Rule(Rule::new(
                Head::Choice(Choice::new([ChoiceElement::new($choice, [])], None)),
                [$($($body),*)?],
            ))
        };
        ($head: expr $(, if $($body: expr),* $(,)?)?) => {
            Statement::Rule(Rule::normal($head, [$($($body),*)?]))
        };
    }
}
