//! Walk a syntax tree, i.e., visit every sub-element.

use super::*;

/// Walk a shared borrow of a syntactic element.
///
/// We follow [the standard Rust visitor
/// pattern](https://rust-unofficial.github.io/patterns/patterns/behavioural/visitor.html).
/// The methods in this trait are hooks to be overridden.
/// By default, they all call out to walker functions that
/// in turn call back into the visitor to continue the walk.
pub trait Visit<'a> {
    fn visit_constant(&mut self, _c: &'a Constant) {}
    fn visit_variable(&mut self, _s: &'a Symbol) {}
    fn visit_interval(&mut self, _start: i64, _end: i64) {}
    fn visit_function_name(&mut self, _f: &'a Symbol) {}
    fn visit_term(&mut self, t: &'a Term) {
        visit_term(self, t)
    }
    fn visit_function(&mut self, f: &'a Application) {
        visit_function(self, f)
    }
    fn visit_atom(&mut self, a: &'a Application) {
        visit_atom(self, a)
    }
    fn visit_relation(&mut self, l: &'a Term, op: RelOp, r: &'a Term) {
        visit_relation(self, l, op, r)
    }
    fn visit_sum(&mut self, s: &'a Sum) {
        visit_sum(self, s)
    }
    fn visit_choice(&mut self, c: &'a Choice) {
        visit_choice(self, c)
    }
    fn visit_head(&mut self, h: &'a Head) {
        visit_head(self, h)
    }
    fn visit_literal(&mut self, l: &'a Literal) {
        visit_literal(self, l)
    }
    fn visit_rule(&mut self, r: &'a Rule) {
        visit_rule(self, r)
    }
}

pub fn visit_term<'a, V: Visit<'a> + ?Sized>(v: &mut V, t: &'a Term) {
    match t {
        Term::Constant(c) => v.visit_constant(c),
        Term::Variable(s) => v.visit_variable(s),
        Term::Interval(i, j) => v.visit_interval(*i, *j),
        Term::Function(f) => v.visit_function(f),
    }
}

pub fn visit_function<'a, V: Visit<'a> + ?Sized>(v: &mut V, function: &'a Application) {
    v.visit_function_name(&function.predicate);
    for arg in &function.arguments {
        v.visit_term(arg);
    }
}

pub fn visit_atom<'a, V: Visit<'a> + ?Sized>(v: &mut V, atom: &'a Application) {
    for arg in &atom.arguments {
        v.visit_term(arg);
    }
}

pub fn visit_relation<'a, V: Visit<'a> + ?Sized>(
    v: &mut V,
    left: &'a Term,
    _op: RelOp,
    right: &'a Term,
) {
    v.visit_term(left);
    v.visit_term(right);
}

pub fn visit_sum<'a, V: Visit<'a> + ?Sized>(v: &mut V, sum: &'a Sum) {
    for element in &sum.elements {
        v.visit_term(&element.weight);
        for c in &element.condition {
            v.visit_literal(c);
        }
    }
    v.visit_term(&sum.bound);
}

pub fn visit_choice<'a, V: Visit<'a> + ?Sized>(v: &mut V, choice: &'a Choice) {
    for element in &choice.elements {
        v.visit_atom(&element.atom);
        for c in &element.condition {
            v.visit_literal(c);
        }
    }
}

pub fn visit_head<'a, V: Visit<'a> + ?Sized>(v: &mut V, head: &'a Head) {
    match head {
        Head::Falsity => (),
        Head::Atom(a) => v.visit_atom(a),
        Head::Disjunction(atoms) => {
            for a in atoms {
                v.visit_atom(a);
            }
        }
        Head::Choice(c) => v.visit_choice(c),
    }
}

pub fn visit_literal<'a, V: Visit<'a> + ?Sized>(v: &mut V, literal: &'a Literal) {
    match literal {
        Literal::Positive(a) | Literal::Negative(a) => v.visit_atom(a),
        Literal::Relation(l, op, r) => v.visit_relation(l, *op, r),
        Literal::Sum(s) => v.visit_sum(s),
    }
}

pub fn visit_rule<'a, V: Visit<'a> + ?Sized>(v: &mut V, rule: &'a Rule) {
    v.visit_head(&rule.head);
    for b in &rule.body {
        v.visit_literal(b);
    }
}
