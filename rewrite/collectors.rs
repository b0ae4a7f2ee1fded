//! Collectors over syntax elements, implemented as [visitors](Visit).

use decouple_syntax::*;

/// Determine if an element is variable-free.
pub trait IsGround {
    fn is_ground(&self) -> bool;
}

impl IsGround for Rule {
    fn is_ground(&self) -> bool {
        let mut visitor = ContainsVariableVisitor::default();
        visitor.visit_rule(self);
        !visitor.0
    }
}

#[derive(Default)]
struct ContainsVariableVisitor(bool);

impl<'a> Visit<'a> for ContainsVariableVisitor {
    fn visit_variable(&mut self, _s: &'a Symbol) {
        self.0 = true;
    }
}
