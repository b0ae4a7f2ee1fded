//! Where rewritten statements go.

use decouple_syntax::*;

/// A sink for output statements, in order.
pub trait Builder {
    fn add(&mut self, statement: Statement);

    fn add_rule(&mut self, rule: Rule) {
        self.add(Statement::Rule(rule));
    }

    fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>)
    where
        Self: Sized,
    {
        for rule in rules {
            self.add_rule(rule);
        }
    }
}

/// Collect statements into a program.
impl Builder for Program<Statement> {
    fn add(&mut self, statement: Statement) {
        self.push(statement);
    }
}

/// Render statements as text, one per line.
impl Builder for String {
    fn add(&mut self, statement: Statement) {
        self.push_str(&statement.to_string());
        self.push('\n');
    }
}

/// Send every statement to both builders.
impl<A: Builder, B: Builder> Builder for (A, B) {
    fn add(&mut self, statement: Statement) {
        self.0.add(statement.clone());
        self.1.add(statement);
    }
}

impl<B: Builder + ?Sized> Builder for &mut B {
    fn add(&mut self, statement: Statement) {
        (**self).add(statement);
    }
}
