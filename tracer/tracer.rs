//! A trivial tracing facility. Diagnostics go to stderr; the
//! rewritten program never does.

use bitmask_enum::bitmask;

/// Which passes to trace; combine levels with `|`, and use
/// `Trace::none()` for silence:
///
/// * `Collect`: universe, subdomains, facts, and non-ground heads;
/// * `Rewrite`: each rule's variables, atoms, and comparisons;
/// * `Found`: registered head instances and denials;
/// * `Order`: the instances ordered for normal sections;
/// * `Emit`: how much each rule emits.
#[bitmask]
pub enum Trace {
    All,
    Collect,
    Rewrite,
    Found,
    Order,
    Emit,
}

#[macro_export]
macro_rules! trace {
    ($trace:expr, $level:ident, $fmt:literal $(,)? $($arg:expr),* $(,)?) => {
        if $trace.intersects(Trace::$level) {
            eprintln!($fmt, $($arg),*);
        }
    }
}
