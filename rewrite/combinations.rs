//! Knuth Algorithm 7.2.1.1M (_Mixed-radix generation_), and the
//! covered-subset cache that prunes the bindings it generates.

use std::collections::{BTreeMap, BTreeSet};

use gray_codes::{InclusionExclusion, SetMutation};
use indexmap::IndexSet;

use decouple_syntax::Constant;

/// A partial binding of rule variables (by index) to constants.
pub type Assignment = BTreeMap<usize, Constant>;

/// Every tuple `a` with `0 <= a[i] < r[i]`, in lexicographic order
/// (last digit fastest). If any radix is zero, there are none.
pub struct Combinations {
    a: Vec<usize>,
    m: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn mixed(r: &[usize]) -> Self {
        let mut m = vec![2];
        m.extend(r);
        Self {
            a: vec![0; r.len() + 1],
            m,
            done: r.contains(&0),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.a[1..].to_vec();

        let mut j = self.a.len() - 1;
        while self.a[j] == self.m[j] - 1 {
            self.a[j] = 0;
            j -= 1;
        }
        if j == 0 {
            self.done = true;
        } else {
            self.a[j] += 1;
        }

        Some(item)
    }
}

/// All bindings of `variables` to elements of the corresponding
/// `domains`, following domain order.
pub fn assignments<'d>(
    variables: &[usize],
    domains: &[&'d IndexSet<Constant>],
) -> impl Iterator<Item = Assignment> + 'd {
    assert_eq!(variables.len(), domains.len());
    let variables = variables.to_vec();
    let domains = domains.to_vec();
    let radices = domains.iter().map(|d| d.len()).collect::<Vec<_>>();
    Combinations::mixed(&radices).map(move |digits| {
        variables
            .iter()
            .zip(&domains)
            .zip(digits)
            .filter_map(|((&v, d), i)| d.get_index(i).map(|c| (v, c.clone())))
            .collect()
    })
}

/// Partial bindings already known to make some literal of a rule fail.
/// A binding is covered if any of its restrictions (including the
/// empty one) has been recorded.
#[derive(Clone, Debug, Default)]
pub struct Covered(BTreeSet<Assignment>);

impl Covered {
    pub fn insert(&mut self, assignment: Assignment) {
        self.0.insert(assignment);
    }

    pub fn covers(&self, assignment: &Assignment) -> bool {
        if self.0.is_empty() {
            return false;
        }
        let mut subset = Assignment::new();
        if self.0.contains(&subset) {
            return true;
        }
        let bindings = assignment.iter().collect::<Vec<_>>();
        if bindings.is_empty() {
            return false;
        }
        InclusionExclusion::of_len(bindings.len()).any(|mutation| {
            match mutation {
                SetMutation::Insert(i) => {
                    let (&v, c) = bindings[i];
                    subset.insert(v, c.clone());
                }
                SetMutation::Remove(i) => {
                    subset.remove(bindings[i].0);
                }
            }
            self.0.contains(&subset)
        })
    }
}
