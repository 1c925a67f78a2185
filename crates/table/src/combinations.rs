//! Combination generator — the Cartesian product of variable domains.
//!
//! Rows come out in lexicographic order of domain positions: the
//! last-declared variable changes fastest. Every call to
//! [`CombinationSpace::iter`] starts a fresh enumeration with its own
//! cursor, so a space can be enumerated any number of times, from any
//! number of threads, without the enumerations seeing each other.

use std::iter::FusedIterator;
use ucatable_core::Variable;

/// One full assignment of a value to every variable, in declaration order.
pub type Row = Vec<String>;

/// The set of all combinations over an ordered list of variables.
#[derive(Debug, Clone, Copy)]
pub struct CombinationSpace<'a> {
    variables: &'a [Variable],
}

impl<'a> CombinationSpace<'a> {
    pub fn new(variables: &'a [Variable]) -> Self {
        Self { variables }
    }

    pub fn variables(&self) -> &'a [Variable] {
        self.variables
    }

    /// Product of the domain sizes, or `None` if it overflows `usize`.
    ///
    /// Zero variables give one (empty) row; any empty domain gives zero.
    pub fn row_count(&self) -> Option<usize> {
        self.variables
            .iter()
            .try_fold(1usize, |acc, v| acc.checked_mul(v.domain.len()))
    }

    /// The first variable with an empty domain, if any.
    pub fn empty_domain(&self) -> Option<&'a Variable> {
        self.variables.iter().find(|v| v.domain.is_empty())
    }

    /// Start a new enumeration.
    pub fn iter(&self) -> Combinations<'a> {
        Combinations {
            variables: self.variables,
            cursor: vec![0; self.variables.len()],
            remaining: self.row_count(),
            done: self.empty_domain().is_some(),
        }
    }
}

impl<'a> IntoIterator for CombinationSpace<'a> {
    type Item = Row;
    type IntoIter = Combinations<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single enumeration over a [`CombinationSpace`].
///
/// The cursor holds one domain position per variable and advances like an
/// odometer, rightmost digit first.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    variables: &'a [Variable],
    cursor: Vec<usize>,
    remaining: Option<usize>,
    done: bool,
}

impl Combinations<'_> {
    fn advance(&mut self) {
        for (position, variable) in self.variables.iter().enumerate().rev() {
            self.cursor[position] += 1;
            if self.cursor[position] < variable.domain.len() {
                return;
            }
            self.cursor[position] = 0;
        }
        // Carried out of the leftmost digit: every combination was produced.
        self.done = true;
    }
}

impl Iterator for Combinations<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.done {
            return None;
        }
        let row = self
            .variables
            .iter()
            .zip(&self.cursor)
            .map(|(variable, &i)| variable.domain[i].clone())
            .collect();
        self.advance();
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Combinations<'_> {}
