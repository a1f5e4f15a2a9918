//! Polynomial expressions over table cells, used to state gate constraints.

use crate::circuits::wires::Variable;
use ark_ff::{Field, PrimeField};
use blueprint_utils::serialization::SerdeAs;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::ops::{Add, Mul, Neg, Sub};

/// A multivariate polynomial whose variables are table cells
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "F: PrimeField")]
pub enum Expr<F> {
    Constant(#[serde_as(as = "SerdeAs")] F),
    Cell(Variable),
    Add(Box<Expr<F>>, Box<Expr<F>>),
    Sub(Box<Expr<F>>, Box<Expr<F>>),
    Mul(Box<Expr<F>>, Box<Expr<F>>),
    Neg(Box<Expr<F>>),
}

impl<F: Field> Expr<F> {
    pub fn constant(c: F) -> Self {
        Expr::Constant(c)
    }

    pub fn cell(var: Variable) -> Self {
        Expr::Cell(var)
    }

    pub fn zero() -> Self {
        Expr::Constant(F::zero())
    }

    pub fn one() -> Self {
        Expr::Constant(F::one())
    }

    pub fn square(self) -> Self {
        self.clone() * self
    }

    /// Total degree of the polynomial, counting every cell as a variable
    pub fn degree(&self) -> u64 {
        match self {
            Expr::Constant(_) => 0,
            Expr::Cell(_) => 1,
            Expr::Add(x, y) | Expr::Sub(x, y) => std::cmp::max(x.degree(), y.degree()),
            Expr::Mul(x, y) => x.degree() + y.degree(),
            Expr::Neg(x) => x.degree(),
        }
    }

    /// Every cell the expression reads, with repetitions
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = vec![];
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<Variable>) {
        match self {
            Expr::Constant(_) => (),
            Expr::Cell(v) => vars.push(*v),
            Expr::Add(x, y) | Expr::Sub(x, y) | Expr::Mul(x, y) => {
                x.collect_variables(vars);
                y.collect_variables(vars);
            }
            Expr::Neg(x) => x.collect_variables(vars),
        }
    }

    /// Evaluates the expression, reading cells through `cell`
    pub fn evaluate<G>(&self, cell: &G) -> F
    where
        G: Fn(&Variable) -> F,
    {
        match self {
            Expr::Constant(c) => *c,
            Expr::Cell(v) => cell(v),
            Expr::Add(x, y) => x.evaluate(cell) + y.evaluate(cell),
            Expr::Sub(x, y) => x.evaluate(cell) - y.evaluate(cell),
            Expr::Mul(x, y) => x.evaluate(cell) * y.evaluate(cell),
            Expr::Neg(x) => -x.evaluate(cell),
        }
    }
}

impl<F> Add for Expr<F> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }
}

impl<F> Sub for Expr<F> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Expr::Sub(Box::new(self), Box::new(other))
    }
}

impl<F> Mul for Expr<F> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Expr::Mul(Box::new(self), Box::new(other))
    }
}

impl<F> Neg for Expr<F> {
    type Output = Self;
    fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }
}

impl<F: Field> From<u64> for Expr<F> {
    fn from(x: u64) -> Self {
        Expr::Constant(F::from(x))
    }
}

impl<F> From<Variable> for Expr<F> {
    fn from(var: Variable) -> Self {
        Expr::Cell(var)
    }
}

impl<F: Field> std::iter::Sum for Expr<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(|acc, x| acc + x).unwrap_or_else(Expr::zero)
    }
}

/// Shorthands to write gate constraints
pub mod prologue {
    pub use super::Expr as E;
    use crate::circuits::wires::Variable;
    use ark_ff::Field;

    /// Witness column `col` on the row the selector is enabled on
    pub fn witness_curr<F>(col: usize) -> E<F> {
        E::Cell(Variable::witness(col, 0))
    }

    /// Witness column `col` on the row after
    pub fn witness_next<F>(col: usize) -> E<F> {
        E::Cell(Variable::witness(col, 1))
    }

    /// Witness column `col` on the row before
    pub fn witness_prev<F>(col: usize) -> E<F> {
        E::Cell(Variable::witness(col, -1))
    }

    pub fn constant<F: Field>(c: F) -> E<F> {
        E::Constant(c)
    }
}

/// Common constraint shapes
pub mod constraints {
    use super::Expr as E;
    use ark_ff::Field;

    /// Creates a constraint to enforce that b is either 0 or 1.
    pub fn boolean<F: Field>(b: &E<F>) -> E<F> {
        b.clone().square() - b.clone()
    }

    /// Crumb constraint for 2-bit value x
    pub fn crumb<F: Field>(x: &E<F>) -> E<F> {
        // Assert x \in [0,3] i.e. assert x*(x - 1)*(x - 2)*(x - 3) == 0
        x.clone() * (x.clone() - E::one()) * (x.clone() - 2u64.into()) * (x.clone() - 3u64.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{constraints::*, prologue::*};
    use crate::circuits::wires::Variable;
    use blueprint_utils::pasta::Fp;

    #[test]
    fn test_crumb_degree_and_roots() {
        let x = witness_curr::<Fp>(1);
        let c = crumb(&x);
        assert_eq!(c.degree(), 4);
        for v in 0u64..4 {
            assert_eq!(c.evaluate(&|_: &Variable| Fp::from(v)), Fp::from(0u64));
        }
        assert_ne!(c.evaluate(&|_: &Variable| Fp::from(4u64)), Fp::from(0u64));
    }

    #[test]
    fn test_boolean() {
        let b = boolean(&witness_next::<Fp>(2));
        assert_eq!(b.degree(), 2);
        assert_eq!(b.variables(), vec![Variable::witness(2, 1); 3]);
        assert_eq!(b.evaluate(&|_: &Variable| Fp::from(1u64)), Fp::from(0u64));
        assert_eq!(b.evaluate(&|_: &Variable| Fp::from(2u64)), Fp::from(2u64));
    }
}
