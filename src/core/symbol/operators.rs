//! Operator overloading for `Expr`, `Symbol`, integers and exact rationals.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_rational::BigRational;

use super::Symbol;
use crate::Expr;

macro_rules! impl_binary_ops {
    ($lhs:ty, $rhs:ty, $to_lhs:expr, $to_rhs:expr) => {
        impl Add<$rhs> for $lhs {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::add_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Sub<$rhs> for $lhs {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                Expr::sub_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Mul<$rhs> for $lhs {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::mul_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Div<$rhs> for $lhs {
            type Output = Expr;
            fn div(self, rhs: $rhs) -> Expr {
                Expr::div_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
    };
}

// Symbol on the left
impl_binary_ops!(Symbol, Symbol, |s: Symbol| s.to_expr(), |r: Symbol| r.to_expr());
impl_binary_ops!(Symbol, Expr, |s: Symbol| s.to_expr(), |r: Expr| r);
impl_binary_ops!(Symbol, &Expr, |s: Symbol| s.to_expr(), |r: &Expr| r.clone());
impl_binary_ops!(Symbol, i32, |s: Symbol| s.to_expr(), Expr::from);
impl_binary_ops!(Symbol, BigRational, |s: Symbol| s.to_expr(), Expr::number);

// Expr on the left
impl_binary_ops!(Expr, Expr, |s: Expr| s, |r: Expr| r);
impl_binary_ops!(Expr, &Expr, |s: Expr| s, |r: &Expr| r.clone());
impl_binary_ops!(Expr, Symbol, |s: Expr| s, |r: Symbol| r.to_expr());
impl_binary_ops!(Expr, i32, |s: Expr| s, Expr::from);
impl_binary_ops!(Expr, BigRational, |s: Expr| s, Expr::number);

// &Expr on the left (allows &a + &b without explicit .clone())
impl_binary_ops!(&Expr, &Expr, |e: &Expr| e.clone(), |r: &Expr| r.clone());
impl_binary_ops!(&Expr, Expr, |e: &Expr| e.clone(), |r: Expr| r);
impl_binary_ops!(&Expr, Symbol, |e: &Expr| e.clone(), |r: Symbol| r.to_expr());
impl_binary_ops!(&Expr, i32, |e: &Expr| e.clone(), Expr::from);

// Integers and rationals on the left
impl_binary_ops!(i32, Expr, Expr::from, |r: Expr| r);
impl_binary_ops!(i32, &Expr, Expr::from, |r: &Expr| r.clone());
impl_binary_ops!(i32, Symbol, Expr::from, |r: Symbol| r.to_expr());
impl_binary_ops!(BigRational, Expr, Expr::number, |r: Expr| r);
impl_binary_ops!(BigRational, Symbol, Expr::number, |r: Symbol| r.to_expr());

impl Neg for Symbol {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg_expr(self.to_expr())
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg_expr(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg_expr(self.clone())
    }
}
