//! The proposition language `Prop`: a boolean algebra over `Expr`
//! used to accumulate path constraints.

use crate::expr::{EWord, SomeExpr};

/// A proposition. `PEq` is sort-polymorphic via `SomeExpr`: it only equates
/// pairs of the same sort (enforced by construction, see `peq`), so two
/// `PEq` nodes with mismatched sorts cannot arise from the smart
/// constructor, only from direct enum construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prop {
    PEq(SomeExpr, SomeExpr),
    PLT(Box<EWord>, Box<EWord>),
    PGT(Box<EWord>, Box<EWord>),
    PLEq(Box<EWord>, Box<EWord>),
    PGEq(Box<EWord>, Box<EWord>),
    PNeg(Box<Prop>),
    PAnd(Box<Prop>, Box<Prop>),
    POr(Box<Prop>, Box<Prop>),
    PImpl(Box<Prop>, Box<Prop>),
    PBool(bool),
}

/// Builds `PEq(a, b)`, the one place sort-matching is checked: equating
/// terms of different sorts is always `PBool(false)` rather than a node a
/// solver would have to reject.
pub fn peq(a: SomeExpr, b: SomeExpr) -> Prop {
    if a.sort_tag() != b.sort_tag() {
        return Prop::PBool(false);
    }
    Prop::PEq(a, b)
}

/// `pand(xs) = foldl(PAnd, PBool(true), xs)`.
pub fn pand(xs: impl IntoIterator<Item = Prop>) -> Prop {
    xs.into_iter()
        .fold(Prop::PBool(true), |acc, p| Prop::PAnd(Box::new(acc), Box::new(p)))
}

/// `por(xs) = foldl(POr, PBool(false), xs)`.
pub fn por(xs: impl IntoIterator<Item = Prop>) -> Prop {
    xs.into_iter()
        .fold(Prop::PBool(false), |acc, p| Prop::POr(Box::new(acc), Box::new(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Byte;
    use crate::numeric::W256;

    #[test]
    fn peq_rejects_mismatched_sorts() {
        let a = SomeExpr::EWord(EWord::Lit(W256::ZERO));
        let b = SomeExpr::Byte(Byte::LitByte(0));
        assert_eq!(peq(a, b), Prop::PBool(false));
    }

    #[test]
    fn peq_accepts_same_sort() {
        let a = SomeExpr::EWord(EWord::Lit(W256::ZERO));
        let b = SomeExpr::EWord(EWord::Lit(W256::ZERO));
        assert!(matches!(peq(a, b), Prop::PEq(..)));
    }

    #[test]
    fn pand_of_empty_is_true() {
        assert_eq!(pand(std::iter::empty()), Prop::PBool(true));
    }

    #[test]
    fn por_of_empty_is_false() {
        assert_eq!(por(std::iter::empty()), Prop::PBool(false));
    }

    #[test]
    fn pand_folds_left_to_right() {
        let p = pand(vec![Prop::PBool(true), Prop::PBool(false)]);
        assert_eq!(
            p,
            Prop::PAnd(
                Box::new(Prop::PAnd(Box::new(Prop::PBool(true)), Box::new(Prop::PBool(true)))),
                Box::new(Prop::PBool(false))
            )
        );
    }
}
