//! A pure-Rust implementation of group operations on secp256k1.

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod mul;
pub(crate) mod projective;
pub(crate) mod scalar;
pub(crate) mod scratch;
mod util;

pub use mul::lincomb_vartime;

use field::FieldElement;
use projective::ProjectivePoint;

const CURVE_EQUATION_B_SINGLE: u64 = 7;

/// `b` coefficient of the curve equation `y² = x³ + b`.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_u64(CURVE_EQUATION_B_SINGLE);

#[cfg(test)]
mod tests {
    use super::{affine::AffinePoint, CURVE_EQUATION_B};

    #[test]
    fn generator_satisfies_curve_equation() {
        let g = AffinePoint::GENERATOR;
        let lhs = g.y.square();
        let rhs = g.x.square() * &g.x + &CURVE_EQUATION_B;
        assert_eq!(lhs, rhs);
    }
}
