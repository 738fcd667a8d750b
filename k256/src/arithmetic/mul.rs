//! Scalar multiplication.
//!
//! - [`mul`]: constant-time `k·P` with a 4-bit fixed window.
//! - [`GeneratorTable`]: constant-time `k·G` from a precomputed comb of
//!   affine multiples.
//! - [`lincomb_vartime`]: Strauss multi-scalar multiplication over width-5
//!   NAF digits, for public inputs only.

use super::{
    affine::AffinePoint,
    projective::ProjectivePoint,
    scalar::{Scalar, WNAF_LEN},
    scratch::{StraussScratch, TABLE_SIZE},
};
use crate::Result;
use alloc::vec::Vec;
use elliptic_curve::subtle::{ConditionallySelectable, ConstantTimeEq};

/// Width of the signed digits used by [`lincomb_vartime`].
const WNAF_WINDOW: usize = 5;

/// Number of 4-bit windows in a scalar.
const WINDOWS: usize = 64;

/// Constant-time `k·P`.
///
/// Scans `k` in 4-bit windows from the top, selecting each table entry with a
/// full masked scan and adding it with complete (masked) addition.
pub(crate) fn mul(point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let mut table = [ProjectivePoint::IDENTITY; 16];
    table[1] = *point;
    for i in 2..16 {
        table[i] = table[i - 1] + point;
    }

    let mut acc = ProjectivePoint::IDENTITY;
    for window in (0..WINDOWS).rev() {
        acc = acc.double().double().double().double();

        let digit = k.bits(window * 4, 4);
        let mut entry = ProjectivePoint::IDENTITY;
        for (j, candidate) in table.iter().enumerate() {
            entry.conditional_assign(candidate, (j as u32).ct_eq(&digit));
        }
        acc += entry;
    }
    acc
}

/// Precomputed multiples of the generator: entry `(i, j)` is `j·16^i·G` for
/// 64 windows and digits `0..16`.
///
/// Read-only once built and safe to share between threads (see
/// [`Context`](crate::Context)).
#[derive(Clone)]
pub struct GeneratorTable {
    entries: Vec<AffinePoint>,
}

impl GeneratorTable {
    /// Builds the table. Costs roughly a thousand point additions and a
    /// single batched field inversion.
    pub fn new() -> Self {
        let mut projective = Vec::with_capacity(WINDOWS * 16);
        let mut base = ProjectivePoint::GENERATOR;
        for _ in 0..WINDOWS {
            let mut multiple = ProjectivePoint::IDENTITY;
            for _ in 0..16 {
                projective.push(multiple);
                multiple = multiple.add_vartime(&base);
            }
            base = base.double().double().double().double();
        }

        let mut entries = alloc::vec![AffinePoint::IDENTITY; WINDOWS * 16];
        ProjectivePoint::batch_normalize(&projective, &mut entries);
        Self { entries }
    }

    /// Constant-time `k·G`.
    ///
    /// Every window scans all 16 entries; no doublings are needed since each
    /// window has its own table row.
    pub fn mul(&self, k: &Scalar) -> ProjectivePoint {
        let mut acc = ProjectivePoint::IDENTITY;
        for (window, row) in self.entries.chunks_exact(16).enumerate() {
            let digit = k.bits(window * 4, 4);
            let mut entry = AffinePoint::IDENTITY;
            for (j, candidate) in row.iter().enumerate() {
                entry.conditional_assign(candidate, (j as u32).ct_eq(&digit));
            }
            acc = acc.add_mixed(&entry);
        }
        acc
    }
}

impl Default for GeneratorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for GeneratorTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeneratorTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Writes the odd multiples `P, 3P, …, 15P` into `out`.
fn odd_multiples(point: &ProjectivePoint, out: &mut [ProjectivePoint]) {
    debug_assert_eq!(out.len(), TABLE_SIZE);
    let twice = point.double();
    out[0] = *point;
    for i in 1..out.len() {
        out[i] = out[i - 1].add_vartime(&twice);
    }
}

/// Runs the lock-step digit scan over prepared tables and digit strings.
fn strauss_accumulate(tables: &[AffinePoint], digits: &[i8]) -> ProjectivePoint {
    let terms = digits.len() / WNAF_LEN;
    debug_assert_eq!(tables.len(), terms * TABLE_SIZE);

    // Skip the leading positions where every digit is zero.
    let top = (0..WNAF_LEN)
        .rev()
        .find(|&bit| (0..terms).any(|t| digits[t * WNAF_LEN + bit] != 0));
    let top = match top {
        Some(top) => top,
        None => return ProjectivePoint::IDENTITY,
    };

    let mut acc = ProjectivePoint::IDENTITY;
    for bit in (0..=top).rev() {
        acc = acc.double();
        for t in 0..terms {
            let digit = digits[t * WNAF_LEN + bit];
            if digit == 0 {
                continue;
            }
            let entry = &tables[t * TABLE_SIZE + (digit.unsigned_abs() as usize - 1) / 2];
            acc = if digit > 0 {
                acc.add_mixed_vartime(entry)
            } else {
                acc.add_mixed_vartime(&-*entry)
            };
        }
    }
    acc
}

/// Computes `Σ kᵢ·Pᵢ + g·G` in variable time (Strauss's algorithm).
///
/// All working memory comes from `scratch` and is released before
/// returning, whether or not the call succeeds. Terms with a zero scalar or
/// an identity point are skipped, as is `G` when `g` is zero. Returns
/// [`Error::ScratchExhausted`] if `scratch` was sized for fewer terms.
///
/// Only call this with public scalars and points.
///
/// [`Error::ScratchExhausted`]: crate::Error::ScratchExhausted
pub fn lincomb_vartime(
    terms: &[(Scalar, ProjectivePoint)],
    g: &Scalar,
    scratch: &mut StraussScratch,
) -> Result<ProjectivePoint> {
    let checkpoint = scratch.checkpoint();
    let result = strauss(terms, g, scratch);
    scratch.restore(checkpoint);
    result
}

fn strauss(
    terms: &[(Scalar, ProjectivePoint)],
    g: &Scalar,
    scratch: &mut StraussScratch,
) -> Result<ProjectivePoint> {
    let generator = (*g, ProjectivePoint::GENERATOR);
    let live = terms
        .iter()
        .chain(core::iter::once(&generator))
        .filter(|(k, p)| !bool::from(k.is_zero()) && !bool::from(p.is_identity()));
    let count = live.clone().count();
    if count == 0 {
        return Ok(ProjectivePoint::IDENTITY);
    }

    let StraussScratch {
        multiples,
        tables,
        digits,
        ..
    } = scratch;
    let multiples_range = multiples.alloc(count * TABLE_SIZE)?;
    let tables_range = tables.alloc(count * TABLE_SIZE)?;
    let digits_range = digits.alloc(count * WNAF_LEN)?;

    let multiples = multiples.get_mut(multiples_range);
    let digits = digits.get_mut(digits_range);
    for (((k, p), table), wnaf) in live
        .zip(multiples.chunks_exact_mut(TABLE_SIZE))
        .zip(digits.chunks_exact_mut(WNAF_LEN))
    {
        odd_multiples(p, table);
        wnaf.copy_from_slice(&k.to_wnaf(WNAF_WINDOW));
    }

    let tables = tables.get_mut(tables_range);
    ProjectivePoint::batch_normalize(multiples, tables);
    Ok(strauss_accumulate(tables, digits))
}

/// `a·P + b·G` in variable time with stack-allocated tables.
///
/// Used by single-signature verification, which has no scratch space.
pub(crate) fn lincomb2_vartime(a: &Scalar, p: &ProjectivePoint, b: &Scalar) -> ProjectivePoint {
    let mut multiples = [ProjectivePoint::IDENTITY; 2 * TABLE_SIZE];
    let mut digits = [0i8; 2 * WNAF_LEN];
    let terms = [(a, p), (b, &ProjectivePoint::GENERATOR)];

    for (((k, point), table), wnaf) in terms
        .iter()
        .zip(multiples.chunks_exact_mut(TABLE_SIZE))
        .zip(digits.chunks_exact_mut(WNAF_LEN))
    {
        odd_multiples(point, table);
        wnaf.copy_from_slice(&k.to_wnaf(WNAF_WINDOW));
    }

    let mut tables = [AffinePoint::IDENTITY; 2 * TABLE_SIZE];
    ProjectivePoint::batch_normalize(&multiples, &mut tables);
    strauss_accumulate(&tables, &digits)
}
