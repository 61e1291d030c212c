//! Product terms over an ordered variable list.
//!
//! An implicant fixes some variables to `0` or `1` and leaves the rest free.
//! Bit positions follow the variable order, first variable first, matching the
//! minterm encoding of [`eval`][crate::eval].

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::ast::Expr;
use crate::utils::msb_bit;

/// One position of an implicant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
pub enum Bit {
    Zero,
    One,
    DontCare,
}

impl Bit {
    pub fn symbol(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
            Bit::DontCare => '-',
        }
    }
}

/// A product term together with the minterms it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Implicant {
    pub minterms: BTreeSet<u32>,
    pub bits: Vec<Bit>,
}

impl Implicant {
    /// The implicant covering exactly `minterm` over `width` variables.
    pub fn from_minterm(minterm: u32, width: usize) -> Self {
        let bits = (0..width)
            .map(|i| if msb_bit(minterm, width, i) { Bit::One } else { Bit::Zero })
            .collect();
        Self {
            minterms: BTreeSet::from([minterm]),
            bits,
        }
    }

    /// The smallest implicant covering all of `minterms`.
    ///
    /// Positions on which the minterms agree are fixed, the others are free. The
    /// result covers exactly `minterms` only when they form a subcube.
    pub fn spanning(minterms: &BTreeSet<u32>, width: usize) -> Self {
        let bits = (0..width)
            .map(|i| {
                let mut values = minterms.iter().map(|&m| msb_bit(m, width, i));
                match values.next() {
                    Some(first) if values.all(|v| v == first) => {
                        if first {
                            Bit::One
                        } else {
                            Bit::Zero
                        }
                    }
                    _ => Bit::DontCare,
                }
            })
            .collect();
        Self {
            minterms: minterms.clone(),
            bits,
        }
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Number of `1` positions, the grouping key of the merge phase.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::One).count()
    }

    /// Number of fixed positions, i.e. literals of the product term.
    pub fn literal_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b != Bit::DontCare).count()
    }

    /// Whether the free positions are exactly `log2(|minterms|)`, i.e. the
    /// minterms form a subcube.
    pub fn is_subcube(&self) -> bool {
        let free = self.width() - self.literal_count();
        free < 32 && self.minterms.len() == 1usize << free
    }

    pub fn covers(&self, minterm: u32) -> bool {
        let width = self.width();
        self.bits.iter().enumerate().all(|(i, bit)| match bit {
            Bit::Zero => !msb_bit(minterm, width, i),
            Bit::One => msb_bit(minterm, width, i),
            Bit::DontCare => true,
        })
    }

    /// Merge with an implicant that differs in exactly one fixed position.
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.width() != other.width() {
            return None;
        }
        let mut differing = None;
        for (i, (a, b)) in self.bits.iter().zip(&other.bits).enumerate() {
            if a == b {
                continue;
            }
            if *a == Bit::DontCare || *b == Bit::DontCare || differing.is_some() {
                return None;
            }
            differing = Some(i);
        }
        let position = differing?;
        let mut bits = self.bits.clone();
        bits[position] = Bit::DontCare;
        Some(Implicant {
            minterms: self.minterms.union(&other.minterms).copied().collect(),
            bits,
        })
    }

    /// The product term: fixed positions become literals, free ones are omitted.
    ///
    /// An implicant with no fixed positions is the constant `1`.
    pub fn to_expr(&self, variables: &[String]) -> Expr {
        let literals: Vec<Expr> = self
            .bits
            .iter()
            .zip(variables)
            .filter_map(|(bit, name)| match bit {
                Bit::Zero => Some(Expr::literal(name, false)),
                Bit::One => Some(Expr::literal(name, true)),
                Bit::DontCare => None,
            })
            .collect();
        Expr::and_all(literals)
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit.symbol())?;
        }
        Ok(())
    }
}

/// Sum of the product terms of `implicants`; `0` when there are none.
pub fn sum_of_implicants<'a, I>(implicants: I, variables: &[String]) -> Expr
where
    I: IntoIterator<Item = &'a Implicant>,
{
    Expr::or_all(implicants.into_iter().map(|imp| imp.to_expr(variables)))
}
