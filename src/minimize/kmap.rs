//! Karnaugh maps.
//!
//! Cells are laid out on a grid whose rows and columns follow Gray-code order, so
//! that horizontally or vertically adjacent cells (including across the edges)
//! differ in exactly one variable. The first `variables / 2` variables select the
//! row, the remaining ones the column:
//!
//! | Variables | Grid |
//! |-----------|------|
//! | 2 | 2×2 |
//! | 3 | 2×4 |
//! | 4 | 4×4 |
//! | 5 | 4×8 |
//! | 6 | 8×8 |
//!
//! Grouping searches power-of-two rectangles (with wraparound) from the largest
//! size down. A rectangle becomes a group when all its cells are true, at least
//! one of them is not yet covered, and its minterms form a subcube. The last
//! check matters on 8-wide axes, where four Gray-adjacent codes need not share
//! any bit. Groups made redundant by later ones are dropped at the end.
//!
//! On 5 and 6 variable maps, adjacency through the mirror axis of the 3-bit Gray
//! code is not searched, so the groups there are valid but may not be minimal.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use super::implicant::{sum_of_implicants, Implicant};
use crate::ast::Expr;
use crate::error::MinimizeError;
use crate::utils::{gray_sequence, is_power_of_two};

/// Grid geometry for a variable count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub variables: usize,
    pub row_codes: Vec<u32>,
    pub col_codes: Vec<u32>,
    col_bits: u32,
}

impl Layout {
    pub fn new(variables: usize) -> Result<Self, MinimizeError> {
        if !(2..=6).contains(&variables) {
            return Err(MinimizeError::UnsupportedMapSize(variables));
        }
        let row_bits = (variables / 2) as u32;
        let col_bits = variables as u32 - row_bits;
        Ok(Self {
            variables,
            row_codes: gray_sequence(row_bits),
            col_codes: gray_sequence(col_bits),
            col_bits,
        })
    }

    pub fn rows(&self) -> usize {
        self.row_codes.len()
    }

    pub fn cols(&self) -> usize {
        self.col_codes.len()
    }

    /// Minterm shown at `(row, col)`; indices wrap around.
    pub fn minterm_at(&self, row: usize, col: usize) -> u32 {
        let r = self.row_codes[row % self.rows()];
        let c = self.col_codes[col % self.cols()];
        (r << self.col_bits) | c
    }
}

/// One square of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub minterm: u32,
    pub value: bool,
}

/// A rectangle of true cells, anchored at its top-left cell.
///
/// A group may wrap around the right and bottom edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
    pub implicant: Implicant,
}

/// A filled Karnaugh map with its chosen groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KMap {
    pub variables: Vec<String>,
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells.
    pub cells: Vec<Cell>,
    pub groups: Vec<Group>,
}

impl KMap {
    /// Fill `layout` with the function whose true minterms are `minterms` and group it.
    pub fn new(layout: &Layout, variables: Vec<String>, minterms: &[u32]) -> Self {
        let mut truth = vec![false; 1 << layout.variables];
        for &m in minterms {
            if let Some(slot) = truth.get_mut(m as usize) {
                *slot = true;
            }
        }
        let mut cells = Vec::with_capacity(truth.len());
        for row in 0..layout.rows() {
            for col in 0..layout.cols() {
                let minterm = layout.minterm_at(row, col);
                cells.push(Cell {
                    row,
                    col,
                    minterm,
                    value: truth[minterm as usize],
                });
            }
        }
        let groups = find_groups(layout, &truth);
        Self {
            variables,
            rows: layout.rows(),
            cols: layout.cols(),
            cells,
            groups,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// OR of the product terms of the groups.
    pub fn to_expr(&self) -> Expr {
        sum_of_implicants(self.groups.iter().map(|g| &g.implicant), &self.variables)
    }
}

fn powers_of_two_up_to(n: usize) -> impl Iterator<Item = usize> {
    (0..usize::BITS).map(|k| 1usize << k).take_while(move |&p| p <= n)
}

/// Choose groups covering every true cell of `truth` (indexed by minterm).
pub fn find_groups(layout: &Layout, truth: &[bool]) -> Vec<Group> {
    let (rows, cols) = (layout.rows(), layout.cols());
    let mut shapes: Vec<(usize, usize)> = powers_of_two_up_to(rows)
        .flat_map(|h| powers_of_two_up_to(cols).map(move |w| (h, w)))
        .collect();
    shapes.sort_by_key(|&(h, w)| (Reverse(h * w), h));

    let mut covered = vec![false; truth.len()];
    let mut groups: Vec<Group> = Vec::new();
    for (height, width) in shapes {
        debug_assert!(is_power_of_two(height * width));
        for row in 0..rows {
            // A full-height (full-width) rectangle is the same from every anchor.
            if height == rows && row > 0 {
                break;
            }
            for col in 0..cols {
                if width == cols && col > 0 {
                    break;
                }
                let minterms: BTreeSet<u32> = (0..height)
                    .flat_map(|i| (0..width).map(move |j| (i, j)))
                    .map(|(i, j)| layout.minterm_at(row + i, col + j))
                    .collect();
                if !minterms.iter().all(|&m| truth[m as usize]) {
                    continue;
                }
                if minterms.iter().all(|&m| covered[m as usize]) {
                    continue;
                }
                let implicant = Implicant::spanning(&minterms, layout.variables);
                if !implicant.is_subcube() {
                    continue;
                }
                debug!("group {}x{} at ({}, {}): {}", height, width, row, col, implicant);
                for &m in &minterms {
                    covered[m as usize] = true;
                }
                groups.push(Group {
                    row,
                    col,
                    height,
                    width,
                    implicant,
                });
            }
        }
    }

    remove_redundant(&mut groups);
    groups
}

/// Drop groups whose cells are all covered by the remaining groups, smallest first.
fn remove_redundant(groups: &mut Vec<Group>) {
    let mut index = groups.len();
    while index > 0 {
        index -= 1;
        let redundant = groups[index].implicant.minterms.iter().all(|m| {
            groups
                .iter()
                .enumerate()
                .any(|(other, g)| other != index && g.implicant.minterms.contains(m))
        });
        if redundant {
            debug!("drop redundant group {}", groups[index].implicant);
            groups.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::eval;
    use crate::parse::parse;
    use crate::render::to_boolean_string;

    fn kmap(input: &str) -> KMap {
        let expr = parse(input).unwrap();
        let variables = expr.variables();
        let minterms = eval::minterms(&expr, &variables).unwrap();
        let layout = Layout::new(variables.len()).unwrap();
        KMap::new(&layout, variables, &minterms)
    }

    #[test]
    fn test_layout_dimensions() {
        let dims: Vec<(usize, usize)> = (2..=6)
            .map(|n| {
                let layout = Layout::new(n).unwrap();
                (layout.rows(), layout.cols())
            })
            .collect();
        assert_eq!(dims, vec![(2, 2), (2, 4), (4, 4), (4, 8), (8, 8)]);
        assert_eq!(Layout::new(1), Err(MinimizeError::UnsupportedMapSize(1)));
        assert_eq!(Layout::new(7), Err(MinimizeError::UnsupportedMapSize(7)));
    }

    #[test]
    fn test_cells_follow_gray_code() {
        let layout = Layout::new(4).unwrap();
        // Row 2 is code 11, column 3 is code 10: minterm 1110.
        assert_eq!(layout.minterm_at(2, 3), 0b1110);
        for row in 0..4 {
            for col in 0..4 {
                let here = layout.minterm_at(row, col);
                assert_eq!((here ^ layout.minterm_at(row, col + 1)).count_ones(), 1);
                assert_eq!((here ^ layout.minterm_at(row + 1, col)).count_ones(), 1);
            }
        }
    }

    #[test]
    fn test_three_variable_groups() {
        let map = kmap("A*B+!A*C");
        assert_eq!(map.groups.len(), 2);
        assert_eq!(to_boolean_string(&map.to_expr()), "!A*C+A*B");
        assert_eq!(map.cell(1, 2).map(|c| (c.minterm, c.value)), Some((7, true)));
        assert_eq!(map.cell(2, 0), None);
    }

    #[test]
    fn test_wraparound_corners() {
        // !B*!D over four variables: the four corners of the map.
        let map = kmap("!B*!D+A*!A*C");
        assert_eq!(map.groups.len(), 1);
        assert_eq!(map.groups[0].implicant.to_string(), "-0-0");
        assert_eq!(to_boolean_string(&map.to_expr()), "!B*!D");
    }

    #[test]
    fn test_redundant_group_dropped() {
        // Four pairs around a ring plus the middle quad; the quad is redundant.
        let map = kmap("!A*!B*C+!A*B*D+A*B*!C+A*!B*!D+B*C*D");
        for g in &map.groups {
            assert!(g.implicant.is_subcube());
        }
        let expr = map.to_expr();
        let variables = map.variables.clone();
        let original = parse("!A*!B*C+!A*B*D+A*B*!C+A*!B*!D+B*C*D").unwrap();
        assert_eq!(eval::minterms(&expr, &variables).unwrap(), eval::minterms(&original, &variables).unwrap());
    }

    #[test]
    fn test_constant_maps() {
        let map = kmap("A+!A+B");
        assert_eq!(map.to_expr(), Expr::one());
        let map = kmap("A*!A*B");
        assert_eq!(map.to_expr(), Expr::zero());
        assert!(map.groups.is_empty());
    }

    #[test]
    fn test_five_variables_cover() {
        let input = "A*B*!C*D+!A*!E+B*C*E+!B*!C*!D*E";
        let map = kmap(input);
        assert_eq!((map.rows, map.cols), (4, 8));
        let original = parse(input).unwrap();
        assert_eq!(
            eval::minterms(&map.to_expr(), &map.variables).unwrap(),
            eval::minterms(&original, &map.variables).unwrap()
        );
    }
}
