//! Small synthetic two-chain structures shared by the unit tests.
//!
//! Residues sit 10 Å apart along x, so only residues directly across the
//! interface come into contact.

use crate::structure::{AtomRecord, AtomTable};

/// Heavy atoms of one residue around `center`; glycine has no CB.
pub(crate) fn residue(chain: &str, resi: isize, resn: &str, center: [f64; 3]) -> Vec<AtomRecord> {
    let [x, y, z] = center;
    let mut atoms = vec![
        AtomRecord::new("N", resn, resi, chain, [x - 1.0, y, z]),
        AtomRecord::new("CA", resn, resi, chain, [x, y, z]),
        AtomRecord::new("C", resn, resi, chain, [x + 1.0, y, z]),
        AtomRecord::new("O", resn, resi, chain, [x + 1.0, y, z + 1.0]),
    ];
    if resn != "GLY" {
        atoms.push(AtomRecord::new("CB", resn, resi, chain, [x, y, z - 1.0]));
    }
    atoms
}

/// Chain A (GLY1, ALA2, SER3, LYS4) facing chain B (LEU1, GLY2, VAL3) across `gap` Å.
/// LYS4 is far from everything else.
pub(crate) fn full_interface(gap: f64) -> AtomTable {
    [
        residue("A", 1, "GLY", [0.0, 0.0, 0.0]),
        residue("A", 2, "ALA", [10.0, 0.0, 0.0]),
        residue("A", 3, "SER", [20.0, 0.0, 0.0]),
        residue("A", 4, "LYS", [60.0, 0.0, 0.0]),
        residue("B", 1, "LEU", [0.0, gap, 0.0]),
        residue("B", 2, "GLY", [10.0, gap, 0.0]),
        residue("B", 3, "VAL", [20.0, gap, 0.0]),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Three contact residues at 5.5 Å: A:GLY1, A:ALA2 and B:LEU1, with the
/// closest cross-chain atoms 5.0 Å apart.
pub(crate) fn sparse_interface() -> AtomTable {
    [
        residue("A", 1, "GLY", [0.0, 0.0, 0.0]),
        residue("A", 2, "ALA", [10.0, 0.0, 0.0]),
        residue("A", 3, "SER", [40.0, 0.0, 0.0]),
        residue("B", 1, "LEU", [5.0, 4.0, 0.0]),
    ]
    .into_iter()
    .flatten()
    .collect()
}
