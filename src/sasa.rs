//! Solvent accessible surface area of arbitrary atom sets.
//!
//! The calculator only talks to [`SurfaceAreaEngine`]; [`ShrakeRupley`] is the
//! implementation backed by `rust-sasa`.

mod shrake_rupley;

pub use shrake_rupley::{vdw_radius, SasaSettings, ShrakeRupley};

use crate::errors::BsaError;
use crate::structure::AtomRecord;
use std::collections::HashMap;

/// Element column used by the surface area engine: the first character of the
/// atom name, right-aligned in two columns (`CA` -> `" C"`).
pub fn element_symbol(atom_name: &str) -> String {
    let first = atom_name.chars().next().map(String::from).unwrap_or_default();
    format!("{first:>2}")
}

/// An atom as seen by the surface area engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceAtom {
    /// Two-column element symbol, see [`element_symbol`]
    pub element: String,
    /// Residue name
    pub resn: String,
    /// Residue number
    pub resi: isize,
    /// Chain identifier
    pub chain: String,
    /// Cartesian coordinates in Å
    pub pos: [f64; 3],
}

impl From<&AtomRecord> for SurfaceAtom {
    fn from(atom: &AtomRecord) -> Self {
        Self {
            element: element_symbol(&atom.name),
            resn: atom.resn.clone(),
            resi: atom.resi,
            chain: atom.chain.clone(),
            pos: atom.pos,
        }
    }
}

/// Ordered set of atoms handed to the engine in one calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceAtomSet {
    atoms: Vec<SurfaceAtom>,
}

impl SurfaceAtomSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an atom.
    pub fn push(&mut self, atom: SurfaceAtom) {
        self.atoms.push(atom);
    }

    /// Atoms in insertion order.
    pub fn atoms(&self) -> &[SurfaceAtom] {
        &self.atoms
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the set has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl<'a> FromIterator<&'a AtomRecord> for SurfaceAtomSet {
    fn from_iter<I: IntoIterator<Item = &'a AtomRecord>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().map(SurfaceAtom::from).collect(),
        }
    }
}

/// Selects one residue by chain and residue number.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ResidueSelection {
    /// Chain identifier
    pub chain: String,
    /// Residue number
    pub resi: isize,
}

impl ResidueSelection {
    /// Select residue `resi` of `chain`.
    pub fn new(chain: &str, resi: isize) -> Self {
        Self {
            chain: chain.to_string(),
            resi,
        }
    }
}

/// Per-atom areas of one [`SurfaceAtomSet`], aggregated per residue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SasaResult {
    atom_areas: Vec<f64>,
    residue_areas: HashMap<ResidueSelection, f64>,
}

impl SasaResult {
    /// `atom_areas` must follow the order of `atoms`.
    pub fn new(atoms: &SurfaceAtomSet, atom_areas: Vec<f64>) -> Self {
        let mut residue_areas = HashMap::new();
        for (atom, area) in atoms.atoms().iter().zip(&atom_areas) {
            *residue_areas
                .entry(ResidueSelection::new(&atom.chain, atom.resi))
                .or_insert(0.0) += area;
        }
        Self {
            atom_areas,
            residue_areas,
        }
    }

    /// Area of every atom, in set order.
    pub fn atom_areas(&self) -> &[f64] {
        &self.atom_areas
    }

    /// Summed area per residue.
    pub fn residue_areas(&self) -> &HashMap<ResidueSelection, f64> {
        &self.residue_areas
    }

    /// Area of the selected residue, 0 if no atom matches.
    pub fn residue_area(&self, selection: &ResidueSelection) -> f64 {
        self.residue_areas.get(selection).copied().unwrap_or(0.0)
    }

    /// Area of the whole set.
    pub fn total(&self) -> f64 {
        self.atom_areas.iter().sum()
    }
}

/// Computes accessible surface areas.
pub trait SurfaceAreaEngine: Sync {
    /// Accessible area of every atom in `atoms`.
    fn calc(&self, atoms: &SurfaceAtomSet) -> Result<SasaResult, BsaError>;

    /// Summed area of the atoms matching `selection` in a precomputed result.
    fn select_area(&self, result: &SasaResult, selection: &ResidueSelection) -> f64 {
        result.residue_area(selection)
    }
}
