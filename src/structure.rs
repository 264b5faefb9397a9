//! Atom records and the structure access contract used by the BSA calculator.

mod table;

pub use table::AtomTable;

use crate::errors::BsaError;
use std::collections::HashMap;
use std::fmt;

/// A single atom as read from a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Atom name, e.g. `CA`
    pub name: String,
    /// Residue name, e.g. `GLY`
    pub resn: String,
    /// Residue number
    pub resi: isize,
    /// Chain identifier
    pub chain: String,
    /// Cartesian coordinates in Å
    pub pos: [f64; 3],
}

impl AtomRecord {
    /// Build a record from its fields.
    pub fn new(name: &str, resn: &str, resi: isize, chain: &str, pos: [f64; 3]) -> Self {
        Self {
            name: name.to_string(),
            resn: resn.to_string(),
            resi,
            chain: chain.to_string(),
            pos,
        }
    }

    /// Key of the residue this atom belongs to.
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey::new(&self.chain, self.resi, &self.resn)
    }
}

/// Identifies a residue within a chain.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResidueKey {
    /// Chain identifier
    pub chain: String,
    /// Residue number
    pub resi: isize,
    /// Residue name
    pub resn: String,
}

impl ResidueKey {
    /// Key for residue `resn` number `resi` on `chain`.
    pub fn new(chain: &str, resi: isize, resn: &str) -> Self {
        Self {
            chain: chain.to_string(),
            resi,
            resn: resn.to_string(),
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}{}", self.chain, self.resn, self.resi)
    }
}

/// Typed filter over atom records. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomSelection {
    /// Chain identifier
    pub chain: Option<String>,
    /// Residue number
    pub resi: Option<isize>,
    /// Atom name
    pub name: Option<String>,
}

impl AtomSelection {
    /// Selects every atom.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one chain.
    pub fn chain(mut self, chain: &str) -> Self {
        self.chain = Some(chain.to_string());
        self
    }

    /// Restrict to one residue number.
    pub fn resi(mut self, resi: isize) -> Self {
        self.resi = Some(resi);
        self
    }

    /// Restrict to one atom name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Whether `atom` passes every set field.
    pub fn matches(&self, atom: &AtomRecord) -> bool {
        self.chain.as_deref().map_or(true, |c| c == atom.chain)
            && self.resi.map_or(true, |r| r == atom.resi)
            && self.name.as_deref().map_or(true, |n| n == atom.name)
    }
}

/// Contact residues found between two chains, one list per chain label.
///
/// Each list is sorted by residue number and holds a residue at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactResidues {
    by_chain: HashMap<String, Vec<ResidueKey>>,
}

impl ContactResidues {
    /// Wrap per-chain contact lists.
    pub fn new(by_chain: HashMap<String, Vec<ResidueKey>>) -> Self {
        Self { by_chain }
    }

    /// Contact residues of `chain`; empty if the chain has none.
    pub fn chain(&self, chain: &str) -> &[ResidueKey] {
        self.by_chain
            .get(chain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Contacts of `first` followed by contacts of `second`.
    pub fn merged(&self, first: &str, second: &str) -> Vec<ResidueKey> {
        self.chain(first)
            .iter()
            .chain(self.chain(second))
            .cloned()
            .collect()
    }

    /// Total number of contact residues over all chains.
    pub fn len(&self) -> usize {
        self.by_chain.values().map(|v| v.len()).sum()
    }

    /// Whether no chain has a contact residue.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Access to the atoms of a structure.
pub trait StructureProvider {
    /// All atoms matching `selection`, in the provider's native order.
    fn atoms(&self, selection: &AtomSelection) -> Result<Vec<AtomRecord>, BsaError>;

    /// Residues of `chain_a` with an atom within `cutoff` Å of `chain_b`, and
    /// vice versa.
    fn contact_residues(
        &self,
        chain_a: &str,
        chain_b: &str,
        cutoff: f64,
    ) -> Result<ContactResidues, BsaError>;
}
