use super::{SasaResult, SurfaceAreaEngine, SurfaceAtomSet};
use crate::errors::BsaError;
use pdbtbx::Element;
use rust_sasa::calculate_sasa_internal;
use rust_sasa::Atom as SASAAtom;
use tracing::{trace, warn};

/// Settings of the Shrake-Rupley engine.
#[derive(Clone, Debug)]
pub struct SasaSettings {
    /// Probe radius in Å (smaller radii detect more surface details)
    pub probe_radius: f32,
    /// Number of points on each atom sphere
    pub n_points: usize,
    /// Skip atoms without a known radius silently
    pub quiet: bool,
}

impl Default for SasaSettings {
    fn default() -> Self {
        Self {
            probe_radius: 1.4,
            n_points: 100,
            quiet: false,
        }
    }
}

/// Van der Waals radius of a (possibly padded) element symbol.
pub fn vdw_radius(element: &str) -> Option<f64> {
    Element::from_symbol(element.trim()).and_then(|e| e.atomic_radius().van_der_waals)
}

/// Shrake-Rupley SASA through `rust-sasa`, with pdbtbx van der Waals radii.
#[derive(Clone, Debug, Default)]
pub struct ShrakeRupley {
    /// Probe and sampling settings
    pub settings: SasaSettings,
}

impl ShrakeRupley {
    /// Create an engine with the given settings.
    pub fn new(settings: SasaSettings) -> Self {
        Self { settings }
    }
}

impl SurfaceAreaEngine for ShrakeRupley {
    fn calc(&self, atoms: &SurfaceAtomSet) -> Result<SasaResult, BsaError> {
        let mut sasa_atoms = Vec::with_capacity(atoms.len());
        for (i, atom) in atoms.atoms().iter().enumerate() {
            match vdw_radius(&atom.element) {
                Some(radius) => sasa_atoms.push(SASAAtom {
                    position: nalgebra::Point3::new(
                        atom.pos[0] as f32,
                        atom.pos[1] as f32,
                        atom.pos[2] as f32,
                    ),
                    radius: radius as f32,
                    id: i,
                    parent_id: None,
                }),
                None if !self.settings.quiet => warn!(
                    "No radius for element '{}' of {}:{}{}, atom skipped",
                    atom.element.trim(),
                    atom.chain,
                    atom.resn,
                    atom.resi
                ),
                None => {}
            }
        }

        let mut atom_areas = vec![0.0; atoms.len()];
        if !sasa_atoms.is_empty() {
            let areas = calculate_sasa_internal(
                &sasa_atoms,
                Some(self.settings.probe_radius),
                Some(self.settings.n_points),
            );
            for (atom, area) in sasa_atoms.iter().zip(areas) {
                atom_areas[atom.id] = area as f64;
            }
        }
        trace!(
            "Computed SASA for {} of {} atoms",
            sasa_atoms.len(),
            atoms.len()
        );

        Ok(SasaResult::new(atoms, atom_areas))
    }
}
