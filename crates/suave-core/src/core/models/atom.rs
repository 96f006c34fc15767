use super::point::SphericalPoint;
use nalgebra::Point3;

/// A single atom as delivered by a structure reader.
///
/// Only `position` takes part in the surface computations; the remaining
/// fields are bookkeeping that travels with the atom so that callers can map
/// derived quantities back onto the structure they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Serial number of the atom in its source file.
    pub atom_index: usize,
    /// Serial number of the residue the atom belongs to.
    pub residue_index: usize,
    /// The name of the atom (e.g., "P", "C21", "OW").
    pub atom_name: String,
    /// The name of the residue (e.g., "DPPC", "SOL").
    pub residue_name: String,
    /// Chain or segment identifier, empty when the source has none.
    pub chain_id: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl AtomRecord {
    /// Creates a record with empty names and zero indices.
    ///
    /// # Arguments
    ///
    /// * `atom_name` - The name of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(atom_name: &str, position: Point3<f64>) -> Self {
        Self {
            atom_index: 0,
            residue_index: 0,
            atom_name: atom_name.to_string(),
            residue_name: String::new(),
            chain_id: String::new(),
            position,
        }
    }

    pub fn with_residue(mut self, residue_index: usize, residue_name: &str) -> Self {
        self.residue_index = residue_index;
        self.residue_name = residue_name.to_string();
        self
    }

    pub fn with_atom_index(mut self, atom_index: usize) -> Self {
        self.atom_index = atom_index;
        self
    }

    /// Position of the atom in spherical coordinates about `center`.
    pub fn spherical(&self, center: &Point3<f64>) -> SphericalPoint {
        SphericalPoint::from_cartesian(&self.position, center)
    }
}
