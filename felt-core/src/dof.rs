//! Local degree-of-freedom ordering.
//!
//! Each kernel declares which nodal degree of freedom every row/column of its
//! local matrices stands for. The global assembler uses this to scatter local
//! contributions; the nodal load integrator uses it to pick load components.

/// Kind of nodal degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DofKind {
    /// Translation along x.
    Dx,
    /// Translation along y.
    Dy,
    /// Translation along z.
    Dz,
    /// Rotation about x.
    Rx,
    /// Rotation about y.
    Ry,
    /// Rotation about z.
    Rz,
}

impl DofKind {
    /// Index of this DOF inside a 6-component [`Force`](crate::types::Force)
    /// or [`Displacement`](crate::types::Displacement).
    pub fn component(self) -> usize {
        match self {
            DofKind::Dx => 0,
            DofKind::Dy => 1,
            DofKind::Dz => 2,
            DofKind::Rx => 3,
            DofKind::Ry => 4,
            DofKind::Rz => 5,
        }
    }

    /// Whether this is a translational DOF.
    pub fn is_translation(self) -> bool {
        matches!(self, DofKind::Dx | DofKind::Dy | DofKind::Dz)
    }
}

/// One row/column of a local element matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDof {
    /// Node index within the element (0 = start node).
    pub node: usize,
    /// DOF kind at that node.
    pub kind: DofKind,
}

impl LocalDof {
    pub fn new(node: usize, kind: DofKind) -> Self {
        Self { node, kind }
    }
}
