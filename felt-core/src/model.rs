//! Element data handed to the kernels.
//!
//! Nodes, elements, sections and materials are owned by the model graph that
//! sits outside this crate. Kernels only read them.

use crate::error::{Error, Result};
use crate::material::MaterialModel;
use crate::section::CrossSection;
use crate::types::Point3;
use std::sync::Arc;

/// Lengths at or below this fraction of the node coordinate magnitude are degenerate.
pub const LENGTH_TOLERANCE: f64 = 1e-12;

/// A model node: identity plus location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: usize,
    pub location: Point3,
}

impl Node {
    pub fn new(id: usize, location: Point3) -> Self {
        Self { id, location }
    }

    /// Node at coordinates (x, y, z).
    pub fn at(id: usize, x: f64, y: f64, z: f64) -> Self {
        Self::new(id, Point3::new(x, y, z))
    }
}

/// Element families known to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 2-node axial bar (truss member).
    Bar,
    /// 3-node flat triangle.
    Triangle,
    /// 4-node tetrahedron.
    Tetrahedron,
}

impl ElementKind {
    /// Number of nodes for this element kind.
    pub fn n_nodes(self) -> usize {
        match self {
            ElementKind::Bar => 2,
            ElementKind::Triangle => 3,
            ElementKind::Tetrahedron => 4,
        }
    }

    /// Dimension of the natural (iso-parametric) domain.
    pub fn natural_dimension(self) -> usize {
        match self {
            ElementKind::Bar => 1,
            ElementKind::Triangle => 2,
            ElementKind::Tetrahedron => 3,
        }
    }
}

/// A finite element: kind, boundary nodes, section and material.
#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    nodes: Vec<Node>,
    section: Arc<dyn CrossSection>,
    material: Arc<dyn MaterialModel>,
}

impl Element {
    /// Create an element of any kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementKindMismatch`] if the node count does not match
    /// the element kind.
    pub fn new(
        kind: ElementKind,
        nodes: Vec<Node>,
        section: Arc<dyn CrossSection>,
        material: Arc<dyn MaterialModel>,
    ) -> Result<Self> {
        if nodes.len() != kind.n_nodes() {
            return Err(Error::ElementKindMismatch {
                expected: kind,
                found: kind,
                nodes: nodes.len(),
            });
        }
        Ok(Self {
            kind,
            nodes,
            section,
            material,
        })
    }

    /// Create a 2-node bar between `start` and `end`.
    pub fn bar(
        start: Node,
        end: Node,
        section: Arc<dyn CrossSection>,
        material: Arc<dyn MaterialModel>,
    ) -> Self {
        Self {
            kind: ElementKind::Bar,
            nodes: vec![start, end],
            section,
            material,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn section(&self) -> &dyn CrossSection {
        self.section.as_ref()
    }

    pub fn material(&self) -> &dyn MaterialModel {
        self.material.as_ref()
    }

    /// Start and end node of a 2-node element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementKindMismatch`] unless this is a bar.
    pub fn end_nodes(&self) -> Result<(&Node, &Node)> {
        match (self.kind, self.nodes.as_slice()) {
            (ElementKind::Bar, [start, end]) => Ok((start, end)),
            _ => Err(Error::ElementKindMismatch {
                expected: ElementKind::Bar,
                found: self.kind,
                nodes: self.nodes.len(),
            }),
        }
    }

    /// Distance between the start and end node of a 2-node element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementKindMismatch`] unless this is a bar and
    /// [`Error::DegenerateGeometry`] when the length is not finite or is at
    /// most [`LENGTH_TOLERANCE`] times the node coordinate magnitude.
    pub fn length(&self) -> Result<f64> {
        let (start, end) = self.end_nodes()?;
        let length = (end.location - start.location).norm();
        let scale = start.location.norm().max(end.location.norm());
        if !(length > LENGTH_TOLERANCE * scale) || !length.is_finite() {
            return Err(Error::DegenerateGeometry(format!(
                "bar between nodes {} and {} has length {}",
                start.id, end.id, length
            )));
        }
        Ok(length)
    }
}
