//! Document and segment definitions

use serde::Serialize;

use super::block::{Aside, Block};

/// The unit of top-level document structure: exactly one primary block plus
/// at most one merged aside attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub block: Block,
    pub aside: Option<Aside>,
}

impl Segment {
    pub fn new(block: Block) -> Self {
        Self { block, aside: None }
    }
}

/// A parsed sidemark document.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Document {
    pub segments: Vec<Segment>,
}
