//! Output projections for parsed documents
//!
//! The core contract is the document tree; these modules are serializers
//! over it. The HTML projection emits the markup and class hooks a host
//! page hydrates, the JSON projection exposes the tree and reference table
//! to embedders.

pub mod html;
pub mod json;
