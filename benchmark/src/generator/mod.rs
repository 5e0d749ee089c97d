//! @ai:module:intent Synthetic Python source tree generation
//! @ai:module:layer domain
//! @ai:module:public_api Variant, SourceTreeGenerator, GeneratedTree

pub mod templates;
pub mod tree;
pub mod variant;

pub use tree::{GeneratedTree, SourceTreeGenerator};
pub use variant::Variant;
