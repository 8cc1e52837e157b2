//! Core block abstractions and types
//!
//! This module defines the attribute model, the markup tree, the codec
//! that ties the two together, and the registry of block types.

pub mod attribute;
pub mod block;
pub mod codec;
pub mod markup;
pub mod registry;

pub use attribute::{
    AttributeDescriptor, AttributeSchema, AttributeSet, AttributeSource, AttributeType,
    AttributeUpdate, AttributeValue, ValidationResult,
};
pub use block::{BlockCategory, BlockMetadata, EditState};
pub use markup::{MarkupNode, Selector};
pub use registry::{BlockRegistry, RegistryError};
