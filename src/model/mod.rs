//! # Property Graph Model
//!
//! Plain data handed from the store to the view layer.
//!
//! Design rule: no I/O, no state, no async in this module.

pub mod node;
pub mod relationship;
pub mod value;
pub mod property_map;
pub mod entity;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, RelId, Direction};
pub use value::Value;
pub use property_map::{PropertyMap, props};
pub use entity::{Edge, Entity, Record};
