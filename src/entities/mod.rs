//! Node-side data model: scalar values, the property store, connector
//! slots and the node shell with its layout algorithms.

pub mod layout;
pub mod node;
pub mod node_types;
pub mod props;
pub mod slots;
pub mod value;

pub use node::{Node, NodeBody, SlotSide, StatusEntry, StatusUpdate};
pub use node_types::{node_type_registry, NodeFactory, NodeTypeRegistry};
pub use props::Props;
pub use slots::{InputSlot, OutputSlot};
pub use value::Value;
