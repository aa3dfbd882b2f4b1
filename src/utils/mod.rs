//! Browser helpers shared by the hydration and theme passes.

pub mod dom;

pub use dom::DomElement;
