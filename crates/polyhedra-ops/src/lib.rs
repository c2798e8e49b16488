//! Operation graphs and the application engine.
//!
//! Every supported transformation is an [`Operation`]: truncation and
//! rectification with their inverses, the resize family (expand, snub,
//! contract, dual and the twist between them), the prism family
//! (elongate, gyroelongate, shorten, turn), and the cut-and-paste
//! family (augment, diminish, gyrate). Each is driven by a graph whose
//! entries link a source solid to a result, optionally annotated with
//! the options that pick one entry over another. Applying an operation
//! yields the result forme aligned with its input plus the animation
//! data to morph between them.

#![warn(missing_docs)]

mod cut_paste;
mod error;
mod morph;
mod operation;
mod options;
mod pair;
mod poses;
mod prism;
mod resize;
mod truncate;

pub use error::{OpError, Result};
pub use operation::{AnimationData, OpResult, Operation};
pub use options::{Options, SelectionState};

/// Every operation the engine supports.
pub fn all_operations() -> Vec<Operation> {
    let mut ops = truncate::operations();
    ops.extend(resize::operations());
    ops.extend(prism::operations());
    ops.extend(cut_paste::operations());
    ops
}

/// Looks up an operation by name.
pub fn operation(name: &str) -> Option<Operation> {
    all_operations().into_iter().find(|op| op.name() == name)
}
