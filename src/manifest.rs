mod document;
mod source;

pub use document::{Manifest, MANIFEST_FILE_NAMES};
pub use source::{HookInvocation, HookSource};
