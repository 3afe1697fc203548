//! OpenAPI fragment merger.
//!
//! Reads an ordered list of path fragments, folds them into one `paths`
//! mapping (last write wins) and wraps the result in a root document whose
//! metadata is either a literal structure or carried over from an existing
//! root file.

pub mod fragment;
pub mod merger;
pub mod metadata;

pub use fragment::{load_fragment, merge_paths, Fragment, PathOverwrite, PathsMerge};
pub use merger::{MergeConfig, MergeError, MergedDocument, RootSource, SpecMerger};
pub use metadata::{component_refs, ComponentRef, Info, License, Logo, RootMetadata, Server, Tag};
