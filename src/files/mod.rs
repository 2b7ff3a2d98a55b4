//! Metadata and declaration files edited around the conversion
//!
//! Every text file is handled as a parse, mutate, render round trip and
//! written back in full.

pub mod declarations;
pub mod ignore_list;
pub mod io;
pub mod manifest;

pub use declarations::{ignore_block, DeclarationIndex};
pub use ignore_list::IgnoreList;
pub use manifest::{EntryUpdate, PackageManifest};
