//! External processes: tool checks, the package manager, and the
//! interactive converter driver

pub mod driver;
pub mod package_manager;
pub mod probe;
pub mod prompts;

pub use driver::{DriverReport, InteractiveDriver};
pub use package_manager::PackageManager;
pub use probe::{find_on_path, VersionCheck};
pub use prompts::{PromptPattern, PromptRule, PromptScanner, PromptTable, ScanState, SentAnswer};
