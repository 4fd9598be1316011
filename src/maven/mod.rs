//! Everything that talks to, or scrapes, Maven

pub mod bundle;
pub mod command;
pub mod runner;
pub mod scan;

pub use bundle::{classify, AmbiguityPolicy, DatabaseVariant, ProfileBundle};
pub use command::{BuildRequest, MavenCommand};
pub use runner::{resolve_program, CommandOutput, CommandRunner, ProcessRunner, RunError};
pub use scan::{scan_output, LineGrammar, MavenLineGrammar, ScanResult, ScannedLine};
