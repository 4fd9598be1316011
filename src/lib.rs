//! oracle-tools - launcher for Maven based Oracle Tools builds
//!
//! An Oracle Tools POM is either a database project (schema install, tests,
//! DDL generation) or an Apex project (application export/import). This
//! crate inspects such a POM by running an inquiry build, classifies it, lists
//! the databases it can be deployed to, and launches the chosen build.
//!
//! # Example Usage
//!
//! ```no_run
//! use oracle_tools::{LauncherConfig, PomIntrospector};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LauncherConfig::default();
//! let settings = PomIntrospector::from_config(&config)
//!     .introspect(Path::new("db/pom.xml"), None)
//!     .await?;
//!
//! println!("Actions: {:?}", settings.bundle.profiles());
//! println!("Databases: {:?}", settings.targets);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`introspect`]: POM introspection (the inquiry build and its interpretation)
//! - [`maven`]: line grammars, profile bundles, command lines and process running
//! - [`environment`]: tool version checks
//! - [`launch`]: the follow-on build

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod fs;
pub mod introspect;
pub mod launch;
pub mod maven;
pub mod util;

pub use config::{ConfigError, LauncherConfig};
pub use error::{EnvironmentError, IntrospectError, LaunchError};
pub use introspect::{PomIntrospector, PomSettings};
pub use maven::ProfileBundle;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
