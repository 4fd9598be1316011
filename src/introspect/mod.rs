//! POM introspection
//!
//! Runs the inquiry build against a POM, scrapes the profiles and properties it
//! prints, classifies the profiles into a [`ProfileBundle`] and resolves the
//! deployment targets and database account.
//!
//! # Example
//!
//! ```no_run
//! use oracle_tools::introspect::PomIntrospector;
//! use oracle_tools::LauncherConfig;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let introspector = PomIntrospector::from_config(&LauncherConfig::default());
//! let settings = introspector.introspect(Path::new("db/pom.xml"), None).await?;
//! println!("{:?} on {:?}", settings.bundle.profiles(), settings.targets);
//! # Ok(())
//! # }
//! ```

mod observer;
mod targets;

pub use observer::{
    IntrospectionEvent, IntrospectionObserver, LoggingObserver, NoOpObserver, RecordingObserver,
};
pub use targets::{list_targets, normalize_config_dir, target_order, TargetListing};

use crate::config::LauncherConfig;
use crate::error::IntrospectError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::maven::command::DB_CONFIG_DIR_PROPERTY;
use crate::maven::{
    classify, scan_output, AmbiguityPolicy, CommandRunner, LineGrammar, MavenCommand,
    MavenLineGrammar, ProcessRunner, ProfileBundle, RunError, ScannedLine,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DB_PROXY_USERNAME_PROPERTY: &str = "db.proxy.username";
pub const DB_USERNAME_PROPERTY: &str = "db.username";

/// Everything a form (or a follow-on build) needs from a POM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PomSettings {
    pub db_config_dir: PathBuf,
    pub targets: Vec<String>,
    #[serde(rename = "actions")]
    pub bundle: ProfileBundle,
    pub proxy_username: String,
    pub username: String,
}

impl PomSettings {
    /// True when the build authenticates through a proxy account
    pub fn uses_proxy(&self) -> bool {
        !self.proxy_username.is_empty()
    }

    /// The account whose password the build needs
    pub fn account(&self) -> &str {
        if self.uses_proxy() {
            &self.proxy_username
        } else {
            &self.username
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    pub program: String,
    pub inquiry_profile: String,
    pub timeout: Duration,
    pub ambiguity: AmbiguityPolicy,
}

impl From<&LauncherConfig> for IntrospectOptions {
    fn from(config: &LauncherConfig) -> Self {
        Self {
            program: config.mvn_program.clone(),
            inquiry_profile: config.inquiry_profile.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            ambiguity: if config.strict_bundles {
                AmbiguityPolicy::Reject
            } else {
                AmbiguityPolicy::PreferApex
            },
        }
    }
}

pub struct PomIntrospector {
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
    grammar: Arc<dyn LineGrammar>,
    observer: Arc<dyn IntrospectionObserver>,
    options: IntrospectOptions,
}

impl PomIntrospector {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        fs: Arc<dyn FileSystem>,
        observer: Arc<dyn IntrospectionObserver>,
        options: IntrospectOptions,
    ) -> Self {
        Self {
            runner,
            fs,
            grammar: Arc::new(MavenLineGrammar),
            observer,
            options,
        }
    }

    /// Real processes and file system, events logged through `tracing`
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(
            Arc::new(ProcessRunner::new()),
            Arc::new(RealFileSystem::new()),
            Arc::new(LoggingObserver),
            IntrospectOptions::from(config),
        )
    }

    pub fn with_grammar(mut self, grammar: Arc<dyn LineGrammar>) -> Self {
        self.grammar = grammar;
        self
    }

    /// Introspect `pom_file`.
    ///
    /// A non-empty `db_config_dir_override` is passed to the inquiry build and
    /// takes precedence over the `db.config.dir` property it echoes.
    pub async fn introspect(
        &self,
        pom_file: &Path,
        db_config_dir_override: Option<&Path>,
    ) -> Result<PomSettings, IntrospectError> {
        let started = Instant::now();
        let override_dir = db_config_dir_override.filter(|d| !d.as_os_str().is_empty());

        let command = MavenCommand::inquiry(
            &self.options.program,
            pom_file,
            &self.options.inquiry_profile,
            override_dir,
        );
        let command_line = command.display();
        self.observer.on_event(&IntrospectionEvent::CommandStarted {
            command: &command_line,
        });

        let output = self
            .runner
            .capture(&command, self.options.timeout)
            .await
            .map_err(|e| match e {
                RunError::Spawn(source) => IntrospectError::Spawn {
                    command: command_line.clone(),
                    source,
                },
                RunError::Timeout(timeout) => IntrospectError::Timeout {
                    command: command_line.clone(),
                    seconds: timeout.as_secs(),
                },
            })?;
        self.observer.on_event(&IntrospectionEvent::CommandFinished {
            exit_code: output.exit_code,
            elapsed: started.elapsed(),
        });

        if !output.success() {
            return Err(IntrospectError::BuildTool {
                command: command_line,
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let scanned = scan_output(self.grammar.as_ref(), &output.stdout, |line| {
            let event = match line {
                ScannedLine::Profile(id) => IntrospectionEvent::ProfileFound { id },
                ScannedLine::Property(key, value) => IntrospectionEvent::PropertyFound { key, value },
            };
            self.observer.on_event(&event);
        });

        let bundle = classify(&scanned.profiles, self.options.ambiguity)?;
        self.observer
            .on_event(&IntrospectionEvent::Classified { bundle });

        let (db_config_dir, from_override) = match override_dir {
            Some(dir) => (dir.to_path_buf(), true),
            None => match scanned.property(DB_CONFIG_DIR_PROPERTY) {
                "" => return Err(IntrospectError::MissingConfigDir),
                raw => (normalize_config_dir(raw), false),
            },
        };
        self.observer.on_event(&IntrospectionEvent::ConfigDirResolved {
            dir: &db_config_dir,
            from_override,
        });

        let listing = list_targets(self.fs.as_ref(), &db_config_dir);
        if listing == TargetListing::DirectoryMissing {
            self.observer
                .on_event(&IntrospectionEvent::ConfigDirMissing { dir: &db_config_dir });
        }
        let targets = listing.into_targets();
        if targets.is_empty() {
            return Err(IntrospectError::NoTargets { dir: db_config_dir });
        }

        let proxy_username = scanned.property(DB_PROXY_USERNAME_PROPERTY).to_string();
        let username = scanned.property(DB_USERNAME_PROPERTY).to_string();
        if proxy_username.is_empty() && username.is_empty() {
            return Err(IntrospectError::MissingCredentials);
        }

        self.observer.on_event(&IntrospectionEvent::Completed {
            targets: targets.len(),
            elapsed: started.elapsed(),
        });

        Ok(PomSettings {
            db_config_dir,
            targets,
            bundle,
            proxy_username,
            username,
        })
    }
}
