//! Error types for POM introspection, environment checks and build launches

use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single POM introspection.
///
/// Every variant is terminal for the call; nothing is retried.
#[derive(Debug, Error)]
pub enum IntrospectError {
    #[error("The command \"{command}\" failed with return code {} and error:\n{stderr}", code(.exit_code))]
    BuildTool {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to start \"{command}\": {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The command \"{command}\" did not finish within {seconds} seconds and was terminated")]
    Timeout { command: String, seconds: u64 },

    #[error("Profiles ({}) must be a super set of either the Apex ({}) or database ({}) profiles", join(.discovered), join_list(.apex), join_list(.database))]
    Classification {
        discovered: BTreeSet<String>,
        apex: Vec<String>,
        database: Vec<String>,
    },

    #[error("Profiles ({}) are a super set of both the Apex and the database profiles", join(.discovered))]
    AmbiguousProfiles { discovered: BTreeSet<String> },

    #[error("The property db.config.dir must have been set in order to choose a database (one of its subdirectories)")]
    MissingConfigDir,

    #[error("The directory {} must have subdirectories, where each one contains information for one database (and Apex) instance", .dir.display())]
    NoTargets { dir: PathBuf },

    #[error("The database account (Maven property db.proxy.username or db.username) must be set")]
    MissingCredentials,
}

/// Failures while verifying the external tool chain.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Failed to start \"{program}\": {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("\"{command}\" failed with return code {}: {stderr}", code(.exit_code))]
    ToolFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("\"{command}\" did not finish within {seconds} seconds")]
    Timeout { command: String, seconds: u64 },

    #[error("Could not find {pattern} in the output of \"{command}\": {output}")]
    VersionNotFound {
        command: String,
        pattern: String,
        output: String,
    },

    #[error("Version of program \"{program}\" is \"{actual}\" which is less than the expected version \"{expected}\"")]
    TooOld {
        program: String,
        actual: String,
        expected: String,
    },
}

/// Failures of the follow-on Maven build.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to start \"{command}\": {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The Maven build \"{command}\" failed with return code {}", code(.exit_code))]
    BuildFailed {
        command: String,
        exit_code: Option<i32>,
    },
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn join_list(list: &[String]) -> String {
    list.join(", ")
}

fn code(exit_code: &Option<i32>) -> String {
    exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "<signal>".to_string())
}
