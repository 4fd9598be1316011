//! Verification of the external tool chain
//!
//! An Oracle Tools build needs Maven, Perl, SQLcl and a JDK on the `PATH`.
//! Each tool is asked for its version, which is scraped from its output and
//! compared against a minimum.

use crate::error::EnvironmentError;
use crate::maven::{CommandRunner, MavenCommand, RunError};
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Which stream a tool prints its version on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStream {
    Stdout,
    /// `java -version` writes to stderr
    Stderr,
}

#[derive(Debug, Clone)]
pub struct ToolRequirement {
    pub program: String,
    pub version_arg: &'static str,
    pub minimum: &'static str,
    pub pattern: &'static str,
    pub stream: VersionStream,
}

impl ToolRequirement {
    fn new(
        program: impl Into<String>,
        version_arg: &'static str,
        minimum: &'static str,
        pattern: &'static str,
        stream: VersionStream,
    ) -> Self {
        Self {
            program: program.into(),
            version_arg,
            minimum,
            pattern,
            stream,
        }
    }
}

/// Tool chain of an Oracle Tools build; Maven is the configured executable,
/// the same one that runs the inquiry and the build.
pub fn default_tools(mvn_program: &str) -> Vec<ToolRequirement> {
    vec![
        ToolRequirement::new(mvn_program, "-version", "3.3.1", r"Apache Maven ([0-9.]+)", VersionStream::Stdout),
        ToolRequirement::new("perl", "--version", "5.16.0", r"\(v([0-9.]+)\)", VersionStream::Stdout),
        ToolRequirement::new("sql", "-V", "18.0.0.0", r"SQLcl: Release ([0-9.]+)", VersionStream::Stdout),
        ToolRequirement::new(
            "java",
            "-version",
            "1.8.0",
            r#"(?:java|openjdk) version "([0-9.]+).*""#,
            VersionStream::Stderr,
        ),
        ToolRequirement::new("javac", "-version", "1.8.0", r"javac ([0-9.]+)", VersionStream::Stdout),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolReport {
    pub program: String,
    pub version: String,
    pub location: Option<PathBuf>,
}

/// Check every requirement in order, stopping at the first failure
pub async fn check_environment(
    runner: &dyn CommandRunner,
    tools: &[ToolRequirement],
    timeout: Duration,
) -> Result<Vec<ToolReport>, EnvironmentError> {
    let mut reports = Vec::with_capacity(tools.len());
    for tool in tools {
        reports.push(check_tool(runner, tool, timeout).await?);
    }
    Ok(reports)
}

pub async fn check_tool(
    runner: &dyn CommandRunner,
    tool: &ToolRequirement,
    timeout: Duration,
) -> Result<ToolReport, EnvironmentError> {
    let command = MavenCommand::new(&tool.program).arg(tool.version_arg);
    let command_line = command.display();

    let output = runner
        .capture(&command, timeout)
        .await
        .map_err(|e| match e {
            RunError::Spawn(source) => EnvironmentError::Spawn {
                program: tool.program.clone(),
                source,
            },
            RunError::Timeout(t) => EnvironmentError::Timeout {
                command: command_line.clone(),
                seconds: t.as_secs(),
            },
        })?;

    if !output.success() {
        return Err(EnvironmentError::ToolFailed {
            command: command_line,
            exit_code: output.exit_code,
            stderr: output.stderr,
        });
    }

    let text = match tool.stream {
        VersionStream::Stdout => &output.stdout,
        VersionStream::Stderr => &output.stderr,
    };
    let version = extract_version(tool.pattern, text).ok_or_else(|| EnvironmentError::VersionNotFound {
        command: command_line.clone(),
        pattern: tool.pattern.to_string(),
        output: text.clone(),
    })?;

    if compare_versions(&version, tool.minimum) == Ordering::Less {
        return Err(EnvironmentError::TooOld {
            program: tool.program.clone(),
            actual: version,
            expected: tool.minimum.to_string(),
        });
    }

    let location = which::which(&tool.program)
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    info!(
        program = %tool.program,
        version = %version,
        location = ?location,
        "Tool version accepted"
    );

    Ok(ToolReport {
        program: tool.program.clone(),
        version,
        location,
    })
}

fn extract_version(pattern: &str, text: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

/// Compare dotted numeric versions; missing components count as zero
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// SQLcl home: the parent of the `bin` directory holding `sql`
pub fn sql_home() -> Option<PathBuf> {
    which::which("sql")
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maven::CommandOutput;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use yare::parameterized;

    /// Answers by program name
    struct FakeTools {
        outputs: HashMap<&'static str, CommandOutput>,
    }

    impl FakeTools {
        fn new(entries: &[(&'static str, &str, &str)]) -> Self {
            let outputs = entries
                .iter()
                .map(|(program, stdout, stderr)| {
                    (
                        *program,
                        CommandOutput {
                            exit_code: Some(0),
                            stdout: stdout.to_string(),
                            stderr: stderr.to_string(),
                        },
                    )
                })
                .collect();
            Self { outputs }
        }
    }

    #[async_trait]
    impl CommandRunner for FakeTools {
        async fn capture(&self, command: &MavenCommand, _timeout: Duration) -> Result<CommandOutput, RunError> {
            self.outputs.get(command.program()).cloned().ok_or_else(|| {
                RunError::Spawn(std::io::Error::new(std::io::ErrorKind::NotFound, "not found"))
            })
        }

        async fn run_inherited(&self, _command: &MavenCommand) -> Result<Option<i32>, RunError> {
            Ok(Some(0))
        }
    }

    fn healthy() -> FakeTools {
        FakeTools::new(&[
            ("mvn", "Apache Maven 3.9.6 (bc0240f3c744dd6b6ec2920b3cd08dcc295161ae)\nMaven home: /opt/maven", ""),
            ("perl", "This is perl 5, version 34, subversion 0 (v5.34.0) built for x86_64-linux", ""),
            ("sql", "SQLcl: Release 23.4.0.0 Production", ""),
            ("java", "", "openjdk version \"17.0.9\" 2023-10-17\nOpenJDK Runtime Environment"),
            ("javac", "javac 17.0.9", ""),
        ])
    }

    #[parameterized(
        newer = { "3.9.6", "3.3.1", Ordering::Greater },
        older = { "3.2", "3.3.1", Ordering::Less },
        padded_equal = { "18.0", "18.0.0.0", Ordering::Equal },
        java8_style = { "1.8.0_292", "1.8.0", Ordering::Equal },
        numeric_not_lexical = { "10.0", "9.1", Ordering::Greater },
    )]
    fn test_compare_versions(a: &str, b: &str, expected: Ordering) {
        assert_eq!(compare_versions(a, b), expected);
    }

    #[tokio::test]
    async fn test_all_tools_accepted() {
        let reports = check_environment(&healthy(), &default_tools("mvn"), Duration::from_secs(5))
            .await
            .unwrap();

        let versions: Vec<(&str, &str)> = reports
            .iter()
            .map(|r| (r.program.as_str(), r.version.as_str()))
            .collect();
        assert_eq!(
            versions,
            vec![
                ("mvn", "3.9.6"),
                ("perl", "5.34.0"),
                ("sql", "23.4.0.0"),
                ("java", "17.0.9"),
                ("javac", "17.0.9"),
            ]
        );
    }

    #[tokio::test]
    async fn test_java_version_read_from_stderr() {
        let tools = FakeTools::new(&[("java", "openjdk version \"17.0.9\"", "")]);
        let java = &default_tools("mvn")[3];

        let err = check_tool(&tools, java, Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, EnvironmentError::VersionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_old_maven_rejected() {
        let tools = FakeTools::new(&[("mvn", "Apache Maven 3.2.5", "")]);

        let err = check_tool(&tools, &default_tools("mvn")[0], Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            EnvironmentError::TooOld { program, actual, expected } => {
                assert_eq!(program, "mvn");
                assert_eq!(actual, "3.2.5");
                assert_eq!(expected, "3.3.1");
            }
            other => panic!("Expected TooOld, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_tool() {
        let tools = FakeTools::new(&[]);

        let err = check_environment(&tools, &default_tools("mvn"), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, EnvironmentError::Spawn { ref program, .. } if program == "mvn"));
    }

    #[tokio::test]
    async fn test_failing_tool() {
        struct Failing;

        #[async_trait]
        impl CommandRunner for Failing {
            async fn capture(&self, _command: &MavenCommand, _timeout: Duration) -> Result<CommandOutput, RunError> {
                Ok(CommandOutput {
                    exit_code: Some(127),
                    stdout: String::new(),
                    stderr: "command not found".to_string(),
                })
            }

            async fn run_inherited(&self, _command: &MavenCommand) -> Result<Option<i32>, RunError> {
                Ok(Some(127))
            }
        }

        let err = check_tool(&Failing, &default_tools("mvn")[2], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, EnvironmentError::ToolFailed { exit_code: Some(127), .. }));
    }

    #[tokio::test]
    async fn test_configured_maven_is_checked() {
        let tools = FakeTools::new(&[("/opt/maven/bin/mvn", "Apache Maven 3.9.6", "")]);

        let report = check_tool(&tools, &default_tools("/opt/maven/bin/mvn")[0], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(report.program, "/opt/maven/bin/mvn");
        assert_eq!(report.version, "3.9.6");
    }
}
