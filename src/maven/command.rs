//! Maven command lines

use std::fmt;
use std::path::{Path, PathBuf};

pub const DB_CONFIG_DIR_PROPERTY: &str = "db.config.dir";

const MASK: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Arg {
    value: String,
    /// Shown as `<prefix>********` in logs and errors
    secret_prefix: Option<usize>,
}

/// A program plus argv; never run through a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCommand {
    program: String,
    args: Vec<Arg>,
}

impl MavenCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg {
            value: value.into(),
            secret_prefix: None,
        });
        self
    }

    /// `-D<name>=<value>`
    pub fn property(self, name: &str, value: impl fmt::Display) -> Self {
        self.arg(format!("-D{}={}", name, value))
    }

    /// `-D<name>=<value>` with the value masked in [`MavenCommand::display`]
    pub fn secret_property(mut self, name: &str, value: &str) -> Self {
        let prefix = format!("-D{}=", name);
        self.args.push(Arg {
            secret_prefix: Some(prefix.len()),
            value: format!("{}{}", prefix, value),
        });
        self
    }

    /// The profile listing run under the inquiry profile
    pub fn inquiry(
        program: &str,
        pom_file: &Path,
        inquiry_profile: &str,
        db_config_dir: Option<&Path>,
    ) -> Self {
        let mut cmd = Self::new(program)
            .arg("--file")
            .arg(pom_file.display().to_string())
            .arg("-N")
            .arg("help:all-profiles")
            .arg(format!("-P{}", inquiry_profile))
            .arg("compile");
        if let Some(dir) = db_config_dir {
            cmd = cmd.property(DB_CONFIG_DIR_PROPERTY, dir.display());
        }
        cmd
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Real argument values, secrets included
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.value.as_str())
    }

    /// Command line safe for logs and error messages
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            match arg.secret_prefix {
                Some(len) => {
                    out.push_str(&arg.value[..len]);
                    out.push_str(MASK);
                }
                None => out.push_str(&arg.value),
            }
        }
        out
    }
}

impl fmt::Display for MavenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Parameters of the follow-on build chosen from the introspection result
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub pom_file: PathBuf,
    pub action: String,
    pub target: String,
    pub proxy_password: Option<String>,
    pub password: Option<String>,
    pub extra_options: Vec<String>,
    pub sql_home: Option<PathBuf>,
}

/// Placeholder token the form passed through verbatim
pub const EXTRA_OPTIONS_MARKER: &str = "--extra-maven-command-line-options";

impl BuildRequest {
    pub fn to_command(&self, program: &str) -> MavenCommand {
        let mut cmd = MavenCommand::new(program)
            .arg("--file")
            .arg(self.pom_file.display().to_string())
            .arg(format!("-P{}", self.action))
            .property("db", &self.target);

        for option in self
            .extra_options
            .iter()
            .filter(|o| o.as_str() != EXTRA_OPTIONS_MARKER)
        {
            cmd = cmd.arg(option.clone());
        }

        if let Some(sql_home) = &self.sql_home {
            cmd = cmd.property("sql.home", sql_home.display());
        }

        match (non_empty(&self.proxy_password), non_empty(&self.password)) {
            (Some(secret), _) => cmd.secret_property("db.proxy.password", secret),
            (None, Some(secret)) => cmd.secret_property("db.password", secret),
            (None, None) => cmd,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_command() {
        let cmd = MavenCommand::inquiry("mvn", Path::new("/src/db/pom.xml"), "conf-inquiry", None);
        assert_eq!(
            cmd.display(),
            "mvn --file /src/db/pom.xml -N help:all-profiles -Pconf-inquiry compile"
        );
    }

    #[test]
    fn test_inquiry_command_with_override() {
        let cmd = MavenCommand::inquiry(
            "mvn",
            Path::new("pom.xml"),
            "conf-inquiry",
            Some(Path::new("/opt/conf")),
        );
        assert_eq!(cmd.args().last(), Some("-Ddb.config.dir=/opt/conf"));
    }

    #[test]
    fn test_build_command_with_proxy_password() {
        let request = BuildRequest {
            pom_file: PathBuf::from("pom.xml"),
            action: "db-install".to_string(),
            target: "dev".to_string(),
            proxy_password: Some("s3cret".to_string()),
            password: Some("ignored".to_string()),
            extra_options: vec![EXTRA_OPTIONS_MARKER.to_string(), "-X".to_string()],
            sql_home: Some(PathBuf::from("/opt/sqlcl")),
        };
        let cmd = request.to_command("mvn");
        let args: Vec<&str> = cmd.args().collect();

        assert_eq!(
            args,
            vec![
                "--file",
                "pom.xml",
                "-Pdb-install",
                "-Ddb=dev",
                "-X",
                "-Dsql.home=/opt/sqlcl",
                "-Ddb.proxy.password=s3cret",
            ]
        );
        assert!(!cmd.display().contains("s3cret"));
        assert!(cmd.display().ends_with("-Ddb.proxy.password=********"));
    }

    #[test]
    fn test_build_command_with_password_only() {
        let request = BuildRequest {
            pom_file: PathBuf::from("pom.xml"),
            action: "apex-export".to_string(),
            target: "test".to_string(),
            proxy_password: Some(String::new()),
            password: Some("pw".to_string()),
            ..Default::default()
        };
        let cmd = request.to_command("mvn");

        assert_eq!(cmd.args().last(), Some("-Ddb.password=pw"));
        assert!(!cmd.args().any(|a| a.starts_with("-Ddb.proxy.password")));
    }

    #[test]
    fn test_build_command_without_password() {
        let request = BuildRequest {
            pom_file: PathBuf::from("pom.xml"),
            action: "db-info".to_string(),
            target: "acc".to_string(),
            ..Default::default()
        };
        assert_eq!(
            request.to_command("mvn").display(),
            "mvn --file pom.xml -Pdb-info -Ddb=acc"
        );
    }
}
