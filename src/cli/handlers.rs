//! Subcommand handlers; each returns the process exit code

use super::commands::{CheckArgs, InspectArgs, RunArgs};
use super::output::OutputFormatter;
use crate::config::LauncherConfig;
use crate::environment::{check_environment, default_tools, sql_home};
use crate::introspect::PomIntrospector;
use crate::launch::launch;
use crate::maven::{BuildRequest, ProcessRunner};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const ENV_CHECK_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn handle_inspect(args: &InspectArgs, config: &LauncherConfig) -> i32 {
    report(inspect(args, config).await)
}

pub async fn handle_run(args: &RunArgs, config: &LauncherConfig) -> i32 {
    report(run(args, config).await)
}

pub async fn handle_check(args: &CheckArgs, config: &LauncherConfig) -> i32 {
    report(check(args, config).await)
}

fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn inspect(args: &InspectArgs, config: &LauncherConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    config.strict_bundles |= args.strict_bundles;
    config.validate()?;
    debug!("{}", config);

    let pom_file = absolute(&args.pom_file)?;
    let db_config_dir = args
        .db_config_dir
        .as_deref()
        .map(absolute)
        .transpose()?;

    if !args.skip_env_check {
        let tools = default_tools(&config.mvn_program);
        check_environment(&ProcessRunner::new(), &tools, ENV_CHECK_TIMEOUT).await?;
    }

    let settings = PomIntrospector::from_config(&config)
        .introspect(&pom_file, db_config_dir.as_deref())
        .await
        .with_context(|| format!("Failed to inspect {}", pom_file.display()))?;

    let output = OutputFormatter::new(args.format.into()).format_settings(&pom_file, &settings)?;
    print!("{}", output);
    Ok(())
}

async fn run(args: &RunArgs, config: &LauncherConfig) -> Result<()> {
    config.validate()?;

    let request = BuildRequest {
        pom_file: absolute(&args.file)?,
        action: args.action.clone(),
        target: args.db.clone(),
        proxy_password: args.db_proxy_password.clone(),
        password: args.db_password.clone(),
        extra_options: args.extra.clone(),
        sql_home: sql_home(),
    };
    debug!(sql_home = ?request.sql_home, "Build request prepared");

    launch(&ProcessRunner::new(), &config.mvn_program, &request).await?;
    Ok(())
}

async fn check(args: &CheckArgs, config: &LauncherConfig) -> Result<()> {
    config.validate()?;

    let tools = default_tools(&config.mvn_program);
    let reports = check_environment(&ProcessRunner::new(), &tools, ENV_CHECK_TIMEOUT).await?;
    let output = OutputFormatter::new(args.format.into()).format_tools(&reports)?;
    print!("{}", output);
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let path = if cfg!(windows) { r"C:\conf" } else { "/opt/conf" };
        assert_eq!(absolute(Path::new(path)).unwrap(), PathBuf::from(path));
    }

    #[test]
    fn test_absolute_resolves_relative_paths() {
        let resolved = absolute(Path::new("db/pom.xml")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("db/pom.xml"));
    }
}
