//! Launching the Maven build chosen from an introspected POM

use crate::error::LaunchError;
use crate::maven::{BuildRequest, CommandRunner, RunError};
use tracing::info;

/// Run the follow-on build with inherited stdio.
///
/// The logged command line has its password masked.
pub async fn launch(
    runner: &dyn CommandRunner,
    program: &str,
    request: &BuildRequest,
) -> Result<(), LaunchError> {
    let command = request.to_command(program);
    let command_line = command.display();
    info!(command = %command_line, "Maven command to execute");

    let exit_code = runner.run_inherited(&command).await.map_err(|e| match e {
        RunError::Spawn(source) => LaunchError::Spawn {
            command: command_line.clone(),
            source,
        },
        // no timeout is applied to the build itself
        RunError::Timeout(_) => LaunchError::BuildFailed {
            command: command_line.clone(),
            exit_code: None,
        },
    })?;

    if exit_code != Some(0) {
        return Err(LaunchError::BuildFailed {
            command: command_line,
            exit_code,
        });
    }
    Ok(())
}
