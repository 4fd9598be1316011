//! Output formatting for inspect and check results

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::environment::ToolReport;
use crate::introspect::PomSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Serialize)]
struct InspectReport<'a> {
    pom_file: &'a Path,
    mode: &'static str,
    default_action: &'static str,
    account: &'a str,
    #[serde(flatten)]
    settings: &'a PomSettings,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_settings(&self, pom_file: &Path, settings: &PomSettings) -> Result<String> {
        let report = InspectReport {
            pom_file,
            mode: settings.bundle.name(),
            default_action: settings.bundle.default_action(),
            account: settings.account(),
            settings,
        };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)
                .context("Failed to serialize POM settings to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&report).context("Failed to serialize POM settings to YAML")
            }
            OutputFormat::Human => Ok(Self::settings_human(&report)),
        }
    }

    pub fn format_tools(&self, reports: &[ToolReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(reports)
                .context("Failed to serialize tool reports to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(reports).context("Failed to serialize tool reports to YAML")
            }
            OutputFormat::Human => Ok(Self::tools_human(reports)),
        }
    }

    fn settings_human(report: &InspectReport<'_>) -> String {
        let settings = report.settings;
        let mut out = String::new();

        let _ = writeln!(out, "POM:       {}", report.pom_file.display());
        let _ = writeln!(out, "Mode:      {}", report.mode);
        let _ = writeln!(out, "Config:    {}", settings.db_config_dir.display());
        let _ = writeln!(out);
        let _ = writeln!(out, "Actions:");
        for action in settings.bundle.profiles() {
            let marker = if *action == report.default_action { " (default)" } else { "" };
            let _ = writeln!(out, "  {}{}", action, marker);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Databases:");
        for (i, target) in settings.targets.iter().enumerate() {
            let marker = if i == 0 { " (default)" } else { "" };
            let _ = writeln!(out, "  {}{}", target, marker);
        }
        let _ = writeln!(out);
        let hint = if settings.uses_proxy() {
            "proxy, supply --db-proxy-password"
        } else {
            "supply --db-password"
        };
        let _ = writeln!(out, "Account:   {} ({})", report.account, hint);

        out
    }

    fn tools_human(reports: &[ToolReport]) -> String {
        let mut out = String::new();
        for report in reports {
            let location = report
                .location
                .as_ref()
                .map(|l| l.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(out, "{:<6} {:<12} {}", report.program, report.version, location);
        }
        out
    }
}
