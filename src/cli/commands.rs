use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Launcher for Maven based Oracle Tools database and Apex builds
#[derive(Parser, Debug)]
#[command(
    name = "oracle-tools",
    about = "Launcher for Maven based Oracle Tools database and Apex builds",
    version,
    long_about = "oracle-tools inspects a POM based on an Oracle Tools parent POM, \
                  determines whether it is a database or an Apex project, lists the \
                  databases it can be deployed to and launches the chosen Maven build."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Show the actions, databases and account of a POM",
        long_about = "Runs the inquiry build against the POM and reports the actions \
                      (Maven profiles), databases (subdirectories of db.config.dir) and \
                      database account a build can use.\n\n\
                      Examples:\n  \
                      oracle-tools inspect db/pom.xml\n  \
                      oracle-tools inspect db/pom.xml --db-config-dir conf/src --format json"
    )]
    Inspect(InspectArgs),

    #[command(
        about = "Run a Maven build for one action and database",
        long_about = "Runs mvn --file <POM> -P<ACTION> -Ddb=<DB> with the database password.\n\
                      Arguments after -- are passed to Maven unchanged.\n\n\
                      Examples:\n  \
                      oracle-tools run --action db-install --db dev --db-proxy-password secret --file db/pom.xml\n  \
                      oracle-tools run --action apex-export --db test --db-password secret --file apex/pom.xml -- -X"
    )]
    Run(RunArgs),

    #[command(about = "Check that mvn, perl, sql, java and javac are installed")]
    Check(CheckArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(value_name = "POM", help = "The POM file")]
    pub pom_file: PathBuf,

    #[arg(long, value_name = "DIR", help = "The database configuration directory")]
    pub db_config_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "SECONDS", help = "Inquiry build timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Fail when the POM has both Apex and database profiles")]
    pub strict_bundles: bool,

    #[arg(long, help = "Do not verify the installed tool versions first")]
    pub skip_env_check: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, value_name = "PROFILE", help = "The action to perform")]
    pub action: String,

    #[arg(long, value_name = "DB", help = "The database to log on to")]
    pub db: String,

    #[arg(long, value_name = "PASSWORD", help = "The password for the database proxy account")]
    pub db_proxy_password: Option<String>,

    #[arg(long, value_name = "PASSWORD", help = "The password for the database account")]
    pub db_password: Option<String>,

    #[arg(long, value_name = "POM", help = "The POM file")]
    pub file: PathBuf,

    #[arg(last = true, value_name = "MAVEN_OPTIONS", help = "Extra Maven command line options")]
    pub extra: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
