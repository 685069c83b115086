use crate::stack::{Category, ConflictStrategy};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Static technology stack classifier for software projects
#[derive(Parser, Debug)]
#[command(
    name = "stackprobe",
    about = "Static technology stack classifier for software projects",
    version,
    author,
    long_about = "stackprobe inspects a project directory without executing anything and \
                  reports its languages, frameworks, databases, test frameworks, build tools \
                  and deployment targets, each with a confidence score and the evidence \
                  behind it."
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
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the technology stack of a project",
        long_about = "Walks the project once, scores every detector against the gathered \
                      evidence and prints the accepted technologies.\n\n\
                      Examples:\n  \
                      stackprobe detect\n  \
                      stackprobe detect /path/to/project\n  \
                      stackprobe detect --format json --output stack.json\n  \
                      stackprobe detect --strategy declaration-order"
    )]
    Detect(DetectArgs),

    #[command(
        about = "List the built-in detectors",
        long_about = "Prints the requirement data of every registered detector without \
                      running any scorer.\n\n\
                      Examples:\n  \
                      stackprobe detectors\n  \
                      stackprobe detectors --category database --format json"
    )]
    Detectors(DetectorsArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "N", help = "Maximum directory depth to walk")]
    pub max_depth: Option<usize>,

    #[arg(long, value_name = "N", help = "Maximum matches per glob query")]
    pub file_limit: Option<usize>,

    #[arg(long, value_name = "N", help = "Files read per content scan")]
    pub sample_size: Option<usize>,

    #[arg(long, value_name = "N", help = "Concurrent detectors per category")]
    pub workers: Option<usize>,

    #[arg(
        long,
        value_name = "STRATEGY",
        value_parser = parse_strategy,
        help = "Conflict resolution: highest-confidence or declaration-order"
    )]
    pub strategy: Option<ConflictStrategy>,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectorsArgs {
    #[arg(
        short = 'c',
        long,
        value_enum,
        help = "Only list detectors of this category"
    )]
    pub category: Option<CategoryArg>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
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

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    Language,
    FrontendFramework,
    BackendFramework,
    Database,
    TestFramework,
    BuildTool,
    Deployment,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Language => Category::Language,
            CategoryArg::FrontendFramework => Category::FrontendFramework,
            CategoryArg::BackendFramework => Category::BackendFramework,
            CategoryArg::Database => Category::Database,
            CategoryArg::TestFramework => Category::TestFramework,
            CategoryArg::BuildTool => Category::BuildTool,
            CategoryArg::Deployment => Category::Deployment,
        }
    }
}

fn parse_strategy(s: &str) -> Result<ConflictStrategy, String> {
    s.parse::<ConflictStrategy>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_detect_args() {
        let args = CliArgs::parse_from(["stackprobe", "detect"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.format, OutputFormatArg::Human);
                assert!(detect_args.project_path.is_none());
                assert!(detect_args.output.is_none());
                assert!(detect_args.strategy.is_none());
                assert!(detect_args.sample_size.is_none());
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_detect_with_options() {
        let args = CliArgs::parse_from([
            "stackprobe",
            "detect",
            "/tmp/project",
            "--format",
            "json",
            "--max-depth",
            "4",
            "--file-limit",
            "50",
            "--sample-size",
            "1",
            "--workers",
            "2",
            "--strategy",
            "declaration-order",
        ]);

        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.project_path, Some(PathBuf::from("/tmp/project")));
                assert_eq!(detect_args.format, OutputFormatArg::Json);
                assert_eq!(detect_args.max_depth, Some(4));
                assert_eq!(detect_args.file_limit, Some(50));
                assert_eq!(detect_args.sample_size, Some(1));
                assert_eq!(detect_args.workers, Some(2));
                assert_eq!(detect_args.strategy, Some(ConflictStrategy::DeclarationOrder));
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_invalid_strategy_rejected() {
        let result = CliArgs::try_parse_from(["stackprobe", "detect", "--strategy", "coin-flip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_detectors_command() {
        let args = CliArgs::parse_from([
            "stackprobe",
            "detectors",
            "--category",
            "test-framework",
            "-f",
            "yaml",
        ]);
        match args.command {
            Commands::Detectors(detectors_args) => {
                assert_eq!(detectors_args.category, Some(CategoryArg::TestFramework));
                assert_eq!(detectors_args.format, OutputFormatArg::Yaml);
                assert_eq!(
                    Category::from(CategoryArg::TestFramework),
                    Category::TestFramework
                );
            }
            _ => panic!("Expected Detectors command"),
        }
    }

    #[test]
    fn test_config_command() {
        let args = CliArgs::parse_from(["stackprobe", "config", "--format", "json"]);
        match args.command {
            Commands::Config(config_args) => {
                assert_eq!(config_args.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["stackprobe", "-v", "detect"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["stackprobe", "detect", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["stackprobe", "--log-level", "debug", "config"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["stackprobe", "-v", "-q", "detect"]).is_err());
    }
}
