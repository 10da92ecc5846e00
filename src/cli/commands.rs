//! CLI definition using clap.
//!
//! One positional input file plus a few options:
//! - output: where to write the rewritten G-code
//! - feature-aware: force nozzle switching on feature annotations
//! - config / verbose: ambient options

use clap::Parser;
use std::path::PathBuf;

/// Revolver - G-code post-processor for revolver nozzle changers
#[derive(Parser, Debug)]
#[command(name = "revolver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input G-code file from the slicer
    pub input: PathBuf,

    /// Output file (default: <input>_revolver.gcode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable automatic nozzle switching based on features
    #[arg(long)]
    pub feature_aware: bool,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_input_only() {
        let cli = Cli::try_parse_from(["revolver", "part.gcode"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("part.gcode"));
        assert!(cli.output.is_none());
        assert!(!cli.feature_aware);
        assert!(cli.config.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["revolver"]).is_err());
    }

    #[test]
    fn test_cli_output_short_and_long() {
        let cli = Cli::try_parse_from(["revolver", "part.gcode", "-o", "out.gcode"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.gcode")));

        let cli = Cli::try_parse_from(["revolver", "part.gcode", "--output", "out.gcode"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.gcode")));
    }

    #[test]
    fn test_cli_feature_aware_flag() {
        let cli = Cli::try_parse_from(["revolver", "--feature-aware", "part.gcode"]).unwrap();
        assert!(cli.feature_aware);
    }

    #[test]
    fn test_cli_config_and_verbose() {
        let cli = Cli::try_parse_from(["revolver", "part.gcode", "-c", "/etc/revolver.yml", "-v"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/etc/revolver.yml")));
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
