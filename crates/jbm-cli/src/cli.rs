use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jbm_merge::JoinStrategy;

#[derive(Parser)]
#[command(
    name = "jbm",
    about = "jsonb-merge — deep-merge JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge two documents; the second wins conflicts
    Merge(MergeArgs),
    /// Check that every object's keys are written in canonical order
    Check(CheckArgs),
    /// Print the cursor token stream of a document
    Tokens(TokensArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    Sorted,
    Lookup,
}

impl From<StrategyArg> for JoinStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sorted => Self::SortedJoin,
            StrategyArg::Lookup => Self::Lookup,
        }
    }
}

#[derive(Args)]
pub struct MergeArgs {
    /// First document (`-` for stdin)
    pub first: String,
    /// Second document (`-` for stdin)
    pub second: String,
    /// Let the second array replace the first instead of concatenating
    #[arg(long)]
    pub no_merge_arrays: bool,
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    /// TOML merge configuration; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub pretty: bool,
    /// Print merge counters to stderr
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    pub file: String,
}

#[derive(Args)]
pub struct TokensArgs {
    pub file: String,
    /// Yield nested containers as references instead of unrolling them
    #[arg(long)]
    pub skip_nested: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["jbm", "merge", "a.json", "b.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.first, "a.json");
            assert_eq!(args.second, "b.json");
            assert!(!args.no_merge_arrays);
            assert!(args.strategy.is_none());
            assert!(args.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_options() {
        let cli = Cli::try_parse_from([
            "jbm", "merge", "-", "b.json", "--no-merge-arrays", "--strategy", "lookup",
            "--config", "merge.toml", "--pretty", "--stats",
        ])
        .unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.first, "-");
            assert!(args.no_merge_arrays);
            assert_eq!(args.strategy, Some(StrategyArg::Lookup));
            assert_eq!(args.config, Some(PathBuf::from("merge.toml")));
            assert!(args.pretty);
            assert!(args.stats);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn merge_requires_two_inputs() {
        assert!(Cli::try_parse_from(["jbm", "merge", "a.json"]).is_err());
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["jbm", "check", "doc.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_tokens_skip_nested() {
        let cli = Cli::try_parse_from(["jbm", "tokens", "doc.json", "--skip-nested"]).unwrap();
        if let Command::Tokens(args) = cli.command {
            assert!(args.skip_nested);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["jbm", "--verbose", "check", "x"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["jbm", "--format", "json", "check", "x"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn strategy_arg_maps_to_join() {
        assert_eq!(JoinStrategy::from(StrategyArg::Sorted), JoinStrategy::SortedJoin);
        assert_eq!(JoinStrategy::from(StrategyArg::Lookup), JoinStrategy::Lookup);
    }
}
