/// CLI argument definitions for the `vc` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "vc",
    version,
    about = "Comprehension-risk scanner and quiz analytics"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand.
#[derive(Args)]
pub struct GlobalArgs {
    /// Config file (default: .vibecheck.toml in the current directory, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress and gateway traffic (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank source files by how likely their logic is to be misunderstood
    #[command(long_about = "\
Rank source files by comprehension risk.

Discovers files with the selected extensions (largest first when over the
--max-files cap), counts lines and import statements, estimates how many other
files reference each one, and asks the reasoning service to score risk 0-100
in batches of 10.

Without a service (no ANTHROPIC_API_KEY, or --offline) every file gets the
metric score:

  risk = min(100, reference_weight * 10 + min(line_count / 5, 50))

Focus files (--focus or [focus] files in the config) are marked with *.")]
    Scan {
        /// Directory to scan (default: current directory)
        path: Option<PathBuf>,

        /// File extensions to include, e.g. --ext .py --ext .rs (default: from config)
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Maximum number of files to score (default: 50)
        #[arg(long)]
        max_files: Option<usize>,

        /// Pin a file as a focus file (repeatable)
        #[arg(long, value_name = "PATH")]
        focus: Vec<PathBuf>,

        /// Show only the N riskiest files
        #[arg(long, default_value = "20")]
        top: usize,

        /// Skip the reasoning service and score from metrics only
        #[arg(long)]
        offline: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-topic mastery, blind spots and score trend from a quiz history
    #[command(long_about = "\
Per-topic mastery, blind spots and score trend from a quiz history.

Every answered question is labeled with a short topic in a single call to the
reasoning service; if that call fails all questions fall under
\"General Concepts\".

A topic is a blind spot when its average score is below 60 and it has at
least 2 answers. The trend shows the latest attempt of each session, oldest
first.")]
    Analytics {
        /// History file (JSON export of sessions, quizzes and attempts)
        history: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Skip the reasoning service (all questions in one default topic)
        #[arg(long)]
        offline: bool,
    },

    /// Remediation brief for one topic from wrong and partial answers
    Catchup {
        /// History file (JSON export of sessions, quizzes and attempts)
        history: PathBuf,

        /// Topic to catch up on (case-insensitive)
        #[arg(long)]
        topic: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract decisions, patterns, gotchas and proposed rules from a session
    #[command(long_about = "\
Extract project knowledge from one recorded session transcript.

The reasoning service reads the session's transcript and reports the decisions
made (with rejected alternatives), conventions established, gotchas discovered
and 2-5 proposed project rules. There is no offline fallback: a missing or
malformed answer is an error.")]
    Insights {
        /// History file (JSON export of sessions, quizzes and attempts)
        history: PathBuf,

        /// Id of the session to analyze
        #[arg(long)]
        session: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find connections between the repositories of a group
    #[command(long_about = "\
Find connections between the repositories of a group.

The group file is TOML with a name and a list of [[repos]] entries (name, path,
role). Each repo is scanned and its 5 riskiest files are sent to the reasoning
service, which reports API calls, shared types, package dependencies and events
linking the repos.")]
    Repos {
        /// Repo group file (TOML)
        group: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
