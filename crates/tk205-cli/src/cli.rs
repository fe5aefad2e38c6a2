use clap::{Parser, Subcommand, ValueEnum};
use tk205_kernel::{Extrapolation, Severity};

#[derive(Parser)]
#[command(
    name = "tk205",
    about = "tk205: load, validate and evaluate ASHRAE 205 representation documents",
    version
)]
pub struct Cli {
    /// Path to a tk205.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a document against the JSON Schema selected by its RS_ID
    Validate {
        /// Document path (.json or .cbor)
        path: String,

        /// Directory holding <RS_ID>.schema.json files
        #[arg(long)]
        schema_dir: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-encode a document in the format named by the output extension
    Translate {
        /// Input document (.json or .cbor)
        input: String,

        /// Output document (.json or .cbor)
        output: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a document: envelope, metadata, maps, embedded representations
    Inspect {
        /// Document path (.json or .cbor)
        path: String,

        /// Validate against the schema before binding
        #[arg(long)]
        validate: bool,

        /// Directory holding <RS_ID>.schema.json files
        #[arg(long)]
        schema_dir: Option<String>,

        /// Fail when a binding diagnostic reaches this severity
        #[arg(long, value_enum)]
        escalate_at: Option<SeverityArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a performance map at a target point
    Calc {
        /// Document path (.json or .cbor)
        path: String,

        /// Performance map key, e.g. performance_map_cooling
        #[arg(long, default_value = "performance_map")]
        map: String,

        /// Dotted path to an embedded representation, e.g. motor_representation.drive_representation
        #[arg(long)]
        embedded: Option<String>,

        /// Comma-separated target, one value per grid axis
        #[arg(long, allow_hyphen_values = true)]
        target: String,

        /// Out-of-range policy
        #[arg(long, value_enum)]
        extrapolation: Option<ExtrapolationArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExtrapolationArg {
    Constant,
    Linear,
}

impl From<ExtrapolationArg> for Extrapolation {
    fn from(arg: ExtrapolationArg) -> Self {
        match arg {
            ExtrapolationArg::Constant => Extrapolation::Constant,
            ExtrapolationArg::Linear => Extrapolation::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Debug => Severity::Debug,
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warn => Severity::Warn,
            SeverityArg::Error => Severity::Error,
        }
    }
}
