use crate::LogFormat;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt, Clone)]
#[structopt(name = "graph-binding", version = env!("CARGO_PKG_VERSION"))]
/// Schema augmentation and statement compilation for graphql bindings.
pub struct BindingOpt {
    /// Set the log format: `text` or `json`.
    #[structopt(long = "log-format")]
    pub log_format: Option<String>,

    #[structopt(subcommand)]
    pub subcommand: Subcommand,
}

impl BindingOpt {
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_deref() {
            Some("text") | Some("devel") => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, StructOpt, Clone)]
pub enum Subcommand {
    /// Print the augmented schema.
    Augment(AugmentInput),
    /// Print the statement and parameters an operation runs with, without
    /// running it.
    Compile(CompileInput),
    /// Print the schema as it is registered on the database.
    Idl(IdlInput),
}

#[derive(Debug, StructOpt, Clone)]
pub struct AugmentInput {
    /// Path to the type definitions.
    #[structopt(parse(from_os_str))]
    pub schema: PathBuf,
    /// Produce the database side schema.
    #[structopt(long)]
    pub remote: bool,
    /// Do not generate list query fields.
    #[structopt(long)]
    pub no_query: bool,
    /// Do not generate inputs and create mutations.
    #[structopt(long)]
    pub no_mutation: bool,
    /// Leave `id` fields as declared.
    #[structopt(long)]
    pub no_id_fields: bool,
}

#[derive(Debug, StructOpt, Clone)]
pub struct CompileInput {
    /// Path to the type definitions.
    #[structopt(parse(from_os_str))]
    pub schema: PathBuf,
    /// The GraphQL operation.
    pub operation: String,
    /// Operation variables as a JSON object.
    #[structopt(long)]
    pub variables: Option<String>,
    /// Path to a JSON binding configuration.
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,
}

#[derive(Debug, StructOpt, Clone)]
pub struct IdlInput {
    /// Path to the type definitions.
    #[structopt(parse(from_os_str))]
    pub schema: PathBuf,
}
