use crate::{
    BindingResult,
    error::BindingError,
    opt::{BindingOpt, Subcommand},
};
use query_core::SchemaContext;
use request_handlers::{BindingConfig, Operation, one_line_cypher_statements, plan_operation};
use schema_builder::AugmentOptions;
use serde_json::{Map, Value};
use std::{fs, path::Path};

pub struct AugmentRequest {
    type_defs: String,
    options: AugmentOptions,
}

pub struct CompileRequest {
    type_defs: String,
    operation: String,
    variables: Map<String, Value>,
    config: BindingConfig,
}

pub struct IdlRequest {
    type_defs: String,
}

pub enum CliCommand {
    Augment(AugmentRequest),
    Compile(CompileRequest),
    Idl(IdlRequest),
}

impl CliCommand {
    /// Create a CLI command from a `BindingOpt` instance, reading every file
    /// it refers to.
    pub fn from_opt(opts: &BindingOpt) -> BindingResult<CliCommand> {
        match &opts.subcommand {
            Subcommand::Augment(input) => Ok(CliCommand::Augment(AugmentRequest {
                type_defs: read(&input.schema)?,
                options: AugmentOptions {
                    query: !input.no_query,
                    mutation: !input.no_mutation,
                    id_fields: !input.no_id_fields,
                    is_for_remote: input.remote,
                },
            })),
            Subcommand::Compile(input) => {
                let variables = match input.variables.as_deref() {
                    Some(json) => serde_json::from_str(json)?,
                    None => Map::new(),
                };

                let config = match &input.config {
                    Some(path) => BindingConfig::from_json(&read(path)?)?,
                    None => BindingConfig::default(),
                };

                Ok(CliCommand::Compile(CompileRequest {
                    type_defs: read(&input.schema)?,
                    operation: input.operation.clone(),
                    variables,
                    config,
                }))
            }
            Subcommand::Idl(input) => Ok(CliCommand::Idl(IdlRequest {
                type_defs: read(&input.schema)?,
            })),
        }
    }

    /// Runs the command and returns what it prints.
    pub fn execute(self) -> BindingResult<String> {
        match self {
            CliCommand::Augment(request) => Ok(schema_builder::augment(&request.type_defs, &request.options)?),
            CliCommand::Compile(request) => Self::compile(request),
            CliCommand::Idl(request) => Self::idl(request),
        }
    }

    fn compile(request: CompileRequest) -> BindingResult<String> {
        let augmented = schema_builder::augment(&request.type_defs, &AugmentOptions::default())?;
        let ctx = SchemaContext::from_type_defs(&augmented)?;

        let operation = Operation::parse(&request.operation, request.variables)?;
        let plan = plan_operation(&ctx, &operation, request.config.index_config.generator())?;

        Ok(serde_json::to_string_pretty(plan.statement())?)
    }

    fn idl(request: IdlRequest) -> BindingResult<String> {
        let remote = schema_builder::augment(&request.type_defs, &AugmentOptions::remote())?;

        Ok(one_line_cypher_statements(&remote)?)
    }
}

fn read(path: &Path) -> BindingResult<String> {
    fs::read_to_string(path).map_err(|err| BindingError::io(path, err))
}
