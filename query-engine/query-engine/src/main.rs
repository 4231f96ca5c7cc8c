use graph_binding::{BindingResult, cli::CliCommand, logger::Logger, opt::BindingOpt};
use std::process;
use structopt::StructOpt;

fn main() {
    if let Err(err) = run() {
        tracing::info!("Encountered error during execution:");

        if err.render_as_json().is_err() {
            eprintln!("{err}");
        }

        process::exit(1)
    }
}

fn run() -> BindingResult<()> {
    let opts = BindingOpt::from_args();

    let mut logger = Logger::new("graph-binding");
    logger.log_format(opts.log_format());
    logger.install()?;

    let output = CliCommand::from_opt(&opts)?.execute()?;
    println!("{output}");

    Ok(())
}
