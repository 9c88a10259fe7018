use anyhow::Context;
use dtsprep_cli::{cli, logging, PrepConfig, PrepError, Preparer, Reporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::CliArgs::from_matches(&cli::command().get_matches());
    logging::init(args.verbosity);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "preparation failed");
            let style = console::Style::new().red();
            eprintln!("{}", style.apply_to(format!("Error: {err:#}")));
            let code = err
                .downcast_ref::<PrepError>()
                .map_or(1, PrepError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(args: cli::CliArgs) -> anyhow::Result<()> {
    let config = PrepConfig::from_current_dir()
        .context("can't determine current directory")?
        .with_ignore_errors(args.ignore_errors);

    let mut preparer = Preparer::new(config, Reporter::stdout());
    let summary = preparer.run()?;

    for path in summary.missing_files() {
        tracing::warn!(path = %path.display(), "file was missing");
    }
    Ok(())
}
