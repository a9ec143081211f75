use qnet_sim::cli::{self, FormatArg};
use qnet_sim::engine;
use qnet_sim::error::Result;
use qnet_sim::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args()?;
    let config = cli::build_config(&args)?;
    let snapshot = engine::run_simulation(&config)?;

    let formatter = formatter_for(args.format);
    let output = formatter.write(&snapshot)?;
    print!("{}", output);

    Ok(())
}

fn formatter_for(format: FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
