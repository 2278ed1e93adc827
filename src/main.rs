mod args;
mod tideman;

use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use snafu::ErrorCompat;

use crate::tideman::config_reader::FileSource;
use crate::tideman::{TidemanError, TidemanResult};

fn run(args: &args::Args) -> TidemanResult<String> {
    let input_source = args
        .input
        .as_ref()
        .map(|path| FileSource::new(args.input_type.as_deref().unwrap_or("csv"), path));

    let result = if let Some(config_path) = args.config.clone() {
        tideman::run_election(
            config_path,
            input_source,
            args.max_candidates,
            args.out.clone(),
            args.reference.clone(),
        )?
    } else if let Some(source) = input_source {
        tideman::run_ballot_file(
            source,
            &args.candidates,
            args.max_candidates,
            args.out.clone(),
            args.reference.clone(),
        )?
    } else {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        tideman::run_interactive(
            &args.candidates,
            args.max_candidates,
            &mut stdin.lock(),
            &mut stdout.lock(),
            args.out.clone(),
        )?
    };
    Ok(result.winner)
}

fn report(e: &TidemanError) {
    debug!("Error occured {:?}", e);
    if let Some(msg) = e.user_message() {
        println!("{}", msg);
    } else {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e) {
            eprintln!("trace: {}", bt);
        }
    }
}

fn main() {
    let args = args::Args::parse();
    let interactive = args.config.is_none() && args.input.is_none();
    let default_level = match (args.verbose, interactive) {
        (true, _) => "debug",
        // Keep the terminal free for the prompts.
        (false, true) => "warn",
        (false, false) => "info",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
    info!("args: {:?}", args);

    match run(&args) {
        Ok(winner) => println!("{}", winner),
        Err(e) => {
            report(&e);
            std::process::exit(e.exit_code());
        }
    }
}
