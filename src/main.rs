// src/main.rs

use clap::Parser;

use runcap::cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if let Err(err) = runcap::logging::init_logging(args.log_level) {
        eprintln!("runcap: failed to initialise logging: {err:#}");
        std::process::exit(2);
    }

    match runcap::run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("runcap: {err}");
            std::process::exit(2);
        }
    }
}
