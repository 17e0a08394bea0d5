use clap::Parser;

use jsondb_cli::Args;

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = jsondb_cli::run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
