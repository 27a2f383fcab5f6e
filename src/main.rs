use clap::Parser;
use passvault::cli::{menu, output, Cli, Context};

fn main() {
    let cli = Cli::parse();
    passvault::logging::init_logging(cli.verbose);

    let result = Context::from_cli(&cli).and_then(|ctx| menu::run(&ctx));

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
