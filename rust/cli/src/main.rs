use std::io;

fn main() {
    holdem_cli::logging::init_logging();
    let code = holdem_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
