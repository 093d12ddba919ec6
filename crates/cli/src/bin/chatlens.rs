//! chatlens CLI binary entrypoint.

fn main() {
    if let Err(err) = chatlens_cli::app::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
