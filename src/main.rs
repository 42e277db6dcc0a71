use std::process;

fn main() {
    if let Err(err) = paterm::cli::main() {
        eprintln!("{err}");
        process::exit(1);
    }
}
