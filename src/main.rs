fn main() {
    if let Err(err) = racap::cli::run() {
        racap::ui::eprintln_error(&err);
        std::process::exit(racap::exit::exit_code(&err));
    }
}
