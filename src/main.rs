fn main() {
    if let Err(e) = logr::get_args().and_then(logr::run) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
