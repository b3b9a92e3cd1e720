fn main() {
    if let Err(e) = epiward_lib::run() {
        tracing::error!("{e}");
        eprintln!("epiward: {e}");
        std::process::exit(1);
    }
}
