fn main() {
    if let Err(err) = bounds_report::internal_main() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
