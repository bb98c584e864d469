fn main() {
    if let Err(err) = excat::run() {
        eprintln!("{}", excat::format_error(&err));
        std::process::exit(1);
    }
}
