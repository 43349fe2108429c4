fn main() {
    if let Err(err) = headless_demo::entry_point() {
        log::error!("headless demo failed: {err}");
        std::process::exit(1);
    }
}
