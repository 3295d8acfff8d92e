fn main() {
    if let Err(e) = galaxy_viewer::core::Engine::run() {
        eprintln!("Viewer failed to start: {}", e);
        std::process::exit(1);
    }
}
