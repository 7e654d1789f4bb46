use mazewalk::{app::App, logging};

fn main() -> std::io::Result<()> {
    let _log_guard = logging::init_file_logging(logging::log_dir());

    // Optional seed as the first argument, for reproducible mazes
    let seed = std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok());
    let app = App::new(seed);

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("[app] {}", e);
    }
    result
}
