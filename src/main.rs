use snake_lottery::config::Config;
use snake_lottery::lottery::session::run;
use snake_lottery::terminal::TerminalFrontend;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)
        .map_err(|e| format!("can't open log file {}: {}", path.display(), e))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    // the terminal belongs to the lottery, so logs only ever go to a file
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    info!(?config, "starting");

    let mut frontend = TerminalFrontend::new(&config)?;
    let result = run(&config, &mut frontend);
    frontend.restore()?;

    let sessions = result?;
    info!(sessions, "done");
    println!("end");
    Ok(())
}
