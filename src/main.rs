/// Headless demo entry point for native builds.
///
/// Usage: `pharmpick-demo [CONFIG_PATH]`. Without a path the config is read
/// from the platform config directory when present.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use pharmpick::AppConfig;

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::load_from_default_path().unwrap_or_default(),
    };

    if let Err(e) = pharmpick::logging::init(config.preferences.log_level) {
        eprintln!("Logger setup failed: {}", e);
    }

    match pharmpick::demo::run(&config) {
        Ok(transcript) => {
            for line in transcript {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// The engine is driven by the host page on the web; there is no binary there.
#[cfg(target_arch = "wasm32")]
fn main() {}
