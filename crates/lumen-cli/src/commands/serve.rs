use std::path::Path;

use lumen_core::config::LumenConfig;
use lumen_server::{http, AppState};

/// Run `lumen serve` — start the HTTP API backed by the history database.
pub fn run(verbose: bool, port: u16, db: String) -> i32 {
    let config = match std::env::current_dir() {
        Ok(cwd) => LumenConfig::load(&cwd.join(".lumen")),
        Err(_) => LumenConfig::default(),
    };

    if let Some(parent) = Path::new(&db).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("lumen serve: failed to create {}: {}", parent.display(), e);
                return 2;
            }
        }
    }

    let state = match AppState::open(&db, config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("lumen serve: failed to open history database: {}", e);
            return 2;
        }
    };

    if verbose {
        eprintln!(
            "lumen serve: listening on port {} (workers: {})",
            port,
            state.engine.config().worker_pool_size(),
        );
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("lumen serve: failed to start runtime: {}", e);
            return 2;
        }
    };

    match runtime.block_on(http::serve(state, port)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("lumen serve: server error: {}", e);
            2
        }
    }
}
