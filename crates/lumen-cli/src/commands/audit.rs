use lumen_audit::AuditEngine;
use lumen_core::config::LumenConfig;

/// Run `lumen audit <file>` — audit a local HTML document and print the
/// report as JSON. Exits 1 when the report contains any error issue.
pub fn run(verbose: bool, file: String) -> i32 {
    let markup = match std::fs::read_to_string(&file) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("lumen audit: failed to read {}: {}", file, e);
            return 2;
        }
    };

    let config = match std::env::current_dir() {
        Ok(cwd) => LumenConfig::load(&cwd.join(".lumen")),
        Err(_) => LumenConfig::default(),
    };
    let engine = AuditEngine::new(config);
    let report = engine.audit(&markup);

    if verbose {
        eprintln!(
            "lumen audit: {} — {} accessibility issues, {} style issues",
            file,
            report.accessibility.len(),
            report.styles.len(),
        );
    }

    match serde_json::to_string_pretty(&report) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("lumen audit: failed to serialize report: {}", e);
            return 2;
        }
    }

    if report.error_count() > 0 {
        1
    } else {
        0
    }
}
