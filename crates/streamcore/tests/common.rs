#![allow(missing_docs, dead_code)]

use std::{path::PathBuf, sync::Once};

static INIT: Once = Once::new();

/// Routes crate logs through the test harness. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

/// A path in the temp directory unique to this process and `name`.
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("streamcore-{}-{name}", std::process::id()))
}

pub const CONFIG: &str = "\
# service settings
name = edge-proxy
listen = 0.0.0.0:8080

greeting =   zażółć gęślą jaźń
";
