//! pdvcontrol entrypoint.

use pdv_control::run;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("PDV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
