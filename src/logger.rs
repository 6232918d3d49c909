use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the stderr subscriber, at DEBUG when `verbose` is set.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global logger was already installed");
    }
}
