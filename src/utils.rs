use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() -> crate::Result<()> {
    // On Windows, disable ANSI colors to avoid garbage characters in console
    // On Unix systems, keep ANSI colors for better readability
    #[cfg(target_os = "windows")]
    let use_ansi = false;

    #[cfg(not(target_os = "windows"))]
    let use_ansi = true;

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .finish(),
    )?;
    Ok(())
}
