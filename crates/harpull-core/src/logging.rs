use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer that hands out clones of one shared log file handle.
struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = fs::File;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.try_clone().expect("failed to clone log file handle")
    }
}

/// Location of the log file per the XDG base directory spec:
/// `~/.local/state/harpull/harpull.log`.
fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harpull")?;
    let state_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&state_dir)?;
    Ok(state_dir.join("harpull.log"))
}

/// Initialize structured logging.
///
/// Output goes to the XDG state log file, never the terminal, so log lines
/// cannot interleave with the live progress bar. `RUST_LOG` overrides the
/// default filter.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,harpull_core=debug,harpull_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(BoxMakeWriter::new(FileMakeWriter(file)))
        .with_ansi(false)
        .init();

    tracing::info!("harpull logging initialized at {}", path.display());
    Ok(())
}
