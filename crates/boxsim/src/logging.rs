use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the log file inside the output directory
pub const LOG_FILE_NAME: &str = "boxsim.log";
/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Trim the log to its last `keep_size` bytes once it grows past `max_size`.
///
/// The kept tail starts at a line boundary. Returns whether the file was rotated.
fn rotate_log_if_needed(log_path: &Path, max_size: u64, keep_size: u64) -> std::io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if size <= max_size {
        return Ok(false);
    }

    let content = fs::read(log_path)?;
    let keep = usize::try_from(keep_size).unwrap_or(usize::MAX);
    let tail = &content[content.len().saturating_sub(keep)..];
    let tail = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(tail, |i| &tail[i + 1..]);

    fs::write(log_path, [ROTATION_MARKER, tail].concat())?;
    Ok(true)
}

/// Initialize logging to `{output_dir}/boxsim.log`.
///
/// The file is rotated at 5 MB, keeping the most recent 1 MB. `RUST_LOG`
/// overrides `level`.
pub fn init_logging(output_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(output_dir)?;

    let log_path = output_dir.join(LOG_FILE_NAME);
    if let Err(e) = rotate_log_if_needed(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boxsim={level},boxsim_core=warn")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "boxsim logging initialized");
    Ok(())
}
