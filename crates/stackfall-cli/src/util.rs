use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use env_logger::{Builder, Env, Target};

/// Writes `value` as pretty JSON into `path`, or to standard output if no path is given.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut writer, target): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to finish output to {target}"))?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

fn logger_builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or("info"))
}

/// Logs to standard error, filtered by `RUST_LOG` (default `info`).
pub fn init_stderr_logger() -> anyhow::Result<()> {
    logger_builder()
        .target(Target::Stderr)
        .try_init()
        .context("Failed to install logger")
}

/// Logs into a file, filtered by `RUST_LOG` (default `info`).
///
/// Used while the terminal belongs to the TUI.
pub fn init_file_logger(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    logger_builder()
        .target(Target::Pipe(Box::new(BufWriter::new(file))))
        .try_init()
        .context("Failed to install logger")
}
