use anyhow::{anyhow, Context, Result};
use std::{
    env,
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, prelude::*, registry, EnvFilter};

pub const DEFAULT_LOG_FILE: &str = "core_checker.log";

// --- Custom "Tee" Writer ---
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A, B> Write for Tee<A, B>
where
    A: Write,
    B: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write(buf);
        let res_b = self.b.write(buf);
        res_a.or(res_b)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B, W1, W2> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a, Writer = W1>,
    B: MakeWriter<'a, Writer = W2>,
    W1: Write + 'a,
    W2: Write + 'a,
{
    type Writer = Tee<W1, W2>;
    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

// --- Settings ---

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            "none" => Ok(LogOutput::None),
            other => Err(anyhow!(
                "invalid log output '{}', expected console, file, both or none",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!(
                "invalid log format '{}', expected human or json",
                other
            )),
        }
    }
}

/// Stream that receives console log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    /// Keeps stdout free for machine-readable reports.
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub format: LogFormat,
    pub file_path: PathBuf,
    pub console: ConsoleStream,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Both,
            format: LogFormat::Human,
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
            console: ConsoleStream::Stdout,
        }
    }
}

impl LogSettings {
    /// Read `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT` and `LOG_FILE_PATH`.
    ///
    /// Unset variables keep their defaults; unparseable values are errors.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();

        if let Ok(level) = env::var("LOG_LEVEL") {
            settings.level = level;
        }
        if let Ok(output) = env::var("LOG_OUTPUT") {
            settings.output = output.parse().context("LOG_OUTPUT")?;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            settings.format = format.parse().context("LOG_FORMAT")?;
        }
        if let Ok(path) = env::var("LOG_FILE_PATH") {
            settings.file_path = PathBuf::from(path);
        }

        Ok(settings)
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .with_context(|| format!("invalid log level '{}'", self.level)),
        }
    }
}

/// Truncate the log file and return a non-blocking writer into it.
///
/// Each run starts with an empty log so the file only ever describes the
/// latest check.
fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path '{}' has no file name", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    File::create(path).with_context(|| format!("failed to truncate {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn install<W>(filter: EnvFilter, writer: W, format: LogFormat, ansi: bool) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = registry().with(filter);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(ansi);

    match format {
        LogFormat::Json => subscriber.with(fmt_layer.json()).try_init(),
        LogFormat::Human => subscriber.with(fmt_layer.compact()).try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

/// Initializes the global tracing subscriber.
///
/// The returned guard must be kept alive until the end of the run, otherwise
/// buffered file output is lost.
pub fn init_subscriber(settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let filter = settings.env_filter()?;

    match settings.console {
        ConsoleStream::Stdout => init_with_console(settings, filter, io::stdout),
        ConsoleStream::Stderr => init_with_console(settings, filter, io::stderr),
    }
}

fn init_with_console<C>(
    settings: &LogSettings,
    filter: EnvFilter,
    console: C,
) -> Result<Option<WorkerGuard>>
where
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match settings.output {
        LogOutput::Both => {
            let (non_blocking, guard) = file_writer(&settings.file_path)?;
            let tee_writer = MakeTee {
                make_a: console,
                make_b: non_blocking,
            };
            install(filter, tee_writer, settings.format, false)?;
            Ok(Some(guard))
        }
        LogOutput::Console => {
            install(filter, console, settings.format, true)?;
            Ok(None)
        }
        LogOutput::File => {
            let (non_blocking, guard) = file_writer(&settings.file_path)?;
            install(filter, non_blocking, settings.format, false)?;
            Ok(Some(guard))
        }
        LogOutput::None => {
            registry()
                .with(filter)
                .try_init()
                .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_parsing() {
        assert_eq!("console".parse::<LogOutput>().unwrap(), LogOutput::Console);
        assert_eq!("BOTH".parse::<LogOutput>().unwrap(), LogOutput::Both);
        assert!("syslog".parse::<LogOutput>().is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert!("pretty".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_defaults_write_to_console_and_file() {
        let settings = LogSettings::default();
        assert_eq!(settings.output, LogOutput::Both);
        assert_eq!(settings.file_path, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(settings.level, "info");
        assert_eq!(settings.console, ConsoleStream::Stdout);
    }

    #[test]
    fn test_file_writer_truncates_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("run.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "previous run\n").unwrap();

        let (_writer, _guard) = file_writer(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_file_writer_rejects_path_without_name() {
        assert!(file_writer(Path::new("/")).is_err());
    }
}
