//! Replay recorded runner output through the inspection pipeline.
//!
//! ```text
//! topping-inspect frames.jsonl --good-counts 3,3,3
//! edge-runner --json | topping-inspect - --frame-interval-ms 0
//! ```

use std::future::Future;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use topping_inspect::{
    ConsoleSink, InspectionConfig, InspectionPipeline, JsonLinesSource, LogSink, StopReason,
    VerdictSink,
};

/// How long the frame loop gets to notice an interrupt before the process exits.
const INTERRUPT_GRACE: Duration = Duration::from_millis(500);

/// Conventional exit status for a SIGINT-terminated process.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SinkKind {
    /// One plain line per pizza on stdout
    Console,
    /// Structured log event per pizza
    Log,
}

#[derive(Parser, Debug)]
#[command(name = "topping-inspect", about = "Ok/Bad topping verdicts for pizzas on a conveyor")]
struct Args {
    /// JSON-lines runner output, or `-` for stdin
    input: PathBuf,
    /// TOML file with categories, good_counts, frame_interval_ms and strict
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Topping names, in count order (overrides the config file)
    #[arg(long, value_delimiter = ',')]
    categories: Option<Vec<String>>,
    /// Expected count per topping (overrides the config file)
    #[arg(long, value_delimiter = ',')]
    good_counts: Option<Vec<u32>>,
    /// Minimum spacing between frames; 0 replays as fast as possible
    #[arg(long)]
    frame_interval_ms: Option<u64>,
    /// Stop on the first frame carrying an unknown label
    #[arg(long)]
    strict: bool,
    #[arg(long, value_enum, default_value_t = SinkKind::Console)]
    sink: SinkKind,
    /// Used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Defaults, then the config file, then command-line flags.
    fn resolve_config(&self) -> Result<InspectionConfig> {
        let mut config = match &self.config {
            Some(path) => InspectionConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => InspectionConfig::default(),
        };
        if let Some(categories) = &self.categories {
            config.categories = categories.clone();
        }
        if let Some(good_counts) = &self.good_counts {
            config.good_counts = good_counts.clone();
        }
        if let Some(ms) = self.frame_interval_ms {
            config.frame_interval_ms = ms;
        }
        config.strict |= self.strict;
        config.validate().context("invalid inspection settings")?;
        Ok(config)
    }
}

/// How waiting on the frame loop ended.
#[derive(Debug)]
enum LoopExit<T> {
    /// The loop returned, possibly after seeing the cancel flag.
    Finished(T),
    /// The loop was still blocked when the grace period ran out.
    Abandoned,
}

/// Wait for the blocking frame loop, raising `cancel` when `interrupt` fires.
///
/// After an interrupt the loop gets `grace` to return on its own. A loop stuck
/// inside a blocking read is abandoned instead.
async fn wait_or_interrupt<T, F>(
    mut handle: JoinHandle<T>,
    interrupt: F,
    cancel: &AtomicBool,
    grace: Duration,
) -> Result<LoopExit<T>, JoinError>
where
    F: Future<Output = ()>,
{
    let finished = tokio::select! {
        joined = &mut handle => Some(joined),
        () = interrupt => None,
    };
    if let Some(joined) = finished {
        return Ok(LoopExit::Finished(joined?));
    }

    info!("interrupted");
    cancel.store(true, Ordering::Relaxed);
    match tokio::time::timeout(grace, &mut handle).await {
        Ok(joined) => Ok(LoopExit::Finished(joined?)),
        Err(_) => Ok(LoopExit::Abandoned),
    }
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = args.resolve_config()?;
    info!(
        categories = ?config.categories,
        good_counts = ?config.good_counts,
        frame_interval_ms = config.frame_interval_ms,
        strict = config.strict,
        "starting inspection"
    );

    let reader: Box<dyn BufRead + Send> = if args.input.as_os_str() == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };
    let mut source = JsonLinesSource::new(reader);
    let mut pipeline = InspectionPipeline::new(&config)?;
    let mut sink: Box<dyn VerdictSink + Send> = match args.sink {
        SinkKind::Console => Box::new(ConsoleSink::stdout()),
        SinkKind::Log => Box::new(LogSink),
    };

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let handle = tokio::task::spawn_blocking(move || {
        pipeline.run(&mut source, &mut sink.as_mut(), &flag)
    });

    match wait_or_interrupt(handle, ctrl_c(), &cancel, INTERRUPT_GRACE)
        .await
        .context("frame loop panicked")?
    {
        LoopExit::Finished(run) => {
            if run?.stop == StopReason::Exhausted {
                info!("frame stream ended");
            }
            Ok(())
        }
        LoopExit::Abandoned => {
            // The runtime would wait forever on the blocked read at shutdown.
            warn!("frame source blocked after interrupt; exiting without a run summary");
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::mpsc;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(["topping-inspect", "-"].iter().chain(extra)).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = args(&[]).resolve_config().unwrap();
        assert_eq!(config, InspectionConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let toml = concat!(
            "categories = [\"olive\", \"basil\"]\n",
            "good_counts = [4, 2]\n",
            "frame_interval_ms = 50\n",
        );
        file.write_all(toml.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap();

        let config = args(&["--config", path, "--good-counts", "5,1", "--strict"])
            .resolve_config()
            .unwrap();

        assert_eq!(config.categories, ["olive", "basil"]);
        assert_eq!(config.good_counts, [5, 1]);
        assert_eq!(config.frame_interval_ms, 50);
        assert!(config.strict);
    }

    #[test]
    fn test_mismatched_overrides_rejected() {
        let err = args(&["--categories", "mush,roni", "--good-counts", "3,3,3"])
            .resolve_config()
            .unwrap_err();
        assert!(err.to_string().contains("invalid inspection settings"));
    }

    #[tokio::test]
    async fn test_finished_loop_is_returned() {
        let cancel = AtomicBool::new(false);
        let handle = tokio::task::spawn_blocking(|| 7);

        let exit = wait_or_interrupt(handle, std::future::pending(), &cancel, INTERRUPT_GRACE)
            .await
            .unwrap();

        assert!(matches!(exit, LoopExit::Finished(7)));
        assert!(!cancel.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_interrupt_lets_cooperative_loop_finish() {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = tokio::task::spawn_blocking(move || {
            while !flag.load(Ordering::Relaxed) {
                std::thread::sleep(Duration::from_millis(5));
            }
            "cancelled"
        });

        let exit = wait_or_interrupt(handle, async {}, &cancel, Duration::from_secs(5))
            .await
            .unwrap();

        assert!(matches!(exit, LoopExit::Finished("cancelled")));
    }

    #[tokio::test]
    async fn test_interrupt_abandons_blocked_loop() {
        let cancel = AtomicBool::new(false);
        let (release, blocked) = mpsc::channel::<()>();
        // Stands in for a read on a source that never produces a line.
        let handle = tokio::task::spawn_blocking(move || blocked.recv().is_ok());

        let exit = wait_or_interrupt(handle, async {}, &cancel, Duration::from_millis(50))
            .await
            .unwrap();

        assert!(matches!(exit, LoopExit::Abandoned));
        assert!(cancel.load(Ordering::Relaxed));
        release.send(()).unwrap();
    }
}
