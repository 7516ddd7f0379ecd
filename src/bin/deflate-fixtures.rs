use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use deflate_fixtures::fixture::{dump, DumpFormat};
use deflate_fixtures::{builtin_fixtures, DirectorySink, DriverConfig, FixtureDriver};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "deflate-fixtures")]
#[command(about = "Write raw DEFLATE conformance fixtures (stored, fixed and dynamic Huffman)")]
#[command(version)]
struct Args {
    /// Directory the fixtures are written to
    #[arg(short, long, default_value = "test_data")]
    out_dir: PathBuf,

    /// Number of encoding threads (0 = auto, 1 = single-threaded)
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,

    /// Inflate every fixture with libdeflate before writing it
    #[arg(long)]
    verify: bool,

    /// Print each fixture's bytes (binary, decimal or hex)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "binary")]
    dump: Option<DumpFormat>,

    /// Only produce the named fixture (repeatable)
    #[arg(long, value_name = "NAME")]
    only: Vec<String>,

    /// List the built-in fixtures and exit
    #[arg(long)]
    list: bool,

    /// Show debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Exit codes
const EXIT_OK: u8 = 0;
const EXIT_FIXTURE_FAILED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<u8, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut fixtures = builtin_fixtures();

    if args.list {
        for fixture in &fixtures {
            let level = fixture.level().map_or("-".to_string(), |l| l.level().to_string());
            println!("{}\t{}\tlevel {}", fixture.name(), fixture.strategy(), level);
        }
        return Ok(EXIT_OK);
    }

    if !args.only.is_empty() {
        if let Some(unknown) =
            args.only.iter().find(|name| !fixtures.iter().any(|f| f.name() == name.as_str()))
        {
            return Err(format!("unknown fixture: {}", unknown).into());
        }
        fixtures.retain(|f| args.only.iter().any(|name| name == f.name()));
    }

    let config = DriverConfig { num_threads: args.threads, verify: args.verify };
    let mut driver = FixtureDriver::new(config);
    if let Some(format) = args.dump {
        driver = driver.with_inspector(move |descriptor, stream| {
            println!("{} ({})", descriptor.name(), descriptor.strategy());
            print!("{}", dump(stream, format));
        });
    }

    let mut sink = DirectorySink::new(&args.out_dir);
    let start = std::time::Instant::now();
    let report = driver.run(&fixtures, &mut sink);
    let elapsed = start.elapsed();

    let failed = report.failed().count();
    tracing::info!(
        written = report.succeeded().count(),
        failed,
        dir = %args.out_dir.display(),
        elapsed = ?elapsed,
        "run complete"
    );

    for outcome in report.failed() {
        if let Err(e) = &outcome.result {
            eprintln!("{}: {}", outcome.name, e);
        }
    }

    Ok(if report.is_success() { EXIT_OK } else { EXIT_FIXTURE_FAILED })
}
