use clap::Parser;
use commutators::{dictionary, history, report, Error, FixedPointDriver, LetterPair, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Discover which letter pairs commute within the anagram classes of a dictionary.
#[derive(Parser)]
#[command(name = "commutators", version)]
struct Cli {
    /// Word list, one word per line. Extra tab-separated fields are ignored. Use `-` for stdin.
    dictionary: PathBuf,

    /// Directory the report files are written into.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Worker threads for scanning and reducing classes. Defaults to one per CPU.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Don't write the per-pair history files.
    #[arg(long)]
    skip_history: bool,

    /// Log filter, used when RUST_LOG is unset.
    #[arg(long, env = "COMMUTATORS_LOG", default_value = "info")]
    log_level: String,

    /// Log as JSON lines.
    #[arg(long)]
    json: bool,
}

fn create(dir: &Path, name: &str) -> io::Result<BufWriter<File>> {
    File::create(dir.join(name)).map(BufWriter::new)
}

fn write_history_files(dir: &Path, driver: &FixedPointDriver) -> Result<()> {
    let dir = dir.join("history");
    fs::create_dir_all(&dir)?;
    let evidence = history(driver.classes());
    for pair in LetterPair::all() {
        let mut out = create(&dir, &report::history_file_name(pair))?;
        let classes = evidence.get(&pair).map(Vec::as_slice).unwrap_or_default();
        report::write_history(&mut out, classes)?;
        out.flush()?;
    }
    info!(pairs = evidence.len(), "wrote history files");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|e| Error::InvariantViolation(e.to_string()))?;
    }

    let words = if cli.dictionary.as_os_str() == "-" {
        dictionary::load(io::stdin().lock())?
    } else {
        dictionary::load(File::open(&cli.dictionary)?)?
    };
    info!(words = words.len(), path = %cli.dictionary.display(), "processed dictionary");

    fs::create_dir_all(&cli.output_dir)?;
    let dir = cli.output_dir.as_path();
    let driver = FixedPointDriver::new(words)?;

    if !cli.skip_history {
        write_history_files(dir, &driver)?;
    }

    let outcome = driver.run_with(|summary, registry| {
        let mut out = create(dir, &format!("pairs_{}.txt", summary.round))?;
        report::write_status(&mut out, registry)?;
        out.flush()?;
        Ok(())
    })?;

    let mut good = create(dir, "pairs_good.txt")?;
    let mut bad = create(dir, "pairs_bad.txt")?;
    report::write_quality(&mut good, &mut bad, &outcome.registry)?;
    good.flush()?;
    bad.flush()?;

    let mut irreds = create(dir, "irreds.txt")?;
    report::write_irreducibles(&mut irreds, &outcome.classes)?;
    irreds.flush()?;

    info!(
        rounds = outcome.rounds,
        pairs = outcome.registry.len(),
        irreducible = outcome.classes.len(),
        "done"
    );
    Ok(())
}
