//! Cryptan CLI
//!
//! Statistical cryptanalysis of classical ciphers from the command line.

mod report;
mod trial;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use cryptan_analysis::{
    estimate_key_length, kasiski_examination, period_scores, AnalysisConfig, Analyzer,
    FrequencyAnalysis,
};
use cryptan_cipher::{Cipher, CipherKey, CipherKind, Sampler};

#[derive(Parser)]
#[command(name = "cryptan")]
#[command(about = "Cryptan - recover keys and plaintext from classical ciphertext")]
#[command(version)]
struct Cli {
    /// Debug logging (RUST_LOG still applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: <config dir>/cryptan/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frequency, coincidence and period analysis
    Analyze {
        /// Text to analyze (reads stdin when neither text nor file is given)
        text: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Show ASCII chart
        #[arg(long)]
        chart: bool,
    },

    /// Recover key and plaintext from ciphertext alone
    Crack {
        /// Cipher: rotation, affine, vigenere, substitution, all
        #[arg(short, long, default_value = "all")]
        cipher: String,

        /// Ciphertext (reads stdin when neither text nor file is given)
        text: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Emit JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Encrypt with a known key
    Encrypt {
        /// Cipher: rotation, affine, vigenere, substitution
        #[arg(short, long)]
        cipher: String,

        /// Key: shift (3 or D), a,b (5,8), letters (LEMON) or 26-letter table
        #[arg(short, long)]
        key: String,

        /// Text to encrypt
        text: String,
    },

    /// Decrypt with a known key
    Decrypt {
        /// Cipher: rotation, affine, vigenere, substitution
        #[arg(short, long)]
        cipher: String,

        /// Key: shift (3 or D), a,b (5,8), letters (LEMON) or 26-letter table
        #[arg(short, long)]
        key: String,

        /// Text to decrypt
        text: String,
    },

    /// Print a random corpus passage enciphered under a random key
    Sample {
        #[arg(short, long)]
        cipher: String,

        /// RNG seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Crack sampled ciphertexts for every cipher and check the results
    Trial {
        /// Samples per cipher
        #[arg(short, long, default_value = "3")]
        rounds: usize,

        /// RNG seed for reproducible samples
        #[arg(long)]
        seed: Option<u64>,

        /// Letter agreement the heuristic solvers must reach
        #[arg(long, default_value = "0.95")]
        min_agreement: f64,

        /// Emit JSON records instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Analyze { text, file, chart } => cmd_analyze(&cli.config, text, file, chart),
        Commands::Crack { cipher, text, file, json } => {
            cmd_crack(&cli.config, cipher, text, file, json)
        }
        Commands::Encrypt { cipher, key, text } => cmd_transform(cipher, key, text, true),
        Commands::Decrypt { cipher, key, text } => cmd_transform(cipher, key, text, false),
        Commands::Sample { cipher, seed } => cmd_sample(cipher, seed),
        Commands::Trial { rounds, seed, min_agreement, json } => {
            cmd_trial(&cli.config, rounds, seed, min_agreement, json)
        }
        Commands::Config => cmd_config(&cli.config),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "cryptan=debug" } else { "cryptan=info" };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_config(path: &Option<PathBuf>) -> Result<AnalysisConfig> {
    AnalysisConfig::load(path.as_deref()).with_context(|| match path {
        Some(path) => format!("loading config from {}", path.display()),
        None => "loading config".to_string(),
    })
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<Vec<u8>> {
    match (text, file) {
        (Some(_), Some(_)) => bail!("Give either TEXT or --file, not both"),
        (Some(text), None) => Ok(text.into_bytes()),
        (None, Some(path)) => read_file(&path),
        (None, None) => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

// ═══════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════

fn cmd_analyze(
    config: &Option<PathBuf>,
    text: Option<String>,
    file: Option<PathBuf>,
    chart: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let input = read_input(text, file)?;
    let analysis = FrequencyAnalysis::analyze(&input);

    if chart {
        println!("{}", analysis.render_ascii());
    }

    let periods = period_scores(&input, config.max_key_length);
    let estimated = estimate_key_length(&input, config.max_key_length, config.target_ic);
    let kasiski = kasiski_examination(&input, config.max_key_length);
    println!("{}", report::render_analysis(&analysis, &periods, estimated, &kasiski));
    Ok(())
}

fn cmd_crack(
    config: &Option<PathBuf>,
    cipher: String,
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let analyzer = Analyzer::new(load_config(config)?)?;
    let input = read_input(text, file)?;

    let solutions = if cipher.eq_ignore_ascii_case("all") {
        analyzer.solve_all(&input)
    } else {
        let kind: CipherKind = cipher.parse()?;
        vec![analyzer.solve(kind, &input)]
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&solutions)?);
        return Ok(());
    }

    let full = solutions.len() == 1;
    for solution in &solutions {
        println!("{}", report::render_solution(solution, full));
    }
    Ok(())
}

fn cmd_transform(cipher: String, key: String, text: String, encrypt: bool) -> Result<()> {
    let kind: CipherKind = cipher.parse()?;
    let key = CipherKey::parse(kind, &key)?;
    let output = if encrypt {
        Cipher::encrypt(&key, text.as_bytes())?
    } else {
        Cipher::decrypt(&key, text.as_bytes())?
    };

    let action = if encrypt { "ENCRYPT" } else { "DECRYPT" };
    println!("\n  {} ({})", action, kind.name().to_uppercase());
    println!("  Key:    {}", key);
    println!("  Input:  {}", text);
    println!("  Output: {}", String::from_utf8_lossy(&output));
    Ok(())
}

fn cmd_sample(cipher: String, seed: Option<u64>) -> Result<()> {
    let kind: CipherKind = cipher.parse()?;
    let mut sampler = match seed {
        Some(seed) => Sampler::new(seed),
        None => Sampler::from_entropy(),
    };
    let sample = sampler.sample(kind)?;
    println!("{}", report::render_sample(&sample));
    Ok(())
}

fn cmd_trial(
    config: &Option<PathBuf>,
    rounds: usize,
    seed: Option<u64>,
    min_agreement: f64,
    json: bool,
) -> Result<()> {
    let analyzer = Analyzer::new(load_config(config)?)?;
    let mut sampler = match seed {
        Some(seed) => Sampler::new(seed),
        None => Sampler::from_entropy(),
    };

    let records = trial::run(&analyzer, &mut sampler, rounds, min_agreement)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("\n  TRIAL RESULTS");
    println!("  =============\n");
    for record in &records {
        println!(
            "  [PASS] {:<20} round {}  key {:<28} {:>6.1}%",
            record.kind.name(),
            record.round,
            record.recovered_key,
            record.verdict.agreement * 100.0
        );
    }
    println!("\n  All {} cryptanalyses succeeded", records.len());
    Ok(())
}

fn cmd_config(config: &Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    if let Some(path) = AnalysisConfig::default_path() {
        println!("# default path: {}", path.display());
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}
