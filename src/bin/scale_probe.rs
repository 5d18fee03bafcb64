use std::env;
use std::time::Instant;

use chain_dp::utils::{left_to_right_cost, multiply_left_to_right};
use chain_dp::{ChainDims, ChainEngine, Matrix};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Matrix-chain scaling probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  • plan: O(n^3) planner on chains of increasing length");
    eprintln!(
        "  • verification: optimum vs exhaustive enumeration for n <= {}",
        options.verify_limit
    );
    eprintln!("  • evaluate: optimal-order product vs left-to-right product on small matrices");
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] Planning chains...");
    measurements.extend(run_planner(&options, &mut sys));
    eprintln!();

    eprintln!("[2/2] Evaluating chains...");
    measurements.extend(run_evaluator(&mut sys));
    eprintln!();

    let failed = measurements
        .iter()
        .filter(|m| matches!(m.verification_status, VerificationStatus::Failed))
        .count();
    eprintln!(
        "{} measurements, {} failed verification",
        measurements.len(),
        failed
    );

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
    if failed > 0 {
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 10usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Longest chain checked by exhaustive enumeration (default: 10)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a non-negative integer".to_string())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    chain_len: usize,
    min_cost: u64,
    naive_cost: u64,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn run_planner(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const LENGTHS: &[usize] = &[4, 8, 10, 16, 32, 64, 128, 256, 512];
    let total = LENGTHS.len();
    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] n={}... ", idx + 1, total, n);
            let dims = deterministic_dims(n, 7);
            let before = rss_kib(sys);
            let start = Instant::now();
            let engine = ChainEngine::new(dims.clone());
            let wall_s = start.elapsed().as_secs_f64();
            let rss_delta_kib = rss_kib(sys).saturating_sub(before);

            let (status, detail) = if n <= options.verify_limit {
                let baseline = exhaustive_cost(dims.as_slice(), 0, n - 1);
                if baseline == engine.min_cost() {
                    (VerificationStatus::Passed, None)
                } else {
                    (
                        VerificationStatus::Failed,
                        Some(format!("expected {baseline}, got {}", engine.min_cost())),
                    )
                }
            } else {
                (VerificationStatus::NotChecked, None)
            };
            eprintln!(
                "cost={} time={:.3}s status={}",
                engine.min_cost(),
                wall_s,
                status.label()
            );

            Measurement {
                scenario: "plan",
                chain_len: n,
                min_cost: engine.min_cost(),
                naive_cost: left_to_right_cost(&dims),
                wall_s,
                rss_delta_kib,
                verification_status: status,
                verification_detail: detail,
            }
        })
        .collect()
}

fn run_evaluator(sys: &mut System) -> Vec<Measurement> {
    // Entries stay in -3..=3 and dimensions in 1..=8, which keeps every
    // product of up to 12 matrices inside i64.
    const LENGTHS: &[usize] = &[4, 8, 12];
    let total = LENGTHS.len();
    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] n={}... ", idx + 1, total, n);
            let dims = deterministic_dims(n, 2);
            let matrices = deterministic_matrices(&dims);
            let engine = ChainEngine::new(dims.clone());

            let before = rss_kib(sys);
            let start = Instant::now();
            let product = engine.evaluate(&matrices);
            let wall_s = start.elapsed().as_secs_f64();
            let rss_delta_kib = rss_kib(sys).saturating_sub(before);

            let (status, detail) = match (product, multiply_left_to_right(&matrices)) {
                (Ok(optimal), Ok(naive)) if optimal == naive => (VerificationStatus::Passed, None),
                (Ok(_), Ok(_)) => (
                    VerificationStatus::Failed,
                    Some("products differ".to_string()),
                ),
                (Err(err), _) | (_, Err(err)) => (VerificationStatus::Failed, Some(err.to_string())),
            };
            eprintln!("time={:.3}s status={}", wall_s, status.label());

            Measurement {
                scenario: "evaluate",
                chain_len: n,
                min_cost: engine.min_cost(),
                naive_cost: left_to_right_cost(&dims),
                wall_s,
                rss_delta_kib,
                verification_status: status,
                verification_detail: detail,
            }
        })
        .collect()
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,chain_len,min_cost,naive_cost,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.chain_len,
            m.min_cost,
            m.naive_cost,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "{:<10} {:>6} {:>14} {:>14} {:>9} {:>10} {:<12}",
        "scenario", "n", "min_cost", "naive_cost", "wall_s", "rss_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<10} {:>6} {:>14} {:>14} {:>9.3} {:>10} {:<12}",
            m.scenario,
            m.chain_len,
            m.min_cost,
            m.naive_cost,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label()
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"chain_len\":{},\"min_cost\":{},\"naive_cost\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.chain_len,
            m.min_cost,
            m.naive_cost,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

/// Dimensions cycling through `1..=spread * 4`, never zero.
fn deterministic_dims(n: usize, spread: usize) -> ChainDims {
    let p = (0..=n).map(|i| 1 + (i * spread + i / 3) % (spread * 4)).collect();
    ChainDims::new(p).unwrap_or_else(|err| panic!("probe dimensions are positive: {err}"))
}

fn deterministic_matrices(dims: &ChainDims) -> Vec<Matrix> {
    (0..dims.len())
        .map(|m| {
            let (rows, cols) = dims.shape(m);
            Matrix::from_fn(rows, cols, |i, j| ((m + 3 * i + 5 * j) % 7) as i64 - 3)
        })
        .collect()
}

/// Minimum over every bracketing of `p[i..=j+1]`, no memoisation.
fn exhaustive_cost(p: &[usize], i: usize, j: usize) -> u64 {
    if i == j {
        return 0;
    }
    (i..j)
        .map(|k| {
            exhaustive_cost(p, i, k)
                + exhaustive_cost(p, k + 1, j)
                + (p[i] * p[k + 1] * p[j + 1]) as u64
        })
        .min()
        .unwrap_or(0)
}
