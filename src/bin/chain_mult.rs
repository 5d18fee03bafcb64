use std::env;
use std::fs;
use std::io::{self, Read, Write};

use chain_dp::utils::multiply_left_to_right;
use chain_dp::{ChainDims, ChainEngineBuilder, LabelStyle, Matrix, Solution};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("chain_mult: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let (dims, matrices) = match read_source(options.input.as_deref()).and_then(|s| parse_chain(&s)) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("chain_mult: {err}");
            std::process::exit(2);
        }
    };

    let engine = ChainEngineBuilder::new(dims)
        .with_labels(options.labels)
        .with_shape_check(options.check_shapes)
        .build();
    let solution = engine.solve(&matrices);

    let verified = if options.verify {
        Some(verify(&solution, &matrices))
    } else {
        None
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match options.format {
        OutputFormat::Text => write_text(&mut out, &solution, verified),
        OutputFormat::Json => write_json(&mut out, &solution, verified),
    };
    if let Err(err) = written.and_then(|()| out.flush()) {
        eprintln!("chain_mult: cannot write output: {err}");
        std::process::exit(1);
    }

    if let Err(err) = &solution.product {
        eprintln!("{err}");
        std::process::exit(1);
    }
    if verified == Some(false) {
        eprintln!("chain_mult: optimal-order product differs from left-to-right product");
        std::process::exit(1);
    }
}

struct Options {
    input: Option<String>,
    format: OutputFormat,
    labels: LabelStyle,
    check_shapes: bool,
    verify: bool,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut input = None;
        let mut format = OutputFormat::Text;
        let mut labels = LabelStyle::Letters;
        let mut check_shapes = false;
        let mut verify = false;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if arg == "--check-shapes" {
                check_shapes = true;
            } else if arg == "--verify" {
                verify = true;
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = next_value(&mut args, "--format")?;
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--labels=") {
                labels = parse_labels(value)?;
            } else if arg == "--labels" {
                let value = next_value(&mut args, "--labels")?;
                labels = parse_labels(&value)?;
            } else if let Some(value) = arg.strip_prefix("--input=") {
                input = Some(value.to_string());
            } else if arg == "--input" {
                input = Some(next_value(&mut args, "--input")?);
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            input,
            format,
            labels,
            check_shapes,
            verify,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin chain_mult [-- <options>] < input.txt

Input: whitespace-separated integers
  n                     number of matrices (>= 1)
  p0 p1 ... pn          dimensions; matrix i is p[i] x p[i+1]
  elements              each matrix row by row, in chain order

Options:
  --input <path>                Read from a file instead of stdin
  --format <text|json>          Output format (default: text)
  --labels <letters|indexed>    Leaf labels: A B C ... or A1 A2 A3 ... (default: letters)
  --check-shapes                Reject matrices that disagree with the dimension vector
  --verify                      Compare against the left-to-right product
  -h, --help                    Print this help message

Exit status:
  0  success
  1  the product could not be formed or --verify failed; the cost and
     bracketing are still printed, the dimension-mismatch message goes to
     stderr (the classic console program exits 0 here)
  2  bad arguments or malformed input

Examples:
  echo '2 2 3 1  1 2 3 4 5 6  1 1 1' | cargo run --bin chain_mult
  cargo run --bin chain_mult -- --input chain.txt --format json --verify
"
        );
    }
}

fn next_value<I, T>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    args.next()
        .map(Into::into)
        .ok_or_else(|| format!("missing value after {flag}"))
}

fn parse_labels(value: &str) -> Result<LabelStyle, String> {
    match value {
        "letters" => Ok(LabelStyle::Letters),
        "indexed" => Ok(LabelStyle::Indexed),
        other => Err(format!("unknown label style '{other}'")),
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }
}

fn read_source(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|err| format!("cannot read {path}: {err}")),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|err| format!("cannot read stdin: {err}"))?;
            Ok(buf)
        }
    }
}

/// Parse `n`, the `n + 1` dimensions, then every matrix row by row.
fn parse_chain(source: &str) -> Result<(ChainDims, Vec<Matrix>), String> {
    let mut tokens = source.split_whitespace().enumerate().map(|(pos, tok)| {
        tok.parse::<i64>()
            .map_err(|_| format!("token {} ('{tok}') is not an integer", pos + 1))
    });
    let mut next = |what: &str| -> Result<i64, String> {
        tokens
            .next()
            .unwrap_or_else(|| Err(format!("input ended while reading {what}")))
    };

    let n = next("the number of matrices")?;
    if n < 1 {
        return Err("number of matrices must be at least 1".to_string());
    }
    let n = n as usize;

    let mut p = Vec::new();
    for i in 0..=n {
        let d = next(&format!("dimension p[{i}]"))?;
        if d < 1 {
            return Err(format!("dimension p[{i}] must be positive, got {d}"));
        }
        let d = usize::try_from(d).map_err(|_| format!("dimension p[{i}] is too large"))?;
        p.push(d);
    }
    let dims = ChainDims::new(p).map_err(|err| err.to_string())?;

    let mut matrices = Vec::new();
    for m in 0..n {
        let (rows, cols) = dims.shape(m);
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| format!("matrix {} ({rows}x{cols}) is too large", m + 1))?;
        let mut data = Vec::new();
        for _ in 0..len {
            data.push(next(&format!("matrix {} ({rows}x{cols})", m + 1))?);
        }
        matrices.push(Matrix::from_vec(rows, cols, data).map_err(|err| err.to_string())?);
    }
    if tokens.next().is_some() {
        eprintln!("chain_mult: ignoring trailing input");
    }
    Ok((dims, matrices))
}

fn verify(solution: &Solution, matrices: &[Matrix]) -> bool {
    match (&solution.product, multiply_left_to_right(matrices)) {
        (Ok(optimal), Ok(naive)) => *optimal == naive,
        (Err(_), Err(_)) => true,
        _ => false,
    }
}

fn write_text<W: Write>(out: &mut W, solution: &Solution, verified: Option<bool>) -> io::Result<()> {
    writeln!(out, "Minimum number of multiplications is: {}", solution.min_cost)?;
    writeln!(out, "Optimal parenthesization is: {}", solution.parenthesization)?;
    if let Ok(product) = &solution.product {
        writeln!(out, "Resultant matrix is:")?;
        writeln!(out, "{product}")?;
    }
    if let Some(ok) = verified {
        writeln!(
            out,
            "Left-to-right check: {} (left-to-right cost {})",
            if ok { "passed" } else { "failed" },
            solution.naive_cost
        )?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, solution: &Solution, verified: Option<bool>) -> io::Result<()> {
    let product = match &solution.product {
        Ok(m) => {
            let rows: Vec<String> = m
                .iter_rows()
                .map(|row| {
                    let cells: Vec<String> = row.iter().map(i64::to_string).collect();
                    format!("[{}]", cells.join(","))
                })
                .collect();
            format!("[{}]", rows.join(","))
        }
        Err(_) => "null".to_string(),
    };
    let error = match &solution.product {
        Ok(_) => "null".to_string(),
        Err(err) => format!("\"{}\"", err.to_string().replace('"', "'")),
    };
    let verified = match verified {
        Some(ok) => ok.to_string(),
        None => "null".to_string(),
    };
    writeln!(
        out,
        "{{\"min_cost\":{},\"naive_cost\":{},\"parenthesization\":\"{}\",\"product\":{},\"error\":{},\"verified\":{}}}",
        solution.min_cost, solution.naive_cost, solution.parenthesization, product, error, verified
    )
}
