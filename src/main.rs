use std::{
    env,
    io::{self, prelude::*},
};

use huffman::fixed_width_bits;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: huffman [--packed] [--tree] [TEXT]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    /// Also print the packed form.
    packed: bool,

    /// Print the prefix tree to stderr.
    tree: bool,

    /// Input text; stdin if absent.
    text: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> io::Result<Options> {
    let mut options = Options::default();
    for arg in args {
        match arg.as_str() {
            "--packed" => options.packed = true,
            "--tree" => options.tree = true,
            flag if flag.starts_with("--") => {
                let msg = format!("unrecognized flag {flag}\n{USAGE}");
                return Err(io::Error::new(io::ErrorKind::InvalidInput, msg));
            }
            _ if options.text.is_some() => {
                let msg = format!("more than one TEXT argument\n{USAGE}");
                return Err(io::Error::new(io::ErrorKind::InvalidInput, msg));
            }
            text => options.text = Some(text.to_owned()),
        }
    }
    Ok(options)
}

/// Log to stderr, filtered by `HUFFMAN_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("HUFFMAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> io::Result<()> {
    init_tracing();
    let options = parse_args(env::args().skip(1))?;

    let input = match options.text {
        Some(text) => text.into_bytes(),
        None => {
            let mut buf = vec![];
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let encoded = huffman::compress(&input);
    info!(
        symbols = input.len(),
        fixed_width_bits = fixed_width_bits(input.len()),
        encoded_bits = encoded.bit_len(),
        "compressed"
    );

    let mut stderr = io::stderr().lock();
    writeln!(
        stderr,
        "{} symbols: {} bits fixed-width, {} bits encoded",
        input.len(),
        fixed_width_bits(input.len()),
        encoded.bit_len()
    )?;
    if options.tree {
        match encoded.tree() {
            Some(tree) => write!(stderr, "{tree}")?,
            None => writeln!(stderr, "(empty input, no tree)")?,
        }
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", encoded.bits())?;
    if options.packed {
        writeln!(stdout, "{}", encoded.pack()?.bits())?;
    }

    let mut decoded = Vec::with_capacity(input.len());
    io::copy(&mut huffman::decode_reader(&encoded), &mut decoded)?;
    if decoded != input {
        warn!(
            input_len = input.len(),
            decoded_len = decoded.len(),
            "round trip mismatch"
        );
        let msg = "decoded output differs from input";
        return Err(io::Error::new(io::ErrorKind::Other, msg));
    }
    stdout.write_all(&decoded)?;
    writeln!(stdout)?;

    Ok(())
}
