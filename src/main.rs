use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;

use let_lang::{interpreter, parser, tokeniser};

/// Evaluate a program written in the LET expression language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the program. Prompted for on stdin when neither this nor --expr is given.
    file: Option<String>,

    /// Evaluate this program text instead of reading a file.
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// Print the token stream.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree in nested notation.
    #[arg(long)]
    tree: bool,

    /// Print the syntax tree as an indented outline.
    #[arg(long)]
    outline: bool,

    /// Print every evaluated node with its environment.
    #[arg(long)]
    trace: bool,
}

fn prompt_for_path() -> Result<String> {
    print!("Program file: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read a path from stdin")?;

    let path = line.trim();
    if path.is_empty() {
        bail!("Path to a program required.");
    }
    Ok(path.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let program_string = match args.expr {
        Some(source) => source,
        None => {
            let path = match args.file {
                Some(path) => path,
                None => prompt_for_path()?,
            };
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read program at {path}"))?
        }
    };

    let tokens = tokeniser::tokenise(&program_string);
    if args.tokens {
        for token in &tokens {
            println!("{token}");
        }
    }

    let expression = parser::parse(tokens)?;
    if args.tree {
        println!("{expression:#}");
    }
    if args.outline {
        print!("{}", expression.outline());
    }

    let result = if args.trace {
        let trace = interpreter::trace(&expression)?;
        print!("{trace}");
        trace.result.to_string()
    } else {
        interpreter::evaluate(&expression)?
    };

    println!("{result}");

    Ok(())
}
