/*
 * ==========================================================================
 * ESNAMES - IdentifierName is not Identifier
 * ==========================================================================
 *
 * Command-line entry point.
 *
 *   esnames script.js               run a script
 *   esnames --strict script.js      run it as strict mode code
 *   esnames --tokens script.js      dump the token stream as JSON
 *   esnames --parse-only script.js  stop after parsing
 *   esnames --classify in foo let   classify words without a script
 *
 * Exit codes follow sysexits: 65 for syntax errors, 66 for unreadable
 * input, 70 for uncaught runtime errors.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the ESNAMES project.
 *
 * ESNAMES is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, LevelFilter};

use esnames::diagnostics::DiagnosticPrinter;
use esnames::lexer::keywords::reserved_word_kind;
use esnames::{classify, is_valid_as_identifier, parse_source, tokenize, Interpreter, NamePosition, Options, ScriptError};

const EXIT_DATAERR: u8 = 65;
const EXIT_NOINPUT: u8 = 66;
const EXIT_SOFTWARE: u8 = 70;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script to run
    #[arg(required_unless_present = "classify")]
    file: Option<PathBuf>,

    /// Treat the script as strict mode code
    #[arg(long)]
    strict: bool,

    /// Print the token stream as JSON instead of running
    #[arg(long, conflicts_with = "parse_only")]
    tokens: bool,

    /// Check syntax only
    #[arg(long)]
    parse_only: bool,

    /// Classify each word as a binding name and as a property name
    #[arg(long, num_args = 1.., value_name = "WORD", conflicts_with = "file")]
    classify: Option<Vec<String>>,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(words) = &cli.classify {
        classify_words(words);
        return ExitCode::SUCCESS;
    }

    let Some(path) = cli.file.as_ref() else {
        return ExitCode::from(EXIT_NOINPUT);
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!("cannot read {}: {}", path.display(), err);
            eprintln!("error: cannot read {}: {}", path.display(), err);
            return ExitCode::from(EXIT_NOINPUT);
        }
    };

    let printer = DiagnosticPrinter::new(path.display().to_string(), source.as_str());
    match run(&cli, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            printer.print(&err);
            if err.is_syntax_error() {
                ExitCode::from(EXIT_DATAERR)
            } else {
                ExitCode::from(EXIT_SOFTWARE)
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, source: &str) -> Result<(), ScriptError> {
    let options = Options {
        strict: cli.strict,
        echo: true,
    };

    if cli.tokens {
        let tokens = tokenize(source)?;
        match serde_json::to_string_pretty(&tokens) {
            Ok(json) => println!("{}", json),
            Err(err) => error!("token dump failed: {}", err),
        }
        return Ok(());
    }

    let program = parse_source(source, &options)?;
    if cli.parse_only {
        debug!("parse only, {} statement(s)", program.body.len());
        println!("ok");
        return Ok(());
    }

    Interpreter::new(&options).run(&program)?;
    Ok(())
}

fn classify_words(words: &[String]) {
    for word in words {
        let category = match reserved_word_kind(word) {
            Some(kind) => format!("{:?}", kind),
            None => "Identifier".to_string(),
        };

        println!(
            "{:<12} {:<15} reserved={:<5} binding={:<5} property={}",
            word,
            category,
            classify(word).is_reserved_word,
            is_valid_as_identifier(word, NamePosition::BindingIdentifier),
            is_valid_as_identifier(word, NamePosition::PropertyKeyOrMemberName),
        );
    }
}
