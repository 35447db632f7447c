use std::{collections::HashMap, env, fs::read_to_string, process, time::Instant};

use climb::{
    ast::ast::Integer,
    errors::errors::{Error, ErrorTip},
    evaluator::evaluator::evaluate_statement,
    get_line_at_position,
    grammar::{
        builtin::{calculator_grammar, lambda_grammar},
        grammar::Grammar,
    },
    parser::parser::parse,
};
use log::info;

enum Mode {
    Calc,
    Lambda,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mode = match args.get(1).map(String::as_str) {
        Some("calc") if args.len() == 3 => Mode::Calc,
        Some("lambda") if args.len() == 3 => Mode::Lambda,
        _ => {
            eprintln!("usage: climb <calc|lambda> <file>");
            process::exit(2);
        }
    };

    let file_path: &str = &args[2];
    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path, err);
            process::exit(2);
        }
    };

    let start = Instant::now();
    let grammar = match mode {
        Mode::Calc => calculator_grammar(),
        Mode::Lambda => lambda_grammar(),
    };
    info!("Built grammar in {:?}", start.elapsed());

    let env: HashMap<String, Integer> = HashMap::new();
    let mut failures = 0;

    for (index, line) in file_contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let parse_start = Instant::now();
        let result = run_line(&mode, line, &grammar, &env);
        info!("Line {} handled in {:?}", index + 1, parse_start.elapsed());

        match result {
            Ok(output) => println!("{}", output),
            Err(error) => {
                display_error(&error, file_path, index + 1, line);
                failures += 1;
            }
        }
    }

    info!("Total time: {:?}", start.elapsed());

    if failures > 0 {
        process::exit(1);
    }
}

fn run_line(
    mode: &Mode,
    line: &str,
    grammar: &Grammar,
    env: &HashMap<String, Integer>,
) -> Result<String, Error> {
    let statement = parse(line, grammar)?;

    match mode {
        Mode::Calc => {
            let values = evaluate_statement(&statement, env)?;
            Ok(values
                .iter()
                .map(Integer::to_string)
                .collect::<Vec<_>>()
                .join("; "))
        }
        Mode::Lambda => Ok(statement.to_string()),
    }
}

fn display_error(error: &Error, file: &str, line: usize, line_source: &str) {
    /*
        error: message
        -> input.calc
           |
        20 | 2 + * 3
           | ----^
    */

    let (_, line_text, line_pos) = get_line_at_position(line_source, error.get_span().offset);

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    if let Some(expected) = error.get_expected() {
        eprintln!("   expected {}", expected);
    }
    eprintln!("-> {}", file);
    eprintln!("{:>padding$}", "|");

    if !error.is_parse_error() {
        eprintln!("{} | {}", line_str, line_text.trim());
        return;
    }

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
