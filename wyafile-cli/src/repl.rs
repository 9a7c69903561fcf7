use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::commands::{Command, Session};

/// One line typed at the prompt; the first word is the command name
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug)]
enum ReplCommand {
    #[command(flatten)]
    Run(Command),
    /// Exit the application
    #[command(visible_alias = "quit")]
    Exit,
}

/// Splits a line into words, lowercasing the command name
fn split_line(line: &str) -> Vec<String> {
    line.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect()
}

/// Reads commands from stdin until `exit`, `quit` or end of input
pub fn run(session: &Session) -> Result<()> {
    println!("Welcome to wyaFile Directory Scanner.");
    println!("Type 'help' for available commands or 'exit' to quit.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("wyafile> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let words = split_line(&line);
        if words.is_empty() {
            continue;
        }

        // Every line is parsed into a fresh request; nothing carries over.
        match ReplLine::try_parse_from(words) {
            Ok(ReplLine {
                command: ReplCommand::Exit,
            }) => break,
            Ok(ReplLine {
                command: ReplCommand::Run(command),
            }) => {
                if let Err(e) = command.execute(session) {
                    eprintln!("{} {:#}", "error:".red(), e);
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }

    println!("Exiting wyaFile. Goodbye!");
    Ok(())
}
