//! Interactive REPL implementation.

use crate::commands::{self, CommandResult};
use crate::completer::JetcatHelper;
use crate::executor;
use crate::formatter::{self, OutputFormat};
use jetcat::{CatalogEngine, SnapshotDriver};
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::{Config, Editor};
use std::path::{Path, PathBuf};

/// Get the history file path.
fn history_path() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jetcat")
        .join("history")
}

/// Run the interactive REPL.
pub fn run(
    mut engine: CatalogEngine<SnapshotDriver>,
    snapshot_path: &Path,
    initial_format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut format = initial_format;

    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();

    let mut rl: Editor<JetcatHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(JetcatHelper::new()));

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    println!(
        "jetcat - {} ({} rows). Type .help for commands, .exit to quit\n",
        snapshot_path.display(),
        engine.driver().snapshot().total_rows()
    );

    loop {
        match rl.readline("jetcat> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if commands::is_command(line) {
                    match commands::handle_command(line, format, engine.config().collation) {
                        CommandResult::Exit => {
                            println!("Goodbye!");
                            break;
                        }
                        CommandResult::Output(msg) => {
                            println!("{}", msg);
                        }
                        CommandResult::SetFormat(fmt) => {
                            format = fmt;
                            println!("Output format set to {}", format);
                        }
                        CommandResult::SetCollation(collation) => {
                            let config = engine.config().clone().with_collation(collation);
                            engine.set_config(config);
                            println!("Collation set to {}", commands::collation_name(collation));
                        }
                        CommandResult::ShowStats => {
                            let snapshot = engine.driver().snapshot();
                            println!("Snapshot: {}", snapshot_path.display());
                            println!("Kinds with rows: {}", snapshot.kinds().count());
                            println!("Total rows: {}", snapshot.total_rows());
                            println!("Fetches: {}", engine.fetch_count());
                        }
                        CommandResult::ShowHistory => {
                            let history = rl.history();
                            let len = history.len();
                            let start = len.saturating_sub(20);
                            for (i, entry) in history.iter().skip(start).enumerate() {
                                println!("{:4}  {}", start + i + 1, entry);
                            }
                        }
                        CommandResult::Clear => {
                            // ANSI clear screen
                            print!("\x1B[2J\x1B[1;1H");
                        }
                    }
                    continue;
                }

                let formatter = formatter::create_formatter(format);
                match executor::execute(&mut engine, line, &*formatter) {
                    Ok(output) => println!("{}", output),
                    Err(e) => println!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(dir) = hist_path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let _ = rl.save_history(&hist_path);

    Ok(())
}
