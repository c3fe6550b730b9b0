use microxdg::{Xdg, XdgError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use solgen::generate;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HISTFILE: &'static str = "solgen.history";

fn main() -> rustyline::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut rl = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        rl.load_history(path).ok();
    }

    println!("Enter a seed to generate its test program.");
    loop {
        let readline = rl.readline("seed> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line.parse::<u64>() {
                    Ok(seed) => {
                        rl.add_history_entry(line)?;
                        match generate(seed) {
                            Ok(program) => println!("{program}"),
                            Err(err) => println!("Generation failed: {err}"),
                        }
                    }
                    Err(err) => println!("Invalid seed `{line}`: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Ctrl-C pressed. Exiting.");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("Ctrl-D pressed. Exiting.");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Err(err) = rl.save_history(path) {
            warn!(path = %path.display(), %err, "could not save history");
        }
    }

    Ok(())
}

fn history_path() -> Option<PathBuf> {
    let mut state = match get_xdg_state_dir() {
        Ok(state) => state,
        Err(err) => {
            debug!(?err, "no XDG state directory");
            return None;
        }
    };
    state.push("solgen");
    fs::create_dir_all(&state).ok()?;
    state.push(HISTFILE);
    Some(state)
}

fn get_xdg_state_dir() -> Result<PathBuf, XdgError> {
    let xdg = Xdg::new()?;
    let state_dir = xdg.state()?;
    Ok(state_dir)
}
