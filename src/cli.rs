// Line-oriented console front end
use crate::config::Config;
use crate::session::Session;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TASKMATE_LOG";

/// Installs a stderr subscriber when `TASKMATE_LOG` holds a filter, e.g. `taskmate=debug`.
pub fn init_logging() {
    if let Ok(filter) = std::env::var(LOG_ENV) {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(io::stderr)
            .init();
    }
}

pub fn run() -> Result<()> {
    init_logging();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: {e:#}. Using default settings.");
            Config::default()
        }
    };
    let mut session = Session::open(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())
}

/// Drives `session` until an exit word or end of input.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<()> {
    if let Some(notice) = session.startup_notice() {
        writeln!(output, "{}", notice)?;
    }
    writeln!(output, "{}", session.greeting())?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let reply = session.respond(&line);
        writeln!(output, "{}", reply.text)?;
        output.flush()?;
        if reply.exit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stops_at_exit_word() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_file: dir.path().join("taskdata.txt"),
            greeting: None,
        };
        let mut session = Session::open(&config);
        let input = "todo buy milk\nbye\ntodo never read\n";
        let mut out = Vec::new();

        run_session(&mut session, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[T][ ] buy milk"));
        assert!(out.contains("See yall around"));
        assert!(!out.contains("never read"));
    }
}
