//! Trace replay loop

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::command::Command;
use crate::handler::{CommandHandler, Reply};

/// Open a trace file, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open trace {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Run every command in `input`, writing one line per non-silent reply
///
/// Returns the number of commands executed.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    handler: &mut CommandHandler,
) -> Result<u64> {
    let mut executed = 0;

    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => return Err(anyhow!("line {}: {}", number + 1, e)),
        };

        debug!(line = number + 1, ?cmd, "replaying");
        let reply = handler.handle(cmd);
        if reply != Reply::Silent {
            writeln!(output, "{}", reply)?;
        }
        executed += 1;
    }

    output.flush()?;
    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recency::LruCache;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn replay(capacity: usize, trace: &str) -> Result<String> {
        let mut handler = CommandHandler::new(LruCache::new(capacity).unwrap());
        let mut out = Vec::new();
        run(Cursor::new(trace), &mut out, &mut handler)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_replay_capacity_two_trace() {
        let trace = "\
# capacity 2
put 1 1
put 2 2
get 1
put 3 3
get 2
put 4 4
get 1
get 3
get 4
";
        assert_eq!(replay(2, trace).unwrap(), "1\nmiss\nmiss\n3\n4\n");
    }

    #[test]
    fn test_replay_reports_bad_line() {
        let err = replay(2, "put a 1\n\nfrobnicate\n").unwrap_err();
        assert_eq!(err.to_string(), "line 3: unknown command 'frobnicate'");
    }

    #[test]
    fn test_replay_counts_commands() {
        let mut handler = CommandHandler::new(LruCache::new(4).unwrap());
        let executed = run(Cursor::new("put a 1\n# skip\nget a\nlen\n"), io::sink(), &mut handler)
            .unwrap();

        assert_eq!(executed, 3);
        assert_eq!(handler.stats().hits(), 1);
    }

    #[test]
    fn test_open_input_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "put k v").unwrap();
        writeln!(file, "get k").unwrap();

        let input = open_input(Some(file.path())).unwrap();
        let mut handler = CommandHandler::new(LruCache::new(1).unwrap());
        let mut out = Vec::new();
        run(input, &mut out, &mut handler).unwrap();

        assert_eq!(out, b"v\n");
    }

    #[test]
    fn test_open_input_defaults_to_stdin() {
        assert!(open_input(None).is_ok());
    }

    #[test]
    fn test_open_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.trace");

        assert!(open_input(Some(&missing)).is_err());
    }
}
