//! Trace command parser
//!
//! One command per line, whitespace separated:
//!
//! ```text
//! # comment
//! put <key> <value>
//! get <key>
//! peek <key>
//! del <key>
//! len
//! ```

/// A parsed trace command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a key, promoting it on hit
    Get(String),
    /// Insert or overwrite a key
    Put(String, String),
    /// Read a key without promoting it
    Peek(String),
    /// Remove a key
    Del(String),
    /// Report the number of cached entries
    Len,
}

impl Command {
    /// Parse one trace line
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        let cmd = match (name.as_str(), args.as_slice()) {
            ("get", [key]) => Command::Get(key.to_string()),
            ("put", [key, value]) => Command::Put(key.to_string(), value.to_string()),
            ("peek", [key]) => Command::Peek(key.to_string()),
            ("del", [key]) => Command::Del(key.to_string()),
            ("len", []) => Command::Len,
            ("get" | "put" | "peek" | "del" | "len", _) => {
                return Err(format!("wrong number of arguments for '{}'", name));
            }
            _ => return Err(format!("unknown command '{}'", name)),
        };

        Ok(Some(cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("get a"), Ok(Some(Command::Get("a".into()))));
        assert_eq!(
            Command::parse("  PUT a 1 "),
            Ok(Some(Command::Put("a".into(), "1".into())))
        );
        assert_eq!(Command::parse("peek a"), Ok(Some(Command::Peek("a".into()))));
        assert_eq!(Command::parse("del a"), Ok(Some(Command::Del("a".into()))));
        assert_eq!(Command::parse("len"), Ok(Some(Command::Len)));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("# put a 1"), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("put a"),
            Err("wrong number of arguments for 'put'".to_string())
        );
        assert_eq!(
            Command::parse("len 3"),
            Err("wrong number of arguments for 'len'".to_string())
        );
        assert_eq!(
            Command::parse("flush"),
            Err("unknown command 'flush'".to_string())
        );
    }
}
