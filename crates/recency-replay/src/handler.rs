//! Command handler for trace replay

use std::fmt;
use recency::{CacheStats, LruCache};

use crate::command::Command;

/// Outcome of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print
    Silent,
    /// A cached value
    Value(String),
    /// The key is not cached
    Miss,
    /// A count
    Integer(usize),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Silent => Ok(()),
            Reply::Value(value) => write!(f, "{}", value),
            Reply::Miss => write!(f, "miss"),
            Reply::Integer(n) => write!(f, "{}", n),
        }
    }
}

pub struct CommandHandler {
    cache: LruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: LruCache<String, String>) -> Self {
        Self { cache }
    }

    pub fn handle(&mut self, cmd: Command) -> Reply {
        match cmd {
            Command::Get(key) => Self::value_reply(self.cache.get(&key)),
            Command::Peek(key) => Self::value_reply(self.cache.peek(&key)),
            Command::Put(key, value) => {
                self.cache.put(key, value);
                Reply::Silent
            }
            Command::Del(key) => Reply::Integer(usize::from(self.cache.remove(&key).is_some())),
            Command::Len => Reply::Integer(self.cache.len()),
        }
    }

    pub fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    fn value_reply(value: Option<&String>) -> Reply {
        match value {
            Some(value) => Reply::Value(value.clone()),
            None => Reply::Miss,
        }
    }
}
