use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Prefix of every todo key inside the store.
pub const KEY_PREFIX: &str = "todo:";

const LEN: usize = 12;

/// Storage-assigned identifier of a todo.
///
/// Twelve bytes: creation time in seconds (big-endian `u32`) followed by the
/// store's monotonic counter (big-endian `u64`). Rendered as 24 lowercase hex
/// characters, so keys sort roughly by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId([u8; LEN]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid todo id {0:?}")]
pub struct InvalidTodoId(String);

impl TodoId {
    pub fn new(seconds: u32, counter: u64) -> Self {
        let mut bytes = [0u8; LEN];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&counter.to_be_bytes());
        Self(bytes)
    }

    /// Stamps `counter` with the current wall-clock second.
    pub fn generate(counter: u64) -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(epoch_seconds)
            .unwrap_or_default();
        Self::new(seconds, counter)
    }

    pub fn storage_key(&self) -> String {
        format!("{KEY_PREFIX}{self}")
    }

    pub fn from_storage_key(key: &str) -> Result<Self, InvalidTodoId> {
        key.strip_prefix(KEY_PREFIX)
            .ok_or_else(|| InvalidTodoId(key.to_string()))?
            .parse()
    }
}

/// Saturates at `u32::MAX` instead of wrapping, so ids never sort before
/// older ones.
fn epoch_seconds(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX)
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTodoId(s.to_string());
        // also rules out multi-byte chars, so the byte slicing below is safe
        if s.len() != LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let mut bytes = [0u8; LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
