//! Document identifiers
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hex characters:
//! a 4-byte big-endian unix timestamp, 5 random bytes fixed per process,
//! and a 3-byte counter. Ids generated later in a process sort after
//! earlier ones.

use std::{
    fmt,
    str::FromStr,
    sync::{
        atomic::{AtomicU32, Ordering},
        OnceLock,
    },
};

use chrono::Utc;
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const LEN: usize = 12;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; LEN]);

/// Error returned when a string is not a well-formed ObjectId
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid object id")]
pub struct ParseObjectIdError(pub String);

impl ObjectId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        let timestamp = Utc::now().timestamp() as u32;
        let process = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen());
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..0x00ff_ffff)))
            .fetch_add(1, Ordering::Relaxed)
            & 0x00ff_ffff;

        let mut bytes = [0u8; LEN];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Seconds since the unix epoch embedded in the identifier
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Check whether a string is a well-formed identifier
    pub fn is_valid(s: &str) -> bool {
        s.parse::<ObjectId>().is_ok()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != LEN * 2 {
            return Err(ParseObjectIdError(s.to_string()));
        }
        let mut bytes = [0u8; LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseObjectIdError(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
