use crate::Snowflake;

/// Fields of a Snowflake id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeParts {
    /// Milliseconds since the generator's epoch
    pub timestamp: i64,
    pub node_id: u8,
    pub worker_id: u8,
    pub sequence: u16,
}

/// Snowflake component extractor
#[derive(Debug, Copy, Clone, Default)]
pub struct SnowflakeExtractor;

impl SnowflakeExtractor {
    /// Extract timestamp component from a Snowflake id
    #[inline(always)]
    pub fn timestamp(&self, id: i64) -> i64 {
        ((id as u64 >> Snowflake::TIMESTAMP_SHIFT) & Snowflake::MAX_TIMESTAMP as u64) as i64
    }

    /// Extract node component from a Snowflake id
    #[inline(always)]
    pub fn node(&self, id: i64) -> u8 {
        ((id as u64 >> Snowflake::NODE_SHIFT) & Snowflake::MAX_NODE_ID as u64) as u8
    }

    /// Extract worker component from a Snowflake id
    #[inline(always)]
    pub fn worker(&self, id: i64) -> u8 {
        ((id as u64 >> Snowflake::WORKER_SHIFT) & Snowflake::MAX_WORKER_ID as u64) as u8
    }

    /// Extract sequence component from a Snowflake id
    #[inline(always)]
    pub fn sequence(&self, id: i64) -> u16 {
        (id as u64 & Snowflake::MAX_SEQUENCE as u64) as u16
    }

    /// Decompose a Snowflake id into all of its components
    #[inline]
    pub fn decompose(&self, id: i64) -> SnowflakeParts {
        SnowflakeParts {
            timestamp: self.timestamp(id),
            node_id: self.node(id),
            worker_id: self.worker(id),
            sequence: self.sequence(id),
        }
    }

    /// Pack components into an id, truncating each to its field width
    #[inline]
    pub fn compose(&self, parts: SnowflakeParts) -> i64 {
        let ts = parts.timestamp as u64 & Snowflake::MAX_TIMESTAMP as u64;
        let node = parts.node_id as u64 & Snowflake::MAX_NODE_ID as u64;
        let worker = parts.worker_id as u64 & Snowflake::MAX_WORKER_ID as u64;
        let seq = parts.sequence as u64 & Snowflake::MAX_SEQUENCE as u64;
        ((ts << Snowflake::TIMESTAMP_SHIFT)
            | (node << Snowflake::NODE_SHIFT)
            | (worker << Snowflake::WORKER_SHIFT)
            | seq) as i64
    }
}
