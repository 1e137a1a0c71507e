//! Topic table produced by stage 5 (§3, §4.6).

use serde::{Deserialize, Serialize};

/// Sentinel topic id for papers below `TOPIC_MIN_CORPUS` or classified as
/// noise by the clusterer (§4.6 "Gating").
pub const UNASSIGNED_TOPIC_ID: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub label: String,
    pub size: usize,
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_id_is_negative_one() {
        assert_eq!(UNASSIGNED_TOPIC_ID, -1);
    }
}
