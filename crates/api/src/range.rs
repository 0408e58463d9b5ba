use std::collections::BTreeMap;

use crate::errors::LightClientApiError;

/// A validated `updates` request: `count` periods starting at `start_period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    pub start_period: u64,
    pub count: u64,
}

impl PeriodRange {
    /// Rejects an empty request and silently clamps `count` to `max_request_updates`.
    pub fn new(
        start_period: u64,
        count: u64,
        max_request_updates: u64,
    ) -> Result<Self, LightClientApiError> {
        if count == 0 {
            return Err(LightClientApiError::BadRequest(format!(
                "Got invalid 'count' query variable '{count}': count must be greater than 0"
            )));
        }
        Ok(Self {
            start_period,
            count: count.min(max_request_updates.max(1)),
        })
    }

    /// Last period of the range, inclusive.
    pub fn end_period(&self) -> u64 {
        self.start_period.saturating_add(self.count - 1)
    }
}

/// Longest run of consecutive periods starting at `start_period` present in `updates`.
///
/// The first missing period ends the run; later periods are never included.
pub fn assemble_contiguous_range<T>(
    mut updates: BTreeMap<u64, T>,
    start_period: u64,
    count: u64,
) -> Vec<T> {
    let mut result = Vec::with_capacity(updates.len());
    for offset in 0..count {
        let Some(period) = start_period.checked_add(offset) else {
            break;
        };
        match updates.remove(&period) {
            Some(update) => result.push(update),
            None => break,
        }
    }
    result
}
