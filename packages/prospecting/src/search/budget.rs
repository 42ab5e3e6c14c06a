//! The shared search budget for one pipeline run.

use std::sync::atomic::{AtomicU32, Ordering};

/// Monotonically-decreasing counter of remaining search calls.
///
/// One budget is shared by every phase of a run; each external search
/// call consumes exactly one unit. Execution is sequential, so the
/// atomics are only for `Send + Sync` plumbing — there is no contention
/// to resolve, just decrement-and-check before each call.
#[derive(Debug)]
pub struct RunBudget {
    limit: u32,
    spent: AtomicU32,
}

impl RunBudget {
    /// Create a budget allowing `limit` search calls.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            spent: AtomicU32::new(0),
        }
    }

    /// Consume one unit. Returns `false` when the budget is exhausted,
    /// leaving the count untouched.
    pub fn try_consume(&self) -> bool {
        let spent = self.spent.load(Ordering::Relaxed);
        if spent >= self.limit {
            return false;
        }
        self.spent.store(spent + 1, Ordering::Relaxed);
        true
    }

    /// Whether no units remain.
    pub fn is_exhausted(&self) -> bool {
        self.spent.load(Ordering::Relaxed) >= self.limit
    }

    /// Units consumed so far.
    pub fn spent(&self) -> u32 {
        self.spent.load(Ordering::Relaxed)
    }

    /// Units remaining.
    pub fn remaining(&self) -> u32 {
        self.limit - self.spent().min(self.limit)
    }

    /// The configured limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumes_up_to_limit() {
        let budget = RunBudget::new(2);
        assert!(budget.try_consume());
        assert!(budget.try_consume());
        assert!(!budget.try_consume());
        assert_eq!(budget.spent(), 2);
        assert_eq!(budget.remaining(), 0);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn zero_budget_is_exhausted_from_the_start() {
        let budget = RunBudget::new(0);
        assert!(budget.is_exhausted());
        assert!(!budget.try_consume());
    }
}
