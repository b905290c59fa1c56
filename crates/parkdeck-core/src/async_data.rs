//! Four-state container for data fetched asynchronously.
//!
//! Replaces the usual `Option<T>`-plus-loading-flag tangle with one closed
//! sum type: a value is either never requested, in flight (possibly carrying
//! the previous result), ready, or failed. Consumers extract values through
//! [`AsyncData::fold`], so "not ready" and "errored" are always handled.

// ─── AsyncData ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncData<T, E> {
    /// No fetch has ever been attempted.
    Empty,
    /// A fetch is in flight. `previous` carries the last successful value
    /// for stale-while-refreshing presentations; `delayed` flips once the
    /// fetch has been outstanding past the caller's threshold.
    Pending { previous: Option<T>, delayed: bool },
    /// The last fetch succeeded.
    Ready(T),
    /// The last fetch failed. No previous value is retained.
    Failed(E),
}

// Hand-written so `T`/`E` need not be `Default` themselves.
impl<T, E> Default for AsyncData<T, E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T, E> AsyncData<T, E> {
    /// Mark a fetch as started, optionally carrying the previous value.
    /// `delayed` starts false.
    pub fn pending(previous: Option<T>) -> Self {
        Self::Pending {
            previous,
            delayed: false,
        }
    }

    /// Flag an in-flight fetch as slow. No-op on any other variant;
    /// `previous` is preserved.
    pub fn mark_delayed(&mut self) {
        if let Self::Pending { delayed, .. } = self {
            *delayed = true;
        }
    }

    // ── Transformation ───────────────────────────────────────────────

    /// Structure-preserving transform: applies `f` to the carried value in
    /// `Pending.previous` (if present) and in `Ready`; `Empty` and `Failed`
    /// pass through unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncData<U, E> {
        match self {
            Self::Empty => AsyncData::Empty,
            Self::Pending { previous, delayed } => AsyncData::Pending {
                previous: previous.map(f),
                delayed,
            },
            Self::Ready(value) => AsyncData::Ready(f(value)),
            Self::Failed(error) => AsyncData::Failed(error),
        }
    }

    /// Total pattern match, and the sanctioned way to extract a value.
    pub fn fold<R>(
        self,
        on_empty: impl FnOnce() -> R,
        on_pending: impl FnOnce(Option<T>, bool) -> R,
        on_ready: impl FnOnce(T) -> R,
        on_failed: impl FnOnce(E) -> R,
    ) -> R {
        match self {
            Self::Empty => on_empty(),
            Self::Pending { previous, delayed } => on_pending(previous, delayed),
            Self::Ready(value) => on_ready(value),
            Self::Failed(error) => on_failed(error),
        }
    }

    /// Borrowing view, so `fold`/`map` can run without consuming `self`.
    pub fn as_ref(&self) -> AsyncData<&T, &E> {
        match self {
            Self::Empty => AsyncData::Empty,
            Self::Pending { previous, delayed } => AsyncData::Pending {
                previous: previous.as_ref(),
                delayed: *delayed,
            },
            Self::Ready(value) => AsyncData::Ready(value),
            Self::Failed(error) => AsyncData::Failed(error),
        }
    }

    // ── Extraction ───────────────────────────────────────────────────

    /// The carried value, if any: the `Ready` value or `Pending.previous`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending {
                previous: Some(value),
                ..
            } => Some(value),
            _ => None,
        }
    }

    /// Consume the container, keeping only the carried value.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending { previous, .. } => previous,
            _ => None,
        }
    }

    /// Remove and return the carried value, leaving `Empty` behind.
    pub fn take_value(&mut self) -> Option<T> {
        std::mem::take(self).into_value()
    }

    // ── Predicates ───────────────────────────────────────────────────

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// True only for a `Pending` fetch past the delayed threshold.
    pub fn is_delayed(&self) -> bool {
        matches!(self, Self::Pending { delayed: true, .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    type Data = AsyncData<i32, String>;

    #[test]
    fn empty_folds_to_empty_branch_only() {
        let out = Data::Empty.fold(
            || "empty",
            |_, _| "pending",
            |_| "ready",
            |_| "failed",
        );
        assert_eq!(out, "empty");
    }

    #[test]
    fn pending_starts_undelayed() {
        let d = Data::pending(Some(7));
        assert!(d.is_pending());
        assert!(!d.is_delayed());
        assert_eq!(d.value(), Some(&7));
    }

    #[test]
    fn mark_delayed_preserves_previous() {
        let mut d = Data::pending(Some(7));
        d.mark_delayed();
        assert!(d.is_delayed());
        assert_eq!(d.value(), Some(&7));
    }

    #[test]
    fn mark_delayed_is_noop_outside_pending() {
        let mut ready = Data::Ready(1);
        ready.mark_delayed();
        assert_eq!(ready, Data::Ready(1));

        let mut empty = Data::Empty;
        empty.mark_delayed();
        assert_eq!(empty, Data::Empty);
    }

    #[test]
    fn map_identity() {
        let cases = [
            Data::Empty,
            Data::pending(Some(3)),
            Data::Ready(5),
            Data::Failed("boom".to_string()),
        ];
        for c in cases {
            assert_eq!(c.clone().map(|x| x), c);
        }
    }

    #[test]
    fn map_composition() {
        let f = |x: i32| x + 1;
        let g = |x: i32| x * 2;
        for c in [Data::Ready(5), Data::pending(Some(3))] {
            assert_eq!(c.clone().map(f).map(g), c.map(|x| g(f(x))));
        }
    }

    #[test]
    fn map_passes_failed_through() {
        let d = Data::Failed("boom".to_string()).map(|x| x + 1);
        assert_eq!(d, AsyncData::Failed("boom".to_string()));
    }

    #[test]
    fn differing_variants_never_equal() {
        assert_ne!(Data::Empty, Data::pending(None));
        assert_ne!(Data::Ready(1), Data::pending(Some(1)));
        assert_ne!(Data::Ready(1), Data::Failed("1".to_string()));
    }

    #[test]
    fn delayed_distinguishes_pending_states() {
        let mut delayed = Data::pending(None);
        delayed.mark_delayed();
        assert_ne!(delayed, Data::pending(None));
    }

    #[test]
    fn value_ignores_empty_and_failed() {
        assert_eq!(Data::Empty.value(), None);
        assert_eq!(Data::Failed("e".to_string()).value(), None);
        assert_eq!(Data::pending(None).value(), None);
    }

    #[test]
    fn take_value_leaves_empty() {
        let mut d = Data::Ready(9);
        assert_eq!(d.take_value(), Some(9));
        assert!(d.is_empty());

        let mut failed = Data::Failed("e".to_string());
        assert_eq!(failed.take_value(), None);
        assert!(failed.is_empty());
    }
}
