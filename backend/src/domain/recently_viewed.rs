//! Per-user "recently viewed" articles held in process memory.
//!
//! The tracker keeps, for each user, up to [`RECENTLY_VIEWED_CAPACITY`]
//! distinct article ids ordered most-recent-first. State is volatile and
//! resets on restart.
//!
//! One mutex guards the whole map. Each call holds it only for the
//! read-modify-write of a single user's list, and never across I/O. A
//! poisoned lock is recovered: every mutation leaves the list well formed
//! before it can panic.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ArticleId, UserId};

/// Maximum number of ids remembered per user.
pub const RECENTLY_VIEWED_CAPACITY: usize = 5;

type ViewMap = HashMap<UserId, VecDeque<ArticleId>>;

/// Bounded most-recently-used list of article views per user.
///
/// # Examples
/// ```
/// use content_api::domain::{ArticleId, RecentlyViewedTracker, UserId};
///
/// let tracker = RecentlyViewedTracker::new();
/// let user = UserId::random();
/// tracker.record_view(&user, ArticleId::new(1));
/// tracker.record_view(&user, ArticleId::new(2));
/// tracker.record_view(&user, ArticleId::new(1));
/// assert_eq!(tracker.recent(&user), vec![ArticleId::new(1), ArticleId::new(2)]);
/// ```
#[derive(Debug, Default)]
pub struct RecentlyViewedTracker {
    views: Mutex<ViewMap>,
}

impl RecentlyViewedTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ViewMap> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move `article_id` to the front of `user_id`'s list, dropping any
    /// earlier occurrence and anything past the capacity.
    pub fn record_view(&self, user_id: &UserId, article_id: ArticleId) {
        let mut views = self.lock();
        let list = views.entry(*user_id).or_default();
        list.retain(|existing| *existing != article_id);
        list.push_front(article_id);
        list.truncate(RECENTLY_VIEWED_CAPACITY);
    }

    /// Snapshot of `user_id`'s list, most recent first.
    #[must_use]
    pub fn recent(&self, user_id: &UserId) -> Vec<ArticleId> {
        self.lock()
            .get(user_id)
            .map(|list| list.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    //! Ordering, bounds and concurrency of the tracker.
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tracker() -> RecentlyViewedTracker {
        RecentlyViewedTracker::new()
    }

    fn ids(raw: &[i64]) -> Vec<ArticleId> {
        raw.iter().copied().map(ArticleId::new).collect()
    }

    #[rstest]
    fn unknown_user_has_empty_list(tracker: RecentlyViewedTracker) {
        assert!(tracker.recent(&UserId::random()).is_empty());
    }

    #[rstest]
    fn most_recent_view_comes_first(tracker: RecentlyViewedTracker) {
        let user = UserId::random();
        for id in [1, 2, 3] {
            tracker.record_view(&user, ArticleId::new(id));
        }
        assert_eq!(tracker.recent(&user), ids(&[3, 2, 1]));
    }

    #[rstest]
    fn repeat_view_moves_to_front_without_duplicating(tracker: RecentlyViewedTracker) {
        let user = UserId::random();
        for id in [1, 2, 3, 2] {
            tracker.record_view(&user, ArticleId::new(id));
        }
        assert_eq!(tracker.recent(&user), ids(&[2, 3, 1]));
    }

    #[rstest]
    fn six_distinct_views_keep_newest_five(tracker: RecentlyViewedTracker) {
        let user = UserId::random();
        for id in 1..=6 {
            tracker.record_view(&user, ArticleId::new(id));
        }
        assert_eq!(tracker.recent(&user), ids(&[6, 5, 4, 3, 2]));
    }

    #[rstest]
    fn users_are_isolated(tracker: RecentlyViewedTracker) {
        let alice = UserId::random();
        let bob = UserId::random();
        tracker.record_view(&alice, ArticleId::new(1));
        tracker.record_view(&bob, ArticleId::new(2));
        assert_eq!(tracker.recent(&alice), ids(&[1]));
        assert_eq!(tracker.recent(&bob), ids(&[2]));
    }

    #[rstest]
    fn snapshot_is_detached_from_later_views(tracker: RecentlyViewedTracker) {
        let user = UserId::random();
        tracker.record_view(&user, ArticleId::new(1));
        let snapshot = tracker.recent(&user);
        tracker.record_view(&user, ArticleId::new(2));
        assert_eq!(snapshot, ids(&[1]));
    }

    #[rstest]
    fn concurrent_views_leave_a_valid_list() {
        let tracker = Arc::new(RecentlyViewedTracker::new());
        let user = UserId::random();

        std::thread::scope(|scope| {
            for worker in 0..8_i64 {
                let tracker = Arc::clone(&tracker);
                scope.spawn(move || {
                    for step in 0..50_i64 {
                        tracker.record_view(&user, ArticleId::new((worker * 7 + step) % 12));
                    }
                });
            }
        });

        let recent = tracker.recent(&user);
        assert_eq!(recent.len(), RECENTLY_VIEWED_CAPACITY);
        let distinct: HashSet<_> = recent.iter().copied().collect();
        assert_eq!(distinct.len(), recent.len(), "no duplicates: {recent:?}");
    }

    #[rstest]
    fn recovers_from_poisoned_lock(tracker: RecentlyViewedTracker) {
        let user = UserId::random();
        tracker.record_view(&user, ArticleId::new(1));

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = tracker.views.lock().expect("first lock");
            panic!("poison the tracker");
        }));
        assert!(poisoned.is_err());

        tracker.record_view(&user, ArticleId::new(2));
        assert_eq!(tracker.recent(&user), ids(&[2, 1]));
    }
}
