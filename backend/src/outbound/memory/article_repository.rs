//! Mutex-guarded `ArticleRepository`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ArticlePersistenceError, ArticleRepository};
use crate::domain::{Article, ArticleDraft, ArticleId, ArticlePatch, UserId};

#[derive(Debug)]
struct Store {
    articles: BTreeMap<ArticleId, Article>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            articles: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    fn insert(&mut self, owner: &UserId, draft: &ArticleDraft) -> Article {
        let id = ArticleId::new(self.next_id);
        self.next_id += 1;
        let article = Article::new(
            id,
            *owner,
            draft.title().to_owned(),
            draft.content().to_owned(),
        );
        self.articles.insert(id, article.clone());
        article
    }

    fn owned_mut(&mut self, owner: &UserId, id: ArticleId) -> Option<&mut Article> {
        self.articles
            .get_mut(&id)
            .filter(|article| article.owner_id() == owner)
    }
}

/// In-memory [`ArticleRepository`] with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    store: Mutex<Store>,
}

impl InMemoryArticleRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_store<R>(&self, f: impl FnOnce(&mut Store) -> R) -> Result<R, ArticlePersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| ArticlePersistenceError::query("article store poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &ArticleDraft,
    ) -> Result<Article, ArticlePersistenceError> {
        self.with_store(|store| store.insert(owner, draft))
    }

    async fn create_many(
        &self,
        owner: &UserId,
        drafts: &[ArticleDraft],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        // One lock for the whole batch keeps it all-or-nothing.
        self.with_store(|store| {
            drafts
                .iter()
                .map(|draft| store.insert(owner, draft))
                .collect()
        })
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        self.with_store(|store| store.owned_mut(owner, id).map(|article| article.clone()))
    }

    async fn find_owned_many(
        &self,
        owner: &UserId,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        self.with_store(|store| {
            ids.iter()
                .filter_map(|id| store.owned_mut(owner, *id).map(|article| article.clone()))
                .collect()
        })
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        self.with_store(|store| {
            store.owned_mut(owner, id).map(|article| {
                *article = article.clone().patched(patch);
                article.clone()
            })
        })
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: ArticleId,
    ) -> Result<bool, ArticlePersistenceError> {
        self.with_store(|store| {
            if store.owned_mut(owner, id).is_none() {
                return false;
            }
            store.articles.remove(&id).is_some()
        })
    }

    async fn list_owned(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<Article>, ArticlePersistenceError> {
        self.with_store(|store| {
            let owned: Vec<Article> = store
                .articles
                .values()
                .rev()
                .filter(|article| article.owner_id() == owner)
                .cloned()
                .collect();
            Page::from_slice(&owned, request)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Ownership scoping, id assignment and paging order.
    use super::*;
    use rstest::{fixture, rstest};

    fn draft(title: &str) -> ArticleDraft {
        ArticleDraft::try_from_parts(Some(title.to_owned()), Some("body".to_owned()))
            .expect("valid draft")
    }

    #[fixture]
    fn repo() -> InMemoryArticleRepository {
        InMemoryArticleRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_sequential_across_single_and_batch_inserts(repo: InMemoryArticleRepository) {
        let owner = UserId::random();
        let first = repo.create(&owner, &draft("one")).await.expect("create");
        let batch = repo
            .create_many(&owner, &[draft("two"), draft("three")])
            .await
            .expect("create many");

        assert_eq!(first.id(), ArticleId::new(1));
        let ids: Vec<_> = batch.iter().map(Article::id).collect();
        assert_eq!(ids, vec![ArticleId::new(2), ArticleId::new(3)]);
    }

    #[rstest]
    #[tokio::test]
    async fn other_owners_cannot_see_or_touch_articles(repo: InMemoryArticleRepository) {
        let alice = UserId::random();
        let bob = UserId::random();
        let article = repo.create(&alice, &draft("mine")).await.expect("create");
        let patch = ArticlePatch::try_new(Some("stolen".to_owned()), None).expect("patch");

        assert_eq!(repo.find_owned(&bob, article.id()).await.expect("find"), None);
        assert_eq!(
            repo.update_owned(&bob, article.id(), &patch).await.expect("update"),
            None
        );
        assert!(!repo.delete_owned(&bob, article.id()).await.expect("delete"));
        assert_eq!(
            repo.find_owned(&alice, article.id()).await.expect("find"),
            Some(article)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_only_supplied_fields(repo: InMemoryArticleRepository) {
        let owner = UserId::random();
        let article = repo.create(&owner, &draft("before")).await.expect("create");
        let patch = ArticlePatch::try_new(Some("after".to_owned()), None).expect("patch");

        let updated = repo
            .update_owned(&owner, article.id(), &patch)
            .await
            .expect("update")
            .expect("article exists");
        assert_eq!(updated.title(), "after");
        assert_eq!(updated.content(), "body");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_article(repo: InMemoryArticleRepository) {
        let owner = UserId::random();
        let article = repo.create(&owner, &draft("gone")).await.expect("create");

        assert!(repo.delete_owned(&owner, article.id()).await.expect("delete"));
        assert_eq!(repo.find_owned(&owner, article.id()).await.expect("find"), None);
        assert!(!repo.delete_owned(&owner, article.id()).await.expect("second delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_newest_first_and_counts_only_owned(repo: InMemoryArticleRepository) {
        let owner = UserId::random();
        let other = UserId::random();
        for title in ["a", "b", "c"] {
            repo.create(&owner, &draft(title)).await.expect("create");
        }
        repo.create(&other, &draft("x")).await.expect("create other");

        let page = repo
            .list_owned(&owner, PageRequest::try_new(1, 2).expect("request"))
            .await
            .expect("list");
        let titles: Vec<_> = page.items().iter().map(Article::title).collect();
        assert_eq!(titles, vec!["c", "b"]);
        assert_eq!(page.total(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn find_many_skips_missing_and_foreign_ids(repo: InMemoryArticleRepository) {
        let owner = UserId::random();
        let other = UserId::random();
        let mine = repo.create(&owner, &draft("mine")).await.expect("create");
        let theirs = repo.create(&other, &draft("theirs")).await.expect("create");

        let found = repo
            .find_owned_many(&owner, &[mine.id(), theirs.id(), ArticleId::new(99)])
            .await
            .expect("find many");
        assert_eq!(found, vec![mine]);
    }
}
