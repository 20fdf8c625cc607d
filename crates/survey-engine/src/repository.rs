//! Question repository client
//!
//! Session-lifetime read path over the question repository:
//! - results cached by (category, product scope) in a moka future cache,
//!   so concurrent fetches for one key collapse to a single in-flight
//!   load and prefetch cannot race navigation
//! - product-scoped fetch failures degrade to global-only questions
//! - failed loads are not cached; they are retried lazily on demand

use crate::collaborators::QuestionRepository;
use crate::error::FetchError;
use crate::retry::RetryPolicy;
use moka::future::Cache;
use std::sync::Arc;
use survey_domain::{Category, ProductId, Question};

/// Cache key: one entry per category and product scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QuestionKey {
    category: Category,
    product_id: Option<ProductId>,
}

/// Caching, retrying client over the question repository
///
/// Cheap to clone; clones share one cache.
#[derive(Clone)]
pub struct QuestionClient {
    repo: Arc<dyn QuestionRepository>,
    cache: Cache<QuestionKey, Arc<Vec<Question>>>,
    retry: RetryPolicy,
}

impl QuestionClient {
    /// Create a client with the given retry policy and cache capacity
    #[must_use]
    pub fn new(repo: Arc<dyn QuestionRepository>, retry: RetryPolicy, cache_capacity: u64) -> Self {
        Self {
            repo,
            cache: Cache::new(cache_capacity),
            retry,
        }
    }

    /// Fetch the ordered question list for a category and product scope
    ///
    /// With a product scope the result is the union of global and
    /// product-specific questions, sorted by `order_index` (stable sort,
    /// ties keep the repository's relative order). If the product-scoped
    /// fetch fails, the client degrades to global-only questions rather
    /// than failing the section.
    ///
    /// # Errors
    /// `FetchError` only when the global fallback also fails.
    pub async fn fetch(
        &self,
        category: Category,
        product_id: Option<&ProductId>,
    ) -> Result<Arc<Vec<Question>>, FetchError> {
        let key = QuestionKey {
            category,
            product_id: product_id.cloned(),
        };
        let repo = Arc::clone(&self.repo);
        let retry = self.retry;
        let scope = product_id.cloned();

        self.cache
            .try_get_with(key, async move {
                Self::load(repo, retry, category, scope).await.map(Arc::new)
            })
            .await
            .map_err(|err: Arc<FetchError>| (*err).clone())
    }

    /// Warm the cache for a section that is not active yet
    ///
    /// Failures are swallowed: the section's own fetch retries lazily
    /// when it becomes active.
    pub async fn prefetch(&self, category: Category, product_id: Option<ProductId>) {
        match self.fetch(category, product_id.as_ref()).await {
            Ok(questions) => {
                tracing::debug!(%category, count = questions.len(), "prefetched questions");
            }
            Err(err) => {
                tracing::debug!(%category, error = %err, "prefetch failed, will refetch on demand");
            }
        }
    }

    /// Whether a key is already cached
    #[must_use]
    pub fn is_cached(&self, category: Category, product_id: Option<&ProductId>) -> bool {
        self.cache.contains_key(&QuestionKey {
            category,
            product_id: product_id.cloned(),
        })
    }

    async fn load(
        repo: Arc<dyn QuestionRepository>,
        retry: RetryPolicy,
        category: Category,
        product_id: Option<ProductId>,
    ) -> Result<Vec<Question>, FetchError> {
        let mut questions = match &product_id {
            Some(pid) => {
                match retry.run(|| repo.questions_for_product(category, pid)).await {
                    Ok(questions) => questions,
                    Err(err) => {
                        tracing::warn!(
                            %category,
                            product_id = %pid,
                            error = %err,
                            "product-scoped fetch failed, degrading to global questions"
                        );
                        retry.run(|| repo.questions_by_category(category)).await?
                    }
                }
            }
            None => retry.run(|| repo.questions_by_category(category)).await?,
        };

        // Stable sort: equal order_index keeps repository order
        questions.sort_by_key(|question| question.order_index);
        Ok(questions)
    }
}

impl std::fmt::Debug for QuestionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionClient")
            .field("cached_entries", &self.cache.entry_count())
            .finish()
    }
}
