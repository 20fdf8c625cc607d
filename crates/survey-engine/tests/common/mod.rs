//! In-memory collaborator fakes shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use survey_domain::{ScaleConfig, TextConfig};
use survey_engine::prelude::*;
use survey_engine::SubmissionReceipt;

/// Install a test subscriber once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_engine=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn rating(id: &str, category: Category) -> Question {
    Question::new(
        id,
        category,
        format!("Avalie: {id}"),
        QuestionKind::Rating(ScaleConfig::default()),
    )
    .unwrap()
    .required()
}

pub fn optional_text(id: &str, category: Category) -> Question {
    Question::new(
        id,
        category,
        "Quer comentar algo?",
        QuestionKind::Text(TextConfig::default()),
    )
    .unwrap()
}

pub fn boolean(id: &str, category: Category) -> Question {
    Question::new(id, category, "Chegou tudo certo?", QuestionKind::Boolean)
        .unwrap()
        .required()
}

pub fn two_product_edition() -> Edition {
    Edition::new(
        "ed-42",
        "Edição de Agosto",
        vec![
            Product::new("p1", "Granola Artesanal"),
            Product::new("p2", "Chá de Hibisco"),
        ],
    )
}

/// Identity fake with a fixed respondent and a sign-out counter
pub struct StaticIdentity {
    respondent: Respondent,
    pub sign_outs: AtomicUsize,
}

impl StaticIdentity {
    pub fn new(respondent: Respondent) -> Self {
        Self {
            respondent,
            sign_outs: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve(&self) -> Result<Respondent, FetchError> {
        Ok(self.respondent.clone())
    }

    async fn sign_out(&self) -> Result<(), FetchError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct StaticCatalog(pub Edition);

#[async_trait]
impl EditionCatalog for StaticCatalog {
    async fn active_edition(&self) -> Result<Edition, FetchError> {
        Ok(self.0.clone())
    }
}

/// Question repository fake
///
/// Global questions are keyed by category; product-scoped results are
/// keyed by product id and returned as global + scoped union, the way
/// the real repository query behaves. Product-scoped calls can be
/// switched to fail to exercise degradation.
#[derive(Default)]
pub struct InMemoryQuestions {
    by_category: HashMap<Category, Vec<Question>>,
    by_product: HashMap<ProductId, Vec<Question>>,
    pub fail_product_scope: AtomicBool,
    pub fail_category_scope: AtomicBool,
    pub category_calls: AtomicUsize,
    pub product_calls: AtomicUsize,
}

impl InMemoryQuestions {
    pub fn with_global(mut self, category: Category, questions: Vec<Question>) -> Self {
        self.by_category.insert(category, questions);
        self
    }

    pub fn with_product(mut self, product: &str, questions: Vec<Question>) -> Self {
        self.by_product.insert(ProductId::new(product), questions);
        self
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestions {
    async fn questions_by_category(&self, category: Category) -> Result<Vec<Question>, FetchError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_category_scope.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable("question index offline".to_string()));
        }
        Ok(self.by_category.get(&category).cloned().unwrap_or_default())
    }

    async fn questions_for_product(
        &self,
        category: Category,
        product_id: &ProductId,
    ) -> Result<Vec<Question>, FetchError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_product_scope.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable(
                "product question index offline".to_string(),
            ));
        }
        let mut questions = self.by_category.get(&category).cloned().unwrap_or_default();
        questions.extend(self.by_product.get(product_id).cloned().unwrap_or_default());
        Ok(questions)
    }
}

/// Persistence fake that records every outbound submit call
#[derive(Default)]
pub struct RecordingSink {
    pub submit_calls: AtomicUsize,
    pub fail_next_submit: AtomicBool,
    pub already_submitted: bool,
    pub last_payload: Mutex<Option<FeedbackPayload>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackSink for RecordingSink {
    async fn submit(&self, payload: &FeedbackPayload) -> Result<SubmissionReceipt, FetchError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_submit.swap(false, Ordering::SeqCst) {
            return Err(FetchError::Transport("connection reset".to_string()));
        }
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        Ok(SubmissionReceipt {
            session_reference: format!("ref-{}", self.submit_calls.load(Ordering::SeqCst)),
        })
    }

    async fn has_already_submitted<'a>(
        &self,
        _edition_id: &EditionId,
        _respondent: Option<&'a str>,
    ) -> Result<bool, FetchError> {
        Ok(self.already_submitted)
    }
}
