use chrono::{DateTime, Utc};
use indra::analysis::SiteAnalyzer;
use indra::assessment::{jitter, AssessmentService, FeasibilityEstimator, ReportFactory};
use indra::backend::BackendService;
use indra::clock::SystemClock;
use indra::config::EstimatorSettings;
use indra::knowledge::KnowledgeBase;
use indra::store::{
    IdentityProvider, InMemoryDocumentStore, InMemoryIdentityProvider, ProfileRepository,
    PropertyRepository, ReportRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Report factory honoring the configured rainfall and score seed. A seed
/// passed on the command line wins over the configured one.
pub(crate) fn report_factory(settings: &EstimatorSettings, seed: Option<u64>) -> ReportFactory {
    ReportFactory::new(
        FeasibilityEstimator::new(settings.into()),
        jitter::from_seed(seed.or(settings.score_seed)),
        Arc::new(SystemClock),
    )
}

pub(crate) fn backend_service(settings: &EstimatorSettings) -> BackendService {
    BackendService::new(
        SiteAnalyzer::new(),
        KnowledgeBase::default(),
        report_factory(settings, None),
    )
}

/// Identity provider, document store and repositories sharing one process.
pub(crate) struct InMemoryWorkspace {
    pub(crate) identity: Arc<InMemoryIdentityProvider>,
    pub(crate) store: InMemoryDocumentStore,
    pub(crate) profiles: ProfileRepository,
    pub(crate) properties: PropertyRepository,
    pub(crate) assessments: AssessmentService,
}

impl InMemoryWorkspace {
    pub(crate) fn new(factory: ReportFactory) -> Self {
        let identity = Arc::new(InMemoryIdentityProvider::default());
        let store = InMemoryDocumentStore::default();
        let provider: Arc<dyn IdentityProvider> = identity.clone();

        Self {
            profiles: ProfileRepository::new(provider.clone(), Arc::new(store.clone())),
            properties: PropertyRepository::new(provider.clone(), Arc::new(store.clone())),
            assessments: AssessmentService::new(
                factory,
                ReportRepository::new(provider, Arc::new(store.clone())),
            ),
            identity,
            store,
        }
    }
}

pub(crate) fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}
