//! Server-side counterparts of the hosted `assess`, `query` and `chat`
//! backends plus a stateless estimate endpoint.

mod router;

pub use router::{backend_router, EstimateView};

use crate::analysis::SiteAnalyzer;
use crate::assessment::{AssessmentInput, InputIssue, ReportFactory};
use crate::knowledge::KnowledgeBase;
use crate::remote::{
    AssessmentRequest, AssessmentResponse, ChatbotRequest, ChatbotResponse, KnowledgeQuery,
    KnowledgeReply,
};

pub struct BackendService {
    analyzer: SiteAnalyzer,
    knowledge: KnowledgeBase,
    factory: ReportFactory,
}

impl BackendService {
    pub fn new(analyzer: SiteAnalyzer, knowledge: KnowledgeBase, factory: ReportFactory) -> Self {
        Self {
            analyzer,
            knowledge,
            factory,
        }
    }

    pub fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentResponse, Vec<InputIssue>> {
        self.analyzer.analyze(request)
    }

    /// `None` when the question is blank.
    pub fn query(&self, request: &ChatbotRequest) -> Option<ChatbotResponse> {
        if request.question.trim().is_empty() {
            return None;
        }
        Some(self.knowledge.answer(request))
    }

    /// Blank queries get the fallback reply rather than an error.
    pub fn chat(&self, request: &KnowledgeQuery) -> KnowledgeReply {
        self.knowledge.reply(&request.query)
    }

    pub fn estimate(&self, input: &AssessmentInput) -> EstimateView {
        let (report, estimate) = self.factory.issue(input);
        EstimateView { report, estimate }
    }
}
