//! Keyword-matched answers for the `query` endpoint.

use async_trait::async_trait;

use crate::remote::{
    ChatbotAnswer, ChatbotRepository, ChatbotRequest, ChatbotResponse, KnowledgeReply,
    RemoteError,
};

const FALLBACK_ANSWER: &str = "I'm sorry, I don't have information on that topic. \
                               Please ask about recharge pits, runoff, or feasibility.";
const FALLBACK_SOURCE: &str = "Internal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub keyword: &'static str,
    pub answer: &'static str,
    pub source: &'static str,
}

const ENTRIES: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        keyword: "recharge pit",
        answer: "A recharge pit is a small, excavated pit, usually filled with layers of gravel \
                 and sand, that allows rainwater runoff to collect and slowly percolate into the \
                 ground, recharging the aquifer.",
        source: "CGWB Manual, Chapter 4",
    },
    KnowledgeEntry {
        keyword: "runoff coefficient",
        answer: "The runoff coefficient is a dimensionless number that represents the fraction of \
                 rainfall that becomes surface runoff. It depends on the surface material; for \
                 example, a concrete roof has a higher coefficient (more runoff) than a garden.",
        source: "Standard Hydrology Textbooks",
    },
    KnowledgeEntry {
        keyword: "feasibility",
        answer: "Feasibility for rainwater harvesting depends on local rainfall, available space \
                 for structures, soil permeability for recharge, and the depth to the groundwater \
                 table. Very shallow groundwater can cause waterlogging if recharge is attempted.",
        source: "CGWB Guidelines",
    },
];

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            entries: ENTRIES.to_vec(),
        }
    }
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// First entry whose keyword occurs in the question, ignoring case.
    pub fn lookup(&self, question: &str) -> Option<&KnowledgeEntry> {
        let question = question.to_lowercase();
        self.entries
            .iter()
            .find(|entry| question.contains(entry.keyword))
    }

    /// Answer and source for `question`, falling back to a generic reply.
    pub fn reply(&self, question: &str) -> KnowledgeReply {
        let (answer, source) = match self.lookup(question) {
            Some(entry) => (entry.answer, entry.source),
            None => (FALLBACK_ANSWER, FALLBACK_SOURCE),
        };
        KnowledgeReply {
            answer: answer.to_string(),
            source: source.to_string(),
        }
    }

    pub fn answer(&self, request: &ChatbotRequest) -> ChatbotResponse {
        let KnowledgeReply { answer, source } = self.reply(&request.question);
        ChatbotResponse {
            answer: ChatbotAnswer {
                query: request.question.clone(),
                result: answer,
                source: Some(source),
            },
        }
    }
}

/// Answers locally, for offline use of the chat session.
#[async_trait]
impl ChatbotRepository for KnowledgeBase {
    async fn ask(&self, question: &str) -> Result<String, RemoteError> {
        let request = ChatbotRequest {
            question: question.to_string(),
        };
        Ok(self.answer(&request).answer.result)
    }
}
