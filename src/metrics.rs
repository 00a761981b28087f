use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters exposed on `/metrics`.
#[derive(Default)]
pub struct StudyMetrics {
    pub documents_uploaded: AtomicU64,
    pub extraction_failures: AtomicU64,
    pub summaries_generated: AtomicU64,
    pub quiz_questions_created: AtomicU64,
    pub chats_answered: AtomicU64,
    pub ai_failures: AtomicU64,
}

impl StudyMetrics {
    pub fn inc_uploaded(&self) {
        self.documents_uploaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_extraction_failed(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_summaries(&self) {
        self.summaries_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_quiz_questions(&self, n: u64) {
        self.quiz_questions_created.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_chats(&self) {
        self.chats_answered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ai_failed(&self) {
        self.ai_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Serialize to Prometheus text exposition format.
    pub fn to_prometheus_text(&self) -> String {
        let uploaded = self.documents_uploaded.load(Ordering::Relaxed);
        let extraction_failures = self.extraction_failures.load(Ordering::Relaxed);
        let summaries = self.summaries_generated.load(Ordering::Relaxed);
        let questions = self.quiz_questions_created.load(Ordering::Relaxed);
        let chats = self.chats_answered.load(Ordering::Relaxed);
        let ai_failures = self.ai_failures.load(Ordering::Relaxed);

        format!(
            "# HELP docstudy_documents_uploaded_total Documents accepted by the upload endpoint\n\
             # TYPE docstudy_documents_uploaded_total counter\n\
             docstudy_documents_uploaded_total {uploaded}\n\
             # HELP docstudy_extraction_failures_total PDF text extractions that failed\n\
             # TYPE docstudy_extraction_failures_total counter\n\
             docstudy_extraction_failures_total {extraction_failures}\n\
             # HELP docstudy_ai_results_total Results produced by the AI assistant\n\
             # TYPE docstudy_ai_results_total counter\n\
             docstudy_ai_results_total{{kind=\"summary\"}} {summaries}\n\
             docstudy_ai_results_total{{kind=\"quiz_question\"}} {questions}\n\
             docstudy_ai_results_total{{kind=\"chat\"}} {chats}\n\
             # HELP docstudy_ai_failures_total AI requests that failed\n\
             # TYPE docstudy_ai_failures_total counter\n\
             docstudy_ai_failures_total {ai_failures}\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_render() {
        let m = StudyMetrics::default();
        m.inc_uploaded();
        m.inc_uploaded();
        m.add_quiz_questions(5);
        m.inc_ai_failed();

        let text = m.to_prometheus_text();
        assert!(text.contains("docstudy_documents_uploaded_total 2\n"));
        assert!(text.contains("docstudy_ai_results_total{kind=\"quiz_question\"} 5\n"));
        assert!(text.contains("docstudy_ai_results_total{kind=\"summary\"} 0\n"));
        assert!(text.contains("docstudy_ai_failures_total 1\n"));
    }
}
