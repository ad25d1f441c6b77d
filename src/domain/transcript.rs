use serde_json::{Map, Value};

use super::knowledge::KnowledgeSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    pub transcript: String,
    pub context: Map<String, Value>,
    pub knowledge_categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub issue: String,
    pub fix: String,
}

impl Correction {
    pub fn new(issue: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            fix: fix.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedTranscript {
    pub text: String,
    pub corrections: Vec<Correction>,
    pub notes: String,
    pub knowledge_used: KnowledgeSnapshot,
}
