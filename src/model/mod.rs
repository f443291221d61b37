//! Domain types for agent results
//!
//! These are the typed records handed back to the API layer after response
//! resolution. They are transient, created and consumed within a single
//! request; nothing here is persisted or shared across requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod config;

pub use config::{Config, GeminiConfig};

/// What the conversation agent did with the user's prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversationAction {
    AnswerQuestion,
    ModifyDiagram,
}

impl ConversationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationAction::AnswerQuestion => "answer_question",
            ConversationAction::ModifyDiagram => "modify_diagram",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "answer_question" => Some(ConversationAction::AnswerQuestion),
            "modify_diagram" => Some(ConversationAction::ModifyDiagram),
            _ => None,
        }
    }
}

/// Whether a result carries real model output or a fallback.
///
/// Both are terminal, non-error outcomes: a degraded result is still
/// schema-complete and serializes as HTTP 200, with the explanation carried
/// in-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Degraded,
}

/// Result of one conversation turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationResult {
    pub action: ConversationAction,
    /// BPMN XML; the original diagram unless the turn modified it.
    pub diagram_data: String,
    /// Node id to human-readable description.
    pub detail_descriptions: HashMap<String, String>,
    pub answer: String,
    pub memory: String,
    pub outcome: Outcome,
}

/// Result of one diagram generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramResult {
    /// BPMN XML payload, treated as an opaque string.
    pub diagram_data: String,
    pub diagram_name: String,
    pub diagram_description: String,
    pub detail_descriptions: HashMap<String, String>,
    pub outcome: Outcome,
}

/// Result of one optimization run over an existing diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// BPMN XML of the improved process, or the original when degraded.
    pub diagram_data: String,
    /// Summary of the proposed changes.
    pub answer: String,
    pub detail_descriptions: HashMap<String, String>,
    /// Improvement title to detailed description.
    pub optimization_detail: HashMap<String, String>,
    pub memory: String,
    pub outcome: Outcome,
}
