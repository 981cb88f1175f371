//! Advisor catalogue
//!
//! [`AdvisorSpec`] names an advisor the coordinator can construct. Built-in
//! advisors need no parameters; keyword advisors come from configuration.

use super::{
    Advisor, AdvisorError, EngineerAdvisor, FinanceAdvisor, KeywordAdvisor, RiskAdvisor,
    StrategistAdvisor, UserAdvocateAdvisor,
};
use std::sync::Arc;

/// Advisors that always take part in core-only selection
pub const DEFAULT_CORE_ADVISORS: [&str; 3] = ["strategist", "risk", "engineer"];

/// Parameters of a configuration-defined advisor
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordAdvisorSpec {
    pub id: String,
    pub name: String,
    pub expertise: Vec<String>,
    pub recommendation: String,
    pub concerns: Vec<String>,
    /// Base confidence; off-topic questions get 60% of it
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorSpec {
    Strategist,
    Risk,
    Engineer,
    Finance,
    UserAdvocate,
    Keyword(KeywordAdvisorSpec),
}

impl AdvisorSpec {
    /// Every built-in advisor
    pub fn builtin() -> Vec<AdvisorSpec> {
        vec![
            AdvisorSpec::Strategist,
            AdvisorSpec::Risk,
            AdvisorSpec::Engineer,
            AdvisorSpec::Finance,
            AdvisorSpec::UserAdvocate,
        ]
    }

    /// Built-in advisor with the given id
    pub fn builtin_by_id(id: &str) -> Option<AdvisorSpec> {
        Self::builtin().into_iter().find(|spec| spec.id() == id)
    }

    pub fn id(&self) -> &str {
        match self {
            AdvisorSpec::Strategist => "strategist",
            AdvisorSpec::Risk => "risk",
            AdvisorSpec::Engineer => "engineer",
            AdvisorSpec::Finance => "finance",
            AdvisorSpec::UserAdvocate => "user_advocate",
            AdvisorSpec::Keyword(spec) => spec.id.trim(),
        }
    }

    pub fn build(&self) -> Result<Arc<dyn Advisor>, AdvisorError> {
        let advisor: Arc<dyn Advisor> = match self {
            AdvisorSpec::Strategist => Arc::new(StrategistAdvisor::new()),
            AdvisorSpec::Risk => Arc::new(RiskAdvisor::new()),
            AdvisorSpec::Engineer => Arc::new(EngineerAdvisor::new()),
            AdvisorSpec::Finance => Arc::new(FinanceAdvisor::new()),
            AdvisorSpec::UserAdvocate => Arc::new(UserAdvocateAdvisor::new()),
            AdvisorSpec::Keyword(spec) => Arc::new(KeywordAdvisor::new(spec)?),
        };
        Ok(advisor)
    }
}
