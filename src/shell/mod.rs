//! Form/Navigation Shell.
//!
//! One page per sidebar entry. A page is rendered blank on navigation and
//! re-rendered with exactly one outcome after its submit action. Invalid input
//! is caught at submit time and shown as an error region instead of a result.

pub mod render;

use std::collections::HashMap;
use std::sync::Arc;

use crate::core_state::{self, CoreError, CoreState};
use crate::forms;
use crate::models::{DiagnosticTarget, InvalidInputError, Label, Page};
use crate::symptoms::{SymptomDiagnosis, SymptomSelection, MAX_SYMPTOM_SLOTS};

pub use render::{escape_html, render_page};

/// Form key of the 1-based symptom drop-down `slot`.
pub fn symptom_slot_key(slot: usize) -> String {
    format!("Symptom{slot}")
}

/// Label shown above the 1-based symptom drop-down `slot`.
pub fn symptom_slot_label(slot: usize) -> String {
    format!("Symptoms {slot:02}")
}

/// What a submit produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Binary {
        target: DiagnosticTarget,
        label: Label,
        message: &'static str,
    },
    Symptoms(SymptomDiagnosis),
    Rejected(InvalidInputError),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Everything needed to render one page.
#[derive(Debug, Clone)]
pub struct PageView {
    pub page: Page,
    /// Submitted values, echoed back into the fields.
    pub values: HashMap<String, String>,
    pub outcome: Option<Outcome>,
}

impl PageView {
    /// The page as first shown: empty fields, default drop-downs, no result.
    pub fn blank(page: Page) -> Self {
        Self {
            page,
            values: HashMap::new(),
            outcome: None,
        }
    }

    /// Value to show in field `key`. Empty when nothing was submitted.
    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Handle the submit action of `page`.
///
/// Invalid input becomes [`Outcome::Rejected`]; any other failure is returned
/// as an error.
pub async fn submit(
    core: Arc<CoreState>,
    page: Page,
    values: HashMap<String, String>,
) -> Result<PageView, CoreError> {
    let result = match page.target() {
        Some(target) => submit_target(&core, target, &values),
        None => submit_symptoms(core, &values).await,
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(CoreError::InvalidInput(err)) => {
            tracing::info!(page = page.as_str(), error = %err, "Submission rejected");
            Outcome::Rejected(err)
        }
        Err(other) => return Err(other),
    };

    Ok(PageView {
        page,
        values,
        outcome: Some(outcome),
    })
}

fn submit_target(
    core: &CoreState,
    target: DiagnosticTarget,
    values: &HashMap<String, String>,
) -> Result<Outcome, CoreError> {
    let features = forms::parse_text_fields(target, values)?;
    let label = core.predict_target(target, &features)?;
    Ok(Outcome::Binary {
        target,
        label,
        message: target.outcome_message(label),
    })
}

async fn submit_symptoms(
    core: Arc<CoreState>,
    values: &HashMap<String, String>,
) -> Result<Outcome, CoreError> {
    let slots = (1..=MAX_SYMPTOM_SLOTS).map(|slot| values.get(&symptom_slot_key(slot)));
    let selection = SymptomSelection::from_slots(slots)?;
    let diagnosis = core_state::diagnose_symptoms(core, selection).await?;
    Ok(Outcome::Symptoms(diagnosis))
}
