//! Symptom Encoder: up to five chosen symptom names → one-hot vector over the vocabulary.

use crate::models::{FeatureVector, InvalidInputError};
use crate::vocabulary::{self, SYMPTOMS, SYMPTOM_COUNT};

/// Number of symptom drop-downs on the form.
pub const MAX_SYMPTOM_SLOTS: usize = 5;

/// Encode symptom names into a vector of length [`SYMPTOM_COUNT`].
///
/// Position `k` is 1 when the vocabulary entry at `k` appears anywhere in
/// `selected`. Repeats have no extra effect, order does not matter, and names
/// outside the vocabulary match nothing. Because `fluid_overload` occupies
/// two positions, selecting it sets two bits.
pub fn encode<S: AsRef<str>>(selected: &[S]) -> FeatureVector {
    let mut vector = FeatureVector::zeros(SYMPTOM_COUNT);
    for (k, name) in SYMPTOMS.iter().enumerate() {
        if selected.iter().any(|s| s.as_ref() == *name) {
            vector.set(k, 1.0);
        }
    }
    vector
}

/// Five validated symptom slots, as submitted from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomSelection {
    slots: Vec<String>,
}

impl SymptomSelection {
    /// Every slot left at the drop-down default.
    pub fn all_default() -> Self {
        Self {
            slots: vec![vocabulary::default_symptom().to_string(); MAX_SYMPTOM_SLOTS],
        }
    }

    /// Build from submitted slots. Missing or blank slots take the drop-down
    /// default; anything else must be a vocabulary entry.
    pub fn from_slots<I, S>(submitted: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let submitted: Vec<Option<S>> = submitted.into_iter().collect();
        if submitted.len() > MAX_SYMPTOM_SLOTS {
            return Err(InvalidInputError::TooManySymptoms {
                max: MAX_SYMPTOM_SLOTS,
                given: submitted.len(),
            });
        }

        let mut slots = Vec::with_capacity(MAX_SYMPTOM_SLOTS);
        for (index, value) in submitted.iter().enumerate() {
            let name = value.as_ref().map(|v| v.as_ref().trim()).unwrap_or("");
            if name.is_empty() {
                slots.push(vocabulary::default_symptom().to_string());
            } else if vocabulary::is_symptom(name) {
                slots.push(name.to_string());
            } else {
                return Err(InvalidInputError::UnknownSymptom {
                    slot: index + 1,
                    value: name.to_string(),
                });
            }
        }
        while slots.len() < MAX_SYMPTOM_SLOTS {
            slots.push(vocabulary::default_symptom().to_string());
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn encode(&self) -> FeatureVector {
        encode(&self.slots)
    }
}

impl Default for SymptomSelection {
    fn default() -> Self {
        Self::all_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_symptom_sets_exactly_its_own_bit() {
        for (position, name) in SYMPTOMS.iter().enumerate() {
            if *name == "fluid_overload" {
                continue;
            }
            let v = encode(&[*name; MAX_SYMPTOM_SLOTS]);
            assert_eq!(v.active_indices(), vec![position], "{name}");
        }
    }

    #[test]
    fn duplicated_vocabulary_entry_sets_both_bits() {
        let v = encode(&["fluid_overload"; MAX_SYMPTOM_SLOTS]);
        assert_eq!(v.active_indices(), vec![8, 80]);
    }

    #[test]
    fn encoding_ignores_slot_order() {
        let a = encode(&["chest_pain", "dizziness", "coma", "blister", "obesity"]);
        let b = encode(&["obesity", "coma", "chest_pain", "blister", "dizziness"]);
        assert_eq!(a, b);
        assert_eq!(a.active_indices().len(), 5);
    }

    #[test]
    fn unknown_names_match_nothing() {
        let v = encode(&["not_a_symptom"]);
        assert!(v.active_indices().is_empty());
        assert_eq!(v.len(), SYMPTOM_COUNT);
    }

    #[test]
    fn default_selection_is_a_single_back_pain_bit() {
        let v = SymptomSelection::all_default().encode();
        assert_eq!(v.active_indices(), vec![0]);
    }

    #[test]
    fn missing_slots_take_the_default() {
        let selection =
            SymptomSelection::from_slots(vec![Some("coma"), None, Some("  ")]).unwrap();
        assert_eq!(selection.slots().len(), MAX_SYMPTOM_SLOTS);
        assert_eq!(selection.slots()[0], "coma");
        assert!(selection.slots()[1..].iter().all(|s| s == "back_pain"));
        assert_eq!(selection.encode().active_indices(), vec![0, 76]);
    }

    #[test]
    fn unknown_slot_value_is_rejected_with_its_slot() {
        let err = SymptomSelection::from_slots(vec![Some("coma"), Some("Coma")]).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::UnknownSymptom {
                slot: 2,
                value: "Coma".into()
            }
        );
    }

    #[test]
    fn more_than_five_slots_is_rejected() {
        let err = SymptomSelection::from_slots(vec![Some("coma"); 6]).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::TooManySymptoms { max: 5, given: 6 }
        );
    }
}
