use serde::{Deserialize, Serialize};

/// Returned when a string does not name any variant of a `str_enum!` type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {field}: {value}")]
pub struct UnknownVariant {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(UnknownVariant {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Sidebar order is significant: index 0 is the landing page.
str_enum!(Page {
    GeneralSymptoms => "general-symptoms",
    Diabetes => "diabetes",
    HeartDisease => "heart-disease",
    Parkinsons => "parkinsons",
});

str_enum!(DiagnosticTarget {
    Diabetes => "diabetes",
    HeartDisease => "heart-disease",
    Parkinsons => "parkinsons",
});

str_enum!(FitPolicy {
    AtStartup => "at_startup",
    PerRequest => "per_request",
});

impl Page {
    /// The page shown before the user touches the sidebar.
    pub const DEFAULT: Page = Page::GeneralSymptoms;

    /// Label shown in the sidebar menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            Self::GeneralSymptoms => "General Symptoms",
            Self::Diabetes => "Diabetes Prediction",
            Self::HeartDisease => "Heart Disease Prediction",
            Self::Parkinsons => "Parkinsons Prediction",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::GeneralSymptoms => "Disease Prediction from Symptoms using ML",
            Self::Diabetes => "Diabetes Prediction using ML",
            Self::HeartDisease => "Heart Disease Prediction using ML",
            Self::Parkinsons => "Parkinson's Disease Prediction using ML",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::GeneralSymptoms => "Symptoms Test Result",
            Self::Diabetes => "Diabetes Test Result",
            Self::HeartDisease => "Heart Disease Test Result",
            Self::Parkinsons => "Parkinson's Test Result",
        }
    }

    /// Number of form columns the page lays its fields out in.
    pub fn columns(&self) -> usize {
        match self {
            Self::Parkinsons => 5,
            _ => 3,
        }
    }

    /// The pre-trained model behind this page, if any.
    /// `GeneralSymptoms` is served by the inline symptom classifier instead.
    pub fn target(&self) -> Option<DiagnosticTarget> {
        match self {
            Self::GeneralSymptoms => None,
            Self::Diabetes => Some(DiagnosticTarget::Diabetes),
            Self::HeartDisease => Some(DiagnosticTarget::HeartDisease),
            Self::Parkinsons => Some(DiagnosticTarget::Parkinsons),
        }
    }
}

impl DiagnosticTarget {
    pub fn page(&self) -> Page {
        match self {
            Self::Diabetes => Page::Diabetes,
            Self::HeartDisease => Page::HeartDisease,
            Self::Parkinsons => Page::Parkinsons,
        }
    }

    /// File stem of the model pair (`.apr` + `.json`) under the models directory.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes_model",
            Self::HeartDisease => "heart_disease_model",
            Self::Parkinsons => "parkinsons_model",
        }
    }

    /// Outcome column of the public table the model is fitted on.
    pub fn label_column(&self) -> &'static str {
        match self {
            Self::Diabetes => "Outcome",
            Self::HeartDisease => "target",
            Self::Parkinsons => "status",
        }
    }

    /// Result sentence for a predicted label. Only label 1 is a positive finding.
    pub fn outcome_message(&self, label: usize) -> &'static str {
        let positive = label == 1;
        match (self, positive) {
            (Self::Diabetes, true) => "The person is diabetic",
            (Self::Diabetes, false) => "The person is not diabetic",
            (Self::HeartDisease, true) => "The person is having heart disease",
            (Self::HeartDisease, false) => "The person does not have any heart disease",
            (Self::Parkinsons, true) => "The person has Parkinson's disease",
            (Self::Parkinsons, false) => "The person does not have Parkinson's disease",
        }
    }
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self::AtStartup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_round_trips_through_slug() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), *page);
        }
    }

    #[test]
    fn unknown_page_slug_is_rejected() {
        let err = "cancer".parse::<Page>().unwrap_err();
        assert_eq!(err.field, "Page");
        assert_eq!(err.value, "cancer");
    }

    #[test]
    fn sidebar_order_starts_with_general_symptoms() {
        assert_eq!(Page::ALL[0], Page::DEFAULT);
        let labels: Vec<_> = Page::ALL.iter().map(|p| p.menu_label()).collect();
        assert_eq!(
            labels,
            vec![
                "General Symptoms",
                "Diabetes Prediction",
                "Heart Disease Prediction",
                "Parkinsons Prediction",
            ]
        );
    }

    #[test]
    fn only_label_one_is_positive() {
        assert_eq!(
            DiagnosticTarget::Diabetes.outcome_message(1),
            "The person is diabetic"
        );
        assert_eq!(
            DiagnosticTarget::Diabetes.outcome_message(0),
            "The person is not diabetic"
        );
        assert_eq!(
            DiagnosticTarget::HeartDisease.outcome_message(2),
            "The person does not have any heart disease"
        );
    }

    #[test]
    fn every_target_has_a_page() {
        for target in DiagnosticTarget::ALL {
            assert_eq!(target.page().target(), Some(*target));
        }
        assert_eq!(Page::GeneralSymptoms.target(), None);
    }

    #[test]
    fn fit_policy_serde_matches_slug() {
        let json = serde_json::to_string(&FitPolicy::PerRequest).unwrap();
        assert_eq!(json, "\"per_request\"");
        assert_eq!(FitPolicy::default(), FitPolicy::AtStartup);
    }
}
