//! Medicine Catalog: static remedy lookup by predicted disease name.
//!
//! Keys are matched exactly (case and spelling sensitive) and do not always
//! agree with the disease catalog ("Fungal Infection" vs "Fungal infection").
//! A miss is not an error: it yields an empty list.
//!
//! `Chronic cholestasis` is authored twice; the later entry wins but keeps the
//! position of the first, the way a map literal with a repeated key behaves.

use serde::Serialize;

// ═══════════════════════════════════════════
// Static table
// ═══════════════════════════════════════════

const MEDICINE_ENTRIES: &[(&str, &[&str])] = &[
    ("Acne", &["Aclear Ointment", "Aclear Capsules"]),
    ("Allergy", &["Kaeswar Guggula Tablet", "Khadira Rishtha"]),
    ("Arthritis", &["Jogaraja Guggula", "Rasana Pachana", "Kineaz Capsules"]),
    ("Bronchial Asthma", &["Talisadi Churna", "Spazex Capsules"]),
    ("Common Cold", &["Naradiya Laxmivilasa", "Drakshya Rishtha"]),
    ("Chronic cholestasis", &["Sunthhi Khanda Modaka", "Kutaja Ghanabati"]),
    ("Covid", &["Ayush 64 Tablet"]),
    ("Dengue", &["Plate Plus Capsule"]),
    ("Diabetes", &["Madhu Mehari Bati", "Glucostat Capsule"]),
    ("Fungal Infection", &["Kaeswar Guggula"]),
    ("Gastro", &["Gasex Tablet"]),
    ("Hypertension", &["Ashwagandha"]),
    ("Hypothyroidism", &["It's better to consult with Doctor"]),
    ("Jaundice", &["Live 52 DS"]),
    ("Hypoglycemia", &["It's better to consult with Doctor"]),
    ("Malaria", &["Ayush 64 Tablet"]),
    ("Oestroarthritis", &["Ostygen Capsule"]),
    ("Paralysis", &["Rumartho Gold", "Mahamasa Taila"]),
    ("Peptic Ulcers", &["Sutin Tablet"]),
    ("Pneumonia", &["Naradiya Lakhmi Vilas"]),
    ("Psoriasis", &["It's better to consult with Doctor"]),
    ("Spondylitis", &["Jogaraja Gugula", "Mahamasa Taila"]),
    ("Tuberculosis", &["It's better to consult with Doctor"]),
    ("Typhoid", &["It's better to consult with Doctor"]),
    ("Urinary Tract", &["Anyolith", "Asocaristha"]),
    ("Varicose Veins", &["It's better to consult with Doctor"]),
    ("Alcoholic Hepatitis", &["It's better to consult with Doctor"]),
    ("Cervical Spondylosis", &["Kineaz Tablets", "Rumartho Gold"]),
    ("Chicken Pox", &["It's better to consult with Doctor"]),
    ("Chronic cholestasis", &["Sunthi Khanda Modaka", "Live 52 DS"]),
    ("Piles", &["Asrsakuthara Rasa", "Pilex"]),
    ("Drug Reaction", &["It's better to consult with Doctor"]),
    ("GERD", &["Acilans Capsule"]),
    ("Gastroenteritis", &["Gasex Tablet", "Sunthi Khanda Modaka"]),
    ("Heart Attack", &["It's better to consult with Doctor"]),
    ("Hepatitis A, B, C, D, E", &["It's better to consult with Doctor"]),
    ("Impetigo", &["It's better to consult with Doctor"]),
    ("Migraine", &["It's better to consult with Doctor"]),
    ("Paroxysmal Positional Vertigo", &["Ashwagandha"]),
];

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// One catalog entry as returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemedyEntry {
    pub disease: &'static str,
    pub medicines: Vec<&'static str>,
}

// ═══════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct MedicineCatalog {
    entries: Vec<(&'static str, &'static [&'static str])>,
}

impl MedicineCatalog {
    /// Build the catalog from the built-in table.
    pub fn builtin() -> Self {
        Self::from_entries(MEDICINE_ENTRIES)
    }

    /// Build from ordered `(disease, remedies)` pairs. A repeated key replaces
    /// the earlier remedies in place.
    pub fn from_entries(raw: &[(&'static str, &'static [&'static str])]) -> Self {
        let mut entries: Vec<(&'static str, &'static [&'static str])> = Vec::with_capacity(raw.len());
        for &(disease, medicines) in raw {
            match entries.iter_mut().find(|(key, _)| *key == disease) {
                Some(existing) => {
                    tracing::debug!(disease, "Medicine catalog key repeated; later entry wins");
                    existing.1 = medicines;
                }
                None => entries.push((disease, medicines)),
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remedies for an exact disease name, or an empty list.
    pub fn lookup(&self, disease: &str) -> Vec<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == disease)
            .map(|(_, medicines)| medicines.to_vec())
            .unwrap_or_default()
    }

    /// Case-insensitive substring search over disease keys and remedy names.
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<RemedyEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|(disease, medicines)| {
                disease.to_lowercase().contains(&needle)
                    || medicines.iter().any(|m| m.to_lowercase().contains(&needle))
            })
            .map(|&(disease, medicines)| RemedyEntry {
                disease,
                medicines: medicines.to_vec(),
            })
            .collect()
    }
}

impl Default for MedicineCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
