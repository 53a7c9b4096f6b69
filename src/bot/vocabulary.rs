//! Fixed medical vocabulary shared by the classifier and the synthesizer.
//!
//! Terms are matched as plain substrings of the lowercased utterance, so
//! `"symptom"` also matches `"symptoms"` and `"ache"` matches `"headache"`.
//! No stemming, no word boundaries.

/// Domain nouns and adjectives that mark an utterance as medical.
///
/// Order matters only for [`matched_terms`], which reports matches in this
/// order.
pub static MEDICAL_TERMS: &[&str] = &[
    "symptom",
    "disease",
    "treatment",
    "medication",
    "doctor",
    "hospital",
    "health",
    "pain",
    "fever",
    "cough",
    "cold",
    "flu",
    "virus",
    "bacteria",
    "infection",
    "prescription",
    "diagnosis",
    "surgery",
    "therapy",
    "patient",
    "medical",
    "medicine",
    "vaccine",
    "allergy",
    "blood",
    "heart",
    "lung",
    "liver",
    "kidney",
    "brain",
    "nerve",
    "bone",
    "joint",
    "immune",
    "cancer",
    "diabetes",
    "asthma",
    "hypertension",
    "stroke",
    "arthritis",
    "skin",
    "rash",
    "muscle",
    "headache",
    "migraine",
    "nausea",
    "vomit",
    "diarrhea",
    "constipation",
    "dizzy",
    "fatigue",
    "tired",
    "insomnia",
    "swelling",
    "inflammation",
    "chronic",
    "acute",
    "injury",
    "wound",
    "fracture",
    "sprain",
    "pregnant",
    "pregnancy",
    "birth",
    "diet",
    "nutrition",
    "vitamin",
    "mineral",
    "supplement",
    "wellness",
    "mental",
    "anxiety",
    "depression",
    "stress",
    "psychiatry",
    "counseling",
    "syndrome",
    "disorder",
    "condition",
    "specialist",
    "physician",
    "nurse",
    "clinic",
    "emergency",
    "ambulance",
    "paramedic",
    "care",
    "healing",
    "recovery",
    "relapse",
    "symptoms",
    "prognosis",
    "cure",
    "remedy",
    "preventive",
    "prevention",
    "check-up",
    "screening",
    "test",
    "exam",
    "analysis",
    "lab",
    "laboratory",
    "procedure",
    "operation",
    "anesthesia",
    "feel",
    "hurt",
    "ache",
    "body",
    "sick",
    "unwell",
];

/// Returns `true` when `lowered` contains at least one vocabulary term.
///
/// The caller is responsible for lowercasing.
pub fn contains_term(lowered: &str) -> bool {
    MEDICAL_TERMS.iter().any(|term| lowered.contains(term))
}

/// Every vocabulary term found in `lowered`, in vocabulary order.
pub fn matched_terms(lowered: &str) -> Vec<&'static str> {
    MEDICAL_TERMS
        .iter()
        .copied()
        .filter(|term| lowered.contains(term))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
