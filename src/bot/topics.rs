//! Topic routing and reply content.
//!
//! [`RULES`] is an ordered table of `(predicate, handler)` pairs tested
//! against the lowercased utterance; the first match answers.  When nothing
//! matches, [`GENERAL`] answers.
//!
//! Condition topics are described by static [`ConditionSheet`]s.  Two
//! configuration axes shape them:
//!
//! * **detail** — `accuracy_level` above [`DETAILED_ACCURACY_THRESHOLD`]
//!   swaps the basic cause list for the clinical one;
//! * **specialty** — [`TreatmentAddOn`]s append specialty items after the
//!   base treatments, some only at the detailed tier.

use crate::bot::domain::MEDIA_MARKER;
use crate::bot::phrasing::{choose, Phrasing};
use crate::bot::response::{owned, ResponseBody};
use crate::bot::vocabulary;
use crate::config::{AssistantConfig, Specialty};

/// Accuracy levels strictly above this select clinically detailed lists.
pub const DETAILED_ACCURACY_THRESHOLD: f32 = 0.75;

/// Topic label used by the general reply when no vocabulary term matched.
pub const PLACEHOLDER_TOPIC: &str = "your health concern";

/// Returns `true` when `config` asks for the detailed tier.
pub fn is_detailed(config: &AssistantConfig) -> bool {
    config.accuracy_level > DETAILED_ACCURACY_THRESHOLD
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Everything a handler may look at.
pub struct RuleContext<'a> {
    /// Lowercased utterance.
    pub lowered: &'a str,
    pub config: &'a AssistantConfig,
    pub phrasing: &'a dyn Phrasing,
}

/// One routing entry.
pub struct TopicRule {
    /// Stable name used in logs and tests.
    pub name: &'static str,
    /// Tested against the lowercased utterance.
    pub matches: fn(&str) -> bool,
    pub respond: fn(&RuleContext<'_>) -> ResponseBody,
}

/// Topic rules in priority order.
pub static RULES: &[TopicRule] = &[
    TopicRule {
        name: "video",
        matches: |t| t.contains(MEDIA_MARKER),
        respond: respond_video,
    },
    TopicRule {
        name: "headache",
        matches: |t| t.contains("headache"),
        respond: |ctx| condition_body(&HEADACHE, ctx.config),
    },
    TopicRule {
        name: "cold-flu",
        matches: |t| t.contains("cold") || t.contains("flu"),
        respond: |ctx| condition_body(&COLD_FLU, ctx.config),
    },
    TopicRule {
        name: "infection",
        matches: |t| t.contains("infection") || t.contains("infected"),
        respond: |ctx| condition_body(&INFECTION, ctx.config),
    },
];

/// Fallback rule; matches everything.
pub static GENERAL: TopicRule = TopicRule {
    name: "general",
    matches: |_| true,
    respond: respond_general,
};

/// First rule whose predicate accepts `lowered`, or [`GENERAL`].
pub fn route(lowered: &str) -> &'static TopicRule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(lowered))
        .unwrap_or(&GENERAL)
}

// ---------------------------------------------------------------------------
// Condition sheets
// ---------------------------------------------------------------------------

/// Specialty items appended to a condition's treatments.
pub struct TreatmentAddOn {
    pub specialty: Specialty,
    /// Only applies at the detailed tier.
    pub detailed_only: bool,
    pub items: &'static [&'static str],
}

/// Static content for one condition topic.
pub struct ConditionSheet {
    pub lead_in: &'static str,
    pub basic_causes: &'static [&'static str],
    pub detailed_causes: &'static [&'static str],
    pub treatments: &'static [&'static str],
    pub add_ons: &'static [TreatmentAddOn],
    pub cautions: &'static [&'static str],
    pub summary: &'static str,
}

/// Build the reply for `sheet` under `config`.
pub fn condition_body(sheet: &ConditionSheet, config: &AssistantConfig) -> ResponseBody {
    let detailed = is_detailed(config);

    let causes = if detailed {
        sheet.detailed_causes
    } else {
        sheet.basic_causes
    };

    let mut treatments = owned(sheet.treatments);
    for add_on in sheet.add_ons {
        if add_on.specialty == config.specialty && (detailed || !add_on.detailed_only) {
            treatments.extend(add_on.items.iter().map(|s| s.to_string()));
        }
    }

    ResponseBody {
        content: sheet.lead_in.to_string(),
        causes: Some(owned(causes)),
        treatments: Some(treatments),
        cautions: Some(owned(sheet.cautions)),
        recommendations: None,
        summary: Some(sheet.summary.to_string()),
    }
}

pub static HEADACHE: ConditionSheet = ConditionSheet {
    lead_in: "Based on your mention of a headache, here's some information that might be helpful:",
    basic_causes: &[
        "Tension or stress",
        "Dehydration",
        "Lack of sleep",
        "Eye strain",
        "Sinus congestion",
    ],
    detailed_causes: &[
        "Tension-type headache from sustained pericranial muscle contraction or psychological stress",
        "Dehydration reducing circulating fluid volume",
        "Sleep deprivation or irregular sleep-wake patterns",
        "Eye strain from uncorrected refractive error or prolonged screen use",
        "Sinus congestion from acute or chronic sinusitis",
        "Migraine, often with aura, light sensitivity, or nausea",
        "Medication-overuse (rebound) headache from frequent analgesic use",
    ],
    treatments: &[
        "Over-the-counter pain relievers like acetaminophen or ibuprofen",
        "Staying hydrated",
        "Applying a cold or warm compress",
        "Resting in a dark, quiet room",
        "Gentle massage of neck and temple areas",
    ],
    add_ons: &[
        TreatmentAddOn {
            specialty: Specialty::Neurology,
            detailed_only: false,
            items: &[
                "Migraine-specific medication such as triptans for moderate to severe attacks",
                "Keeping a headache diary to identify migraine triggers",
                "Discussing preventive therapy with a neurologist if migraines occur more than four days a month",
            ],
        },
        TreatmentAddOn {
            specialty: Specialty::Emergency,
            detailed_only: true,
            items: &[
                "Emergency evaluation for a sudden thunderclap headache that peaks within a minute",
                "Urgent care if the headache follows a head injury or comes with confusion, weakness, or vision loss",
                "Emergency services if the headache is accompanied by fever and a stiff neck",
            ],
        },
        TreatmentAddOn {
            specialty: Specialty::Pediatrics,
            detailed_only: false,
            items: &[
                "Weight-based acetaminophen or ibuprofen dosing for children",
                "Avoiding aspirin in children and teenagers because of the risk of Reye's syndrome",
            ],
        },
    ],
    cautions: &[
        "Seek immediate medical attention for severe, sudden headaches",
        "Consult a doctor if headaches are recurring or worsening",
        "Be cautious with medication overuse which can cause rebound headaches",
        "Track triggers like certain foods, activities, or environmental factors",
    ],
    summary: "Headaches are often caused by tension, dehydration, or lack of sleep. Most can be treated with OTC pain relievers, hydration, and rest, but severe or recurring headaches warrant medical attention.",
};

pub static COLD_FLU: ConditionSheet = ConditionSheet {
    lead_in: "I see you're asking about a cold or flu. Here's some relevant information:",
    basic_causes: &[
        "Viral infection (different viruses cause colds vs. influenza)",
        "Exposure to infected individuals",
        "Touching contaminated surfaces then touching face",
        "Droplets in the air from coughs and sneezes",
    ],
    detailed_causes: &[
        "Rhinoviruses and other respiratory viruses (common cold) or influenza A and B viruses (flu)",
        "Close contact with infected individuals during the contagious period",
        "Fomite transmission from contaminated surfaces to the eyes, nose, or mouth",
        "Respiratory droplets and aerosols from coughs and sneezes",
        "Reduced immune defenses from stress, poor sleep, or chronic illness",
        "Seasonal factors such as more time indoors and lower humidity",
    ],
    treatments: &[
        "Rest and adequate hydration",
        "Over-the-counter symptom relief medications",
        "Antiviral medications (for flu, if started early)",
        "Saline nasal spray or rinse for congestion",
        "Warm liquids like tea with honey for sore throat",
    ],
    add_ons: &[
        TreatmentAddOn {
            specialty: Specialty::Emergency,
            detailed_only: true,
            items: &[
                "Emergency care for difficulty breathing, persistent chest pain, or bluish lips",
                "Emergency department evaluation for confusion, severe dehydration, or seizures",
                "Prompt antiviral treatment within 48 hours of symptom onset for high-risk patients",
            ],
        },
        TreatmentAddOn {
            specialty: Specialty::Pediatrics,
            detailed_only: false,
            items: &[
                "No over-the-counter cough and cold medicines for children under 4",
                "No aspirin for children or teenagers with flu-like symptoms",
            ],
        },
        TreatmentAddOn {
            specialty: Specialty::Cardiology,
            detailed_only: false,
            items: &[
                "Checking with your doctor before using decongestants if you have high blood pressure or heart disease",
            ],
        },
    ],
    cautions: &[
        "High fever, difficulty breathing, or chest pain require medical attention",
        "Elderly, young children, pregnant women, and those with chronic conditions should seek care early",
        "Avoid spreading by washing hands and staying home when sick",
        "Annual flu vaccination is recommended for prevention",
    ],
    summary: "Colds and flu are viral infections spread through contact and airborne droplets. Most cases can be managed with rest, fluids, and OTC medications, but certain symptoms or high-risk individuals require medical care. Prevention includes handwashing and vaccination.",
};

pub static INFECTION: ConditionSheet = ConditionSheet {
    lead_in: "You mentioned an infection. Here's some general information that may help:",
    basic_causes: &[
        "Bacteria entering through cuts, wounds, or surgical sites",
        "Viruses passed on by infected people",
        "Fungal growth in warm, moist areas of the body",
        "A weakened immune system",
    ],
    detailed_causes: &[
        "Bacterial pathogens such as Staphylococcus or Streptococcus entering through breaks in the skin",
        "Viral transmission via respiratory droplets, bodily fluids, or contaminated surfaces",
        "Fungal overgrowth (for example Candida) favoured by moisture, antibiotic use, or diabetes",
        "Immunosuppression from chronic disease, chemotherapy, or long-term steroid use",
        "Healthcare-associated exposure from catheters, IV lines, or hospital stays",
    ],
    treatments: &[
        "Keeping any wound clean and covered",
        "Rest and adequate hydration",
        "Antibiotics only when prescribed, taking the full course",
        "Over-the-counter pain or fever relief as directed",
        "Follow-up with a healthcare provider if symptoms do not improve",
    ],
    add_ons: &[
        TreatmentAddOn {
            specialty: Specialty::Dermatology,
            detailed_only: false,
            items: &[
                "Topical antibiotic or antifungal treatment for localized skin infections",
                "Marking the edge of any spreading redness to monitor for cellulitis",
            ],
        },
        TreatmentAddOn {
            specialty: Specialty::Emergency,
            detailed_only: true,
            items: &[
                "Emergency care for signs of sepsis such as high fever, rapid heartbeat, or confusion",
                "Emergency department evaluation if redness spreads rapidly or pain becomes severe",
            ],
        },
    ],
    cautions: &[
        "Fever above 39°C (102°F), chills, or rapidly spreading redness need prompt medical care",
        "Do not share antibiotics or use leftover prescriptions",
        "People with diabetes or weakened immunity should seek care early",
        "Wash hands frequently to avoid spreading infection",
    ],
    summary: "Most minor infections clear with good hygiene, rest, and prescribed treatment, but fever, spreading redness, or worsening pain need prompt medical attention.",
};

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

/// Equivalent openers for media-derived queries; one is picked per reply.
pub static VIDEO_LEAD_INS: [&str; 3] = [
    "I've analyzed the video you've provided. Here's what I can tell:",
    "I've reviewed the video you shared. Here's what I noticed:",
    "Thanks for sharing your video. Based on what I can see, here's my assessment:",
];

fn respond_video(ctx: &RuleContext<'_>) -> ResponseBody {
    ResponseBody {
        content: choose(ctx.phrasing, &VIDEO_LEAD_INS).to_string(),
        summary: Some(
            "The video appears to show common cold symptoms. I notice signs of congestion and fatigue which are typical for viral upper respiratory infections."
                .into(),
        ),
        recommendations: Some(owned(&[
            "Rest and hydration are recommended",
            "Over-the-counter cold medications may help with symptom relief",
            "If symptoms worsen or persist beyond 7-10 days, consult a healthcare provider",
        ])),
        ..ResponseBody::default()
    }
}

// ---------------------------------------------------------------------------
// General
// ---------------------------------------------------------------------------

static GENERAL_SUMMARIES: &[(Specialty, &str)] = &[
    (
        Specialty::General,
        "For specific medical concerns, it's best to consult with a healthcare professional who can provide personalized advice based on your medical history and current health status.",
    ),
    (
        Specialty::Cardiology,
        "Heart-related concerns should be reviewed by a cardiologist, who can assess your blood pressure, cholesterol, and heart rhythm in the context of your history.",
    ),
    (
        Specialty::Neurology,
        "Neurological symptoms such as persistent headaches, numbness, or dizziness are best evaluated by a neurologist who can arrange the appropriate examinations.",
    ),
    (
        Specialty::Pediatrics,
        "Children's symptoms and medication doses differ from adults', so a pediatrician should guide care based on your child's age, weight, and history.",
    ),
    (
        Specialty::Dermatology,
        "Skin concerns are often easiest to assess in person; a dermatologist can examine the affected area and recommend targeted treatment.",
    ),
    (
        Specialty::Emergency,
        "If symptoms are severe, sudden, or worsening, seek emergency care immediately rather than waiting for a routine appointment.",
    ),
];

static GENERAL_RECOMMENDATIONS: &[(Specialty, &[&str])] = &[
    (
        Specialty::General,
        &[
            "Schedule an appointment with your primary care provider",
            "Write down your symptoms, when they started, and what makes them better or worse",
            "Bring a list of your current medications and supplements",
        ],
    ),
    (
        Specialty::Cardiology,
        &[
            "Monitor and record your blood pressure and heart rate",
            "Call emergency services for chest pain, fainting, or severe shortness of breath",
            "Ask your doctor about a cardiovascular risk assessment",
        ],
    ),
    (
        Specialty::Neurology,
        &[
            "Keep a symptom diary noting timing, duration, and triggers",
            "Seek urgent care for sudden weakness, facial drooping, or trouble speaking",
            "Ask for a referral to a neurologist if symptoms persist",
        ],
    ),
    (
        Specialty::Pediatrics,
        &[
            "Contact your pediatrician with your child's age and weight",
            "Use only child-appropriate medication doses",
            "Seek care promptly for high fever in infants under 3 months",
        ],
    ),
    (
        Specialty::Dermatology,
        &[
            "Take dated photos of the affected skin to track changes",
            "Avoid scratching or applying new products to the area",
            "See a dermatologist for changing moles or non-healing sores",
        ],
    ),
    (
        Specialty::Emergency,
        &[
            "Call your local emergency number for life-threatening symptoms",
            "Do not drive yourself if you feel faint or confused",
            "Bring your medication list to the emergency department",
        ],
    ),
];

/// Summary for `specialty`, falling back to the general row.
pub fn general_summary(specialty: Specialty) -> &'static str {
    lookup(GENERAL_SUMMARIES, specialty)
}

/// Recommendations for `specialty`, falling back to the general row.
pub fn general_recommendations(specialty: Specialty) -> &'static [&'static str] {
    lookup(GENERAL_RECOMMENDATIONS, specialty)
}

fn lookup<T: Copy>(table: &[(Specialty, T)], specialty: Specialty) -> T {
    table
        .iter()
        .find(|(s, _)| *s == specialty)
        .or_else(|| table.iter().find(|(s, _)| *s == Specialty::General))
        .map(|(_, value)| *value)
        .unwrap_or_else(|| table[0].1)
}

fn respond_general(ctx: &RuleContext<'_>) -> ResponseBody {
    let terms = vocabulary::matched_terms(ctx.lowered);
    let topic = if terms.is_empty() {
        PLACEHOLDER_TOPIC.to_string()
    } else {
        terms.join(", ")
    };

    ResponseBody {
        content: format!(
            "I understand you have a medical question about {topic}. While I can provide general information, please consult with a healthcare professional for personalized advice."
        ),
        summary: Some(general_summary(ctx.config.specialty).to_string()),
        recommendations: Some(owned(general_recommendations(ctx.config.specialty))),
        ..ResponseBody::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::phrasing::FixedPhrasing;

    fn config(specialty: Specialty, accuracy_level: f32) -> AssistantConfig {
        AssistantConfig {
            specialty,
            accuracy_level,
            ..AssistantConfig::default()
        }
    }

    fn respond(text: &str, config: &AssistantConfig) -> (&'static str, ResponseBody) {
        let lowered = text.to_lowercase();
        let rule = route(&lowered);
        let ctx = RuleContext {
            lowered: &lowered,
            config,
            phrasing: &FixedPhrasing(0),
        };
        (rule.name, (rule.respond)(&ctx))
    }

    #[test]
    fn routes_in_priority_order() {
        assert_eq!(route("video of my headache").name, "video");
        assert_eq!(route("headache with a cold").name, "headache");
        assert_eq!(route("is this the flu").name, "cold-flu");
        assert_eq!(route("caught a cold").name, "cold-flu");
        assert_eq!(route("my cut looks infected").name, "infection");
        assert_eq!(route("my back hurts").name, "general");
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_detailed(&config(Specialty::General, 0.75)));
        assert!(is_detailed(&config(Specialty::General, 0.76)));
    }

    #[test]
    fn headache_basic_and_detailed_causes() {
        let (_, basic) = respond("I have a headache", &config(Specialty::General, 0.5));
        assert_eq!(basic.causes.as_ref().map(Vec::len), Some(5));
        assert_eq!(basic.causes.unwrap()[0], "Tension or stress");

        let (_, detailed) = respond("I have a headache", &config(Specialty::General, 0.9));
        assert_eq!(detailed.causes.map(|c| c.len()), Some(7));
    }

    #[test]
    fn headache_neurology_appends_migraine_items_at_any_tier() {
        let (_, body) = respond("headache again", &config(Specialty::Neurology, 0.2));
        let treatments = body.treatments.expect("treatments");
        assert_eq!(treatments.len(), 8);
        assert!(treatments[5].contains("triptans"));
    }

    #[test]
    fn emergency_items_need_detailed_tier() {
        let (_, low) = respond("tell me about the flu", &config(Specialty::Emergency, 0.5));
        assert_eq!(low.treatments.map(|t| t.len()), Some(5));

        let (_, high) = respond("tell me about the flu", &config(Specialty::Emergency, 0.85));
        let treatments = high.treatments.expect("treatments");
        assert_eq!(treatments.len(), 8);
        assert_eq!(treatments[..5], owned(COLD_FLU.treatments)[..]);
        assert_eq!(treatments[5..], owned(COLD_FLU.add_ons[0].items)[..]);
    }

    #[test]
    fn unlisted_specialty_keeps_base_treatments() {
        let (_, body) = respond("I have a headache", &config(Specialty::Orthopedics, 0.9));
        assert_eq!(body.treatments, Some(owned(HEADACHE.treatments)));
    }

    #[test]
    fn condition_reply_has_no_recommendations() {
        let (_, body) = respond("my wound is infected", &config(Specialty::Dermatology, 0.3));
        assert!(body.recommendations.is_none());
        assert_eq!(body.treatments.map(|t| t.len()), Some(7));
        assert_eq!(body.causes.map(|c| c.len()), Some(4));
    }

    #[test]
    fn video_reply_uses_phrasing_strategy() {
        let lowered = "please check this video";
        let cfg = AssistantConfig::default();
        for (index, expected) in VIDEO_LEAD_INS.iter().enumerate() {
            let ctx = RuleContext {
                lowered,
                config: &cfg,
                phrasing: &FixedPhrasing(index),
            };
            let body = respond_video(&ctx);
            assert_eq!(body.content, *expected);
            assert_eq!(body.recommendations.map(|r| r.len()), Some(3));
            assert!(body.causes.is_none());
        }
    }

    #[test]
    fn general_reply_lists_matched_terms() {
        let (name, body) = respond("Blood test results look odd", &config(Specialty::General, 0.9));
        assert_eq!(name, "general");
        assert!(body.content.contains("about blood, test."));
        assert_eq!(body.summary.as_deref(), Some(general_summary(Specialty::General)));
    }

    #[test]
    fn general_reply_uses_placeholder_without_terms() {
        let (_, body) = respond("Is this normal?", &AssistantConfig::default());
        assert!(body.content.contains(PLACEHOLDER_TOPIC));
    }

    #[test]
    fn general_tables_fall_back_to_general_row() {
        assert_eq!(
            general_summary(Specialty::Psychiatry),
            general_summary(Specialty::General)
        );
        assert_eq!(
            general_recommendations(Specialty::Orthopedics),
            general_recommendations(Specialty::General)
        );
        assert_ne!(
            general_summary(Specialty::Cardiology),
            general_summary(Specialty::General)
        );
    }

    #[test]
    fn general_recommendations_follow_specialty() {
        let (_, body) = respond("my heart races", &config(Specialty::Cardiology, 0.9));
        assert_eq!(
            body.recommendations,
            Some(owned(general_recommendations(Specialty::Cardiology)))
        );
    }
}
