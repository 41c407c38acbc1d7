use std::collections::BTreeSet;

use crate::workflows::dispatch::domain::Specialization;

/// One entry of the skill-derivation table: a specialization tag plus the
/// lower-cased problem substrings and upper-cased error-code markers that
/// imply it.
struct KeywordRule {
    specialization: Specialization,
    problem_keywords: &'static [&'static str],
    code_markers: &'static [&'static str],
}

/// Fixed, ordered derivation table. Rules are evaluated in this order and
/// every matching rule contributes its tag.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        specialization: Specialization::Ac,
        problem_keywords: &["ac", "cooling"],
        code_markers: &["E1", "H1"],
    },
    KeywordRule {
        specialization: Specialization::Refrigerator,
        problem_keywords: &["refrigerator", "fridge"],
        code_markers: &["F0"],
    },
    KeywordRule {
        specialization: Specialization::WashingMachine,
        problem_keywords: &["washing machine", "wash"],
        code_markers: &[],
    },
    KeywordRule {
        specialization: Specialization::Television,
        problem_keywords: &["tv", "display"],
        code_markers: &[],
    },
    KeywordRule {
        specialization: Specialization::Induction,
        problem_keywords: &["induction"],
        code_markers: &[],
    },
    KeywordRule {
        specialization: Specialization::Microwave,
        problem_keywords: &["microwave", "microoven"],
        code_markers: &[],
    },
    KeywordRule {
        specialization: Specialization::Geyser,
        problem_keywords: &["geyser"],
        code_markers: &[],
    },
    KeywordRule {
        specialization: Specialization::Dishwasher,
        problem_keywords: &["dishwasher"],
        code_markers: &[],
    },
    KeywordRule {
        specialization: Specialization::WaterPurifier,
        problem_keywords: &["water purifier"],
        code_markers: &[],
    },
];

/// Map a complaint's problem text and error code to the specializations a
/// technician must hold.
///
/// Matching is substring-based: keywords against the lower-cased problem
/// text, markers against the upper-cased error code. When nothing matches,
/// the result is every known tag, so any specialized technician qualifies
/// rather than the complaint failing outright. Callers relying on narrow
/// matching should check the returned set before treating it as specific.
pub fn derive_required_specializations(
    problem: &str,
    error_code: Option<&str>,
) -> BTreeSet<Specialization> {
    let problem = problem.to_lowercase();
    let code = error_code.map(|code| code.trim().to_ascii_uppercase());

    let mut required = BTreeSet::new();
    for rule in KEYWORD_RULES {
        let keyword_hit = rule
            .problem_keywords
            .iter()
            .any(|keyword| problem.contains(keyword));
        let code_hit = code.as_deref().is_some_and(|code| {
            rule.code_markers.iter().any(|marker| code.contains(marker))
        });
        if keyword_hit || code_hit {
            required.insert(rule.specialization);
        }
    }

    if required.is_empty() {
        return Specialization::all_tags();
    }
    required
}
