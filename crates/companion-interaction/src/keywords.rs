//! Ordered keyword tables of the discovery script.
//!
//! Input is lower-cased and checked by substring against each row in
//! declaration order; the first row with a matching keyword wins.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Interest {
    Programming,
    #[serde(rename = "data science")]
    #[strum(serialize = "data science")]
    DataScience,
    Web,
    #[serde(rename = "machine learning")]
    #[strum(serialize = "machine learning")]
    MachineLearning,
    Mobile,
    Design,
    Cloud,
    Security,
}

impl Interest {
    /// Name with the first letter upper-cased, e.g. "Data science".
    pub fn display_name(&self) -> String {
        let name = self.as_ref();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Goal {
    Career,
    Skill,
    Project,
    Interview,
}

pub const INTEREST_KEYWORDS: &[(Interest, &[&str])] = &[
    (
        Interest::Programming,
        &["programming", "code", "coding", "c++", "python", "java"],
    ),
    (Interest::DataScience, &["data", "analytics", "pandas", "numpy"]),
    (
        Interest::Web,
        &["web", "website", "frontend", "backend", "react"],
    ),
    (
        Interest::MachineLearning,
        &["machine learning", "ml", "ai", "neural"],
    ),
    (
        Interest::Mobile,
        &["mobile", "app", "flutter", "ios", "android"],
    ),
    (Interest::Design, &["design", "ui", "ux", "figma"]),
    (Interest::Cloud, &["cloud", "aws", "azure", "devops"]),
    (Interest::Security, &["security", "cybersecurity", "hacking"]),
];

pub const EXPERIENCE_KEYWORDS: &[(Experience, &[&str])] = &[
    (Experience::Beginner, &["beginner", "new", "starting"]),
    (Experience::Intermediate, &["intermediate", "some"]),
    (Experience::Advanced, &["advanced", "expert"]),
];

pub const GOAL_KEYWORDS: &[(Goal, &[&str])] = &[
    (Goal::Career, &["career"]),
    (Goal::Skill, &["skill", "enhance"]),
    (Goal::Project, &["project"]),
    (Goal::Interview, &["interview"]),
];

/// Returns true when `input` (already lower-cased) contains any keyword.
pub fn contains_any(input: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| input.contains(keyword))
}

/// First row of `table` whose keywords occur in `input`.
pub fn first_match<T: Copy>(table: &[(T, &[&str])], input: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, keywords)| contains_any(input, keywords))
        .map(|(value, _)| *value)
}

/// Course ids recommended for an interest, optionally tiered by experience.
enum Tiers {
    ByExperience {
        beginner: &'static [&'static str],
        intermediate: &'static [&'static str],
        advanced: &'static [&'static str],
    },
    Flat(&'static [&'static str]),
}

const FALLBACK_COURSES: &[&str] = &["cpp-fundamentals-101", "ui-ux-design-101"];

fn tiers(interest: Interest) -> Tiers {
    match interest {
        Interest::Programming => Tiers::ByExperience {
            beginner: &["cpp-fundamentals-101", "ui-ux-design-101"],
            intermediate: &["dsa-interview-prep-501", "web-dev-fullstack-301"],
            advanced: &["ml-fundamentals-401", "nlp-transformers-801"],
        },
        Interest::DataScience => Tiers::ByExperience {
            beginner: &["python-data-science-201"],
            intermediate: &["python-data-science-201", "ml-fundamentals-401"],
            advanced: &["ml-fundamentals-401", "nlp-transformers-801"],
        },
        Interest::Web => Tiers::ByExperience {
            beginner: &["ui-ux-design-101"],
            intermediate: &["web-dev-fullstack-301"],
            advanced: &["web-dev-fullstack-301"],
        },
        Interest::MachineLearning => Tiers::ByExperience {
            beginner: &["python-data-science-201"],
            intermediate: &["ml-fundamentals-401"],
            advanced: &["ml-fundamentals-401", "nlp-transformers-801"],
        },
        Interest::Mobile => Tiers::Flat(&["mobile-dev-flutter-601"]),
        Interest::Design => Tiers::Flat(&["ui-ux-design-101"]),
        Interest::Cloud => Tiers::Flat(&["cloud-aws-basics-701"]),
        Interest::Security => Tiers::Flat(&["cybersecurity-basics-901"]),
    }
}

/// Maps the collected answers to ranked course ids.
///
/// Tiered interests fall back to the beginner tier when the experience is
/// unknown; a missing interest falls back to a fixed starter pair.
pub fn recommended_course_ids(
    interest: Option<Interest>,
    experience: Option<Experience>,
) -> &'static [&'static str] {
    let ids = match interest.map(tiers) {
        Some(Tiers::ByExperience {
            beginner,
            intermediate,
            advanced,
        }) => match experience {
            Some(Experience::Intermediate) => intermediate,
            Some(Experience::Advanced) => advanced,
            Some(Experience::Beginner) | None => beginner,
        },
        Some(Tiers::Flat(ids)) => ids,
        None => &[],
    };

    if ids.is_empty() { FALLBACK_COURSES } else { ids }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_table_order_is_pinned() {
        let order: Vec<_> = INTEREST_KEYWORDS.iter().map(|(i, _)| i.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "programming",
                "data science",
                "web",
                "machine learning",
                "mobile",
                "design",
                "cloud",
                "security"
            ]
        );
    }

    #[test]
    fn test_first_match_wins() {
        // "python" is listed under programming before "data" rows are checked
        assert_eq!(
            first_match(INTEREST_KEYWORDS, "python data"),
            Some(Interest::Programming)
        );
        assert_eq!(
            first_match(INTEREST_KEYWORDS, "pandas"),
            Some(Interest::DataScience)
        );
        // "cybersecurity" contains "security", which the security row also lists
        assert_eq!(
            first_match(INTEREST_KEYWORDS, "cybersecurity"),
            Some(Interest::Security)
        );
        assert_eq!(first_match(INTEREST_KEYWORDS, "gardening"), None);
    }

    #[test]
    fn test_experience_and_goal_tables() {
        assert_eq!(
            first_match(EXPERIENCE_KEYWORDS, "i have some experience"),
            Some(Experience::Intermediate)
        );
        assert_eq!(first_match(EXPERIENCE_KEYWORDS, "expert"), Some(Experience::Advanced));
        assert_eq!(first_match(GOAL_KEYWORDS, "enhance"), Some(Goal::Skill));
        assert_eq!(first_match(GOAL_KEYWORDS, "nothing"), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Interest::DataScience.display_name(), "Data science");
        assert_eq!(Interest::Web.display_name(), "Web");
    }

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(
            recommended_course_ids(Some(Interest::Programming), Some(Experience::Advanced)),
            &["ml-fundamentals-401", "nlp-transformers-801"]
        );
        assert_eq!(
            recommended_course_ids(Some(Interest::Web), None),
            &["ui-ux-design-101"]
        );
        assert_eq!(
            recommended_course_ids(Some(Interest::Cloud), Some(Experience::Advanced)),
            &["cloud-aws-basics-701"]
        );
        assert_eq!(recommended_course_ids(None, None), FALLBACK_COURSES);
    }
}
