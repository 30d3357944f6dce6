//! Course-context matching between chats and the live selection.

use super::model::Chat;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a chat's course context relates to a set of course ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseMatch {
    /// Same ids, ignoring order.
    Exact,
    /// At least one shared id, but not exact.
    Partial,
    /// No shared id.
    None,
}

/// Query mode for [`chats_for_courses`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchType {
    Exact,
    #[default]
    Any,
}

/// Order-independent, cardinality-sensitive id comparison.
pub fn is_exact_match(context_ids: &[&str], ids: &[&str]) -> bool {
    if context_ids.len() != ids.len() {
        return false;
    }
    let mut left = context_ids.to_vec();
    let mut right = ids.to_vec();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

pub fn has_overlap(context_ids: &[&str], ids: &[&str]) -> bool {
    context_ids.iter().any(|id| ids.contains(id))
}

pub fn classify(context_ids: &[&str], ids: &[&str]) -> CourseMatch {
    if is_exact_match(context_ids, ids) {
        CourseMatch::Exact
    } else if has_overlap(context_ids, ids) {
        CourseMatch::Partial
    } else {
        CourseMatch::None
    }
}

impl Chat {
    /// Classifies this chat against the given selection ids.
    pub fn match_against(&self, ids: &[&str]) -> CourseMatch {
        classify(&self.course_ids(), ids)
    }

    pub fn matches(&self, ids: &[&str], match_type: MatchType) -> bool {
        let context_ids = self.course_ids();
        match match_type {
            MatchType::Exact => is_exact_match(&context_ids, ids),
            MatchType::Any => has_overlap(&context_ids, ids),
        }
    }
}

/// Returns the chats qualifying under `match_type`, in their original order.
pub fn chats_for_courses<'a, I>(chats: I, ids: &[&str], match_type: MatchType) -> Vec<&'a Chat>
where
    I: IntoIterator<Item = &'a Chat>,
{
    chats
        .into_iter()
        .filter(|chat| chat.matches(ids, match_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SelectedCourse;
    use chrono::Utc;

    fn chat(id: &str, courses: &[&str]) -> Chat {
        Chat::new(
            id,
            id,
            courses.iter().map(|c| SelectedCourse::new(*c, *c)).collect(),
            Utc::now(),
        )
    }

    #[test]
    fn test_exact_match_ignores_order() {
        assert!(is_exact_match(&["a", "b"], &["b", "a"]));
        assert!(!is_exact_match(&["a", "b"], &["a"]));
        assert!(!is_exact_match(&["a"], &["a", "a"]));
        assert!(is_exact_match(&[], &[]));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&["a", "b"], &["b", "a"]), CourseMatch::Exact);
        assert_eq!(classify(&["a", "b"], &["a", "c"]), CourseMatch::Partial);
        assert_eq!(classify(&["a", "b"], &["c"]), CourseMatch::None);
        assert_eq!(classify(&["a"], &[]), CourseMatch::None);
    }

    #[test]
    fn test_chats_for_courses_any_is_superset_of_exact() {
        let chats = vec![
            chat("one", &["py101", "cpp201"]),
            chat("two", &["devops301", "py101"]),
            chat("three", &["ml401"]),
            chat("four", &["py101"]),
        ];

        let exact = chats_for_courses(&chats, &["py101"], MatchType::Exact);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].chat_id, "four");

        let any: Vec<&str> = chats_for_courses(&chats, &["py101"], MatchType::Any)
            .into_iter()
            .map(|c| c.chat_id.as_str())
            .collect();
        assert_eq!(any, vec!["one", "two", "four"]);
        assert!(exact.iter().all(|c| any.contains(&c.chat_id.as_str())));
    }

    #[test]
    fn test_match_type_parses() {
        assert_eq!("exact".parse::<MatchType>().unwrap(), MatchType::Exact);
        assert_eq!(MatchType::default(), MatchType::Any);
    }
}
