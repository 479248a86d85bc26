//! Fixed question wording for each follow-up survey.
//!
//! Answers arrive as `q1`..`qN`; index `i` of a list pairs with key `q{i+1}`.

use fi_core::FollowUpKind;

pub const DAY_QUESTIONS: [&str; 9] = [
    "1. In a few words, how would you describe what the experience felt like?",
    "2. What, if anything, surprised you or stood out most strongly?",
    "3. After the session, did anything change in how you see your work or situation?",
    "4. If something did change, what was it?",
    "5. How would you describe your sense of agency (ability to choose or act) now compared with before?",
    "6. What feels easier, clearer, or more possible since the session?",
    "7. Optional — did anything shift in your body during or after the session?",
    "8. Optional — has anything changed in how your environment is affecting you since the session?",
    "9. Optional — if you told someone else about this experience, what would you say it is or does?",
];

pub const WEEK_QUESTIONS: [&str; 5] = [
    "1. What has held or continued to shift over the past week?",
    "2. What has faded, returned, or stayed the same over the past week?",
    "3. What feels clearer or more possible now than it did a week ago?",
    "4. Has anything changed in how your environment is affecting you over the past week?",
    "5. Optional — have you noticed any somatic patterns over the past week?",
];

pub fn questions_for(kind: FollowUpKind) -> &'static [&'static str] {
    match kind {
        FollowUpKind::Day => &DAY_QUESTIONS,
        FollowUpKind::Week => &WEEK_QUESTIONS,
    }
}

/// Form key carrying the answer to the question at `index` (0-based).
pub fn answer_key(index: usize) -> String {
    format!("q{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_counts() {
        assert_eq!(questions_for(FollowUpKind::Day).len(), 9);
        assert_eq!(questions_for(FollowUpKind::Week).len(), 5);
    }

    #[test]
    fn test_questions_are_numbered_in_order() {
        for kind in [FollowUpKind::Day, FollowUpKind::Week] {
            for (index, question) in questions_for(kind).iter().enumerate() {
                assert!(question.starts_with(&format!("{}. ", index + 1)));
            }
        }
    }

    #[test]
    fn test_answer_key_is_one_based() {
        assert_eq!(answer_key(0), "q1");
        assert_eq!(answer_key(8), "q9");
    }
}
