//! Candidate scoring and ranking.

use std::cmp::Reverse;

use serde::Serialize;

use crate::model::Candidate;

pub const EDUCATION_WEIGHT: u32 = 5;
pub const ADDITIONAL_EDUCATION_WEIGHT: u32 = 4;
pub const ENGLISH_WEIGHT: u32 = 4;
/// Skill tags needed for one point; remainders are truncated.
pub const SKILLS_PER_POINT: u32 = 6;

pub fn score(c: &Candidate) -> u32 {
    let flag = |set: bool, weight: u32| if set { weight } else { 0 };
    flag(c.education, EDUCATION_WEIGHT)
        + flag(c.additional_education, ADDITIONAL_EDUCATION_WEIGHT)
        + c.skills / SKILLS_PER_POINT
        + flag(c.english, ENGLISH_WEIGHT)
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub score: u32,
    #[serde(flatten)]
    pub candidate: Candidate,
}

/// Sorts by score, highest first. Equal scores keep their input order.
///
/// Scores are attached to each entry by position, so records that compare
/// equal (same name, position and url) are all kept.
pub fn rank_with_scores(candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|candidate| RankedCandidate {
            score: score(&candidate),
            candidate,
        })
        .collect();
    ranked.sort_by_key(|r| Reverse(r.score));
    ranked
}

pub fn rank(candidates: Vec<Candidate>) -> Vec<Candidate> {
    rank_with_scores(candidates)
        .into_iter()
        .map(|r| r.candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, education: bool, additional: bool, skills: u32, english: bool) -> Candidate {
        Candidate {
            name: name.to_string(),
            position: "QA".to_string(),
            ready_to_work: String::new(),
            education,
            additional_education: additional,
            skills,
            english,
            url: format!("https://www.work.ua/resumes/{name}/"),
        }
    }

    fn names(list: &[Candidate]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn score_adds_weights_and_truncates_skills() {
        assert_eq!(score(&candidate("a", true, false, 13, true)), 11);
        assert_eq!(score(&candidate("b", true, true, 18, true)), 16);
        assert_eq!(score(&candidate("c", false, false, 0, false)), 0);
    }

    #[test]
    fn skills_below_divisor_contribute_nothing() {
        assert_eq!(score(&candidate("a", false, false, 5, false)), 0);
        assert_eq!(score(&candidate("a", false, false, 6, false)), 1);
    }

    #[test]
    fn rank_sorts_descending() {
        let input = vec![
            candidate("low", false, false, 0, false),
            candidate("high", true, true, 12, true),
            candidate("mid", true, false, 0, false),
        ];
        assert_eq!(names(&rank(input)), ["high", "mid", "low"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            candidate("first", false, true, 0, false),
            candidate("top", true, true, 0, true),
            candidate("second", false, false, 0, true),
            candidate("third", false, false, 24, false),
        ];
        assert_eq!(names(&rank(input)), ["top", "first", "second", "third"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let input = vec![
            candidate("a", false, false, 7, false),
            candidate("b", true, false, 0, false),
            candidate("c", false, false, 6, false),
            candidate("d", true, false, 1, false),
        ];
        let once = rank(input);
        let twice = rank(once.clone());
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn look_alike_candidates_are_not_collapsed() {
        let twin = candidate("twin", true, false, 0, false);
        let mut other = twin.clone();
        other.english = true;
        assert_eq!(twin, other);

        let ranked = rank_with_scores(vec![twin, other]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, 9);
        assert_eq!(ranked[1].score, 5);
    }
}
