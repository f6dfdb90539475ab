// src/services/categorizer.rs

use std::str::FromStr;

use crate::errors::AppError;
use crate::models::matches::{BucketKind, Match, MatchBucket};

const CODE_NOT_STARTED: i64 = 0;
const CODE_ENDED: i64 = 100;

/// How a match's status picks its bucket. One policy is applied to every
/// match in a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategorizationPolicy {
    /// `100` finished, `0` upcoming, any other code live. A match with no
    /// code at all counts as upcoming.
    #[default]
    ByCode,
    /// Case-insensitive description match; unknown descriptions are upcoming.
    ByDescription,
}

impl FromStr for CategorizationPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code" => Ok(CategorizationPolicy::ByCode),
            "description" => Ok(CategorizationPolicy::ByDescription),
            other => Err(AppError::configuration(format!(
                "unknown categorization policy '{}' (expected 'code' or 'description')",
                other
            ))),
        }
    }
}

impl CategorizationPolicy {
    pub fn classify(&self, m: &Match) -> BucketKind {
        match self {
            CategorizationPolicy::ByCode => match m.status_code {
                Some(CODE_ENDED) => BucketKind::Finished,
                Some(CODE_NOT_STARTED) | None => BucketKind::Upcoming,
                Some(_) => BucketKind::Live,
            },
            CategorizationPolicy::ByDescription => {
                match m.status.trim().to_lowercase().as_str() {
                    "live" => BucketKind::Live,
                    "ended" | "finished" | "after penalties" => BucketKind::Finished,
                    "not started" | "scheduled" => BucketKind::Upcoming,
                    _ => BucketKind::Upcoming,
                }
            }
        }
    }

    /// Splits `matches` into buckets, keeping input order within each one.
    pub fn bucket<I>(&self, matches: I) -> MatchBucket
    where
        I: IntoIterator<Item = Match>,
    {
        let mut bucket = MatchBucket::default();
        for m in matches {
            let kind = self.classify(&m);
            bucket.push(kind, m);
        }
        bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matches::TeamSide;

    const BOTH: [CategorizationPolicy; 2] = [
        CategorizationPolicy::ByCode,
        CategorizationPolicy::ByDescription,
    ];

    fn with_status(id: u64, code: Option<i64>, description: &str) -> Match {
        let side = |name: &str| TeamSide {
            id: 1,
            name: name.into(),
            logo_url: None,
            score: None,
        };
        Match {
            id,
            tournament_name: "LaLiga".into(),
            start_timestamp: 0,
            start_time_formatted: String::new(),
            status: description.into(),
            status_code: code,
            status_type: String::new(),
            home: side("Real Madrid"),
            away: side("Barcelona"),
        }
    }

    #[test]
    fn ended_is_finished_under_both_policies() {
        for policy in BOTH {
            assert_eq!(
                policy.classify(&with_status(1, Some(100), "Ended")),
                BucketKind::Finished
            );
        }
    }

    #[test]
    fn not_started_is_upcoming_under_both_policies() {
        for policy in BOTH {
            assert_eq!(
                policy.classify(&with_status(1, Some(0), "Not started")),
                BucketKind::Upcoming
            );
        }
    }

    #[test]
    fn live_is_live_under_both_policies() {
        for policy in BOTH {
            assert_eq!(
                policy.classify(&with_status(1, Some(6), "Live")),
                BucketKind::Live
            );
        }
    }

    #[test]
    fn unrecognized_statuses_land_in_documented_defaults() {
        // Postponed: code policy treats any unknown code as live.
        let postponed = with_status(1, Some(60), "Postponed");
        assert_eq!(CategorizationPolicy::ByCode.classify(&postponed), BucketKind::Live);
        assert_eq!(
            CategorizationPolicy::ByDescription.classify(&postponed),
            BucketKind::Upcoming
        );

        let no_code = with_status(2, None, "");
        assert_eq!(CategorizationPolicy::ByCode.classify(&no_code), BucketKind::Upcoming);
    }

    #[test]
    fn description_match_ignores_case_and_whitespace() {
        let policy = CategorizationPolicy::ByDescription;
        assert_eq!(policy.classify(&with_status(1, None, " AFTER PENALTIES ")), BucketKind::Finished);
        assert_eq!(policy.classify(&with_status(1, None, "Scheduled")), BucketKind::Upcoming);
        assert_eq!(policy.classify(&with_status(1, None, "LIVE")), BucketKind::Live);
    }

    #[test]
    fn bucket_is_a_partition() {
        let statuses = [
            (Some(100), "Ended"),
            (Some(0), "Not started"),
            (Some(6), "Live"),
            (Some(7), "2nd half"),
            (Some(60), "Postponed"),
            (None, "Finished"),
            (Some(120), "After penalties"),
            (Some(31), "Halftime"),
        ];

        for policy in BOTH {
            let matches: Vec<Match> = statuses
                .iter()
                .enumerate()
                .map(|(i, (code, desc))| with_status(i as u64, *code, desc))
                .collect();
            let bucket = policy.bucket(matches.clone());

            assert_eq!(bucket.len(), matches.len());
            let mut ids: Vec<u64> = bucket
                .live
                .iter()
                .chain(&bucket.upcoming)
                .chain(&bucket.finished)
                .map(|m| m.id)
                .collect();
            ids.sort();
            assert_eq!(ids, (0..matches.len() as u64).collect::<Vec<_>>());

            for m in &matches {
                let expected = policy.classify(m);
                let holder = match expected {
                    BucketKind::Live => &bucket.live,
                    BucketKind::Upcoming => &bucket.upcoming,
                    BucketKind::Finished => &bucket.finished,
                };
                assert!(holder.iter().any(|x| x.id == m.id));
            }
        }
    }

    #[test]
    fn bucket_keeps_input_order() {
        let bucket = CategorizationPolicy::ByCode.bucket(vec![
            with_status(3, Some(100), "Ended"),
            with_status(1, Some(0), "Not started"),
            with_status(2, Some(100), "Ended"),
        ]);
        let finished: Vec<u64> = bucket.finished.iter().map(|m| m.id).collect();
        assert_eq!(finished, vec![3, 2]);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("code".parse::<CategorizationPolicy>().unwrap(), CategorizationPolicy::ByCode);
        assert_eq!(
            " Description ".parse::<CategorizationPolicy>().unwrap(),
            CategorizationPolicy::ByDescription
        );
        assert!("status".parse::<CategorizationPolicy>().is_err());
    }
}
