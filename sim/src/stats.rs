//! Aggregation of simulated sessions

use serde::Serialize;

/// Outcome of one simulated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    /// Spins performed
    pub spins: u64,
    /// Distinct items owned at the end
    pub owned: u32,
    /// Whether the whole catalog was collected
    pub completed: bool,
    /// Spins that won an item already owned
    pub repeats: u64,
}

/// Summary over many sessions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub sessions: usize,
    pub completed: usize,
    pub completion_rate: f64,
    pub mean_owned: f64,
    pub mean_repeat_share: f64,
    /// Spin counts over completed sessions only
    pub spins_to_complete: Option<Distribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub min: u64,
    pub median: u64,
    pub p90: u64,
    pub max: u64,
    pub mean: f64,
}

impl Distribution {
    /// `None` for an empty sample
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let at = |q: f64| sorted[((sorted.len() - 1) as f64 * q).round() as usize];
        let total: u64 = sorted.iter().sum();

        Some(Self {
            min: sorted[0],
            median: at(0.5),
            p90: at(0.9),
            max: sorted[sorted.len() - 1],
            mean: total as f64 / sorted.len() as f64,
        })
    }
}

impl Summary {
    pub fn from_results(results: &[SessionResult]) -> Self {
        let sessions = results.len();
        let denominator = sessions.max(1) as f64;
        let completed_spins: Vec<u64> = results
            .iter()
            .filter(|r| r.completed)
            .map(|r| r.spins)
            .collect();

        let mean_owned = results.iter().map(|r| f64::from(r.owned)).sum::<f64>() / denominator;
        let mean_repeat_share = results
            .iter()
            .map(|r| {
                if r.spins == 0 {
                    0.0
                } else {
                    r.repeats as f64 / r.spins as f64
                }
            })
            .sum::<f64>()
            / denominator;

        Self {
            sessions,
            completed: completed_spins.len(),
            completion_rate: completed_spins.len() as f64 / denominator,
            mean_owned,
            mean_repeat_share,
            spins_to_complete: Distribution::from_samples(&completed_spins),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(spins: u64, owned: u32, completed: bool, repeats: u64) -> SessionResult {
        SessionResult {
            spins,
            owned,
            completed,
            repeats,
        }
    }

    #[test]
    fn test_distribution_of_empty_sample() {
        assert_eq!(Distribution::from_samples(&[]), None);
    }

    #[test]
    fn test_distribution_quantiles() {
        let samples: Vec<u64> = (1..=11).rev().collect();
        let dist = Distribution::from_samples(&samples).unwrap();
        assert_eq!(dist.min, 1);
        assert_eq!(dist.median, 6);
        assert_eq!(dist.p90, 10);
        assert_eq!(dist.max, 11);
        assert_eq!(dist.mean, 6.0);
    }

    #[test]
    fn test_summary_counts_only_completed_spins() {
        let results = [
            session(10, 5, true, 5),
            session(20, 5, true, 15),
            session(100, 3, false, 97),
            session(0, 0, false, 0),
        ];
        let summary = Summary::from_results(&results);

        assert_eq!(summary.sessions, 4);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.completion_rate, 0.5);
        assert_eq!(summary.mean_owned, 13.0 / 4.0);
        let dist = summary.spins_to_complete.unwrap();
        assert_eq!(dist.min, 10);
        assert_eq!(dist.max, 20);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = Summary::from_results(&[]);
        assert_eq!(summary.sessions, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert!(summary.spins_to_complete.is_none());
    }
}
