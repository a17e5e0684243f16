use serde::Serialize;

use crate::models::TestResult;

fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Aggregate view over a page of results, as shown by `sakhatype results --summary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub tests: usize,
    pub mean_wpm: f64,
    pub best_wpm: f64,
    pub mean_accuracy: f64,
    pub wpm_std_dev: f64,
}

impl ResultSummary {
    pub fn from_results(results: &[TestResult]) -> Option<Self> {
        let wpm: Vec<f64> = results.iter().map(|r| r.wpm).collect();
        let accuracy: Vec<f64> = results.iter().map(|r| r.accuracy).collect();

        Some(Self {
            tests: results.len(),
            mean_wpm: mean(&wpm)?,
            best_wpm: wpm.iter().copied().fold(f64::MIN, f64::max),
            mean_accuracy: mean(&accuracy)?,
            wpm_std_dev: std_dev(&wpm)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(wpm: f64, accuracy: f64) -> TestResult {
        TestResult {
            id: 1,
            username: "alice".into(),
            wpm,
            raw_wpm: wpm,
            accuracy,
            burst_wpm: wpm,
            total_errors: 0,
            time_mode: 30,
            test_duration: 30,
            consistency: 80.0,
            created_at: "2024-05-01T10:00:00".into(),
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(
            std_dev(&[100., 120., 90., 102., 94.]),
            Some(10.322790320451151)
        );
        assert_eq!(std_dev(&[42.0]), Some(0.0));
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn summary_of_empty_page_is_none() {
        assert_eq!(ResultSummary::from_results(&[]), None);
    }

    #[test]
    fn summary_over_results() {
        let summary =
            ResultSummary::from_results(&[result(60.0, 90.0), result(80.0, 100.0)]).unwrap();
        assert_eq!(summary.tests, 2);
        assert_eq!(summary.mean_wpm, 70.0);
        assert_eq!(summary.best_wpm, 80.0);
        assert_eq!(summary.mean_accuracy, 95.0);
        assert_eq!(summary.wpm_std_dev, 10.0);
    }
}
