/// Turns a row of scores into a hard one-hot row.
///
/// Every entry equal to the maximum becomes 1.0 and the rest 0.0, so ties
/// produce several ones. An empty row stays empty.
pub fn as_onehot(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .map(|&s| if s == max { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_onehot() {
        assert_eq!(as_onehot(&[0.1, 0.7, 0.2]), vec![0.0, 1.0, 0.0]);
        assert_eq!(as_onehot(&[-3.0, -1.0]), vec![0.0, 1.0]);
        assert!(as_onehot(&[]).is_empty());
    }

    #[test]
    fn test_as_onehot_keeps_ties() {
        assert_eq!(as_onehot(&[0.5, 0.5, 0.0]), vec![1.0, 1.0, 0.0]);
    }
}
