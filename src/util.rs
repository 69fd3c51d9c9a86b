use std::time::Duration;

pub fn mean_secs(data: &[Duration]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => {
            let total: f64 = data.iter().map(Duration::as_secs_f64).sum();
            Some(total / count as f64)
        }
    }
}

/// Population standard deviation in seconds
pub fn std_dev_secs(data: &[Duration]) -> Option<f64> {
    let data_mean = mean_secs(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - value.as_secs_f64();

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(values: &[f64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_secs_f64).collect()
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean_secs(&secs(&[1.0, 2.0, 3.0])), Some(2.0));
        assert_eq!(mean_secs(&secs(&[0.5, 1.5])), Some(1.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean_secs(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        let data = secs(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let result = std_dev_secs(&data).unwrap();
        assert!((result - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev_secs(&secs(&[1.25])), Some(0.0));
    }

    #[test]
    fn test_std_dev_empty_slice() {
        assert_eq!(std_dev_secs(&[]), None);
    }
}
