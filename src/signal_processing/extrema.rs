/// A local extremum of a filtered signal: sample index plus amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    /// Sample index in the filtered signal
    pub index: usize,
    /// Amplitude at that index
    pub value: f64,
}

/// Find all strict local maxima in a buffer
///
/// Returns ascending sample indices where the sample is strictly greater
/// than both neighbours. Endpoints are never reported; plateaus do not
/// qualify. No prominence or spacing filtering is applied.
pub fn find_local_maxima(buffer: &[f64]) -> Vec<usize> {
    buffer
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            if w[1] > w[0] && w[1] > w[2] {
                Some(i + 1)
            } else {
                None
            }
        })
        .collect()
}

/// Find all strict local minima in a buffer
///
/// Mirror of [`find_local_maxima`] with the comparisons reversed.
pub fn find_local_minima(buffer: &[f64]) -> Vec<usize> {
    buffer
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            if w[1] < w[0] && w[1] < w[2] {
                Some(i + 1)
            } else {
                None
            }
        })
        .collect()
}

/// Merge maxima and minima index lists into one sequence sorted by index.
///
/// Both inputs are ascending and disjoint (a sample cannot be a strict
/// maximum and minimum at once), so this is a plain two-way merge.
pub fn merge_extrema(buffer: &[f64], maxima: &[usize], minima: &[usize]) -> Vec<Extremum> {
    let mut merged = Vec::with_capacity(maxima.len() + minima.len());
    let (mut a, mut b) = (0, 0);

    while a < maxima.len() || b < minima.len() {
        let take_max = match (maxima.get(a), minima.get(b)) {
            (Some(&m), Some(&n)) => m < n,
            (Some(_), None) => true,
            _ => false,
        };
        let index = if take_max {
            a += 1;
            maxima[a - 1]
        } else {
            b += 1;
            minima[b - 1]
        };
        merged.push(Extremum {
            index,
            value: buffer[index],
        });
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maxima_and_minima_on_triangle_wave() {
        let signal = vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0];

        assert_eq!(find_local_maxima(&signal), vec![1, 5]);
        assert_eq!(find_local_minima(&signal), vec![3, 7]);
    }

    #[test]
    fn test_plateau_is_not_strict() {
        let signal = vec![0.0, 1.0, 1.0, 0.0];
        assert!(find_local_maxima(&signal).is_empty());
    }

    #[test]
    fn test_endpoints_never_qualify() {
        let signal = vec![2.0, 1.0, 2.0];
        assert!(find_local_maxima(&signal).is_empty());
        assert_eq!(find_local_minima(&signal), vec![1]);
    }

    #[test]
    fn test_flat_signal_has_no_extrema() {
        let signal = vec![0.5; 64];
        assert!(find_local_maxima(&signal).is_empty());
        assert!(find_local_minima(&signal).is_empty());
    }

    #[test]
    fn test_short_buffers() {
        assert!(find_local_maxima(&[]).is_empty());
        assert!(find_local_maxima(&[1.0]).is_empty());
        assert!(find_local_maxima(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_merge_alternates_by_index() {
        let signal = vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0];
        let maxima = find_local_maxima(&signal);
        let minima = find_local_minima(&signal);

        let merged = merge_extrema(&signal, &maxima, &minima);
        let indices: Vec<usize> = merged.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 3, 5]);
        assert_eq!(merged[1].value, -1.0);
    }
}
