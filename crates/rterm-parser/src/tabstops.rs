//! Tab-stop tracking (§4.6), one `bool` per column rather than an
//! unbounded list, since stops never exceed the terminal width.

#[derive(Debug, Clone)]
pub struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    /// Builds the default ladder: a stop every 8 columns.
    #[must_use]
    pub fn new(width: usize) -> TabStops {
        let mut stops = vec![false; width];
        for col in (0..width).step_by(8) {
            stops[col] = true;
        }
        TabStops { stops }
    }

    pub fn resize(&mut self, width: usize) {
        self.stops.resize(width, false);
    }

    /// HTS: sets a stop at `col`.
    pub fn set(&mut self, col: usize) {
        if let Some(slot) = self.stops.get_mut(col) {
            *slot = true;
        }
    }

    /// TBC 0: clears the stop at `col`.
    pub fn clear(&mut self, col: usize) {
        if let Some(slot) = self.stops.get_mut(col) {
            *slot = false;
        }
    }

    /// TBC 3: clears every stop.
    pub fn clear_all(&mut self) {
        self.stops.fill(false);
    }

    /// Next stop strictly after `col`, or the right edge if none remain.
    #[must_use]
    pub fn next_after(&self, col: usize) -> usize {
        let width = self.stops.len();
        ((col + 1)..width)
            .find(|&c| self.stops[c])
            .unwrap_or(width.saturating_sub(1))
    }

    /// Walks back through up to `n` stops strictly before `col`
    /// (CBT), stopping at column 0 if exhausted first.
    #[must_use]
    pub fn back_by(&self, col: usize, n: usize) -> usize {
        let mut pos = col;
        for _ in 0..n {
            match (0..pos).rev().find(|&c| self.stops[c]) {
                Some(c) => pos = c,
                None => return 0,
            }
        }
        pos
    }

    #[must_use]
    pub fn is_set(&self, col: usize) -> bool {
        self.stops.get(col).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder_is_every_eight_columns() {
        let stops = TabStops::new(80);
        for col in [0, 8, 16, 24, 32, 40, 48, 56, 64, 72] {
            assert!(stops.is_set(col), "expected stop at {col}");
        }
        assert!(!stops.is_set(5));
    }

    #[test]
    fn hts_then_tbc0_round_trips() {
        let mut stops = TabStops::new(80);
        stops.set(5);
        assert!(stops.is_set(5));
        stops.clear(5);
        assert!(!stops.is_set(5));
    }

    #[test]
    fn next_after_skips_to_smallest_greater_stop() {
        let stops = TabStops::new(80);
        assert_eq!(stops.next_after(5), 8);
        assert_eq!(stops.next_after(8), 16);
    }

    #[test]
    fn next_after_last_stop_goes_to_right_edge() {
        let stops = TabStops::new(80);
        assert_eq!(stops.next_after(79), 79);
    }

    #[test]
    fn cbt_walks_back_n_stops() {
        let stops = TabStops::new(80);
        assert_eq!(stops.back_by(40, 2), 24);
    }
}
