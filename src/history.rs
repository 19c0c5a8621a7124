use std::collections::VecDeque;

/// Costs recorded after each epoch, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostHistory {
    costs: VecDeque<f32>,
}

impl CostHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            costs: VecDeque::with_capacity(capacity),
        }
    }

    /// Prepend a cost; it becomes [`CostHistory::latest`].
    #[inline]
    pub fn record(&mut self, cost: f32) {
        self.costs.push_front(cost);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Cost at `idx`, where `0` is the most recent epoch.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<f32> {
        self.costs.get(idx).copied()
    }

    #[inline]
    pub fn latest(&self) -> Option<f32> {
        self.get(0)
    }

    #[inline]
    pub fn previous(&self) -> Option<f32> {
        self.get(1)
    }

    /// Costs, most recent first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f32> + '_ {
        self.costs.iter().copied()
    }

    /// Costs in the order they were recorded (first epoch first), e.g. for plotting.
    pub fn chronological(&self) -> impl Iterator<Item = f32> + '_ {
        self.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prepends() {
        let mut h = CostHistory::new();
        h.record(3.0);
        h.record(2.0);
        h.record(1.0);
        assert_eq!(h.len(), 3);
        assert_eq!(h.latest(), Some(1.0));
        assert_eq!(h.previous(), Some(2.0));
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        assert_eq!(h.chronological().collect::<Vec<_>>(), vec![3.0, 2.0, 1.0]);
    }
}
