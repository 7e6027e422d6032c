use std::{
    fmt,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::Serialize;

/// The weight of an edge or the length of a route. Always strictly positive for edges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cost(u64);

impl Cost {
    pub fn new(cost: u64) -> Self {
        Cost(cost)
    }

    pub fn max() -> Self {
        Cost(u64::MAX)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn as_float(&self) -> f64 {
        self.0 as f64
    }

    /// Signed difference `self - other`, used for the change of a route length under a move.
    pub fn delta(self, other: Cost) -> i64 {
        self.0 as i64 - other.0 as i64
    }

    pub fn saturating_add(self, rhs: Cost) -> Self {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Add for Cost {
    type Output = Self;
    fn add(self, rhs: Cost) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl Sum<Cost> for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::new(0), |a, b| Cost::new(a.0 + b.0))
    }
}

impl<'a> Sum<&'a Cost> for Cost {
    fn sum<I: Iterator<Item = &'a Cost>>(iter: I) -> Self {
        iter.fold(Cost::new(0), |a, b| Cost::new(a.0 + b.0))
    }
}

impl Sub for Cost {
    type Output = Self;
    fn sub(self, rhs: Cost) -> Self::Output {
        Cost(self.0 - rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = Cost(self.0 + rhs.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Cost {
    fn from(cost: u64) -> Self {
        Cost::new(cost)
    }
}

#[cfg(test)]
mod test_cost {
    use super::*;

    #[test]
    fn test_sum_and_delta() {
        let costs: Vec<Cost> = vec![3.into(), 4.into(), 5.into()];
        let total: Cost = costs.iter().sum();
        assert_eq!(total, 12.into());
        assert_eq!(Cost::new(3).delta(Cost::new(7)), -4);
        assert_eq!(Cost::max().saturating_add(1.into()), Cost::max());
    }
}
