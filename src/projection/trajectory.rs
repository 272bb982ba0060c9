//! Age-indexed balance series for charting

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One sample of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub age: u32,
    pub value: f64,
}

impl DataPoint {
    pub fn new(age: u32, value: f64) -> Self {
        Self { age, value }
    }
}

/// Points recorded in projection order; phase boundaries may repeat an age
#[derive(Debug, Clone, Default)]
pub struct TrajectoryBuilder {
    points: Vec<DataPoint>,
}

impl TrajectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, age: u32, value: f64) {
        self.points.push(DataPoint::new(age, value));
    }

    /// Age of the most recently recorded point
    pub fn last_age(&self) -> Option<u32> {
        self.points.last().map(|p| p.age)
    }

    /// Consolidate into canonical form
    ///
    /// Keeps the last value written for each age, sorts ascending by age and
    /// replaces non-finite values with 0.
    pub fn consolidate(self) -> Trajectory {
        let mut by_age = BTreeMap::new();
        for point in self.points {
            by_age.insert(point.age, point.value);
        }

        Trajectory {
            points: by_age
                .into_iter()
                .map(|(age, value)| DataPoint::new(age, if value.is_finite() { value } else { 0.0 }))
                .collect(),
        }
    }
}

/// Consolidated series: strictly increasing ages, one point per age
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    points: Vec<DataPoint>,
}

impl Trajectory {
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DataPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DataPoint> {
        self.points.last()
    }

    /// Value recorded at exactly `age`, if any
    pub fn value_at(&self, age: u32) -> Option<f64> {
        self.points
            .binary_search_by_key(&age, |p| p.age)
            .ok()
            .map(|idx| self.points[idx].value)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
