//! Milestone tracking for the extracom purchase-value total

use serde::{Deserialize, Serialize};

use crate::coerce::float_prefix;
use crate::error::{Error, Result};

/// Ascending list of monetary targets
///
/// Stored as a plain JSON array; loading re-sorts it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Milestones(Vec<f64>);

impl From<Vec<f64>> for Milestones {
    fn from(thresholds: Vec<f64>) -> Self {
        Self::new(thresholds)
    }
}

impl From<Milestones> for Vec<f64> {
    fn from(milestones: Milestones) -> Self {
        milestones.0
    }
}

impl Milestones {
    pub fn new(mut thresholds: Vec<f64>) -> Self {
        thresholds.sort_by(f64::total_cmp);
        Self(thresholds)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse and insert a target, keeping the list sorted
    ///
    /// Thousands separators are ignored. The target must be a finite
    /// number greater than zero.
    pub fn add(&mut self, input: &str) -> Result<f64> {
        let goal = float_prefix(&input.trim().replace(',', ""))
            .filter(|g| *g > 0.0)
            .ok_or_else(|| Error::InvalidData(format!("Invalid goal amount: {}", input)))?;
        self.0.push(goal);
        self.0.sort_by(f64::total_cmp);
        Ok(goal)
    }

    /// Remove the target at `index`; `None` when out of range
    pub fn remove(&mut self, index: usize) -> Option<f64> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }
}

/// Position of a running total within the milestone list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current: f64,
    pub active_goal: f64,
    pub active_goal_index: usize,
    pub previous_goal: f64,
    pub total_goals: usize,
    pub remaining: f64,
    /// Progress within the active milestone, 0..=100
    pub percentage: f64,
    pub is_complete: bool,
    pub all_goals_achieved: bool,
}

/// `None` when there are no milestones
///
/// The active milestone is the first one above `current`, or the last one
/// once everything is reached.
pub fn goal_progress(milestones: &Milestones, current: f64) -> Option<GoalProgress> {
    let goals = milestones.as_slice();
    let last = *goals.last()?;

    let active_goal_index = goals
        .iter()
        .position(|g| current < *g)
        .unwrap_or(goals.len() - 1);
    let active_goal = goals[active_goal_index];
    let previous_goal = if active_goal_index > 0 {
        goals[active_goal_index - 1]
    } else {
        0.0
    };

    let range = active_goal - previous_goal;
    let percentage = if range > 0.0 {
        ((current - previous_goal) / range * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };

    Some(GoalProgress {
        current,
        active_goal,
        active_goal_index,
        previous_goal,
        total_goals: goals.len(),
        remaining: (active_goal - current).max(0.0),
        percentage,
        is_complete: current >= active_goal,
        all_goals_achieved: current >= last,
    })
}
