//! Combination indexing: a fixed bijection between a linear index and the
//! per-axis indices of the Cartesian product X x Y x Z.
//!
//! The ordering is X fastest, then Y, then Z. The accumulation buffer relies
//! on receiving images in this same order.

use log::{debug, warn};

/// One resolved point of the sweep. `is_empty` marks the defined
/// zero-combination case (X or Y parsed to nothing); callers never see an
/// error for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub x_value: String,
    pub y_value: String,
    pub z_value: String,
    pub x_index: usize,
    pub y_index: usize,
    pub z_index: usize,
    pub linear_index: usize,
    pub total: usize,
    pub is_empty: bool,
}

impl Combination {
    fn empty() -> Self {
        Self {
            x_value: String::new(),
            y_value: String::new(),
            z_value: String::new(),
            x_index: 0,
            y_index: 0,
            z_index: 0,
            linear_index: 0,
            total: 0,
            is_empty: true,
        }
    }

    pub fn summary(&self) -> String {
        if self.is_empty {
            return "No combinations".to_owned();
        }
        format!(
            "Combination {}/{}: X={}, Y={}, Z={}",
            self.linear_index + 1,
            self.total,
            self.x_value,
            self.y_value,
            self.z_value
        )
    }
}

pub fn combination_count(x: &[String], y: &[String], z: &[String]) -> usize {
    x.len() * y.len() * z.len()
}

/// Resolves the combination at `index`, wrapping modulo the total so a caller
/// can drive an ever-incrementing counter without tracking the total itself.
pub fn combination_at(x: &[String], y: &[String], z: &[String], index: usize) -> Combination {
    let total = combination_count(x, y, z);
    if total == 0 {
        return Combination::empty();
    }

    let linear = index % total;
    let x_index = linear % x.len();
    let y_index = (linear / x.len()) % y.len();
    let z_index = linear / (x.len() * y.len());

    let combination = Combination {
        x_value: x[x_index].clone(),
        y_value: y[y_index].clone(),
        z_value: z[z_index].clone(),
        x_index,
        y_index,
        z_index,
        linear_index: linear,
        total,
        is_empty: false,
    };
    debug!("{}", combination.summary());
    combination
}

/// Enumerates every (x, y, z) value triple in linear-index order.
pub fn all_combinations(x: &[String], y: &[String], z: &[String]) -> Vec<(String, String, String)> {
    let mut combinations = Vec::with_capacity(combination_count(x, y, z));
    for z_value in z {
        for y_value in y {
            for x_value in x {
                combinations.push((x_value.clone(), y_value.clone(), z_value.clone()));
            }
        }
    }
    combinations
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutput {
    pub current_index: usize,
    /// True exactly when the returned index is the last combination.
    pub is_complete: bool,
}

/// Drives a sweep one combination per call, wrapping back to 0 after the
/// final index so repeated runs restart cleanly.
#[derive(Debug, Default)]
pub struct StepIterator {
    current: usize,
}

impl StepIterator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, total: usize, reset: bool) -> StepOutput {
        if reset {
            self.current = 0;
        }

        let current_index = self.current;
        let is_complete = current_index + 1 >= total;
        self.current = if is_complete { 0 } else { current_index + 1 };

        debug!(
            "iterator at {}/{}, complete: {}",
            current_index,
            total.saturating_sub(1),
            is_complete
        );
        StepOutput {
            current_index,
            is_complete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Float,
}

/// Coerces an axis label to a number. Parse failure is recovered locally with
/// a zero fallback and a warning; it never propagates.
pub fn string_to_number(text: &str, kind: NumberKind) -> (i64, f64) {
    match text.trim().parse::<f64>() {
        Ok(value) => {
            let int_value = value.trunc() as i64;
            match kind {
                NumberKind::Int => (int_value, int_value as f64),
                NumberKind::Float => (int_value, value),
            }
        }
        Err(_) => {
            warn!("could not convert '{text}' to a number, returning 0");
            (0, 0.0)
        }
    }
}
