//! Quantity steppers: `-`/`+` buttons around a numeric input.
//!
//! INVARIANTS
//! ==========
//! A value written by the stepper is always within `[1, max]`. An input whose
//! current text is not a number is left untouched.

use std::rc::Rc;

use super::Binding;
use crate::dom::{Dom, EventKind, Target};
use crate::env::Env;

#[cfg(test)]
#[path = "quantity_test.rs"]
mod quantity_test;

pub const SELECTOR: &str = ".quantity-selector";
pub const DECREASE_SELECTOR: &str = ".decrease-quantity";
pub const INCREASE_SELECTOR: &str = ".increase-quantity";
pub const INPUT_SELECTOR: &str = ".quantity-input";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Decrease,
    Increase,
}

/// Clamp bounds for one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityStepper {
    max: u32,
}

impl QuantityStepper {
    /// `max` below 1 is raised to 1 so the range is never empty.
    #[must_use]
    pub fn new(max: u32) -> Self {
        Self { max: max.max(1) }
    }

    /// Bounds from the input's `max` attribute, `default_max` when absent or
    /// not a number.
    #[must_use]
    pub fn from_attribute(max_attr: Option<&str>, default_max: u32) -> Self {
        let max = max_attr.and_then(parse_integer).unwrap_or(i64::from(default_max));
        Self::new(u32::try_from(max).unwrap_or(if max < 0 { 1 } else { u32::MAX }))
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Value after one step from `current`, or `None` when nothing changes.
    #[must_use]
    pub fn step(&self, current: &str, step: Step) -> Option<u32> {
        let current = parse_integer(current)?;
        let moved = match step {
            Step::Decrease => current.saturating_sub(1),
            Step::Increase => current.saturating_add(1),
        };
        let next = moved.clamp(1, i64::from(self.max));
        (next != current).then(|| u32::try_from(next).unwrap_or(self.max))
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn bind_button<D: Dom + 'static>(env: &Env<D>, button: &D::Node, input: &D::Node, step: Step) -> crate::dom::Listener {
    let dom = Rc::clone(&env.dom);
    let input = input.clone();
    let default_max = env.config.max_quantity;
    env.dom.listen(
        Target::Node(button),
        EventKind::Click,
        Box::new(move |_| {
            let stepper = QuantityStepper::from_attribute(dom.attribute(&input, "max").as_deref(), default_max);
            if let Some(next) = stepper.step(&dom.value(&input), step) {
                dom.set_value(&input, &next.to_string());
            }
        }),
    )
}

pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    let mut listeners = Vec::new();
    for selector in env.dom.query_all(SELECTOR) {
        let parts = (
            env.dom.query_in(&selector, DECREASE_SELECTOR),
            env.dom.query_in(&selector, INCREASE_SELECTOR),
            env.dom.query_in(&selector, INPUT_SELECTOR),
        );
        let (Some(decrease), Some(increase), Some(input)) = parts else {
            log::debug!("quantity selector missing a part; skipped");
            continue;
        };
        listeners.push(bind_button(env, &decrease, &input, Step::Decrease));
        listeners.push(bind_button(env, &increase, &input, Step::Increase));
    }
    Binding::new("quantity", listeners)
}
