//! Line-oriented prompts. Invalid input re-prompts instead of failing.

use anyhow::Result;
use dialoguer::{Confirm, Input};

use crate::domain::entities::{MAX_SCORE, MIN_SCORE};
use crate::utils::text::non_blank;

/// Reads a menu choice in `0..=max`. Non-numeric input is asked again.
pub fn choice(max: usize) -> Result<usize> {
    let choice = Input::<usize>::new()
        .with_prompt("Your choice")
        .validate_with(move |value: &usize| -> Result<(), String> {
            if *value <= max {
                Ok(())
            } else {
                Err(format!("Please enter a number between 0 and {max}"))
            }
        })
        .interact_text()?;
    Ok(choice)
}

/// Free text, possibly empty, trimmed.
pub fn text(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Free text pre-filled with the current value.
pub fn text_with_default(prompt: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Free text where a blank answer means "none".
pub fn optional(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let value = match current {
        Some(current) => text_with_default(prompt, current)?,
        None => text(prompt)?,
    };
    Ok(non_blank(Some(value)))
}

/// Text that must not be blank.
pub fn required(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|value: &String| -> Result<(), &'static str> {
            if value.trim().is_empty() {
                Err("This field is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// A grade between the minimum and maximum score.
pub fn score(criterion: &str) -> Result<i64> {
    let score = Input::<i64>::new()
        .with_prompt(format!("{criterion} ({MIN_SCORE}-{MAX_SCORE})"))
        .validate_with(|value: &i64| -> Result<(), String> {
            if (MIN_SCORE..=MAX_SCORE).contains(value) {
                Ok(())
            } else {
                Err(format!("Please enter a grade between {MIN_SCORE} and {MAX_SCORE}"))
            }
        })
        .interact_text()?;
    Ok(score)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
