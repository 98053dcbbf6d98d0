//! Colored text output for the console.

use colored::*;

use super::view::{CriterionView, RestaurantListItem, RestaurantView};
use crate::error::AppError;

pub fn title(text: &str) {
    println!();
    println!("{}", text.bright_blue().bold());
    println!("  {}", "─".repeat(60).bright_black());
}

pub fn success(text: &str) {
    println!("{}", format!("✔ {text}").green());
}

pub fn notice(text: &str) {
    println!("{}", text.yellow());
}

/// Prints numbered menu entries. Entry 0 is listed last, as the way out.
pub fn menu(entries: &[&str]) {
    println!();
    for (index, entry) in entries.iter().enumerate().skip(1) {
        println!("  {} {}", format!("{index}.").cyan(), entry);
    }
    if let Some(exit) = entries.first() {
        println!("  {} {}", "0.".cyan(), exit);
    }
}

pub fn restaurant_list(items: &[RestaurantListItem]) {
    if items.is_empty() {
        notice("  No restaurant found");
        return;
    }

    for (position, item) in items.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            format!("{}.", position + 1).cyan(),
            item.name.bright_white().bold(),
            format!("({})", item.restaurant_type).bright_black(),
            item.city.cyan()
        );
    }
}

fn stars(average: f64) -> String {
    let full = average.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// Per-criterion line: the average, or a marker when nobody graded it.
pub fn criterion_line(name: &str, average: Option<f64>) {
    match average {
        Some(avg) => println!(
            "    {:<12} {} {}",
            name,
            stars(avg).yellow(),
            format!("{avg:.2}").bright_white()
        ),
        None => println!("    {:<12} {}", name, "no grades yet".bright_black()),
    }
}

pub fn restaurant_detail(view: &RestaurantView) {
    title(&view.name);

    if let Some(description) = &view.description {
        println!("  {description}");
    }
    if let Some(website) = &view.website {
        println!("  {}", website.underline());
    }
    println!("  {}, {}", view.street, view.city);
    println!("  Type: {}", view.restaurant_type.cyan());
    println!();
    println!(
        "  {} {}   {} {}   {} {}",
        "Likes:".bright_white(),
        view.likes.to_string().green(),
        "Dislikes:".bright_white(),
        view.dislikes.to_string().red(),
        "Reviews:".bright_white(),
        view.reviews
    );
}

pub fn overall_line(average: Option<f64>) {
    match average {
        Some(avg) => println!(
            "  {} {} {}",
            "Overall:".bright_white().bold(),
            stars(avg).yellow(),
            format!("{avg:.2}").bright_white().bold()
        ),
        None => println!(
            "  {} {}",
            "Overall:".bright_white().bold(),
            "no grades yet".bright_black()
        ),
    }
}

pub fn reviews(view: &RestaurantView) {
    for review in &view.review_details {
        let grades: Vec<String> = review
            .grades
            .iter()
            .map(|(name, score)| format!("{name} {score}"))
            .collect();
        println!(
            "  {} {} {}",
            review.username.bright_white(),
            review.visited_at.format("%Y-%m-%d").to_string().bright_black(),
            grades.join(", ").yellow()
        );
        if !review.comment.is_empty() {
            println!("    \"{}\"", review.comment);
        }
    }
}

pub fn criteria(items: &[CriterionView]) {
    for item in items {
        println!(
            "  {} {}",
            item.name.bright_white().bold(),
            item.description.as_deref().unwrap_or("").bright_black()
        );
    }
}

/// Reports a failed action. Storage failures are shown generically.
pub fn error(err: &AppError) {
    if err.is_recoverable() {
        println!("{}", format!("✘ {err}").yellow());
    } else {
        println!(
            "{}",
            "✘ The operation failed because of a storage error. Nothing was saved.".red()
        );
    }
}
