//! One-shot subcommands for scripting, with optional JSON output.

use anyhow::Result;
use serde::Serialize;

use super::render;
use super::view::{CriterionView, RestaurantListItem, RestaurantView};
use crate::state::AppState;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn list(state: &AppState, json: bool) -> Result<()> {
    let restaurants = state.restaurants.list_all().await?;
    let items: Vec<RestaurantListItem> = restaurants.iter().map(RestaurantListItem::from).collect();

    if json {
        return print_json(&items);
    }

    render::title(&format!("{} restaurant(s)", state.restaurants.count().await?));
    render::restaurant_list(&items);
    Ok(())
}

pub async fn show(state: &AppState, id: i64, json: bool) -> Result<()> {
    let restaurant = state.restaurants.get(id).await?;
    let summary = state.evaluations.summary(id).await?;
    let view = RestaurantView::new(&restaurant, summary);

    if json {
        return print_json(&view);
    }

    render::restaurant_detail(&view);
    println!();
    for (name, average) in &view.criterion_averages {
        render::criterion_line(name, Some(*average));
    }
    render::overall_line(view.overall_average);
    println!();
    render::reviews(&view);
    Ok(())
}

pub async fn criteria(state: &AppState, json: bool) -> Result<()> {
    let criteria = state.catalog.list_criteria().await?;
    let items: Vec<CriterionView> = criteria.iter().map(CriterionView::from).collect();

    if json {
        return print_json(&items);
    }

    render::title("Evaluation criteria");
    render::criteria(&items);
    Ok(())
}
