//! Interactive numbered menu.
//!
//! Each action runs to completion or fails with an [`AppError`], which is
//! reported before the loop continues. Only terminal I/O failures end the loop.

use anyhow::Result;
use std::future::Future;

use super::view::{RestaurantListItem, RestaurantView};
use super::{prompt, render};
use crate::domain::entities::{City, Restaurant, RestaurantType};
use crate::error::AppError;
use crate::state::AppState;

const NEW_ENTRY: &str = "NEW";

const MAIN_MENU: &[&str] = &[
    "Quit",
    "List all restaurants",
    "Search restaurants by name",
    "Search restaurants by city",
    "Search restaurants by type",
    "Add a restaurant",
];

const RESTAURANT_MENU: &[&str] = &[
    "Back to the main menu",
    "I like this restaurant",
    "I don't like this restaurant",
    "Write a review",
    "Edit name, description and website",
    "Edit address",
    "Edit type",
    "Delete this restaurant",
];

/// Outcome of an action in the restaurant menu.
enum Next {
    Stay,
    Leave,
}

/// Runs `action`, reporting a domain or storage error instead of propagating it.
async fn attempt<T, F>(action: F) -> Result<Option<T>>
where
    F: Future<Output = Result<T>>,
{
    match action.await {
        Ok(value) => Ok(Some(value)),
        Err(err) => match err.downcast::<AppError>() {
            Ok(app_err) => {
                tracing::warn!(code = app_err.code(), error = %app_err, "Action failed");
                render::error(&app_err);
                Ok(None)
            }
            Err(other) => Err(other),
        },
    }
}

/// Runs the main menu until the user quits.
pub async fn run(state: &AppState) -> Result<()> {
    render::title("GuideResto");

    loop {
        render::menu(MAIN_MENU);
        let choice = prompt::choice(MAIN_MENU.len() - 1)?;

        match choice {
            0 => break,
            1 => {
                attempt(list_all(state)).await?;
            }
            2 => {
                attempt(search_by_name(state)).await?;
            }
            3 => {
                attempt(search_by_city(state)).await?;
            }
            4 => {
                attempt(search_by_type(state)).await?;
            }
            5 => {
                attempt(create_restaurant(state)).await?;
            }
            _ => render::notice("Unknown choice"),
        }
    }

    render::notice("Goodbye!");
    Ok(())
}

async fn list_all(state: &AppState) -> Result<()> {
    render::title("All restaurants");
    let restaurants = state.restaurants.list_all().await?;
    select_restaurant(state, &restaurants).await
}

async fn search_by_name(state: &AppState) -> Result<()> {
    let fragment = prompt::text("Part of the restaurant name")?;
    let restaurants = state.restaurants.search_by_name(&fragment).await?;

    render::title(&format!("Restaurants matching \"{fragment}\""));
    select_restaurant(state, &restaurants).await
}

async fn search_by_city(state: &AppState) -> Result<()> {
    let fragment = prompt::text("Part of the city name")?;
    let cities = state.catalog.search_cities(&fragment).await?;

    let mut restaurants = Vec::new();
    for city in cities.iter().filter_map(|c| c.id) {
        restaurants.extend(state.restaurants.list_by_city(city).await?);
    }

    render::title(&format!("Restaurants in cities matching \"{fragment}\""));
    select_restaurant(state, &restaurants).await
}

async fn search_by_type(state: &AppState) -> Result<()> {
    let Some(restaurant_type) = choose_type(state, false).await? else {
        return Ok(());
    };
    let Some(type_id) = restaurant_type.id else {
        return Ok(());
    };

    let restaurants = state.restaurants.list_by_type(type_id).await?;

    render::title(&format!("Restaurants of type {}", restaurant_type.label));
    select_restaurant(state, &restaurants).await
}

/// Shows a numbered listing and opens the restaurant picked by position.
async fn select_restaurant(state: &AppState, restaurants: &[Restaurant]) -> Result<()> {
    let items: Vec<RestaurantListItem> = restaurants.iter().map(RestaurantListItem::from).collect();
    render::restaurant_list(&items);
    if items.is_empty() {
        return Ok(());
    }

    println!();
    render::notice("Number of the restaurant to open, 0 to go back");
    let choice = prompt::choice(items.len())?;

    match restaurant_at(restaurants, choice) {
        Some(id) => restaurant_menu(state, id).await,
        None => Ok(()),
    }
}

/// Id of the restaurant listed at 1-based `position`.
fn restaurant_at(restaurants: &[Restaurant], position: usize) -> Option<i64> {
    position
        .checked_sub(1)
        .and_then(|index| restaurants.get(index))
        .and_then(|restaurant| restaurant.id)
}

async fn create_restaurant(state: &AppState) -> Result<()> {
    render::title("New restaurant");

    let name = prompt::required("Name")?;
    let description = prompt::optional("Description", None)?;
    let website = prompt::optional("Website", None)?;
    let street = prompt::text("Street")?;

    let Some(City { id: Some(city_id), .. }) = choose_city(state).await? else {
        render::notice("Cancelled");
        return Ok(());
    };
    let Some(RestaurantType { id: Some(type_id), .. }) = choose_type(state, true).await? else {
        render::notice("Cancelled");
        return Ok(());
    };

    let restaurant = state
        .restaurants
        .create(name, description, website, street, city_id, type_id)
        .await?;

    render::success(&format!("Restaurant \"{}\" created", restaurant.name));
    match restaurant.id {
        Some(id) => restaurant_menu(state, id).await,
        None => Ok(()),
    }
}

/// Lets the user pick a city by zip code or exact name, or create one inline.
async fn choose_city(state: &AppState) -> Result<Option<City>> {
    render::title("Cities");
    for city in state.catalog.list_cities().await? {
        println!("  {}", city.display_name());
    }

    loop {
        let input = prompt::text(&format!(
            "Zip code or name of the city, {NEW_ENTRY} to add one (Enter to cancel)"
        ))?;

        if input.is_empty() {
            return Ok(None);
        }
        if input.eq_ignore_ascii_case(NEW_ENTRY) {
            let zip_code = prompt::required("Zip code")?;
            let name = prompt::required("City name")?;
            return Ok(Some(state.catalog.create_city(zip_code, name).await?));
        }
        if let Some(city) = state.catalog.find_city_by_zip_code(&input).await? {
            return Ok(Some(city));
        }
        if let Some(city) = state.catalog.find_city_by_name(&input).await? {
            return Ok(Some(city));
        }

        render::notice(&format!("No city with zip code or name \"{input}\""));
    }
}

/// Lets the user pick a type by label, optionally creating one inline.
async fn choose_type(state: &AppState, allow_new: bool) -> Result<Option<RestaurantType>> {
    render::title("Restaurant types");
    for restaurant_type in state.catalog.list_types().await? {
        match &restaurant_type.description {
            Some(description) => println!("  {} - {}", restaurant_type.label, description),
            None => println!("  {}", restaurant_type.label),
        }
    }

    let hint = if allow_new {
        format!("Type label, {NEW_ENTRY} to add one (Enter to cancel)")
    } else {
        "Type label (Enter to cancel)".to_string()
    };

    loop {
        let input = prompt::text(&hint)?;

        if input.is_empty() {
            return Ok(None);
        }
        if allow_new && input.eq_ignore_ascii_case(NEW_ENTRY) {
            let label = prompt::required("Label")?;
            let description = prompt::optional("Description", None)?;
            return Ok(Some(state.catalog.create_type(label, description).await?));
        }
        if let Some(found) = state.catalog.find_type_by_label(&input).await? {
            return Ok(Some(found));
        }

        let suggestions = state.catalog.search_types(&input).await?;
        match suggestions.as_slice() {
            [] => render::notice(&format!("No type is labelled \"{input}\"")),
            _ => {
                let labels: Vec<&str> = suggestions.iter().map(|t| t.label.as_str()).collect();
                render::notice(&format!("Did you mean: {}?", labels.join(", ")));
            }
        }
    }
}

async fn show_restaurant(state: &AppState, id: i64) -> Result<()> {
    let restaurant = state.restaurants.get(id).await?;
    let summary = state.evaluations.summary(id).await?;
    let view = RestaurantView::new(&restaurant, summary);

    render::restaurant_detail(&view);

    if state.evaluations.has_evaluations(id).await? {
        println!();
        for criterion in state.catalog.list_criteria().await? {
            let average = if state
                .evaluations
                .criterion_has_grades(id, &criterion.name)
                .await?
            {
                Some(
                    state
                        .evaluations
                        .average_grade_for_criterion(id, &criterion.name)
                        .await?,
                )
            } else {
                None
            };
            render::criterion_line(&criterion.name, average);
        }
        render::overall_line(view.overall_average);
        println!();
        render::reviews(&view);
    } else {
        render::notice("  No evaluation yet");
    }

    Ok(())
}

async fn restaurant_menu(state: &AppState, id: i64) -> Result<()> {
    loop {
        if attempt(show_restaurant(state, id)).await?.is_none() {
            return Ok(());
        }

        render::menu(RESTAURANT_MENU);
        let choice = prompt::choice(RESTAURANT_MENU.len() - 1)?;

        let next = match choice {
            0 => Some(Next::Leave),
            1 => attempt(vote(state, id, true)).await?,
            2 => attempt(vote(state, id, false)).await?,
            3 => attempt(review(state, id)).await?,
            4 => attempt(edit_details(state, id)).await?,
            5 => attempt(edit_address(state, id)).await?,
            6 => attempt(edit_type(state, id)).await?,
            7 => attempt(delete(state, id)).await?,
            _ => Some(Next::Stay),
        };

        if let Some(Next::Leave) = next {
            return Ok(());
        }
    }
}

async fn vote(state: &AppState, id: i64, liked: bool) -> Result<Next> {
    state.evaluations.add_vote(id, liked).await?;
    render::success(if liked { "Like recorded" } else { "Dislike recorded" });
    Ok(Next::Stay)
}

async fn review(state: &AppState, id: i64) -> Result<Next> {
    render::title("New review");

    let username = prompt::required("Your name")?;
    let comment = prompt::text("Comment")?;

    let mut grades = Vec::new();
    for criterion in state.catalog.list_criteria().await? {
        if let Some(description) = &criterion.description {
            println!("  {}", description);
        }
        grades.push((criterion.name.clone(), prompt::score(&criterion.name)?));
    }

    state
        .evaluations
        .add_review(id, username, comment, grades)
        .await?;
    render::success("Review recorded");
    Ok(Next::Stay)
}

async fn edit_details(state: &AppState, id: i64) -> Result<Next> {
    let current = state.restaurants.get(id).await?;

    let name = prompt::text_with_default("Name", &current.name)?;
    let description = prompt::optional("Description", current.description.as_deref())?;
    let website = prompt::optional("Website", current.website.as_deref())?;

    state
        .restaurants
        .update(id, name, description, website)
        .await?;
    render::success("Restaurant updated");
    Ok(Next::Stay)
}

async fn edit_address(state: &AppState, id: i64) -> Result<Next> {
    let current = state.restaurants.get(id).await?;

    let street = prompt::text_with_default("Street", &current.address.street)?;
    let Some(City { id: Some(city_id), .. }) = choose_city(state).await? else {
        render::notice("Cancelled");
        return Ok(Next::Stay);
    };

    state
        .restaurants
        .update_address(id, street, city_id)
        .await?;
    render::success("Address updated");
    Ok(Next::Stay)
}

async fn edit_type(state: &AppState, id: i64) -> Result<Next> {
    let Some(RestaurantType { id: Some(type_id), .. }) = choose_type(state, true).await? else {
        render::notice("Cancelled");
        return Ok(Next::Stay);
    };

    state.restaurants.update_type(id, type_id).await?;
    render::success("Type updated");
    Ok(Next::Stay)
}

async fn delete(state: &AppState, id: i64) -> Result<Next> {
    if !prompt::confirm("Delete this restaurant and all its evaluations?")? {
        render::notice("Cancelled");
        return Ok(Next::Stay);
    }

    if state.restaurants.delete(id).await? {
        render::success("Restaurant deleted");
    } else {
        render::notice("The restaurant was already gone");
    }
    Ok(Next::Leave)
}
