mod common;

use guideresto::error::AppError;

#[tokio::test]
async fn test_create_update_and_delete() {
    let pool = common::setup_pool().await;
    let state = common::create_test_state(pool.clone());

    let neuchatel = common::create_test_city(&pool, "2000", "Neuchâtel").await;
    let lausanne = common::create_test_city(&pool, "1003", "Lausanne").await;
    let pizzeria = common::create_test_type(&pool, "Pizzeria").await;
    let brasserie = common::create_test_type(&pool, "Brasserie").await;

    let created = state
        .restaurants
        .create(
            "Chez Mario".to_string(),
            Some("Pizzas".to_string()),
            None,
            "Rue du Seyon 1".to_string(),
            neuchatel.id.unwrap(),
            pizzeria.id.unwrap(),
        )
        .await
        .unwrap();
    let id = created.id.unwrap();

    state
        .restaurants
        .update(
            id,
            "Chez Luigi".to_string(),
            None,
            Some("https://luigi.ch".to_string()),
        )
        .await
        .unwrap();
    state
        .restaurants
        .update_address(id, "Place de la Palud 2".to_string(), lausanne.id.unwrap())
        .await
        .unwrap();
    state
        .restaurants
        .update_type(id, brasserie.id.unwrap())
        .await
        .unwrap();

    let loaded = state.restaurants.get(id).await.unwrap();
    assert_eq!(loaded.name, "Chez Luigi");
    assert_eq!(loaded.description, None);
    assert_eq!(loaded.website.as_deref(), Some("https://luigi.ch"));
    assert_eq!(loaded.address.street, "Place de la Palud 2");
    assert_eq!(loaded.address.city.name, "Lausanne");
    assert_eq!(loaded.restaurant_type.label, "Brasserie");

    assert_eq!(state.restaurants.count().await.unwrap(), 1);
    assert!(state.restaurants.delete(id).await.unwrap());
    assert!(!state.restaurants.delete(id).await.unwrap());
    assert!(!state.restaurants.exists(id).await.unwrap());
}

#[tokio::test]
async fn test_create_with_missing_references_stores_nothing() {
    let pool = common::setup_pool().await;
    let state = common::create_test_state(pool.clone());

    let city = common::create_test_city(&pool, "2000", "Neuchâtel").await;

    let result = state
        .restaurants
        .create(
            "Chez Mario".to_string(),
            None,
            None,
            String::new(),
            city.id.unwrap(),
            999,
        )
        .await;

    assert!(matches!(result, Err(AppError::ReferenceNotFound { .. })));
    assert_eq!(common::count_rows(&pool, "restaurants").await, 0);
}

#[tokio::test]
async fn test_delete_removes_all_evaluations() {
    let pool = common::setup_pool().await;
    let state = common::create_test_state(pool.clone());

    let city = common::create_test_city(&pool, "2000", "Neuchâtel").await;
    let kind = common::create_test_type(&pool, "Pizzeria").await;
    let id = state
        .restaurants
        .create(
            "Chez Mario".to_string(),
            None,
            None,
            String::new(),
            city.id.unwrap(),
            kind.id.unwrap(),
        )
        .await
        .unwrap()
        .id
        .unwrap();

    state.evaluations.add_vote(id, true).await.unwrap();
    state
        .evaluations
        .add_review(id, "alice".to_string(), String::new(), [("Service", 4)])
        .await
        .unwrap();
    assert_eq!(common::count_rows(&pool, "grades").await, 1);

    assert!(state.restaurants.delete(id).await.unwrap());

    assert_eq!(common::count_rows(&pool, "evaluations").await, 0);
    assert_eq!(common::count_rows(&pool, "grades").await, 0);
}

#[tokio::test]
async fn test_edits_keep_existing_evaluations() {
    let pool = common::setup_pool().await;
    let state = common::create_test_state(pool.clone());

    let city = common::create_test_city(&pool, "2000", "Neuchâtel").await;
    let kind = common::create_test_type(&pool, "Pizzeria").await;
    let id = state
        .restaurants
        .create(
            "Chez Mario".to_string(),
            None,
            None,
            String::new(),
            city.id.unwrap(),
            kind.id.unwrap(),
        )
        .await
        .unwrap()
        .id
        .unwrap();

    state.evaluations.add_vote(id, true).await.unwrap();
    state
        .evaluations
        .add_review(id, "alice".to_string(), String::new(), [("Service", 4)])
        .await
        .unwrap();

    state
        .restaurants
        .update(id, "Chez Luigi".to_string(), None, None)
        .await
        .unwrap();
    state
        .restaurants
        .update_address(id, "Rue du Seyon 3".to_string(), city.id.unwrap())
        .await
        .unwrap();
    state
        .restaurants
        .update_type(id, kind.id.unwrap())
        .await
        .unwrap();

    assert_eq!(state.evaluations.count_likes(id).await.unwrap(), 1);
    assert_eq!(state.evaluations.count_complete_evaluations(id).await.unwrap(), 1);
    assert_eq!(common::count_rows(&pool, "grades").await, 1);
}

#[tokio::test]
async fn test_search_and_listing() {
    let pool = common::setup_pool().await;
    let state = common::create_test_state(pool.clone());

    let city = common::create_test_city(&pool, "2000", "Neuchâtel").await;
    let kind = common::create_test_type(&pool, "Pizzeria").await;
    for name in ["Chez Mario", "Chez Mario II", "Le Cardinal"] {
        state
            .restaurants
            .create(
                name.to_string(),
                None,
                None,
                String::new(),
                city.id.unwrap(),
                kind.id.unwrap(),
            )
            .await
            .unwrap();
    }

    assert_eq!(state.restaurants.search_by_name("mario").await.unwrap().len(), 2);
    let exact = state
        .restaurants
        .find_by_exact_name("CHEZ MARIO")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exact.name, "Chez Mario");

    assert_eq!(
        state
            .restaurants
            .list_by_city(city.id.unwrap())
            .await
            .unwrap()
            .len(),
        3
    );
    assert_eq!(
        state
            .restaurants
            .list_by_type(kind.id.unwrap())
            .await
            .unwrap()
            .len(),
        3
    );
    assert_eq!(state.restaurants.list_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_catalog_creates_reference_data() {
    let pool = common::setup_pool().await;
    let state = common::create_test_state(pool);

    let city = state
        .catalog
        .create_city("2000".to_string(), "Neuchâtel".to_string())
        .await
        .unwrap();
    let found = state.catalog.find_city_by_zip_code("2000").await.unwrap();
    assert_eq!(found, Some(city.clone()));
    let by_name = state.catalog.find_city_by_name("NEUCHÂTEL").await.unwrap();
    assert_eq!(by_name, Some(city));
    assert!(state.catalog.find_city_by_name("Neuch").await.unwrap().is_none());

    state
        .catalog
        .create_type("Pizzeria".to_string(), None)
        .await
        .unwrap();
    let duplicate = state.catalog.create_type("Pizzeria".to_string(), None).await;
    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));

    assert_eq!(state.catalog.list_criteria().await.unwrap().len(), 3);
}
