use catalog_client::{
    CatalogStore, ClientError, Dimensions, HttpCatalogApi, ProductDraft, SortOrder,
};
use catalog_kernel::settings::Settings;
use tokio::net::TcpListener;

/// Serve a fresh catalog on an ephemeral port and return its API root.
async fn spawn_service() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let registry = catalog_app::build_registry();
    let app = catalog_http::build_router(&registry, &Settings::default());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/api"))
}

fn ids(store: &CatalogStore<HttpCatalogApi>) -> Vec<String> {
    let mut ids: Vec<String> = store.products().iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}

fn bookshelf() -> ProductDraft {
    ProductDraft {
        name: "Oak Bookshelf".into(),
        description: "Five-shelf solid oak bookcase.".into(),
        price: 329.0,
        availability: true,
        dimensions: Dimensions {
            height: 180.0,
            width: 80.0,
            depth: 30.0,
        },
        materials: vec!["Oak".into()],
        colors: vec!["#964B00".into()],
        image_url: "/placeholder.svg?height=500&width=500".into(),
        category: "Furniture".into(),
    }
}

#[tokio::test]
async fn add_then_delete_follows_server_ids() -> anyhow::Result<()> {
    let base_url = spawn_service().await?;
    let mut store = CatalogStore::new(HttpCatalogApi::new(&base_url)?);

    store.refresh().await;
    assert_eq!(ids(&store), vec!["1", "2", "3"]);

    let created = store.add(&bookshelf()).await?;
    assert_eq!(created.id, "4");
    assert!(store.products().iter().any(|p| p.id == "4"));

    store.remove("2").await?;
    store.refresh().await;
    assert_eq!(ids(&store), vec!["1", "3", "4"]);
    assert!(store.error().is_none());

    Ok(())
}

#[tokio::test]
async fn update_replaces_record_and_detail_reflects_it() -> anyhow::Result<()> {
    let base_url = spawn_service().await?;
    let mut store = CatalogStore::new(HttpCatalogApi::new(&base_url)?);
    store.refresh().await;

    let mut draft = ProductDraft::from(store.product("3").await?);
    draft.availability = true;
    draft.price = 229.99;
    store.update("3", &draft).await?;

    let detail = store.product("3").await?;
    assert!(detail.availability);
    assert!((detail.price - 229.99).abs() < 1e-9);
    assert_eq!(detail.name, "Wireless Headphones");

    Ok(())
}

#[tokio::test]
async fn server_rejections_surface_as_messages() -> anyhow::Result<()> {
    let base_url = spawn_service().await?;
    let mut store = CatalogStore::new(HttpCatalogApi::new(&base_url)?);
    store.refresh().await;

    let err = store.add(&ProductDraft::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref m) if m == "Missing required fields"));
    assert_eq!(store.error(), Some("rejected: Missing required fields"));
    assert_eq!(store.products().len(), 3);

    let err = store.remove("42").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.products().len(), 3);

    let err = store.product("42").await.unwrap_err();
    assert_eq!(err.to_string(), "not found: Product not found");

    Ok(())
}

#[tokio::test]
async fn duplicate_category_is_a_conflict() -> anyhow::Result<()> {
    let base_url = spawn_service().await?;
    let mut store = CatalogStore::new(HttpCatalogApi::new(&base_url)?);

    store.refresh_categories().await;
    assert_eq!(store.categories(), ["Furniture", "Electronics"]);

    let created = store.add_category("Lighting").await?;
    assert_eq!(created.id, 3);
    assert_eq!(store.categories(), ["Furniture", "Electronics", "Lighting"]);

    let err = store.add_category("Furniture").await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        err.to_string(),
        "conflict: Category 'Furniture' already exists"
    );
    assert_eq!(store.categories(), ["Furniture", "Electronics", "Lighting"]);

    Ok(())
}

#[tokio::test]
async fn view_filters_and_sorts_fetched_products() -> anyhow::Result<()> {
    let base_url = spawn_service().await?;
    let mut store = CatalogStore::new(HttpCatalogApi::new(&base_url)?);
    store.refresh().await;

    store.set_category("Furniture");
    store.set_sort_order(SortOrder::PriceAsc);
    let names: Vec<&str> = store.view().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Minimalist Coffee Table", "Modern Desk Chair"]);

    store.set_category("");
    store.set_search_term("HEAD");
    let names: Vec<&str> = store.view().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Wireless Headphones"]);

    Ok(())
}

#[tokio::test]
async fn unreachable_service_empties_list_with_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let mut store = CatalogStore::new(HttpCatalogApi::new(&format!("http://{addr}/api"))?);
    store.refresh().await;

    assert!(store.products().is_empty());
    assert!(store
        .error()
        .is_some_and(|message| message.starts_with("request failed")));
    assert!(!store.is_loading());

    Ok(())
}

#[tokio::test]
async fn ids_with_url_syntax_only_address_themselves() -> anyhow::Result<()> {
    let base_url = spawn_service().await?;
    let mut store = CatalogStore::new(HttpCatalogApi::new(&base_url)?);
    store.refresh().await;

    for id in ["2?x", "9/../3", "1#a"] {
        let err = store.remove(id).await.unwrap_err();
        assert!(err.is_not_found(), "{id}: {err}");

        let err = store.product(id).await.unwrap_err();
        assert!(err.is_not_found(), "{id}: {err}");
    }

    store.refresh().await;
    assert_eq!(ids(&store), vec!["1", "2", "3"]);

    Ok(())
}
