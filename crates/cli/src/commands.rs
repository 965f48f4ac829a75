//! Client-side subcommands, all driven through `CatalogStore`.

use catalog_client::{
    validate_draft, CatalogApi, CatalogStore, ClientError, Dimensions, HttpCatalogApi, Product, ProductDraft,
};

use crate::{CategoryCommand, NewProductArgs, ProductChangeArgs, ProductCommand};

pub async fn products(base_url: &str, command: ProductCommand) -> anyhow::Result<()> {
    let mut store = CatalogStore::new(HttpCatalogApi::new(base_url)?);

    match command {
        ProductCommand::List {
            search,
            category,
            sort,
        } => {
            store.refresh().await;
            if let Some(error) = store.error() {
                anyhow::bail!("{error}");
            }

            store.set_search_term(search);
            store.set_category(category);
            store.set_sort_order(sort);

            let view = store.view();
            for product in &view {
                println!("{}", summary_line(product));
            }
            println!("{} of {} products", view.len(), store.products().len());
        }
        ProductCommand::Show { id } => {
            let product = store.product(&id).await?;
            print_detail(&product);
        }
        ProductCommand::Add(args) => {
            let draft = new_draft(args);
            validate_draft(&draft).map_err(ClientError::InvalidForm)?;

            let product = store.add(&draft).await?;
            println!("created product {} ({})", product.id, product.name);
        }
        ProductCommand::Update { id, changes } => {
            let current = store.product(&id).await?;
            let draft = apply_changes(ProductDraft::from(current), changes);
            validate_draft(&draft).map_err(ClientError::InvalidForm)?;

            let product = store.update(&id, &draft).await?;
            println!("updated product {} ({})", product.id, product.name);
        }
        ProductCommand::Delete { id } => {
            store.remove(&id).await?;
            println!("deleted product {id}");
        }
    }

    Ok(())
}

pub async fn categories(base_url: &str, command: CategoryCommand) -> anyhow::Result<()> {
    let mut store = CatalogStore::new(HttpCatalogApi::new(base_url)?);

    match command {
        CategoryCommand::List => {
            let categories = store.api().list_categories().await?;
            for category in categories {
                println!("{:>4}  {}", category.id, category.name);
            }
        }
        CategoryCommand::Add { name } => {
            let category = store.add_category(&name).await?;
            println!("created category {} ({})", category.id, category.name);
        }
    }

    Ok(())
}

fn new_draft(args: NewProductArgs) -> ProductDraft {
    ProductDraft {
        name: args.name,
        description: args.description,
        price: args.price,
        availability: args.available,
        dimensions: Dimensions {
            height: args.height,
            width: args.width,
            depth: args.depth,
        },
        materials: args.materials,
        colors: args.colors,
        image_url: args.image,
        category: args.category,
    }
}

fn apply_changes(mut draft: ProductDraft, changes: ProductChangeArgs) -> ProductDraft {
    if let Some(name) = changes.name {
        draft.name = name;
    }
    if let Some(description) = changes.description {
        draft.description = description;
    }
    if let Some(price) = changes.price {
        draft.price = price;
    }
    if let Some(category) = changes.category {
        draft.category = category;
    }
    if let Some(available) = changes.available {
        draft.availability = available;
    }
    if let Some(height) = changes.height {
        draft.dimensions.height = height;
    }
    if let Some(width) = changes.width {
        draft.dimensions.width = width;
    }
    if let Some(depth) = changes.depth {
        draft.dimensions.depth = depth;
    }
    if !changes.materials.is_empty() {
        draft.materials = changes.materials;
    }
    if !changes.colors.is_empty() {
        draft.colors = changes.colors;
    }
    if let Some(image) = changes.image {
        draft.image_url = image;
    }
    draft
}

fn summary_line(product: &Product) -> String {
    let stock = if product.availability {
        "in stock"
    } else {
        "out of stock"
    };
    format!(
        "{:>4}  {:<32}  {:>10.2}  {:<14}  {}",
        product.id, product.name, product.price, product.category, stock
    )
}

fn print_detail(product: &Product) {
    println!("id:           {}", product.id);
    println!("name:         {}", product.name);
    println!("description:  {}", product.description);
    println!("price:        {:.2}", product.price);
    println!("available:    {}", product.availability);
    println!(
        "dimensions:   {} x {} x {} (h x w x d)",
        product.dimensions.height, product.dimensions.width, product.dimensions.depth
    );
    println!("materials:    {}", product.materials.join(", "));
    println!("colors:       {}", product.colors.join(", "));
    println!("image:        {}", product.image_url);
    println!("category:     {}", product.category);
}
