//! Catalog browsing commands. These work without a session.

use tomato_core::ProductId;
use tomato_storefront::ApiClient;
use tomato_storefront::stores::{NoteStore, ProductStore};

use super::CommandError;

/// Print every product with its price and rating.
///
/// # Errors
///
/// Returns an error if the list cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn products(client: ApiClient) -> Result<(), CommandError> {
    let mut store = ProductStore::new(client);
    if !store.fetch_all().await {
        return Err(CommandError::Failed("Fetching products"));
    }

    for product in store.products() {
        let id = product
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!(
            "{id:>4}  {:>9}  {:>4.1}  {}",
            product.price.to_string(),
            product.rate,
            product.title
        );
    }
    Ok(())
}

/// Print the reading notes of one product.
///
/// # Errors
///
/// Returns an error if the notes cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn notes(client: ApiClient, product: i64) -> Result<(), CommandError> {
    let mut store = NoteStore::new(client);
    if !store.fetch_product_notes(ProductId::new(product)).await {
        return Err(CommandError::Failed("Fetching notes"));
    }

    let notes = store.product_notes();
    if notes.is_empty() {
        println!("No notes for product {product}");
    }
    for note in notes {
        println!(
            "#{} {} by {}  +{} -{}  {} comment(s)",
            note.id,
            note.title,
            note.username,
            note.like_count,
            note.dislike_count,
            note.comment_count
        );
    }
    Ok(())
}
