//! Session, cart and order commands.

use tomato_storefront::ApiClient;
use tomato_storefront::models::LoginParams;
use tomato_storefront::stores::{CartStore, OrderStore, UserStore};

use super::CommandError;

/// Log in and persist the token for later commands.
///
/// # Errors
///
/// Returns an error if the credentials are rejected.
#[allow(clippy::print_stdout)]
pub async fn login(client: ApiClient, username: &str, password: &str) -> Result<(), CommandError> {
    let store = UserStore::new(client);
    if !store.login(&LoginParams::new(username, password)).await {
        return Err(CommandError::Failed("Login"));
    }
    println!("Logged in as {}", store.username());
    Ok(())
}

pub fn logout(client: ApiClient) {
    UserStore::new(client).logout();
}

/// Print the profile of the stored session.
///
/// # Errors
///
/// Returns an error without a session or if the profile cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn whoami(client: ApiClient) -> Result<(), CommandError> {
    let store = UserStore::new(client);
    if !store.is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    if !store.fetch_user_info().await {
        return Err(CommandError::Failed("Fetching profile"));
    }
    let Some(user) = store.user() else {
        return Err(CommandError::NotLoggedIn);
    };

    println!("{} (#{}, {})", user.username, user.id, user.role);
    println!("  email:   {}", user.email);
    println!("  phone:   {}", user.phone);
    if let Some(address) = &user.address {
        println!("  address: {address}");
    }
    Ok(())
}

/// Print the cart lines and total.
///
/// # Errors
///
/// Returns an error without a session or if the cart cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn cart(client: ApiClient) -> Result<(), CommandError> {
    if !client.session().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    let mut store = CartStore::new(client);
    if !store.fetch().await {
        return Err(CommandError::Failed("Fetching cart"));
    }

    if store.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }
    for item in store.items() {
        let title = item.title.as_deref().unwrap_or("?");
        let subtotal = item
            .subtotal()
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        println!("{:>4} x{:<3} {title}  {subtotal}", item.product_id, item.quantity);
    }
    println!("{} line(s), total {}", store.total_items(), store.total_amount());
    Ok(())
}

/// Print the order list with statuses.
///
/// # Errors
///
/// Returns an error without a session or if the orders cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn orders(client: ApiClient) -> Result<(), CommandError> {
    if !client.session().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    let mut store = OrderStore::new(client);
    if !store.fetch_list().await {
        return Err(CommandError::Failed("Fetching orders"));
    }

    if store.orders().is_empty() {
        println!("No orders");
    }
    for order in store.orders() {
        let id = order
            .order_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let created = order
            .create_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "#{id:<8} {:<4} {:>10}  {created}",
            order.status.label(),
            order.total_amount.to_string()
        );
    }
    Ok(())
}
