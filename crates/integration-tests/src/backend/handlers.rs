//! Route handlers of the fake backend.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, header},
};
use serde::Deserialize;

use tomato_core::{
    BusinessErrorCode as Code, CartItemId, CommentId, FeedbackType, NoteId, OrderId, OrderStatus,
    PaymentMethod, Price, ProductId, UserId, UserRole,
};
use tomato_storefront::models::{CartItem, CartList, Note, NoteComment, Order, Payment, User};

use super::state::{Account, CartLine, Db, FakeState, now};
use super::{ApiError, ApiResult, created, ok};

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct Registration {
    username: String,
    password: String,
    email: String,
    phone: String,
}

#[derive(Deserialize)]
pub struct ProfileChanges {
    email: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
    address: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAdd {
    product_id: ProductId,
    quantity: u32,
}

#[derive(Deserialize)]
pub struct QuantityChange {
    quantity: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    cart_item_ids: Vec<CartItemId>,
    shipping_address: String,
    #[serde(default)]
    payment_method: PaymentMethod,
}

#[derive(Deserialize)]
pub struct NoteContent {
    title: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    feedback_type: FeedbackType,
}

#[derive(Deserialize)]
pub struct CommentContent {
    content: String,
}

// =============================================================================
// Authentication
// =============================================================================

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The user owning the request's token.
fn caller(db: &Db, headers: &HeaderMap) -> Result<UserId, ApiError> {
    bearer(headers)
        .and_then(|token| db.tokens.get(token).copied())
        .ok_or(ApiError::Unauthorized)
}

/// Like [`caller`], but anonymous requests are allowed.
fn viewer(db: &Db, headers: &HeaderMap) -> Option<UserId> {
    caller(db, headers).ok()
}

fn is_admin(db: &Db, user: UserId) -> bool {
    db.user(user).is_some_and(|u| u.role == UserRole::Admin)
}

// =============================================================================
// User
// =============================================================================

pub async fn login(State(state): State<FakeState>, Json(body): Json<Credentials>) -> ApiResult {
    state.with(|db| {
        let account = db
            .accounts
            .iter()
            .find(|a| a.user.username == body.username)
            .ok_or(Code::UserNotFound)?;
        if account.password != body.password {
            return Err(Code::PasswordIncorrect.into());
        }

        let user_id = account.user.id;
        let token = format!("tok-{}-{}", body.username, db.next_id());
        db.tokens.insert(token.clone(), user_id);
        ok(token)
    })
}

pub async fn register(State(state): State<FakeState>, Json(body): Json<Registration>) -> ApiResult {
    state.with(|db| {
        if db.accounts.iter().any(|a| a.user.username == body.username) {
            return Err(Code::UsernameAlreadyExists.into());
        }
        if db.accounts.iter().any(|a| a.user.email == body.email) {
            return Err(Code::EmailAlreadyExists.into());
        }

        let user = User {
            id: UserId::new(db.next_id()),
            username: body.username,
            email: body.email,
            phone: body.phone,
            avatar: None,
            address: None,
            role: UserRole::Customer,
        };
        db.accounts.push(Account {
            user: user.clone(),
            password: body.password,
        });
        created(user)
    })
}

pub async fn profile(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    state.with(|db| {
        let id = caller(db, &headers)?;
        ok(db.user(id))
    })
}

pub async fn update_profile(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<ProfileChanges>,
) -> ApiResult {
    state.with(|db| {
        let id = caller(db, &headers)?;
        let account = db
            .accounts
            .iter_mut()
            .find(|a| a.user.id == id)
            .ok_or(Code::UserNotFound)?;

        let user = &mut account.user;
        if let Some(email) = body.email {
            user.email = email;
        }
        if let Some(phone) = body.phone {
            user.phone = phone;
        }
        if body.avatar.is_some() {
            user.avatar = body.avatar;
        }
        if body.address.is_some() {
            user.address = body.address;
        }
        ok(&*user)
    })
}

// =============================================================================
// Products
// =============================================================================

pub async fn list_products(State(state): State<FakeState>) -> ApiResult {
    state.with(|db| ok(&db.products))
}

pub async fn get_product(State(state): State<FakeState>, Path(id): Path<i64>) -> ApiResult {
    state.with(|db| ok(db.product(ProductId::new(id)).ok_or(Code::ProductNotFound)?))
}

pub async fn get_stockpile(State(state): State<FakeState>, Path(id): Path<i64>) -> ApiResult {
    state.with(|db| {
        ok(db
            .stockpiles
            .get(&ProductId::new(id))
            .ok_or(Code::ProductNotFound)?)
    })
}

// =============================================================================
// Cart
// =============================================================================

fn cart_list(db: &Db, owner: UserId) -> CartList {
    let items: Vec<CartItem> = db.cart_of(owner).cloned().collect();
    let total_amount = items
        .iter()
        .filter_map(CartItem::subtotal)
        .fold(Price::default(), |sum, p| sum + p);

    CartList {
        total: u32::try_from(items.len()).unwrap_or(u32::MAX),
        total_amount,
        items,
    }
}

fn available(db: &Db, product: ProductId) -> i64 {
    db.stockpiles.get(&product).map_or(0, |s| s.amount - s.frozen)
}

pub async fn get_cart(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        ok(cart_list(db, owner))
    })
}

pub async fn add_to_cart(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<CartAdd>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        let product = db.product(body.product_id).ok_or(Code::ProductNotFound)?.clone();

        let existing = db
            .cart
            .iter()
            .find(|l| l.owner == owner && l.item.product_id == body.product_id)
            .map(|l| l.item.quantity);
        let wanted = body.quantity + existing.unwrap_or(0);
        if i64::from(wanted) > available(db, body.product_id) {
            return Err(Code::ProductOutOfStock.into());
        }

        if let Some(line) = db
            .cart
            .iter_mut()
            .find(|l| l.owner == owner && l.item.product_id == body.product_id)
        {
            line.item.quantity = wanted;
        } else {
            let cart_item_id = db.new_cart_item_id();
            db.cart.push(CartLine {
                owner,
                item: CartItem {
                    cart_item_id: Some(cart_item_id),
                    product_id: body.product_id,
                    title: Some(product.title),
                    price: Some(product.price),
                    description: product.description,
                    cover: product.cover,
                    detail: product.detail,
                    quantity: body.quantity,
                },
            });
        }
        ok(())
    })
}

fn own_line(db: &mut Db, owner: UserId, id: CartItemId) -> Result<&mut CartLine, ApiError> {
    db.cart
        .iter_mut()
        .find(|l| l.owner == owner && l.item.cart_item_id == Some(id))
        .ok_or_else(|| Code::CartItemNotFound.into())
}

pub async fn remove_cart_item(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        let id = CartItemId::new(id);
        own_line(db, owner, id)?;
        db.cart.retain(|l| l.item.cart_item_id != Some(id));
        ok(())
    })
}

pub async fn update_cart_quantity(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<QuantityChange>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        if body.quantity == 0 {
            return Err(Code::InvalidParameter.into());
        }
        let product = own_line(db, owner, CartItemId::new(id))?.item.product_id;
        if i64::from(body.quantity) > available(db, product) {
            return Err(Code::ProductOutOfStock.into());
        }
        own_line(db, owner, CartItemId::new(id))?.item.quantity = body.quantity;
        ok(())
    })
}

pub async fn clear_cart(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        db.cart.retain(|l| l.owner != owner);
        ok(())
    })
}

pub async fn checkout(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<CheckoutRequest>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        let (selected, rest): (Vec<CartLine>, Vec<CartLine>) =
            std::mem::take(&mut db.cart).into_iter().partition(|l| {
                l.owner == owner
                    && l.item
                        .cart_item_id
                        .is_some_and(|id| body.cart_item_ids.contains(&id))
            });
        db.cart = rest;
        if selected.is_empty() {
            return Err(Code::CartEmpty.into());
        }

        let order_items: Vec<CartItem> = selected.into_iter().map(|l| l.item).collect();
        for item in &order_items {
            if let Some(stock) = db.stockpiles.get_mut(&item.product_id) {
                stock.frozen += i64::from(item.quantity);
            }
        }
        let total_amount = order_items
            .iter()
            .filter_map(CartItem::subtotal)
            .fold(Price::default(), |sum, p| sum + p);

        let created_at = now();
        let order = Order {
            order_id: Some(db.new_order_id()),
            user_id: Some(owner),
            total_amount,
            payment_method: body.payment_method,
            status: OrderStatus::Pending,
            shipping_address: body.shipping_address,
            trade_no: None,
            payment_time: None,
            create_time: Some(created_at),
            update_time: Some(created_at),
            order_items,
        };
        db.orders.push(order.clone());
        ok(order)
    })
}

// =============================================================================
// Orders
// =============================================================================

fn own_order(db: &mut Db, owner: UserId, id: OrderId) -> Result<&mut Order, ApiError> {
    db.orders
        .iter_mut()
        .find(|o| o.order_id == Some(id) && o.user_id == Some(owner))
        .ok_or_else(|| Code::OrderNotFound.into())
}

pub async fn list_orders(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        let orders: Vec<&Order> = db
            .orders
            .iter()
            .filter(|o| o.user_id == Some(owner))
            .collect();
        ok(orders)
    })
}

pub async fn get_order(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        ok(&*own_order(db, owner, OrderId::new(id))?)
    })
}

/// Returns the gateway form and settles the order at once, as if the
/// gateway had already called back.
pub async fn pay_order(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        let trade_no = format!("T{}", db.next_id());
        let order = own_order(db, owner, OrderId::new(id))?;
        match order.status {
            OrderStatus::Pending => {}
            OrderStatus::Paid => return Err(Code::OrderAlreadyPaid.into()),
            OrderStatus::Cancelled => return Err(Code::OrderAlreadyCancelled.into()),
            OrderStatus::Timeout => return Err(Code::OrderStatusError.into()),
        }

        order.status = OrderStatus::Paid;
        order.trade_no = Some(trade_no);
        order.payment_time = Some(now());
        order.update_time = order.payment_time;

        ok(Payment {
            payment_form: format!(
                "<form name=\"punchout_form\" method=\"post\" \
                 action=\"https://openapi.alipay.com/gateway.do\">\
                 <input type=\"hidden\" name=\"out_trade_no\" value=\"{id}\"></form>"
            ),
            order_id: OrderId::new(id),
            total_amount: order.total_amount,
            payment_method: order.payment_method,
        })
    })
}

pub async fn cancel_order(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let owner = caller(db, &headers)?;
        let order = own_order(db, owner, OrderId::new(id))?;
        match order.status {
            OrderStatus::Pending => {}
            OrderStatus::Cancelled => return Err(Code::OrderAlreadyCancelled.into()),
            OrderStatus::Paid | OrderStatus::Timeout => return Err(Code::OrderCannotCancel.into()),
        }

        order.status = OrderStatus::Cancelled;
        order.update_time = Some(now());
        let released: Vec<(ProductId, u32)> = order
            .order_items
            .iter()
            .map(|i| (i.product_id, i.quantity))
            .collect();
        for (product, quantity) in released {
            if let Some(stock) = db.stockpiles.get_mut(&product) {
                stock.frozen -= i64::from(quantity);
            }
        }
        ok(())
    })
}

// =============================================================================
// Notes
// =============================================================================

fn find_note(db: &Db, id: NoteId) -> Result<&Note, ApiError> {
    db.notes
        .iter()
        .find(|n| n.id == id)
        .ok_or_else(|| Code::NoteNotFound.into())
}

fn render_all<'a>(
    db: &Db,
    notes: impl Iterator<Item = &'a Note>,
    viewer: Option<UserId>,
) -> Vec<Note> {
    notes.map(|n| db.render_note(n, viewer)).collect()
}

pub async fn product_notes(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let product = ProductId::new(id);
        let notes = db.notes.iter().filter(|n| n.product_id == product);
        ok(render_all(db, notes, viewer(db, &headers)))
    })
}

pub async fn my_notes(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    state.with(|db| {
        let user = caller(db, &headers)?;
        let notes = db.notes.iter().filter(|n| n.user_id == user);
        ok(render_all(db, notes, Some(user)))
    })
}

pub async fn get_note(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let note = find_note(db, NoteId::new(id))?;
        ok(db.render_note(note, viewer(db, &headers)))
    })
}

pub async fn create_note(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<NoteContent>,
) -> ApiResult {
    state.with(|db| {
        let author = caller(db, &headers)?;
        if body.title.trim().is_empty() || body.content.trim().is_empty() {
            return Err(Code::NoteContentInvalid.into());
        }
        let product_id = ProductId::new(id);
        let product_title = db.product(product_id).ok_or(Code::ProductNotFound)?.title.clone();
        let user = db.user(author).ok_or(Code::UserNotFound)?.clone();

        let created_at = now();
        let note = Note {
            id: db.new_note_id(),
            title: body.title,
            content: body.content,
            product_id,
            product_title,
            user_id: author,
            username: user.username,
            user_avatar: user.avatar,
            like_count: 0,
            dislike_count: 0,
            comment_count: 0,
            user_feedback: None,
            created_at,
            updated_at: created_at,
        };
        db.notes.insert(0, note.clone());
        created(note)
    })
}

pub async fn delete_note(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult {
    state.with(|db| {
        let user = caller(db, &headers)?;
        let id = NoteId::new(id);
        if find_note(db, id)?.user_id != user && !is_admin(db, user) {
            return Err(Code::AccessDenied.into());
        }

        db.notes.retain(|n| n.id != id);
        db.comments.retain(|c| c.note_id != id);
        db.feedback.retain(|(note, _), _| *note != id);
        ok(())
    })
}

/// Sending the feedback already given withdraws it; the other kind
/// replaces it.
pub async fn note_feedback(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<FeedbackRequest>,
) -> ApiResult {
    state.with(|db| {
        let user = caller(db, &headers)?;
        let id = NoteId::new(id);
        let note = find_note(db, id)?.clone();

        let key = (id, user);
        if db.feedback.get(&key) == Some(&body.feedback_type) {
            db.feedback.remove(&key);
        } else {
            db.feedback.insert(key, body.feedback_type);
        }
        ok(db.render_note(&note, Some(user)))
    })
}

pub async fn note_comments(State(state): State<FakeState>, Path(id): Path<i64>) -> ApiResult {
    state.with(|db| {
        let id = NoteId::new(id);
        find_note(db, id)?;
        let comments: Vec<&NoteComment> = db.comments.iter().filter(|c| c.note_id == id).collect();
        ok(comments)
    })
}

pub async fn add_comment(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<CommentContent>,
) -> ApiResult {
    state.with(|db| {
        let author = caller(db, &headers)?;
        let note_id = NoteId::new(id);
        find_note(db, note_id)?;
        if body.content.trim().is_empty() {
            return Err(Code::InvalidParameter.into());
        }
        let user = db.user(author).ok_or(Code::UserNotFound)?.clone();

        let created_at = now();
        let comment = NoteComment {
            id: db.new_comment_id(),
            note_id,
            user_id: author,
            username: user.username,
            user_avatar: user.avatar,
            content: body.content,
            created_at,
            updated_at: created_at,
        };
        db.comments.insert(0, comment.clone());
        created(comment)
    })
}

pub async fn delete_comment(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> ApiResult {
    state.with(|db| {
        let user = caller(db, &headers)?;
        let note_id = NoteId::new(id);
        let comment_id = CommentId::new(comment_id);
        let comment = db
            .comments
            .iter()
            .find(|c| c.id == comment_id && c.note_id == note_id)
            .ok_or(Code::InvalidParameter)?;
        if comment.user_id != user && !is_admin(db, user) {
            return Err(Code::AccessDenied.into());
        }

        db.comments.retain(|c| c.id != comment_id);
        ok(())
    })
}

// =============================================================================
// Upload
// =============================================================================

/// Accepts a `file` part plus an optional `folder` field and answers with
/// the URL the file would be served from.
pub async fn upload(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> ApiResult {
    state.with(|db| caller(db, &headers))?;

    let mut folder = match kind.as_str() {
        "avatar" => "avatars".to_string(),
        "product-cover" => "products".to_string(),
        "advertisement-cover" => "advertisements".to_string(),
        _ => "general".to_string(),
    };
    let mut file_name = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Code::InvalidParameter)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let uploaded = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(|_| Code::InvalidParameter)?;
                if bytes.is_empty() {
                    return Err(Code::InvalidParameter.into());
                }
                file_name = Some(uploaded);
            }
            Some("folder") => {
                folder = field.text().await.map_err(|_| Code::InvalidParameter)?;
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or(Code::InvalidParameter)?;
    let url = format!("http://cdn.test/{folder}/{file_name}");
    state.with(|db| db.uploads.push(url.clone()));
    ok(url)
}
