//! In-memory data of the fake backend.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use parking_lot::Mutex;

use tomato_core::{
    CartItemId, CommentId, FeedbackType, NoteId, OrderId, Price, ProductId, SpecificationId,
    StockpileId, UserId, UserRole,
};
use tomato_storefront::models::{
    CartItem, Note, NoteComment, Order, Product, Specification, Stockpile, User,
};

/// Password of every seeded account.
pub const SEED_PASSWORD: &str = "secret";

pub struct Account {
    pub user: User,
    pub password: String,
}

pub struct CartLine {
    pub owner: UserId,
    pub item: CartItem,
}

/// Everything the fake server knows. Ids come from one shared counter.
pub struct Db {
    next_id: i64,
    pub accounts: Vec<Account>,
    pub tokens: HashMap<String, UserId>,
    pub products: Vec<Product>,
    pub stockpiles: HashMap<ProductId, Stockpile>,
    pub cart: Vec<CartLine>,
    pub orders: Vec<Order>,
    pub notes: Vec<Note>,
    pub feedback: HashMap<(NoteId, UserId), FeedbackType>,
    pub comments: Vec<NoteComment>,
    pub uploads: Vec<String>,
}

impl Db {
    fn empty() -> Self {
        Self {
            next_id: 100,
            accounts: Vec::new(),
            tokens: HashMap::new(),
            products: Vec::new(),
            stockpiles: HashMap::new(),
            cart: Vec::new(),
            orders: Vec::new(),
            notes: Vec::new(),
            feedback: HashMap::new(),
            comments: Vec::new(),
            uploads: Vec::new(),
        }
    }

    /// Two accounts (`alice` customer #1, `admin` #2), three books and one
    /// note (#5, by admin, on book #1).
    pub fn seeded() -> Self {
        let mut db = Self::empty();
        db.add_account(1, "alice", UserRole::Customer);
        db.add_account(2, "admin", UserRole::Admin);

        db.add_product(1, "深入理解计算机系统", 13900, 40);
        db.add_product(2, "代码大全", 12800, 15);
        db.add_product(3, "Rust 程序设计语言", 8900, 0);

        let now = now();
        db.notes.push(Note {
            id: NoteId::new(5),
            title: "第一章笔记".to_string(),
            content: "信息就是位加上下文。".to_string(),
            product_id: ProductId::new(1),
            product_title: "深入理解计算机系统".to_string(),
            user_id: UserId::new(2),
            username: "admin".to_string(),
            user_avatar: None,
            like_count: 0,
            dislike_count: 0,
            comment_count: 0,
            user_feedback: None,
            created_at: now,
            updated_at: now,
        });
        db
    }

    fn add_account(&mut self, id: i64, username: &str, role: UserRole) {
        self.accounts.push(Account {
            user: User {
                id: UserId::new(id),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                phone: "13800000000".to_string(),
                avatar: None,
                address: None,
                role,
            },
            password: SEED_PASSWORD.to_string(),
        });
    }

    fn add_product(&mut self, id: i64, title: &str, fen: i64, amount: i64) {
        let product_id = ProductId::new(id);
        self.products.push(Product {
            id: Some(product_id),
            title: title.to_string(),
            price: Price::from_fen(fen),
            rate: 9.0,
            description: None,
            cover: None,
            detail: None,
            specifications: vec![Specification {
                id: Some(SpecificationId::new(id)),
                item: "出版社".to_string(),
                value: "机械工业出版社".to_string(),
            }],
        });
        self.stockpiles.insert(
            product_id,
            Stockpile {
                id: Some(StockpileId::new(id)),
                amount,
                frozen: 0,
                product_id: Some(product_id),
            },
        );
    }

    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.accounts.iter().map(|a| &a.user).find(|u| u.id == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == Some(id))
    }

    /// A note as seen by `viewer`: live counters plus the viewer's feedback.
    pub fn render_note(&self, note: &Note, viewer: Option<UserId>) -> Note {
        let count = |kind: FeedbackType| {
            let n = self
                .feedback
                .iter()
                .filter(|((id, _), t)| *id == note.id && **t == kind)
                .count();
            u32::try_from(n).unwrap_or(u32::MAX)
        };
        let comments = self.comments.iter().filter(|c| c.note_id == note.id).count();

        Note {
            like_count: count(FeedbackType::Like),
            dislike_count: count(FeedbackType::Dislike),
            comment_count: u32::try_from(comments).unwrap_or(u32::MAX),
            user_feedback: viewer.and_then(|user| self.feedback.get(&(note.id, user)).copied()),
            ..note.clone()
        }
    }

    pub fn cart_of(&self, owner: UserId) -> impl Iterator<Item = &CartItem> {
        self.cart
            .iter()
            .filter(move |line| line.owner == owner)
            .map(|line| &line.item)
    }

    pub fn new_cart_item_id(&mut self) -> CartItemId {
        CartItemId::new(self.next_id())
    }

    pub fn new_order_id(&mut self) -> OrderId {
        OrderId::new(self.next_id())
    }

    pub fn new_note_id(&mut self) -> NoteId {
        NoteId::new(self.next_id())
    }

    pub fn new_comment_id(&mut self) -> CommentId {
        CommentId::new(self.next_id())
    }
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Shared handle to the fake data.
#[derive(Clone)]
pub struct FakeState {
    db: Arc<Mutex<Db>>,
}

impl FakeState {
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            db: Arc::new(Mutex::new(Db::seeded())),
        }
    }

    /// Run `f` with exclusive access to the data.
    pub fn with<R>(&self, f: impl FnOnce(&mut Db) -> R) -> R {
        f(&mut self.db.lock())
    }
}
