use tomato_core::{CartItemId, Price};
use tracing::debug;

use crate::action::{ActionOptions, LoadingFlag, perform_async, perform_async_action};
use crate::client::ApiClient;
use crate::models::{CartAddParams, CartItem, CartList, Checkout, Order};
use crate::services::CartService;

/// The logged-in user's cart.
///
/// Every mutation except `clear` is followed by a refetch, so the totals
/// always come from the server.
#[derive(Debug)]
pub struct CartStore {
    service: CartService,
    items: Vec<CartItem>,
    total_amount: Price,
    total_items: u32,
    loading: LoadingFlag,
}

impl CartStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: CartService::new(client),
            items: Vec::new(),
            total_amount: Price::default(),
            total_items: 0,
            loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn total_amount(&self) -> Price {
        self.total_amount
    }

    /// Number of lines, as counted by the server.
    #[must_use]
    pub const fn total_items(&self) -> u32 {
        self.total_items
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of every line, for a whole-cart checkout.
    #[must_use]
    pub fn cart_item_ids(&self) -> Vec<CartItemId> {
        self.items.iter().filter_map(|item| item.cart_item_id).collect()
    }

    fn apply(&mut self, cart: CartList) {
        self.items = cart.items;
        self.total_amount = cart.total_amount;
        self.total_items = cart.total;
    }

    pub async fn fetch(&mut self) -> bool {
        let options = ActionOptions::new("获取购物车失败").quiet();
        let mut fetched = None;
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.get(),
            |cart| fetched = Some(cart),
            &options,
        )
        .await;
        if let Some(cart) = fetched {
            self.apply(cart);
        }
        ok
    }

    pub async fn add(&mut self, params: CartAddParams) -> bool {
        let options = ActionOptions::new("添加商品到购物车失败").quiet();
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.add(params),
            |_| (),
            &options,
        )
        .await;
        if ok {
            self.fetch().await;
        }
        ok
    }

    /// Drops the line locally, refetches, then confirms.
    pub async fn remove(&mut self, cart_item_id: CartItemId) -> bool {
        let options = ActionOptions::new("从购物车删除商品失败").quiet();
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.remove(cart_item_id),
            |_| self.items.retain(|item| item.cart_item_id != Some(cart_item_id)),
            &options,
        )
        .await;
        if ok {
            self.fetch().await;
            self.service.client().notifier().success("商品已从购物车移除");
        }
        ok
    }

    pub async fn update_quantity(&mut self, cart_item_id: CartItemId, quantity: u32) -> bool {
        let options = ActionOptions::new("更新购物车商品数量失败").quiet();
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.update_quantity(cart_item_id, quantity),
            |_| (),
            &options,
        )
        .await;
        if ok {
            self.fetch().await;
        }
        ok
    }

    /// Create an order from the given lines. The cart itself is left as is;
    /// the server empties it.
    pub async fn checkout(&mut self, checkout: &Checkout) -> Option<Order> {
        let options = ActionOptions::new("结算购物车失败").quiet();
        let loading = &self.loading;
        let order = perform_async(
            self.service.client().notifier(),
            self.service.checkout(checkout),
            |order| order,
            &options,
            || loading.set(true),
            || loading.set(false),
            None,
        )
        .await?;
        debug!(order_id = ?order.order_id, "Checkout created order");
        self.service
            .client()
            .notifier()
            .success("订单创建成功，即将跳转到支付页面");
        Some(order)
    }

    pub async fn clear(&mut self) -> bool {
        let options = ActionOptions::new("清空购物车失败")
            .quiet()
            .success_message("购物车已清空");
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.clear(),
            |_| (),
            &options,
        )
        .await;
        if ok {
            self.apply(CartList::default());
        }
        ok
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};
    use tomato_core::{OrderId, OrderStatus, PaymentMethod, ProductId};

    use super::*;
    use crate::client::test_support::Harness;
    use crate::notify::ToastLevel;

    fn cart(lines: &[(i64, u32)]) -> Value {
        let items: Vec<Value> = lines
            .iter()
            .map(|(id, qty)| {
                json!({"cartItemId": id, "productId": id * 10, "price": 10, "quantity": qty})
            })
            .collect();
        let amount: u32 = lines.iter().map(|(_, qty)| qty * 10).sum();
        json!({"items": items, "total": lines.len(), "totalAmount": amount})
    }

    #[tokio::test]
    async fn test_fetch_copies_totals() {
        let h = Harness::logged_in();
        h.transport.respond_ok(cart(&[(1, 2), (2, 1)]));
        let mut store = CartStore::new(h.client.clone());

        assert!(store.is_empty());
        assert!(store.fetch().await);
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.total_amount(), Price::from_fen(3000));
        assert_eq!(store.cart_item_ids(), vec![CartItemId::new(1), CartItemId::new(2)]);
    }

    #[tokio::test]
    async fn test_add_refetches() {
        let h = Harness::logged_in();
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(cart(&[(1, 3)]));
        let mut store = CartStore::new(h.client.clone());

        let params = CartAddParams { product_id: ProductId::new(10), quantity: 3 };
        assert!(store.add(params).await);

        let paths: Vec<_> =
            h.transport.requests().into_iter().map(|r| (r.method, r.path)).collect();
        assert_eq!(
            paths,
            vec![
                (reqwest::Method::POST, "/cart".to_string()),
                (reqwest::Method::GET, "/cart".to_string()),
            ]
        );
        assert_eq!(store.items()[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_add_failure_skips_refetch() {
        let h = Harness::logged_in();
        h.transport.respond_business_error(20002, "商品库存不足");
        let mut store = CartStore::new(h.client.clone());

        let params = CartAddParams { product_id: ProductId::new(10), quantity: 99 };
        assert!(!store.add(params).await);
        assert_eq!(h.transport.requests().len(), 1);
        assert_eq!(h.notifier.messages(ToastLevel::Error), vec!["商品库存不足"]);
    }

    #[tokio::test]
    async fn test_remove_refetches_then_toasts() {
        let h = Harness::logged_in();
        h.transport.respond_ok(cart(&[(1, 1), (2, 1)]));
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(cart(&[(2, 1)]));
        let mut store = CartStore::new(h.client.clone());
        store.fetch().await;

        assert!(store.remove(CartItemId::new(1)).await);
        assert_eq!(store.cart_item_ids(), vec![CartItemId::new(2)]);
        assert_eq!(store.total_amount(), Price::from_fen(1000));
        assert!(h.notifier.contains("商品已从购物车移除"));
        assert_eq!(h.transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_checkout_returns_order() {
        let h = Harness::logged_in();
        h.transport.respond_ok(json!({
            "orderId": 40,
            "totalAmount": 20,
            "paymentMethod": "ALIPAY",
            "status": "PENDING",
            "shippingAddress": "南京市鼓楼区"
        }));
        let mut store = CartStore::new(h.client.clone());

        let checkout = Checkout {
            user_id: None,
            cart_item_ids: vec![CartItemId::new(1)],
            shipping_address: "南京市鼓楼区".to_string(),
            payment_method: PaymentMethod::Alipay,
        };
        let order = store.checkout(&checkout).await.unwrap();

        assert_eq!(order.order_id, Some(OrderId::new(40)));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(h.notifier.contains("订单创建成功，即将跳转到支付页面"));
        assert!(!store.loading().is_loading());
    }

    #[tokio::test]
    async fn test_clear_zeroes_state() {
        let h = Harness::logged_in();
        h.transport.respond_ok(cart(&[(1, 2)]));
        h.transport.respond_ok(Value::Null);
        let mut store = CartStore::new(h.client.clone());
        store.fetch().await;

        assert!(store.clear().await);
        assert!(store.is_empty());
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.total_amount(), Price::default());
        assert!(h.notifier.contains("购物车已清空"));
    }
}
