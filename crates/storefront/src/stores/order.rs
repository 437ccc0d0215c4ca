use tomato_core::OrderId;

use crate::action::{ActionOptions, LoadingFlag, perform_async, perform_async_action};
use crate::client::ApiClient;
use crate::models::{Order, Payment};
use crate::services::OrderService;

/// Orders of the logged-in user and the payment being made.
///
/// Order status is only ever taken from server responses.
#[derive(Debug)]
pub struct OrderStore {
    service: OrderService,
    current_order: Option<Order>,
    payment: Option<Payment>,
    orders: Vec<Order>,
    loading: LoadingFlag,
}

impl OrderStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: OrderService::new(client),
            current_order: None,
            payment: None,
            orders: Vec::new(),
            loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub const fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    #[must_use]
    pub const fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub async fn fetch_by_id(&mut self, id: OrderId) -> bool {
        let options = ActionOptions::new("获取订单详情失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.get(id),
            |order| self.current_order = Some(order),
            &options,
        )
        .await
    }

    /// Start payment. The returned form is also kept in [`Self::payment`].
    pub async fn pay(&mut self, id: OrderId) -> Option<Payment> {
        let options = ActionOptions::new("订单支付失败");
        let loading = &self.loading;
        let payment = perform_async(
            self.service.client().notifier(),
            self.service.pay(id),
            |payment| payment,
            &options,
            || loading.set(true),
            || loading.set(false),
            None,
        )
        .await?;
        self.payment = Some(payment.clone());
        Some(payment)
    }

    /// Cancel an order. When it is the one being viewed, it is refetched so
    /// the new status comes from the server.
    pub async fn cancel(&mut self, id: OrderId) -> bool {
        let options = ActionOptions::new("订单取消失败").success_message("订单已取消");
        let ok = perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.cancel(id),
            |_| (),
            &options,
        )
        .await;
        let is_current = self
            .current_order
            .as_ref()
            .is_some_and(|order| order.order_id == Some(id));
        if ok && is_current {
            self.fetch_by_id(id).await;
        }
        ok
    }

    pub async fn fetch_list(&mut self) -> bool {
        let options = ActionOptions::new("获取订单列表失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.list(),
            |orders| self.orders = orders,
            &options,
        )
        .await
    }

    /// Forget the viewed order and its payment form.
    pub fn clear_current(&mut self) {
        self.current_order = None;
        self.payment = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};
    use tomato_core::OrderStatus;

    use super::*;
    use crate::client::test_support::Harness;
    use crate::notify::ToastLevel;

    fn order(id: i64, status: &str) -> Value {
        json!({
            "orderId": id,
            "userId": 1,
            "totalAmount": 88.8,
            "paymentMethod": "ALIPAY",
            "status": status,
            "shippingAddress": "上海市",
            "createTime": "2025-04-01 10:00:00",
            "orderItems": [{"productId": 3, "quantity": 1}]
        })
    }

    #[tokio::test]
    async fn test_fetch_by_id_sets_current() {
        let h = Harness::logged_in();
        h.transport.respond_ok(order(40, "PENDING"));
        let mut store = OrderStore::new(h.client.clone());

        assert!(store.fetch_by_id(OrderId::new(40)).await);
        let current = store.current_order().unwrap();
        assert_eq!(current.status, OrderStatus::Pending);
        assert_eq!(current.order_items.len(), 1);
        assert!(current.create_time.is_some());
    }

    #[tokio::test]
    async fn test_pay_keeps_payment() {
        let h = Harness::logged_in();
        h.transport.respond_ok(json!({
            "paymentForm": "<form></form>",
            "orderId": 40,
            "totalAmount": 88.8,
            "paymentMethod": "ALIPAY"
        }));
        let mut store = OrderStore::new(h.client.clone());

        let payment = store.pay(OrderId::new(40)).await.unwrap();
        assert_eq!(payment.payment_form, "<form></form>");
        assert_eq!(store.payment(), Some(&payment));
        assert_eq!(h.transport.last_request().unwrap().path, "/orders/40/pay");
    }

    #[tokio::test]
    async fn test_pay_failure_toasts() {
        let h = Harness::logged_in();
        h.transport.respond_business_error(40002, "订单状态不允许支付");
        let mut store = OrderStore::new(h.client.clone());

        assert!(store.pay(OrderId::new(40)).await.is_none());
        assert!(store.payment().is_none());
        assert!(h.notifier.contains("订单支付失败"));
    }

    #[tokio::test]
    async fn test_cancel_refetches_current_order() {
        let h = Harness::logged_in();
        h.transport.respond_ok(order(40, "PENDING"));
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(order(40, "CANCELLED"));
        let mut store = OrderStore::new(h.client.clone());
        store.fetch_by_id(OrderId::new(40)).await;

        assert!(store.cancel(OrderId::new(40)).await);
        assert_eq!(store.current_order().unwrap().status, OrderStatus::Cancelled);
        assert_eq!(h.notifier.messages(ToastLevel::Success), vec!["订单已取消"]);
    }

    #[tokio::test]
    async fn test_cancel_other_order_does_not_refetch() {
        let h = Harness::logged_in();
        h.transport.respond_ok(order(40, "PENDING"));
        h.transport.respond_ok(Value::Null);
        let mut store = OrderStore::new(h.client.clone());
        store.fetch_by_id(OrderId::new(40)).await;

        assert!(store.cancel(OrderId::new(41)).await);
        assert_eq!(h.transport.requests().len(), 2);
        assert_eq!(store.current_order().unwrap().status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_fetch_list_and_clear() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![order(40, "PAID"), order(41, "TIMEOUT")]);
        let mut store = OrderStore::new(h.client.clone());

        assert!(store.fetch_list().await);
        assert_eq!(store.orders().len(), 2);
        assert_eq!(store.orders()[1].status, OrderStatus::Timeout);

        store.clear_current();
        assert!(store.current_order().is_none() && store.payment().is_none());
    }
}
