use tomato_core::ProductId;

use crate::action::{ActionOptions, LoadingFlag, perform_async_action};
use crate::client::ApiClient;
use crate::models::{Product, Stockpile, StockpileParams};
use crate::services::ProductService;

/// Catalog state: the product list, the product being viewed and its stock.
#[derive(Debug)]
pub struct ProductStore {
    service: ProductService,
    products: Vec<Product>,
    current_product: Option<Product>,
    current_stockpile: Option<Stockpile>,
    loading: LoadingFlag,
    admin_loading: LoadingFlag,
}

impl ProductStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: ProductService::new(client),
            products: Vec::new(),
            current_product: None,
            current_stockpile: None,
            loading: LoadingFlag::new(),
            admin_loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn current_product(&self) -> Option<&Product> {
        self.current_product.as_ref()
    }

    #[must_use]
    pub const fn current_stockpile(&self) -> Option<&Stockpile> {
        self.current_stockpile.as_ref()
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Set while an admin write is in flight.
    #[must_use]
    pub const fn admin_loading(&self) -> &LoadingFlag {
        &self.admin_loading
    }

    pub async fn fetch_all(&mut self) -> bool {
        let options = ActionOptions::new("获取商品列表失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.list(),
            |products| self.products = products,
            &options,
        )
        .await
    }

    pub async fn fetch_by_id(&mut self, id: ProductId) -> bool {
        let options = ActionOptions::new(format!("获取商品详情失败（ID: {id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.get(id),
            |product| self.current_product = Some(product),
            &options,
        )
        .await
    }

    /// Failures are logged but not toasted.
    pub async fn fetch_stockpile(&mut self, product_id: ProductId) -> bool {
        let options = ActionOptions::new(format!("获取商品库存失败（ID: {product_id}）")).quiet();
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.stockpile(product_id),
            |stockpile| self.current_stockpile = Some(stockpile),
            &options,
        )
        .await
    }

    pub async fn create(&mut self, product: &Product) -> bool {
        let options = ActionOptions::new("创建商品失败").success_message("商品创建成功");
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.create(product),
            |created| self.products.insert(0, created),
            &options,
        )
        .await
    }

    /// The server answers without a body, so the submitted product is merged
    /// into the list entry and the viewed product with the same id.
    pub async fn update(&mut self, product: &Product) -> bool {
        let label = product.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let options = ActionOptions::new(format!("更新商品失败（ID: {label}）"));
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.update(product),
            |_| {
                if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
                    slot.merge(product);
                }
                if let Some(current) = self
                    .current_product
                    .as_mut()
                    .filter(|p| p.id == product.id)
                {
                    current.merge(product);
                }
            },
            &options,
        )
        .await
    }

    pub async fn delete(&mut self, id: ProductId) -> bool {
        let options =
            ActionOptions::new(format!("删除商品失败（ID: {id}）")).success_message("商品删除成功");
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.delete(id),
            |_| {
                self.products.retain(|p| p.id != Some(id));
                if self.current_product.as_ref().is_some_and(|p| p.id == Some(id)) {
                    self.current_product = None;
                }
            },
            &options,
        )
        .await
    }

    /// Applies `params` to the current stockpile when it belongs to
    /// `product_id`.
    pub async fn update_stockpile(
        &mut self,
        product_id: ProductId,
        params: StockpileParams,
    ) -> bool {
        let options = ActionOptions::new(format!("更新商品库存失败（ID: {product_id}）"))
            .success_message("库存更新成功");
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.update_stockpile(product_id, params),
            |_| {
                if let Some(stockpile) = self
                    .current_stockpile
                    .as_mut()
                    .filter(|s| s.product_id == Some(product_id))
                {
                    stockpile.apply(params);
                }
            },
            &options,
        )
        .await
    }

    /// Forget the viewed product and its stockpile.
    pub fn clear_current(&mut self) {
        self.current_product = None;
        self.current_stockpile = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};
    use tomato_core::{Price, StockpileId};

    use super::*;
    use crate::client::test_support::Harness;
    use crate::notify::ToastLevel;

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: Some(ProductId::new(id)),
            title: title.to_string(),
            price: Price::from_fen(4500),
            rate: 8.5,
            description: None,
            cover: None,
            detail: None,
            specifications: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_replaces_list() {
        let h = Harness::new();
        h.transport.respond_ok(vec![product(1, "A"), product(2, "B")]);
        let mut store = ProductStore::new(h.client.clone());

        assert!(store.fetch_all().await);
        assert_eq!(store.products().len(), 2);
        assert_eq!(h.transport.last_request().unwrap().path, "/products");
    }

    #[tokio::test]
    async fn test_create_prepends_and_toasts() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![product(1, "A")]);
        h.transport.respond_ok(product(9, "新书"));
        let mut store = ProductStore::new(h.client.clone());
        store.fetch_all().await;

        assert!(store.create(&product(0, "新书")).await);
        assert_eq!(store.products()[0].id, Some(ProductId::new(9)));
        assert_eq!(store.products().len(), 2);
        assert!(h.notifier.contains("商品创建成功"));
    }

    #[tokio::test]
    async fn test_create_failure_leaves_list() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![product(1, "A")]);
        h.transport.respond_business_error(20001, "商品不存在");
        let mut store = ProductStore::new(h.client.clone());
        store.fetch_all().await;

        assert!(!store.create(&product(0, "新书")).await);
        assert_eq!(store.products(), &[product(1, "A")]);
        assert!(!store.admin_loading().is_loading());
        assert_eq!(
            h.notifier.messages(ToastLevel::Error),
            vec!["商品不存在", "创建商品失败"]
        );
    }

    #[tokio::test]
    async fn test_update_merges_submitted_product() {
        let mut cached = product(2, "B");
        cached.cover = Some("b.jpg".to_string());
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![product(1, "A"), cached]);
        h.transport.respond_ok(Value::Null);
        let mut store = ProductStore::new(h.client.clone());
        store.fetch_all().await;

        let edited = product(2, "B 第二版");
        assert!(store.update(&edited).await);
        assert_eq!(store.products()[1].title, "B 第二版");
        assert_eq!(store.products()[1].cover.as_deref(), Some("b.jpg"));
        assert_eq!(store.products()[0].title, "A");
    }

    #[tokio::test]
    async fn test_update_patches_viewed_product() {
        let h = Harness::logged_in();
        h.transport.respond_ok(product(1, "A"));
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(Value::Null);
        let mut store = ProductStore::new(h.client.clone());
        assert!(store.fetch_by_id(ProductId::new(1)).await);

        assert!(store.update(&product(1, "A2")).await);
        assert_eq!(store.current_product().unwrap().title, "A2");

        // Another product leaves the viewed one alone.
        assert!(store.update(&product(7, "G")).await);
        assert_eq!(store.current_product().unwrap().title, "A2");
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![product(1, "A"), product(2, "B")]);
        h.transport.respond_ok(Value::Null);
        let mut store = ProductStore::new(h.client.clone());
        store.fetch_all().await;

        assert!(store.delete(ProductId::new(1)).await);
        assert_eq!(store.products().len(), 1);
        assert!(h.notifier.contains("商品删除成功"));
        assert_eq!(h.transport.last_request().unwrap().path, "/products/1");
    }

    #[tokio::test]
    async fn test_delete_clears_viewed_product() {
        let h = Harness::logged_in();
        h.transport.respond_ok(product(1, "A"));
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(Value::Null);
        let mut store = ProductStore::new(h.client.clone());
        assert!(store.fetch_by_id(ProductId::new(1)).await);

        assert!(store.delete(ProductId::new(2)).await);
        assert!(store.current_product().is_some());

        assert!(store.delete(ProductId::new(1)).await);
        assert!(store.current_product().is_none());
    }

    #[tokio::test]
    async fn test_stockpile_fetch_is_quiet_and_update_patches() {
        let h = Harness::logged_in();
        h.transport.fail_timeout();
        h.transport.respond_ok(json!({"id": 4, "amount": 10, "frozen": 1, "productId": 3}));
        h.transport.respond_ok(Value::Null);
        let mut store = ProductStore::new(h.client.clone());

        assert!(!store.fetch_stockpile(ProductId::new(3)).await);
        assert!(!h.notifier.contains("获取商品库存失败（ID: 3）"));

        assert!(store.fetch_stockpile(ProductId::new(3)).await);
        let params = StockpileParams { amount: 50, frozen: 0 };
        assert!(store.update_stockpile(ProductId::new(3), params).await);

        let stockpile = store.current_stockpile().unwrap();
        assert_eq!(stockpile.id, Some(StockpileId::new(4)));
        assert_eq!(stockpile.amount, 50);
        assert!(h.notifier.contains("库存更新成功"));
    }

    #[tokio::test]
    async fn test_update_stockpile_ignores_other_product() {
        let h = Harness::logged_in();
        h.transport.respond_ok(json!({"amount": 10, "frozen": 1, "productId": 3}));
        h.transport.respond_ok(Value::Null);
        let mut store = ProductStore::new(h.client.clone());
        store.fetch_stockpile(ProductId::new(3)).await;

        let params = StockpileParams { amount: 0, frozen: 0 };
        assert!(store.update_stockpile(ProductId::new(8), params).await);
        assert_eq!(store.current_stockpile().unwrap().amount, 10);

        store.clear_current();
        assert!(store.current_stockpile().is_none());
    }
}
