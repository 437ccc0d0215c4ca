use tomato_core::{ProductId, ReviewId, UserId};

use crate::action::{ActionOptions, LoadingFlag, perform_async_action};
use crate::cache::{EntityCache, ListView};
use crate::client::ApiClient;
use crate::models::{Review, ReviewParams};
use crate::services::ReviewService;

/// Book reviews, shared between the product page, the user's own list and
/// the admin lists.
#[derive(Debug)]
pub struct ReviewStore {
    service: ReviewService,
    reviews: EntityCache<Review>,
    loading: LoadingFlag,
}

impl ReviewStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: ReviewService::new(client),
            reviews: EntityCache::new(),
            loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &EntityCache<Review> {
        &self.reviews
    }

    #[must_use]
    pub fn reviews(&self, view: ListView) -> Vec<&Review> {
        self.reviews.view(view).collect()
    }

    #[must_use]
    pub fn product_reviews(&self) -> Vec<&Review> {
        self.reviews(ListView::Product)
    }

    #[must_use]
    pub fn user_reviews(&self) -> Vec<&Review> {
        self.reviews(ListView::User)
    }

    #[must_use]
    pub fn current(&self) -> Option<&Review> {
        self.reviews.current()
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Whether `user_id` already reviewed `product_id`, judged from the
    /// product list.
    #[must_use]
    pub fn has_user_reviewed(&self, product_id: ProductId, user_id: UserId) -> bool {
        self.user_review_for_product(product_id, user_id).is_some()
    }

    #[must_use]
    pub fn user_review_for_product(
        &self,
        product_id: ProductId,
        user_id: UserId,
    ) -> Option<&Review> {
        self.reviews
            .view(ListView::Product)
            .find(|r| r.product_id == product_id && r.user_id == user_id)
    }

    pub async fn fetch_product_reviews(&mut self, product_id: ProductId) -> bool {
        let options = ActionOptions::new(format!("获取商品书评失败（ID: {product_id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.for_product(product_id),
            |reviews| self.reviews.replace_view(ListView::Product, reviews),
            &options,
        )
        .await
    }

    pub async fn fetch_user_reviews(&mut self) -> bool {
        let options = ActionOptions::new("获取用户书评列表失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.mine(),
            |reviews| self.reviews.replace_view(ListView::User, reviews),
            &options,
        )
        .await
    }

    /// Admin: load another user's reviews into the managed-user list.
    pub async fn fetch_user_reviews_as_admin(&mut self, user_id: UserId) -> bool {
        let options = ActionOptions::new(format!("获取用户书评列表失败（用户ID: {user_id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.for_user(user_id),
            |reviews| self.reviews.replace_view(ListView::ManagedUser, reviews),
            &options,
        )
        .await
    }

    pub async fn fetch_all_reviews(&mut self) -> bool {
        let options = ActionOptions::new("获取所有书评失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.all(),
            |reviews| self.reviews.replace_view(ListView::All, reviews),
            &options,
        )
        .await
    }

    /// Post a review. It is prepended to the product and user lists.
    pub async fn create(&mut self, product_id: ProductId, params: &ReviewParams) -> bool {
        let options = ActionOptions::new(format!("创建书评失败（商品ID: {product_id}）"))
            .created()
            .success_message("书评发布成功");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.create(product_id, params),
            |review| {
                self.reviews
                    .prepend(&[ListView::Product, ListView::User], review);
            },
            &options,
        )
        .await
    }

    pub async fn update(&mut self, id: ReviewId, params: &ReviewParams) -> bool {
        let options = ActionOptions::new(format!("更新书评失败（ID: {id}）"))
            .success_message("书评更新成功");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.update(id, params),
            |review| {
                self.reviews.patch(review);
            },
            &options,
        )
        .await
    }

    pub async fn update_as_admin(&mut self, id: ReviewId, params: &ReviewParams) -> bool {
        let options = ActionOptions::new(format!("管理员更新书评失败（ID: {id}）"))
            .success_message("书评已修改");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.update_as_admin(id, params),
            |review| {
                self.reviews.patch(review);
            },
            &options,
        )
        .await
    }

    pub async fn delete(&mut self, id: ReviewId) -> bool {
        let options =
            ActionOptions::new(format!("删除书评失败（ID: {id}）")).success_message("书评已删除");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.delete(id),
            |_| {
                self.reviews.remove(id);
            },
            &options,
        )
        .await
    }

    pub async fn delete_as_admin(&mut self, id: ReviewId) -> bool {
        let options = ActionOptions::new(format!("管理员删除书评失败（ID: {id}）"))
            .success_message("书评已删除");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.delete_as_admin(id),
            |_| {
                self.reviews.remove(id);
            },
            &options,
        )
        .await
    }

    pub fn set_current(&mut self, review: Option<Review>) {
        self.reviews.set_current(review);
    }

    pub fn clear_current(&mut self) {
        self.reviews.set_current(None);
    }
}
