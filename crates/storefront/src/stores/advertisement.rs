use tomato_core::AdvertisementId;

use crate::action::{ActionOptions, LoadingFlag, perform_async_action};
use crate::client::ApiClient;
use crate::models::Advertisement;
use crate::services::AdvertisementService;

/// Homepage banners.
#[derive(Debug)]
pub struct AdvertisementStore {
    service: AdvertisementService,
    advertisements: Vec<Advertisement>,
    current: Option<Advertisement>,
    loading: LoadingFlag,
    admin_loading: LoadingFlag,
}

impl AdvertisementStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: AdvertisementService::new(client),
            advertisements: Vec::new(),
            current: None,
            loading: LoadingFlag::new(),
            admin_loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub fn advertisements(&self) -> &[Advertisement] {
        &self.advertisements
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Advertisement> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    #[must_use]
    pub const fn admin_loading(&self) -> &LoadingFlag {
        &self.admin_loading
    }

    pub async fn fetch_all(&mut self) -> bool {
        let options = ActionOptions::new("获取广告列表失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.list(),
            |ads| self.advertisements = ads,
            &options,
        )
        .await
    }

    pub async fn fetch_by_id(&mut self, id: AdvertisementId) -> bool {
        let options = ActionOptions::new(format!("获取广告详情失败（ID: {id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.get(id),
            |ad| self.current = Some(ad),
            &options,
        )
        .await
    }

    pub async fn create(&mut self, advertisement: &Advertisement) -> bool {
        let options = ActionOptions::new("创建广告失败").success_message("广告创建成功");
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.create(advertisement),
            |created| self.advertisements.insert(0, created),
            &options,
        )
        .await
    }

    /// Replaces the list entry and the viewed banner with the server's copy.
    pub async fn update(&mut self, advertisement: &Advertisement) -> bool {
        let label = advertisement
            .id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let options = ActionOptions::new(format!("更新广告失败（ID: {label}）"))
            .success_message("广告更新成功");
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.update(advertisement),
            |updated| {
                if let Some(slot) = self
                    .advertisements
                    .iter_mut()
                    .find(|a| a.id == advertisement.id)
                {
                    slot.clone_from(&updated);
                }
                if self.current.as_ref().is_some_and(|a| a.id == updated.id) {
                    self.current = Some(updated);
                }
            },
            &options,
        )
        .await
    }

    pub async fn delete(&mut self, id: AdvertisementId) -> bool {
        let options =
            ActionOptions::new(format!("删除广告失败（ID: {id}）")).success_message("广告删除成功");
        perform_async_action(
            &self.admin_loading,
            self.service.client().notifier(),
            self.service.delete(id),
            |_| {
                self.advertisements.retain(|a| a.id != Some(id));
                if self.current.as_ref().is_some_and(|a| a.id == Some(id)) {
                    self.current = None;
                }
            },
            &options,
        )
        .await
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;
    use tomato_core::ProductId;

    use super::*;
    use crate::client::test_support::Harness;

    fn ad(id: Option<i64>, title: &str) -> Advertisement {
        Advertisement {
            id: id.map(AdvertisementId::new),
            title: title.to_string(),
            content: "限时折扣".to_string(),
            image_url: "https://cdn.example.com/ad.png".to_string(),
            product_id: ProductId::new(3),
        }
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![ad(Some(1), "旧广告")]);
        h.transport.respond_ok(ad(Some(2), "新广告"));
        let mut store = AdvertisementStore::new(h.client.clone());
        store.fetch_all().await;

        assert!(store.create(&ad(None, "新广告")).await);
        let titles: Vec<_> = store.advertisements().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["新广告", "旧广告"]);
        assert!(h.notifier.contains("广告创建成功"));
    }

    #[tokio::test]
    async fn test_update_uses_server_copy() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![ad(Some(1), "旧标题")]);
        let mut server_copy = ad(Some(1), "新标题");
        server_copy.content = "服务器内容".to_string();
        h.transport.respond_ok(server_copy.clone());
        let mut store = AdvertisementStore::new(h.client.clone());
        store.fetch_all().await;

        assert!(store.update(&ad(Some(1), "新标题")).await);
        assert_eq!(store.advertisements(), &[server_copy]);
    }

    #[tokio::test]
    async fn test_delete_and_fetch_by_id() {
        let h = Harness::logged_in();
        h.transport.respond_ok(vec![ad(Some(1), "甲"), ad(Some(2), "乙")]);
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(ad(Some(2), "乙"));
        let mut store = AdvertisementStore::new(h.client.clone());
        store.fetch_all().await;

        assert!(store.delete(AdvertisementId::new(1)).await);
        assert_eq!(store.advertisements().len(), 1);
        assert!(h.notifier.contains("广告删除成功"));

        assert!(store.fetch_by_id(AdvertisementId::new(2)).await);
        assert_eq!(store.current().unwrap().title, "乙");
        store.clear_current();
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_track_viewed_banner() {
        let h = Harness::logged_in();
        h.transport.respond_ok(ad(Some(2), "乙"));
        h.transport.respond_ok(ad(Some(2), "乙二"));
        h.transport.respond_ok(Value::Null);
        h.transport.respond_ok(Value::Null);
        let mut store = AdvertisementStore::new(h.client.clone());
        assert!(store.fetch_by_id(AdvertisementId::new(2)).await);

        assert!(store.update(&ad(Some(2), "乙二")).await);
        assert_eq!(store.current().unwrap().title, "乙二");

        assert!(store.delete(AdvertisementId::new(1)).await);
        assert!(store.current().is_some());

        assert!(store.delete(AdvertisementId::new(2)).await);
        assert!(store.current().is_none());
    }
}
