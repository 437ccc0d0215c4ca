use tomato_core::{CommentId, FeedbackType, NoteId, ProductId, UserId};

use crate::action::{ActionOptions, LoadingFlag, perform_async_action};
use crate::cache::{EntityCache, ListView};
use crate::client::ApiClient;
use crate::models::{Note, NoteComment, NoteCommentParams, NoteParams};
use crate::services::NoteService;

/// Reading notes plus the comments of the note being viewed.
///
/// Notes are cached once per id, so a feedback or comment on a note is
/// visible in every list it appears in and in the current slot.
#[derive(Debug)]
pub struct NoteStore {
    service: NoteService,
    notes: EntityCache<Note>,
    comments: Vec<NoteComment>,
    loading: LoadingFlag,
    comment_loading: LoadingFlag,
}

impl NoteStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: NoteService::new(client),
            notes: EntityCache::new(),
            comments: Vec::new(),
            loading: LoadingFlag::new(),
            comment_loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &EntityCache<Note> {
        &self.notes
    }

    #[must_use]
    pub fn notes(&self, view: ListView) -> Vec<&Note> {
        self.notes.view(view).collect()
    }

    #[must_use]
    pub fn product_notes(&self) -> Vec<&Note> {
        self.notes(ListView::Product)
    }

    #[must_use]
    pub fn user_notes(&self) -> Vec<&Note> {
        self.notes(ListView::User)
    }

    #[must_use]
    pub fn current(&self) -> Option<&Note> {
        self.notes.current()
    }

    /// Comments of the last note whose comments were fetched, newest first.
    #[must_use]
    pub fn comments(&self) -> &[NoteComment] {
        &self.comments
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    #[must_use]
    pub const fn comment_loading(&self) -> &LoadingFlag {
        &self.comment_loading
    }

    #[must_use]
    pub fn has_user_created_note(&self, product_id: ProductId, user_id: UserId) -> bool {
        self.user_note_for_product(product_id, user_id).is_some()
    }

    /// Looked up in the product list only.
    #[must_use]
    pub fn user_note_for_product(&self, product_id: ProductId, user_id: UserId) -> Option<&Note> {
        self.notes
            .view(ListView::Product)
            .find(|n| n.product_id == product_id && n.user_id == user_id)
    }

    pub async fn fetch_product_notes(&mut self, product_id: ProductId) -> bool {
        let options = ActionOptions::new(format!("获取商品读书笔记失败（ID: {product_id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.for_product(product_id),
            |notes| self.notes.replace_view(ListView::Product, notes),
            &options,
        )
        .await
    }

    pub async fn fetch_user_notes(&mut self) -> bool {
        let options = ActionOptions::new("获取用户读书笔记列表失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.mine(),
            |notes| self.notes.replace_view(ListView::User, notes),
            &options,
        )
        .await
    }

    pub async fn fetch_user_notes_as_admin(&mut self, user_id: UserId) -> bool {
        let options =
            ActionOptions::new(format!("获取用户读书笔记列表失败（用户 ID: {user_id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.for_user(user_id),
            |notes| self.notes.replace_view(ListView::ManagedUser, notes),
            &options,
        )
        .await
    }

    pub async fn fetch_all_notes(&mut self) -> bool {
        let options = ActionOptions::new("获取所有读书笔记失败");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.all(),
            |notes| self.notes.replace_view(ListView::All, notes),
            &options,
        )
        .await
    }

    /// Load one note and make it current.
    pub async fn fetch_by_id(&mut self, id: NoteId) -> Option<Note> {
        let options = ActionOptions::new(format!("获取读书笔记详情失败（ID: {id}）"));
        let mut fetched = None;
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.get(id),
            |note: Note| {
                fetched = Some(note.clone());
                self.notes.set_current(Some(note));
            },
            &options,
        )
        .await;
        fetched
    }

    /// Publish a note: prepended to the product and user lists and made
    /// current.
    pub async fn create(&mut self, product_id: ProductId, params: &NoteParams) -> bool {
        let options = ActionOptions::new(format!("创建读书笔记失败（商品 ID: {product_id}）"))
            .created()
            .success_message("读书笔记发布成功");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.create(product_id, params),
            |note: Note| {
                self.notes
                    .prepend(&[ListView::Product, ListView::User], note.clone());
                self.notes.set_current(Some(note));
            },
            &options,
        )
        .await
    }

    pub async fn update(&mut self, id: NoteId, params: &NoteParams) -> bool {
        let options = ActionOptions::new(format!("更新读书笔记失败（ID: {id}）"))
            .success_message("读书笔记更新成功");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.update(id, params),
            |note| {
                self.notes.patch(note);
            },
            &options,
        )
        .await
    }

    pub async fn update_as_admin(&mut self, id: NoteId, params: &NoteParams) -> bool {
        let options = ActionOptions::new(format!("管理员更新读书笔记失败（ID: {id}）"))
            .success_message("读书笔记已修改");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.update_as_admin(id, params),
            |note| {
                self.notes.patch(note);
            },
            &options,
        )
        .await
    }

    pub async fn delete(&mut self, id: NoteId) -> bool {
        let options = ActionOptions::new(format!("删除读书笔记失败（ID: {id}）"))
            .success_message("读书笔记已删除");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.delete(id),
            |_| {
                self.notes.remove(id);
            },
            &options,
        )
        .await
    }

    pub async fn delete_as_admin(&mut self, id: NoteId) -> bool {
        let options = ActionOptions::new(format!("管理员删除读书笔记失败（ID: {id}）"))
            .success_message("读书笔记已删除");
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.delete_as_admin(id),
            |_| {
                self.notes.remove(id);
            },
            &options,
        )
        .await
    }

    /// Like or dislike. The server's copy of the note replaces the cached
    /// one; a repeated identical feedback is rejected and changes nothing.
    pub async fn add_feedback(&mut self, id: NoteId, feedback_type: FeedbackType) -> bool {
        let options = ActionOptions::new(format!("添加反馈失败（ID: {id}）"));
        perform_async_action(
            &self.loading,
            self.service.client().notifier(),
            self.service.feedback(id, feedback_type),
            |note| {
                self.notes.patch(note);
            },
            &options,
        )
        .await
    }

    pub async fn fetch_comments(&mut self, note_id: NoteId) -> bool {
        let options = ActionOptions::new(format!("获取读书笔记评论失败（ID: {note_id}）"));
        perform_async_action(
            &self.comment_loading,
            self.service.client().notifier(),
            self.service.comments(note_id),
            |comments| self.comments = comments,
            &options,
        )
        .await
    }

    /// Post a comment and bump the note's comment count.
    pub async fn add_comment(&mut self, note_id: NoteId, params: &NoteCommentParams) -> bool {
        let options = ActionOptions::new(format!("添加评论失败（笔记 ID: {note_id}）"))
            .created()
            .success_message("评论发布成功");
        perform_async_action(
            &self.comment_loading,
            self.service.client().notifier(),
            self.service.add_comment(note_id, params),
            |comment| {
                self.comments.insert(0, comment);
                if let Some(note) = self.notes.get_mut(note_id) {
                    note.adjust_comment_count(1);
                }
            },
            &options,
        )
        .await
    }

    pub async fn delete_comment(&mut self, note_id: NoteId, comment_id: CommentId) -> bool {
        let options = ActionOptions::new(format!("删除评论失败（ID: {comment_id}）"))
            .success_message("评论已删除");
        perform_async_action(
            &self.comment_loading,
            self.service.client().notifier(),
            self.service.delete_comment(note_id, comment_id),
            |_| {
                self.comments.retain(|c| c.id != comment_id);
                if let Some(note) = self.notes.get_mut(note_id) {
                    note.adjust_comment_count(-1);
                }
            },
            &options,
        )
        .await
    }

    pub async fn delete_comment_as_admin(
        &mut self,
        note_id: NoteId,
        comment_id: CommentId,
    ) -> bool {
        let options = ActionOptions::new(format!("管理员删除评论失败（ID: {comment_id}）"))
            .success_message("评论已删除");
        perform_async_action(
            &self.comment_loading,
            self.service.client().notifier(),
            self.service.delete_comment_as_admin(note_id, comment_id),
            |_| {
                self.comments.retain(|c| c.id != comment_id);
                if let Some(note) = self.notes.get_mut(note_id) {
                    note.adjust_comment_count(-1);
                }
            },
            &options,
        )
        .await
    }

    pub fn set_current(&mut self, note: Option<Note>) {
        self.notes.set_current(note);
    }

    pub fn clear_current(&mut self) {
        self.notes.set_current(None);
    }

    pub fn clear_comments(&mut self) {
        self.comments.clear();
    }
}
