//! Uniform wrapper for store actions.
//!
//! Stores never surface `ClientError`. They run each API call through
//! [`perform_async`] or [`perform_async_action`], which toggle the loading
//! state, check the envelope code, toast on success or failure and collapse
//! the outcome to `Option`/`bool`.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error};

use tomato_core::ApiResponse;

use crate::error::ClientError;
use crate::notify::Notifier;

/// A shared "request in flight" flag.
///
/// Clones observe the same flag, so a front end can watch it while a store
/// awaits.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, loading: bool) {
        self.0.store(loading, Ordering::SeqCst);
    }
}

/// Runs a closure when dropped, so cleanup also happens when the future
/// driving an action is cancelled.
struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

/// How an action reports its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOptions {
    /// Logged on failure, and toasted when `show_error` is set.
    pub error_message: String,
    pub show_error: bool,
    /// Envelope codes that count as success.
    pub success_codes: Vec<i32>,
    /// Toasted after the success handler ran.
    pub success_message: Option<String>,
}

impl ActionOptions {
    /// Defaults: show errors, accept only code 200, no success toast.
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            show_error: true,
            success_codes: vec![200],
            success_message: None,
        }
    }

    /// Do not toast failures.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.show_error = false;
        self
    }

    /// Accept only code 201 (resource created).
    #[must_use]
    pub fn created(self) -> Self {
        self.success_codes(&[201])
    }

    #[must_use]
    pub fn success_codes(mut self, codes: &[i32]) -> Self {
        self.success_codes = codes.to_vec();
        self
    }

    #[must_use]
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }
}

/// Run `call` and map its outcome.
///
/// `on_start` runs first; `on_end` runs on every exit path, including when
/// the returned future is dropped early. If the envelope code is one of
/// `options.success_codes`, the optional `success_message` is toasted and
/// `on_success(data)` is returned. Any other code yields `None` silently. An
/// error is logged, toasted if `options.show_error` and yields `None`.
pub async fn perform_async<T, R, Fut>(
    notifier: &dyn Notifier,
    call: Fut,
    on_success: impl FnOnce(T) -> R,
    options: &ActionOptions,
    on_start: impl FnOnce(),
    on_end: impl FnOnce(),
    success_message: Option<&(dyn Fn(&T) -> String + Sync)>,
) -> Option<R>
where
    Fut: Future<Output = Result<ApiResponse<T>, ClientError>>,
{
    on_start();
    let _finally = OnDrop(Some(on_end));

    match call.await {
        Ok(response) if options.success_codes.contains(&response.code) => {
            if let Some(message) = success_message {
                notifier.success(&message(&response.data));
            }
            Some(on_success(response.data))
        }
        Ok(response) => {
            debug!(
                code = response.code,
                expected = ?options.success_codes,
                "Unexpected success code, ignoring response"
            );
            None
        }
        Err(err) => {
            error!(error = %err, "{}", options.error_message);
            if options.show_error {
                notifier.error(&options.error_message);
            }
            None
        }
    }
}

/// [`perform_async`] specialised for store actions: drives `loading`, toasts
/// `options.success_message` after `on_success` and reports success as `bool`.
pub async fn perform_async_action<T, Fut>(
    loading: &LoadingFlag,
    notifier: &dyn Notifier,
    call: Fut,
    on_success: impl FnOnce(T),
    options: &ActionOptions,
) -> bool
where
    Fut: Future<Output = Result<ApiResponse<T>, ClientError>>,
{
    perform_async(
        notifier,
        call,
        |data| {
            on_success(data);
            if let Some(message) = &options.success_message {
                notifier.success(message);
            }
            true
        },
        options,
        || loading.set(true),
        || loading.set(false),
        None,
    )
    .await
    .unwrap_or(false)
}
