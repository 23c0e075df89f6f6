//! Async sleep on top of `window.setTimeout`.

use std::time::Duration;
use wasm_bindgen_futures::JsFuture;

pub async fn sleep(duration: Duration) {
    let millis = duration.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        match web_sys::window() {
            Some(window) => {
                if window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .is_err()
                {
                    log::error!("setTimeout failed");
                }
            }
            None => log::error!("no window; timer will never fire"),
        }
    });
    let _ = JsFuture::from(promise).await;
}
