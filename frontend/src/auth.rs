use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Bridge to the external identity provider.
///
/// The hosting page exposes the provider under `window.__auth` with
/// `isLoaded()`, `isSignedIn()`, `getToken()` (returns a promise resolving
/// to a bearer token) and `signIn()`. Sign-in UI and session handling stay
/// entirely on the provider's side; this type only consumes the capability.
#[derive(Clone, PartialEq, Default)]
pub struct AuthSession;

impl AuthSession {
    fn provider() -> Option<JsValue> {
        let window = web_sys::window()?;
        let value = Reflect::get(&window, &JsValue::from_str("__auth")).ok()?;
        if value.is_undefined() || value.is_null() {
            None
        } else {
            Some(value)
        }
    }

    fn call(name: &str) -> Option<JsValue> {
        let provider = Self::provider()?;
        let function: Function = Reflect::get(&provider, &JsValue::from_str(name))
            .ok()?
            .dyn_into()
            .ok()?;
        function.call0(&provider).ok()
    }

    /// Whether the provider has finished restoring the session. A missing
    /// provider counts as loaded so the signed-out landing page can render.
    pub fn is_loaded(&self) -> bool {
        match Self::provider() {
            None => true,
            Some(_) => Self::call("isLoaded")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        Self::call("isSignedIn")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Fresh bearer token for the current session, requested per API call.
    pub async fn token(&self) -> Option<String> {
        let promise: Promise = Self::call("getToken")?.dyn_into().ok()?;
        let resolved = JsFuture::from(promise).await.ok()?;
        resolved.as_string()
    }

    /// Open the provider's sign-in flow.
    pub fn sign_in(&self) {
        let _ = Self::call("signIn");
    }
}
