use gloo::timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::auth::AuthSession;

#[derive(Clone, PartialEq, Default)]
pub struct AuthState {
    pub loaded: bool,
    pub signed_in: bool,
}

/// Track the identity provider's session state.
///
/// The bridge exposes no change events, so the provider is polled; state
/// updates only propagate when the snapshot actually changes.
#[hook]
pub fn use_auth(session: &AuthSession) -> AuthState {
    let state = use_state(AuthState::default);

    {
        let state = state.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            // Stops the loop when the owning component unmounts
            let active = Rc::new(Cell::new(true));
            let cancel = active.clone();
            spawn_local(async move {
                while active.get() {
                    let snapshot = AuthState {
                        loaded: session.is_loaded(),
                        signed_in: session.is_signed_in(),
                    };
                    if *state != snapshot {
                        state.set(snapshot);
                    }
                    TimeoutFuture::new(400).await;
                }
            });
            move || cancel.set(false)
        });
    }

    (*state).clone()
}
