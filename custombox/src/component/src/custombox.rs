use leptos::prelude::*;

use crate::config::Options;

/// Drives an imperative [`crate::Modal`] from a signal.
///
/// Setting `show` builds and opens a modal for `options`; clearing it closes
/// the modal. When the modal closes itself (escape, overlay click) `show` is
/// reset. Renders no markup of its own.
#[component]
pub fn Custombox(#[prop(into)] show: RwSignal<bool>, options: Options) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;

        use utils::web::{GlooTransport, WebSurface};

        use crate::modal::Modal;
        use crate::toggle::ModalToggle;

        let toggle = StoredValue::new_local(ModalToggle::<WebSurface>::default());

        Effect::new(move |_| {
            let visible = show.get();
            let options = options.clone();
            let applied = toggle.try_update_value(|toggle| {
                toggle.set(
                    visible,
                    || Modal::new(WebSurface::new()?, Rc::new(GlooTransport), options),
                    move || show.set(false),
                )
            });
            if let Some(Err(e)) = applied {
                log::error!("cannot show modal: {e}");
                show.set(false);
            }
        });
    }

    #[cfg(not(feature = "hydrate"))]
    {
        _ = (show, options);
    }
}
