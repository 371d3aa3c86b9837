use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// Wrap `callback` so it only fires once input has been quiet for `delay_ms`.
///
/// Each call replaces the pending timer; dropping a `Timeout` cancels it, so
/// only the last value in a burst reaches `callback`. A timer still pending
/// when the component unmounts is cancelled the same way.
#[hook]
pub fn use_debounced_callback<IN>(delay_ms: u32, callback: Callback<IN>) -> Callback<IN>
where
    IN: 'static,
{
    let pending = use_mut_ref(|| Option::<Timeout>::None);

    {
        let pending = pending.clone();
        use_effect_with((), move |_| {
            move || {
                pending.borrow_mut().take();
            }
        });
    }

    use_callback((delay_ms, callback), move |value: IN, (delay_ms, callback)| {
        let callback = callback.clone();
        let timeout = Timeout::new(*delay_ms, move || callback.emit(value));
        *pending.borrow_mut() = Some(timeout);
    })
}
