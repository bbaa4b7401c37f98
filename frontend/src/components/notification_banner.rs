use crate::state::use_app;
use crate::web::Timeout;
use leptos::prelude::*;
use userdesk::NotificationColor;

/// 全局通知横幅
///
/// 通知存储本身没有定时器，这里按 `timeout_ms` 在显示后自动隐藏；
/// 新通知到来时旧的定时器随之取消。
#[component]
pub fn NotificationBanner() -> impl IntoView {
    let ctx = use_app();
    let notification = ctx.notification;
    let timer = StoredValue::new_local(Option::<Timeout>::None);

    Effect::new(move |_| {
        let current = notification.get();
        if current.visible {
            let notifications = ctx.notifications();
            timer.set_value(Some(Timeout::new(current.timeout_ms, move || {
                notifications.hide();
            })));
        } else {
            timer.set_value(None);
        }
    });

    let on_close = move |_| ctx.notifications().hide();

    view! {
        <Show when=move || notification.with(|n| n.visible)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || match notification.with(|n| n.color) {
                    NotificationColor::Success => "alert alert-success shadow-lg",
                    NotificationColor::Error => "alert alert-error shadow-lg",
                }>
                    <span>{move || notification.with(|n| n.message.clone())}</span>
                    <button class="btn btn-ghost btn-xs" on:click=on_close>"✕"</button>
                </div>
            </div>
        </Show>
    }
}
