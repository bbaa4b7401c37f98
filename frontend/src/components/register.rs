use crate::components::icons::UserPlus;
use crate::state::use_app;
use crate::web::router::{Link, use_navigate};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let notifications = ctx.notifications();
        if username.get().is_empty() || email.get().is_empty() || password.get().is_empty() {
            notifications.show_error("Username, password and email are required");
            return;
        }

        set_is_submitting.set(true);

        let session = ctx.session_store();
        let navigate = navigate.clone();
        spawn_local(async move {
            // 注册成功后需要重新登录
            let success = session
                .register(
                    &username.get_untracked(),
                    &password.get_untracked(),
                    &email.get_untracked(),
                )
                .await;
            if success {
                notifications.show_success("Account created, please sign in");
                navigate("/login");
            } else {
                notifications.show_error("Registration failed");
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="flex flex-col items-center gap-2 mb-4">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <UserPlus attr:class="h-8 w-8" />
                    </div>
                    <h1 class="text-3xl font-bold">"Create account"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="new-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to="/login" class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
