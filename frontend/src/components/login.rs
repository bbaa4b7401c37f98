use crate::components::icons::ShieldCheck;
use crate::state::use_app;
use crate::web::router::{Link, use_navigate};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let notifications = ctx.notifications();
        if username.get().is_empty() || password.get().is_empty() {
            notifications.show_error("Please fill in all fields");
            return;
        }

        set_is_submitting.set(true);

        let session = ctx.session_store();
        let navigate = navigate.clone();
        spawn_local(async move {
            let success = session.login(&username.get_untracked(), &password.get_untracked()).await;
            if success {
                notifications.show_success("Signed in");
                navigate("/user");
            } else {
                notifications.show_error("Sign-in failed, check your username and password");
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Sign in"</h1>
                        <p class="text-base-content/70">"Enter your credentials to continue"</p>
                    </div>
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
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
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
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <Link to="/register" class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
