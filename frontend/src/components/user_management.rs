use crate::components::icons::LogOut;
use crate::state::{AppContext, use_app};
use leptos::prelude::*;
use leptos::task::spawn_local;
use userdesk::HttpError;
use userdesk::shared::{User, UserUpdate};

/// 可编辑的资料字段
#[derive(Debug, Clone, Default)]
struct ProfileForm {
    email: String,
    first_name: String,
    last_name: String,
    phone: String,
}

impl ProfileForm {
    fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
        }
    }

    /// 只提交与原值不同的字段
    fn diff(&self, user: &User) -> UserUpdate {
        let changed = |new: &str, old: &str| (new.trim() != old).then(|| new.trim().to_string());
        UserUpdate {
            email: changed(&self.email, &user.email),
            first_name: changed(&self.first_name, &user.first_name),
            last_name: changed(&self.last_name, &user.last_name),
            phone: changed(&self.phone, &user.phone),
            ..Default::default()
        }
    }
}

/// 统一处理请求失败：401 说明凭据已失效，直接登出交给守卫跳转
fn report(ctx: AppContext, action: &str, err: HttpError) {
    if err.is_unauthorized() {
        ctx.notifications().show_error("Session expired, please sign in again");
        ctx.session_store().logout();
    } else {
        ctx.notifications().show_error(format!("{} failed: {}", action, err));
    }
}

#[component]
pub fn UserManagementPage() -> impl IntoView {
    let ctx = use_app();

    let (user_id, set_user_id) = signal(String::new());
    let (selected, set_selected) = signal(Option::<User>::None);
    let (form, set_form) = signal(ProfileForm::default());
    let (loading, set_loading) = signal(false);

    let parse_id = move || user_id.get_untracked().trim().parse::<u64>().ok();

    let select = move |user: Option<User>| {
        set_form.set(user.as_ref().map(ProfileForm::from_user).unwrap_or_default());
        set_selected.set(user);
    };

    let on_lookup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = parse_id() else {
            ctx.notifications().show_error("Please enter a valid user ID");
            return;
        };

        let users = ctx.users();
        set_loading.set(true);
        spawn_local(async move {
            match users.get(id).await {
                Ok(user) => select(Some(user)),
                Err(e) => {
                    select(None);
                    report(ctx, "Loading user", e);
                }
            }
            set_loading.set(false);
        });
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = selected.get_untracked() else {
            return;
        };
        let update = form.with_untracked(|f| f.diff(&user));
        if update == UserUpdate::default() {
            ctx.notifications().show_success("Nothing to save");
            return;
        }

        let users = ctx.users();
        spawn_local(async move {
            match users.update(user.id, update).await {
                Ok(updated) => {
                    ctx.notifications().show_success("Profile saved");
                    select(Some(updated));
                }
                Err(e) => report(ctx, "Saving user", e),
            }
        });
    };

    let handle_delete = move |id: u64| {
        let users = ctx.users();
        spawn_local(async move {
            match users.delete(id).await {
                // 保留 ID，便于随后恢复
                Ok(()) => match users.get(id).await {
                    Ok(user) => {
                        ctx.notifications().show_success("User deleted");
                        select(Some(user));
                    }
                    Err(_) => {
                        ctx.notifications().show_success("User deleted");
                        select(None);
                    }
                },
                Err(e) => report(ctx, "Deleting user", e),
            }
        });
    };

    let handle_restore = move |id: u64| {
        let users = ctx.users();
        spawn_local(async move {
            match users.restore(id).await {
                Ok(()) => {
                    ctx.notifications().show_success("User restored");
                    if let Ok(user) = users.get(id).await {
                        select(Some(user));
                    }
                }
                Err(e) => report(ctx, "Restoring user", e),
            }
        });
    };

    let handle_use_profile = move |id: u64| {
        let session = ctx.session_store();
        spawn_local(async move {
            if session.load_profile(id).await {
                ctx.notifications().show_success("Profile loaded");
            } else {
                ctx.notifications().show_error("Loading profile failed");
            }
        });
    };

    // 登出后由导航器的守卫重新检查当前路由并跳回登录页
    let on_logout = move |_| ctx.session_store().logout();

    let greeting = move || {
        ctx.session
            .with(|s| s.user.as_ref().map(User::display_name))
            .unwrap_or_else(|| "signed in".to_string())
    };

    let field = move |label: &'static str,
                      get: fn(&ProfileForm) -> String,
                      set: fn(&mut ProfileForm, String)| {
        view! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input
                    type="text"
                    class="input input-bordered input-sm"
                    prop:value=move || form.with(get)
                    on:input=move |ev| set_form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-4xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow">
                    <div class="flex-1 px-2">
                        <h1 class="text-xl font-bold">"User Management"</h1>
                    </div>
                    <div class="flex-none gap-2">
                        <span class="text-sm text-base-content/70">{greeting}</span>
                        <button class="btn btn-ghost btn-sm" on:click=on_logout>
                            <LogOut attr:class="h-5 w-5" />
                            "Logout"
                        </button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <form class="card-body flex-row items-end gap-4" on:submit=on_lookup>
                        <div class="form-control flex-1">
                            <label class="label" for="user-id">
                                <span class="label-text">"User ID"</span>
                            </label>
                            <input
                                id="user-id"
                                type="number"
                                min="1"
                                on:input=move |ev| set_user_id.set(event_target_value(&ev))
                                prop:value=user_id
                                class="input input-bordered"
                            />
                        </div>
                        <button class="btn btn-primary" disabled=move || loading.get()>
                            "Lookup"
                        </button>
                    </form>
                </div>

                {move || selected.get().map(|user| {
                    let id = user.id;
                    let deleted = user.is_deleted();
                    view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h2 class="card-title">
                                    {user.display_name()}
                                    <Show when=move || deleted>
                                        <span class="badge badge-error">"Deleted"</span>
                                    </Show>
                                </h2>
                                <table class="table">
                                    <tbody>
                                        <tr><th>"ID"</th><td>{user.id}</td></tr>
                                        <tr><th>"Username"</th><td>{user.username.clone()}</td></tr>
                                        <tr><th>"Status"</th><td>{user.status.clone()}</td></tr>
                                        <tr>
                                            <th>"Created"</th>
                                            <td>{user.created_at.map(|t| t.to_rfc3339()).unwrap_or_default()}</td>
                                        </tr>
                                    </tbody>
                                </table>

                                <form class="grid grid-cols-2 gap-2" on:submit=on_save>
                                    {field("Email", |f| f.email.clone(), |f, v| f.email = v)}
                                    {field("Phone", |f| f.phone.clone(), |f, v| f.phone = v)}
                                    {field("First name", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                                    {field("Last name", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                                    <div class="col-span-2 flex justify-end">
                                        <button class="btn btn-primary btn-sm" disabled=deleted>
                                            "Save"
                                        </button>
                                    </div>
                                </form>

                                <div class="card-actions justify-end">
                                    <button class="btn btn-outline btn-sm" on:click=move |_| handle_use_profile(id)>
                                        "Use as my profile"
                                    </button>
                                    <Show
                                        when=move || deleted
                                        fallback=move || view! {
                                            <button class="btn btn-error btn-sm" on:click=move |_| handle_delete(id)>
                                                "Delete"
                                            </button>
                                        }
                                    >
                                        <button class="btn btn-success btn-sm" on:click=move |_| handle_restore(id)>
                                            "Restore"
                                        </button>
                                    </Show>
                                </div>
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
