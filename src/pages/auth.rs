use crate::components::ui::{
    Button, ButtonSize, Card, CardContent, CardDescription, CardHeader, CardTitle, ErrorBanner,
    Input, Label, Spinner,
};
use crate::pages::AdminLayout;
use crate::state::AppContext;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let email_val = email.get();
        let password_val = password.get();
        let state = app_state.0.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match state.api_client.login(&email_val, &password_val).await {
                Ok(response) => {
                    let is_admin = response.user.is_admin();
                    state.sign_in(&response.access_token, response.user);
                    let target = if is_admin { "/admin" } else { "/" };
                    let _ = window().location().set_href(target);
                }
                Err(e) => {
                    warn!("login failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"LearnHub"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Log in"</CardTitle>
                        <CardDescription class="text-xs">"Admin access uses your LearnHub account."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    bind_value=email
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <ErrorBanner message=error />

                            <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Continue" }}
                                </span>
                            </Button>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

/// Admin-only content. Without a token the login form is shown in place;
/// a signed-in non-admin gets a notice instead of the dashboard.
#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let authenticated = app_state.0.authenticated;
    let current_user = app_state.0.current_user;

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    // A stored profile without a role (older sessions) is let through; the
    // backend still rejects non-admin calls with 403.
    let is_admin = move || {
        current_user
            .get()
            .map(|u| u.role().is_none() || u.is_admin())
            .unwrap_or(true)
    };

    let sign_out = {
        let state = app_state.0.clone();
        move |_| {
            state.sign_out();
            let _ = window().location().set_href("/login");
        }
    };

    view! {
        <Show when=move || authenticated.get() fallback=move || view! { <LoginPage /> }>
            <Show
                when=is_admin
                fallback={
                    let sign_out = sign_out.clone();
                    move || {
                        let sign_out = sign_out.clone();
                        view! {
                            <div class="mx-auto max-w-sm px-4 py-16 text-center text-sm">
                                <p class="mb-4 text-muted-foreground">"This account has no admin access."</p>
                                <Button size=ButtonSize::Sm on:click=sign_out>"Sign out"</Button>
                            </div>
                        }
                    }
                }
            >
                <AdminLayout>
                    {move || children.with_value(|c| c())}
                </AdminLayout>
            </Show>
        </Show>
    }
}
