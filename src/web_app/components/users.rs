// web_app/components/users.rs - Admin user management
//
// - UsersTable: searchable, paginated list with edit/delete actions
// - UserFormDialog: create or edit a user
// - DeleteUserDialog: confirmation before deleting
//
// Unfiltered pages are cached in sessionStorage under "users-table"; every
// write drops all cached pages, since creates and deletes shift rows.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::common::{
    Badge, Button, DangerButton, EmptyState, ErrorDisplay, Loading, ModalWrapper, Pagination,
    SecondaryButton, TextInput,
};
use crate::web_app::context::{describe_error, use_session};
use crate::web_app::model::{ContactMethod, Page, User, UserPayload, UserQuery, UserRole};
use crate::web_app::server_fns::{create_user, delete_user, list_users, update_user};
use crate::web_app::storage::{session_store, ResultsCache};
use crate::web_app::validation::{validate_user_form, FieldErrors};

pub const USERS_CACHE_SCOPE: &str = "users-table";

fn invalidate_cached_pages() {
    let store = session_store();
    ResultsCache::new(&store, USERS_CACHE_SCOPE).invalidate_all();
}

/// Which dialog is open over the table
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(User),
    Delete(User),
}

#[component]
pub fn UsersTable() -> impl IntoView {
    let session = use_session();
    let page = RwSignal::new(1_u32);
    let search = RwSignal::new(String::new());
    let search_input = RwSignal::new(String::new());
    // Bumped after writes to force a refetch
    let version = RwSignal::new(0_u32);
    let dialog = RwSignal::new(Dialog::Closed);

    let users = LocalResource::new(move || {
        let query = UserQuery {
            page: page.get(),
            search: Some(search.get()).filter(|s| !s.trim().is_empty()),
            ..UserQuery::default()
        };
        version.track();
        async move {
            let filter = query.search.clone().unwrap_or_default();
            {
                let store = session_store();
                let cache = ResultsCache::new(&store, USERS_CACHE_SCOPE);
                if let Some(cached) = cache.get::<Page<User>>(query.page, &filter) {
                    return Ok(cached);
                }
            }

            let token = session.token().unwrap_or_default();
            let result = list_users(token, query.clone()).await;
            if let Ok(fresh) = &result {
                let store = session_store();
                ResultsCache::new(&store, USERS_CACHE_SCOPE).put(query.page, &filter, fresh);
            }
            result
        }
    });

    session.logout_on_unauthorized(users);

    let after_write = Callback::new(move |_: ()| {
        invalidate_cached_pages();
        dialog.set(Dialog::Closed);
        version.update(|v| *v += 1);
    });
    let close_dialog = Callback::new(move |_: ()| dialog.set(Dialog::Closed));

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        page.set(1);
        search.set(search_input.get_untracked().trim().to_string());
    };

    view! {
        <div class="space-y-4">
            <div class="flex flex-col sm:flex-row gap-3 justify-between">
                <form class="flex gap-2 flex-1 max-w-md" on:submit=on_search>
                    <TextInput value=search_input placeholder="Search by name or email" input_type="search" />
                    <Button button_type="submit">"Search"</Button>
                </form>
                <Button on_click=Callback::new(move |_| dialog.set(Dialog::Create))>"New user"</Button>
            </div>

            <Transition fallback=|| view! { <Loading message="Loading users..." /> }>
                {move || users.get().map(|result| match result {
                    Err(e) => {
                        let message = describe_error(&e);
                        view! {
                            <ErrorDisplay
                                error=message
                                on_retry=Callback::new(move |_| version.update(|v| *v += 1))
                            />
                        }
                        .into_any()
                    }
                    Ok(listing) if listing.is_empty() => view! {
                        <EmptyState title="No users found" description="Try a different search." />
                    }
                    .into_any(),
                    Ok(listing) => {
                        let last_page = listing.last_page;
                        view! {
                            <div class="overflow-x-auto bg-white rounded-xl border border-gray-100 shadow-sm">
                                <table class="w-full text-sm">
                                    <thead class="bg-gray-50 text-left text-gray-500">
                                        <tr>
                                            <th class="px-4 py-3">"Name"</th>
                                            <th class="px-4 py-3">"Email"</th>
                                            <th class="px-4 py-3">"Phone"</th>
                                            <th class="px-4 py-3">"Role"</th>
                                            <th class="px-4 py-3 text-right">"Actions"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {listing.items.into_iter().map(|user| {
                                            let for_edit = user.clone();
                                            let for_delete = user.clone();
                                            let variant = if user.is_admin() { "blue" } else { "gray" };
                                            view! {
                                                <tr class="border-t border-gray-100">
                                                    <td class="px-4 py-3 font-medium text-gray-900">{user.name.clone()}</td>
                                                    <td class="px-4 py-3 text-gray-600">{user.email.clone()}</td>
                                                    <td class="px-4 py-3 text-gray-600">{user.phone.clone()}</td>
                                                    <td class="px-4 py-3"><Badge variant=variant>{user.role.to_string()}</Badge></td>
                                                    <td class="px-4 py-3 text-right space-x-3">
                                                        <button
                                                            class="text-blue-600 hover:underline"
                                                            on:click=move |_| dialog.set(Dialog::Edit(for_edit.clone()))
                                                        >
                                                            "Edit"
                                                        </button>
                                                        <button
                                                            class="text-red-600 hover:underline"
                                                            on:click=move |_| dialog.set(Dialog::Delete(for_delete.clone()))
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            </div>
                            <Show when=move || { last_page > 1 }>
                                <Pagination
                                    current_page=page
                                    last_page=Signal::from(last_page)
                                    on_page=Callback::new(move |p| page.set(p))
                                />
                            </Show>
                        }
                        .into_any()
                    }
                })}
            </Transition>

            {move || match dialog.get() {
                Dialog::Closed => None,
                Dialog::Create => Some(view! {
                    <UserFormDialog user=None on_close=close_dialog on_saved=after_write />
                }.into_any()),
                Dialog::Edit(user) => Some(view! {
                    <UserFormDialog user=Some(user) on_close=close_dialog on_saved=after_write />
                }.into_any()),
                Dialog::Delete(user) => Some(view! {
                    <DeleteUserDialog user=user on_close=close_dialog on_deleted=after_write />
                }.into_any()),
            }}
        </div>
    }
}

/// Create (`user = None`) or edit dialog
#[component]
pub fn UserFormDialog(
    user: Option<User>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let creating = user.is_none();
    let initial = user.as_ref().map(UserPayload::from_user).unwrap_or_default();
    let user_id = user.map(|u| u.id);

    let name = RwSignal::new(initial.name);
    let email = RwSignal::new(initial.email);
    let phone = RwSignal::new(initial.phone);
    let document = RwSignal::new(initial.document.unwrap_or_default());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let role = RwSignal::new(initial.role.unwrap_or_default());
    let contact = RwSignal::new(initial.preferred_contact_method.unwrap_or_default());

    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let field_error = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)));

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let optional = |value: String| Some(value).filter(|v| !v.trim().is_empty());
        let payload = UserPayload {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            document: optional(document.get_untracked()),
            password: optional(password.get_untracked()),
            password_confirmation: optional(password_confirmation.get_untracked()),
            role: Some(role.get_untracked()),
            preferred_contact_method: Some(contact.get_untracked()),
        };

        if let Err(invalid) = validate_user_form(&payload, creating) {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::default());
        server_error.set(None);
        saving.set(true);

        let token = session.token().unwrap_or_default();
        let id = user_id.clone();
        spawn_local(async move {
            let result = match id {
                None => create_user(token, payload).await.map(|created| {
                    tracing::info!("Created user {}", created.email);
                }),
                Some(id) => update_user(token, id.clone(), payload).await.map(|_| {
                    tracing::info!("Updated user {}", id);
                }),
            };
            saving.set(false);
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => server_error.set(Some(session.error_message(&e))),
            }
        });
    };

    let title = if creating { "New user" } else { "Edit user" };

    view! {
        <ModalWrapper title=title width="max-w-xl" on_close=on_close>
            <form class="space-y-4" on:submit=submit>
                {move || server_error.get().map(|message| view! {
                    <div role="alert" class="px-4 py-3 rounded-lg text-sm bg-red-50 text-red-700 border border-red-200">
                        {message}
                    </div>
                })}
                <TextInput value=name label="Name" error=field_error("name") />
                <TextInput value=email label="Email" input_type="email" error=field_error("email") />
                <div class="grid grid-cols-2 gap-3">
                    <TextInput value=phone label="Phone" input_type="tel" error=field_error("phone") />
                    <TextInput value=document label="CPF / CNPJ" />
                </div>
                <div class="grid grid-cols-2 gap-3">
                    <label class="block text-sm">
                        <span class="block font-medium text-gray-700 mb-1">"Role"</span>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg bg-white"
                            on:change=move |ev| {
                                let admin = event_target_value(&ev) == "admin";
                                role.set(if admin { UserRole::Admin } else { UserRole::User });
                            }
                        >
                            <option value="user" selected=move || role.get() == UserRole::User>"User"</option>
                            <option value="admin" selected=move || role.get() == UserRole::Admin>"Administrator"</option>
                        </select>
                    </label>
                    <label class="block text-sm">
                        <span class="block font-medium text-gray-700 mb-1">"Preferred contact"</span>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg bg-white"
                            on:change=move |ev| {
                                if let Some(method) = ContactMethod::parse(&event_target_value(&ev)) {
                                    contact.set(method);
                                }
                            }
                        >
                            {ContactMethod::ALL.into_iter().map(|method| view! {
                                <option value=method.as_str() selected=move || contact.get() == method>
                                    {method.to_string()}
                                </option>
                            }).collect_view()}
                        </select>
                    </label>
                </div>
                <div class="grid grid-cols-2 gap-3">
                    <TextInput
                        value=password
                        label=if creating { "Password" } else { "New password" }
                        placeholder=if creating { "" } else { "Leave blank to keep" }
                        input_type="password"
                        autocomplete="new-password"
                        error=field_error("password")
                    />
                    <TextInput
                        value=password_confirmation
                        label="Confirm password"
                        input_type="password"
                        autocomplete="new-password"
                        error=field_error("password_confirmation")
                    />
                </div>
                <div class="flex justify-end gap-2 pt-2">
                    <SecondaryButton on_click=on_close>"Cancel"</SecondaryButton>
                    <Button button_type="submit" disabled=saving>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                </div>
            </form>
        </ModalWrapper>
    }
}

#[component]
pub fn DeleteUserDialog(
    user: User,
    on_close: Callback<()>,
    on_deleted: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let deleting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let id = user.id.clone();

    let confirm = Callback::new(move |_: ()| {
        deleting.set(true);
        let token = session.token().unwrap_or_default();
        let id = id.clone();
        spawn_local(async move {
            let result = delete_user(token, id.clone()).await;
            deleting.set(false);
            match result {
                Ok(()) => {
                    tracing::info!("Deleted user {}", id);
                    on_deleted.run(());
                }
                Err(e) => error.set(Some(session.error_message(&e))),
            }
        });
    });

    view! {
        <ModalWrapper title="Delete user" width="max-w-md" on_close=on_close>
            <div class="space-y-4">
                <p class="text-gray-700">
                    "Delete " <strong>{user.name.clone()}</strong> " (" {user.email.clone()} ")? This cannot be undone."
                </p>
                {move || error.get().map(|message| view! { <p class="text-sm text-red-600">{message}</p> })}
                <div class="flex justify-end gap-2">
                    <SecondaryButton on_click=on_close>"Cancel"</SecondaryButton>
                    <DangerButton on_click=confirm disabled=deleting>"Delete"</DangerButton>
                </div>
            </div>
        </ModalWrapper>
    }
}
