// web_app/server_fns.rs - Leptos server function declarations
//
// Compiled for both ssr and hydrate: on the server these call the REST
// backend through the shared `BackendClient`; in the browser the #[server]
// macro turns them into POSTs under /api.
//
// The bearer token lives in the browser and is passed explicitly. Backend
// failures travel as an encoded `ApiError` inside `ServerFnError::ServerError`
// so the client can still tell a 401 from anything else.

use leptos::prelude::*;

use crate::web_app::model::*;
use crate::web_app::session::AuthSession;

/// Convert a backend error for the trip back to the browser
pub fn to_server_error(err: ApiError) -> ServerFnError {
    ServerFnError::ServerError(err.to_wire())
}

/// Recover the backend error on the client side
pub fn to_api_error(err: &ServerFnError) -> ApiError {
    match err {
        ServerFnError::ServerError(message) => ApiError::from_wire(message),
        other => ApiError::Network(other.to_string()),
    }
}

#[cfg(feature = "ssr")]
async fn backend() -> Result<crate::web_app::api::BackendClient, ServerFnError> {
    use crate::web_app::api::BackendClient;
    use actix_web::{web::Data, HttpRequest};
    use leptos_actix::extract;

    // Context first (tests can provide one directly)
    if let Some(client) = use_context::<BackendClient>() {
        return Ok(client);
    }

    match extract::<HttpRequest>().await {
        Ok(req) => {
            if let Some(client) = req.app_data::<Data<BackendClient>>() {
                return Ok(client.as_ref().clone());
            }
        }
        Err(e) => tracing::error!("Failed to extract HttpRequest: {}", e),
    }

    Err(ServerFnError::new("Backend client not available"))
}

#[cfg(feature = "ssr")]
fn reject_invalid(errors: crate::web_app::validation::FieldErrors) -> ServerFnError {
    let message = errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Invalid input".to_string());
    to_server_error(ApiError::Validation(message))
}

/// Log in and fetch the profile in one round trip
///
/// A failed profile fetch does not fail the login; the session just has no cached user.
#[server(Login, "/api")]
pub async fn login(email: String, password: String) -> Result<AuthSession, ServerFnError> {
    use crate::web_app::validation::validate_login;

    validate_login(&email, &password).map_err(reject_invalid)?;
    let client = backend().await?;

    let response = client
        .login(email.trim(), &password)
        .await
        .map_err(|e| {
            tracing::info!("Login rejected for {}: {}", email.trim(), e);
            to_server_error(e)
        })?;

    let session = AuthSession::from_login(&response, chrono::Utc::now());
    match client.me(&session.token).await {
        Ok(user) => {
            tracing::info!("User {} logged in", user.id);
            Ok(session.with_user(user))
        }
        Err(e) => {
            tracing::warn!("Logged in but could not load profile: {}", e);
            Ok(session)
        }
    }
}

#[server(CurrentUser, "/api")]
pub async fn current_user(token: String) -> Result<User, ServerFnError> {
    backend().await?.me(&token).await.map_err(to_server_error)
}

/// Create an account, then log straight into it
#[server(Register, "/api")]
pub async fn register(data: RegisterData) -> Result<AuthSession, ServerFnError> {
    use crate::web_app::validation::validate_register;

    validate_register(&data).map_err(reject_invalid)?;
    let client = backend().await?;

    let user = client.register(&data.to_payload()).await.map_err(to_server_error)?;
    tracing::info!("Registered user {}", user.id);

    let response = client
        .login(data.email.trim(), &data.password)
        .await
        .map_err(to_server_error)?;
    Ok(AuthSession::from_login(&response, chrono::Utc::now()).with_user(user))
}

#[server(ForgotPassword, "/api")]
pub async fn forgot_password(email: String) -> Result<String, ServerFnError> {
    use crate::web_app::validation::validate_forgot_password;

    validate_forgot_password(&email).map_err(reject_invalid)?;
    backend()
        .await?
        .forgot_password(email.trim())
        .await
        .map_err(to_server_error)
}

#[server(ResetPassword, "/api")]
pub async fn reset_password(reset: PasswordReset) -> Result<String, ServerFnError> {
    use crate::web_app::validation::validate_password_reset;

    if reset.email.trim().is_empty() || reset.token.trim().is_empty() {
        return Err(to_server_error(ApiError::Validation(
            "This reset link is incomplete. Request a new one.".to_string(),
        )));
    }
    validate_password_reset(&reset).map_err(reject_invalid)?;
    backend()
        .await?
        .reset_password(&reset)
        .await
        .map_err(to_server_error)
}

#[server(ListProducts, "/api")]
pub async fn list_products(token: Option<String>, query: ProductQuery) -> Result<Page<Product>, ServerFnError> {
    tracing::info!(
        "Product list: search='{}', page={}, per_page={}, sort={}",
        query.search,
        query.page,
        query.per_page,
        query.sort.key()
    );

    let page = backend()
        .await?
        .list_products(token.as_deref(), &query)
        .await
        .map_err(|e| {
            tracing::error!("Product list failed: {}", e);
            to_server_error(e)
        })?;

    tracing::info!("Product list returned {} of {} items", page.items.len(), page.total);
    Ok(page)
}

#[server(ListUsers, "/api")]
pub async fn list_users(token: String, query: UserQuery) -> Result<Page<User>, ServerFnError> {
    backend()
        .await?
        .list_users(&token, &query)
        .await
        .map_err(to_server_error)
}

#[server(CreateUser, "/api")]
pub async fn create_user(token: String, payload: UserPayload) -> Result<User, ServerFnError> {
    use crate::web_app::validation::validate_user_form;

    validate_user_form(&payload, true).map_err(reject_invalid)?;
    let user = backend()
        .await?
        .create_user(&token, &payload)
        .await
        .map_err(to_server_error)?;
    tracing::info!("Created user {}", user.id);
    Ok(user)
}

#[server(UpdateUser, "/api")]
pub async fn update_user(token: String, id: UserId, payload: UserPayload) -> Result<Option<User>, ServerFnError> {
    use crate::web_app::validation::validate_user_form;

    validate_user_form(&payload, false).map_err(reject_invalid)?;
    let updated = backend()
        .await?
        .update_user(&token, &id, &payload)
        .await
        .map_err(to_server_error)?;
    tracing::info!("Updated user {}", id);
    Ok(updated)
}

#[server(DeleteUser, "/api")]
pub async fn delete_user(token: String, id: UserId) -> Result<(), ServerFnError> {
    backend()
        .await?
        .delete_user(&token, &id)
        .await
        .map_err(to_server_error)?;
    tracing::info!("Deleted user {}", id);
    Ok(())
}

/// Save the signed-in user's own profile and return the fresh record
#[server(UpdateProfile, "/api")]
pub async fn update_profile(token: String, payload: UserPayload) -> Result<User, ServerFnError> {
    use crate::web_app::validation::validate_user_form;

    validate_user_form(&payload, false).map_err(reject_invalid)?;
    let client = backend().await?;

    let me = client.me(&token).await.map_err(to_server_error)?;
    // Role is never self-assigned
    let payload = UserPayload { role: None, ..payload };
    client
        .update_user(&token, &me.id, &payload)
        .await
        .map_err(to_server_error)?;
    client.me(&token).await.map_err(to_server_error)
}

#[server(GetExportSettings, "/api")]
pub async fn get_export_settings() -> Result<ExportSettings, ServerFnError> {
    use actix_web::{web::Data, HttpRequest};
    use leptos_actix::extract;

    if let Some(settings) = use_context::<ExportSettings>() {
        return Ok(settings);
    }

    let req: HttpRequest = extract().await?;
    req.app_data::<Data<ExportSettings>>()
        .map(|settings| settings.as_ref().clone())
        .ok_or_else(|| ServerFnError::new("Export settings not available"))
}
