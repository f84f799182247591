// web_app/context.rs - App-wide reactive state
//
// Three contexts are provided once at the root (see app.rs):
// - SessionContext: the auth session mirrored to localStorage
// - SelectionContext: the selected products mirrored to sessionStorage
// - ExportContext: the export toast and the export run itself
//
// Browser storage is opened on demand; signals only ever hold plain data.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::web_app::export::{
    run_export, trigger_download, ExportError, ExportStatus, ExportStatusTracker, HttpImageFetcher, DOCX_MIME,
};
use crate::web_app::model::{ApiError, Product, ProposalMetadata, User};
use crate::web_app::selection::{QuantityChange, SelectionSet};
use crate::web_app::server_fns::{get_export_settings, to_api_error};
use crate::web_app::session::AuthSession;
use crate::web_app::storage::{local_store, session_store};

#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<AuthSession>>,
    /// False until storage has been read in the browser
    ready: RwSignal<bool>,
}

impl SessionContext {
    pub fn provide() -> Self {
        let ctx = Self {
            session: RwSignal::new(None),
            ready: RwSignal::new(false),
        };
        provide_context(ctx);
        Effect::new(move |_| ctx.init());
        ctx
    }

    /// Restore from storage, dropping an expired session
    pub fn init(&self) {
        self.session.set(AuthSession::load(&local_store(), Utc::now()));
        self.ready.set(true);
    }

    pub fn ready(&self) -> bool {
        self.ready.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .with(|s| s.as_ref().is_some_and(|s| !s.is_expired(Utc::now())))
    }

    pub fn is_admin(&self) -> bool {
        self.session.with(|s| s.as_ref().is_some_and(AuthSession::is_admin))
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().and_then(|s| s.user.clone()))
    }

    /// Token for the next request; not reactive
    pub fn token(&self) -> Option<String> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn sign_in(&self, session: AuthSession) {
        if let Err(e) = session.save(&local_store()) {
            tracing::warn!("Could not persist session: {}", e);
        }
        self.session.set(Some(session));
    }

    pub fn set_user(&self, user: User) {
        self.session.update(|s| {
            if let Some(session) = s {
                session.user = Some(user);
                if let Err(e) = session.save(&local_store()) {
                    tracing::warn!("Could not persist profile: {}", e);
                }
            }
        });
    }

    /// Logout: forget the session and everything tab-scoped
    pub fn teardown(&self) {
        AuthSession::teardown(&local_store(), &session_store());
        self.session.set(None);
    }

    /// Message to show for a failed server call from an event handler; a 401 also ends the session
    pub fn error_message(&self, err: &ServerFnError) -> String {
        if ends_session(err) {
            self.end_rejected_session();
        }
        describe_error(err)
    }

    /// End the session whenever `resource` settles on a 401
    ///
    /// Render closures only call `describe_error`; the teardown happens here.
    pub fn logout_on_unauthorized<T>(&self, resource: LocalResource<Result<T, ServerFnError>>)
    where
        T: Clone + 'static,
    {
        let ctx = *self;
        Effect::new(move |_| {
            if let Some(Err(e)) = resource.get() {
                if ends_session(&e) {
                    ctx.end_rejected_session();
                }
            }
        });
    }

    fn end_rejected_session(&self) {
        // Already gone: a refetch after teardown must not tear down again
        if self.session.with_untracked(Option::is_none) {
            return;
        }
        tracing::info!("Session rejected by backend, logging out");
        self.teardown();
    }
}

/// True when the backend rejected the token
pub fn ends_session(err: &ServerFnError) -> bool {
    to_api_error(err).is_unauthorized()
}

/// User-facing text for a failed server call, without side effects
pub fn describe_error(err: &ServerFnError) -> String {
    match to_api_error(err) {
        ApiError::Validation(message) => message,
        other => other.to_string(),
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[derive(Clone, Copy)]
pub struct SelectionContext {
    set: RwSignal<SelectionSet>,
    drawer_open: RwSignal<bool>,
}

impl SelectionContext {
    pub fn provide() -> Self {
        let ctx = Self {
            set: RwSignal::new(SelectionSet::new()),
            drawer_open: RwSignal::new(false),
        };
        provide_context(ctx);
        Effect::new(move |_| ctx.set.set(SelectionSet::load(&session_store())));
        ctx
    }

    pub fn set(&self) -> RwSignal<SelectionSet> {
        self.set
    }

    pub fn drawer_open(&self) -> RwSignal<bool> {
        self.drawer_open
    }

    pub fn len(&self) -> usize {
        self.set.with(SelectionSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.set.with(SelectionSet::is_empty)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.set.with(|s| s.contains(code))
    }

    fn persist(&self) {
        if let Err(e) = self.set.with_untracked(|s| s.persist(&session_store())) {
            tracing::warn!("Could not persist selection: {}", e);
        }
    }

    pub fn toggle(&self, product: Product) {
        self.set.update(|s| {
            s.toggle(product);
        });
        self.persist();
    }

    pub fn set_quantity(&self, code: &str, requested: u32) -> QuantityChange {
        let change = self
            .set
            .try_update(|s| s.set_quantity(code, requested))
            .unwrap_or(QuantityChange::NotSelected);
        self.persist();
        change
    }

    pub fn remove(&self, code: &str) {
        self.set.update(|s| {
            s.remove(code);
        });
        self.persist();
    }

    /// Pick up fresher stock for already-selected products
    pub fn refresh(&self, products: &[Product]) {
        let touches_selection = self
            .set
            .with_untracked(|s| products.iter().any(|p| s.contains(&p.code)));
        if touches_selection {
            self.set.update(|s| s.refresh(products));
            self.persist();
        }
    }

    pub fn clear(&self) {
        self.set.update(|s| s.clear_persisted(&session_store()));
    }
}

pub fn use_selection() -> SelectionContext {
    expect_context::<SelectionContext>()
}

#[derive(Clone, Copy)]
pub struct ExportContext {
    tracker: RwSignal<ExportStatusTracker>,
    modal_open: RwSignal<bool>,
}

impl ExportContext {
    pub fn provide() -> Self {
        let ctx = Self {
            tracker: RwSignal::new(ExportStatusTracker::new()),
            modal_open: RwSignal::new(false),
        };
        provide_context(ctx);
        ctx
    }

    pub fn status(&self) -> ExportStatus {
        self.tracker.with(|t| t.status().clone())
    }

    pub fn modal_open(&self) -> RwSignal<bool> {
        self.modal_open
    }

    pub fn dismiss(&self) {
        self.tracker.update(ExportStatusTracker::dismiss);
    }

    /// Build and download the proposal; the selection is cleared on success
    pub fn start(&self, selection: SelectionContext, metadata: ProposalMetadata) {
        let tracker = self.tracker;
        let generation = tracker.try_update(ExportStatusTracker::begin).unwrap_or_default();
        let items = selection.set.get_untracked();
        self.modal_open.set(false);

        spawn_local(async move {
            let outcome = export_proposal(&items, metadata).await;
            tracker.update(|t| {
                let resolved = match &outcome {
                    Ok(filename) => {
                        tracing::info!("Proposal {} exported", filename);
                        t.succeed(generation)
                    }
                    Err(e) => {
                        tracing::error!("Proposal export failed: {}", e);
                        t.fail(generation, e.to_string())
                    }
                };
                match resolved {
                    Ok(true) => {}
                    Ok(false) => tracing::debug!("Export {} finished after a newer one started", generation),
                    Err(e) => tracing::warn!("Export status out of sync: {}", e),
                }
            });

            if outcome.is_ok() {
                selection.clear();
            }

            let delay = tracker.with_untracked(|t| {
                (t.generation() == generation)
                    .then(|| t.status().auto_hide_after())
                    .flatten()
            });
            if let Some(delay) = delay {
                set_timeout(
                    move || {
                        tracker.update(|t| {
                            t.hide_if_current(generation);
                        })
                    },
                    delay,
                );
            }
        });
    }
}

async fn export_proposal(selection: &SelectionSet, metadata: ProposalMetadata) -> Result<String, ExportError> {
    let settings = get_export_settings()
        .await
        .map_err(|e| ExportError::Settings(to_api_error(&e).to_string()))?;
    let fetcher = HttpImageFetcher::for_current_page();
    let today = chrono::Local::now().date_naive();

    let proposal = run_export(&fetcher, selection, metadata, &settings, today).await?;
    trigger_download(&proposal.filename, &proposal.bytes, DOCX_MIME)?;
    Ok(proposal.filename)
}

pub fn use_export() -> ExportContext {
    expect_context::<ExportContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web_app::server_fns::to_server_error;

    #[test]
    fn test_only_unauthorized_ends_session() {
        assert!(ends_session(&to_server_error(ApiError::Unauthorized)));
        assert!(!ends_session(&to_server_error(ApiError::NotFound)));
        assert!(!ends_session(&ServerFnError::new("connection reset")));
    }

    #[test]
    fn test_describe_error_texts() {
        assert_eq!(
            describe_error(&to_server_error(ApiError::Validation("Email taken".to_string()))),
            "Email taken"
        );
        assert_eq!(
            describe_error(&to_server_error(ApiError::Unauthorized)),
            "Your session has expired. Please log in again."
        );
    }
}
