// web_app/app.rs - Root application component
//
// Provides the session, selection and export contexts, then routes.
// The drawer, export modal and toast sit outside <Routes> so they survive
// navigation.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::web_app::components::{ExportProposalModal, ExportToast, Navbar, ProtectedRoute, SelectionDrawer};
use crate::web_app::context::{ExportContext, SelectionContext, SessionContext};
use crate::web_app::pages::{HomePage, LoginPage, ProductsPage, RegisterPage, ResetPasswordPage, SettingsPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    SessionContext::provide();
    SelectionContext::provide();
    ExportContext::provide();

    view! {
        <Title text="Catalog Proposals" />
        <Meta name="description" content="Browse the product catalog and export Word proposals" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />
        <Stylesheet id="leptos" href="/pkg/catalog_proposals.css" />

        <Router>
            <Navbar />
            <main class="min-h-[calc(100vh-4rem)] bg-gray-50">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=|| view! { <ProtectedRoute><HomePage /></ProtectedRoute> } />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/reset-password") view=ResetPasswordPage />
                    <Route path=path!("/products") view=|| view! { <ProtectedRoute><ProductsPage /></ProtectedRoute> } />
                    <Route path=path!("/settings") view=|| view! { <ProtectedRoute><SettingsPage /></ProtectedRoute> } />
                </Routes>
            </main>
            <SelectionDrawer />
            <ExportProposalModal />
            <ExportToast />
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-[calc(100vh-4rem)] flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-300 mb-4">"404"</h1>
                <p class="text-xl text-gray-600 mb-8">"Page not found"</p>
                <a
                    href="/"
                    class="px-6 py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors"
                >
                    "Back to the catalog"
                </a>
            </div>
        </div>
    }
}
