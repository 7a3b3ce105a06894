/// Application routes the view controllers navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The landing page with the login affordance.
    Landing,
    /// The fixed external redirect target the identity provider lands on.
    /// Must be reachable without a prior session.
    AuthCallback,
    /// The authenticated bookmark list.
    Bookmarks,
}

impl Route {
    /// The URL path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::AuthCallback => "/auth/callback",
            Route::Bookmarks => "/bookmarks",
        }
    }
}
