#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Dashboard,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::Dashboard];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "CredTech Project",
            Route::Dashboard => "Credit Score Dashboard",
        }
    }

    /// Exact match on the path, ignoring the query string and a trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = canonical_path(path);
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn matches(self, path: &str) -> bool {
        canonical_path(path) == self.path()
    }
}

fn canonical_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
