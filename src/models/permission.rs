use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A single capability granted by the identity provider.
///
/// The string forms are what the provider writes into the token's
/// `permissions` claim, so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter)]
pub enum Permission {
    #[strum(serialize = "get:actors")]
    GetActors,
    #[strum(serialize = "get:movies")]
    GetMovies,
    #[strum(serialize = "post:actors")]
    PostActors,
    #[strum(serialize = "post:movies")]
    PostMovies,
    #[strum(serialize = "patch:actors")]
    PatchActors,
    #[strum(serialize = "patch:movies")]
    PatchMovies,
    #[strum(serialize = "delete:actors")]
    DeleteActors,
    #[strum(serialize = "delete:movies")]
    DeleteMovies,
}

impl Permission {
    /// Exact, case-sensitive membership test against a granted list.
    pub fn is_granted_by<S: AsRef<str>>(&self, granted: &[S]) -> bool {
        granted.iter().any(|p| p.as_ref() == self.as_ref())
    }
}
