//! Navigation bar session state

use super::PageContext;
use tracker_client::queries::{self, UserData};
use tracker_client::{AuthClient, GraphQlClient};
use tracker_hydrate::HydrationSlot;
use tracker_model::User;

/// Who is signed in, as shown in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    user: Option<User>,
}

impl UserSession {
    /// Loader for the user-data slot
    pub async fn fetch_data(client: &GraphQlClient) -> Option<UserData> {
        queries::current_user(client).await
    }

    /// Take the handed-off user, or ask the backend
    pub async fn mount(ctx: &PageContext) -> Self {
        let mut session = Self { user: None };
        match ctx.scope().drain_as::<UserData>(HydrationSlot::UserData) {
            Some(data) => session.user = Some(data.user),
            None => session.reload(ctx).await,
        }
        session
    }

    /// Fetch the session from the backend; keeps the current user on failure
    pub async fn reload(&mut self, ctx: &PageContext) {
        if let Some(data) = Self::fetch_data(ctx.client()).await {
            self.user = Some(data.user);
        }
    }

    /// `None` until the first successful load
    #[inline]
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.signed_in)
    }

    /// Exchange an identity-provider token for a session
    pub async fn sign_in(
        &mut self,
        ctx: &PageContext,
        auth: &AuthClient,
        google_client_id: &str,
        google_token: &str,
    ) -> bool {
        if google_client_id.trim().is_empty() {
            ctx.toasts().error("Missing Environment Variable GOOGLE_CLIENT_ID");
            return false;
        }
        match auth.sign_in(google_token).await {
            Some(user) => {
                self.user = Some(user);
                true
            }
            None => false,
        }
    }

    pub async fn sign_out(&mut self, auth: &AuthClient) -> bool {
        match auth.sign_out().await {
            Some(user) => {
                self.user = Some(user);
                true
            }
            None => false,
        }
    }
}
