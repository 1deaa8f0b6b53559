// Authentication endpoints
//
// Learners sign in under `/auth`, administrators under `/admin/auth`.
// A successful sign-in stores the token and the returned identity in the
// matching session scope; sign-out always clears the local scope even
// when the server call fails.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use campus_api::{CredentialScope, RequestContext};

use crate::campus::Campus;
use crate::error::CoreError;
use crate::model::User;

/// Outcome of a sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub scope: CredentialScope,
    pub user: Option<User>,
}

/// Editable profile fields. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(alias = "accessToken")]
    token: String,
    #[serde(default, alias = "admin")]
    user: Option<Value>,
}

impl Campus {
    /// Sign in as a learner.
    ///
    /// `POST /auth/login`, stores `token` and `user`.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignIn, CoreError> {
        debug!(email, "signing in");
        self.sign_in("/auth/login", CredentialScope::User, email, password)
            .await
    }

    /// Sign in as an administrator.
    ///
    /// `POST /admin/auth/login`, stores `adminToken` and `adminUser`.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<SignIn, CoreError> {
        debug!(email, "signing in as admin");
        self.sign_in("/admin/auth/login", CredentialScope::Admin, email, password)
            .await
    }

    async fn sign_in(
        &self,
        path: &str,
        scope: CredentialScope,
        email: &str,
        password: &str,
    ) -> Result<SignIn, CoreError> {
        // A rejected password must not expire whatever session is stored.
        let ctx = RequestContext::post(path).anonymous().json(&json!({
            "email": email,
            "password": password,
        }))?;
        let resp: TokenResponse = match self.fetch(ctx, &[]).await {
            // No session was involved, so this is a bad password, not an expiry.
            Err(CoreError::SessionExpired { message }) => {
                return Err(CoreError::Rejected { message });
            }
            other => other?,
        };

        let identity = resp.user.as_ref().map(Value::to_string);
        let token = SecretString::from(resp.token);
        self.session().sign_in(scope, &token, identity.as_deref())?;

        let user = match resp.user.map(serde_json::from_value::<User>).transpose() {
            Ok(user) => user,
            Err(e) => {
                debug!(%scope, error = %e, "sign-in identity did not decode, keeping raw copy only");
                None
            }
        };
        info!(%scope, "signed in");
        Ok(SignIn { scope, user })
    }

    /// `POST /auth/logout`, then clear the user session.
    pub async fn logout(&self) -> Result<(), CoreError> {
        self.sign_out("/auth/logout", CredentialScope::User).await
    }

    /// `POST /admin/auth/logout`, then clear the admin session.
    pub async fn admin_logout(&self) -> Result<(), CoreError> {
        self.sign_out("/admin/auth/logout", CredentialScope::Admin)
            .await
    }

    async fn sign_out(&self, path: &str, scope: CredentialScope) -> Result<(), CoreError> {
        if let Err(e) = self.send(RequestContext::post(path).scoped(scope)).await {
            debug!(%scope, error = %e, "server-side logout failed, clearing locally");
        }
        self.session().sign_out(scope)?;
        Ok(())
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<User, CoreError> {
        self.fetch(RequestContext::get("/auth/me"), &["user"]).await
    }

    /// `PUT /auth/profile`. The cached `user` identity is refreshed with the
    /// server's answer.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, CoreError> {
        let ctx = RequestContext::put("/auth/profile").json(update)?;
        let value: Value = self.fetch(ctx, &["user"]).await?;
        let user: User = serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Internal(format!("invalid user: {e}")))?;

        self.session()
            .store()
            .set(CredentialScope::User.identity_key(), &value.to_string())?;
        Ok(user)
    }

    /// `PUT /auth/change-password`
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
    ) -> Result<Option<String>, CoreError> {
        let ctx = RequestContext::put("/auth/change-password").json(&json!({
            "currentPassword": current,
            "newPassword": new,
        }))?;
        self.send(ctx).await
    }

    /// `POST /auth/refresh-token` with the user token, overwrites it.
    pub async fn refresh_token(&self) -> Result<(), CoreError> {
        let ctx = RequestContext::post("/auth/refresh-token").scoped(CredentialScope::User);
        let resp: TokenResponse = self.fetch(ctx, &[]).await?;
        self.session()
            .replace_token(CredentialScope::User, &SecretString::from(resp.token))?;
        debug!("user token refreshed");
        Ok(())
    }

    /// `POST /auth/avatar` as `multipart/form-data` with field `avatar`.
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<Value, CoreError> {
        let payload = self
            .client()
            .upload("/auth/avatar", "avatar", file_name, bytes, mime)
            .await?;
        Ok(payload.extract(&["user", "avatar"])?)
    }

    /// Identity cached by the last learner sign-in.
    pub fn current_user(&self) -> Result<Option<User>, CoreError> {
        self.cached_identity(CredentialScope::User)
    }

    /// Identity cached by the last admin sign-in.
    pub fn current_admin(&self) -> Result<Option<User>, CoreError> {
        self.cached_identity(CredentialScope::Admin)
    }

    fn cached_identity(&self, scope: CredentialScope) -> Result<Option<User>, CoreError> {
        let Some(raw) = self.session().identity(scope)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CoreError::Internal(format!("cached {scope} identity is invalid: {e}")))
    }
}
