//! Mock authentication
//!
//! Any password is accepted for a known username. Tokens are opaque strings
//! minted fresh on every login.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use tracing::{info, instrument, warn};

use super::{Authenticator, MockApi};
use crate::error::{Error, Result};
use crate::models::{Credentials, LoginResponse, TokenPair};

/// Mint a mock token of the given kind for a user
fn mint_token(kind: &str, user_id: u64) -> String {
    let mut nonce = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce);
    format!(
        "mock_{}_token_{}.{}",
        kind,
        user_id,
        URL_SAFE_NO_PAD.encode(nonce)
    )
}

impl Authenticator for MockApi<'_> {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let user = self
            .store
            .users
            .iter()
            .find(|u| u.username == credentials.username)
            .ok_or_else(|| {
                warn!("Login rejected for unknown username");
                Error::InvalidCredentials
            })?;

        info!(user_id = user.id, "Login accepted");
        Ok(LoginResponse {
            id: user.id,
            username: user.username.clone(),
            user_type: user.user_type,
            image: user.image.clone(),
            token: TokenPair {
                access: mint_token("access", user.id),
                refresh: mint_token("refresh", user.id),
            },
        })
    }
}
