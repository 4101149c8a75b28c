//! Supabase JWT gate for admin routes.
//!
//! Mutating routes extract the JWT from `Authorization: Bearer <token>` and
//! require an admin role before touching the store. Identity itself is
//! delegated to Supabase Auth: this module only decodes the token and reads
//! the role claim, it never manages credentials.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::Response;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;

use super::{envelope, AppState};

/// JWT claims from a Supabase-issued token.
#[derive(Debug, Deserialize)]
struct SupabaseClaims {
    /// Subject, the Supabase auth user ID (UUID).
    sub: String,
    /// Role claim from Supabase (e.g. "authenticated", "service_role").
    #[serde(default)]
    role: String,
    #[serde(default)]
    app_metadata: AppMetadata,
}

/// The `app_metadata` object Supabase embeds in its tokens; the admin panel
/// assigns `role: "admin"` there.
#[derive(Debug, Default, Deserialize)]
struct AppMetadata {
    #[serde(default)]
    role: Option<String>,
}

/// Authenticated caller info available to gated handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub is_admin: bool,
}

/// Decode and optionally verify a Supabase JWT.
///
/// With a configured secret, performs full HS256 verification. Without one,
/// decodes unverified (development mode).
fn decode_jwt(token: &str, secret: Option<&str>) -> Result<SupabaseClaims, String> {
    if let Some(secret) = secret {
        let key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["authenticated"]);
        let data = decode::<SupabaseClaims>(token, &key, &validation)
            .map_err(|e| format!("JWT verification failed: {}", e))?;
        Ok(data.claims)
    } else {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.set_audience(&["authenticated"]);
        validation.validate_exp = false;
        let data = decode::<SupabaseClaims>(token, &DecodingKey::from_secret(b""), &validation)
            .map_err(|e| format!("JWT decode failed: {}", e))?;
        Ok(data.claims)
    }
}

fn auth_user_from_parts(parts: &Parts, secret: Option<&str>) -> Option<AuthUser> {
    let auth_header = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    let claims = decode_jwt(token, secret).ok()?;
    let is_admin =
        claims.app_metadata.role.as_deref() == Some("admin") || claims.role == "service_role";
    Some(AuthUser { user_id: claims.sub, is_admin })
}

/// Axum extractor that requires an authenticated admin.
///
/// Rejects with 401 when no valid JWT is present, 403 when the caller is not
/// an admin.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = auth_user_from_parts(parts, state.config.jwt_secret.as_deref())
            .ok_or_else(|| envelope::error(StatusCode::UNAUTHORIZED, "Authentication required"))?;
        if !user.is_admin {
            return Err(envelope::error(StatusCode::FORBIDDEN, "Admin access required"));
        }
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(role: &str, app_role: Option<&str>) -> String {
        let claims = json!({
            "sub": "7e1c3b5e-0000-4000-8000-000000000000",
            "aud": "authenticated",
            "role": role,
            "app_metadata": {"role": app_role},
            "exp": 4_102_444_800i64,
        });
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(b"test-secret"))
            .unwrap()
    }

    #[test]
    fn admin_metadata_role_is_recognized() {
        let claims = decode_jwt(&token("authenticated", Some("admin")), None).unwrap();
        assert_eq!(claims.app_metadata.role.as_deref(), Some("admin"));
    }

    #[test]
    fn verification_rejects_wrong_secret() {
        let err = decode_jwt(&token("authenticated", Some("admin")), Some("other-secret"));
        assert!(err.is_err());
    }

    #[test]
    fn verification_accepts_matching_secret() {
        let claims = decode_jwt(&token("authenticated", None), Some("test-secret")).unwrap();
        assert_eq!(claims.role, "authenticated");
    }

    #[test]
    fn garbage_token_is_rejected_in_dev_mode() {
        assert!(decode_jwt("not-a-jwt", None).is_err());
    }
}
