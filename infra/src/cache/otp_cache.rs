//! Redis implementation of the OtpRepository trait
//!
//! Ephemeral code storage: each record is a JSON value under
//! `otp:record:{email}` whose native expiry equals the code's lifetime.
//! Conditional updates run server-side in a Lua script so the check and the
//! rewrite are atomic, and they recompute the expiry from the original
//! issuance time instead of restarting it.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use redis::Script;
use tracing::{debug, warn};

use ev_core::domain::entities::OtpRecord;
use ev_core::errors::DomainError;
use ev_core::repositories::OtpRepository;
use ev_shared::utils::mask_email;

use super::redis_client::RedisClient;

/// Key namespace for stored records
pub const OTP_KEY_NAMESPACE: &str = "otp:record";

// KEYS[1] record key
// ARGV[1] expected created_at (serialized form), ARGV[2] new attempts,
// ARGV[3] new JSON value, ARGV[4] remaining lifetime in milliseconds
const UPDATE_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return 0
end
local record = cjson.decode(current)
if record['created_at'] ~= ARGV[1] then
    return 0
end
if tonumber(record['attempts']) >= tonumber(ARGV[2]) then
    return 0
end
local ttl = tonumber(ARGV[4])
if ttl <= 0 then
    return 0
end
redis.call('SET', KEYS[1], ARGV[3], 'PX', ttl)
return 1
"#;

// KEYS[1] record key
// ARGV[1] expected created_at (serialized form)
const DELETE_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return 0
end
local record = cjson.decode(current)
if record['created_at'] ~= ARGV[1] then
    return 0
end
return redis.call('DEL', KEYS[1])
"#;

/// Redis-backed code repository
pub struct RedisOtpRepository {
    /// Redis client
    client: RedisClient,
    /// Lifetime of an issued code
    expiry_window: Duration,
    /// Compare-and-set script for updates
    update_script: Script,
    /// Compare-and-delete script for a single issuance
    delete_script: Script,
}

impl RedisOtpRepository {
    /// Create a new Redis code repository
    pub fn new(client: RedisClient, expiry_window: Duration) -> Self {
        Self {
            client,
            expiry_window,
            update_script: Script::new(UPDATE_SCRIPT),
            delete_script: Script::new(DELETE_SCRIPT),
        }
    }

    /// Full cache key for an address, including any configured prefix
    pub fn record_key(&self, email: &str) -> String {
        self.client
            .make_key(&format!("{}:{}", OTP_KEY_NAMESPACE, email))
    }

    fn decode(email: &str, raw: &str) -> Result<OtpRecord, DomainError> {
        serde_json::from_str(raw).map_err(|e| {
            warn!(
                email = %mask_email(email),
                error = %e,
                "Stored verification code is not a valid record"
            );
            DomainError::storage(format!("Corrupt verification record: {}", e))
        })
    }

    /// `created_at` exactly as it appears inside the stored JSON
    fn encoded_created_at(record: &OtpRecord) -> Result<String, DomainError> {
        serde_json::to_value(record.created_at)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .ok_or_else(|| DomainError::storage("Failed to encode created_at"))
    }
}

/// Milliseconds left before a record must disappear, or `None` if already due
pub(crate) fn remaining_ttl_ms(
    record: &OtpRecord,
    now: chrono::DateTime<Utc>,
    window: Duration,
) -> Option<u64> {
    let remaining = record.remaining_ttl(now, window).num_milliseconds();
    u64::try_from(remaining).ok().filter(|ms| *ms > 0)
}

#[async_trait]
impl OtpRepository for RedisOtpRepository {
    async fn store(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let ttl_ms = u64::try_from(self.expiry_window.num_milliseconds())
            .unwrap_or(0)
            .max(1);
        let value = serde_json::to_string(record)
            .map_err(|e| DomainError::storage(format!("Failed to encode record: {}", e)))?;

        self.client
            .set_with_expiry_ms(&self.record_key(&record.email), &value, ttl_ms)
            .await?;

        debug!(email = %mask_email(&record.email), ttl_ms = ttl_ms, "Stored verification code");
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, DomainError> {
        let Some(raw) = self.client.get(&self.record_key(email)).await? else {
            return Ok(None);
        };

        let record = Self::decode(email, &raw)?;
        // Native expiry has millisecond granularity; enforce the window exactly
        if record.is_expired_at(Utc::now(), self.expiry_window) {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn update(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let Some(ttl_ms) = remaining_ttl_ms(record, Utc::now(), self.expiry_window) else {
            return Ok(false);
        };

        let created_at = Self::encoded_created_at(record)?;
        let value = serde_json::to_string(record)
            .map_err(|e| DomainError::storage(format!("Failed to encode record: {}", e)))?;

        let applied: i64 = self
            .client
            .eval_script(
                &self.update_script,
                &[self.record_key(&record.email)],
                &[created_at, record.attempts.to_string(), value, ttl_ms.to_string()],
            )
            .await?;

        Ok(applied == 1)
    }

    async fn delete(&self, email: &str) -> Result<(), DomainError> {
        self.client.delete(&self.record_key(email)).await?;
        Ok(())
    }

    async fn delete_issued(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let created_at = Self::encoded_created_at(record)?;
        let removed: i64 = self
            .client
            .eval_script(
                &self.delete_script,
                &[self.record_key(&record.email)],
                &[created_at],
            )
            .await?;

        Ok(removed == 1)
    }

    async fn sweep_expired(&self) -> Result<u64, DomainError> {
        // Keys expire natively
        Ok(0)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.client.health_check().await?)
    }
}
