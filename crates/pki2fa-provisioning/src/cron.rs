//! Periodic code logging: one UTC-timestamped line per invocation.
//!
//! Scheduling belongs to the host's cron; this module only turns "now" and
//! the resident seed into `YYYY-MM-DD HH:MM:SS - 2FA Code: NNNNNN`.

use pki2fa_crypto_core::{generate_code_at, TotpConfig};
use tracing::warn;

use crate::error::ProvisionError;
use crate::storage::SeedStore;

/// Format one log line for `code` at Unix time `now` (UTC).
#[must_use]
pub fn format_cron_line(now: u64, code: &str) -> String {
    let (year, month, day, hour, minute, second) = epoch_to_utc(now);
    format!(
        "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} - 2FA Code: {code}"
    )
}

/// Produce the line for `now`, or `None` if no seed has been provisioned.
///
/// # Errors
///
/// [`ProvisionError::Io`] for an unreadable seed file, or
/// [`ProvisionError::Crypto`] if its content is not a valid seed.
pub fn cron_tick(store: &SeedStore, now: u64) -> Result<Option<String>, ProvisionError> {
    let Some(seed) = store.load()? else {
        warn!(path = %store.path().display(), "seed file not found");
        return Ok(None);
    };
    let code = generate_code_at(seed.expose(), now, &TotpConfig::default())?;
    Ok(Some(format_cron_line(now, &code)))
}

/// Convert epoch seconds to (year, month, day, hour, minute, second) in UTC.
///
/// Howard Hinnant's `civil_from_days`; valid for years 1970 through 9999.
#[allow(clippy::arithmetic_side_effects)]
const fn epoch_to_utc(epoch_secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let total_days = epoch_secs / 86_400;
    let secs_of_day = epoch_secs % 86_400;

    let hour = secs_of_day / 3600;
    let minute = (secs_of_day % 3600) / 60;
    let second = secs_of_day % 60;

    // Days since 0000-03-01.
    let z = total_days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400;
    let year = if month <= 2 { y + 1 } else { y };

    (year, month, day, hour, minute, second)
}
