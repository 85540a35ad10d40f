//! Friend-update request parameters

use chrono::{DateTime, TimeZone, Utc};
use palsync_domain::constants::{PARAM_PASSWORD, PARAM_UPDATED, PARAM_USERNAME, TIMESTAMP_FORMAT};
use palsync_domain::{Account, AuthToken};

/// Parameters of one friend-updates fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub account: Account,
    pub auth_token: AuthToken,
    /// Last sync point; `None` fetches everything.
    pub since: Option<DateTime<Utc>>,
}

impl UpdateRequest {
    pub fn new(account: Account, auth_token: AuthToken) -> Self {
        Self { account, auth_token, since: None }
    }

    /// Set the last sync point, normalized to UTC.
    pub fn since<Tz: TimeZone>(mut self, since: DateTime<Tz>) -> Self {
        self.since = Some(since.with_timezone(&Utc));
        self
    }

    /// Form fields in wire order: `name`, `pass`, then `timestamp` if set.
    pub fn form_params(&self) -> Vec<(String, String)> {
        let mut params = credential_params(&self.account, &self.auth_token);
        if let Some(since) = &self.since {
            params.push((PARAM_UPDATED.to_string(), format_timestamp(since)));
        }
        params
    }
}

/// Format a sync point as `yyyy/MM/dd HH:mm` in UTC.
pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    timestamp.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn credential_params(account: &Account, auth_token: &AuthToken) -> Vec<(String, String)> {
    vec![
        (PARAM_USERNAME.to_string(), account.name.clone()),
        (PARAM_PASSWORD.to_string(), auth_token.as_str().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn request() -> UpdateRequest {
        UpdateRequest::new(Account::new("alice"), AuthToken::new("tok"))
    }

    #[test]
    fn omits_timestamp_without_sync_point() {
        let params = request().form_params();
        assert_eq!(
            params,
            vec![("name".to_string(), "alice".to_string()), ("pass".to_string(), "tok".to_string())]
        );
    }

    #[test]
    fn formats_timestamp_in_utc() {
        let since = Utc.with_ymd_and_hms(2010, 3, 7, 9, 5, 59).unwrap();
        let params = request().since(since).form_params();

        assert_eq!(params.len(), 3);
        assert_eq!(params[2], ("timestamp".to_string(), "2010/03/07 09:05".to_string()));
    }

    #[test]
    fn converts_offset_times_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap();

        assert_eq!(format_timestamp(&local), "2023/12/31 23:30");
        assert_eq!(request().since(local).since, Some(Utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap()));
    }
}
