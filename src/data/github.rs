//! GitHub GraphQL integration for daily contribution counts.

use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate, Utc};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::ContributionDay;
use crate::error::AppError;

const GRAPHQL_URL: &str = "https://api.github.com/graphql";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
const USER_AGENT: &str = concat!("contrib-heatmap/", env!("CARGO_PKG_VERSION"));

/// `contributionsCollection` rejects ranges longer than a year.
pub const MAX_CHUNK_DAYS: u64 = 365;

const USER_CREATED_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    createdAt
  }
}
"#;

const CALENDAR_RANGE_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// Where per-identity daily counts come from.
///
/// Implementations return at most one entry per date for a single call.
pub trait ContributionSource {
    /// UTC date the account was created; nothing before it is fetched.
    fn account_created(&self, login: &str) -> Result<NaiveDate, AppError>;

    /// Daily counts for `from..=to`, in no particular order.
    fn contributions(
        &self,
        login: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ContributionDay>, AppError>;
}

pub struct GitHubClient {
    client: Client,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::fetch(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            token: token.into(),
        })
    }

    fn post<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>, AppError> {
        let resp = self
            .client
            .post(GRAPHQL_URL)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .map_err(|e| AppError::fetch(format!("GitHub request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::fetch(format!(
                "GitHub request failed with status {status}: {}",
                body.trim()
            )));
        }

        resp.json()
            .map_err(|e| AppError::fetch(format!("Failed to parse GitHub response: {e}")))
    }

    fn fetch_calendar_chunk(
        &self,
        login: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ContributionDay>, AppError> {
        debug!("fetching contributions login={login} from={from} to={to}");
        let body: GraphQlResponse<UserEnvelope<CollectionNode>> = self.post(
            CALENDAR_RANGE_QUERY,
            json!({
                "login": login,
                "from": format!("{from}T00:00:00Z"),
                "to": format!("{to}T23:59:59Z"),
            }),
        )?;
        Ok(user_from_response(body, login)?.into_days())
    }
}

impl ContributionSource for GitHubClient {
    fn account_created(&self, login: &str) -> Result<NaiveDate, AppError> {
        let body: GraphQlResponse<UserEnvelope<CreatedAt>> =
            self.post(USER_CREATED_QUERY, json!({ "login": login }))?;
        Ok(user_from_response(body, login)?.created_at.date_naive())
    }

    fn contributions(
        &self,
        login: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ContributionDay>, AppError> {
        fetch_in_chunks(from, to, MAX_CHUNK_DAYS, |chunk_from, chunk_to| {
            self.fetch_calendar_chunk(login, chunk_from, chunk_to)
        })
    }
}

/// Split `start..=end` into contiguous, non-overlapping inclusive ranges of
/// at most `max_days` days each.
pub fn date_chunks(start: NaiveDate, end: NaiveDate, max_days: u64) -> Vec<(NaiveDate, NaiveDate)> {
    let span = max_days.max(1) - 1;
    let mut chunks = Vec::new();
    let mut cur = start;
    while cur <= end {
        let chunk_end = cur.checked_add_days(Days::new(span)).map_or(end, |d| d.min(end));
        chunks.push((cur, chunk_end));
        match chunk_end.succ_opt() {
            Some(next) => cur = next,
            None => break,
        }
    }
    chunks
}

/// Run `fetch` once per chunk of `start..=end` and concatenate the results.
///
/// Days a chunk reports outside its own window are dropped, so neighbouring
/// chunks can never contribute the same date twice.
pub fn fetch_in_chunks<F>(
    start: NaiveDate,
    end: NaiveDate,
    max_days: u64,
    mut fetch: F,
) -> Result<Vec<ContributionDay>, AppError>
where
    F: FnMut(NaiveDate, NaiveDate) -> Result<Vec<ContributionDay>, AppError>,
{
    let mut out = Vec::new();
    for (from, to) in date_chunks(start, end, max_days) {
        let days = fetch(from, to)?;
        out.extend(days.into_iter().filter(|d| d.date >= from && d.date <= to));
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope<T> {
    user: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedAt {
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionNode {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<ContributionDay>,
}

impl CollectionNode {
    fn into_days(self) -> Vec<ContributionDay> {
        self.contributions_collection
            .contribution_calendar
            .weeks
            .into_iter()
            .flat_map(|w| w.contribution_days)
            .collect()
    }
}

/// Unwrap `data.user`, turning a reported `errors` payload or a missing user
/// into a fetch error.
fn user_from_response<T>(body: GraphQlResponse<UserEnvelope<T>>, login: &str) -> Result<T, AppError> {
    if !body.errors.is_empty() {
        let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(AppError::fetch(format!(
            "GitHub GraphQL error: {}",
            messages.join("; ")
        )));
    }
    body.data
        .and_then(|d| d.user)
        .ok_or_else(|| AppError::fetch(format!("GitHub user '{login}' not found.")))
}
