//! Google Sheets v4 client authenticated with a service account.
//!
//! The account signs an RS256 assertion which is exchanged for a bearer
//! token at its `token_uri`. The target spreadsheet is found by name
//! through Drive (and created when missing) or addressed by id.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

use super::{Cell, Spreadsheet, GOOGLE_CREDS_ENV_VAR};
use crate::{FflError, Result};


pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";
const JWT_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The parts of a service account key file we need
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccount {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| FflError::InvalidCredentials {
            message: e.to_string(),
        })
    }

    /// Read the key file JSON from `GOOGLE_CREDS`
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(GOOGLE_CREDS_ENV_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| FflError::MissingCredentials {
                env_var: GOOGLE_CREDS_ENV_VAR.to_string(),
            })?;
        Self::from_json(&raw)
    }

    fn assertion(&self, now: i64) -> Result<String> {
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: SCOPES.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }

    pub async fn access_token(&self, http: &Client) -> Result<String> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;
        let resp = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let token: TokenResponse = checked(resp).await?.json().await?;
        tracing::debug!(account = %self.client_email, "obtained access token");
        Ok(token.access_token)
    }
}

/// Which spreadsheet to write to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetTarget {
    /// Looked up by title, created if absent
    Name(String),
    Id(String),
}

/// API roots, swappable for tests
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub sheets: String,
    pub drive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sheets: SHEETS_BASE_URL.to_string(),
            drive: DRIVE_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Both APIs served from one root
    pub fn at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            sheets: base.to_string(),
            drive: base.to_string(),
        }
    }
}

pub struct GoogleSheets {
    http: Client,
    token: String,
    sheets_base: String,
    spreadsheet_id: String,
    /// Worksheet title -> sheetId
    sheet_ids: HashMap<String, i64>,
}

impl GoogleSheets {
    pub async fn connect(account: &ServiceAccount, target: SpreadsheetTarget) -> Result<Self> {
        Self::connect_with(account, target, Endpoints::default()).await
    }

    pub async fn connect_with(
        account: &ServiceAccount,
        target: SpreadsheetTarget,
        endpoints: Endpoints,
    ) -> Result<Self> {
        let http = Client::builder().user_agent("ffl-records/1.0").build()?;
        let token = account.access_token(&http).await?;

        let mut sheets = Self {
            http,
            token,
            sheets_base: endpoints.sheets.trim_end_matches('/').to_string(),
            spreadsheet_id: String::new(),
            sheet_ids: HashMap::new(),
        };

        sheets.spreadsheet_id = match target {
            SpreadsheetTarget::Id(id) => id,
            SpreadsheetTarget::Name(name) => {
                match sheets.find_by_name(&endpoints.drive, &name).await? {
                    Some(id) => id,
                    None => sheets.create(&name).await?,
                }
            }
        };
        sheets.load_sheet_ids().await?;

        tracing::info!(spreadsheet = %sheets.spreadsheet_id, "connected to spreadsheet");
        Ok(sheets)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    async fn find_by_name(&self, drive: &str, name: &str) -> Result<Option<String>> {
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            name.replace('\\', "\\\\").replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        let resp = self
            .http
            .get(format!("{}/files", drive.trim_end_matches('/')))
            .bearer_auth(&self.token)
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")])
            .send()
            .await?;
        let body: Value = checked(resp).await?.json().await?;

        Ok(body["files"]
            .as_array()
            .and_then(|files| files.first())
            .and_then(|f| f["id"].as_str())
            .map(str::to_string))
    }

    async fn create(&self, name: &str) -> Result<String> {
        let resp = self
            .http
            .post(format!("{}/spreadsheets", self.sheets_base))
            .bearer_auth(&self.token)
            .json(&json!({ "properties": { "title": name } }))
            .send()
            .await?;
        let body: Value = checked(resp).await?.json().await?;

        let id = body["spreadsheetId"]
            .as_str()
            .ok_or_else(|| FflError::sheets("create reply without spreadsheetId"))?;
        tracing::info!(%name, %id, "created spreadsheet");
        Ok(id.to_string())
    }

    async fn load_sheet_ids(&mut self) -> Result<()> {
        let resp = self
            .http
            .get(format!(
                "{}/spreadsheets/{}",
                self.sheets_base, self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .query(&[("fields", "sheets.properties(sheetId,title)")])
            .send()
            .await?;
        let body: Value = checked(resp).await?.json().await?;

        self.sheet_ids = body["sheets"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|s| {
                let props = &s["properties"];
                Some((props["title"].as_str()?.to_string(), props["sheetId"].as_i64()?))
            })
            .collect();
        Ok(())
    }

    async fn batch_update(&self, requests: Value) -> Result<Value> {
        let resp = self
            .http
            .post(format!(
                "{}/spreadsheets/{}:batchUpdate",
                self.sheets_base, self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/spreadsheets/{}/values",
            self.sheets_base, self.spreadsheet_id
        ))
        .map_err(|e| FflError::sheets(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FflError::sheets("sheets base URL cannot take a path"))?
            .pop_if_empty()
            .push(range);
        Ok(url)
    }
}

/// Worksheet title quoted for A1 ranges
fn quote(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

async fn checked(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().clone();
    let body = resp.text().await.unwrap_or_default();
    Err(FflError::sheets(format!(
        "{} returned {}: {}",
        url.path(),
        status,
        body.trim()
    )))
}

impl Spreadsheet for GoogleSheets {
    async fn replace_worksheet(&mut self, title: &str, rows: usize, cols: usize) -> Result<()> {
        let grid = json!({ "rowCount": rows, "columnCount": cols });

        if let Some(&sheet_id) = self.sheet_ids.get(title) {
            self.batch_update(json!([{
                "updateSheetProperties": {
                    "properties": { "sheetId": sheet_id, "gridProperties": grid },
                    "fields": "gridProperties(rowCount,columnCount)"
                }
            }]))
            .await?;
            return self.clear(title).await;
        }

        let reply = self
            .batch_update(json!([{
                "addSheet": { "properties": { "title": title, "gridProperties": grid } }
            }]))
            .await?;
        let sheet_id = reply["replies"][0]["addSheet"]["properties"]["sheetId"]
            .as_i64()
            .ok_or_else(|| FflError::sheets("addSheet reply without sheetId"))?;
        tracing::debug!(%title, sheet_id, "added worksheet");
        self.sheet_ids.insert(title.to_string(), sheet_id);
        Ok(())
    }

    async fn update(&mut self, title: &str, anchor: &str, values: &[Vec<Cell>]) -> Result<()> {
        if !self.sheet_ids.contains_key(title) {
            return Err(FflError::WorksheetNotFound {
                title: title.to_string(),
            });
        }
        let range = format!("{}!{}", quote(title), anchor);
        let resp = self
            .http
            .put(self.values_url(&range)?)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "range": range, "majorDimension": "ROWS", "values": values }))
            .send()
            .await?;
        checked(resp).await?;
        Ok(())
    }

    async fn clear(&mut self, title: &str) -> Result<()> {
        if !self.sheet_ids.contains_key(title) {
            return Err(FflError::WorksheetNotFound {
                title: title.to_string(),
            });
        }
        let resp = self
            .http
            .post(self.values_url(&format!("{}:clear", quote(title)))?)
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()
            .await?;
        checked(resp).await?;
        Ok(())
    }
}
