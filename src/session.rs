use std::fmt;

use capsule_parser::SemesterCode;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

const UPSTREAM: &str = "https://capsuleweb.ulaval.ca";
const LOGIN_PATH: &str = "/pls/etprod8/twbkwbis.P_WWWLogin";
const STUDIES_MENU_PATH: &str = "/pls/etprod8/twbkwbis.P_GenMenu?name=bmenu.P_StuMainMnu";
const REGISTRATION_MENU_PATH: &str = "/pls/etprod8/twbkwbis.P_GenMenu?name=bmenu.P_RegMnu";
const DETAILED_SCHEDULE_PATH: &str = "/pls/etprod8/bwskfshd.P_CrseSchdDetl";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:41.0) Gecko/20100101 Firefox/41.0";

// The login form refuses clients that did not receive its test cookie
const LOGIN_COOKIE: &str = "TESTID=set; accessibility=false";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The username or password provided is incorrect")]
    InvalidCredentials,

    #[error("Unexpected page, could not find the {0}")]
    UnexpectedPage(&'static str),
}

/// IDUL and PIN of a student.
pub struct Credentials {
    pub idul: String,
    pub pin: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("idul", &self.idul)
            .field("pin", &"********")
            .finish()
    }
}

pub struct Session {
    client: Client,
}

impl Session {
    pub fn new() -> Result<Self, SessionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(header::DNT, HeaderValue::from_static("1"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Session { client })
    }

    fn url(&self, path: &str) -> String {
        resolve(UPSTREAM, path)
    }

    async fn get(&self, path: &str) -> Result<String, SessionError> {
        debug!("GET {path}");
        let response = self.client.get(self.url(path)).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn post(
        &self,
        path: &str,
        form: &[(&str, &str)],
        cookie: Option<&'static str>,
    ) -> Result<String, SessionError> {
        debug!("POST {path}");
        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Signs in and follows the portal's refresh redirect to the main menu.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), SessionError> {
        let login_page = self.get(LOGIN_PATH).await?;
        let action = form_action(&login_page, 0).ok_or(SessionError::UnexpectedPage("login form"))?;

        let response = self
            .post(
                &action,
                &[("sid", credentials.idul.as_str()), ("PIN", credentials.pin.as_str())],
                Some(LOGIN_COOKIE),
            )
            .await?;

        let redirect = refresh_target(&response).ok_or(SessionError::InvalidCredentials)?;
        self.get(&redirect).await?;

        Ok(())
    }

    /// Walks the menus down to the detailed schedule and returns its HTML for
    /// `semester`, or for the most recent term when none is given.
    pub async fn fetch_schedule(&self, semester: Option<SemesterCode>) -> Result<String, SessionError> {
        self.get(STUDIES_MENU_PATH).await?;
        self.get(REGISTRATION_MENU_PATH).await?;

        let term_page = self.get(DETAILED_SCHEDULE_PATH).await?;
        let action = form_action(&term_page, 1).ok_or(SessionError::UnexpectedPage("term form"))?;

        let term = match semester {
            Some(semester) => semester.to_string(),
            None => first_term(&term_page).ok_or(SessionError::UnexpectedPage("term list"))?,
        };
        debug!("Selected term {term}");

        self.post(&action, &[("term_in", term.as_str())], None).await
    }
}

fn resolve(upstream: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{upstream}{path}")
    }
}

fn form_action(html: &str, index: usize) -> Option<String> {
    let html = Html::parse_document(html);
    let action = html
        .select(selector!("form"))
        .nth(index)?
        .value()
        .attr("action")
        .map(String::from);
    action
}

fn refresh_target(html: &str) -> Option<String> {
    let html = Html::parse_document(html);
    let content = html.select(selector!("meta[content]")).find_map(|meta| {
        let content = meta.value().attr("content")?;
        content.split_once("url=").map(|(_, url)| url.trim().to_string())
    });
    content.filter(|url| !url.is_empty())
}

fn first_term(html: &str) -> Option<String> {
    let html = Html::parse_document(html);
    let term = html
        .select(selector!("option"))
        .next()?
        .value()
        .attr("value")
        .map(String::from);
    term
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERM_PAGE: &str = r#"
        <html><body>
          <form action="/pls/etprod8/twbksrch.P_ShowResults"><input name="keyword_in"></form>
          <form action="/pls/etprod8/bwskfshd.P_CrseSchdDetl" method="post">
            <select name="term_in">
              <option value="201601">Hiver 2016</option>
              <option value="201509">Automne 2015</option>
            </select>
          </form>
        </body></html>
    "#;

    #[test]
    fn finds_form_actions() {
        assert_eq!(
            form_action(TERM_PAGE, 1).as_deref(),
            Some("/pls/etprod8/bwskfshd.P_CrseSchdDetl")
        );
        assert_eq!(form_action(TERM_PAGE, 2), None);
    }

    #[test]
    fn finds_the_most_recent_term() {
        assert_eq!(first_term(TERM_PAGE).as_deref(), Some("201601"));
        assert_eq!(first_term("<html></html>"), None);
    }

    #[test]
    fn follows_refresh_meta() {
        let page = r#"<html><head>
            <meta http-equiv="refresh" content="0;url=/pls/etprod8/twbkwbis.P_GenMenu?name=bmenu.P_MainMnu">
        </head></html>"#;
        assert_eq!(
            refresh_target(page).as_deref(),
            Some("/pls/etprod8/twbkwbis.P_GenMenu?name=bmenu.P_MainMnu")
        );

        let rejected = r#"<html><head><meta charset="utf-8"></head>
            <body>Authorization Failure - Invalid User ID or PIN.</body></html>"#;
        assert_eq!(refresh_target(rejected), None);
    }

    #[test]
    fn credentials_hide_the_pin() {
        let credentials = Credentials {
            idul: "abcde1".into(),
            pin: "secret".into(),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("abcde1"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn resolves_relative_paths() {
        assert_eq!(
            resolve(UPSTREAM, LOGIN_PATH),
            "https://capsuleweb.ulaval.ca/pls/etprod8/twbkwbis.P_WWWLogin"
        );
        assert_eq!(resolve(UPSTREAM, "https://example.org/x"), "https://example.org/x");
    }
}
