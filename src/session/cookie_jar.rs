//! File-backed cookie store
//!
//! Keeps the cookies of one web session in memory and mirrors them to a
//! Netscape-format cookie file after every change, so the session survives
//! in the file it was created with.

use crate::{Result, resource::ResourceFile};
use cookie::Cookie;
use reqwest::{cookie::CookieStore, header::HeaderValue};
use std::{
    fmt::Write as _,
    fs,
    sync::{PoisonError, RwLock},
};
use time::OffsetDateTime;
use url::Url;

const FILE_HEADER: &str = "# Netscape HTTP Cookie File";
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredCookie {
    domain: String,
    include_subdomains: bool,
    path: String,
    secure: bool,
    http_only: bool,
    /// Unix timestamp; `None` for session cookies
    expires: Option<i64>,
    name: String,
    value: String,
}

impl StoredCookie {
    fn from_set_cookie(cookie: &Cookie<'_>, url: &Url, now: i64) -> Option<Self> {
        let host = url.host_str()?.to_ascii_lowercase();

        let (domain, include_subdomains) = match cookie.domain() {
            Some(domain) => {
                let domain = domain.trim_start_matches('.').to_ascii_lowercase();
                if !domain_matches(&host, &domain) {
                    return None;
                }
                (domain, true)
            }
            None => (host, false),
        };

        let path = match cookie.path() {
            Some(path) if path.starts_with('/') => path.to_string(),
            _ => default_path(url),
        };

        let expires = match (cookie.max_age(), cookie.expires_datetime()) {
            (Some(max_age), _) => Some(now.saturating_add(max_age.whole_seconds())),
            (None, Some(expires)) => Some(expires.unix_timestamp()),
            (None, None) => None,
        };

        Some(Self {
            domain,
            include_subdomains,
            path,
            secure: cookie.secure().unwrap_or(false),
            http_only: cookie.http_only().unwrap_or(false),
            expires,
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
        })
    }

    fn parse_line(line: &str) -> Option<Self> {
        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None if line.starts_with('#') => return None,
            None => (line, false),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        let &[domain, include_subdomains, path, secure, expires, name, value] = fields.as_slice() else {
            return None;
        };

        let expires: i64 = expires.parse().ok()?;
        Some(Self {
            domain: domain.trim_start_matches('.').to_ascii_lowercase(),
            include_subdomains: include_subdomains.eq_ignore_ascii_case("TRUE"),
            path: path.to_string(),
            secure: secure.eq_ignore_ascii_case("TRUE"),
            http_only,
            expires: (expires > 0).then_some(expires),
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    fn write_line(&self, out: &mut String) {
        let flag = |value: bool| if value { "TRUE" } else { "FALSE" };
        let _ = writeln!(
            out,
            "{}{}{}\t{}\t{}\t{}\t{}\t{}\t{}",
            if self.http_only { HTTP_ONLY_PREFIX } else { "" },
            if self.include_subdomains { "." } else { "" },
            self.domain,
            flag(self.include_subdomains),
            self.path,
            flag(self.secure),
            self.expires.unwrap_or(0),
            self.name,
            self.value
        );
    }

    fn is_expired(&self, now: i64) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    fn same_identity(&self, other: &Self) -> bool {
        self.domain == other.domain && self.path == other.path && self.name == other.name
    }

    fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();

        let domain_ok = if self.include_subdomains {
            domain_matches(&host, &self.domain)
        } else {
            host == self.domain
        };

        domain_ok
            && path_matches(url.path(), &self.path)
            && (!self.secure || url.scheme() == "https")
    }
}

fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    request_path == cookie_path
        || (request_path.starts_with(cookie_path)
            && (cookie_path.ends_with('/')
                || request_path[cookie_path.len()..].starts_with('/')))
}

fn default_path(url: &Url) -> String {
    match url.path().rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(index) => url.path()[..index].to_string(),
    }
}

/// Cookie store persisted to a Netscape-format cookie file
#[derive(Debug)]
pub struct FileCookieJar {
    file: ResourceFile,
    cookies: RwLock<Vec<StoredCookie>>,
}

impl FileCookieJar {
    /// Load the jar from `file`; a missing or empty file gives an empty jar
    pub fn load(file: ResourceFile) -> Result<Self> {
        let mut cookies = Vec::new();
        if file.exists() {
            let now = OffsetDateTime::now_utc().unix_timestamp();
            cookies = fs::read_to_string(file.path())?
                .lines()
                .filter_map(StoredCookie::parse_line)
                .filter(|cookie| !cookie.is_expired(now))
                .collect();
        }

        Ok(Self {
            file,
            cookies: RwLock::new(cookies),
        })
    }

    pub fn file(&self) -> &ResourceFile {
        &self.file
    }

    /// Number of stored, unexpired cookies
    pub fn len(&self) -> usize {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        self.read_cookies()
            .iter()
            .filter(|cookie| !cookie.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write all cookies to the backing file
    pub fn save(&self) -> Result<()> {
        let mut contents = format!("{FILE_HEADER}\n\n");
        for cookie in self.read_cookies().iter() {
            cookie.write_line(&mut contents);
        }

        self.file.create()?;
        fs::write(self.file.path(), contents)?;
        Ok(())
    }

    fn read_cookies(&self) -> std::sync::RwLockReadGuard<'_, Vec<StoredCookie>> {
        self.cookies.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CookieStore for FileCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let received: Vec<StoredCookie> = cookie_headers
            .filter_map(|header| header.to_str().ok())
            .filter_map(|header| Cookie::parse(header).ok())
            .filter_map(|cookie| StoredCookie::from_set_cookie(&cookie, url, now))
            .collect();

        if received.is_empty() {
            return;
        }

        {
            let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);
            for cookie in received {
                cookies.retain(|existing| !existing.same_identity(&cookie));
                if !cookie.is_expired(now) {
                    cookies.push(cookie);
                }
            }
            cookies.retain(|cookie| !cookie.is_expired(now));
        }

        if let Err(e) = self.save() {
            tracing::warn!(
                "Failed to persist cookies to {}: {}",
                self.file.path().display(),
                e
            );
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let header = self
            .read_cookies()
            .iter()
            .filter(|cookie| !cookie.is_expired(now) && cookie.matches(url))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ");

        if header.is_empty() {
            return None;
        }
        HeaderValue::from_str(&header).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn set(jar: &FileCookieJar, url: &Url, headers: &[&'static str]) {
        let headers: Vec<HeaderValue> = headers
            .iter()
            .map(|header| HeaderValue::from_static(header))
            .collect();
        jar.set_cookies(&mut headers.iter(), url);
    }

    fn cookie_header(jar: &FileCookieJar, url: &str) -> Option<String> {
        jar.cookies(&Url::parse(url).unwrap())
            .map(|value| value.to_str().unwrap().to_string())
    }

    fn jar_in(temp_dir: &TempDir) -> FileCookieJar {
        FileCookieJar::load(ResourceFile::new(temp_dir.path().join("cookie_test.txt"))).unwrap()
    }

    #[test]
    fn test_store_and_send_cookie() {
        let temp_dir = TempDir::new().unwrap();
        let jar = jar_in(&temp_dir);
        let url = Url::parse("https://example.com:2083/login").unwrap();

        set(&jar, &url, &["cpsession=abc; path=/; HttpOnly"]);

        assert_eq!(jar.len(), 1);
        assert_eq!(
            cookie_header(&jar, "https://example.com:2083/cpsess1/execute/Email/list_pops"),
            Some("cpsession=abc".to_string())
        );
        assert_eq!(cookie_header(&jar, "https://other.example.org/"), None);
    }

    #[test]
    fn test_cookies_survive_reload() {
        let temp_dir = TempDir::new().unwrap();
        let url = Url::parse("https://example.com/").unwrap();
        {
            let jar = jar_in(&temp_dir);
            set(&jar, &url, &["a=1; Path=/; HttpOnly", "b=2; Path=/; Max-Age=3600"]);
        }

        let contents = fs::read_to_string(temp_dir.path().join("cookie_test.txt")).unwrap();
        assert!(contents.starts_with(FILE_HEADER));
        assert!(contents.contains("#HttpOnly_example.com\tFALSE\t/\tFALSE\t0\ta\t1"));

        let jar = jar_in(&temp_dir);
        assert_eq!(jar.len(), 2);
        assert_eq!(
            cookie_header(&jar, "https://example.com/"),
            Some("a=1; b=2".to_string())
        );
    }

    #[test]
    fn test_replacing_and_expiring_cookies() {
        let temp_dir = TempDir::new().unwrap();
        let jar = jar_in(&temp_dir);
        let url = Url::parse("https://example.com/").unwrap();

        set(&jar, &url, &["a=1; Path=/"]);
        set(&jar, &url, &["a=2; Path=/"]);
        assert_eq!(cookie_header(&jar, "https://example.com/"), Some("a=2".to_string()));

        set(&jar, &url, &["a=gone; Path=/; Max-Age=0"]);
        assert!(jar.is_empty());
        assert_eq!(cookie_header(&jar, "https://example.com/"), None);
    }

    #[test]
    fn test_domain_and_secure_rules() {
        let temp_dir = TempDir::new().unwrap();
        let jar = jar_in(&temp_dir);
        let url = Url::parse("https://cpanel.example.com/").unwrap();

        set(
            &jar,
            &url,
            &[
                "shared=1; Domain=.example.com; Path=/",
                "foreign=1; Domain=other.org; Path=/",
                "secret=1; Path=/; Secure",
            ],
        );

        assert_eq!(
            cookie_header(&jar, "https://www.example.com/"),
            Some("shared=1".to_string())
        );
        assert_eq!(
            cookie_header(&jar, "http://cpanel.example.com/"),
            Some("shared=1".to_string())
        );
        assert_eq!(
            cookie_header(&jar, "https://cpanel.example.com/"),
            Some("shared=1; secret=1".to_string())
        );
    }

    #[test]
    fn test_path_rules() {
        assert!(path_matches("/", "/"));
        assert!(path_matches("/foo/bar", "/foo"));
        assert!(path_matches("/foo/bar", "/foo/"));
        assert!(!path_matches("/foobar", "/foo"));
        assert_eq!(default_path(&Url::parse("https://a.b/x/y").unwrap()), "/x");
        assert_eq!(default_path(&Url::parse("https://a.b/login").unwrap()), "/");
    }

    #[test]
    fn test_load_skips_malformed_and_expired_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cookie_test.txt");
        fs::write(
            &path,
            "# Netscape HTTP Cookie File\n\
             not a cookie line\n\
             example.com\tFALSE\t/\tFALSE\t1\told\tx\n\
             example.com\tFALSE\t/\tFALSE\t0\tkept\ty\n",
        )
        .unwrap();

        let jar = FileCookieJar::load(ResourceFile::new(path)).unwrap();
        assert_eq!(cookie_header(&jar, "http://example.com/"), Some("kept=y".to_string()));
    }
}
