//! Vanity-import resolution.
//!
//! A Go module served from a custom domain (e.g. `fyne.io/fyne/v2`)
//! advertises its real repository through a `<meta name="go-import" ...>` tag
//! at its own HTTPS URL. This module fetches `https://{package_path}` with
//! the curl crate and scans the body line by line, aborting the transfer as
//! soon as a directive is found or `</head>` is reached.
//!
//! Resolution is best-effort by design: every failure mode (network error,
//! missing or malformed directive, unparseable target) degrades to `None`,
//! never to an error.

mod scan;

use self::scan::{LineBuffer, ScanStep};
use crate::config::BinoriginConfig;
use std::time::Duration;

/// Trait seam for the resolution orchestrator, so it can be exercised
/// without network access.
pub trait VanityLookup {
    /// Returns the protocol-stripped redirect target for `package_path`,
    /// or `None` when no redirect was found.
    fn lookup(&self, package_path: &str) -> Option<String>;
}

/// Resolves vanity import paths over HTTP with bounded timeouts.
#[derive(Debug, Clone)]
pub struct VanityResolver {
    connect_timeout: Duration,
    timeout: Duration,
}

impl VanityResolver {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }

    pub fn from_config(cfg: &BinoriginConfig) -> Self {
        Self::new(
            Duration::from_secs(cfg.vanity_connect_timeout_secs),
            Duration::from_secs(cfg.vanity_timeout_secs),
        )
    }

    /// Looks up the vanity redirect for `package_path`.
    ///
    /// The lookup hits the package path rather than the module path because
    /// that is the URL `go install` fetches, so it is what vanity services
    /// register. The captured target is validated as a URL and returned with
    /// its protocol stripped, so callers can split on `/` uniformly.
    pub fn resolve(&self, package_path: &str) -> Option<String> {
        let target = self.fetch_redirect(package_path)?;
        if url::Url::parse(&target).is_err() {
            tracing::debug!("ignoring unparseable go-import target '{}'", target);
            return None;
        }
        Some(strip_protocol(&target))
    }

    /// Performs the GET and streams the body through the line scanner.
    /// A single attempt only; a failed or slow host is not retried.
    fn fetch_redirect(&self, package_path: &str) -> Option<String> {
        let url = format!("https://{package_path}");

        let mut easy = curl::easy::Easy::new();
        easy.url(&url).ok()?;
        easy.follow_location(true).ok()?;
        easy.connect_timeout(self.connect_timeout).ok()?;
        easy.timeout(self.timeout).ok()?;

        let mut lines = LineBuffer::default();
        let mut found: Option<String> = None;
        let mut past_head = false;
        {
            let mut transfer = easy.transfer();
            let res = transfer.write_function(|data| {
                match lines.feed(data) {
                    // Returning a short write aborts the transfer; only the
                    // head is relevant and the document may be large.
                    ScanStep::Found(redir) => {
                        found = Some(redir);
                        Ok(0)
                    }
                    ScanStep::EndOfHead => {
                        past_head = true;
                        Ok(0)
                    }
                    ScanStep::Continue => Ok(data.len()),
                }
            });
            if res.is_err() {
                return None;
            }
            let perform_result = transfer.perform();
            drop(transfer);
            if let Err(err) = perform_result {
                // The deliberate abort above surfaces as a write error; any
                // other failure means we scan whatever bytes arrived.
                if found.is_none() && !past_head {
                    tracing::debug!("vanity GET {} failed: {}", url, err);
                }
            }
        }

        if let Ok(code) = easy.response_code() {
            if !(200..300).contains(&code) {
                // Non-2xx is not fatal; some hosts serve the directive on
                // error pages. Scanning already happened above.
                tracing::debug!("vanity GET {} returned HTTP {}", url, code);
            }
        }

        // The last line of a body without a trailing newline is still pending.
        if found.is_none() && !past_head {
            if let ScanStep::Found(redir) = lines.finish() {
                found = Some(redir);
            }
        }
        found
    }
}

impl VanityLookup for VanityResolver {
    fn lookup(&self, package_path: &str) -> Option<String> {
        self.resolve(package_path)
    }
}

/// Strips an explicit `http://`/`https://` prefix.
fn strip_protocol(target: &str) -> String {
    match target.split_once("//") {
        Some((_, rest)) => rest.to_string(),
        None => target.to_string(),
    }
}
