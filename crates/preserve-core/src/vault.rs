use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::matcher::Matcher;
use crate::placeholder::{PLACEHOLDER, parse_key, placeholder};
use crate::{Error, Result};

/// What restoration substitutes for a placeholder with no capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Drop the placeholder.
    #[default]
    Empty,
    /// Leave the placeholder text untouched.
    Keep,
    /// Substitute a fixed sentinel.
    Marker(String),
}

/// Original substrings captured by one extraction, indexed by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CaptureMap {
    entries: Vec<String>,
}

impl CaptureMap {
    pub fn get(&self, key: usize) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(String::as_str).enumerate()
    }
}

/// A placeholder found during restoration that had no capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Miss {
    pub placeholder: String,
    /// `None` when the digits are not a canonical key.
    pub key: Option<usize>,
    /// Byte offset of the placeholder in the restoration input.
    pub offset: usize,
}

/// Restored text together with every lookup miss hit on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restoration {
    pub text: String,
    pub misses: Vec<Miss>,
}

impl Restoration {
    pub fn is_complete(&self) -> bool {
        self.misses.is_empty()
    }
}

/// Swaps protected substrings for placeholders and back again.
///
/// One vault is meant for one extract → transform → restore cycle. Calling
/// [`extract`](Self::extract) again discards the previous captures.
#[derive(Debug, Clone)]
pub struct Vault<M = Regex> {
    matcher: M,
    captures: CaptureMap,
    on_miss: MissPolicy,
}

impl Vault<Regex> {
    /// Compile `pattern` and bind a vault to it.
    pub fn from_pattern(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self::new(Regex::new(pattern)?))
    }
}

impl<M: Matcher> Vault<M> {
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            captures: CaptureMap::default(),
            on_miss: MissPolicy::default(),
        }
    }

    pub fn with_miss_policy(mut self, on_miss: MissPolicy) -> Self {
        self.on_miss = on_miss;
        self
    }

    pub fn miss_policy(&self) -> &MissPolicy {
        &self.on_miss
    }

    pub fn captures(&self) -> &CaptureMap {
        &self.captures
    }

    /// Replace every match with `__ID<n>__`, numbering matches left to right from 0.
    pub fn extract(&mut self, text: &str) -> String {
        if PLACEHOLDER.is_match(text) {
            warn!("Input already contains placeholder-shaped text; restoration will treat it as a placeholder");
        }

        let mut entries = Vec::new();
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for span in self.matcher.find_spans(text) {
            let Some(captured) = text.get(span.clone()).filter(|_| span.start >= last) else {
                warn!("Matcher returned unusable span {:?}, skipping", span);
                continue;
            };

            output.push_str(&text[last..span.start]);
            output.push_str(&placeholder(entries.len()));
            entries.push(captured.to_string());
            last = span.end;
        }
        output.push_str(&text[last..]);

        self.captures = CaptureMap { entries };
        debug!("Extracted {} protected span(s)", self.captures.len());

        output
    }

    /// Put the captured originals back in place of their placeholders.
    ///
    /// Misses are resolved by the vault's [`MissPolicy`] and logged.
    pub fn restore(&self, text: &str) -> String {
        self.restore_report(text).text
    }

    /// Like [`restore`](Self::restore), but also hands back every miss.
    pub fn restore_report(&self, text: &str) -> Restoration {
        let mut output = String::with_capacity(text.len());
        let mut misses = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            output.push_str(&text[last..whole.start()]);
            last = whole.end();

            let key = parse_key(&caps[1]);
            if let Some(original) = key.and_then(|k| self.captures.get(k)) {
                output.push_str(original);
                continue;
            }

            match &self.on_miss {
                MissPolicy::Empty => {}
                MissPolicy::Keep => output.push_str(whole.as_str()),
                MissPolicy::Marker(marker) => output.push_str(marker),
            }
            misses.push(Miss {
                placeholder: whole.as_str().to_string(),
                key,
                offset: whole.start(),
            });
        }
        output.push_str(&text[last..]);

        if misses.is_empty() {
            debug!("Restored text with {} capture(s) available", self.captures.len());
        } else {
            warn!(
                "{} placeholder(s) had no capture (policy: {:?})",
                misses.len(),
                self.on_miss
            );
        }

        Restoration {
            text: output,
            misses,
        }
    }

    /// Strict restoration: the first miss is an error.
    pub fn try_restore(&self, text: &str) -> Result<String> {
        let restoration = self.restore_report(text);
        match restoration.misses.into_iter().next() {
            Some(miss) => Err(Error::LookupMiss {
                placeholder: miss.placeholder,
                offset: miss.offset,
            }),
            None => Ok(restoration.text),
        }
    }

    /// Restore and discard the vault, closing the cycle.
    pub fn into_restored(self, text: &str) -> String {
        self.restore(text)
    }
}
