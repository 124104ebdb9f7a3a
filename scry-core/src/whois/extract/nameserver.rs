use std::collections::HashMap;
use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::whois::types::Nameserver;

static BRACKETED_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+\[([^\]]*)\]$").expect("Invalid bracketed nameserver regex")
});

/// Nameservers in first-seen order, unique by name.
///
/// Mentioning a name again returns the existing entry so addresses found
/// later are merged into it.
#[derive(Debug, Clone, Default)]
pub struct NameserverList {
    entries: Vec<Nameserver>,
    positions: HashMap<String, usize>,
}

impl NameserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `name`, appending it if this is its first mention.
    pub fn mention(&mut self, name: &str) -> &mut Nameserver {
        let index = match self.positions.get(name) {
            Some(&index) => index,
            None => {
                self.entries.push(Nameserver::new(name));
                self.positions.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Records `name` and attaches `address` to it when the address parses as
    /// IPv4 or IPv6. Anything else is dropped.
    pub fn attach(&mut self, name: &str, address: &str) {
        let entry = self.mention(name);
        match address.trim().parse::<IpAddr>() {
            Ok(IpAddr::V4(ipv4)) => entry.ipv4 = Some(ipv4),
            Ok(IpAddr::V6(ipv6)) => entry.ipv6 = Some(ipv6),
            Err(_) => {
                debug!(nameserver = %name, %address, "Ignoring unrecognized nameserver address");
            }
        }
    }

    /// Adds one `name` or `name [address]` line.
    pub fn push_bracketed_line(&mut self, line: &str) {
        match parse_bracketed_line(line) {
            (name, Some(address)) => self.attach(name, address),
            (name, None) if !name.is_empty() => {
                self.mention(name);
            }
            _ => {}
        }
    }

    /// Adds one `name [address ...]` line where addresses are separated by
    /// whitespace.
    pub fn push_spaced_line(&mut self, line: &str) {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return;
        };
        self.mention(name);
        for address in parts {
            self.attach(name, address);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Nameserver> {
        self.entries
    }
}

impl<'a> FromIterator<&'a str> for NameserverList {
    /// Collects `name` / `name [address]` lines.
    fn from_iter<I: IntoIterator<Item = &'a str>>(lines: I) -> Self {
        let mut list = NameserverList::new();
        for line in lines {
            list.push_bracketed_line(line);
        }
        list
    }
}

/// Splits a `name [address]` line. Lines without a bracketed suffix are a
/// bare name.
pub fn parse_bracketed_line(line: &str) -> (&str, Option<&str>) {
    let line = line.trim();
    match BRACKETED_ADDRESS.captures(line) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(name), Some(address)) => (name.as_str(), Some(address.as_str())),
            _ => (line, None),
        },
        None => (line, None),
    }
}
