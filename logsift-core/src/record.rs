use chrono::NaiveDate;
use std::num::ParseIntError;

/// Placeholder written for a client key whose lookup failed.
pub const UNRESOLVED: &str = "N/A";

/// The request fields captured by the line grammar.
///
/// These are fixed once a [`Record`] is built from them; a record only hands
/// out shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFields {
    /// Join key for identity enrichment, usually the client address.
    pub client_key: String,
    pub timestamp: NaiveDate,
    pub method: String,
    pub path: String,
    /// Kept as the raw token; see [`Record::status_code`].
    pub status: String,
    /// Kept as the raw token; see [`Record::size_bytes`].
    pub size: String,
    /// May be the "-" placeholder.
    pub referrer: String,
    pub user_agent: String,
}

/// One parsed request flowing through the pipeline.
///
/// Enrichment slots are filled at most once each. A second write to the same
/// slot is ignored and reported back to the caller as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    request: RequestFields,
    resolved_host: Option<String>,
    resolved_net: Option<String>,
    is_validated_bot: Option<bool>,
    page_class: Option<String>,
}

impl Record {
    pub fn new(request: RequestFields) -> Self {
        Self {
            request,
            resolved_host: None,
            resolved_net: None,
            is_validated_bot: None,
            page_class: None,
        }
    }

    pub fn request(&self) -> &RequestFields {
        &self.request
    }

    pub fn client_key(&self) -> &str {
        &self.request.client_key
    }

    pub fn path(&self) -> &str {
        &self.request.path
    }

    pub fn resolved_host(&self) -> Option<&str> {
        self.resolved_host.as_deref()
    }

    pub fn resolved_net(&self) -> Option<&str> {
        self.resolved_net.as_deref()
    }

    pub fn is_validated_bot(&self) -> Option<bool> {
        self.is_validated_bot
    }

    pub fn page_class(&self) -> Option<&str> {
        self.page_class.as_deref()
    }

    /// Numeric view of the status token, for consumers that need to compare.
    pub fn status_code(&self) -> Result<u16, ParseIntError> {
        self.request.status.trim().parse()
    }

    /// Numeric view of the size token. Servers log "-" for empty bodies,
    /// which fails here like any other non-numeric token.
    pub fn size_bytes(&self) -> Result<u64, ParseIntError> {
        self.request.size.trim().parse()
    }

    pub(crate) fn set_resolved_host(&mut self, host: String) -> bool {
        set_once(&mut self.resolved_host, host)
    }

    pub(crate) fn set_resolved_net(&mut self, net: String) -> bool {
        set_once(&mut self.resolved_net, net)
    }

    pub(crate) fn set_validated_bot(&mut self, validated: bool) -> bool {
        set_once(&mut self.is_validated_bot, validated)
    }

    pub(crate) fn set_page_class(&mut self, class: String) -> bool {
        set_once(&mut self.page_class, class)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

#[cfg(test)]
pub(crate) fn sample_record(client_key: &str, path: &str) -> Record {
    Record::new(RequestFields {
        client_key: client_key.to_string(),
        timestamp: NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
        method: "GET".to_string(),
        path: path.to_string(),
        status: "200".to_string(),
        size: "512".to_string(),
        referrer: "-".to_string(),
        user_agent: "Mozilla/5.0".to_string(),
    })
}
