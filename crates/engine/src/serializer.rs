use dnssec_analysis_domain::{
    DelegationStatus, ErrorInfo, LogLevel, NameAnalysis, NameStatus, RDType, RrsigStatus, Severity, TraversalLevel,
};
use serde::Serialize;

/// C9's output schema (§6): one `SerializedName` per analyzed
/// `NameAnalysis`, with a stable `id` per query and deterministic
/// ordering (`BTreeMap`/`BTreeSet` upstream already iterate sorted;
/// nothing here needs its own sort pass).
#[derive(Debug, Serialize)]
pub struct SerializedName {
    pub name: String,
    pub name_status: Option<&'static str>,
    pub delegation_status: Option<&'static str>,
    pub queries: Vec<SerializedQuery>,
}

#[derive(Debug, Serialize)]
pub struct SerializedQuery {
    pub id: String,
    pub rdtype: String,
    pub rrsig_statuses: Vec<SerializedRrsigStatus>,
    pub errors: Vec<SerializedError>,
}

#[derive(Debug, Serialize)]
pub struct SerializedRrsigStatus {
    pub owner: String,
    pub rdtype: String,
    pub signer: String,
    pub dnskey_key_tag: Option<u16>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SerializedError {
    pub kind: String,
    pub severity: &'static str,
    pub intermittent: bool,
    pub description: String,
}

/// Serializes one `NameAnalysis`'s populated status down to `level`,
/// filtering errors/warnings below `loglevel` and HTML-escaping
/// description text when `html_format` is set (§6's `serialize_status`
/// parameters).
pub fn serialize_status(na: &NameAnalysis, loglevel: LogLevel, level: TraversalLevel, html_format: bool) -> SerializedName {
    if !na.status.is_populated_at(level) {
        return SerializedName {
            name: na.name.to_string(),
            name_status: None,
            delegation_status: None,
            queries: Vec::new(),
        };
    }

    let name_status = na.status.name_status.borrow().map(name_status_str);
    let delegation_status = na.status.delegation_status.borrow().map(delegation_status_str);

    let mut queries: Vec<SerializedQuery> = na
        .queries
        .values()
        .map(|query| serialize_query(na, query, loglevel, html_format))
        .collect();
    queries.sort_by(|a, b| a.id.cmp(&b.id));

    SerializedName {
        name: na.name.to_string(),
        name_status,
        delegation_status,
        queries,
    }
}

fn serialize_query(na: &NameAnalysis, query: &dnssec_analysis_domain::Query, loglevel: LogLevel, html_format: bool) -> SerializedQuery {
    let id = format!("{}/IN/{}", query.qname, query.rdtype);

    let rrsig_statuses: Vec<SerializedRrsigStatus> = na
        .status
        .rrsig_status
        .borrow()
        .iter()
        .filter(|(key, _)| key.owner == query.qname && key.rdtype == query.rdtype)
        .map(|(key, status)| serialize_rrsig_status(key, status))
        .collect();

    let errors: Vec<SerializedError> = na
        .status
        .key_errors
        .borrow()
        .iter()
        .filter(|e| severity_rank(e.severity) >= loglevel_rank(loglevel))
        .map(|e| serialize_error(e, html_format))
        .collect();

    SerializedQuery {
        id,
        rdtype: query.rdtype.to_string(),
        rrsig_statuses,
        errors,
    }
}

fn serialize_rrsig_status(key: &dnssec_analysis_domain::RrsigStatusKey, status: &RrsigStatus) -> SerializedRrsigStatus {
    SerializedRrsigStatus {
        owner: key.owner.to_string(),
        rdtype: key.rdtype.to_string(),
        signer: key.signer.to_string(),
        dnskey_key_tag: status.dnskey_key_tag,
        status: validation_status_str(status.status),
    }
}

fn serialize_error(error: &ErrorInfo, html_format: bool) -> SerializedError {
    let description = format!("{:?}", error.kind);
    let description = if html_format {
        description.replace('<', "&lt;").replace('>', "&gt;")
    } else {
        description
    };
    SerializedError {
        kind: format!("{:?}", error.kind),
        severity: severity_str(error.severity),
        intermittent: error.intermittent,
        description,
    }
}

fn name_status_str(status: NameStatus) -> &'static str {
    match status {
        NameStatus::NoError => "NOERROR",
        NameStatus::NxDomain => "NXDOMAIN",
        NameStatus::Indeterminate => "INDETERMINATE",
    }
}

fn delegation_status_str(status: DelegationStatus) -> &'static str {
    match status {
        DelegationStatus::Secure => "SECURE",
        DelegationStatus::Insecure => "INSECURE",
        DelegationStatus::Bogus => "BOGUS",
        DelegationStatus::Incomplete => "INCOMPLETE",
        DelegationStatus::Lame => "LAME",
    }
}

fn validation_status_str(status: dnssec_analysis_domain::ValidationStatus) -> &'static str {
    use dnssec_analysis_domain::ValidationStatus::*;
    match status {
        Valid => "VALID",
        InvalidSignature => "INVALID_SIG",
        InvalidDigest => "INVALID_DIGEST",
        Expired => "EXPIRED",
        Premature => "PREMATURE",
        AlgUnsupported => "ALG_UNSUPPORTED",
        KeyUnavailable => "KEY_UNAVAILABLE",
        Indeterminate => "INDETERMINATE",
    }
}

fn severity_str(s: Severity) -> &'static str {
    match s {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

fn severity_rank(s: Severity) -> u8 {
    match s {
        Severity::Info => 0,
        Severity::Warning => 1,
        Severity::Error => 2,
    }
}

fn loglevel_rank(l: LogLevel) -> u8 {
    match l {
        LogLevel::Info => 0,
        LogLevel::Warning => 1,
        LogLevel::Error => 2,
    }
}
