use dnssec_analysis_domain::{EdnsParams, ErrorInfo, ErrorKind, Response, ResponsiveCause, Severity, WitnessSet};

/// C4: turns the EDNS/transport facts carried on one collected
/// `Response` into the error/warning taxonomy (§7), following the EDNS
/// three-way decision table (query vs response vs effective EDNS) plus
/// the authority/recursion/referral checks. Severity is resolved against
/// whether the owning zone is signed (§4.4: an unsigned zone has no
/// reasonable expectation of getting any of this right).
pub fn classify(response: &Response, zone_is_signed: bool) -> Vec<ErrorInfo> {
    let mut errors = Vec::new();
    let witnesses: WitnessSet = [response.witness()].into_iter().collect();

    classify_responsive_cause(response, zone_is_signed, &witnesses, &mut errors);
    classify_edns(response, zone_is_signed, &witnesses, &mut errors);

    if !response.authoritative && !response.is_upward_referral {
        push(&mut errors, ErrorKind::NotAuthoritative, zone_is_signed, &witnesses, false);
    }
    if response.recursion_desired && !response.recursion_available {
        push(&mut errors, ErrorKind::RecursionNotAvailable, zone_is_signed, &witnesses, false);
    }
    if response.is_upward_referral {
        push(&mut errors, ErrorKind::UpwardReferral, zone_is_signed, &witnesses, false);
    }

    errors
}

fn classify_responsive_cause(
    response: &Response,
    zone_is_signed: bool,
    witnesses: &WitnessSet,
    errors: &mut Vec<ErrorInfo>,
) {
    let intermittent = response.other_edns_query_succeeded;
    match response.responsive_cause {
        ResponsiveCause::None => {}
        ResponsiveCause::NetworkError => {
            push(errors, ErrorKind::NetworkError, zone_is_signed, witnesses, intermittent)
        }
        ResponsiveCause::FormError => push(errors, ErrorKind::FormError, zone_is_signed, witnesses, intermittent),
        ResponsiveCause::Timeout { attempt_index } => push(
            errors,
            ErrorKind::Timeout { attempts: attempt_index },
            zone_is_signed,
            witnesses,
            intermittent,
        ),
        ResponsiveCause::Rcode(rcode) => push(
            errors,
            ErrorKind::InvalidRcode { rcode: rcode.to_u8() },
            zone_is_signed,
            witnesses,
            intermittent,
        ),
        ResponsiveCause::Other => {
            tracing::warn!(cause = ?response.responsive_cause, "unclassified responsive cause");
            push(errors, ErrorKind::Unclassified, zone_is_signed, witnesses, intermittent);
        }
    }
}

/// Three-way EDNS comparison: what the initial query asked for, what
/// the effective (on-the-wire, post-retry) request actually sent, and
/// what the response indicated. A query that used EDNS but whose
/// effective request silently dropped it signals a middlebox or
/// resolver stripping EDNS; a version or flag mismatch between
/// response and query signals the server's own EDNS handling.
fn classify_edns(response: &Response, zone_is_signed: bool, witnesses: &WitnessSet, errors: &mut Vec<ErrorInfo>) {
    let (Some(query_edns), Some(effective_edns)) = (response.query_edns, response.effective_edns) else {
        return;
    };

    if query_edns.version != effective_edns.version {
        push(
            errors,
            ErrorKind::UnsupportedEdnsVersion { version: query_edns.version },
            zone_is_signed,
            witnesses,
            false,
        );
        return;
    }

    match response.response_edns {
        None => {
            // Query used EDNS but the response carried no OPT record at
            // all: treat as EDNS being silently ignored by the server.
            push(errors, ErrorKind::EdnsIgnored, zone_is_signed, witnesses, response.other_edns_query_succeeded);
        }
        Some(response_edns) => {
            classify_edns_flags(query_edns, response_edns, zone_is_signed, witnesses, errors);
        }
    }

    if matches!(response.responsive_cause, ResponsiveCause::Rcode(_)) {
        push(errors, ErrorKind::ResponseErrorWithEdns, zone_is_signed, witnesses, false);
    }
}

fn classify_edns_flags(
    query_edns: EdnsParams,
    response_edns: EdnsParams,
    zone_is_signed: bool,
    witnesses: &WitnessSet,
    errors: &mut Vec<ErrorInfo>,
) {
    let differing = query_edns.flags ^ response_edns.flags;
    if differing != 0 {
        for bit in 0u8..16 {
            if differing & (1 << bit) != 0 {
                push(
                    errors,
                    ErrorKind::ResponseErrorWithEdnsFlag { flag_bit: bit },
                    zone_is_signed,
                    witnesses,
                    false,
                );
            }
        }
    }
    if response_edns.max_udp_payload < query_edns.max_udp_payload {
        push(errors, ErrorKind::PmtuExceeded, zone_is_signed, witnesses, false);
    }
}

fn push(errors: &mut Vec<ErrorInfo>, kind: ErrorKind, zone_is_signed: bool, witnesses: &WitnessSet, intermittent: bool) {
    let severity = kind.default_severity(zone_is_signed);
    errors.push(ErrorInfo::new(kind, severity, witnesses.clone()).intermittent(intermittent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnssec_analysis_domain::{Rcode, ResponseId};
    use std::net::IpAddr;

    fn base_response() -> Response {
        let addr: IpAddr = "127.0.0.1".parse().unwrap();
        Response {
            id: ResponseId(1),
            server: addr,
            client: addr,
            rcode: Rcode::NoError,
            authoritative: true,
            recursion_desired: false,
            recursion_available: false,
            is_upward_referral: false,
            query_edns: None,
            response_edns: None,
            effective_edns: None,
            responsive_cause: ResponsiveCause::None,
            other_edns_query_succeeded: false,
        }
    }

    #[test]
    fn clean_response_produces_no_errors() {
        let response = base_response();
        assert!(classify(&response, true).is_empty());
    }

    #[test]
    fn non_authoritative_non_referral_is_flagged() {
        let mut response = base_response();
        response.authoritative = false;
        let errors = classify(&response, true);
        assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::NotAuthoritative)));
    }

    #[test]
    fn edns_ignored_when_response_carries_no_opt() {
        let mut response = base_response();
        let edns = EdnsParams { version: 0, max_udp_payload: 4096, flags: 0 };
        response.query_edns = Some(edns);
        response.effective_edns = Some(edns);
        let errors = classify(&response, true);
        assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::EdnsIgnored)));
    }

    #[test]
    fn unsigned_zone_downgrades_severity_to_warning() {
        let mut response = base_response();
        response.authoritative = false;
        let errors = classify(&response, false);
        let err = errors.iter().find(|e| matches!(e.kind, ErrorKind::NotAuthoritative)).unwrap();
        assert_eq!(err.severity, Severity::Warning);
    }
}
