use super::{decode_records, merge, CanonicalResolverRecord, MergedRecords};
use crate::utils::Result;

pub const REPORT_HEADING: &str = "Test complete:";

/// One line of the report without its ordinal:
/// `<ip> (<hostname>)[ hosted by <isp>][ in <city>[, <country>]]`.
pub fn describe(record: &CanonicalResolverRecord) -> String {
    let mut line = format!("{} ({})", record.ip_address, record.hostname());

    if let Some(isp) = record.isp() {
        line.push_str(" hosted by ");
        line.push_str(isp);
    }

    match (record.city(), record.country()) {
        (Some(city), Some(country)) => line.push_str(&format!(" in {city}, {country}")),
        (Some(place), None) | (None, Some(place)) => line.push_str(&format!(" in {place}")),
        (None, None) => {}
    }

    line
}

/// Numbered resolver list, one `  N) ...` line per resolver.
pub fn render(merged: &MergedRecords) -> String {
    merged
        .values()
        .filter(|record| !record.ip_address.is_empty())
        .enumerate()
        .map(|(i, record)| format!("  {}) {}\n", i + 1, describe(record)))
        .collect()
}

/// Decodes a `servers-for-result` body, merges it and renders the resolver list.
pub fn render_body(body: &[u8]) -> Result<String> {
    let records = decode_records(body)?;
    log::info!("Received {} resolver observations", records.len());
    Ok(render(&merge(records)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NO_PTR;

    fn record(
        isp: Option<&str>,
        city: Option<&str>,
        country: Option<&str>,
    ) -> CanonicalResolverRecord {
        CanonicalResolverRecord {
            ip_address: "1.1.1.1".to_string(),
            isp: isp.map(str::to_string),
            city: city.map(str::to_string),
            country: country.map(str::to_string),
            hostname: Some("one.one.one.one".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_describe_full() {
        let line = describe(&record(Some("Cloudflare"), Some("Sydney"), Some("Australia")));
        assert_eq!(
            line,
            "1.1.1.1 (one.one.one.one) hosted by Cloudflare in Sydney, Australia"
        );
        assert_eq!(line.matches(',').count(), 1);
    }

    #[test]
    fn test_describe_city_without_country_has_no_comma() {
        let line = describe(&record(None, Some("Sydney"), None));
        assert_eq!(line, "1.1.1.1 (one.one.one.one) in Sydney");

        let line = describe(&record(None, Some("Sydney"), Some("Unknown country")));
        assert_eq!(line, "1.1.1.1 (one.one.one.one) in Sydney");
    }

    #[test]
    fn test_describe_country_without_city() {
        let line = describe(&record(None, Some(""), Some("Australia")));
        assert_eq!(line, "1.1.1.1 (one.one.one.one) in Australia");
    }

    #[test]
    fn test_describe_without_location_or_isp() {
        let line = describe(&record(Some("Unknown isp"), Some("Unknown city"), None));
        assert_eq!(line, "1.1.1.1 (one.one.one.one)");
    }

    #[test]
    fn test_describe_missing_hostname() {
        let mut rec = record(None, None, None);
        rec.hostname = None;
        assert_eq!(describe(&rec), format!("1.1.1.1 ({NO_PTR})"));
    }

    #[test]
    fn test_render_numbers_from_one() {
        let body = br#"[
            {"ip_address": "9.9.9.9", "hostname": "dns9.quad9.net", "isp": "Quad9"},
            {"ip_address": "1.1.1.1", "hostname": "None", "country": "Australia"},
            {"ip_address": "", "isp": "dropped"}
        ]"#;
        let text = render_body(body).unwrap();
        assert_eq!(
            text,
            "  1) 1.1.1.1 (No PTR) in Australia\n  2) 9.9.9.9 (dns9.quad9.net) hosted by Quad9\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_body(b"[]").unwrap(), "");
    }
}
