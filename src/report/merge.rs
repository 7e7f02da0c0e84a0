use super::{
    acceptable_value, CanonicalResolverRecord, RawResolverRecord, HOSTNAME_NONE, NO_PTR,
    UNKNOWN_CITY, UNKNOWN_COUNTRY, UNKNOWN_ISP,
};
use std::collections::BTreeMap;

/// Resolver records keyed and ordered by address.
pub type MergedRecords = BTreeMap<String, CanonicalResolverRecord>;

/// Folds raw observations into one record per resolver address, in input order.
///
/// Records without an address are dropped. For `isp`, `city` and `country` a usable
/// value always replaces the current one, while an empty or placeholder value only
/// fills a field that was never reported. Hostnames stick once a real name is known.
/// Everything else is last-value-wins.
pub fn merge<I>(records: I) -> MergedRecords
where
    I: IntoIterator<Item = RawResolverRecord>,
{
    let mut merged = MergedRecords::new();

    for record in records {
        let ip = match record.ip_address.as_deref() {
            Some(ip) if !ip.is_empty() => ip.to_string(),
            _ => continue,
        };

        merged
            .entry(ip)
            .or_insert_with_key(|ip| CanonicalResolverRecord::new(ip))
            .absorb(record);
    }

    merged
}

impl CanonicalResolverRecord {
    /// Applies one more observation of this resolver.
    pub fn absorb(&mut self, record: RawResolverRecord) {
        if let Some(ip) = record.ip_address {
            self.ip_address = ip;
        }
        merge_field(&mut self.isp, record.isp.as_deref(), UNKNOWN_ISP);
        merge_field(&mut self.city, record.city.as_deref(), UNKNOWN_CITY);
        merge_field(&mut self.country, record.country.as_deref(), UNKNOWN_COUNTRY);
        merge_hostname(&mut self.hostname, record.hostname.as_deref());
        self.extra.extend(record.extra);
    }
}

fn merge_field(current: &mut Option<String>, incoming: Option<&str>, placeholder: &str) {
    let Some(incoming) = incoming else {
        return;
    };

    match acceptable_value(incoming, placeholder) {
        Some(value) => *current = Some(value.to_string()),
        None if current.is_none() => *current = Some(String::new()),
        None => {}
    }
}

fn merge_hostname(current: &mut Option<String>, incoming: Option<&str>) {
    let Some(incoming) = incoming else {
        return;
    };

    let has_real_name = current.as_deref().is_some_and(|name| name != NO_PTR);
    if incoming.is_empty() || incoming == HOSTNAME_NONE {
        if current.is_none() {
            *current = Some(NO_PTR.to_string());
        }
    } else if !has_real_name {
        *current = Some(incoming.to_string());
    }
}
