//! Carrier service table, used to populate configuration choices.

/// `(code, label)` pairs in the carrier's own table order.
pub const SERVICES: &[(&str, &str)] = &[
    ("01", "Next Day Air"),
    ("02", "2nd Day Air"),
    ("03", "Ground"),
    ("07", "Worldwide Express"),
    ("08", "Worldwide Expedited"),
    ("11", "Standard"),
    ("12", "3 Day Select"),
    ("13", "Next Day Air Saver"),
    ("14", "Next Day Air Early A.M."),
    ("54", "Worldwide Express Plus"),
    ("59", "2nd Day Air A.M."),
    ("65", "Saver"),
    ("70", "Access Point Economy"),
    ("71", "Worldwide Express Freight Midday"),
    ("82", "Today Standard"),
    ("83", "Today Dedicated Courier"),
    ("84", "Today Intercity"),
    ("85", "Today Express"),
    ("86", "Today Express Saver"),
    ("92", "SurePost Less Than 1 lb"),
    ("93", "SurePost 1 lb or Greater"),
    ("94", "SurePost BPM"),
    ("95", "SurePost Media"),
    ("96", "Worldwide Express Freight"),
    ("M2", "First Class Mail"),
    ("M3", "Priority Mail"),
    ("M4", "Expedited Mail Innovations"),
    ("M5", "Priority Mail Innovations"),
    ("M6", "Economy Mail Innovations"),
];

pub fn list_available_services() -> &'static [(&'static str, &'static str)] {
    SERVICES
}

pub fn service_label(code: &str) -> Option<&'static str> {
    SERVICES
        .iter()
        .find(|(service_code, _)| *service_code == code)
        .map(|(_, label)| *label)
}

pub fn service_codes() -> Vec<&'static str> {
    SERVICES.iter().map(|(code, _)| *code).collect()
}
