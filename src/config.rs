pub fn get_vessel_api_url() -> String {
    std::env::var("VESSEL_API_URL").unwrap_or_else(|_| {
        let default = "http://localhost:8080".to_string();
        tracing::trace!("VESSEL_API_URL not set, using default: {default}");
        default
    })
}

pub fn get_start_href() -> String {
    std::env::var("MAP_START_HREF").unwrap_or_else(|_| {
        let default = "/map".to_string();
        tracing::trace!("MAP_START_HREF not set, using default: {default}");
        default
    })
}

/// Optional JSON file served instead of the built-in fleet.
pub fn get_vessel_fixture() -> Option<String> {
    std::env::var("VESSEL_FIXTURE").ok().map(|value| value.trim().to_string()).filter(|value| {
        let set = !value.is_empty();
        if set {
            tracing::trace!("VESSEL_FIXTURE loaded from environment");
        }
        set
    })
}
