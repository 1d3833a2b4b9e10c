use pricepredict::config::{ApiConfig, DEFAULT_ORIGIN};
use pricepredict::HttpApi;

use crate::monitoring::Logger;

/// Client handle shared by the page; the error string is shown in place of the form
pub type Connection = Result<HttpApi, String>;

/// Build-time settings, e.g. `PRICEPREDICT_ENV=production dx build`
fn build_var(key: &str) -> Option<String> {
    let value = match key {
        "PRICEPREDICT_API_URL" => option_env!("PRICEPREDICT_API_URL"),
        "PRICEPREDICT_ENV" => option_env!("PRICEPREDICT_ENV"),
        "PRICEPREDICT_TIMEOUT_SECS" => option_env!("PRICEPREDICT_TIMEOUT_SECS"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Origin of the page, used to resolve a relative base such as `/api`
fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
}

pub fn connect() -> Connection {
    let config = ApiConfig::from_lookup(build_var)
        .map_err(|e| e.to_string())?
        .with_origin(page_origin());

    let api = HttpApi::new(config).map_err(|e| {
        let message = format!("Prediction service is misconfigured: {}", e);
        Logger::error(&message);
        message
    })?;
    Logger::log_info(&format!("Using prediction service at {}", api.config().base_url));
    Ok(api)
}
