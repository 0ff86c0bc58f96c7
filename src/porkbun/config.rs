pub const DEFAULT_ENDPOINT: &str = "https://api.porkbun.com/api/json/v3/";

fn default_endpoint() -> url::Url {
    url::Url::parse(DEFAULT_ENDPOINT).expect("default endpoint should be a valid URL")
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: url::Url,
    pub apikey: String,
    pub secretapikey: String,
}
