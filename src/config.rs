use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "debug".into());
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET should be provided");
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

        Ok(Self {
            database_url,
            rust_log,
            jwt_secret,
            bind_addr,
        })
    }
}
