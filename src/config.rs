use clap::Parser;
use config::ConfigError;
use serde::Deserialize;

use crate::types::pagination::QUESTIONS_PER_PAGE;

/// 명령행 인자. 주어진 값만 다른 설정을 덮어쓴다.
#[derive(Parser, Debug, Default, Clone)]
#[clap(author, version, about = "Trivia question and quiz API")]
pub struct Args {
    /// 로그 필터 (RUST_LOG가 있으면 그쪽이 이긴다)
    #[clap(short, long)]
    pub log_level: Option<String>,
    /// 웹 서버 포트
    #[clap(short, long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub database_host: Option<String>,
    #[clap(long)]
    pub database_port: Option<u16>,
    #[clap(long)]
    pub database_name: Option<String>,
    #[clap(long)]
    pub database_user: Option<String>,
    #[clap(long)]
    pub database_password: Option<String>,
    /// 페이지당 질문 수
    #[clap(long)]
    pub questions_per_page: Option<usize>,
    /// PostgreSQL 대신 시드 데이터를 담은 메모리 저장소를 쓴다
    #[clap(long)]
    pub in_memory: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub port: u16,
    pub database_host: String,
    pub database_port: u16,
    pub database_name: String,
    pub database_user: String,
    pub database_password: String,
    pub questions_per_page: usize,
    pub in_memory: bool,
}

impl Config {
    /// 기본값 < setup.toml < TRIVIA_* 환경 변수(.env 포함) < 명령행 인자
    pub fn new() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Config::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Config, ConfigError> {
        let config = config::Config::builder()
            .set_default("log_level", "trivia_api=info,warp=error")?
            .set_default("port", 8080_i64)?
            .set_default("database_host", "localhost")?
            .set_default("database_port", 5432_i64)?
            .set_default("database_name", "trivia")?
            .set_default("database_user", "postgres")?
            .set_default("database_password", "postgres")?
            .set_default("questions_per_page", QUESTIONS_PER_PAGE as i64)?
            .set_default("in_memory", false)?
            .add_source(config::File::with_name("setup").required(false))
            .add_source(config::Environment::with_prefix("TRIVIA").try_parsing(true))
            .set_override_option("log_level", args.log_level)?
            .set_override_option("port", args.port.map(i64::from))?
            .set_override_option("database_host", args.database_host)?
            .set_override_option("database_port", args.database_port.map(i64::from))?
            .set_override_option("database_name", args.database_name)?
            .set_override_option("database_user", args.database_user)?
            .set_override_option("database_password", args.database_password)?
            .set_override_option(
                "questions_per_page",
                args.questions_per_page.map(|n| n as i64),
            )?
            .set_override_option("in_memory", args.in_memory.then_some(true))?
            .build()?;

        let config = config.try_deserialize::<Config>()?;
        if config.questions_per_page == 0 {
            return Err(ConfigError::Message(
                "questions_per_page must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// DATABASE_URL이 있으면 그 값을, 없으면 설정값으로 만든 연결 문자열을 쓴다.
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.database_user,
                self.database_password,
                self.database_host,
                self.database_port,
                self.database_name
            )
        })
    }
}
