use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Site {
    pub title: String,
    /// Public base URL, used to build absolute links in the RSS feed.
    pub base_url: String,
}

#[derive(Deserialize, Debug)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Where the serialized article state lives.
    pub data_dir: PathBuf,
}

#[derive(Deserialize, Debug)]
pub struct Defaults {
    pub page_size: u32,
    pub rendering_cache_enabled: bool,
}

#[derive(Deserialize, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Debug)]
pub struct Generator {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub generator: Generator,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe().unwrap();
        let exe_dir = cur_exe.parent().unwrap().to_str().unwrap();
        let str_path = path.to_str().unwrap();
        PathBuf::from(str_path.replace("${exe_dir}", exe_dir))
    } else {
        path
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
        data_dir: parse_path(cfg.paths.data_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_sample_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("construacademy.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(crate::config_data::SAMPLE_CONFIG.as_bytes())
            .unwrap();

        let cfg = read_config(&path).unwrap();
        assert_eq!(cfg.site.title, "ConstruAcademy");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.generator.model, "gemini-2.5-flash");
        assert!(cfg.defaults.rendering_cache_enabled);
        assert!(cfg.log.is_some());
    }

    #[test]
    fn test_missing_file_reports_the_path() {
        let err = read_config(&PathBuf::from("/definitely/missing.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.toml"));
    }
}
