use std::fs;
use std::path::Path;

pub const SAMPLE_CONFIG: &str = r#"[site]
title = "ConstruAcademy"
base_url = "http://localhost:8080"

[paths]
# ${exe_dir} expands to the directory of the running binary
template_dir = "templates"
public_dir = "public"
data_dir = "data"

[defaults]
page_size = 9
rendering_cache_enabled = true

[server]
address = "127.0.0.1"
port = 8080

[generator]
base_url = "https://generativelanguage.googleapis.com"
model = "gemini-2.5-flash"
timeout_secs = 60
# The API credential comes from the GEMINI_API_KEY environment variable.

[log]
level = "Info"
log_to_console = true
# location = "logs/construacademy.log"
"#;

pub fn write_sample_cfg(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, SAMPLE_CONFIG)
}
