//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# giga configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[auth]
# token_url = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth"
# scope = "GIGACHAT_API_PERS"
# Prefer the GIGACHAT_CLIENT_ID / GIGACHAT_CLIENT_SECRET env vars.
# client_id = ""
# client_secret = ""
# cert_path = "resources/russian_trusted_root_ca.cer"   # PEM or DER
# connect_timeout_secs = 10

[api]
# completion_url = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions"
# model = "GigaChat"
# max_tokens = 1024
# connect_timeout_secs = 30
# request_timeout_secs = 120

[chat]
# temperature = 0.87     # 0.0-2.0
# max_messages = 10      # >= 3, compression kicks in at this size
# resources_dir = "resources"
# system_prompt_file = "system_prompt.txt"

[tools]
# server_url = "http://localhost:8080"
# timeout_secs = 10      # 1-300, per tool invocation
# discover = false       # register every tool from GET /tools/list

[server]
# host = "127.0.0.1"
# port = 8080
# workers = 10           # 1-256

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
