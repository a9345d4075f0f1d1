use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use std::sync::Arc;
use tracker_client::HttpTransport;
use tracker_ui::logging::{init_logging, LogFormat};
use tracker_ui::{server, Rendered, Renderer, UiConfig};

fn cli() -> Command {
    Command::new("tracker-ui")
        .version(tracker_ui::VERSION)
        .about("Issue tracker UI server")
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("pretty")
                .value_parser(LogFormat::NAMES)
                .help("Log output format"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .help("Default level when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Shorthand for --log-format json"),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve pages (default)")
                .arg(
                    Arg::new("port")
                        .long("port")
                        .value_parser(value_parser!(u16))
                        .help("Listen port (overrides PORT)"),
                )
                .arg(
                    Arg::new("api-endpoint")
                        .long("api-endpoint")
                        .help("Backend endpoint for the browser (overrides UI_API_ENDPOINT)"),
                )
                .arg(
                    Arg::new("server-api-endpoint")
                        .long("server-api-endpoint")
                        .help("Backend endpoint for server renders (overrides UI_SERVER_API_ENDPOINT)"),
                )
                .arg(
                    Arg::new("auth-endpoint")
                        .long("auth-endpoint")
                        .help("Auth endpoint (overrides UI_AUTH_ENDPOINT)"),
                )
                .arg(
                    Arg::new("google-client-id")
                        .long("google-client-id")
                        .help("Sign-in client id (overrides GOOGLE_CLIENT_ID)"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render one URL to stdout")
                .arg(Arg::new("url").required(true).help("Path and search, e.g. /issues?status=New"))
                .arg(Arg::new("cookie").long("cookie").help("Cookie header to forward")),
        )
}

fn apply_overrides(mut config: UiConfig, args: &clap::ArgMatches) -> UiConfig {
    if let Some(port) = args.get_one::<u16>("port") {
        config = config.with_port(*port);
    }
    if let Some(endpoint) = args.get_one::<String>("api-endpoint") {
        config = config.with_api_endpoint(endpoint);
    }
    if let Some(endpoint) = args.get_one::<String>("server-api-endpoint") {
        config = config.with_server_api_endpoint(endpoint);
    }
    if let Some(endpoint) = args.get_one::<String>("auth-endpoint") {
        config = config.with_auth_endpoint(endpoint);
    }
    if let Some(client_id) = args.get_one::<String>("google-client-id") {
        config = config.with_google_client_id(client_id);
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let format = if matches.get_flag("json") {
        LogFormat::Json
    } else {
        matches
            .get_one::<String>("log-format")
            .map_or(LogFormat::Pretty, |name| LogFormat::from_name(name))
    };
    let level = matches.get_one::<String>("log-level").map_or("info", String::as_str);
    init_logging(format, level);

    let config = UiConfig::from_env().context("reading configuration from the environment")?;

    match matches.subcommand() {
        Some(("render", args)) => {
            let url = args.get_one::<String>("url").context("url is required")?;
            let cookie = args.get_one::<String>("cookie").cloned();
            let renderer = Renderer::new(config, Arc::new(HttpTransport::new()?));
            match renderer.render(url, cookie, uuid::Uuid::new_v4()).await? {
                Rendered::Html(html) => println!("{html}"),
                Rendered::Redirect(target) => println!("307 -> {target}"),
            }
        }
        Some(("serve", args)) => {
            server::serve(apply_overrides(config, args)).await?;
        }
        _ => {
            server::serve(config).await?;
        }
    }
    Ok(())
}
